// src/data.rs

use std::collections::HashSet;

use crate::error::CatalogError;
use crate::model::Catalog;

/// Parses a catalog and checks that every exercise id is present and unique.
pub fn parse_catalog(yaml: &str) -> Result<Catalog, CatalogError> {
    let catalog: Catalog = serde_yaml::from_str(yaml)?;

    let mut seen = HashSet::new();
    for section in &catalog.sections {
        for exercise in &section.exercises {
            if exercise.id.trim().is_empty() {
                return Err(CatalogError::EmptyExerciseId(section.id.clone()));
            }
            if !seen.insert(exercise.id.as_str()) {
                return Err(CatalogError::DuplicateExercise(exercise.id.clone()));
            }
        }
    }

    Ok(catalog)
}

/// Loads the lesson catalog compiled into the binary.
pub fn read_catalog_embedded() -> Result<Catalog, CatalogError> {
    let file_content = include_str!("data/catalog.yaml");
    let catalog = parse_catalog(file_content)?;
    log::info!(
        "catalog loaded: {} sections, {} exercises",
        catalog.sections.len(),
        catalog.exercise_count()
    );
    Ok(catalog)
}

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn marker(self) -> &'static str {
        match self {
            Difficulty::Easy => "🟢",
            Difficulty::Medium => "🟡",
            Difficulty::Hard => "🔴",
        }
    }

    /// Colour used for the marker, as an sRGB triple.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Difficulty::Easy => (0x22, 0xc5, 0x5e),
            Difficulty::Medium => (0xea, 0xb3, 0x08),
            Difficulty::Hard => (0xef, 0x44, 0x44),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: String,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub starter_code: String,
    pub solution: String,
    #[serde(default)]
    pub hints: Vec<String>,
    #[serde(default)]
    pub expected_output: Option<String>,
}

impl Exercise {
    /// Expected output, treating an empty string as "no expectation".
    pub fn expected(&self) -> Option<&str> {
        self.expected_output.as_deref().filter(|s| !s.is_empty())
    }
}

/// A lesson: trusted Markdown content followed by its exercises.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub sections: Vec<Section>,
}

impl Catalog {
    pub fn exercises(&self) -> impl Iterator<Item = &Exercise> {
        self.sections.iter().flat_map(|s| s.exercises.iter())
    }

    pub fn exercise(&self, id: &str) -> Option<&Exercise> {
        self.exercises().find(|e| e.id == id)
    }

    pub fn exercise_count(&self) -> usize {
        self.exercises().count()
    }
}

/// Why a run did not produce a clean result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// The request never completed: unreachable service, bad status, malformed body.
    Transport(String),
    /// The service ran the code and reported a compile or runtime failure.
    Program(String),
}

impl ExecutionError {
    pub fn text(&self) -> &str {
        match self {
            ExecutionError::Transport(text) | ExecutionError::Program(text) => text,
        }
    }
}

/// Outcome of one run. Lives only until the next run of the same exercise.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExecutionResult {
    pub raw_output: String,
    pub error: Option<ExecutionError>,
}

impl ExecutionResult {
    pub fn success(raw_output: impl Into<String>) -> Self {
        Self {
            raw_output: raw_output.into(),
            error: None,
        }
    }

    pub fn program_failure(raw_output: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            raw_output: raw_output.into(),
            error: Some(ExecutionError::Program(error.into())),
        }
    }

    pub fn transport_failure(diagnostic: impl Into<String>) -> Self {
        Self {
            raw_output: String::new(),
            error: Some(ExecutionError::Transport(diagnostic.into())),
        }
    }

    pub fn error_text(&self) -> Option<&str> {
        self.error.as_ref().map(ExecutionError::text)
    }

    pub fn is_transport_failure(&self) -> bool {
        matches!(self.error, Some(ExecutionError::Transport(_)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verdict {
    #[default]
    Unknown,
    Correct,
    Incorrect,
}

use egui_code_editor::Syntax;

pub fn java_syntax() -> Syntax {
    Syntax::new("java")
        .with_comment("//")
        .with_comment_multiline(["/*", "*/"])
        .with_keywords([
            "abstract", "break", "case", "catch", "class", "continue", "default", "do", "else",
            "enum", "extends", "final", "finally", "for", "if", "implements", "import",
            "instanceof", "interface", "new", "package", "private", "protected", "public",
            "record", "return", "static", "super", "switch", "this", "throw", "throws", "try",
            "var", "while", "yield", "true", "false", "null",
        ])
        .with_types([
            "int", "long", "short", "byte", "char", "float", "double", "boolean", "void",
            "String", "Integer", "Long", "Double", "Boolean", "Object", "List", "Map", "Set",
            "Optional", "Stream", "IntStream", "Collectors", "Function", "BiFunction",
            "Predicate", "Consumer", "BiConsumer", "Supplier", "UnaryOperator",
            "BinaryOperator", "Comparator", "Arrays",
        ])
}

/// Editor height in rows: the code's line count, kept within `min..=max`.
pub fn editor_rows(code: &str, min: usize, max: usize) -> usize {
    code.lines().count().clamp(min, max.max(min))
}

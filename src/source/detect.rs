// src/source/detect.rs

use crate::core_types::DeclaredType;
use std::path::Path;

/// Declares a file's type from its extension, falling back to sniffing JSON.
///
/// Extensions are compared case-insensitively. Files with an unknown extension
/// are `Json` when the whole content parses as JSON, `Text` otherwise.
pub fn detect_declared_type(file_name: &str, content: &str) -> DeclaredType {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("json") => DeclaredType::Json,
        Some("log") | Some("txt") => DeclaredType::Text,
        Some("xml") => DeclaredType::Xml,
        Some("yaml") | Some("yml") => DeclaredType::Yaml,
        Some("html") | Some("htm") => DeclaredType::Html,
        _ if serde_json::from_str::<serde_json::Value>(content).is_ok() => DeclaredType::Json,
        _ => DeclaredType::Text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_extension() {
        assert_eq!(detect_declared_type("a/b.JSON", "nope"), DeclaredType::Json);
        assert_eq!(detect_declared_type("app.log", "{}"), DeclaredType::Text);
        assert_eq!(detect_declared_type("notes.txt", ""), DeclaredType::Text);
        assert_eq!(detect_declared_type("pom.xml", ""), DeclaredType::Xml);
        assert_eq!(detect_declared_type("ci.yml", ""), DeclaredType::Yaml);
        assert_eq!(detect_declared_type("index.htm", ""), DeclaredType::Html);
    }

    #[test]
    fn test_sniffs_json_without_known_extension() {
        assert_eq!(
            detect_declared_type("nettype", r#"{"wifi": true}"#),
            DeclaredType::Json
        );
        assert_eq!(detect_declared_type("dmesg", "[0.0] boot"), DeclaredType::Text);
    }
}

// src/classify.rs

use crate::core_types::{ContentClass, DeclaredType};

/// Literal tokens whose presence marks text as a log. Matched case-sensitively.
const LOG_TOKENS: [&str; 3] = ["ERROR", "WARN", "INFO"];

/// Decides how a payload is rendered.
///
/// Declared JSON always wins. Otherwise the content is a log when the source
/// declared it as text, when the file name mentions "log" in any case, or when
/// the content carries one of the upper-case level tokens. Anything else is plain.
///
/// # Examples
/// ```
/// use logview::classify::classify;
/// use logview::core_types::{ContentClass, DeclaredType};
///
/// assert_eq!(classify(DeclaredType::Json, "a.txt", "not json"), ContentClass::Json);
/// assert_eq!(classify(DeclaredType::Xml, "Server.LOG", "<a/>"), ContentClass::Log);
/// assert_eq!(classify(DeclaredType::Yaml, "conf.yml", "key: value"), ContentClass::Plain);
/// ```
pub fn classify(declared: DeclaredType, file_name: &str, content: &str) -> ContentClass {
    if declared == DeclaredType::Json {
        return ContentClass::Json;
    }
    if declared == DeclaredType::Text
        || file_name.to_lowercase().contains("log")
        || LOG_TOKENS.iter().any(|token| content.contains(token))
    {
        return ContentClass::Log;
    }
    ContentClass::Plain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_json_wins_over_name_and_content() {
        assert_eq!(
            classify(DeclaredType::Json, "app.log", "ERROR something"),
            ContentClass::Json
        );
    }

    #[test]
    fn test_declared_text_is_log() {
        assert_eq!(
            classify(DeclaredType::Text, "readme", "hello"),
            ContentClass::Log
        );
    }

    #[test]
    fn test_file_name_mentions_log() {
        assert_eq!(
            classify(DeclaredType::Html, "Catalog.html", "<p>"),
            ContentClass::Log
        );
        assert_eq!(
            classify(DeclaredType::Xml, "BACKLOG.xml", "<a/>"),
            ContentClass::Log
        );
    }

    #[test]
    fn test_level_tokens_are_case_sensitive() {
        assert_eq!(
            classify(DeclaredType::Yaml, "conf.yaml", "level: WARN"),
            ContentClass::Log
        );
        assert_eq!(
            classify(DeclaredType::Yaml, "conf.yaml", "level: warn"),
            ContentClass::Plain
        );
    }

    #[test]
    fn test_absence_of_signal_is_plain() {
        assert_eq!(classify(DeclaredType::Xml, "data.xml", ""), ContentClass::Plain);
    }
}

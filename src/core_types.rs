//! Defines core data structures shared by the rendering pipeline.
//!
//! A `FilePayload` comes in from a content source, gets a `ContentClass`, and
//! leaves the formatter as a sequence of `LineRecord`s made of structured `Span`s.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The type a content source declares for a file.
///
/// This is the backend's opinion (mostly extension based) and only one of the
/// inputs to classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclaredType {
    /// JSON document.
    Json,
    /// Plain or log text.
    #[default]
    Text,
    /// XML document.
    Xml,
    /// YAML document.
    Yaml,
    /// HTML document.
    Html,
}

impl DeclaredType {
    /// Returns the lowercase wire name of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclaredType::Json => "json",
            DeclaredType::Text => "text",
            DeclaredType::Xml => "xml",
            DeclaredType::Yaml => "yaml",
            DeclaredType::Html => "html",
        }
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contiguous range of lines requested from a content source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    /// Zero-based index of the first line.
    pub offset: usize,
    /// Maximum number of lines.
    pub limit: usize,
}

/// Raw file content as delivered by a content source.
///
/// # Examples
///
/// ```
/// use logview::core_types::{DeclaredType, FilePayload};
///
/// let payload = FilePayload::whole("logs/app.log", "INFO started", DeclaredType::Text);
/// assert!(!payload.is_windowed());
/// assert_eq!(payload.offset, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePayload {
    /// Path of the file relative to the bundle root.
    pub path: String,
    /// The content of the whole file, or of the requested window.
    pub content: String,
    /// The type declared by the source.
    #[serde(rename = "type")]
    pub declared_type: DeclaredType,
    /// Total number of lines in the file. Present only for windowed responses.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub total_lines: Option<usize>,
    /// Zero-based line index of the first line in `content`.
    #[serde(default)]
    pub offset: usize,
    /// Size of the file on disk in bytes.
    #[serde(default)]
    pub size: u64,
}

impl FilePayload {
    /// Creates a payload holding a complete file.
    pub fn whole(path: impl Into<String>, content: impl Into<String>, declared_type: DeclaredType) -> Self {
        let content = content.into();
        Self {
            path: path.into(),
            size: content.len() as u64,
            content,
            declared_type,
            total_lines: None,
            offset: 0,
        }
    }

    /// Creates a payload holding one window of a larger file.
    pub fn window(
        path: impl Into<String>,
        content: impl Into<String>,
        declared_type: DeclaredType,
        offset: usize,
        total_lines: usize,
    ) -> Self {
        let content = content.into();
        Self {
            path: path.into(),
            size: content.len() as u64,
            content,
            declared_type,
            total_lines: Some(total_lines),
            offset,
        }
    }

    /// Returns `true` if this payload is a window of a paginated file.
    pub fn is_windowed(&self) -> bool {
        self.total_lines.is_some()
    }

    /// Returns the last path component, used by the classifier.
    pub fn file_name(&self) -> &str {
        self.path.rsplit(['/', '\\']).next().unwrap_or(&self.path)
    }
}

/// How the content of a file is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentClass {
    /// Pretty-printed, token-highlighted JSON.
    Json,
    /// Line-oriented log with level detection and highlighting.
    Log,
    /// Escaped, unformatted text.
    Plain,
}

impl fmt::Display for ContentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ContentClass::Json => "json",
            ContentClass::Log => "log",
            ContentClass::Plain => "plain",
        })
    }
}

/// Severity of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelTag {
    /// `ERROR`, `FATAL` or `SEVERE`.
    Error,
    /// `WARN` or `WARNING`.
    Warn,
    /// `INFO`.
    Info,
    /// `DEBUG` or `TRACE`.
    Debug,
    /// No level keyword found.
    #[default]
    None,
}

impl LevelTag {
    /// CSS class used by the web viewer, empty for untagged lines.
    pub fn css_class(&self) -> &'static str {
        match self {
            LevelTag::Error => "log-error",
            LevelTag::Warn => "log-warn",
            LevelTag::Info => "log-info",
            LevelTag::Debug => "log-debug",
            LevelTag::None => "",
        }
    }
}

/// Semantic category of a highlighted span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanTag {
    Timestamp,
    LevelKeyword,
    Exception,
    Ip,
    Url,
    JsonKey,
    JsonString,
    JsonNumber,
    JsonBoolean,
    JsonNull,
}

impl SpanTag {
    /// CSS class used by the web viewer.
    pub fn css_class(&self) -> &'static str {
        match self {
            SpanTag::Timestamp => "log-timestamp",
            SpanTag::LevelKeyword => "log-level-keyword",
            SpanTag::Exception => "log-exception",
            SpanTag::Ip => "log-ip",
            SpanTag::Url => "log-url",
            SpanTag::JsonKey => "json-key",
            SpanTag::JsonString => "json-string",
            SpanTag::JsonNumber => "json-number",
            SpanTag::JsonBoolean => "json-boolean",
            SpanTag::JsonNull => "json-null",
        }
    }
}

/// A run of text carrying zero or more semantic tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    pub tags: Vec<SpanTag>,
}

impl Span {
    /// An untagged run of text.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tags: Vec::new(),
        }
    }

    /// A run of text with a single tag.
    pub fn tagged(text: impl Into<String>, tag: SpanTag) -> Self {
        Self {
            text: text.into(),
            tags: vec![tag],
        }
    }

    /// Returns `true` if the span carries `tag`.
    pub fn has_tag(&self, tag: SpanTag) -> bool {
        self.tags.contains(&tag)
    }
}

/// One rendered line of a window.
///
/// `number` is the global line number, `offset + index + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRecord {
    pub number: usize,
    pub raw_text: String,
    pub spans: Vec<Span>,
    pub level: LevelTag,
}

impl LineRecord {
    /// Returns the spans carrying `tag`.
    pub fn spans_with(&self, tag: SpanTag) -> impl Iterator<Item = &Span> {
        self.spans.iter().filter(move |s| s.has_tag(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_file_name() {
        let payload = FilePayload::whole("a/b/server.log", "", DeclaredType::Text);
        assert_eq!(payload.file_name(), "server.log");
        let bare = FilePayload::whole("nettype.json", "{}", DeclaredType::Json);
        assert_eq!(bare.file_name(), "nettype.json");
    }

    #[test]
    fn test_payload_serializes_like_the_backend() {
        let payload = FilePayload::window("big.log", "x", DeclaredType::Text, 1000, 2500);
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["type"], "text");
        assert_eq!(value["total_lines"], 2500);
        assert_eq!(value["offset"], 1000);

        let whole = FilePayload::whole("small.log", "x", DeclaredType::Text);
        let value = serde_json::to_value(&whole).unwrap();
        assert!(value.get("total_lines").is_none());
    }
}

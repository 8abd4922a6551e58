// src/format/render.rs

use crate::core_types::{ContentClass, LineRecord, Span};

/// Escapes the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders spans as escaped HTML, wrapping tagged spans in `<span class="...">`.
pub fn spans_to_html(spans: &[Span]) -> String {
    let mut out = String::new();
    for span in spans {
        if span.tags.is_empty() {
            out.push_str(&escape_html(&span.text));
        } else {
            let classes: Vec<&str> = span.tags.iter().map(|t| t.css_class()).collect();
            out.push_str("<span class=\"");
            out.push_str(&classes.join(" "));
            out.push_str("\">");
            out.push_str(&escape_html(&span.text));
            out.push_str("</span>");
        }
    }
    out
}

impl LineRecord {
    /// The line's highlighted content as escaped HTML.
    pub fn markup(&self) -> String {
        spans_to_html(&self.spans)
    }

    /// The complete HTML row for this line, including its number gutter.
    pub fn to_html(&self, class: ContentClass) -> String {
        let row_class = match class {
            ContentClass::Log => {
                let level = self.level.css_class();
                if level.is_empty() {
                    "log-line".to_string()
                } else {
                    format!("log-line {}", level)
                }
            }
            ContentClass::Json | ContentClass::Plain => "numbered-line".to_string(),
        };
        format!(
            "<div class=\"{}\" data-line=\"{}\"><span class=\"line-number\">{}</span><span class=\"line-content\">{}</span></div>",
            row_class,
            self.number,
            self.number,
            self.markup()
        )
    }
}

/// Renders a window of lines as one HTML fragment.
pub fn lines_to_html(lines: &[LineRecord], class: ContentClass) -> String {
    let container = match class {
        ContentClass::Log => "log-viewer",
        ContentClass::Json => "json-content",
        ContentClass::Plain => "line-numbered-content",
    };
    let mut parts = Vec::with_capacity(lines.len() + 2);
    parts.push(format!("<div class=\"{}\">", container));
    parts.extend(lines.iter().map(|line| line.to_html(class)));
    parts.push("</div>".to_string());
    parts.join("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{LevelTag, SpanTag};

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_tagged_span_content_is_escaped() {
        let spans = vec![
            Span::plain("a<b "),
            Span::tagged("http://x/?a=<b>", SpanTag::Url),
        ];
        assert_eq!(
            spans_to_html(&spans),
            "a&lt;b <span class=\"log-url\">http://x/?a=&lt;b&gt;</span>"
        );
    }

    #[test]
    fn test_log_row() {
        let line = LineRecord {
            number: 7,
            raw_text: "ERROR x".to_string(),
            spans: vec![Span::tagged("ERROR", SpanTag::LevelKeyword), Span::plain(" x")],
            level: LevelTag::Error,
        };
        assert_eq!(
            line.to_html(ContentClass::Log),
            "<div class=\"log-line log-error\" data-line=\"7\"><span class=\"line-number\">7</span><span class=\"line-content\"><span class=\"log-level-keyword\">ERROR</span> x</span></div>"
        );
    }

    #[test]
    fn test_window_container() {
        let html = lines_to_html(&[], ContentClass::Plain);
        assert_eq!(html, "<div class=\"line-numbered-content\"></div>");
    }
}

//! The placeholder WordPress export produced at the end of an import.
//!
//! The document is not a WXR file: it carries only the XML declaration and a
//! comment naming the imported site.

pub const DEFAULT_FILE_NAME: &str = "wordpress-import.xml";
pub const MIME_TYPE: &str = "text/xml";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    contents: String,
}

impl ExportDocument {
    /// Embeds `url` verbatim. A URL containing `--` yields a malformed comment.
    pub fn placeholder(url: &str) -> Self {
        Self {
            contents: format!("{}\n<!-- WordPress Export for {} -->", XML_DECLARATION, url),
        }
    }

    /// Like [`ExportDocument::placeholder`], but keeps the comment well-formed.
    pub fn placeholder_escaped(url: &str) -> Self {
        Self::placeholder(&escape_comment_text(url))
    }

    pub fn for_url(url: &str, escape: bool) -> Self {
        if escape {
            Self::placeholder_escaped(url)
        } else {
            Self::placeholder(url)
        }
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.contents.as_bytes()
    }
}

/// Breaks up `--` runs by percent-encoding every dash that follows another.
fn escape_comment_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    let mut previous_dash = false;
    for c in text.chars() {
        if c == '-' && previous_dash {
            escaped.push_str("%2D");
            previous_dash = false;
        } else {
            escaped.push(c);
            previous_dash = c == '-';
        }
    }
    escaped
}

//! What the handlers write into a result region.
//!
//! Every handler run ends in exactly one [`Rendered`] value, which replaces
//! the previous content of its region. Markup follows the stylesheet served
//! with the pages: `good` and `bad` classes for messages, the lower-cased
//! status label as the class of the status element.

use std::fmt;

use watercan_usage::usage::UsageStatus;

/// Styling of a plain message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Good,
    Bad,
}

impl Tone {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Bad => "bad",
        }
    }
}

/// Content of a result region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// A one-line message.
    Message { tone: Tone, text: String },

    /// A found usage record.
    Usage { count: u64, status: UsageStatus },
}

impl Rendered {
    pub fn good(text: impl Into<String>) -> Self {
        Self::Message {
            tone: Tone::Good,
            text: text.into(),
        }
    }

    pub fn bad(text: impl Into<String>) -> Self {
        Self::Message {
            tone: Tone::Bad,
            text: text.into(),
        }
    }

    /// `true` if this shows a message styled as a failure.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Message { tone: Tone::Bad, .. })
    }

    /// HTML fragment for the region. Text coming from the backend or the user
    /// is escaped.
    pub fn to_html(&self) -> String {
        match self {
            Self::Message { tone, text } => {
                format!(r#"<span class="{}">{}</span>"#, tone.css_class(), escape_html(text))
            }
            Self::Usage { count, status } => format!(
                r#"Usage Count: <b>{}</b><br>Status: <span class="{}">{}</span>"#,
                count,
                escape_html(&status.css_class()),
                escape_html(status.as_str())
            ),
        }
    }
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message { text, .. } => f.write_str(text),
            Self::Usage { count, status } => write!(f, "Usage Count: {count}\nStatus: {status}"),
        }
    }
}

/// Escape the five characters that matter in element content and quoted attributes.
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

//! Line ending handling for [`crate::TextBuffer`].
//!
//! The buffer only ever holds `'\n'` line breaks. Text loaded with `"\r\n"` is normalized and
//! the original style is remembered so [`crate::TextBuffer::to_text_with_line_ending`] can
//! restore it.

/// Line break style of loaded text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// `'\n'`.
    #[default]
    Lf,
    /// `"\r\n"`.
    Crlf,
}

impl LineEnding {
    /// `Crlf` as soon as the text contains a single `"\r\n"`.
    pub fn detect(text: &str) -> Self {
        if text.contains("\r\n") {
            Self::Crlf
        } else {
            Self::Lf
        }
    }

    /// Strip `'\r'` from every `"\r\n"` pair.
    pub fn normalize(text: &str) -> String {
        text.replace("\r\n", "\n")
    }

    /// Re-expand `'\n'` into this style.
    pub fn restore(self, text: &str) -> String {
        match self {
            Self::Lf => text.to_string(),
            Self::Crlf => text.replace('\n', "\r\n"),
        }
    }
}

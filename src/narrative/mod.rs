//! Narrative conversion of heading-led markdown lists.
//!
//! A heading-led list is a bold `**title**：` line followed by a run of
//! keyed bullets (`- **title**：body`), plain bullets (`- body`) or
//! numbered items (`1. body`). Each recognized list is rewritten into
//! connected Japanese prose, keeping its heading. Everything else in the
//! document is returned byte for byte.
//!
//! # Examples
//!
//! ```
//! use narrate::narrative::convert;
//!
//! let out = convert("**手順**：\n1. 準備する\n2. 実行する\n3. 確認する\n");
//! assert_eq!(out, "**手順**：\n\nまず、準備する。次に、実行する。最後に、確認する。\n");
//! ```

pub mod line;
pub mod render;
pub mod scanner;
pub mod types;

use tracing::trace;

pub use render::render_list;
pub use scanner::{Segment, scan};
pub use types::{FormSet, HeadingLedList, KeyedItem, ListForm, ListItems};

/// Convert every heading-led list in `text`, all forms enabled.
#[must_use]
pub fn convert(text: &str) -> String {
    Converter::default().convert(text).output
}

/// Result of converting one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub output: String,
    /// Number of lists rewritten.
    pub rewritten: usize,
}

/// Converter restricted to a set of list forms.
#[derive(Debug, Clone, Copy, Default)]
pub struct Converter {
    forms: FormSet,
}

impl Converter {
    #[must_use]
    pub const fn new(forms: FormSet) -> Self {
        Self { forms }
    }

    #[must_use]
    pub fn convert(&self, text: &str) -> Conversion {
        let mut output = String::with_capacity(text.len());
        let mut rewritten = 0;

        for segment in scan(text, self.forms) {
            match segment {
                Segment::Text(chunk) => output.push_str(chunk),
                Segment::List { list, source } => match render_list(&list) {
                    Some(prose) => {
                        trace!(
                            title = %list.title,
                            form = %list.items.form(),
                            items = list.items.len(),
                            "rewrote list"
                        );
                        output.push_str(&prose);
                        rewritten += 1;
                    }
                    None => output.push_str(source),
                },
            }
        }

        Conversion { output, rewritten }
    }
}

//! Data model for heading-led lists.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::NarrateError;

/// The shape shared by every item of one heading-led list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ListForm {
    /// `- **title**：body`
    Keyed,
    /// `- body`
    Plain,
    /// `N. body`
    Numbered,
}

impl ListForm {
    pub const ALL: [Self; 3] = [Self::Keyed, Self::Plain, Self::Numbered];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keyed => "keyed",
            Self::Plain => "plain",
            Self::Numbered => "numbered",
        }
    }
}

impl fmt::Display for ListForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListForm {
    type Err = NarrateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keyed" => Ok(Self::Keyed),
            "plain" => Ok(Self::Plain),
            "numbered" => Ok(Self::Numbered),
            other => Err(NarrateError::Config(format!("unknown list form: {other}"))),
        }
    }
}

/// Which list forms the scanner is allowed to rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormSet {
    keyed: bool,
    plain: bool,
    numbered: bool,
}

impl FormSet {
    #[must_use]
    pub const fn all() -> Self {
        Self {
            keyed: true,
            plain: true,
            numbered: true,
        }
    }

    #[must_use]
    pub const fn none() -> Self {
        Self {
            keyed: false,
            plain: false,
            numbered: false,
        }
    }

    #[must_use]
    pub fn only(forms: &[ListForm]) -> Self {
        forms.iter().fold(Self::none(), |set, form| set.with(*form))
    }

    #[must_use]
    pub const fn with(mut self, form: ListForm) -> Self {
        match form {
            ListForm::Keyed => self.keyed = true,
            ListForm::Plain => self.plain = true,
            ListForm::Numbered => self.numbered = true,
        }
        self
    }

    #[must_use]
    pub const fn contains(&self, form: ListForm) -> bool {
        match form {
            ListForm::Keyed => self.keyed,
            ListForm::Plain => self.plain,
            ListForm::Numbered => self.numbered,
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !(self.keyed || self.plain || self.numbered)
    }
}

impl Default for FormSet {
    fn default() -> Self {
        Self::all()
    }
}

/// A bullet carrying its own bold sub-title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedItem {
    pub title: String,
    pub body: String,
}

/// The items of one list. Homogeneous by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListItems {
    Keyed(Vec<KeyedItem>),
    Plain(Vec<String>),
    Numbered(Vec<String>),
}

impl ListItems {
    #[must_use]
    pub const fn form(&self) -> ListForm {
        match self {
            Self::Keyed(_) => ListForm::Keyed,
            Self::Plain(_) => ListForm::Plain,
            Self::Numbered(_) => ListForm::Numbered,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Keyed(items) => items.len(),
            Self::Plain(items) | Self::Numbered(items) => items.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A bold `**title**：` heading followed by a run of items.
///
/// `prefix` holds whatever preceded the bold title on the heading line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingLedList {
    pub prefix: String,
    pub title: String,
    pub items: ListItems,
}

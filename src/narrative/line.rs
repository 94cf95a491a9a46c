//! Line classification for the narrative scanner.
//!
//! Every pattern works on a single line with its newline already removed.
//! A line that does not end in a newline can still be classified, but the
//! scanner never treats it as part of a list.

use std::sync::LazyLock;

use regex::Regex;

/// `<prefix>**<title>**：` followed only by whitespace.
static HEADING_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<prefix>.*?)\*\*(?P<title>[^*]+)\*\*：\s*$").unwrap()
});

/// `- **<title>**：<body>`
static KEYED_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^- \*\*(?P<title>[^*]+)\*\*：(?P<body>.+)$").unwrap()
});

/// `- <body>`
static PLAIN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^- (?P<body>.+)$").unwrap());

/// `<digits>. <body>`
static NUMBERED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\. (?P<body>.+)$").unwrap());

/// One physical line of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// Byte offset of the line within the document.
    pub start: usize,
    /// The line including its trailing newline, if any.
    pub raw: &'a str,
}

impl<'a> Line<'a> {
    #[must_use]
    pub const fn end(&self) -> usize {
        self.start + self.raw.len()
    }

    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.raw.ends_with('\n')
    }

    /// The line without its newline.
    #[must_use]
    pub fn content(&self) -> &'a str {
        self.raw.strip_suffix('\n').unwrap_or(self.raw)
    }

    /// Whitespace-only and newline-terminated.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.is_terminated() && self.content().trim().is_empty()
    }
}

/// Split a document into lines, keeping byte offsets.
pub fn lines(text: &str) -> impl Iterator<Item = Line<'_>> {
    text.split_inclusive('\n').scan(0, |offset, raw| {
        let line = Line {
            start: *offset,
            raw,
        };
        *offset += raw.len();
        Some(line)
    })
}

/// A parsed `**title**：` heading line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading<'a> {
    pub prefix: &'a str,
    pub title: &'a str,
}

#[must_use]
pub fn parse_heading(content: &str) -> Option<Heading<'_>> {
    let caps = HEADING_REGEX.captures(content)?;
    Some(Heading {
        prefix: caps.name("prefix").map_or("", |m| m.as_str()),
        title: caps.name("title")?.as_str(),
    })
}

#[must_use]
pub fn parse_keyed(content: &str) -> Option<(&str, &str)> {
    let caps = KEYED_REGEX.captures(content)?;
    Some((caps.name("title")?.as_str(), caps.name("body")?.as_str()))
}

#[must_use]
pub fn parse_plain(content: &str) -> Option<&str> {
    PLAIN_REGEX
        .captures(content)
        .and_then(|caps| caps.name("body"))
        .map(|m| m.as_str())
}

#[must_use]
pub fn parse_numbered(content: &str) -> Option<&str> {
    NUMBERED_REGEX
        .captures(content)
        .and_then(|caps| caps.name("body"))
        .map(|m| m.as_str())
}

//! Line scanner that finds heading-led lists.
//!
//! The scanner walks the document once. Lines are classified and drive a
//! small state machine:
//!
//! ```text
//! AwaitingHeading --heading--> HeadingSeen --item--> Collecting(form)
//!        ^                         |   ^                  |
//!        |                         |   +--blank--+        |
//!        +------- other line ------+                      |
//!        +------------ run ends (line re-examined) -------+
//! ```
//!
//! A run is homogeneous: it ends at the first line that does not match the
//! form of its first item. Lines that are not part of a recognized list are
//! returned verbatim as text segments.

use super::line::{self, Heading, Line};
use super::types::{FormSet, HeadingLedList, KeyedItem, ListForm, ListItems};

/// A piece of the scanned document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text passed through unchanged.
    Text(&'a str),
    /// A recognized list, with the exact source it spans.
    List {
        list: HeadingLedList,
        source: &'a str,
    },
}

enum State<'a> {
    AwaitingHeading,
    HeadingSeen {
        heading: Heading<'a>,
        start: usize,
    },
    Collecting {
        heading: Heading<'a>,
        start: usize,
        end: usize,
        items: ListItems,
    },
}

struct Scanner<'a> {
    text: &'a str,
    forms: FormSet,
    state: State<'a>,
    /// Byte offset up to which segments have been emitted.
    emitted: usize,
    segments: Vec<Segment<'a>>,
}

/// Scan `text` for heading-led lists whose form is in `forms`.
#[must_use]
pub fn scan(text: &str, forms: FormSet) -> Vec<Segment<'_>> {
    let mut scanner = Scanner {
        text,
        forms,
        state: State::AwaitingHeading,
        emitted: 0,
        segments: Vec::new(),
    };
    for line in line::lines(text) {
        scanner.feed(line);
    }
    scanner.finish()
}

impl<'a> Scanner<'a> {
    fn feed(&mut self, line: Line<'a>) {
        match std::mem::replace(&mut self.state, State::AwaitingHeading) {
            State::AwaitingHeading => self.await_heading(line),
            State::HeadingSeen { heading, start } => {
                if line.is_blank() {
                    self.state = State::HeadingSeen { heading, start };
                } else if let Some(items) = self.open_run(line) {
                    self.state = State::Collecting {
                        heading,
                        start,
                        end: line.end(),
                        items,
                    };
                } else {
                    // Heading without a list: leave it, and look at this line afresh.
                    self.await_heading(line);
                }
            }
            State::Collecting {
                heading,
                start,
                end,
                mut items,
            } => {
                if extend_run(&mut items, line) {
                    self.state = State::Collecting {
                        heading,
                        start,
                        end: line.end(),
                        items,
                    };
                } else {
                    self.complete(&heading, start, end, items);
                    self.await_heading(line);
                }
            }
        }
    }

    fn await_heading(&mut self, line: Line<'a>) {
        if !line.is_terminated() {
            return;
        }
        if let Some(heading) = line::parse_heading(line.content()) {
            self.state = State::HeadingSeen {
                heading,
                start: line.start,
            };
        }
    }

    /// Classify the first item after a heading. Keyed wins over plain, since
    /// every keyed bullet is also a plain one.
    fn open_run(&self, line: Line<'a>) -> Option<ListItems> {
        if !line.is_terminated() {
            return None;
        }
        let content = line.content();
        if self.forms.contains(ListForm::Keyed) {
            if let Some((title, body)) = line::parse_keyed(content) {
                return Some(ListItems::Keyed(vec![keyed_item(title, body)]));
            }
        }
        if self.forms.contains(ListForm::Plain) {
            if let Some(body) = line::parse_plain(content) {
                return Some(ListItems::Plain(vec![body.to_string()]));
            }
        }
        if self.forms.contains(ListForm::Numbered) {
            if let Some(body) = line::parse_numbered(content) {
                return Some(ListItems::Numbered(vec![body.to_string()]));
            }
        }
        None
    }

    fn complete(&mut self, heading: &Heading<'a>, start: usize, end: usize, items: ListItems) {
        let text = self.text;
        if start > self.emitted {
            self.segments.push(Segment::Text(&text[self.emitted..start]));
        }
        self.segments.push(Segment::List {
            list: HeadingLedList {
                prefix: heading.prefix.to_string(),
                title: heading.title.to_string(),
                items,
            },
            source: &text[start..end],
        });
        self.emitted = end;
    }

    fn finish(mut self) -> Vec<Segment<'a>> {
        if let State::Collecting {
            heading,
            start,
            end,
            items,
        } = std::mem::replace(&mut self.state, State::AwaitingHeading)
        {
            self.complete(&heading, start, end, items);
        }
        let text = self.text;
        if self.emitted < text.len() {
            self.segments.push(Segment::Text(&text[self.emitted..]));
        }
        self.segments
    }
}

/// Append `line` to the run if it has the run's form.
fn extend_run(items: &mut ListItems, line: Line<'_>) -> bool {
    if !line.is_terminated() {
        return false;
    }
    let content = line.content();
    match items {
        ListItems::Keyed(items) => line::parse_keyed(content)
            .map(|(title, body)| items.push(keyed_item(title, body)))
            .is_some(),
        ListItems::Plain(items) => line::parse_plain(content)
            .map(|body| items.push(body.to_string()))
            .is_some(),
        ListItems::Numbered(items) => line::parse_numbered(content)
            .map(|body| items.push(body.to_string()))
            .is_some(),
    }
}

fn keyed_item(title: &str, body: &str) -> KeyedItem {
    KeyedItem {
        title: title.to_string(),
        body: body.to_string(),
    }
}

//! Prose rendering for each list form.

use super::types::{HeadingLedList, KeyedItem, ListItems};

const FEATURE_CLOSE: &str = "という特徴があります。";
const FEATURE_CLOSE_LAST: &str = "という特徴もあります。";
const ALSO: &str = "また、";
const PLAIN_JOINER: &str = "。また、";
const PERIOD: &str = "。";
const FIRST: &str = "まず、";
const NEXT: &str = "次に、";
const LAST: &str = "最後に、";

/// Render a whole list: the heading kept as-is, a blank line, then the prose.
///
/// Returns `None` for a list without items so the caller keeps the source.
#[must_use]
pub fn render_list(list: &HeadingLedList) -> Option<String> {
    if list.items.is_empty() {
        return None;
    }
    let prose = render_items(&list.items);
    Some(format!("{}**{}**：\n\n{prose}\n", list.prefix, list.title))
}

#[must_use]
pub fn render_items(items: &ListItems) -> String {
    match items {
        ListItems::Keyed(items) => render_keyed(items),
        ListItems::Plain(items) => render_plain(items),
        ListItems::Numbered(items) => render_numbered(items),
    }
}

/// `Aは速いという特徴があります。また、Bは安いという特徴もあります。`
///
/// Only the final item of a multi-item list closes with `もあります`.
#[must_use]
pub fn render_keyed(items: &[KeyedItem]) -> String {
    let last = items.len().saturating_sub(1);
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(ALSO);
        }
        out.push_str(&item.title);
        out.push('は');
        out.push_str(&item.body);
        out.push_str(if i > 0 && i == last {
            FEATURE_CLOSE_LAST
        } else {
            FEATURE_CLOSE
        });
    }
    out
}

/// Items joined by `。また、` with a single closing `。`.
#[must_use]
pub fn render_plain(items: &[String]) -> String {
    if items.is_empty() {
        return String::new();
    }
    let mut out = items.join(PLAIN_JOINER);
    out.push_str(PERIOD);
    out
}

/// `まず、…。次に、…。最後に、…。`, or a bare clause for a single item.
#[must_use]
pub fn render_numbered(items: &[String]) -> String {
    if let [only] = items {
        return format!("{only}{PERIOD}");
    }
    let last = items.len().saturating_sub(1);
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        let lead = match i {
            0 => FIRST,
            i if i == last => LAST,
            _ => NEXT,
        };
        out.push_str(lead);
        out.push_str(item);
        out.push_str(PERIOD);
    }
    out
}

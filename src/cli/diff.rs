use itertools::{EitherOrBoth, Itertools};

/// Line-by-line diff: changed lines as `-old` / `+new` pairs, equal lines dropped.
#[must_use]
pub fn simple_diff(old: &str, new: &str) -> String {
    let mut out = String::new();
    for pair in old.lines().zip_longest(new.lines()) {
        match pair {
            EitherOrBoth::Both(left, right) if left == right => {}
            EitherOrBoth::Both(left, right) => {
                push_line(&mut out, '-', left);
                push_line(&mut out, '+', right);
            }
            EitherOrBoth::Left(left) => push_line(&mut out, '-', left),
            EitherOrBoth::Right(right) => push_line(&mut out, '+', right),
        }
    }
    out
}

fn push_line(out: &mut String, marker: char, line: &str) {
    out.push(marker);
    out.push_str(line);
    out.push('\n');
}

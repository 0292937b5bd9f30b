//! Small display helpers for job descriptions and generated reports.

use std::fmt::Write;

/// Column after which [`wrap`] looks for a break.
pub const WRAP_COLUMN: usize = 50;

/// Break `text` at the first space at or after every [`WRAP_COLUMN`] characters.
///
/// The space at a break is replaced by a newline. A run longer than the column
/// with no later space is left unbroken.
#[must_use]
pub fn wrap(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut result = String::with_capacity(text.len() + text.len() / WRAP_COLUMN);
    let mut start = 0;

    while chars.len() > start + WRAP_COLUMN {
        let Some(offset) = chars[start + WRAP_COLUMN..].iter().position(|&c| c == ' ') else {
            break;
        };
        let end = start + WRAP_COLUMN + offset;
        result.extend(&chars[start..end]);
        result.push('\n');
        start = end + 1;
    }

    result.extend(&chars[start..]);
    result
}

/// Escape text for inclusion in XML attribute or element content.
///
/// Characters outside ASCII become numeric references by scalar value.
#[must_use]
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '"' => out.push_str("&quot;"),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c if c.is_ascii() => out.push(c),
            c => {
                let _ = write!(out, "&#{};", u32::from(c));
            }
        }
    }
    out
}

/// `source` without `suffix`, or `None` if it does not end with it.
#[must_use]
pub fn strip_suffix_of<'a>(source: &'a str, suffix: &str) -> Option<&'a str> {
    source.strip_suffix(suffix)
}

/// Join `args` with `delimiter` between consecutive elements.
#[must_use]
pub fn join<S: AsRef<str>>(args: &[S], delimiter: &str) -> String {
    let mut out = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push_str(delimiter);
        }
        out.push_str(arg.as_ref());
    }
    out
}

/// Join with single spaces.
#[must_use]
pub fn join_spaced<S: AsRef<str>>(args: &[S]) -> String {
    join(args, " ")
}

/// Upper-case the first character.
///
/// The mapping is one character to one character: a character whose upper
/// case spans several characters (`ß`) is left as is.
#[must_use]
pub fn caps(input: &str) -> String {
    let mut chars = input.chars();
    chars.next().map_or_else(String::new, |first| {
        let mut upper = first.to_uppercase();
        let mapped = match (upper.next(), upper.next()) {
            (Some(single), None) => single,
            _ => first,
        };
        std::iter::once(mapped).chain(chars).collect()
    })
}

/// Naive English plural: appends `s`.
#[must_use]
pub fn plural(input: &str) -> String {
    format!("{input}s")
}

/// Whether `s` parses as a 32-bit signed integer.
#[must_use]
pub fn is_integer(s: &str) -> bool {
    s.parse::<i32>().is_ok()
}

/// Elements of `master` from `index` on; empty when `index` is out of range.
#[must_use]
pub fn subarray<T>(master: &[T], index: usize) -> &[T] {
    master.get(index..).unwrap_or(&[])
}

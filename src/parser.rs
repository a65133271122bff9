use crate::error::{ParseError, ParseErrorKind};
use crate::model::Entry;

/// Parse dotenv entries from text, splitting it into lines first.
pub fn parse_str(input: &str, trim_values: bool) -> Result<Vec<Entry>, ParseError> {
    parse_lines(&split_lines(input), trim_values)
}

/// Parse dotenv entries from already split lines.
///
/// Entries come back in file order; duplicate keys are kept. A quoted value
/// may consume following lines until its closing quote.
pub fn parse_lines<S: AsRef<str>>(
    lines: &[S],
    trim_values: bool,
) -> Result<Vec<Entry>, ParseError> {
    let mut entries = Vec::new();
    let mut idx = 0usize;

    while idx < lines.len() {
        let line = lines[idx].as_ref();
        let line_num = line_number(idx);

        let Some((key, remainder)) = split_assignment(line) else {
            idx += 1;
            continue;
        };

        let after_ws = remainder.trim_start();
        let mut value = match after_ws.chars().next() {
            Some(quote @ ('\'' | '"')) => {
                let (raw, consumed) =
                    scan_quoted(&after_ws[1..], quote, &lines[idx + 1..]).ok_or_else(|| {
                        ParseError::new(key, line_num, ParseErrorKind::MissingClosingQuote)
                    })?;
                idx += consumed;
                unescape(&raw, quote)
            }
            _ => remainder.to_owned(),
        };

        if trim_values {
            value = value.trim().to_owned();
        }

        tracing::trace!(key, line = line_num, "parsed entry");
        entries.push(Entry::new(key, value, line_num));
        idx += 1;
    }

    Ok(entries)
}

/// Split a line into its trimmed key and the raw text after the first `=`.
///
/// Returns `None` for blank lines, comments and lines without a key.
/// One-based line number for a zero-based index, saturating at `u32::MAX`.
fn line_number(idx: usize) -> u32 {
    u32::try_from(idx).map_or(u32::MAX, |idx| idx.saturating_add(1))
}

fn split_assignment(line: &str) -> Option<(&str, &str)> {
    if line.trim().is_empty() || line.starts_with('#') {
        return None;
    }

    let eq_idx = line.find('=')?;
    if eq_idx == 0 {
        return None;
    }

    let key = line[..eq_idx].trim();
    if key.is_empty() {
        return None;
    }

    Some((key, &line[eq_idx + 1..]))
}

/// Scan for the closing `quote`, starting with `first` (the text after the
/// opening quote) and continuing into `rest`.
///
/// Returns the raw content before the closing quote and how many lines of
/// `rest` were consumed, or `None` when the input ends first.
fn scan_quoted<S: AsRef<str>>(first: &str, quote: char, rest: &[S]) -> Option<(String, usize)> {
    let mut buf = first.to_owned();
    let mut scan_from = 0usize;
    let mut consumed = 0usize;

    loop {
        if let Some(end) = find_unescaped(&buf, quote, scan_from) {
            buf.truncate(end);
            return Some((buf, consumed));
        }

        let next = rest.get(consumed)?;
        buf.push('\n');
        scan_from = buf.len();
        buf.push_str(next.as_ref());
        consumed += 1;
    }
}

fn find_unescaped(buf: &str, quote: char, from: usize) -> Option<usize> {
    buf[from..]
        .char_indices()
        .map(|(offset, ch)| (from + offset, ch))
        .find(|&(idx, ch)| ch == quote && !is_escaped(buf.as_bytes(), idx))
        .map(|(idx, _)| idx)
}

/// Whether the byte at `idx` is preceded by an odd run of backslashes.
pub fn is_escaped(bytes: &[u8], idx: usize) -> bool {
    let backslash_count = bytes[..idx.min(bytes.len())]
        .iter()
        .rev()
        .take_while(|byte| **byte == b'\\')
        .count();

    backslash_count % 2 == 1
}

/// Undo quote and backslash escapes inside a quoted value.
///
/// The delimiter escape goes first so `\\"` style runs collapse correctly.
fn unescape(raw: &str, quote: char) -> String {
    if !raw.contains('\\') {
        return raw.to_owned();
    }

    let escaped_quote = format!("\\{quote}");
    raw.replace(&escaped_quote, &quote.to_string())
        .replace("\\\\", "\\")
}

/// Split text into lines on `\n`, `\r\n` or a lone `\r`.
///
/// A trailing line terminator does not yield an extra empty line.
pub(crate) fn split_lines(input: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let bytes = input.as_bytes();
    let mut start = 0usize;
    let mut idx = 0usize;

    while idx < bytes.len() {
        match bytes[idx] {
            b'\n' => {
                lines.push(&input[start..idx]);
                idx += 1;
                start = idx;
            }
            b'\r' => {
                lines.push(&input[start..idx]);
                idx += 1;
                if bytes.get(idx) == Some(&b'\n') {
                    idx += 1;
                }
                start = idx;
            }
            _ => idx += 1,
        }
    }

    if start < bytes.len() {
        lines.push(&input[start..]);
    }

    lines
}

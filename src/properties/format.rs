//! Reader and writer for the flat `key=value` properties text format.
//!
//! Escaping follows the conventional properties-file rules so files stay
//! readable by other tooling: separators and comment markers are
//! backslash-escaped, control characters use `\t`/`\n`/`\r`/`\f`, and
//! anything outside printable ASCII is written as `\uXXXX` UTF-16 units.

use std::collections::BTreeMap;

use thiserror::Error;

const WHITESPACE: [char; 3] = [' ', '\t', '\x0c'];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PropertiesError {
    #[error("malformed \\uXXXX escape on line {line}")]
    MalformedUnicodeEscape { line: usize },
    #[error("invalid UTF-16 surrogate sequence on line {line}")]
    InvalidSurrogate { line: usize },
}

pub fn escape_key(key: &str) -> String {
    escape(key, true)
}

pub fn escape_value(value: &str) -> String {
    escape(value, false)
}

fn escape(s: &str, escape_all_spaces: bool) -> String {
    let mut out = String::with_capacity(s.len());
    for (i, c) in s.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            ' ' if i == 0 || escape_all_spaces => out.push_str("\\ "),
            ' '..='~' => out.push(c),
            _ => {
                let mut buf = [0u16; 2];
                for unit in c.encode_utf16(&mut buf) {
                    out.push_str(&format!("\\u{unit:04X}"));
                }
            }
        }
    }
    out
}

/// Render entries in the given order, preceded by a single comment line.
pub fn write_properties<'a, I>(comment: &str, entries: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut out = format!("#{comment}\n");
    for (key, value) in entries {
        out.push_str(&escape_key(key));
        out.push('=');
        out.push_str(&escape_value(value));
        out.push('\n');
    }
    out
}

/// Parse properties text. Later duplicates of a key replace earlier ones.
pub fn parse_properties(text: &str) -> Result<BTreeMap<String, String>, PropertiesError> {
    let mut props = BTreeMap::new();
    for (line_no, line) in logical_lines(text) {
        let (key, value) = split_key_value(&line);
        props.insert(unescape(key, line_no)?, unescape(value, line_no)?);
    }
    Ok(props)
}

/// Join continuation lines and drop blanks and comments.
/// Each entry carries the line number it started on.
fn logical_lines(text: &str) -> Vec<(usize, String)> {
    let normalized = text.replace("\r\n", "\n");
    let mut lines = Vec::new();
    let mut current: Option<(usize, String)> = None;

    for (idx, raw) in normalized.split(['\n', '\r']).enumerate() {
        let trimmed = raw.trim_start_matches(WHITESPACE);
        if current.is_none() && (trimmed.is_empty() || trimmed.starts_with(['#', '!'])) {
            continue;
        }

        let trailing = trimmed.chars().rev().take_while(|&c| c == '\\').count();
        let continues = trailing % 2 == 1;
        let content = if continues {
            &trimmed[..trimmed.len() - 1]
        } else {
            trimmed
        };

        current
            .get_or_insert_with(|| (idx + 1, String::new()))
            .1
            .push_str(content);

        if !continues {
            if let Some(done) = current.take() {
                lines.push(done);
            }
        }
    }

    if let Some(done) = current {
        lines.push(done);
    }
    lines
}

/// Split at the first unescaped `=`, `:` or whitespace. Both halves stay escaped.
fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    let mut explicit_separator = false;

    for (i, b) in line.bytes().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' => escaped = true,
            b'=' | b':' => {
                key_end = i;
                explicit_separator = true;
                break;
            }
            b' ' | b'\t' | b'\x0c' => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let mut rest = if explicit_separator {
        &line[key_end + 1..]
    } else {
        &line[key_end..]
    };
    rest = rest.trim_start_matches(WHITESPACE);
    if !explicit_separator {
        if let Some(after) = rest.strip_prefix(['=', ':']) {
            rest = after.trim_start_matches(WHITESPACE);
        }
    }
    (key, rest)
}

fn unescape(s: &str, line: usize) -> Result<String, PropertiesError> {
    let mut out = String::with_capacity(s.len());
    let mut units: Vec<u16> = Vec::new();
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c == '\\' && chars.clone().next() == Some('u') {
            chars.next();
            let hex: String = chars.by_ref().take(4).collect();
            if hex.len() != 4 || !hex.chars().all(|h| h.is_ascii_hexdigit()) {
                return Err(PropertiesError::MalformedUnicodeEscape { line });
            }
            let unit = u16::from_str_radix(&hex, 16)
                .map_err(|_| PropertiesError::MalformedUnicodeEscape { line })?;
            units.push(unit);
            continue;
        }

        flush_units(&mut units, &mut out, line)?;
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some(other) => out.push(other),
            None => {}
        }
    }

    flush_units(&mut units, &mut out, line)?;
    Ok(out)
}

fn flush_units(units: &mut Vec<u16>, out: &mut String, line: usize) -> Result<(), PropertiesError> {
    if units.is_empty() {
        return Ok(());
    }
    let decoded =
        String::from_utf16(units).map_err(|_| PropertiesError::InvalidSurrogate { line })?;
    out.push_str(&decoded);
    units.clear();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_separators_and_control_chars() {
        assert_eq!(escape_value("2024-01-10T01:02:03.456Z"), "2024-01-10T01\\:02\\:03.456Z");
        assert_eq!(escape_value("a=b#c!d"), "a\\=b\\#c\\!d");
        assert_eq!(escape_value("line1\nline2\ttab"), "line1\\nline2\\ttab");
        assert_eq!(escape_value("C:\\dir"), "C\\:\\\\dir");
    }

    #[test]
    fn test_spaces_in_keys_and_values() {
        assert_eq!(escape_key("a b"), "a\\ b");
        assert_eq!(escape_value(" a b"), "\\ a b");
    }

    #[test]
    fn test_non_ascii_is_written_as_utf16_escapes() {
        assert_eq!(escape_value("é"), "\\u00E9");
        assert_eq!(escape_value("😀"), "\\uD83D\\uDE00");
    }

    #[test]
    fn test_write_properties_layout() {
        let text = write_properties("header", [("a", "1"), ("b.c", "x:y")]);
        assert_eq!(text, "#header\na=1\nb.c=x\\:y\n");
    }

    #[test]
    fn test_parse_separators_comments_and_blanks() {
        let text = "# comment\n! other comment\n\n  a=1\nb : 2\nc 3\nd\ne=\n";
        let props = parse_properties(text).unwrap();
        assert_eq!(props["a"], "1");
        assert_eq!(props["b"], "2");
        assert_eq!(props["c"], "3");
        assert_eq!(props["d"], "");
        assert_eq!(props["e"], "");
        assert_eq!(props.len(), 5);
    }

    #[test]
    fn test_parse_continuation_lines() {
        let text = "key=first \\\n    second\r\nother=x\\\\\n";
        let props = parse_properties(text).unwrap();
        assert_eq!(props["key"], "first second");
        assert_eq!(props["other"], "x\\");
    }

    #[test]
    fn test_parse_last_duplicate_wins() {
        let props = parse_properties("a=1\na=2\n").unwrap();
        assert_eq!(props["a"], "2");
    }

    #[test]
    fn test_parse_unicode_escapes() {
        let props = parse_properties("k=\\u00E9\\uD83D\\uDE00!\n").unwrap();
        assert_eq!(props["k"], "é😀!");
    }

    #[test]
    fn test_parse_rejects_malformed_unicode() {
        assert_eq!(
            parse_properties("a=1\nk=\\u12G4\n"),
            Err(PropertiesError::MalformedUnicodeEscape { line: 2 })
        );
        assert_eq!(
            parse_properties("k=\\uD83D\n"),
            Err(PropertiesError::InvalidSurrogate { line: 1 })
        );
    }

    #[test]
    fn test_written_text_parses_back() {
        let awkward = "  lead: a=b #c !d \\ end\n\r\tz é";
        let text = write_properties("x", [("key with space", awkward), ("k:=", "v")]);
        let props = parse_properties(&text).unwrap();
        assert_eq!(props["key with space"], awkward);
        assert_eq!(props["k:="], "v");
    }
}

//! Record splitting for spreadsheet exports.
//!
//! Exports come out of different locales, so the field separator is detected
//! from the data rather than configured.

/// Field separators accepted in the raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Semicolon,
}

impl Delimiter {
    pub fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Semicolon => ';',
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Delimiter::Comma => ",",
            Delimiter::Semicolon => ";",
        }
    }
}

/// Pick the delimiter from the first line that has any content.
///
/// A `;` anywhere in that line means semicolon-separated; everything else,
/// including no lines at all, means comma-separated.
pub fn detect_delimiter<'a, I>(lines: I) -> Delimiter
where
    I: IntoIterator<Item = &'a str>,
{
    match lines.into_iter().find(|line| !line.trim().is_empty()) {
        Some(sample) if sample.contains(';') => Delimiter::Semicolon,
        _ => Delimiter::Comma,
    }
}

/// Split one line into trimmed fields.
///
/// Double quotes toggle a quoted segment in which the delimiter is literal;
/// `""` inside a quoted segment is an escaped quote. An unterminated quote
/// runs to the end of the line.
pub fn split_record(line: &str, delimiter: Delimiter) -> Vec<String> {
    let sep = delimiter.as_char();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '"' {
            if in_quotes && chars.peek() == Some(&'"') {
                current.push('"');
                chars.next();
            } else {
                in_quotes = !in_quotes;
            }
            continue;
        }

        if ch == sep && !in_quotes {
            fields.push(current.trim().to_string());
            current.clear();
            continue;
        }

        current.push(ch);
    }

    fields.push(current.trim().to_string());
    fields
}

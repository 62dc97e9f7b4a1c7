use crate::error::{DirectiveError, Result};

const DELIMITER: char = '/';
const ESCAPE: char = '\\';

/// The two fields of a directive: `s/<left>/<right>/` or `y/<left>/<right>/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub left: String,
    pub right: String,
}

/// What an inbound chat line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Ordinary chat; gets recorded.
    Plain,
    /// `s/pattern/replacement/`
    Substitution(Directive),
    /// `y/set1/set2/`
    Translation(Directive),
}

impl Command {
    /// Classify a chat line by its prefix and parse directive fields.
    ///
    /// Returns an error only for lines that start like a directive but are
    /// malformed; anything else is [`Command::Plain`].
    pub fn classify(text: &str) -> Result<Self> {
        if let Some(body) = text.strip_prefix('s').filter(|b| b.starts_with(DELIMITER)) {
            if text.matches(DELIMITER).count() < 2 {
                return Err(DirectiveError::TooFewDelimiters);
            }
            let (left, right) = split_fields(body)?;
            return Ok(Self::Substitution(Directive {
                left,
                right: unescape_literal(&right),
            }));
        }
        if let Some(body) = text.strip_prefix('y').filter(|b| b.starts_with(DELIMITER)) {
            let (left, right) = split_fields(body)?;
            return Ok(Self::Translation(Directive {
                left: unescape_literal(&left),
                right: unescape_literal(&right),
            }));
        }
        Ok(Self::Plain)
    }

    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Substitution(_) => "substitution",
            Self::Translation(_) => "translation",
        }
    }
}

/// Split a directive body such as `/foo/bar/` into its two fields.
///
/// `body` starts at the delimiter following the command letter. `\/` stands
/// for a literal slash; every other backslash sequence is kept as written so
/// regex escapes reach the pattern intact. A missing trailing delimiter is
/// implied, and text past a third delimiter stays part of the second field.
pub fn split_fields(body: &str) -> Result<(String, String)> {
    let mut out = String::with_capacity(body.len() + 1);
    let mut delimiters = Vec::new();
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            ESCAPE => match chars.peek() {
                Some(&DELIMITER) => {
                    chars.next();
                    out.push(DELIMITER);
                },
                Some(&ESCAPE) => {
                    chars.next();
                    out.push(ESCAPE);
                    out.push(ESCAPE);
                },
                _ => out.push(ESCAPE),
            },
            DELIMITER => {
                delimiters.push(out.len());
                out.push(DELIMITER);
            },
            _ => out.push(c),
        }
    }

    let ends_with_delimiter = delimiters
        .last()
        .is_some_and(|&pos| pos + DELIMITER.len_utf8() == out.len());
    if !ends_with_delimiter {
        delimiters.push(out.len());
        out.push(DELIMITER);
    }

    let &[first, second, ..] = delimiters.as_slice() else {
        return Err(DirectiveError::TooFewDelimiters);
    };
    let last = delimiters[delimiters.len() - 1];

    let left = out[first + 1..second].to_string();
    let right = if last > second {
        out[second + 1..last].to_string()
    } else {
        String::new()
    };
    Ok((left, right))
}

/// Collapse `\\` to a single backslash in fields that are taken
/// literally: the replacement text and both translation sets. Other
/// backslashes are left alone.
fn unescape_literal(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut chars = field.chars().peekable();
    while let Some(c) = chars.next() {
        out.push(c);
        if c == ESCAPE && chars.peek() == Some(&ESCAPE) {
            chars.next();
        }
    }
    out
}

//! Key path syntax shared by the tree-shaped backends
//!
//! `Group.Field[2]` parses into `[Name("Group"), Name("Field"), Index(2)]`.
//! Names may contain anything except `.`, `[`, `]` and whitespace.

use crate::error::{ParamError, Result};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Name(String),
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Name(name) => f.write_str(name),
            Segment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// Split a key into path segments.
pub fn parse_path(key: &str) -> Result<Vec<Segment>> {
    let invalid = |reason: &str| ParamError::InvalidKey {
        key: key.to_string(),
        reason: reason.to_string(),
    };

    let key = key.trim();
    if key.is_empty() {
        return Err(invalid("key is empty"));
    }

    let mut segments = Vec::new();
    let mut chars = key.char_indices();
    let mut name = String::new();
    // A '.' must be followed by a name, and the key may not start with one
    let mut expect_name = true;

    while let Some((pos, c)) = chars.next() {
        match c {
            '.' => {
                if name.is_empty() {
                    if expect_name || segments.is_empty() {
                        return Err(invalid(&format!("empty name before '.' at offset {}", pos)));
                    }
                } else {
                    segments.push(Segment::Name(std::mem::take(&mut name)));
                }
                expect_name = true;
            }
            '[' => {
                if !name.is_empty() {
                    segments.push(Segment::Name(std::mem::take(&mut name)));
                } else if expect_name && !segments.is_empty() {
                    return Err(invalid("index follows '.' without a name"));
                }
                let mut digits = String::new();
                loop {
                    match chars.next() {
                        Some((_, ']')) => break,
                        Some((_, d)) if d.is_ascii_digit() => digits.push(d),
                        Some((p, other)) => {
                            return Err(invalid(&format!(
                                "unexpected '{}' in index at offset {}",
                                other, p
                            )));
                        }
                        None => return Err(invalid("unterminated '['")),
                    }
                }
                let index = digits
                    .parse::<usize>()
                    .map_err(|_| invalid("index must be a non-negative integer"))?;
                segments.push(Segment::Index(index));
                expect_name = false;
            }
            ']' => return Err(invalid(&format!("unmatched ']' at offset {}", pos))),
            c if c.is_whitespace() => {
                return Err(invalid(&format!("whitespace at offset {}", pos)));
            }
            c => {
                if !expect_name && name.is_empty() {
                    return Err(invalid(&format!(
                        "name directly after index at offset {}",
                        pos
                    )));
                }
                name.push(c);
            }
        }
    }

    if !name.is_empty() {
        segments.push(Segment::Name(name));
    } else if expect_name {
        return Err(invalid("key ends with '.'"));
    }

    Ok(segments)
}

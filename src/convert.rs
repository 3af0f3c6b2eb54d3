//! # Text <-> value conversion
//!
//! Backends hand out raw text; the configuration facade turns it into typed
//! values through [`Parsable`] and turns typed values back into text through
//! [`Formattable`] before writing.
//!
//! Conversion is strict: the whole (trimmed) token must be consumed, so
//! `"42x"` is an error for `i32` rather than `42`. `String` is the identity
//! conversion and never fails.

use crate::error::ConversionError;
use std::path::PathBuf;

/// Kind hint passed to backends on writes so typed formats can store a
/// native value instead of a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Boolean,
    Integer,
    Float,
    String,
}

impl ValueKind {
    /// Best guess for untyped text, as used by the CLI `set` command
    pub fn infer(text: &str) -> Self {
        let text = text.trim();
        if parse::<bool>(text).is_ok() && !text.chars().all(|c| c.is_ascii_digit()) {
            ValueKind::Boolean
        } else if parse::<i64>(text).is_ok() {
            ValueKind::Integer
        } else if parse::<f64>(text).is_ok() {
            ValueKind::Float
        } else {
            ValueKind::String
        }
    }
}

pub trait Parsable: Sized {
    fn parse_param(text: &str) -> Result<Self, ConversionError>;
}

pub trait Formattable {
    const KIND: ValueKind;

    fn format_param(&self) -> String;
}

/// Convert backend text into `T`
pub fn parse<T: Parsable>(text: &str) -> Result<T, ConversionError> {
    T::parse_param(text)
}

/// Convert `value` into the text handed to a backend
pub fn format<T: Formattable + ?Sized>(value: &T) -> String {
    value.format_param()
}

macro_rules! impl_numeric {
    ($kind:expr => $($ty:ty),+ $(,)?) => {
        $(
            impl Parsable for $ty {
                fn parse_param(text: &str) -> Result<Self, ConversionError> {
                    text.trim()
                        .parse::<$ty>()
                        .map_err(|_| ConversionError::new::<$ty>(text))
                }
            }

            impl Formattable for $ty {
                const KIND: ValueKind = $kind;

                fn format_param(&self) -> String {
                    self.to_string()
                }
            }
        )+
    };
}

impl_numeric!(ValueKind::Integer => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_numeric!(ValueKind::Float => f32, f64);

impl Parsable for bool {
    fn parse_param(text: &str) -> Result<Self, ConversionError> {
        let token = text.trim();
        if token.eq_ignore_ascii_case("true") || token == "1" {
            Ok(true)
        } else if token.eq_ignore_ascii_case("false") || token == "0" {
            Ok(false)
        } else {
            Err(ConversionError::new::<bool>(text))
        }
    }
}

impl Formattable for bool {
    const KIND: ValueKind = ValueKind::Boolean;

    fn format_param(&self) -> String {
        self.to_string()
    }
}

impl Parsable for char {
    fn parse_param(text: &str) -> Result<Self, ConversionError> {
        let mut chars = text.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(ConversionError::new::<char>(text)),
        }
    }
}

impl Formattable for char {
    const KIND: ValueKind = ValueKind::String;

    fn format_param(&self) -> String {
        self.to_string()
    }
}

impl Parsable for String {
    fn parse_param(text: &str) -> Result<Self, ConversionError> {
        Ok(text.to_string())
    }
}

impl Formattable for String {
    const KIND: ValueKind = ValueKind::String;

    fn format_param(&self) -> String {
        self.clone()
    }
}

impl Formattable for str {
    const KIND: ValueKind = ValueKind::String;

    fn format_param(&self) -> String {
        self.to_string()
    }
}

impl Formattable for &str {
    const KIND: ValueKind = ValueKind::String;

    fn format_param(&self) -> String {
        (*self).to_string()
    }
}

impl Parsable for PathBuf {
    fn parse_param(text: &str) -> Result<Self, ConversionError> {
        if text.is_empty() {
            return Err(ConversionError::new::<PathBuf>(text));
        }
        Ok(PathBuf::from(text))
    }
}

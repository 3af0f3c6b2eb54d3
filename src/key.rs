//! Parameter keys
//!
//! Every accessor on [`Configuration`](crate::configuration::Configuration)
//! takes `impl Into<ParamKey>`, so callers can pass a plain `&str`, an owned
//! `String`, `format_args!(..)` output, or a key expanded from a printf-style
//! template with [`ParamKey::printf`].

use crate::error::{ParamError, Result};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"%([-+ 0#]*)([0-9]*)(?:\.([0-9]+))?(?:hh|h|ll|l|z|j|t|L)?([a-zA-Z%])?")
        .expect("Invalid regex pattern")
});

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParamKey(String);

impl ParamKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Expand a printf-style template (`"Level[%d].Size"`) against `args`.
    ///
    /// Supports `%d %i %u %s %f %e %g %x %X %c` with optional flags
    /// (`-`, `0`, `+`, space), width, precision and C length modifiers
    /// (`hh h l ll z j t L`, accepted and ignored), plus `%%`. The number of
    /// arguments must match the number of placeholders exactly.
    pub fn printf(template: &str, args: &[&dyn fmt::Display]) -> Result<Self> {
        let mut out = String::with_capacity(template.len() + 8);
        let mut last = 0;
        let mut next_arg = 0;

        for caps in PLACEHOLDER_RE.captures_iter(template) {
            let Some(whole) = caps.get(0) else { continue };
            out.push_str(&template[last..whole.start()]);
            last = whole.end();

            let conv = caps
                .get(4)
                .and_then(|m| m.as_str().chars().next())
                .ok_or_else(|| key_format_error(template, "dangling '%' at end of template"))?;

            if conv == '%' {
                out.push('%');
                continue;
            }

            let arg = args.get(next_arg).ok_or_else(|| {
                key_format_error(
                    template,
                    &format!("missing argument for placeholder #{}", next_arg + 1),
                )
            })?;
            next_arg += 1;

            let placeholder = Placeholder {
                flags: caps.get(1).map_or("", |m| m.as_str()),
                width: caps
                    .get(2)
                    .and_then(|m| m.as_str().parse::<usize>().ok())
                    .unwrap_or(0),
                precision: caps.get(3).and_then(|m| m.as_str().parse::<usize>().ok()),
                conv,
            };
            out.push_str(&placeholder.render(template, &arg.to_string())?);
        }
        out.push_str(&template[last..]);

        if next_arg != args.len() {
            return Err(key_format_error(
                template,
                &format!(
                    "{} argument(s) supplied but only {} used",
                    args.len(),
                    next_arg
                ),
            ));
        }

        Ok(Self(out))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

struct Placeholder<'a> {
    flags: &'a str,
    width: usize,
    precision: Option<usize>,
    conv: char,
}

impl Placeholder<'_> {
    fn render(&self, template: &str, arg: &str) -> Result<String> {
        let body = match self.conv {
            'd' | 'i' | 'u' => {
                let value = arg.trim().parse::<i128>().map_err(|_| {
                    key_format_error(template, &format!("'{}' is not an integer", arg))
                })?;
                if self.conv == 'u' {
                    value.to_string()
                } else {
                    self.signed(value.to_string())
                }
            }
            'x' | 'X' => {
                let value = arg.trim().parse::<u128>().map_err(|_| {
                    key_format_error(template, &format!("'{}' is not an unsigned integer", arg))
                })?;
                if self.conv == 'x' {
                    format!("{:x}", value)
                } else {
                    format!("{:X}", value)
                }
            }
            'f' | 'e' | 'g' => {
                let value = arg.trim().parse::<f64>().map_err(|_| {
                    key_format_error(template, &format!("'{}' is not a number", arg))
                })?;
                self.signed(match (self.conv, self.precision) {
                    ('f', p) => format!("{:.*}", p.unwrap_or(6), value),
                    ('e', p) => format!("{:.*e}", p.unwrap_or(6), value),
                    (_, Some(p)) => format!("{:.*}", p, value),
                    _ => value.to_string(),
                })
            }
            's' => match self.precision {
                Some(p) => arg.chars().take(p).collect(),
                None => arg.to_string(),
            },
            'c' => arg.chars().next().map(String::from).unwrap_or_default(),
            other => {
                return Err(key_format_error(
                    template,
                    &format!("unsupported conversion '%{}'", other),
                ));
            }
        };

        let len = body.chars().count();
        if len >= self.width {
            return Ok(body);
        }
        let pad = self.width - len;
        if self.flags.contains('-') {
            Ok(format!("{}{}", body, " ".repeat(pad)))
        } else if self.flags.contains('0') && matches!(self.conv, 'd' | 'i' | 'u' | 'x' | 'X') {
            match body.chars().next() {
                Some(sign @ ('-' | '+' | ' ')) => {
                    Ok(format!("{}{}{}", sign, "0".repeat(pad), &body[1..]))
                }
                _ => Ok(format!("{}{}", "0".repeat(pad), body)),
            }
        } else {
            Ok(format!("{}{}", " ".repeat(pad), body))
        }
    }
}

impl Placeholder<'_> {
    /// Apply the `+` or space flag to a non-negative number
    fn signed(&self, body: String) -> String {
        if body.starts_with('-') {
            body
        } else if self.flags.contains('+') {
            format!("+{}", body)
        } else if self.flags.contains(' ') {
            format!(" {}", body)
        } else {
            body
        }
    }
}

fn key_format_error(template: &str, reason: &str) -> ParamError {
    ParamError::KeyFormat {
        template: template.to_string(),
        reason: reason.to_string(),
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ParamKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ParamKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for ParamKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&String> for ParamKey {
    fn from(key: &String) -> Self {
        Self(key.clone())
    }
}

impl From<&ParamKey> for ParamKey {
    fn from(key: &ParamKey) -> Self {
        key.clone()
    }
}

impl From<fmt::Arguments<'_>> for ParamKey {
    fn from(args: fmt::Arguments<'_>) -> Self {
        Self(fmt::format(args))
    }
}

//! `set` and `set-array`
//!
//! Values arrive as text. They are converted to the requested (or guessed)
//! type first, so the backend stores a native value and a bad value fails
//! before anything is written.

use crate::cli::args::ValueType;
use crate::commands::session::Session;
use crate::convert::{self, Formattable, Parsable, ValueKind};
use crate::error::{ParamError, Result};
use crate::key::ParamKey;
use crate::ui as output;

pub struct SetOptions {
    pub key: String,
    pub value: String,
    pub value_type: Option<ValueType>,
}

pub struct SetArrayOptions {
    pub key: String,
    pub values: Vec<String>,
    pub value_type: Option<ValueType>,
}

pub fn run_scalar(session: &mut Session, options: SetOptions) -> Result<()> {
    let key = ParamKey::new(options.key);
    let kind = options
        .value_type
        .map(ValueKind::from)
        .unwrap_or_else(|| ValueKind::infer(&options.value));

    match kind {
        ValueKind::Boolean => store_scalar::<bool>(session, &key, &options.value)?,
        ValueKind::Integer => store_scalar::<i64>(session, &key, &options.value)?,
        ValueKind::Float => store_scalar::<f64>(session, &key, &options.value)?,
        ValueKind::String => session.config.set_scalar(options.value.as_str(), &key)?,
    }

    let target = session.write_back()?;
    output::success(&format!(
        "Set {} = {} in '{}'",
        key,
        options.value,
        target.display()
    ));
    Ok(())
}

pub fn run_array(session: &mut Session, options: SetArrayOptions) -> Result<()> {
    let key = ParamKey::new(options.key);
    let kind = match (options.value_type, options.values.first()) {
        (Some(value_type), _) => value_type.into(),
        (None, Some(first)) => ValueKind::infer(first),
        (None, None) => ValueKind::String,
    };

    match kind {
        ValueKind::Boolean => store_array::<bool>(session, &key, &options.values)?,
        ValueKind::Integer => store_array::<i64>(session, &key, &options.values)?,
        ValueKind::Float => store_array::<f64>(session, &key, &options.values)?,
        ValueKind::String => session.config.set_array(&options.values, &key)?,
    }

    let target = session.write_back()?;
    output::success(&format!(
        "Set {} = [{}] in '{}'",
        key,
        options.values.join(", "),
        target.display()
    ));
    Ok(())
}

fn store_scalar<T: Parsable + Formattable>(session: &mut Session, key: &ParamKey, text: &str) -> Result<()> {
    let value: T = parse_for(key, text)?;
    session.config.set_scalar(&value, key)
}

fn store_array<T: Parsable + Formattable>(
    session: &mut Session,
    key: &ParamKey,
    texts: &[String],
) -> Result<()> {
    let values = texts
        .iter()
        .map(|text| parse_for::<T>(key, text))
        .collect::<Result<Vec<T>>>()?;
    session.config.set_array(&values, key)
}

fn parse_for<T: Parsable>(key: &ParamKey, text: &str) -> Result<T> {
    convert::parse::<T>(text).map_err(|source| ParamError::Conversion {
        key: key.to_string(),
        source,
    })
}

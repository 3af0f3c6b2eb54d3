//! `get` and `get-array`

use crate::cli::args::{OutputFormat, ValueType};
use crate::commands::report::{emit, plain_text};
use crate::configuration::{Configuration, Origin};
use crate::error::Result;
use crate::key::ParamKey;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

pub struct GetOptions {
    pub template: String,
    pub args: Vec<String>,
    pub value_type: ValueType,
    pub format: Option<OutputFormat>,
}

#[derive(Serialize)]
struct ScalarReport<'a> {
    key: &'a str,
    origin: Option<&'static str>,
    value: Value,
}

#[derive(Serialize)]
struct ArrayReport<'a> {
    key: &'a str,
    origin: Option<&'static str>,
    values: Vec<Value>,
}

/// Expand a CLI template and its positional arguments into a key
pub fn expand_key(template: &str, args: &[String]) -> Result<ParamKey> {
    let args: Vec<&dyn fmt::Display> = args.iter().map(|a| a as &dyn fmt::Display).collect();
    ParamKey::printf(template, &args)
}

pub fn run_scalar(config: &Configuration, options: GetOptions) -> Result<()> {
    let key = expand_key(&options.template, &options.args)?;
    let (value, origin) = typed_scalar(config, &key, options.value_type)?;

    let plain = vec![plain_text(&value)];
    let report = ScalarReport {
        key: key.as_str(),
        origin: Some(origin.as_str()),
        value,
    };
    emit(options.format, &report, &plain)
}

pub fn run_array(config: &Configuration, options: GetOptions) -> Result<()> {
    let key = expand_key(&options.template, &options.args)?;
    let (values, origin) = typed_array(config, &key, options.value_type)?;

    let plain: Vec<String> = values.iter().map(plain_text).collect();
    let report = ArrayReport {
        key: key.as_str(),
        origin: Some(origin.as_str()),
        values,
    };
    emit(options.format, &report, &plain)
}

/// One lookup per call, so verbose fallback messages print once
fn typed_scalar(
    config: &Configuration,
    key: &ParamKey,
    value_type: ValueType,
) -> Result<(Value, Origin)> {
    Ok(match value_type {
        ValueType::Bool => to_value(config.get_scalar_with_origin::<bool>(key)?),
        ValueType::Int => to_value(config.get_scalar_with_origin::<i64>(key)?),
        ValueType::Float => to_value(config.get_scalar_with_origin::<f64>(key)?),
        ValueType::String => to_value(config.get_scalar_with_origin::<String>(key)?),
    })
}

fn typed_array(
    config: &Configuration,
    key: &ParamKey,
    value_type: ValueType,
) -> Result<(Vec<Value>, Origin)> {
    Ok(match value_type {
        ValueType::Bool => to_values(config.get_array_with_origin::<bool>(key)?),
        ValueType::Int => to_values(config.get_array_with_origin::<i64>(key)?),
        ValueType::Float => to_values(config.get_array_with_origin::<f64>(key)?),
        ValueType::String => to_values(config.get_array_with_origin::<String>(key)?),
    })
}

fn to_value<T: Into<Value>>((value, origin): (T, Origin)) -> (Value, Origin) {
    (value.into(), origin)
}

fn to_values<T: Into<Value>>((items, origin): (Vec<T>, Origin)) -> (Vec<Value>, Origin) {
    (items.into_iter().map(Into::into).collect(), origin)
}

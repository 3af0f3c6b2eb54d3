//! Plain and machine-readable output for read commands

use crate::cli::args::OutputFormat;
use crate::error::Result;
use serde::Serialize;
use serde_json::Value;

/// Print `report` as JSON or YAML when a format was requested; otherwise
/// print `plain`, one line per entry
pub fn emit<T: Serialize>(format: Option<OutputFormat>, report: &T, plain: &[String]) -> Result<()> {
    match format {
        Some(OutputFormat::Json) => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        Some(OutputFormat::Yaml) => {
            let json_value = serde_json::to_value(report)?;
            print!("{}", serde_yml::to_string(&json_value)?);
        }
        None => {
            for line in plain {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

/// Text form of a typed value for plain output
pub fn plain_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_text() {
        assert_eq!(plain_text(&json!("collapse")), "collapse");
        assert_eq!(plain_text(&json!(10.5)), "10.5");
        assert_eq!(plain_text(&json!(true)), "true");
        assert_eq!(plain_text(&json!(-3)), "-3");
    }
}

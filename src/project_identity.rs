//! Central project identity contract.
//!
//! Single source of truth for names that show up in output, dumped files and
//! environment variables.

pub const BINARY_NAME: &str = "paramctl";
pub const ENV_PREFIX: &str = "PARAMCTL";
pub const SETTINGS_FILE_BASENAME: &str = "paramctl.kdl";

pub fn env_key(suffix: &str) -> String {
    format!("{}_{}", ENV_PREFIX, suffix)
}

pub fn cli_with(args: &str) -> String {
    if args.trim().is_empty() {
        BINARY_NAME.to_string()
    } else {
        format!("{} {}", BINARY_NAME, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_key() {
        assert_eq!(env_key("SETTINGS"), "PARAMCTL_SETTINGS");
    }

    #[test]
    fn test_cli_with() {
        assert_eq!(cli_with(""), "paramctl");
        assert_eq!(cli_with("get StopTime"), "paramctl get StopTime");
    }
}

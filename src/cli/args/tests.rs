use super::*;
use crate::project_identity;
use clap::CommandFactory;

#[test]
fn parser_accepts_get_with_template_args() {
    let parsed = Cli::try_parse_from([
        project_identity::BINARY_NAME,
        "--input",
        "run.cfg",
        "get",
        "Level[%d].Size",
        "3",
        "--type",
        "int",
    ])
    .expect("get should parse");

    assert_eq!(parsed.source.input, Some(PathBuf::from("run.cfg")));
    match parsed.command {
        Some(Command::Get {
            template,
            args,
            value_type,
        }) => {
            assert_eq!(template, "Level[%d].Size");
            assert_eq!(args, vec!["3".to_string()]);
            assert_eq!(value_type, ValueType::Int);
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn parser_allows_global_flags_after_subcommand() {
    let parsed = Cli::try_parse_from([
        project_identity::BINARY_NAME,
        "size",
        "Levels",
        "--backend",
        "json",
        "-v",
    ])
    .expect("global flags after subcommand should parse");

    assert_eq!(parsed.source.backend.as_deref(), Some("json"));
    assert!(parsed.global.verbose);
}

#[test]
fn parser_requires_values_for_set_array() {
    let parsed = Cli::try_parse_from([project_identity::BINARY_NAME, "set-array", "Levels"]);
    assert!(parsed.is_err());
}

#[test]
fn parser_rejects_unknown_value_type() {
    let parsed = Cli::try_parse_from([
        project_identity::BINARY_NAME,
        "get",
        "StopTime",
        "--type",
        "double",
    ]);
    assert!(parsed.is_err());
}

#[test]
fn help_does_not_show_completions() {
    let mut cmd = Cli::command();
    let mut out = Vec::new();
    cmd.write_long_help(&mut out).expect("can render root help");
    let help = String::from_utf8(out).expect("help is valid utf8");
    assert!(help.contains("get-array"));
    assert!(help.contains("--defaults"));
    assert!(!help.contains("completions"));
}

#[test]
fn value_type_maps_to_kind() {
    assert_eq!(ValueKind::from(ValueType::Float), ValueKind::Float);
    assert_eq!(ValueType::from(ValueKind::Boolean), ValueType::Bool);
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

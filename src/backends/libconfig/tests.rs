use super::*;

const SAMPLE: &str = r#"
# Simulation parameters
StopTime = 10.5;
MaximumLevel = 0x4;
Levels = [1, 2, 4];
Debug = TRUE;

Simulation :
{
  Name = "collapse";
  Grids = ( { Size = 16; }, { Size = 32; } );
  Mixed = ( 1, "two", 3.0 );
  Empty = [];
};
"#;

fn sample() -> LibconfigInterpreter {
    LibconfigInterpreter::parse("enzo2_libconfig", SAMPLE).expect("parse sample")
}

#[test]
fn test_query_scalars() {
    let cfg = sample();
    assert_eq!(cfg.query("StopTime").as_deref(), Some("10.5"));
    assert_eq!(cfg.query("MaximumLevel").as_deref(), Some("4"));
    assert_eq!(cfg.query("Debug").as_deref(), Some("true"));
    assert_eq!(cfg.query("Simulation.Name").as_deref(), Some("collapse"));
    assert_eq!(cfg.query("Simulation.Grids[1].Size").as_deref(), Some("32"));
    assert_eq!(cfg.query("Levels[2]").as_deref(), Some("4"));
}

#[test]
fn test_query_missing_or_aggregate() {
    let cfg = sample();
    assert_eq!(cfg.query("Nope"), None);
    assert_eq!(cfg.query("Simulation"), None);
    assert_eq!(cfg.query("Levels"), None);
    assert_eq!(cfg.query("Levels[3]"), None);
    assert_eq!(cfg.query("Levels[0].x"), None);
    assert_eq!(cfg.query("not a key"), None);
}

#[test]
fn test_query_list() {
    let cfg = sample();
    assert_eq!(
        cfg.query_list("Levels"),
        Some(vec!["1".to_string(), "2".to_string(), "4".to_string()])
    );
    assert_eq!(
        cfg.query_list("Simulation.Mixed"),
        Some(vec!["1".to_string(), "two".to_string(), "3.0".to_string()])
    );
    assert_eq!(cfg.query_list("Simulation.Empty"), Some(vec![]));
    assert_eq!(cfg.query_list("StopTime"), Some(vec!["10.5".to_string()]));
    assert_eq!(cfg.query_list("Simulation.Grids"), None);
    assert_eq!(cfg.query_list("Simulation"), None);
}

#[test]
fn test_size() {
    let cfg = sample();
    assert_eq!(cfg.size("Levels"), 3);
    assert_eq!(cfg.size("StopTime"), 1);
    assert_eq!(cfg.size("Simulation.Grids"), 2);
    assert_eq!(cfg.size("Simulation.Empty"), 0);
    assert_eq!(cfg.size("Simulation"), 4);
    assert_eq!(cfg.size("Missing"), 0);
}

#[test]
fn test_malformed_is_init_error() {
    let err = LibconfigInterpreter::parse("enzo2_libconfig", "a = ;")
        .err()
        .expect("must fail");
    match err {
        ParamError::BackendInit { backend, reason } => {
            assert_eq!(backend, "enzo2_libconfig");
            assert!(reason.contains("line 1"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_set_scalar_roundtrip() {
    let mut cfg = sample();
    cfg.set("StopTime", "20", ValueKind::Float).unwrap();
    cfg.set("Output.Name", "run \"A\"", ValueKind::String).unwrap();
    cfg.set("Simulation.Grids[0].Size", "64", ValueKind::Integer).unwrap();

    assert_eq!(cfg.query("StopTime").as_deref(), Some("20"));
    assert_eq!(cfg.query("Output.Name").as_deref(), Some("run \"A\""));
    assert_eq!(cfg.query("Simulation.Grids[0].Size").as_deref(), Some("64"));
}

#[test]
fn test_set_rejects_bad_values() {
    let mut cfg = sample();
    assert!(cfg.set("X", "12x", ValueKind::Integer).is_err());
    assert!(cfg.set("X", "inf", ValueKind::Float).is_err());
    assert!(cfg.set("StopTime.Child", "1", ValueKind::Integer).is_err());
    assert!(cfg.set("Levels[1]", "a", ValueKind::String).is_err());
    assert_eq!(cfg.query("X"), None);
}

#[test]
fn test_set_array_element_and_append() {
    let mut cfg = sample();
    cfg.set("Levels[1]", "3", ValueKind::Integer).unwrap();
    cfg.set("Levels[3]", "8", ValueKind::Integer).unwrap();
    assert_eq!(
        cfg.query_list("Levels"),
        Some(vec![
            "1".to_string(),
            "3".to_string(),
            "4".to_string(),
            "8".to_string()
        ])
    );
    assert!(cfg.set("Levels[9]", "1", ValueKind::Integer).is_err());
}

#[test]
fn test_set_list_is_all_or_nothing() {
    let mut cfg = sample();
    let values = vec!["1".to_string(), "oops".to_string()];
    assert!(cfg.set_list("Levels", &values, ValueKind::Integer).is_err());
    assert_eq!(cfg.size("Levels"), 3);

    let values = vec!["0.5".to_string(), "0.25".to_string()];
    cfg.set_list("Cosmology.Omega", &values, ValueKind::Float).unwrap();
    assert_eq!(cfg.query_list("Cosmology.Omega"), Some(values));
}

#[test]
fn test_remove() {
    let mut cfg = sample();
    cfg.remove("Simulation.Name").unwrap();
    cfg.remove("Levels[0]").unwrap();
    cfg.remove("Simulation.Grids[1]").unwrap();

    assert_eq!(cfg.query("Simulation.Name"), None);
    assert_eq!(cfg.size("Levels"), 2);
    assert_eq!(cfg.size("Simulation.Grids"), 1);
    assert!(cfg.remove("Simulation.Name").is_err());
    assert!(cfg.remove("Nope.Deeper").is_err());
}

#[test]
fn test_render_reparses_to_same_tree() {
    let mut cfg = sample();
    cfg.set("Output.Title", "line\nbreak", ValueKind::String).unwrap();
    cfg.set("Whole", "3", ValueKind::Float).unwrap();

    let rendered = cfg.render();
    let reparsed = LibconfigInterpreter::parse("enzo2_libconfig", &rendered).expect("reparse");

    assert_eq!(reparsed.query("Output.Title").as_deref(), Some("line\nbreak"));
    assert_eq!(reparsed.query("Simulation.Grids[1].Size").as_deref(), Some("32"));
    assert_eq!(reparsed.query_list("Levels"), cfg.query_list("Levels"));
    // Whole-number floats stay floats
    assert_eq!(reparsed.query("Whole").as_deref(), Some("3.0"));
}

#[test]
fn test_dump_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.cfg");

    let cfg = sample();
    cfg.dump(&path).expect("dump");

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("# Parameters written by"));

    let reloaded = LibconfigInterpreter::from_source("enzo2_libconfig", InterpreterSource::File(&path))
        .expect("reload");
    assert_eq!(reloaded.query("StopTime").as_deref(), Some("10.5"));
}

#[test]
fn test_dump_to_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no/such/dir/out.cfg");
    assert!(sample().dump(&path).is_err());
}

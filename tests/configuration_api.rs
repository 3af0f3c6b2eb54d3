// Library-level tests for the configuration facade against the global
// registry, including a backend registered at runtime.

use paramctl::backends::json::JsonInterpreter;
use paramctl::backends::libconfig::LibconfigInterpreter;
use paramctl::{
    Configuration, InterpreterSource, Origin, ParamError, ParamKey, create_interpreter,
    register_interpreter,
};
use std::fs;

#[test]
fn test_registered_backend_is_used_by_name() {
    register_interpreter("fmtA", |source| {
        Ok(Box::new(LibconfigInterpreter::from_source("fmtA", source)?))
    })
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.params");
    fs::write(&path, "x=7").unwrap();

    let mut config = Configuration::new();
    config.initialize("fmtA", &path, "x=1\ny=2").unwrap();

    assert_eq!(config.backend_name(), Some("fmtA"));
    assert_eq!(config.get_scalar::<i32>("x").unwrap(), 7);
    assert_eq!(config.get_scalar::<i32>("y").unwrap(), 2);
    assert_eq!(config.origin("y").unwrap(), Some(Origin::Defaults));
    assert!(matches!(
        config.get_scalar::<i32>("z").unwrap_err(),
        ParamError::ParameterNotFound { .. }
    ));
}

#[test]
fn test_unregistered_backend_leaves_configuration_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.params");
    fs::write(&path, "x=7").unwrap();

    let mut config = Configuration::new();
    let err = config.initialize("unregistered", &path, "").unwrap_err();

    assert!(matches!(err, ParamError::UnknownBackend { .. }));
    assert!(!config.is_initialized());
    assert!(matches!(
        config.get_scalar::<i32>("x").unwrap_err(),
        ParamError::NotInitialized
    ));
}

#[test]
fn test_text_source_through_global_registry() {
    register_interpreter("inline_json", |source| {
        Ok(Box::new(JsonInterpreter::from_source("inline_json", source)?))
    })
    .unwrap();

    let doc = create_interpreter(
        "inline_json",
        InterpreterSource::new(r#"{"Hydro": {"Courant": 0.4}}"#, true),
    )
    .unwrap();

    assert_eq!(doc.backend_name(), "inline_json");
    assert_eq!(doc.query("Hydro.Courant").as_deref(), Some("0.4"));
    assert!(doc.supports_mutation());
}

#[test]
fn test_yaml_parameters_with_libconfig_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.yaml");
    fs::write(
        &path,
        "Hierarchy:\n  MaxLevel: 3\n  Refine: [true, false, true]\n",
    )
    .unwrap();

    let defaults = "Hierarchy : { MaxLevel = 0; Courant = 0.5; };";

    let mut config = Configuration::new();
    config.initialize("yaml", &path, defaults).unwrap();

    let max_level: usize = config.get_scalar("Hierarchy.MaxLevel").unwrap();
    let courant: f64 = config.get_scalar("Hierarchy.Courant").unwrap();
    let refine: Vec<bool> = config.get_array("Hierarchy.Refine").unwrap();

    assert_eq!(max_level, 3);
    assert_eq!(courant, 0.5);
    assert_eq!(refine, vec![true, false, true]);
    assert_eq!(config.size("Hierarchy").unwrap(), 2);
}

#[test]
fn test_typed_round_trip_through_dump() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.cfg");
    fs::write(&path, "").unwrap();

    let mut config = Configuration::new();
    config.initialize("enzo2_libconfig", &path, "").unwrap();

    for level in 0..3_i32 {
        let key = ParamKey::printf("Level%02d.Size", &[&level]).unwrap();
        config.set_scalar(&(16 << level), &key).unwrap();
    }
    config.set_scalar(&'x', "Axis").unwrap();
    config.set_array(&[1.5_f32, 2.5], "Bounds").unwrap();
    config.dump(&path).unwrap();

    let mut reloaded = Configuration::new();
    reloaded.initialize("enzo2_libconfig", &path, "").unwrap();

    assert_eq!(reloaded.get_scalar::<i32>("Level02.Size").unwrap(), 64);
    assert_eq!(reloaded.get_scalar::<char>("Axis").unwrap(), 'x');
    assert_eq!(reloaded.get_array::<f32>("Bounds").unwrap(), vec![1.5, 2.5]);
    assert_eq!(reloaded.size("Level01").unwrap(), 1);
}

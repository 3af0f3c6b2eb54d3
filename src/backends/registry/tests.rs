use super::*;
use crate::backends::json::JsonInterpreter;

#[test]
fn test_registry_registration() {
    let mut registry = BackendRegistry::new();
    registry.register_defaults();

    assert!(registry.has_backend(DEFAULTS_INTERPRETER));
    assert!(registry.has_backend("libconfig"));
    assert!(registry.has_backend("json"));
    assert!(registry.has_backend("yaml"));
    assert!(registry.has_backend("kdl"));
}

#[test]
fn test_registered_backends_sorted() {
    let registry = BackendRegistry::default();
    let names = registry.registered_backends();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

#[test]
fn test_create_from_text() {
    let registry = BackendRegistry::default();

    for name in registry.registered_backends() {
        let result = registry.create(&name, InterpreterSource::Text(""));
        assert!(result.is_ok(), "Failed to create '{}' from empty text", name);
        assert_eq!(result.unwrap().backend_name(), name);
    }
}

#[test]
fn test_unknown_backend() {
    let registry = BackendRegistry::default();

    let err = registry
        .create("fmtZ", InterpreterSource::Text("x = 1;"))
        .err()
        .expect("unregistered name must fail");

    match err {
        ParamError::UnknownBackend { name, available } => {
            assert_eq!(name, "fmtZ");
            assert!(available.contains("json"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_last_registration_wins() {
    let mut registry = BackendRegistry::new();
    registry.register("fmtA", |source| {
        Ok(Box::new(JsonInterpreter::from_source("first", source)?))
    });
    registry.register("fmtA", |source| {
        Ok(Box::new(JsonInterpreter::from_source("second", source)?))
    });

    let interp = registry
        .create("fmtA", InterpreterSource::Text("{}"))
        .expect("create fmtA");
    assert_eq!(interp.backend_name(), "second");
}

#[test]
fn test_malformed_source_is_init_error() {
    let registry = BackendRegistry::default();

    let err = registry
        .create("json", InterpreterSource::Text("{ not json"))
        .err()
        .expect("malformed JSON must fail");

    assert!(matches!(err, ParamError::BackendInit { .. }));
}

#[test]
fn test_global_register_and_create() {
    register_interpreter("registry_test_json", |source| {
        Ok(Box::new(JsonInterpreter::from_source(
            "registry_test_json",
            source,
        )?))
    })
    .expect("register");

    assert!(
        registered_backends()
            .expect("list")
            .contains(&"registry_test_json".to_string())
    );

    let interp = create_interpreter(
        "registry_test_json",
        InterpreterSource::new(r#"{"a": 1}"#, true),
    )
    .expect("create");
    assert_eq!(interp.query("a").as_deref(), Some("1"));
}

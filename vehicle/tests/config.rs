use vehicle::{ControlMethod, Error, PrimaryConfig, Vec3};

const MINIMAL: &str = r#"
model_name = "rov"
mass = 10.0
buoyancy_adjustment = 0.2
control_method = 1

[bounding_box]
x = 0.4
y = 0.3
z = 0.25

[center_of_mass]
x = 0.0
y = 0.0
z = 0.0

[center_of_volume]
x = 0.0
y = 0.0
z = 0.06

[[thrusters]]
x = 0.1
y = 0.1
z = 0.0

[[thrusters]]
x = 0.1
y = -0.1
z = 0.0
"#;

#[test]
fn minimal_config_parses() {
    let config = PrimaryConfig::from_toml_str(MINIMAL).expect("config loads");
    assert_eq!(config.model_name, "rov");
    assert_eq!(config.mass, 10.0);
    assert_eq!(config.control_method, ControlMethod::AngularVelocity);
    assert_eq!(config.thrusters.len(), 2);
    assert_eq!(config.thrusters[1], Vec3::new(0.1, -0.1, 0.0));
    assert!(config.inertia.is_none());
    assert!(config.quadratic_drag.is_none());
}

#[test]
fn optional_groups_are_extracted_when_present() {
    let raw = format!(
        "{MINIMAL}\n\
        [linear_drag]\n\
        xU = -1.0\nyV = -2.0\nzW = -3.0\nkP = -0.1\nmQ = -0.2\nnR = -0.3\n\
        \n\
        [default_current]\n\
        x = 0.5\ny = 0.0\nz = 0.0\n"
    );
    let config = PrimaryConfig::from_toml_str(&raw).expect("config loads");
    assert_eq!(
        config.linear_drag,
        Some([-1.0, -2.0, -3.0, -0.1, -0.2, -0.3])
    );
    assert_eq!(config.default_current, Some(Vec3::new(0.5, 0.0, 0.0)));
}

#[test]
fn missing_required_field_names_it() {
    let raw = MINIMAL.replace("mass = 10.0\n", "");
    let err = PrimaryConfig::from_toml_str(&raw).unwrap_err();
    match err {
        Error::MissingField(field) => assert_eq!(field, "mass"),
        other => panic!("expected MissingField, got {other:?}"),
    }
}

#[test]
fn missing_vector_component_names_the_path() {
    let raw = MINIMAL.replace("[center_of_volume]\nx = 0.0\n", "[center_of_volume]\n");
    let err = PrimaryConfig::from_toml_str(&raw).unwrap_err();
    match err {
        Error::MissingField(field) => assert_eq!(field, "center_of_volume.x"),
        other => panic!("expected MissingField, got {other:?}"),
    }
}

#[test]
fn wrong_type_names_field_and_expectation() {
    let raw = MINIMAL.replace("mass = 10.0", "mass = \"heavy\"");
    let err = PrimaryConfig::from_toml_str(&raw).unwrap_err();
    match err {
        Error::TypeMismatch { field, expected } => {
            assert_eq!(field, "mass");
            assert_eq!(expected, "number");
        }
        other => panic!("expected TypeMismatch, got {other:?}"),
    }
}

#[test]
fn partial_optional_group_is_an_error_not_a_fallback() {
    let raw = format!("{MINIMAL}\n[quadratic_drag]\nxUabsU = -30.0\n");
    let err = PrimaryConfig::from_toml_str(&raw).unwrap_err();
    match err {
        Error::MissingField(field) => assert_eq!(field, "quadratic_drag.yVabsV"),
        other => panic!("expected MissingField, got {other:?}"),
    }
}

#[test]
fn control_method_accepts_integer_and_string_forms() {
    let as_string = MINIMAL.replace("control_method = 1", "control_method = \"thrust\"");
    let config = PrimaryConfig::from_toml_str(&as_string).expect("config loads");
    assert_eq!(config.control_method, ControlMethod::Thrust);

    let as_zero = MINIMAL.replace("control_method = 1", "control_method = 0");
    let config = PrimaryConfig::from_toml_str(&as_zero).expect("config loads");
    assert_eq!(config.control_method, ControlMethod::Thrust);
}

#[test]
fn unknown_control_method_is_rejected() {
    let raw = MINIMAL.replace("control_method = 1", "control_method = 2");
    let err = PrimaryConfig::from_toml_str(&raw).unwrap_err();
    assert!(matches!(err, Error::InvalidParameter(_)), "got {err:?}");
}

#[test]
fn malformed_toml_is_a_config_load_error() {
    let err = PrimaryConfig::from_toml_str("model_name = ").unwrap_err();
    assert!(matches!(err, Error::ConfigLoad(_)), "got {err:?}");
}

#[test]
fn negative_mass_fails_validation() {
    let raw = MINIMAL.replace("mass = 10.0", "mass = -10.0");
    let err = PrimaryConfig::from_toml_str(&raw).unwrap_err();
    assert!(matches!(err, Error::InvalidParameter(_)), "got {err:?}");
}

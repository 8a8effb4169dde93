use std::fmt;

use serde::{Deserialize, Serialize};
use toml::{Table, Value as Toml};

use crate::error::{Error, Result};
use crate::math::Vec3;

/// Keys of the hydrodynamic 6-vectors, in SNAME notation. The same names are
/// used for the config sub-fields and the template placeholders.
pub(crate) const LINEAR_DRAG_KEYS: [&str; 6] = ["xU", "yV", "zW", "kP", "mQ", "nR"];
pub(crate) const QUADRATIC_DRAG_KEYS: [&str; 6] =
    ["xUabsU", "yVabsV", "zWabsW", "kPabsP", "mQabsQ", "nRabsR"];
pub(crate) const ADDED_MASS_KEYS: [&str; 6] =
    ["xDotU", "yDotV", "zDotW", "kDotP", "mDotQ", "nDotR"];
pub(crate) const INERTIA_KEYS: [&str; 3] = ["ixx", "iyy", "izz"];

/// How thruster joints are driven by the autopilot plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlMethod {
    /// Commands are thrust forces published to `cmd_thrust`.
    Thrust,
    /// Commands are propeller angular velocities published to `cmd_vel`.
    AngularVelocity,
}

impl ControlMethod {
    /// Suffix of the per-thruster command topic.
    pub fn topic_suffix(self) -> &'static str {
        match self {
            ControlMethod::Thrust => "thrust",
            ControlMethod::AngularVelocity => "vel",
        }
    }
}

impl fmt::Display for ControlMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlMethod::Thrust => f.write_str("thrust"),
            ControlMethod::AngularVelocity => f.write_str("angular velocity"),
        }
    }
}

/// Primary physical description of the vehicle, as supplied by the operator.
///
/// The optional hydrodynamic groups are `None` when the config omits them;
/// derivation then falls back to bounding-box estimates (drag, inertia) or
/// zero vectors (linear drag, added mass, ambient current).
#[derive(Debug, Clone)]
pub struct PrimaryConfig {
    pub model_name: String,
    /// Vehicle dry mass (kg).
    pub mass: f64,
    /// Outer dimensions of the hull (m); drives buoyancy and drag estimates.
    pub bounding_box: Vec3,
    pub center_of_mass: Vec3,
    pub center_of_volume: Vec3,
    /// Mass added to the dry mass when computing displaced water (kg).
    pub buoyancy_adjustment: f64,
    /// Thruster positions in declaration order; joint names in the template
    /// are expected to match that order (`thruster1_joint`, ...).
    pub thrusters: Vec<Vec3>,
    pub control_method: ControlMethod,
    pub inertia: Option<[f64; 3]>,
    pub linear_drag: Option<[f64; 6]>,
    pub quadratic_drag: Option<[f64; 6]>,
    pub added_mass: Option<[f64; 6]>,
    pub default_current: Option<Vec3>,
}

impl PrimaryConfig {
    /// Parse and validate a config from TOML text.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let root: Table = toml::from_str(raw)?;
        let config = Self::from_table(&root)?;
        config.validate()?;
        Ok(config)
    }

    /// Extract the config from an already-parsed key/value document.
    ///
    /// Extraction is field-by-field so errors can name the exact dotted path
    /// that is missing or mistyped. A present-but-incomplete optional group
    /// is an error, not a silent fallback to the derived defaults.
    pub fn from_table(root: &Table) -> Result<Self> {
        Ok(Self {
            model_name: string_at(root, "model_name")?,
            mass: num_at(root, "", "mass")?,
            bounding_box: vec3_at(root, "bounding_box")?,
            center_of_mass: vec3_at(root, "center_of_mass")?,
            center_of_volume: vec3_at(root, "center_of_volume")?,
            buoyancy_adjustment: num_at(root, "", "buoyancy_adjustment")?,
            thrusters: thrusters_at(root)?,
            control_method: control_method_at(root)?,
            inertia: optional(root, "inertia", |v| named(v, "inertia", INERTIA_KEYS))?,
            linear_drag: optional(root, "linear_drag", |v| {
                named(v, "linear_drag", LINEAR_DRAG_KEYS)
            })?,
            quadratic_drag: optional(root, "quadratic_drag", |v| {
                named(v, "quadratic_drag", QUADRATIC_DRAG_KEYS)
            })?,
            added_mass: optional(root, "added_mass", |v| {
                named(v, "added_mass", ADDED_MASS_KEYS)
            })?,
            default_current: optional(root, "default_current", |v| {
                vec3_of(v, "default_current")
            })?,
        })
    }

    /// Check the invariants derivation relies on.
    pub fn validate(&self) -> Result<()> {
        if self.mass <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "mass must be positive, got {}",
                self.mass
            )));
        }
        let bb = self.bounding_box;
        if bb.x <= 0.0 || bb.y <= 0.0 || bb.z <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "bounding_box components must be positive, got ({}, {}, {})",
                bb.x, bb.y, bb.z
            )));
        }
        Ok(())
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn require<'a>(table: &'a Table, path: &str, key: &str) -> Result<&'a Toml> {
    table
        .get(key)
        .ok_or_else(|| Error::MissingField(join(path, key)))
}

fn number(value: &Toml, field: &str) -> Result<f64> {
    match value {
        Toml::Float(v) => Ok(*v),
        Toml::Integer(v) => Ok(*v as f64),
        _ => Err(Error::TypeMismatch {
            field: field.to_string(),
            expected: "number",
        }),
    }
}

fn num_at(table: &Table, path: &str, key: &str) -> Result<f64> {
    number(require(table, path, key)?, &join(path, key))
}

fn string_at(table: &Table, key: &str) -> Result<String> {
    match require(table, "", key)? {
        Toml::String(s) => Ok(s.clone()),
        _ => Err(Error::TypeMismatch {
            field: key.to_string(),
            expected: "string",
        }),
    }
}

fn table_of<'a>(value: &'a Toml, field: &str) -> Result<&'a Table> {
    value.as_table().ok_or_else(|| Error::TypeMismatch {
        field: field.to_string(),
        expected: "table",
    })
}

fn vec3_of(value: &Toml, field: &str) -> Result<Vec3> {
    let table = table_of(value, field)?;
    Ok(Vec3::new(
        num_at(table, field, "x")?,
        num_at(table, field, "y")?,
        num_at(table, field, "z")?,
    ))
}

fn vec3_at(root: &Table, key: &str) -> Result<Vec3> {
    vec3_of(require(root, "", key)?, key)
}

fn named<const N: usize>(value: &Toml, field: &str, keys: [&str; N]) -> Result<[f64; N]> {
    let table = table_of(value, field)?;
    let mut out = [0.0; N];
    for (slot, key) in out.iter_mut().zip(keys) {
        *slot = num_at(table, field, key)?;
    }
    Ok(out)
}

fn optional<T>(
    root: &Table,
    key: &str,
    parse: impl FnOnce(&Toml) -> Result<T>,
) -> Result<Option<T>> {
    root.get(key).map(parse).transpose()
}

fn thrusters_at(root: &Table) -> Result<Vec<Vec3>> {
    let value = require(root, "", "thrusters")?;
    let list = value.as_array().ok_or_else(|| Error::TypeMismatch {
        field: "thrusters".to_string(),
        expected: "array of tables",
    })?;
    list.iter()
        .enumerate()
        .map(|(i, item)| vec3_of(item, &format!("thrusters[{i}]")))
        .collect()
}

fn control_method_at(root: &Table) -> Result<ControlMethod> {
    match require(root, "", "control_method")? {
        Toml::Integer(0) => Ok(ControlMethod::Thrust),
        Toml::Integer(1) => Ok(ControlMethod::AngularVelocity),
        Toml::Integer(other) => Err(Error::InvalidParameter(format!(
            "control_method must be 0 (thrust) or 1 (angular velocity), got {other}"
        ))),
        Toml::String(s) if s == "thrust" => Ok(ControlMethod::Thrust),
        Toml::String(s) if s == "angular_velocity" => Ok(ControlMethod::AngularVelocity),
        Toml::String(s) => Err(Error::InvalidParameter(format!(
            "unknown control_method `{s}`"
        ))),
        _ => Err(Error::TypeMismatch {
            field: "control_method".to_string(),
            expected: "integer or string",
        }),
    }
}

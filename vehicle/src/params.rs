use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{
    ControlMethod, PrimaryConfig, ADDED_MASS_KEYS, INERTIA_KEYS, LINEAR_DRAG_KEYS,
    QUADRATIC_DRAG_KEYS,
};
use crate::constants::{Constants, D135, D180, D30, D45, D90};
use crate::error::{Error, Result};
use crate::math::Vec3;

/// A value destined for the template.
///
/// The `Display` impl is the single formatting rule for generated output:
/// floats print with exactly three fixed decimals (never scientific
/// notation), integers and booleans print in their plain form, strings are
/// inserted verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Float(f64),
    Int(i64),
    Bool(bool),
    Str(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Float(v) => write!(f, "{v:.3}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Str(s) => f.write_str(s),
        }
    }
}

/// Flat name → value mapping consumed by the substituter.
pub type ParamMap = BTreeMap<String, Value>;

/// Convert thrust to propeller angular velocity.
///
/// Defined by Fossen in "Guidance and Control of Ocean Vehicles", p. 246:
/// `ω = sqrt(T / (ρ · Ct · D⁴))`.
pub fn thrust_to_ang_vel(
    thrust: f64,
    propeller_diameter: f64,
    thrust_coefficient: f64,
    fluid_density: f64,
) -> Result<f64> {
    if thrust < 0.0 {
        return Err(Error::InvalidParameter(format!(
            "thrust must be non-negative, got {thrust}"
        )));
    }
    if thrust_coefficient < 0.0 {
        return Err(Error::InvalidParameter(format!(
            "thrust_coefficient must be non-negative, got {thrust_coefficient}"
        )));
    }
    Ok((thrust / (fluid_density * thrust_coefficient * propeller_diameter.powi(4))).sqrt())
}

/// Propeller link and servo parameters shared by every thruster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThrusterHardware {
    /// Propeller collision box, already formatted as an SDF size triple.
    pub propeller_size: String,
    pub propeller_mass: f64,
    pub propeller_inertia: [f64; 3],
    pub propeller_diameter: f64,
    pub thrust_coefficient: f64,
    /// Largest thrust a single thruster can produce (N).
    pub max_thrust: f64,
    /// Servo PWM endpoints the autopilot maps control output onto.
    pub servo_range: (f64, f64),
    pub control_offset: f64,
}

impl Default for ThrusterHardware {
    fn default() -> Self {
        Self {
            propeller_size: "0.1 0.02 0.01".to_string(),
            propeller_mass: 0.002,
            propeller_inertia: [0.001, 0.001, 0.001],
            propeller_diameter: 0.1,
            thrust_coefficient: 0.02,
            max_thrust: 50.0,
            servo_range: (1100.0, 1900.0),
            control_offset: -0.5,
        }
    }
}

/// Position and command topic for one thruster joint.
#[derive(Debug, Clone)]
pub struct ThrusterParams {
    /// 1-based index matching the joint names in the template.
    pub index: usize,
    pub position: Vec3,
    pub topic: String,
}

impl ThrusterParams {
    fn new(index: usize, position: Vec3, model_name: &str, method: ControlMethod) -> Self {
        let topic = format!(
            "/model/{model_name}/joint/thruster{index}_joint/cmd_{}",
            method.topic_suffix()
        );
        Self {
            index,
            position,
            topic,
        }
    }
}

/// The complete, immutable parameter set for one model. Derived once from a
/// [`PrimaryConfig`] and consumed only through [`ModelParams::values`].
#[derive(Debug, Clone)]
pub struct ModelParams {
    pub model_name: String,
    pub mass: f64,
    /// Collision box used by the buoyancy plugin; the height is sized so the
    /// displaced volume matches the adjusted mass.
    pub collision: Vec3,
    pub center_of_mass: Vec3,
    pub center_of_volume: Vec3,
    pub inertia: [f64; 3],
    pub linear_drag: [f64; 6],
    pub quadratic_drag: [f64; 6],
    pub added_mass: [f64; 6],
    pub default_current: Vec3,
    pub control: ControlMethod,
    pub cw_control_multiplier: f64,
    pub ccw_control_multiplier: f64,
    pub thrusters: Vec<ThrusterParams>,
    pub hardware: ThrusterHardware,
    pub constants: Constants,
}

impl ModelParams {
    /// Derive the full parameter set from the primary config.
    pub fn derive(
        config: &PrimaryConfig,
        constants: &Constants,
        hardware: &ThrusterHardware,
    ) -> Result<Self> {
        config.validate()?;

        let rho = constants.fluid_density;
        let bb = config.bounding_box;
        let displaced_mass = config.mass + config.buoyancy_adjustment;
        let collision = Vec3::new(bb.x, bb.y, displaced_mass / (bb.x * bb.y * rho));

        let inertia = match config.inertia {
            Some(inertia) => inertia,
            None => cuboid_inertia(config.mass, collision),
        };

        let quadratic_drag = match config.quadratic_drag {
            Some(drag) => drag,
            None => quadratic_drag_from_box(bb, constants),
        };

        let (cw, ccw) = control_multipliers(config.control_method, hardware, rho)?;

        let thrusters = config
            .thrusters
            .iter()
            .enumerate()
            .map(|(i, &position)| {
                ThrusterParams::new(i + 1, position, &config.model_name, config.control_method)
            })
            .collect();

        Ok(Self {
            model_name: config.model_name.clone(),
            mass: config.mass,
            collision,
            center_of_mass: config.center_of_mass,
            center_of_volume: config.center_of_volume,
            inertia,
            linear_drag: config.linear_drag.unwrap_or([0.0; 6]),
            quadratic_drag,
            added_mass: config.added_mass.unwrap_or([0.0; 6]),
            default_current: config.default_current.unwrap_or_default(),
            control: config.control_method,
            cw_control_multiplier: cw,
            ccw_control_multiplier: ccw,
            thrusters,
            hardware: hardware.clone(),
            constants: *constants,
        })
    }

    /// Flatten into the name → value mapping the substituter consumes.
    ///
    /// Constants go in first; derived values overwrite them on any name
    /// collision (most specific wins).
    pub fn values(&self) -> ParamMap {
        let mut map = ParamMap::new();

        map.insert(
            "fluid_density".to_string(),
            const_value(self.constants.fluid_density),
        );
        map.insert("d180".to_string(), const_value(D180));
        map.insert("d90".to_string(), const_value(D90));
        map.insert("d45".to_string(), const_value(D45));
        map.insert("d30".to_string(), const_value(D30));
        map.insert("d135".to_string(), const_value(D135));

        // The template uses the model name as an XML attribute value.
        map.insert(
            "model_name".to_string(),
            Value::Str(format!("\"{}\"", self.model_name)),
        );
        map.insert("mass".to_string(), Value::Float(self.mass));

        insert_vec3(&mut map, "collision", self.collision);
        insert_vec3(&mut map, "center_of_mass", self.center_of_mass);
        insert_vec3(&mut map, "center_of_volume", self.center_of_volume);
        insert_named(&mut map, &INERTIA_KEYS, &self.inertia);
        insert_named(&mut map, &LINEAR_DRAG_KEYS, &self.linear_drag);
        insert_named(&mut map, &QUADRATIC_DRAG_KEYS, &self.quadratic_drag);
        insert_named(&mut map, &ADDED_MASS_KEYS, &self.added_mass);
        insert_vec3(&mut map, "default_current", self.default_current);

        map.insert(
            "use_angvel_cmd".to_string(),
            Value::Bool(self.control == ControlMethod::AngularVelocity),
        );
        map.insert(
            "cw_control_multiplier".to_string(),
            Value::Float(self.cw_control_multiplier),
        );
        map.insert(
            "ccw_control_multiplier".to_string(),
            Value::Float(self.ccw_control_multiplier),
        );

        let hw = &self.hardware;
        map.insert(
            "propeller_size".to_string(),
            Value::Str(hw.propeller_size.clone()),
        );
        map.insert("propeller_mass".to_string(), Value::Float(hw.propeller_mass));
        map.insert(
            "propeller_ixx".to_string(),
            Value::Float(hw.propeller_inertia[0]),
        );
        map.insert(
            "propeller_iyy".to_string(),
            Value::Float(hw.propeller_inertia[1]),
        );
        map.insert(
            "propeller_izz".to_string(),
            Value::Float(hw.propeller_inertia[2]),
        );
        map.insert(
            "propeller_diameter".to_string(),
            Value::Float(hw.propeller_diameter),
        );
        map.insert(
            "thrust_coefficient".to_string(),
            Value::Float(hw.thrust_coefficient),
        );
        map.insert("servo_min".to_string(), Value::Float(hw.servo_range.0));
        map.insert("servo_max".to_string(), Value::Float(hw.servo_range.1));
        map.insert("control_offset".to_string(), Value::Float(hw.control_offset));

        for thruster in &self.thrusters {
            let n = thruster.index;
            map.insert(
                format!("thruster{n}_x"),
                Value::Float(thruster.position.x),
            );
            map.insert(
                format!("thruster{n}_y"),
                Value::Float(thruster.position.y),
            );
            map.insert(
                format!("thruster{n}_z"),
                Value::Float(thruster.position.z),
            );
            map.insert(
                format!("thruster{n}_topic"),
                Value::Str(thruster.topic.clone()),
            );
        }

        map
    }
}

// Whole-valued constants print without a fractional part, so @fluid_density
// resolves to `1000` rather than `1000.000`.
fn const_value(v: f64) -> Value {
    if v.fract() == 0.0 {
        Value::Int(v as i64)
    } else {
        Value::Float(v)
    }
}

fn insert_vec3(map: &mut ParamMap, prefix: &str, v: Vec3) {
    map.insert(format!("{prefix}_x"), Value::Float(v.x));
    map.insert(format!("{prefix}_y"), Value::Float(v.y));
    map.insert(format!("{prefix}_z"), Value::Float(v.z));
}

fn insert_named(map: &mut ParamMap, keys: &[&str], values: &[f64]) {
    for (key, value) in keys.iter().zip(values) {
        map.insert((*key).to_string(), Value::Float(*value));
    }
}

// Solid cuboid approximation over the collision box.
fn cuboid_inertia(mass: f64, dims: Vec3) -> [f64; 3] {
    let (x2, y2, z2) = (dims.x * dims.x, dims.y * dims.y, dims.z * dims.z);
    [
        mass / 12.0 * (y2 + z2),
        mass / 12.0 * (x2 + z2),
        mass / 12.0 * (x2 + y2),
    ]
}

// Quadratic drag estimated from the bounding-box cross-sections.
fn quadratic_drag_from_box(bb: Vec3, c: &Constants) -> [f64; 6] {
    let rho = c.fluid_density;
    let angular = -0.5 * c.cd_angular * rho;
    [
        -0.5 * bb.y * bb.z * c.cd_forward * rho,
        -0.5 * bb.x * bb.z * c.cd_lateral * rho,
        -0.5 * bb.x * bb.y * c.cd_lateral * rho,
        angular,
        angular,
        angular,
    ]
}

fn control_multipliers(
    method: ControlMethod,
    hw: &ThrusterHardware,
    fluid_density: f64,
) -> Result<(f64, f64)> {
    match method {
        ControlMethod::AngularVelocity => {
            let ang_vel = thrust_to_ang_vel(
                hw.max_thrust,
                hw.propeller_diameter,
                hw.thrust_coefficient,
                fluid_density,
            )?;
            Ok((-2.0 * ang_vel, 2.0 * ang_vel))
        }
        // Force direction comes from the propeller orientation in the SDF,
        // so both spin directions get the same positive gain.
        ControlMethod::Thrust => Ok((2.0 * hw.max_thrust, 2.0 * hw.max_thrust)),
    }
}

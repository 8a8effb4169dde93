//! Vehicle parameter derivation and SDF template substitution.
//!
//! This crate intentionally avoids any I/O. It exposes a simple config
//! schema the generator binary can load from a TOML document, derives the
//! full parameter set the simulator model needs, and resolves `@name`
//! placeholders in a template against that set.

mod math;
pub use math::Vec3;

mod error;
pub use error::{Error, Result};

mod constants;
pub use constants::{Constants, D135, D180, D30, D45, D90};

mod config;
pub use config::{ControlMethod, PrimaryConfig};

mod params;
pub use params::{thrust_to_ang_vel, ModelParams, ParamMap, ThrusterHardware, ThrusterParams, Value};

mod template;
pub use template::substitute;

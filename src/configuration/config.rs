//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – engine options (integrator, opening angle)
//! - [`ParametersConfig`] – numerical parameters
//! - [`DomainConfig`]     – root quadtree extent
//! - [`BodyConfig`]       – initial state for each explicit body
//! - [`DiscConfig`]       – generated test-particle disc
//! - [`ScenarioConfig`]   – top-level wrapper used to load from YAML
//!
//! # YAML format
//! An example scenario YAML matching these types:
//!
//! ```yaml
//! engine:
//!   integrator: "yoshida"   # or "rk2" / "hermite"
//!   theta: 0.05
//!
//! parameters:
//!   t_end: 10.0             # total simulation time
//!   h0: 0.01                # fixed step size
//!   seed: 5                 # deterministic seed
//!
//! domain:
//!   half_width: 250.0       # root box is [-250, 250)^2
//!
//! bodies:
//!   - x: [ 0.0, 0.0 ]
//!     v: [ 0.0, 0.0 ]
//!     m: 1.0
//!     radius: 0.005
//!     primary: true
//!
//! disc:
//!   count: 100000
//!   inner_radius: 0.25
//!   outer_radius: 4.25
//!   particle_mass: 1.0e-8
//!   particle_radius: 1.0e-8
//! ```
//!
//! The engine maps this configuration into its runtime scenario
//! representation; an unknown integrator tag fails deserialization with
//! the offending value named in the error.

use serde::Deserialize;

/// Which integrator advances the system.
/// `integrator: "rk2"`, `"yoshida"` or `"hermite"`.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegratorKind {
    #[serde(rename = "rk2")] // 2nd-order midpoint, 2 force walks per step
    Rk2,

    #[serde(rename = "yoshida")] // 4th-order symplectic, 3 force walks per step
    Yoshida,

    #[serde(rename = "hermite")] // 4th-order predictor–corrector, 1 walk once primed
    Hermite,
}

/// High-level engine configuration.
#[derive(Deserialize, Debug)]
pub struct EngineConfig {
    pub integrator: IntegratorKind, // time integrator advancing the system
    pub theta: Option<f64>,         // Barnes–Hut opening angle, default 0.05
}

/// Global numerical parameters for a scenario.
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub t_end: f64, // time end
    pub h0: f64,    // fixed step size
    pub seed: u64,  // deterministic seed to make runs reproducible
}

/// Extent of the root quadtree node.
#[derive(Deserialize, Debug, Clone)]
pub struct DomainConfig {
    pub half_width: f64, // root box is [-half_width, half_width)^2
}

/// Configuration for a single explicit body's initial state.
#[derive(Deserialize, Debug)]
pub struct BodyConfig {
    pub x: Vec<f64>,          // initial position
    pub v: Vec<f64>,          // initial velocity
    pub m: f64,               // mass
    pub radius: f64,          // radius, used for softening and collisions
    pub primary: Option<bool>, // massive-body label, default false
}

/// Configuration for a generated disc of near-massless test particles.
///
/// Particles are placed at uniform radius and angle and given the
/// circular-orbit speed about the first explicit body.
#[derive(Deserialize, Debug, Clone)]
pub struct DiscConfig {
    pub count: usize,         // number of test particles
    pub inner_radius: f64,    // inner edge of the disc
    pub outer_radius: f64,    // outer edge of the disc
    pub particle_mass: f64,   // mass per test particle
    pub particle_radius: f64, // radius per test particle
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,         // engine-level configuration
    pub parameters: ParametersConfig, // global numerical parameters
    pub domain: Option<DomainConfig>, // root tree extent, default 250
    pub bodies: Vec<BodyConfig>,      // explicit bodies, central mass first
    pub disc: Option<DiscConfig>,     // optional generated test-particle disc
}

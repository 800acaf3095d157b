//! Core state types for the N-body simulation.
//!
//! Defines the particle record and the driver-owned system:
//! - `Particle` — kinematic state plus identity, mass, radius, flags
//! - `System`   — the particle arena and the current simulation time `t`
//!
//! The quadtree never stores particle references; it stores indices into
//! `System::particles`.

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone)]
pub struct Particle {
    pub position: NVec2,     // position
    pub velocity: NVec2,     // velocity
    pub acceleration: NVec2, // set by the most recent force evaluation
    pub jerk: NVec2,         // set by the most recent force-and-jerk evaluation
    pub position_pred: NVec2, // Hermite predictor slot, undefined outside a step
    pub velocity_pred: NVec2, // Hermite predictor slot, undefined outside a step
    pub id: u64,             // unique, stable for the particle's lifetime
    pub mass: f64,           // mass > 0
    pub radius: f64,         // radius > 0, doubles as the softening core
    pub is_primary: bool,    // cosmetic label on massive bodies
    pub mark_for_deletion: bool, // transient within collision resolution
}

impl Particle {
    pub fn new(position: NVec2, velocity: NVec2, mass: f64, radius: f64, id: u64, is_primary: bool) -> Self {
        Self {
            position,
            velocity,
            acceleration: NVec2::zeros(),
            jerk: NVec2::zeros(),
            position_pred: NVec2::zeros(),
            velocity_pred: NVec2::zeros(),
            id,
            mass,
            radius,
            is_primary,
            mark_for_deletion: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct System {
    pub particles: Vec<Particle>, // collection of particles, indexed by the tree
    pub t: f64,                   // time
}

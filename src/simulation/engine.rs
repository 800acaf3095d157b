//! High-level runtime engine settings.
//!
//! Selects the time integrator and the Barnes–Hut opening angle used when
//! building and running a `Scenario`. Threaded explicitly through the
//! driver instead of living in a process-wide global.

use crate::configuration::config::IntegratorKind;

#[derive(Debug, Clone)]
pub struct Engine {
    pub integrator: IntegratorKind, // rk2, yoshida or hermite
    pub theta: f64,                 // Barnes–Hut opening angle
}

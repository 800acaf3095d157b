//! Numerical parameters for the simulation.
//!
//! `Parameters` holds runtime settings:
//! - integration step size and end time,
//! - the seed for deterministic disc generation.

#[derive(Debug, Clone)]
pub struct Parameters {
    pub t_end: f64, // time end
    pub h0: f64,    // step size
    pub seed: u64,  // deterministic seed
}

//! Fixed-step time integrators for the N-body system.
//!
//! Three schemes, all driven by the Barnes–Hut force kernels and a tree
//! whose center-of-mass data was refreshed at the start of the tick:
//! - `rk2_step`     — 2nd-order midpoint method, 2 force walks
//! - `yoshida_step` — 4th-order symplectic composition, 3 force walks
//! - `hermite_step` — 4th-order predictor–corrector using acceleration
//!   and jerk, 1 force walk per step once primed
//!
//! Every particle sweep is data-parallel; a worker writes only to its own
//! particle, and force evaluations against the shared arena are collected
//! before any write-back.

use rayon::prelude::*;

use crate::simulation::forces::{
    barnes_hut_force, get_acceleration, get_acceleration_and_jerk,
};
use crate::simulation::quadtree::QuadTree;
use crate::simulation::states::{NVec2, Particle};

/// Advance all particles by one RK2 (midpoint) step.
///
/// Evaluates a0 at the current state, forms the provisional midpoint
/// `x + v dt + a0 dt^2 / 2` on a scratch copy, evaluates a1 there against
/// the un-rebuilt tree, then applies `v += (a0 + a1) dt / 2` and moves the
/// particle to the midpoint position. Leaves `acceleration = a1`.
pub fn rk2_step(particles: &mut [Particle], tree: &QuadTree, theta: f64, dt: f64) {
    get_acceleration(particles, tree, theta);

    let updates: Vec<(NVec2, NVec2, NVec2)> = {
        let shared: &[Particle] = particles;
        shared
            .par_iter()
            .map(|p| {
                let mut mid = p.clone();

                // First half step: provisional midpoint position
                mid.position += p.velocity * dt + p.acceleration * (0.5 * dt * dt);

                // Intermediate acceleration at the midpoint, same tree
                let a1 = barnes_hut_force(&mid, tree, shared, theta);

                // Second half step
                let velocity = p.velocity + (a1 + p.acceleration) * (0.5 * dt);
                (mid.position, velocity, a1)
            })
            .collect()
    };

    particles
        .par_iter_mut()
        .zip(updates)
        .for_each(|(p, (position, velocity, accel))| {
            p.position = position;
            p.velocity = velocity;
            p.acceleration = accel;
        });
}

/// Drift: advance positions by the current velocities.
pub fn drift(particles: &mut [Particle], dt: f64) {
    particles.par_iter_mut().for_each(|p| {
        p.position += p.velocity * dt;
    });
}

/// Kick: advance velocities by the current accelerations.
pub fn kick(particles: &mut [Particle], dt: f64) {
    particles.par_iter_mut().for_each(|p| {
        p.velocity += p.acceleration * dt;
    });
}

/// Advance all particles by one Yoshida 4th-order step.
///
/// Symplectic and time-reversible; composed of three kick stages
/// bracketed by four drifts with the standard `w0`/`w1` weights.
pub fn yoshida_step(particles: &mut [Particle], tree: &QuadTree, theta: f64, dt: f64) {
    let cbrt2 = 2.0_f64.cbrt();
    let w0 = -cbrt2 / (2.0 - cbrt2);
    let w1 = 1.0 / (2.0 - cbrt2);

    // Drift weights
    let c1 = w1 / 2.0;
    let c2 = (w0 + w1) / 2.0;
    let c3 = c2;
    let c4 = c1;

    // Kick weights
    let d1 = w1;
    let d2 = w0;
    let d3 = w1;

    // First stage
    drift(particles, c1 * dt);
    get_acceleration(particles, tree, theta);
    kick(particles, d1 * dt);

    // Second stage
    drift(particles, c2 * dt);
    get_acceleration(particles, tree, theta);
    kick(particles, d2 * dt);

    // Third stage
    drift(particles, c3 * dt);
    get_acceleration(particles, tree, theta);
    kick(particles, d3 * dt);

    drift(particles, c4 * dt);
}

/// Advance all particles by one Hermite 4th-order predictor–corrector step.
///
/// Requires `acceleration` and `jerk` to hold the values of the previous
/// force evaluation (prime once before the first step). Stages:
///
/// 1. Predictor: `x_p = x + v dt + a dt^2/2 + j dt^3/6`,
///    `v_p = v + a dt + j dt^2/2`.
/// 2. Evaluator: swap (x, v) with the predicted slots, save (a0, j0),
///    evaluate fresh (a1, j1) at the predicted state, swap back.
/// 3. Corrector: `v += (a0 + a1) dt/2 + (j0 - j1) dt^2/12`,
///    `x += (v_old + v_new) dt/2 + (a0 - a1) dt^2/12`.
///
/// Leaves `acceleration = a1`, `jerk = j1` for the next predictor.
pub fn hermite_step(particles: &mut [Particle], tree: &QuadTree, theta: f64, dt: f64) {
    // Predictor
    particles.par_iter_mut().for_each(|p| {
        p.position_pred = p.position
            + p.velocity * dt
            + p.acceleration * (0.5 * dt * dt)
            + p.jerk * (dt * dt * dt / 6.0);

        p.velocity_pred = p.velocity + p.acceleration * dt + p.jerk * (0.5 * dt * dt);
    });

    // Evaluator: force walk must see the predicted state
    particles.par_iter_mut().for_each(|p| {
        std::mem::swap(&mut p.position, &mut p.position_pred);
        std::mem::swap(&mut p.velocity, &mut p.velocity_pred);
    });

    let old_derivs: Vec<(NVec2, NVec2)> = particles
        .par_iter()
        .map(|p| (p.acceleration, p.jerk))
        .collect();

    get_acceleration_and_jerk(particles, tree, theta);

    // Corrector
    particles
        .par_iter_mut()
        .zip(old_derivs)
        .for_each(|(p, (a0, j0))| {
            let a1 = p.acceleration;
            let j1 = p.jerk;

            // Back to the pre-step state
            std::mem::swap(&mut p.position, &mut p.position_pred);
            std::mem::swap(&mut p.velocity, &mut p.velocity_pred);

            let v_old = p.velocity;

            p.velocity = v_old + (a0 + a1) * (0.5 * dt) + (j0 - j1) * (dt * dt / 12.0);

            p.position = p.position + (v_old + p.velocity) * (0.5 * dt) + (a0 - a1) * (dt * dt / 12.0);
        });
}

//! Gravity kernels for the n-body engine.
//!
//! Defines the pairwise force/jerk kernels and the Barnes–Hut tree walks
//! that consume the quadtree's monopole data, plus the data-parallel
//! drivers that refresh every particle's accumulators:
//! - `force` / `force_and_jerk` — softened two-body kernels
//! - `barnes_hut_force` / `barnes_hut_force_and_jerk` — recursive walks
//! - `get_acceleration` / `get_acceleration_and_jerk` — one walk per
//!   particle, parallel across particles
//!
//! The walks read the tree and the particle arena immutably; results are
//! collected into a buffer and written back in a second parallel pass, so
//! no worker ever reads state another worker is mutating.

use rayon::prelude::*;

use crate::simulation::quadtree::QuadTree;
use crate::simulation::states::{NVec2, Particle};

/// Gravitational constant.
pub const G: f64 = 1.0;

/// Default Barnes–Hut opening angle, passed by the driver.
pub const THETA: f64 = 0.05;

/// Softened acceleration on `p` due to `q`.
///
/// The effective distance is floored at `p.radius + q.radius` to keep the
/// inverse-cube finite through close encounters.
pub fn force(p: &Particle, q: &Particle) -> NVec2 {
    let diff = p.position - q.position;
    let dist = diff.norm().max(p.radius + q.radius);
    let inv_dist_cubed = 1.0 / (dist * dist * dist);

    diff * (-G * q.mass * inv_dist_cubed)
}

/// Softened acceleration and jerk on `p` due to `q`.
///
/// With `r = p.pos - q.pos`, `v = p.vel - q.vel` and softened distance
/// `d = max(|r|, p.radius + q.radius)`:
///
/// - accel = r * (-G m_q / d^3)
/// - jerk  = v * (-G m_q / d^3) - r * (3 (-G m_q / d^3) (r.v) / d^2)
pub fn force_and_jerk(p: &Particle, q: &Particle) -> (NVec2, NVec2) {
    let r = p.position - q.position;
    let v = p.velocity - q.velocity;
    let dist = r.norm().max(p.radius + q.radius);
    let scale = -G * q.mass / (dist * dist * dist);

    let accel = r * scale;
    let jerk = v * scale - r * (3.0 * scale * r.dot(&v) / (dist * dist));
    (accel, jerk)
}

/// Barnes–Hut acceleration on `p` from the subtree rooted at `tree`.
///
/// A cell is accepted as a single point mass when
/// `s < d * theta * theta_scale`, with `s` the cell width and `d` the
/// distance to the cell's center of mass floored at `2 * p.radius`. The
/// mass-dependent `theta_scale` opens heavy cells more aggressively.
pub fn barnes_hut_force(p: &Particle, tree: &QuadTree, particles: &[Particle], theta: f64) -> NVec2 {
    let mut accel = NVec2::zeros();
    accumulate_force(p, tree, particles, theta, &mut accel);
    accel
}

fn accumulate_force(p: &Particle, node: &QuadTree, particles: &[Particle], theta: f64, accel: &mut NVec2) {
    // A node with no mass cannot contribute
    if node.total_mass == 0.0 {
        return;
    }

    let diff = p.position - node.center_of_mass;
    let dist = diff.norm().max(2.0 * p.radius);
    let s = node.bounds.width;

    if s < dist * theta * node.theta_scale {
        // Acceptable approximation — treat the whole cell as a distant mass
        let inv_r3 = 1.0 / (dist * dist * dist);
        *accel += diff * (-G * node.total_mass * inv_r3);
    } else if let Some(children) = node.children.as_ref() {
        // Too close — recurse into children
        for child in children.iter() {
            accumulate_force(p, child, particles, theta, accel);
        }
    } else {
        for &idx in &node.particles {
            let q = &particles[idx];
            if p.id != q.id {
                *accel += force(p, q);
            }
        }
    }
}

/// Barnes–Hut acceleration and jerk on `p`.
///
/// The accepted-cell jerk term ignores the cell's bulk velocity (the tree
/// does not track a center-of-mass velocity), keeping only the `(r.v)`
/// correction against the target's own velocity. Leaf cells fall back to
/// the exact pair kernel.
pub fn barnes_hut_force_and_jerk(
    p: &Particle,
    tree: &QuadTree,
    particles: &[Particle],
    theta: f64,
) -> (NVec2, NVec2) {
    let mut accel = NVec2::zeros();
    let mut jerk = NVec2::zeros();
    accumulate_force_and_jerk(p, tree, particles, theta, &mut accel, &mut jerk);
    (accel, jerk)
}

fn accumulate_force_and_jerk(
    p: &Particle,
    node: &QuadTree,
    particles: &[Particle],
    theta: f64,
    accel: &mut NVec2,
    jerk: &mut NVec2,
) {
    if node.total_mass == 0.0 {
        return;
    }

    let diff = p.position - node.center_of_mass;
    let dist = diff.norm().max(2.0 * p.radius);
    let s = node.bounds.width;

    if s < dist * theta * node.theta_scale {
        let scale = -G * node.total_mass / (dist * dist * dist);
        *accel += diff * scale;
        *jerk -= diff * (3.0 * scale * diff.dot(&p.velocity) / (dist * dist));
    } else if let Some(children) = node.children.as_ref() {
        for child in children.iter() {
            accumulate_force_and_jerk(p, child, particles, theta, accel, jerk);
        }
    } else {
        for &idx in &node.particles {
            let q = &particles[idx];
            if p.id != q.id {
                let (a, j) = force_and_jerk(p, q);
                *accel += a;
                *jerk += j;
            }
        }
    }
}

/// Refresh every particle's acceleration with one Barnes–Hut walk each.
///
/// Walks run in parallel against the read-only tree; accumulators are
/// written back afterwards.
pub fn get_acceleration(particles: &mut [Particle], tree: &QuadTree, theta: f64) {
    let accels: Vec<NVec2> = {
        let shared: &[Particle] = particles;
        shared
            .par_iter()
            .map(|p| barnes_hut_force(p, tree, shared, theta))
            .collect()
    };

    particles
        .par_iter_mut()
        .zip(accels)
        .for_each(|(p, accel)| p.acceleration = accel);
}

/// Refresh every particle's acceleration and jerk.
pub fn get_acceleration_and_jerk(particles: &mut [Particle], tree: &QuadTree, theta: f64) {
    let derivs: Vec<(NVec2, NVec2)> = {
        let shared: &[Particle] = particles;
        shared
            .par_iter()
            .map(|p| barnes_hut_force_and_jerk(p, tree, shared, theta))
            .collect()
    };

    particles
        .par_iter_mut()
        .zip(derivs)
        .for_each(|(p, (accel, jerk))| {
            p.acceleration = accel;
            p.jerk = jerk;
        });
}

//! Per-tick step driver.
//!
//! Sequences the disjoint phases of one simulation step:
//! migrate-and-recoarsen the tree → re-insert evicted particles →
//! refresh the mass summary → integrate → resolve collisions and compact
//! → recentre on the barycentre. Tree mutation happens only between the
//! data-parallel phases; within a phase the tree is read-only.

use rayon::prelude::*;

use crate::simulation::collisions::check_collisions;
use crate::simulation::engine::Engine;
use crate::simulation::forces::{get_acceleration, get_acceleration_and_jerk};
use crate::simulation::integrator::{hermite_step, rk2_step, yoshida_step};
use crate::simulation::quadtree::{Bounds, QuadTree};
use crate::simulation::states::{NVec2, Particle, System};
use crate::configuration::config::IntegratorKind;

/// Advance the system by one full tick of length `dt`.
///
/// Particles evicted from their leaf are re-inserted from the root; a
/// particle the root refuses has escaped the simulation domain and is
/// dropped. After the integrator and the collision pass the particle
/// vector is compacted and the tree's indices remapped, and finally every
/// position is shifted so the barycentre returns to the origin.
pub fn update_particles(system: &mut System, tree: &mut QuadTree, engine: &Engine, dt: f64) {
    let particles = &mut system.particles;

    // Migrate: evict movers, coarsen underfull interior nodes
    let mut evicted = Vec::new();
    tree.update_particles(particles, &mut evicted);

    // Re-insert from the root; failures have left the domain
    let mut escaped = false;
    for idx in evicted {
        if !tree.insert(idx, particles) {
            particles[idx].mark_for_deletion = true;
            escaped = true;
        }
    }
    if escaped {
        compact(particles, tree);
    }

    // Refresh the monopole summary for this tick's force walks
    tree.calculate_com(particles);

    match engine.integrator {
        IntegratorKind::Rk2 => rk2_step(particles, tree, engine.theta, dt),
        IntegratorKind::Yoshida => yoshida_step(particles, tree, engine.theta, dt),
        IntegratorKind::Hermite => hermite_step(particles, tree, engine.theta, dt),
    }

    check_collisions(particles, tree, dt);
    compact(particles, tree);

    recenter(particles, &tree.bounds);

    system.t += dt;
}

/// Prime the force accumulators before the first step.
///
/// Hermite's predictor reads the previous step's acceleration and jerk,
/// so a fresh system needs one evaluation before its first tick.
pub fn prime_forces(system: &mut System, tree: &QuadTree, engine: &Engine) {
    match engine.integrator {
        IntegratorKind::Hermite => {
            get_acceleration_and_jerk(&mut system.particles, tree, engine.theta)
        }
        _ => get_acceleration(&mut system.particles, tree, engine.theta),
    }
}

/// Drop flagged particles and remap the tree's stored indices.
fn compact(particles: &mut Vec<Particle>, tree: &mut QuadTree) {
    if !particles.iter().any(|p| p.mark_for_deletion) {
        return;
    }

    let mut map = vec![None; particles.len()];
    let mut next = 0;
    for (idx, p) in particles.iter().enumerate() {
        if !p.mark_for_deletion {
            map[idx] = Some(next);
            next += 1;
        }
    }

    particles.retain(|p| !p.mark_for_deletion);
    tree.remap(&map);
}

/// Subtract the barycentre of the in-bounds particles from every position.
///
/// Keeps the system centred for bounds stability; skipped when no
/// in-bounds mass remains.
fn recenter(particles: &mut [Particle], bounds: &Bounds) {
    let (total_mass, weighted) = particles
        .par_iter()
        .filter(|p| bounds.contains(&p.position))
        .map(|p| (p.mass, p.position * p.mass))
        .reduce(
            || (0.0, NVec2::zeros()),
            |a, b| (a.0 + b.0, a.1 + b.1),
        );

    if total_mass == 0.0 {
        return;
    }
    let barycentre = weighted / total_mass;

    particles.par_iter_mut().for_each(|p| {
        p.position -= barycentre;
    });
}

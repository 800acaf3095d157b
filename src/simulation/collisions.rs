//! Continuous collision detection and inelastic merging.
//!
//! Each particle scans a velocity-aware neighbourhood pulled from the
//! quadtree, predicts close approaches over the coming step by sampling
//! the constant-acceleration relative trajectory, and merges on contact.
//! Merged particles keep the combined mass and momentum; the absorbed
//! partner is flagged and compacted out by the driver.
//!
//! The scan is data-parallel with a thread-local scratch list for tree
//! queries. Workers record at most one candidate pair each (directed by
//! `q.id > p.id`, so a pair is examined exactly once); merges are applied
//! after the scan in ascending target order, which makes the outcome
//! independent of thread timing.

use rayon::prelude::*;

use crate::simulation::forces::G;
use crate::simulation::quadtree::{Bounds, QuadTree, MAX_CAPACITY};
use crate::simulation::states::Particle;

/// Outcome of a constant-acceleration close-approach prediction.
#[derive(Debug, Clone, Copy)]
pub struct CollisionPrediction {
    pub will_collide: bool,
    /// Time of first predicted contact, in [0, dt]; `dt` when no contact.
    pub collision_time: f64,
    /// Smallest sampled separation over the step.
    pub min_distance: f64,
}

/// Predict whether `p` and `q` come within contact range during `dt`.
///
/// The relative motion is modelled as `r(t) = r0 + v0 t + a_rel t^2 / 2`
/// with `a_rel` the mutual two-body gravity at `t = 0` (softened at the
/// contact radius). The quadratic is sampled at 11 equally spaced times,
/// then refined with five extra samples around the observed minimum.
/// Pairs already inside `1.1 x` the contact radius collide immediately.
pub fn predict_collision(p: &Particle, q: &Particle, dt: f64) -> CollisionPrediction {
    let r0 = p.position - q.position;
    let v0 = p.velocity - q.velocity;
    let collision_radius = p.radius + q.radius;
    let dist0 = r0.norm();

    if dist0 < 1.1 * collision_radius {
        return CollisionPrediction {
            will_collide: true,
            collision_time: 0.0,
            min_distance: dist0,
        };
    }

    let soft = dist0.max(collision_radius);
    let a_rel = r0 * (-G * (p.mass + q.mass) / (soft * soft * soft));

    let separation = |t: f64| (r0 + v0 * t + a_rel * (0.5 * t * t)).norm();

    // Coarse pass: 11 samples across the step
    let mut min_distance = dist0;
    let mut t_min = 0.0;
    let mut collision_time: Option<f64> = None;

    for k in 0..=10 {
        let t = dt * (k as f64) / 10.0;
        let d = separation(t);
        if d < min_distance {
            min_distance = d;
            t_min = t;
        }
        if collision_time.is_none() && d < collision_radius {
            collision_time = Some(t);
        }
    }

    // Local refinement around the coarse minimum
    for k in -2i32..=2 {
        let t = (t_min + (k as f64) * dt / 20.0).clamp(0.0, dt);
        let d = separation(t);
        if d < min_distance {
            min_distance = d;
        }
        if d < collision_radius && collision_time.map_or(true, |tc| t < tc) {
            collision_time = Some(t);
        }
    }

    CollisionPrediction {
        will_collide: collision_time.is_some(),
        collision_time: collision_time.unwrap_or(dt),
        min_distance,
    }
}

/// Detect and resolve collisions over one step of length `dt`.
///
/// Phase 1 (parallel): every particle queries the tree over a square of
/// half-side `2 r + |v| dt` and keeps the first neighbour predicted to
/// make contact. Phase 2 (after the barrier): merge each surviving pair —
/// combined momentum, volume-conserving radius, victim flagged. The
/// driver compacts the flagged particles afterwards.
pub fn check_collisions(particles: &mut [Particle], tree: &QuadTree, dt: f64) {
    let hits: Vec<(usize, usize)> = {
        let shared: &[Particle] = particles;
        shared
            .par_iter()
            .enumerate()
            .map_init(
                || Vec::with_capacity(MAX_CAPACITY * 5),
                |scratch: &mut Vec<usize>, (i, p)| {
                    let range = 2.0 * p.radius + p.velocity.norm() * dt;
                    let region = Bounds::centered(p.position, range);

                    scratch.clear();
                    tree.query(&region, shared, scratch);

                    for &j in scratch.iter() {
                        let q = &shared[j];
                        // Each pair is handled once, by the smaller id
                        if q.id <= p.id || q.mark_for_deletion || i == j {
                            continue;
                        }
                        if predict_collision(p, q, dt).will_collide {
                            return Some((i, j));
                        }
                    }
                    None
                },
            )
            .flatten_iter()
            .collect()
    };

    for (i, j) in hits {
        if particles[i].mark_for_deletion || particles[j].mark_for_deletion {
            continue;
        }
        merge(particles, i, j);
    }
}

/// Perfectly inelastic merge of `particles[j]` into `particles[i]`.
fn merge(particles: &mut [Particle], i: usize, j: usize) {
    let total_mass = particles[i].mass + particles[j].mass;
    let momentum = particles[i].velocity * particles[i].mass + particles[j].velocity * particles[j].mass;

    let p = &mut particles[i];
    p.velocity = momentum / total_mass;
    p.radius = (total_mass / p.mass).powf(1.0 / 3.0) * p.radius;
    p.mass = total_mass;

    particles[j].mark_for_deletion = true;
}

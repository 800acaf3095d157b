//! Build fully-initialized simulation scenarios from configuration.
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! consumed by the driver:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - system state (`System` with all particles at t = 0)
//! - the root quadtree with every particle inserted and the first
//!   center-of-mass rollup done
//!
//! Explicit bodies come first (central mass, planets), then the optional
//! generated disc of near-massless test particles on circular orbits
//! about the first body.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::configuration::config::{BodyConfig, ScenarioConfig};
use crate::simulation::engine::Engine;
use crate::simulation::forces::{G, THETA};
use crate::simulation::params::Parameters;
use crate::simulation::quadtree::QuadTree;
use crate::simulation::states::{NVec2, Particle, System};

const DEFAULT_HALF_WIDTH: f64 = 250.0;

/// A fully-initialized simulation scenario.
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub system: System,
    pub tree: QuadTree,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Self {
        // Explicit bodies: map `BodyConfig` -> runtime `Particle`
        let mut particles: Vec<Particle> = cfg
            .bodies
            .iter()
            .enumerate()
            .map(|(id, bc): (usize, &BodyConfig)| {
                Particle::new(
                    NVec2::new(bc.x[0], bc.x[1]),
                    NVec2::new(bc.v[0], bc.v[1]),
                    bc.m,
                    bc.radius,
                    id as u64,
                    bc.primary.unwrap_or(false),
                )
            })
            .collect();

        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            t_end: p_cfg.t_end,
            h0: p_cfg.h0,
            seed: p_cfg.seed,
        };

        // Engine (runtime) from EngineConfig
        let e_cfg = cfg.engine;
        let engine = Engine {
            integrator: e_cfg.integrator,
            theta: e_cfg.theta.unwrap_or(THETA),
        };

        // Generated disc: uniform radius/angle, circular-orbit speed
        // about the first explicit body
        if let Some(disc) = &cfg.disc {
            let central_mass = particles.first().map_or(0.0, |p| p.mass);
            let mut rng = StdRng::seed_from_u64(parameters.seed);

            for _ in 0..disc.count {
                let dist = rng.gen_range(disc.inner_radius..disc.outer_radius);
                let angle = rng.gen_range(0.0..std::f64::consts::TAU);
                let position = NVec2::new(dist * angle.cos(), dist * angle.sin());

                let speed = (G * central_mass / dist).sqrt();
                let velocity = NVec2::new(-position.y, position.x) / dist * speed;

                let id = particles.len() as u64;
                particles.push(Particle::new(
                    position,
                    velocity,
                    disc.particle_mass,
                    disc.particle_radius,
                    id,
                    false,
                ));
            }
        }

        // Root tree over the configured domain, all particles inserted
        let half = cfg.domain.as_ref().map_or(DEFAULT_HALF_WIDTH, |d| d.half_width);
        let mut tree = QuadTree::new(-half, -half, 2.0 * half, 2.0 * half, 1);
        for idx in 0..particles.len() {
            tree.insert(idx, &particles);
        }
        tree.calculate_com(&particles);

        let system = System { particles, t: 0.0 };

        Self {
            engine,
            parameters,
            system,
            tree,
        }
    }
}

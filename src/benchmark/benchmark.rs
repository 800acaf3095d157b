use std::time::Instant;

use crate::configuration::config::IntegratorKind;
use crate::simulation::driver::{prime_forces, update_particles};
use crate::simulation::engine::Engine;
use crate::simulation::forces::{get_acceleration, THETA};
use crate::simulation::quadtree::QuadTree;
use crate::simulation::states::{NVec2, Particle, System};

/// Helper to build a deterministic disc of size `n`, central mass first.
fn make_system(n: usize) -> System {
    let mut particles = Vec::with_capacity(n + 1);

    particles.push(Particle::new(
        NVec2::zeros(),
        NVec2::zeros(),
        1.0,
        0.005,
        0,
        true,
    ));

    for i in 0..n {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        let dist = 0.25 + 3.5 * (0.5 + 0.5 * (i_f * 0.37).sin());
        let angle = i_f * 2.39996; // golden-angle spread
        let position = NVec2::new(dist * angle.cos(), dist * angle.sin());

        let speed = (1.0 / dist).sqrt();
        let velocity = NVec2::new(-position.y, position.x) / dist * speed;

        particles.push(Particle::new(
            position,
            velocity,
            1e-8,
            1e-8,
            (i + 1) as u64,
            false,
        ));
    }

    System { particles, t: 0.0 }
}

/// Helper to build a populated tree over the system.
fn make_tree(system: &System) -> QuadTree {
    let mut tree = QuadTree::new(-250.0, -250.0, 500.0, 500.0, 1);
    for idx in 0..system.particles.len() {
        tree.insert(idx, &system.particles);
    }
    tree.calculate_com(&system.particles);
    tree
}

/// Time one Barnes–Hut force pass across system sizes and opening angles.
pub fn bench_force() {
    let ns = [200, 400, 800, 1600, 3200, 6400, 12800];
    let thetas = [0.05, 0.5, 1.0];

    for n in ns {
        let mut system = make_system(n);
        let tree = make_tree(&system);

        // Warm up
        get_acceleration(&mut system.particles, &tree, THETA);

        print!("N = {n:6}");
        for theta in thetas {
            let t0 = Instant::now();
            get_acceleration(&mut system.particles, &tree, theta);
            let elapsed = t0.elapsed().as_secs_f64();
            print!("  theta = {theta:4.2}: {elapsed:9.6} s");
        }
        println!();
    }
}

/// Time one full driver tick for each integrator across system sizes.
pub fn bench_step() {
    let ns = [200, 400, 800, 1600, 3200, 6400];
    let steps = 5;
    let dt = 0.001;

    let kinds = [
        IntegratorKind::Rk2,
        IntegratorKind::Yoshida,
        IntegratorKind::Hermite,
    ];

    for n in ns {
        print!("N = {n:6}");
        for kind in kinds {
            let mut system = make_system(n);
            let mut tree = make_tree(&system);
            let engine = Engine {
                integrator: kind,
                theta: THETA,
            };

            // Warm-up covers Hermite's priming evaluation
            prime_forces(&mut system, &tree, &engine);
            update_particles(&mut system, &mut tree, &engine, dt);

            let t0 = Instant::now();
            for _ in 0..steps {
                update_particles(&mut system, &mut tree, &engine, dt);
            }
            let per_step = t0.elapsed().as_secs_f64() / steps as f64;
            print!("  {kind:?}: {per_step:9.6} s/step");
        }
        println!();
    }
}

pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use simulation::states::{Particle, System, NVec2};
pub use simulation::quadtree::{Bounds, QuadTree, ALPHA, MASS_REF, MAX_CAPACITY, MAX_DEPTH};
pub use simulation::forces::{
    barnes_hut_force, barnes_hut_force_and_jerk, force, force_and_jerk, get_acceleration,
    get_acceleration_and_jerk, G, THETA,
};
pub use simulation::integrator::{drift, hermite_step, kick, rk2_step, yoshida_step};
pub use simulation::collisions::{check_collisions, predict_collision, CollisionPrediction};
pub use simulation::driver::{prime_forces, update_particles};
pub use simulation::engine::Engine;
pub use simulation::params::Parameters;
pub use simulation::scenario::Scenario;

pub use configuration::config::{
    BodyConfig, DiscConfig, DomainConfig, EngineConfig, IntegratorKind, ParametersConfig,
    ScenarioConfig,
};

pub use benchmark::benchmark::{bench_force, bench_step};

pub mod simulation;

pub use simulation::{step, ContactEvent, ExternalLoad, Simulation, SimulationConfig};

pub mod states;
pub mod params;
pub mod engine;
pub mod forces;
pub mod integrator;
pub mod constraint;
pub mod collision;
pub mod growth;
pub mod scenario;

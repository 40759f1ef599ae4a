//! Lifecycle controller and fixed hook ordering

mod controller;
mod phase;

pub use controller::{EXIT_SEQUENCE, INIT_SEQUENCE, LifecycleController, SequenceReport};
pub use phase::LifecyclePhase;

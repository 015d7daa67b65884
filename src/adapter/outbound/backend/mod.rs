//! Solver backends for the general convex projector.

mod augmented;

pub use augmented::{AugmentedLagrangianBackend, AugmentedLagrangianConfig};

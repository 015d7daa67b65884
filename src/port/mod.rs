//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the capabilities the projection engine needs but does not own.
//! Callers choose an implementation at construction time and inject it.
//!
//! # Available Ports
//!
//! - [`Oracle`] - Linear minimization over a polytope
//! - [`SolverBackend`] - Box-bounded constrained nonlinear minimization

pub mod outbound;

pub use outbound::backend::{BackendSolution, NonlinearProblem, SolverBackend};
pub use outbound::oracle::{FnOracle, Oracle};

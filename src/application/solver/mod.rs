//! Bregman projection engine.
//!
//! - [`bregman`] - KL divergence and gradients
//! - [`closed_form`] - Simplex and box projections
//! - [`general`] - Constraint-list projection through a solver backend
//! - [`frank_wolfe`] - Conditional gradient over an oracle-backed polytope
//! - [`barrier`] - Contraction loop stabilizing Frank-Wolfe near the boundary
//! - [`projector`] - Dispatch over feasible-set representations

pub mod barrier;
pub mod bregman;
pub mod closed_form;
pub mod frank_wolfe;
pub mod general;
pub mod line_search;
pub mod projector;

pub use barrier::{BarrierConfig, BarrierFrankWolfe, ContractedOracle};
pub use bregman::{divergence, gradient, KlDivergence};
pub use closed_form::{project_box, project_simplex};
pub use frank_wolfe::{FrankWolfe, FrankWolfeConfig};
pub use general::GeneralProjector;
pub use line_search::{LineSearch, LineSearchKind};
pub use projector::Projector;

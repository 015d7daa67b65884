//! Value types shared by the projection engine.

pub mod constraint;
pub mod feasible;
pub mod price;
pub mod result;
pub mod trade;

pub use constraint::{
    Constraint, ConstraintKind, ConstraintSense, LinearConstraint, VariableBounds,
};
pub use feasible::FeasibleSet;
pub use result::{
    BarrierResult, IterationRecord, OptimizationResult, Projection, ProjectionMethod,
    SolveStatus,
};
pub use trade::{Side, TradeLeg, TradePlan};

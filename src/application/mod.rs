//! Application layer: the projection engine and the trade translator.

pub mod solver;
pub mod trade;

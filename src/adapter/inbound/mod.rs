//! Inbound adapters: how callers drive the projection engine.

pub mod cli;

//! Cohere - Bregman projection of prediction-market prices.
//!
//! Market prices for related outcomes are often incoherent: they cannot all
//! be probabilities of one consistent world. This crate projects a price
//! vector `theta` onto a set of coherent prices `M` under the KL divergence,
//! reports the divergence as the arbitrage profit, and translates the
//! projection into LMSR trades.
//!
//! # Architecture
//!
//! - [`domain`] - Value types: constraints, feasible sets, results, trade plans
//! - [`port`] - Capability traits: linear minimization oracles, solver backends
//! - [`application`] - Divergence, closed-form and general projectors,
//!   Frank-Wolfe, barrier stabilization, trade translation
//! - [`adapter`] - Concrete oracles, the augmented-Lagrangian backend, CLI
//! - [`infrastructure`] - TOML configuration and logging
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `highs` (default) - Integer-program oracle backed by HiGHS
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use cohere::adapter::outbound::backend::AugmentedLagrangianBackend;
//! use cohere::adapter::outbound::oracle::ExclusiveOracle;
//! use cohere::application::solver::{FrankWolfeConfig, Projector};
//! use cohere::domain::FeasibleSet;
//!
//! let projector = Projector::new(
//!     FrankWolfeConfig::default(),
//!     Arc::new(AugmentedLagrangianBackend::default()),
//! );
//! let set = FeasibleSet::Polytope(Arc::new(ExclusiveOracle));
//! let projection = projector.project(&[0.35, 0.40, 0.35], &set).unwrap();
//!
//! assert!(projection.certified);
//! assert!(projection.profit > 0.0);
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

//! Outbound adapters (driven side).

pub mod backend;
pub mod oracle;

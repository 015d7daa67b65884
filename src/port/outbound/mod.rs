//! Outbound ports implemented by adapters.

pub mod backend;
pub mod oracle;

//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`session`, `payment`, `progress`) so individual
//! components can depend on small focused models, and transition logic stays
//! pure and natively testable.

pub mod payment;
pub mod progress;
pub mod session;

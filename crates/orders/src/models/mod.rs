//! Domain models for the order service.

pub mod session;

pub use session::SessionState;

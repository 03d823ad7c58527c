//! Services for the order workflow.

pub mod email;
pub mod order;

//! Core types for the eshop order service.

pub mod cart;
pub mod email;
pub mod good;
pub mod id;
pub mod order;

pub use cart::Cart;
pub use email::{Email, EmailError};
pub use good::Good;
pub use id::*;
pub use order::Order;

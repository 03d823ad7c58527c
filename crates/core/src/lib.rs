//! Eshop Core - Shared domain types.
//!
//! This crate provides the types shared across the eshop order service:
//! the catalog line item ([`Good`]), the session cart ([`Cart`]), and the
//! persisted checkout record ([`Order`]).
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no SMTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, the cart, and the order entity

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

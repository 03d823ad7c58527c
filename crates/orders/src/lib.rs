//! Eshop order service library.
//!
//! Records shopping-cart contents into session state, converts carts into
//! persisted orders, computes totals, formats plain-text summaries, and
//! sends a confirmation email on successful checkout.
//!
//! # Architecture
//!
//! - [`services::order::OrderWorkflow`] orchestrates cart mutation, totals,
//!   formatting, and the checkout-to-persistence transition
//! - Collaborators are injected through traits: the good catalog, the order
//!   store, and the notification sender
//! - `PostgreSQL` via sqlx for persisted orders and the good catalog
//! - SMTP via lettre for confirmation email, rendered with Askama templates
//!
//! HTTP routing and authentication live in the embedding application; this
//! crate exposes the workflow behind plain async calls.

#![cfg_attr(not(test), forbid(unsafe_code))]
// Collaborator traits are consumed generically within this crate; the auto
// Send bound caveat of async trait methods does not apply.
#![allow(async_fn_in_trait)]

pub mod config;
pub mod db;
pub mod models;
pub mod services;
pub mod state;

//! Image stylization proxy.
//!
//! Accepts an image and a style reference over HTTP, submits them to a
//! remote style-transfer backend (create-then-poll job API, synchronous
//! space call, or binary inference call) and returns a normalized result.

pub mod app_state;
pub mod config;
pub mod error;
pub mod models;
pub mod router;
pub mod routes;
pub mod services;

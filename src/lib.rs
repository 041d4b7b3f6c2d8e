//! Client-side state for the community events app: who is signed in, which
//! events exist and which of them the member is going to, all kept in a
//! string-keyed store.
//!
//! Screens never touch storage keys. They go through [`AppState`], which owns
//! one service per entity:
//!
//! - [`SessionManager`](service::session::SessionManager) for the `user` key,
//! - [`EventCatalog`](service::event::EventCatalog) for the built-in events and `userCreatedEvents`,
//! - [`RsvpTracker`](service::rsvp::RsvpTracker) for `userRsvps`.
//!
//! Each service serialises its own read-modify-write cycles and publishes its
//! current state through a `tokio::sync::watch` channel.

pub mod config;
pub mod db;
pub mod dto;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod service;

pub use config::Config;
pub use errors::{AppError, AppResult};
pub use service::AppState;

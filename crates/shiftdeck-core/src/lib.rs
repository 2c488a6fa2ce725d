//! shiftdeck-core - Core library for Shiftdeck
//!
//! This crate contains the shared models, conflict classification and
//! resolution logic, and the time-clock API client used by all Shiftdeck
//! interfaces (CLI, future desktop).

pub mod api;
pub mod classify;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod resolve;
pub mod service;
pub mod session;
pub mod timefmt;
pub mod util;

pub use error::{Error, Result};
pub use models::{Conflict, ConflictItem, PreviewRow, TimeClockEntry, UserId, WorklogId};

//! Program core module.
//!
//! This module provides the session data model, the favorites list and the
//! filter pipeline that turns a fetched session payload into the
//! day-partitioned, slot-bucketed program handed to the web interface.

pub mod favorites;
pub mod pipeline;
pub mod types;

pub use favorites::Favorites;
pub use pipeline::{build_program, SLOT_STARTS};
pub use types::{
    FilterState, FormatCounts, FormatSelector, Language, ProgramView, Session, SessionFormat,
    Speaker, TimeSlot,
};

//! # Canteen Session
//!
//! The selection state machine of the ordering client: holds the user's
//! in-progress table/time-slot choice, re-fetches availability when the
//! date or window changes, classifies slots against existing
//! reservations, and mirrors the committed selection to durable local
//! storage so a reload does not lose it.
//!
//! The machine itself (pure transitions) lives in
//! `canteen_core::models::selection`; this crate owns the orchestration
//! around it — network fetches with latest-fetch-wins sequencing, the
//! persistence mirror, and the error boundary that turns every failure
//! into a user-visible message.

pub mod mirror;
pub mod session;

pub use mirror::{MirroredSelection, SelectionMirror};
pub use session::SelectionSession;

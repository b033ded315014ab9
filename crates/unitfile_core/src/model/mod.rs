//! Domain model for the record store.
//!
//! # Responsibility
//! - Define the canonical record shape shared by every embedding
//!   application (to-do lists, workout logs).
//!
//! # Invariants
//! - Records are addressed by label; label uniqueness is never assumed here.
//! - Normalization rules live with the record type, not with callers.

pub mod unit;

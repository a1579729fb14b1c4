//! Input mapping: raw key and mouse state to movement flags and actions.
//!
//! # Invariants
//! - Movement is level-triggered (held keys), actions are edge-triggered (one per press).
//! - Camera-rotate keys are ignored outside fixed-angle mode.

pub mod action;
mod state;

pub use action::{Action, Key, UnknownKey};
pub use state::InputState;

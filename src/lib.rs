//! Centy Forms - cascading multi-panel form state and validation engine
//!
//! The engine lives in [`state::forms`]; [`config`] holds the front-end
//! configuration shared with the `centy-forms` binary.

pub mod config;
pub mod state;

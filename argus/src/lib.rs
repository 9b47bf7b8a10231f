//! Argus toolkit library
//!
//! This module exports the internal components of the toolkit binary for
//! testing purposes.

pub mod config;
pub mod menu;
pub mod startup;
pub mod units;

//! # Game Rules
//!
//! The rule book of the encounter system: typed equipment, skills, combatant
//! views, player records, the progression curve, and the balance tables.
//! This crate holds no randomness and performs no I/O beyond loading a
//! balance file; every behaviour that rolls dice lives in `encounter_engine`.

pub mod config;
pub mod entities;
pub mod error;
pub mod mechanics;
pub mod progression;

pub use config::*;
pub use entities::*;
pub use error::*;
pub use mechanics::*;
pub use progression::*;

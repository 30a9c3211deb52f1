//! Dog-bird journal application.
//!
//! Wires the simulation engine to the outside world: a fixed-rate clock
//! thread, the loudness feed, journal persistence, configuration, and
//! logging.

pub mod config;
pub mod control;
pub mod error;
pub mod game_loop;
pub mod journal;
pub mod logging;
pub mod loudness;
pub mod state;

pub use dogbird_core as core;
pub use error::AppError;

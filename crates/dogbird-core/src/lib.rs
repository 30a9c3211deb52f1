//! Core types and definitions for the dog-bird field.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, state snapshots, events, records, and constants.
//! It has no dependency on any runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod record;
pub mod state;
pub mod types;

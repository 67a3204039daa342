//! Core domain types and the simulation state machine.

pub mod bar;
pub mod calendar;
pub mod config;
pub mod config_validation;
pub mod error;
pub mod exit;
pub mod record;
pub mod session;
pub mod summary;

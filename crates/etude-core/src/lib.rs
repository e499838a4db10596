//! Core Etude library (problems, stats, scheduler, runner, editor, config).

pub mod config;
pub mod editor;
pub mod interrupt;
pub mod language;
pub mod logging;
pub mod problems;
pub mod runner;
pub mod scheduler;
pub mod stats;

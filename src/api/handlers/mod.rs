//! API handlers

pub mod tasks;

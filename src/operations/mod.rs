//! Task operations - shared business logic layer
//!
//! This module contains the core business logic for task operations,
//! shared between the CLI and Web API.

pub mod tasks;

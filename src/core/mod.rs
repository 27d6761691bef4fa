//! Core business logic layer
//!
//! This module contains the schedule data model, the conflict checker, the
//! placement mutator and the session that ties them to a backend.

pub mod conflict;
pub mod data;
pub mod mutator;
pub mod notification;
pub mod operations;
pub mod role;
pub mod traits;

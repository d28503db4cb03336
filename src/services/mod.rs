// src/services/mod.rs
//! Agent orchestration and the registration-network boundary.

pub mod agent;
pub mod registrar;

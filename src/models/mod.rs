// src/models/mod.rs
//! Data structures: DID documents, credential claims, wire shapes, and
//! the agent's signing identity.

pub mod credential;
pub mod did;
pub mod identity;

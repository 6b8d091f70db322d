// src/models/mod.rs
//! Data structures shared by the verifier, fetch client and views.

pub mod certificate;
pub mod verification;

// src/services/mod.rs
//! Canonicalization, verification and verification scheduling.

pub mod canonicalizer;
pub mod session;
pub mod verifier;

// src/view/mod.rs
//! Terminal presentation of certificates and fetch errors.

pub mod badge;
pub mod card;
pub mod error_display;

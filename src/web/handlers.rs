//! HTTP handlers organized by endpoint

pub mod health;
pub mod index;
pub mod label;

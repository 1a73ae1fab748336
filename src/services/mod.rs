//! Service layer
//!
//! Services hold the request flows and receive their collaborators through
//! their constructors; handlers stay thin and delegate here.

pub mod label;

pub use label::LabelService;

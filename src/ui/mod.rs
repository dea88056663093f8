//! Terminal output

pub mod json;

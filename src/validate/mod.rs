//! Row validation: field rules, whole-row checks, and failure variants.

pub mod row;
pub mod rules;
pub mod violation;

//! Request and response shapes
//!
//! Every endpoint has a fixed response struct; JSON keys are camelCase.

pub mod category;
pub mod product;
pub mod order;

// common helpers
pub mod bracket;
pub mod config;
pub mod errors;
pub mod report;
pub mod stagnation;

// algorithms
pub mod regula_falsi;
pub mod search;

//! Bracketing root finding with the modified regula falsi method.
//!
//! See [`root_finding::regula_falsi`] for the solver and
//! [`root_finding::search`] for repairing an initial bracket.

pub mod root_finding;

//! Core editor logic - framework-agnostic state, transitions and selectors.

/// Catalog loading
pub mod catalog;
/// Editor state and the transition function
pub mod editor;
/// Pricing policy and display price rounding
pub mod pricing;
/// Read-only projections
pub mod selectors;
/// Editing session lifecycle
pub mod session;
/// Variant sizing and derived names
pub mod sizing;
/// Variants, ingredients and add-ons
pub mod variant;

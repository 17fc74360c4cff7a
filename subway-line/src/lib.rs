//! Topology core for a single transit line.
//!
//! A line is an ordered, non-branching chain of stations joined by directed,
//! weighted segments. This crate keeps that chain valid while segments are
//! inserted (splitting an existing segment when they share an end) and
//! stations are removed (merging the two segments around them).

pub mod config;
pub mod domain;
pub mod line;
pub mod path;
pub mod script;
pub mod store;

//! Assigns supervising staff members to students on external placements.
//!
//! Addresses are resolved to coordinates with a postal-code fallback,
//! driving times come from a routing service with caching and a
//! straight-line degraded mode, and a greedy engine allocates students to
//! staff by a multi-term affinity score under hard caseload caps.

pub mod assign;
pub mod cli;
pub mod config;
pub mod data;
pub mod geo;

//! # quire-core
//!
//! Core types, scope resolution, and error types for Quire.
//!
//! This crate provides the foundational types shared across all Quire crates:
//! - The immutable log entry and its draft/presentation shapes
//! - Closed enums for entity kinds, event kinds, and request status
//! - The scope resolver that turns a search target into typed predicates
//! - Sort and pagination primitives
//! - A per-process monotonic clock for entry timestamps
//! - Dashboard response types
//! - Cross-cutting error types

pub mod clock;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod query;
pub mod responses;
pub mod scope;

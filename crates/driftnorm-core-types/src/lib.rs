//! Core types shared across driftnorm facilities
//!
//! This crate provides foundational types used by the normalization core
//! and its error and logging facilities:
//!
//! - **GroupKind**: typed (group, kind) resource-type key used to scope
//!   which ignore rules apply to a resource
//! - **Schema constants**: canonical field keys and event names for
//!   structured logging

pub mod group_kind;
pub mod schema;

pub use group_kind::GroupKind;

//! # craft-core
//!
//! Core types shared across all autocraft crates.
//!
//! This crate provides:
//! - Entity structs for every artifact in the QA hierarchy (project, raw asset,
//!   DOU, RTM item, test scenario, test case, automated test)
//! - The read-side aggregate tree returned by project lookups
//! - Per-stage draft records, i.e. the shapes a generator must produce
//! - Status enums with state machine transitions
//! - ID prefix constants
//! - The error taxonomy and the uniform response envelope

pub mod drafts;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod responses;

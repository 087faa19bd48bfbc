//! # craft-schema
//!
//! JSON Schema generation, validation, and registry for autocraft.
//!
//! This crate provides:
//! - `SchemaRegistry`: central store of every JSON Schema in the system
//! - The output contract for each structured pipeline stage, used to reject
//!   malformed generator output before anything is written
//! - Schema export for external tooling (`autocraft schema` command)
//!
//! ## Architecture
//!
//! Entity and draft types are defined in `craft-core` with `#[derive(JsonSchema)]`.
//! This crate imports those types and provides the registry and validation layer.

mod error;
mod registry;

pub use error::SchemaError;
pub use registry::{SchemaRegistry, output_schema_name};

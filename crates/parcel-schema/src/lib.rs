//! # parcel-schema
//!
//! JSON Schema registry for every type that crosses the engine boundary.
//!
//! Types are defined in `parcel-core` with `#[derive(JsonSchema)]`; this
//! crate collects their schemas, validates raw JSON against them and serves
//! them to the `parcel schema` command.

mod error;
mod registry;

pub use error::SchemaError;
pub use registry::SchemaRegistry;

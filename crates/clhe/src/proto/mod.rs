//! Protobuf definitions and serialization for CL types.

/// Protobuf for the CL encryption scheme.
pub mod cl;

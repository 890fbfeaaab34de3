//! Audio codec catalog and negotiation
//!
//! This module provides:
//! - The static catalog of supported codec kinds and their priorities
//! - Codec descriptors built from advertised MIME types
//! - Kind-level enabled state shared through the registry
//! - Negotiation of a renderer's MIME types against available encoders

pub mod descriptor;
pub mod kind;
pub mod mime;
pub mod params;
pub mod registry;
pub mod rules;

pub use descriptor::{Codec, CodecStatus};
pub use kind::{CodecKind, CodecSpec, ParamKind, CATALOG};
pub use params::CodecParams;
pub use registry::{CodecEntry, CodecRegistry, CodecSettings};
pub use rules::{Rule, Rules};

//! Encoder kinds, availability probing and resolution
//!
//! Each codec kind lists encoder candidates in order of preference. The
//! resolver asks an [`EncoderProbe`] which candidates can run on the host and
//! builds an [`Encoder`] handle from the first available one.

pub mod kind;
pub mod probe;
pub mod resolver;

pub use kind::{EncoderBackend, EncoderKind};
pub use probe::{EncoderProbe, HostProbe, StaticProbe};
pub use resolver::{Encoder, EncoderResolver};

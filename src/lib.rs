//! stream-codecs - Audio codec negotiation for media-streaming bridges
//!
//! This crate decides which audio encoding to produce for a renderer:
//! it maps advertised MIME types to codec descriptors, ranks them by
//! priority and resolves each one to an encoder available on the host.

pub mod codec;
pub mod config;
pub mod encoder;
pub mod error;
pub mod recorder;

pub use codec::{Codec, CodecKind, CodecParams, CodecRegistry};
pub use config::CodecConfig;
pub use encoder::{Encoder, EncoderBackend, EncoderKind, EncoderProbe, HostProbe, StaticProbe};
pub use error::{CodecError, Result};
pub use recorder::MonitorRecorder;

//! Encoder backends and encoder kinds

use serde::{Deserialize, Serialize};

use crate::codec::CodecKind;

/// Encoder tool backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncoderBackend {
    /// FFmpeg command line tool
    Ffmpeg,
    /// Libav avconv command line tool
    Avconv,
}

impl EncoderBackend {
    /// Get the executable name looked up on the host
    pub fn binary_name(&self) -> &'static str {
        match self {
            EncoderBackend::Ffmpeg => "ffmpeg",
            EncoderBackend::Avconv => "avconv",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            EncoderBackend::Ffmpeg => "FFmpeg",
            EncoderBackend::Avconv => "avconv",
        }
    }

    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ffmpeg" => Some(EncoderBackend::Ffmpeg),
            "avconv" | "libav" => Some(EncoderBackend::Avconv),
            _ => None,
        }
    }
}

impl std::fmt::Display for EncoderBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One encoder candidate: a backend tool producing a given codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncoderKind {
    pub backend: EncoderBackend,
    pub codec: CodecKind,
}

impl EncoderKind {
    pub const fn new(backend: EncoderBackend, codec: CodecKind) -> Self {
        Self { backend, codec }
    }

    /// Audio codec library name passed to the tool
    pub fn codec_name(&self) -> &'static str {
        match self.codec {
            CodecKind::Mp3 => "libmp3lame",
            CodecKind::Wav => "pcm_s16le",
            CodecKind::L16 => "pcm_s16be",
            CodecKind::Aac => "aac",
            CodecKind::Ogg => "libvorbis",
            CodecKind::Flac => "flac",
            CodecKind::Opus => "libopus",
        }
    }

    /// Output container/format name passed to the tool
    pub fn format_name(&self) -> &'static str {
        match self.codec {
            CodecKind::Mp3 => "mp3",
            CodecKind::Wav => "wav",
            CodecKind::L16 => "s16be",
            CodecKind::Aac => "adts",
            CodecKind::Ogg => "ogg",
            CodecKind::Flac => "flac",
            CodecKind::Opus => "opus",
        }
    }
}

impl std::fmt::Display for EncoderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.backend, self.codec.display_name())
    }
}

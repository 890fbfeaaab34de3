//! Codec kinds and the static codec catalog
//!
//! The catalog is an ordered table with one entry per supported audio format:
//! identifier, priority, accepted MIME prefixes, parameter variant and the
//! encoder candidates to try, most preferred first.

use serde::{Deserialize, Serialize};

use super::mime;
use crate::encoder::{EncoderBackend, EncoderKind};

/// Supported audio codec kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodecKind {
    /// MPEG-1 Layer III
    Mp3,
    /// RIFF WAVE container with PCM
    Wav,
    /// Raw big-endian 16-bit linear PCM
    L16,
    /// Advanced Audio Coding (ADTS)
    Aac,
    /// Ogg Vorbis
    Ogg,
    /// Free Lossless Audio Codec
    Flac,
    /// Opus in Ogg
    Opus,
}

/// Which negotiable parameters a codec kind carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// No negotiable parameters
    NoParams,
    /// Encoder bit rate in kbit/s
    BitRate,
    /// Sample rate and channel count embedded in the MIME type
    RatePlusChannels,
}

/// Static description of one codec kind
#[derive(Debug)]
pub struct CodecSpec {
    pub kind: CodecKind,
    /// Stable registry key
    pub identifier: &'static str,
    /// Higher is preferred
    pub priority: i32,
    /// Tag used to name streamed resources
    pub suffix: &'static str,
    /// MIME type used when none is advertised
    pub default_mime_type: &'static str,
    /// Case-insensitive prefixes this kind accepts
    pub accepted_mime_types: &'static [&'static str],
    pub params: ParamKind,
    /// Encoder candidates, most preferred first
    pub encoders: &'static [EncoderKind],
}

impl CodecSpec {
    /// Check whether an advertised MIME type belongs to this kind
    pub fn accepts(&self, mime_type: &str) -> bool {
        mime::matches_prefix(mime_type, self.accepted_mime_types)
    }
}

const fn candidates(codec: CodecKind) -> [EncoderKind; 2] {
    [
        EncoderKind::new(EncoderBackend::Ffmpeg, codec),
        EncoderKind::new(EncoderBackend::Avconv, codec),
    ]
}

static MP3_ENCODERS: [EncoderKind; 2] = candidates(CodecKind::Mp3);
static WAV_ENCODERS: [EncoderKind; 2] = candidates(CodecKind::Wav);
static L16_ENCODERS: [EncoderKind; 2] = candidates(CodecKind::L16);
static AAC_ENCODERS: [EncoderKind; 2] = candidates(CodecKind::Aac);
static OGG_ENCODERS: [EncoderKind; 2] = candidates(CodecKind::Ogg);
static FLAC_ENCODERS: [EncoderKind; 2] = candidates(CodecKind::Flac);
static OPUS_ENCODERS: [EncoderKind; 2] = candidates(CodecKind::Opus);

static MP3: CodecSpec = CodecSpec {
    kind: CodecKind::Mp3,
    identifier: "mp3",
    priority: 18,
    suffix: "mp3",
    default_mime_type: "audio/mp3",
    accepted_mime_types: &["audio/mpeg", "audio/mp3"],
    params: ParamKind::BitRate,
    encoders: &MP3_ENCODERS,
};

static WAV: CodecSpec = CodecSpec {
    kind: CodecKind::Wav,
    identifier: "wav",
    priority: 15,
    suffix: "wav",
    default_mime_type: "audio/wav",
    accepted_mime_types: &["audio/wav", "audio/x-wav"],
    params: ParamKind::NoParams,
    encoders: &WAV_ENCODERS,
};

static AAC: CodecSpec = CodecSpec {
    kind: CodecKind::Aac,
    identifier: "aac",
    priority: 12,
    suffix: "aac",
    default_mime_type: "audio/aac",
    accepted_mime_types: &["audio/aac", "audio/x-aac"],
    params: ParamKind::BitRate,
    encoders: &AAC_ENCODERS,
};

static FLAC: CodecSpec = CodecSpec {
    kind: CodecKind::Flac,
    identifier: "flac",
    priority: 9,
    suffix: "flac",
    default_mime_type: "audio/flac",
    accepted_mime_types: &["audio/flac", "audio/x-flac"],
    params: ParamKind::NoParams,
    encoders: &FLAC_ENCODERS,
};

static OGG: CodecSpec = CodecSpec {
    kind: CodecKind::Ogg,
    identifier: "ogg",
    priority: 6,
    suffix: "ogg",
    default_mime_type: "audio/ogg",
    accepted_mime_types: &["audio/ogg", "audio/x-ogg", "application/ogg"],
    params: ParamKind::BitRate,
    encoders: &OGG_ENCODERS,
};

static OPUS: CodecSpec = CodecSpec {
    kind: CodecKind::Opus,
    identifier: "opus",
    priority: 3,
    suffix: "opus",
    default_mime_type: "audio/opus",
    accepted_mime_types: &["audio/opus", "audio/x-opus"],
    params: ParamKind::BitRate,
    encoders: &OPUS_ENCODERS,
};

static L16: CodecSpec = CodecSpec {
    kind: CodecKind::L16,
    identifier: "l16",
    priority: 0,
    suffix: "pcm16",
    default_mime_type: mime::L16_MIME_TYPE,
    accepted_mime_types: &["audio/l16"],
    params: ParamKind::RatePlusChannels,
    encoders: &L16_ENCODERS,
};

/// Built-in codec catalog, highest priority first
pub static CATALOG: [&CodecSpec; 7] = [&MP3, &WAV, &AAC, &FLAC, &OGG, &OPUS, &L16];

impl CodecKind {
    /// Get the catalog entry for this kind
    pub fn spec(&self) -> &'static CodecSpec {
        match self {
            CodecKind::Mp3 => &MP3,
            CodecKind::Wav => &WAV,
            CodecKind::L16 => &L16,
            CodecKind::Aac => &AAC,
            CodecKind::Ogg => &OGG,
            CodecKind::Flac => &FLAC,
            CodecKind::Opus => &OPUS,
        }
    }

    /// Get all codec kinds, highest priority first
    pub fn all() -> &'static [CodecKind] {
        &[
            Self::Mp3,
            Self::Wav,
            Self::Aac,
            Self::Flac,
            Self::Ogg,
            Self::Opus,
            Self::L16,
        ]
    }

    pub fn identifier(&self) -> &'static str {
        self.spec().identifier
    }

    pub fn priority(&self) -> i32 {
        self.spec().priority
    }

    pub fn suffix(&self) -> &'static str {
        self.spec().suffix
    }

    /// Check whether an advertised MIME type belongs to this kind
    pub fn accepts(&self, mime_type: &str) -> bool {
        self.spec().accepts(mime_type)
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            CodecKind::Mp3 => "MP3",
            CodecKind::Wav => "WAV",
            CodecKind::L16 => "L16",
            CodecKind::Aac => "AAC",
            CodecKind::Ogg => "Ogg Vorbis",
            CodecKind::Flac => "FLAC",
            CodecKind::Opus => "Opus",
        }
    }
}

impl std::fmt::Display for CodecKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

impl std::str::FromStr for CodecKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.identifier() == lowered)
            .ok_or_else(|| format!("Unknown codec: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_ranking() {
        let ranked: Vec<i32> = CodecKind::all().iter().map(|k| k.priority()).collect();
        assert_eq!(ranked, vec![18, 15, 12, 9, 6, 3, 0]);
        assert!(CodecKind::Mp3.priority() > CodecKind::Wav.priority());
        assert!(CodecKind::Opus.priority() > CodecKind::L16.priority());
    }

    #[test]
    fn test_accepts_any_case() {
        let samples = [
            (CodecKind::Mp3, "AUDIO/MP3"),
            (CodecKind::Mp3, "audio/mpeg"),
            (CodecKind::Wav, "Audio/X-Wav"),
            (CodecKind::L16, "audio/L16;rate=44100;channels=2"),
            (CodecKind::Aac, "audio/x-aac"),
            (CodecKind::Ogg, "application/ogg"),
            (CodecKind::Flac, "AUDIO/FLAC"),
            (CodecKind::Opus, "audio/opus"),
        ];
        for (kind, mime) in samples {
            assert!(kind.accepts(mime), "{} should accept {}", kind, mime);
        }
        for kind in CodecKind::all() {
            assert!(!kind.accepts("video/mp4"));
            assert!(!kind.accepts(""));
        }
    }

    #[test]
    fn test_catalog_matches_kinds() {
        assert_eq!(CATALOG.len(), CodecKind::all().len());
        for (spec, kind) in CATALOG.iter().zip(CodecKind::all()) {
            assert_eq!(spec.kind, *kind);
            assert!(std::ptr::eq(*spec, kind.spec()));
            assert_eq!(spec.encoders[0].backend, EncoderBackend::Ffmpeg);
            assert!(spec.encoders.iter().all(|e| e.codec == *kind));
        }
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!("MP3".parse::<CodecKind>(), Ok(CodecKind::Mp3));
        assert_eq!("l16".parse::<CodecKind>(), Ok(CodecKind::L16));
        assert!("wma".parse::<CodecKind>().is_err());
    }
}

//! Negotiable codec parameters

use std::cmp::Ordering;

use serde::Serialize;

use super::kind::ParamKind;

/// Parameter set of a codec descriptor
///
/// Each codec kind declares one variant through its [`ParamKind`]; unset
/// values mean "encoder default".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum CodecParams {
    /// Kinds without negotiable parameters (WAV, FLAC)
    NoParams {},
    /// Bit rate in kbit/s (MP3, AAC, Ogg, Opus)
    BitRate { bit_rate: Option<u32> },
    /// Sample rate in Hz and channel count (L16)
    RatePlusChannels {
        sample_rate: Option<u32>,
        channels: Option<u8>,
    },
}

impl CodecParams {
    /// Unset parameters for a given variant
    pub fn unset(kind: ParamKind) -> Self {
        match kind {
            ParamKind::NoParams => Self::NoParams {},
            ParamKind::BitRate => Self::BitRate { bit_rate: None },
            ParamKind::RatePlusChannels => Self::RatePlusChannels {
                sample_rate: None,
                channels: None,
            },
        }
    }

    pub fn kind(&self) -> ParamKind {
        match self {
            Self::NoParams {} => ParamKind::NoParams,
            Self::BitRate { .. } => ParamKind::BitRate,
            Self::RatePlusChannels { .. } => ParamKind::RatePlusChannels,
        }
    }

    pub fn bit_rate(&self) -> Option<u32> {
        match self {
            Self::BitRate { bit_rate } => *bit_rate,
            _ => None,
        }
    }

    pub fn sample_rate(&self) -> Option<u32> {
        match self {
            Self::RatePlusChannels { sample_rate, .. } => *sample_rate,
            _ => None,
        }
    }

    pub fn channels(&self) -> Option<u8> {
        match self {
            Self::RatePlusChannels { channels, .. } => *channels,
            _ => None,
        }
    }
}

impl PartialOrd for CodecParams {
    /// Bit rates order by magnitude with unset lowest. Rate plus channels
    /// only order when both values move in the same direction. Different
    /// variants never order.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::NoParams {}, Self::NoParams {}) => Some(Ordering::Equal),
            (Self::BitRate { bit_rate: a }, Self::BitRate { bit_rate: b }) => Some(a.cmp(b)),
            (
                Self::RatePlusChannels {
                    sample_rate: rate_a,
                    channels: channels_a,
                },
                Self::RatePlusChannels {
                    sample_rate: rate_b,
                    channels: channels_b,
                },
            ) => match (rate_a.cmp(rate_b), channels_a.cmp(channels_b)) {
                (rate, channels) if rate == channels => Some(rate),
                _ => None,
            },
            _ => None,
        }
    }
}

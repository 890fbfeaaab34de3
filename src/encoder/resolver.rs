//! Encoder resolution - pick the first available candidate of a codec

use tracing::debug;

use super::kind::{EncoderBackend, EncoderKind};
use super::probe::EncoderProbe;
use crate::codec::CodecParams;
use crate::recorder::{RECORDER_CHANNELS, RECORDER_FORMAT, RECORDER_SAMPLE_RATE};

/// Encoder handle produced by the resolver
///
/// Describes how the external transcoding pipeline should invoke the tool.
/// The handle never starts a process itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoder {
    kind: EncoderKind,
    params: CodecParams,
}

impl Encoder {
    /// Build an encoder with the parameters its codec kind requires
    pub fn new(kind: EncoderKind, params: CodecParams) -> Self {
        Self { kind, params }
    }

    pub fn kind(&self) -> EncoderKind {
        self.kind
    }

    pub fn backend(&self) -> EncoderBackend {
        self.kind.backend
    }

    pub fn params(&self) -> CodecParams {
        self.params
    }

    /// Bit rate in kbit/s
    pub fn bit_rate(&self) -> Option<u32> {
        self.params.bit_rate()
    }

    pub fn sample_rate(&self) -> Option<u32> {
        self.params.sample_rate()
    }

    pub fn channels(&self) -> Option<u8> {
        self.params.channels()
    }

    pub fn binary(&self) -> &'static str {
        self.kind.backend.binary_name()
    }

    /// Tool arguments: raw recorder PCM on stdin, encoded stream on stdout
    pub fn args(&self) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "-loglevel".into(),
            "panic".into(),
            "-ac".into(),
            RECORDER_CHANNELS.to_string(),
            "-ar".into(),
            RECORDER_SAMPLE_RATE.to_string(),
            "-f".into(),
            RECORDER_FORMAT.into(),
            "-i".into(),
            "-".into(),
            "-strict".into(),
            "-2".into(),
            "-codec:a".into(),
            self.kind.codec_name().into(),
        ];

        if let Some(bit_rate) = self.bit_rate() {
            args.push("-b:a".to_string());
            args.push(format!("{}k", bit_rate));
        }
        if let Some(sample_rate) = self.sample_rate() {
            args.push("-ar".to_string());
            args.push(sample_rate.to_string());
        }
        if let Some(channels) = self.channels() {
            args.push("-ac".to_string());
            args.push(channels.to_string());
        }

        args.push("-f".to_string());
        args.push(self.kind.format_name().to_string());
        args.push("-".to_string());
        args
    }

    /// Full command line, for diagnostics
    pub fn command_line(&self) -> String {
        std::iter::once(self.binary().to_string())
            .chain(self.args())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Display for Encoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "<Encoder backend=\"{}\" codec=\"{}\"",
            self.kind.backend,
            self.kind.codec_name()
        )?;
        if let Some(bit_rate) = self.bit_rate() {
            write!(f, " bit_rate=\"{}\"", bit_rate)?;
        }
        if let Some(sample_rate) = self.sample_rate() {
            write!(f, " sample_rate=\"{}\"", sample_rate)?;
        }
        if let Some(channels) = self.channels() {
            write!(f, " channels=\"{}\"", channels)?;
        }
        write!(f, ">")
    }
}

/// Scans encoder candidates in declared order
pub struct EncoderResolver<'a> {
    probe: &'a dyn EncoderProbe,
}

impl<'a> EncoderResolver<'a> {
    pub fn new(probe: &'a dyn EncoderProbe) -> Self {
        Self { probe }
    }

    /// Return the first available candidate built with `params`, or `None`
    /// when no candidate is available on this host
    pub fn resolve(&self, candidates: &[EncoderKind], params: CodecParams) -> Option<Encoder> {
        for kind in candidates {
            if self.probe.is_available(*kind) {
                debug!("Resolved encoder: {}", kind);
                return Some(Encoder::new(*kind, params));
            }
            debug!("Encoder unavailable: {}", kind);
        }

        debug!("No available encoder among {} candidates", candidates.len());
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::CodecKind;
    use crate::encoder::StaticProbe;

    const FFMPEG_MP3: EncoderKind = EncoderKind::new(EncoderBackend::Ffmpeg, CodecKind::Mp3);
    const AVCONV_MP3: EncoderKind = EncoderKind::new(EncoderBackend::Avconv, CodecKind::Mp3);

    fn bit_rate(value: u32) -> CodecParams {
        CodecParams::BitRate {
            bit_rate: Some(value),
        }
    }

    #[test]
    fn test_resolve_prefers_first_candidate() {
        let probe = StaticProbe::all();
        let encoder = EncoderResolver::new(&probe)
            .resolve(&[FFMPEG_MP3, AVCONV_MP3], bit_rate(192))
            .unwrap();
        assert_eq!(encoder.kind(), FFMPEG_MP3);
        assert_eq!(encoder.bit_rate(), Some(192));
    }

    #[test]
    fn test_resolve_falls_back() {
        let probe = StaticProbe::none().with_kind(AVCONV_MP3);
        let encoder = EncoderResolver::new(&probe)
            .resolve(&[FFMPEG_MP3, AVCONV_MP3], bit_rate(128))
            .unwrap();
        assert_eq!(encoder.backend(), EncoderBackend::Avconv);
        assert_eq!(encoder.binary(), "avconv");
    }

    #[test]
    fn test_resolve_none_available() {
        let probe = StaticProbe::none();
        let resolver = EncoderResolver::new(&probe);
        assert_eq!(resolver.resolve(&[FFMPEG_MP3, AVCONV_MP3], bit_rate(128)), None);
        assert_eq!(resolver.resolve(&[], bit_rate(128)), None);
    }

    #[test]
    fn test_encoder_args() {
        let encoder = Encoder::new(FFMPEG_MP3, bit_rate(192));
        let args = encoder.args();
        assert_eq!(&args[..2], &["-loglevel", "panic"]);
        assert!(args.windows(2).any(|w| w == ["-codec:a", "libmp3lame"]));
        assert!(args.windows(2).any(|w| w == ["-b:a", "192k"]));
        assert_eq!(&args[args.len() - 3..], &["-f", "mp3", "-"]);
        assert!(encoder.command_line().starts_with("ffmpeg -loglevel panic"));
    }

    #[test]
    fn test_encoder_args_pcm() {
        let kind = EncoderKind::new(EncoderBackend::Ffmpeg, CodecKind::L16);
        let encoder = Encoder::new(
            kind,
            CodecParams::RatePlusChannels {
                sample_rate: Some(48000),
                channels: Some(1),
            },
        );
        let args = encoder.args();
        assert!(args.windows(2).any(|w| w == ["-ar", "48000"]));
        assert!(args.windows(2).any(|w| w == ["-ac", "1"]));
        assert!(!args.iter().any(|a| a == "-b:a"));
        assert_eq!(
            encoder.to_string(),
            "<Encoder backend=\"FFmpeg\" codec=\"pcm_s16be\" sample_rate=\"48000\" channels=\"1\">"
        );
    }
}

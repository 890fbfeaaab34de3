//! MIME type matching and L16 parameter parsing

use std::sync::OnceLock;

use regex::Regex;

/// Canonical MIME type of raw 16-bit linear PCM
pub const L16_MIME_TYPE: &str = "audio/L16";

/// Check whether `mime_type` starts with any of the accepted prefixes,
/// ignoring letter case
///
/// Never fails: empty or unrelated input simply does not match.
pub fn matches_prefix(mime_type: &str, accepted: &[&str]) -> bool {
    let mime_type = mime_type.to_lowercase();
    accepted
        .iter()
        .filter(|prefix| !prefix.is_empty())
        .any(|prefix| mime_type.starts_with(&prefix.to_lowercase()))
}

/// Parameters carried by an L16 MIME type such as
/// `audio/L16;rate=44100;channels=2`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct L16Params {
    pub mime_type: String,
    pub sample_rate: u32,
    pub channels: u8,
}

fn l16_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^(.*?)(?P<mime_type>.*?);(.*?)rate=(?P<sample_rate>.*?);(.*?)channels=(?P<channels>[0-9])",
        )
        .expect("L16 pattern is a valid regex")
    })
}

/// Parse an advertised L16 MIME type
///
/// The literal `rate=` and `channels=` tokens are matched as written. Only a
/// single channel digit is read. Returns `None` when the string does not
/// match or when the rate or channel count is not a positive integer.
pub fn parse_l16(mime_string: &str) -> Option<L16Params> {
    let caps = l16_pattern().captures(mime_string)?;
    let sample_rate: u32 = caps.name("sample_rate")?.as_str().parse().ok()?;
    let channels: u8 = caps.name("channels")?.as_str().parse().ok()?;
    if sample_rate == 0 || channels == 0 {
        return None;
    }

    Some(L16Params {
        mime_type: caps.name("mime_type")?.as_str().to_string(),
        sample_rate,
        channels,
    })
}

/// Render an L16 MIME type with embedded rate and channel count
pub fn format_l16(mime_type: &str, sample_rate: u32, channels: u8) -> String {
    format!("{};rate={};channels={}", mime_type, sample_rate, channels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_match_ignores_case() {
        let accepted = ["audio/mpeg", "audio/mp3"];
        assert!(matches_prefix("AUDIO/MP3", &accepted));
        assert!(matches_prefix("audio/mpeg; charset=binary", &accepted));
        assert!(!matches_prefix("video/mp4", &accepted));
        assert!(!matches_prefix("", &accepted));
        assert!(!matches_prefix("audio/", &accepted));
    }

    #[test]
    fn test_empty_prefix_never_matches() {
        assert!(!matches_prefix("audio/wav", &[""]));
    }

    #[test]
    fn test_parse_l16() {
        let params = parse_l16("audio/L16;rate=44100;channels=2").unwrap();
        assert_eq!(params.mime_type, "audio/L16");
        assert_eq!(params.sample_rate, 44100);
        assert_eq!(params.channels, 2);

        let params = parse_l16("audio/L16;rate=48000;foo=bar;channels=1").unwrap();
        assert_eq!(params.sample_rate, 48000);
        assert_eq!(params.channels, 1);
    }

    #[test]
    fn test_parse_l16_rejects_malformed() {
        assert_eq!(parse_l16("audio/L16;rate=44100"), None);
        assert_eq!(parse_l16("audio/L16"), None);
        assert_eq!(parse_l16("audio/L16;rate=fast;channels=2"), None);
        assert_eq!(parse_l16("audio/L16;rate=0;channels=2"), None);
        assert_eq!(parse_l16("audio/L16;RATE=44100;CHANNELS=2"), None);
        assert_eq!(parse_l16(""), None);
    }

    #[test]
    fn test_format_l16_round_trip() {
        let mime = format_l16(L16_MIME_TYPE, 44100, 2);
        assert_eq!(mime, "audio/L16;rate=44100;channels=2");
        let params = parse_l16(&mime).unwrap();
        assert_eq!(params.mime_type, L16_MIME_TYPE);
        assert_eq!((params.sample_rate, params.channels), (44100, 2));
    }
}

//! Codec descriptor - one negotiated configuration of a codec kind

use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use tracing::debug;

use super::kind::{CodecKind, CodecSpec, ParamKind};
use super::mime;
use super::params::CodecParams;
use super::registry::{CodecRegistry, CodecSettings};
use super::rules::Rules;
use crate::encoder::{Encoder, EncoderProbe, EncoderResolver, HostProbe};
use crate::error::Result;
use crate::recorder::MonitorRecorder;

/// Descriptor of a codec configuration
///
/// Structural fields are fixed at construction. The `enabled` flag belongs to
/// the codec kind: it lives in the registry entry and is shared by every
/// descriptor created from that entry.
#[derive(Debug, Clone)]
pub struct Codec {
    spec: &'static CodecSpec,
    settings: Arc<CodecSettings>,
    mime_type: String,
    params: CodecParams,
    rules: Rules,
}

impl Codec {
    /// Build a descriptor backed by the process-wide registry
    ///
    /// `mime_string` is the MIME type advertised by the renderer. Without it
    /// the kind defaults are used.
    pub fn new(kind: CodecKind, mime_string: Option<&str>) -> Self {
        CodecRegistry::global().create(kind, mime_string)
    }

    pub(crate) fn from_parts(
        spec: &'static CodecSpec,
        settings: Arc<CodecSettings>,
        mime_string: Option<&str>,
    ) -> Self {
        let mut mime_type = spec.default_mime_type.to_string();
        let mut params = CodecParams::unset(spec.params);

        match spec.params {
            ParamKind::RatePlusChannels => {
                // Unparseable strings keep the defaults
                if let Some(parsed) = mime_string.and_then(mime::parse_l16) {
                    mime_type = parsed.mime_type;
                    params = CodecParams::RatePlusChannels {
                        sample_rate: Some(parsed.sample_rate),
                        channels: Some(parsed.channels),
                    };
                }
            }
            ParamKind::NoParams | ParamKind::BitRate => {
                if let Some(advertised) = mime_string.filter(|m| !m.is_empty()) {
                    mime_type = advertised.to_string();
                }
            }
        }

        Self {
            spec,
            settings,
            mime_type,
            params,
            rules: Rules::new(),
        }
    }

    /// Set the encoder bit rate in kbit/s
    ///
    /// Ignored by kinds without bit rate semantics.
    pub fn with_bit_rate(mut self, bit_rate: u32) -> Self {
        match &mut self.params {
            CodecParams::BitRate { bit_rate: current } => *current = Some(bit_rate),
            _ => debug!(
                "Codec {} has no bit rate, ignoring {}",
                self.spec.identifier, bit_rate
            ),
        }
        self
    }

    /// Attach matching rules
    pub fn with_rules(mut self, rules: Rules) -> Self {
        self.rules = rules;
        self
    }

    pub fn kind(&self) -> CodecKind {
        self.spec.kind
    }

    pub fn identifier(&self) -> &'static str {
        self.spec.identifier
    }

    pub fn priority(&self) -> i32 {
        self.spec.priority
    }

    pub fn suffix(&self) -> &'static str {
        self.spec.suffix
    }

    /// MIME type without embedded parameters
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Externally visible MIME type, including embedded rate and channels
    /// when both are known
    pub fn specific_mime_type(&self) -> String {
        match self.params {
            CodecParams::RatePlusChannels {
                sample_rate: Some(sample_rate),
                channels: Some(channels),
            } => mime::format_l16(&self.mime_type, sample_rate, channels),
            _ => self.mime_type.clone(),
        }
    }

    pub fn params(&self) -> CodecParams {
        self.params
    }

    pub fn bit_rate(&self) -> Option<u32> {
        self.params.bit_rate()
    }

    pub fn sample_rate(&self) -> Option<u32> {
        self.params.sample_rate()
    }

    pub fn channels(&self) -> Option<u8> {
        self.params.channels()
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn rules_mut(&mut self) -> &mut Rules {
        &mut self.rules
    }

    /// Kind-level enabled state
    pub fn enabled(&self) -> bool {
        self.settings.enabled()
    }

    /// Enable or disable the whole codec kind
    pub fn set_enabled(&self, enabled: bool) {
        self.settings.set_enabled(enabled);
    }

    /// Check whether an advertised MIME type belongs to this codec's kind
    pub fn accepts(&self, mime_type: &str) -> bool {
        self.spec.accepts(mime_type)
    }

    /// Resolve an encoder against the host tools
    pub fn encoder(&self) -> Option<Encoder> {
        self.encoder_with(&HostProbe::new())
    }

    /// Resolve an encoder using the given availability probe
    pub fn encoder_with(&self, probe: &dyn EncoderProbe) -> Option<Encoder> {
        EncoderResolver::new(probe).resolve(self.spec.encoders, self.params)
    }

    /// Capture source feeding this codec's encoder
    pub fn recorder(&self, monitor: impl Into<String>) -> MonitorRecorder {
        MonitorRecorder::new(monitor)
    }

    /// Summary plus attached rules and the resolved encoder
    pub fn detailed(&self) -> String {
        self.detailed_with(&HostProbe::new())
    }

    pub fn detailed_with(&self, probe: &dyn EncoderProbe) -> String {
        let mut out = self.to_string();
        for rule in self.rules.iter() {
            out.push_str("\n    - ");
            out.push_str(&rule.to_string());
        }
        out.push_str("\n    ");
        match self.encoder_with(probe) {
            Some(encoder) => out.push_str(&encoder.to_string()),
            None => out.push_str("<no encoder available>"),
        }
        out
    }

    /// Public state for status reporting
    pub fn status(&self) -> CodecStatus {
        CodecStatus {
            identifier: self.identifier(),
            mime_type: self.specific_mime_type(),
            enabled: self.enabled(),
            rules: self.rules.descriptions(),
            params: self.params,
        }
    }

    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self.status())?)
    }
}

impl PartialEq for Codec {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.params == other.params
    }
}

impl PartialOrd for Codec {
    /// Descriptors of different kinds are never ordered
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.kind() != other.kind() {
            return None;
        }
        self.params.partial_cmp(&other.params)
    }
}

impl std::fmt::Display for Codec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "<{} enabled=\"{}\" priority=\"{}\" mime_type=\"{}\">",
            self.kind().display_name(),
            self.enabled(),
            self.priority(),
            self.specific_mime_type()
        )
    }
}

impl Serialize for Codec {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.status().serialize(serializer)
    }
}

/// Serialized descriptor state
///
/// `mime_type` carries the specific MIME type. Parameters appear only for
/// kinds that declare them.
#[derive(Debug, Clone, Serialize)]
pub struct CodecStatus {
    pub identifier: &'static str,
    pub mime_type: String,
    pub enabled: bool,
    pub rules: Vec<String>,
    #[serde(flatten)]
    pub params: CodecParams,
}

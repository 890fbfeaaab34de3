//! Codec registry - identifier to codec kind index
//!
//! This module provides:
//! - Loading of the static codec catalog, once, with validation
//! - Kind-level settings shared by every descriptor of a kind
//! - Negotiation of advertised MIME types against available encoders
//! - Global registry for process-wide lookups

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use tracing::{debug, info, warn};

use super::descriptor::Codec;
use super::kind::{CodecKind, CodecSpec, CATALOG};
use crate::encoder::EncoderProbe;
use crate::error::{CodecError, Result};

/// Mutable settings of one codec kind
#[derive(Debug)]
pub struct CodecSettings {
    identifier: &'static str,
    enabled: AtomicBool,
}

impl CodecSettings {
    fn new(identifier: &'static str) -> Self {
        Self {
            identifier,
            enabled: AtomicBool::new(true),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Last write wins; callers serialize administrative toggles themselves
    pub fn set_enabled(&self, enabled: bool) {
        let previous = self.enabled.swap(enabled, Ordering::Relaxed);
        if previous != enabled {
            info!(
                "Codec {} {}",
                self.identifier,
                if enabled { "enabled" } else { "disabled" }
            );
        }
    }
}

/// Registry entry: a codec kind and its shared settings
#[derive(Debug, Clone)]
pub struct CodecEntry {
    spec: &'static CodecSpec,
    settings: Arc<CodecSettings>,
}

impl CodecEntry {
    fn new(spec: &'static CodecSpec) -> Self {
        Self {
            spec,
            settings: Arc::new(CodecSettings::new(spec.identifier)),
        }
    }

    pub fn spec(&self) -> &'static CodecSpec {
        self.spec
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

    pub fn enabled(&self) -> bool {
        self.settings.enabled()
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.settings.set_enabled(enabled);
    }

    /// Build a descriptor sharing this entry's settings
    pub fn create(&self, mime_string: Option<&str>) -> Codec {
        Codec::from_parts(self.spec, Arc::clone(&self.settings), mime_string)
    }
}

/// Codec registry
///
/// Use `CodecRegistry::global()` for the process-wide instance, or build a
/// private one with `new()` + `load()`.
#[derive(Debug, Default)]
pub struct CodecRegistry {
    codecs: HashMap<&'static str, CodecEntry>,
}

impl CodecRegistry {
    /// Get the global registry instance
    ///
    /// Loaded with the built-in catalog on first access.
    pub fn global() -> &'static Self {
        static INSTANCE: OnceLock<CodecRegistry> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let mut registry = CodecRegistry::new();
            if let Err(e) = registry.load() {
                panic!("Built-in codec catalog is invalid: {}", e);
            }
            registry
        })
    }

    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the built-in catalog
    pub fn load(&mut self) -> Result<()> {
        self.load_from(&CATALOG)
    }

    /// Load a catalog
    ///
    /// No-op when the registry is already populated. A defective catalog
    /// leaves the registry empty.
    pub fn load_from(&mut self, catalog: &[&'static CodecSpec]) -> Result<()> {
        if !self.codecs.is_empty() {
            debug!("Codec registry already loaded, skipping");
            return Ok(());
        }

        let mut codecs = HashMap::with_capacity(catalog.len());
        for &spec in catalog {
            validate_spec(spec)?;
            if codecs.contains_key(spec.identifier) {
                return Err(CodecError::DuplicateIdentifier(spec.identifier.to_string()));
            }
            codecs.insert(spec.identifier, CodecEntry::new(spec));
        }

        self.codecs = codecs;

        debug!("Loaded codecs:");
        for entry in self.entries() {
            debug!("  {} = {:?}", entry.identifier(), entry.kind());
        }
        info!("Codec registry loaded with {} codecs", self.codecs.len());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }

    /// Look an entry up by identifier (case-insensitive)
    pub fn get(&self, identifier: &str) -> Option<&CodecEntry> {
        self.codecs.get(identifier.to_lowercase().as_str())
    }

    /// Look a codec kind up by identifier
    pub fn kind(&self, identifier: &str) -> Option<CodecKind> {
        self.get(identifier).map(CodecEntry::kind)
    }

    /// Get the entry registered for a kind
    pub fn entry(&self, kind: CodecKind) -> Option<&CodecEntry> {
        self.codecs.values().find(|entry| entry.kind() == kind)
    }

    /// All entries, highest priority first
    pub fn entries(&self) -> Vec<&CodecEntry> {
        let mut entries: Vec<&CodecEntry> = self.codecs.values().collect();
        entries.sort_by(|a, b| {
            b.priority()
                .cmp(&a.priority())
                .then_with(|| a.identifier().cmp(b.identifier()))
        });
        entries
    }

    /// Registered identifiers, highest priority first
    pub fn identifiers(&self) -> Vec<&'static str> {
        self.entries().iter().map(|entry| entry.identifier()).collect()
    }

    /// Build a descriptor of `kind`
    ///
    /// Kinds missing from this registry get settings of their own, not shared
    /// with any other descriptor.
    pub fn create(&self, kind: CodecKind, mime_string: Option<&str>) -> Codec {
        match self.entry(kind) {
            Some(entry) => entry.create(mime_string),
            None => {
                warn!("Codec {} is not registered, settings will not be shared", kind);
                CodecEntry::new(kind.spec()).create(mime_string)
            }
        }
    }

    /// Build a descriptor by identifier
    pub fn create_by_identifier(&self, identifier: &str, mime_string: Option<&str>) -> Result<Codec> {
        self.get(identifier)
            .map(|entry| entry.create(mime_string))
            .ok_or_else(|| CodecError::UnknownCodec(identifier.to_string()))
    }

    pub fn is_enabled(&self, identifier: &str) -> Result<bool> {
        self.get(identifier)
            .map(CodecEntry::enabled)
            .ok_or_else(|| CodecError::UnknownCodec(identifier.to_string()))
    }

    /// Enable or disable a codec kind
    pub fn set_enabled(&self, identifier: &str, enabled: bool) -> Result<()> {
        let entry = self
            .get(identifier)
            .ok_or_else(|| CodecError::UnknownCodec(identifier.to_string()))?;
        entry.set_enabled(enabled);
        Ok(())
    }

    /// Entries accepting an advertised MIME type, highest priority first
    pub fn accepting(&self, mime_type: &str) -> Vec<&CodecEntry> {
        self.entries()
            .into_iter()
            .filter(|entry| entry.spec().accepts(mime_type))
            .collect()
    }

    /// Negotiate codecs for a renderer
    ///
    /// Builds a descriptor for every enabled kind accepting one of the
    /// advertised MIME types and keeps those with an available encoder.
    /// Among comparable descriptors of the same kind only the greatest is
    /// kept. The result is ordered by priority, highest first; ties keep
    /// advertisement order.
    pub fn negotiate<S: AsRef<str>>(
        &self,
        mime_types: &[S],
        probe: &dyn EncoderProbe,
        bit_rate: Option<u32>,
    ) -> Vec<Codec> {
        let mut candidates: Vec<Codec> = Vec::new();

        for mime_type in mime_types {
            let mime_type = mime_type.as_ref();
            for entry in self.accepting(mime_type) {
                if !entry.enabled() {
                    debug!("Skipping disabled codec {} for {}", entry.identifier(), mime_type);
                    continue;
                }

                let mut codec = entry.create(Some(mime_type));
                if let Some(bit_rate) = bit_rate {
                    codec = codec.with_bit_rate(bit_rate);
                }

                if codec.encoder_with(probe).is_none() {
                    debug!("No encoder available for {}, skipping", codec);
                    continue;
                }

                match candidates
                    .iter()
                    .position(|existing| existing.partial_cmp(&codec).is_some())
                {
                    Some(index) => {
                        if codec > candidates[index] {
                            candidates[index] = codec;
                        }
                    }
                    None => candidates.push(codec),
                }
            }
        }

        candidates.sort_by(|a, b| b.priority().cmp(&a.priority()));

        if candidates.is_empty() {
            debug!("No codec negotiated for {} advertised types", mime_types.len());
        }
        candidates
    }

    /// Best negotiated codec, if any
    pub fn best<S: AsRef<str>>(
        &self,
        mime_types: &[S],
        probe: &dyn EncoderProbe,
        bit_rate: Option<u32>,
    ) -> Option<Codec> {
        self.negotiate(mime_types, probe, bit_rate).into_iter().next()
    }
}

fn validate_spec(spec: &CodecSpec) -> Result<()> {
    let invalid = |reason: &str| CodecError::InvalidCatalog {
        identifier: spec.identifier.to_string(),
        reason: reason.to_string(),
    };

    if spec.identifier.is_empty() {
        return Err(invalid("empty identifier"));
    }
    if spec.identifier != spec.identifier.to_lowercase() {
        return Err(invalid("identifier must be lowercase"));
    }
    if spec.accepted_mime_types.is_empty() {
        return Err(invalid("no accepted MIME types"));
    }
    if spec.accepted_mime_types.iter().any(|m| m.trim().is_empty()) {
        return Err(invalid("empty accepted MIME type"));
    }
    if !spec.accepts(spec.default_mime_type) {
        return Err(invalid("default MIME type is not accepted"));
    }
    if spec.encoders.is_empty() {
        return Err(invalid("no encoder candidates"));
    }
    if spec.encoders.iter().any(|e| e.codec != spec.kind) {
        return Err(invalid("encoder candidate for another codec"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::ParamKind;
    use crate::encoder::{EncoderBackend, EncoderKind, StaticProbe};

    fn registry() -> CodecRegistry {
        let mut registry = CodecRegistry::new();
        registry.load().unwrap();
        registry
    }

    static DUPLICATE_ENCODERS: [EncoderKind; 1] =
        [EncoderKind::new(EncoderBackend::Ffmpeg, CodecKind::Mp3)];

    static DUPLICATE_MP3: CodecSpec = CodecSpec {
        kind: CodecKind::Mp3,
        identifier: "mp3",
        priority: 1,
        suffix: "mp3",
        default_mime_type: "audio/mpeg",
        accepted_mime_types: &["audio/mpeg"],
        params: ParamKind::BitRate,
        encoders: &DUPLICATE_ENCODERS,
    };

    static EMPTY_PREFIX: CodecSpec = CodecSpec {
        kind: CodecKind::Mp3,
        identifier: "broken",
        priority: 1,
        suffix: "mp3",
        default_mime_type: "audio/mpeg",
        accepted_mime_types: &["audio/mpeg", ""],
        params: ParamKind::BitRate,
        encoders: &DUPLICATE_ENCODERS,
    };

    #[test]
    fn test_load_builtin_catalog() {
        let registry = registry();
        assert_eq!(registry.len(), 7);
        assert_eq!(
            registry.identifiers(),
            vec!["mp3", "wav", "aac", "flac", "ogg", "opus", "l16"]
        );
        for kind in CodecKind::all() {
            assert_eq!(registry.kind(kind.identifier()), Some(*kind));
        }
        assert_eq!(registry.kind("MP3"), Some(CodecKind::Mp3));
        assert_eq!(registry.kind("wma"), None);
    }

    #[test]
    fn test_load_is_idempotent() {
        let mut registry = registry();
        let before = registry.identifiers();
        let mp3 = registry.create(CodecKind::Mp3, None);

        registry.load().unwrap();
        assert_eq!(registry.len(), 7);
        assert_eq!(registry.identifiers(), before);

        // Existing entries are kept, so settings are still shared
        mp3.set_enabled(false);
        assert!(!registry.is_enabled("mp3").unwrap());
    }

    #[test]
    fn test_duplicate_identifier_fails() {
        let mut registry = CodecRegistry::new();
        let catalog = [CodecKind::Mp3.spec(), &DUPLICATE_MP3];
        let err = registry.load_from(&catalog).unwrap_err();
        assert!(matches!(err, CodecError::DuplicateIdentifier(ref id) if id == "mp3"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_empty_prefix_fails() {
        let mut registry = CodecRegistry::new();
        let err = registry.load_from(&[&EMPTY_PREFIX]).unwrap_err();
        assert!(matches!(err, CodecError::InvalidCatalog { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_enabled_is_kind_level() {
        let registry = registry();
        let first = registry.create(CodecKind::Aac, Some("audio/aac")).with_bit_rate(128);
        first.set_enabled(false);

        let fresh = registry.create(CodecKind::Aac, None);
        assert!(!fresh.enabled());
        assert!(!registry.is_enabled("aac").unwrap());
        assert!(registry.create(CodecKind::Mp3, None).enabled());

        registry.set_enabled("aac", true).unwrap();
        assert!(first.enabled());
        assert!(registry.set_enabled("wma", false).is_err());
    }

    #[test]
    fn test_private_registries_do_not_share_settings() {
        let a = registry();
        let b = registry();
        a.set_enabled("flac", false).unwrap();
        assert!(!a.is_enabled("flac").unwrap());
        assert!(b.is_enabled("flac").unwrap());
    }

    #[test]
    fn test_create_by_identifier() {
        let registry = registry();
        let codec = registry
            .create_by_identifier("L16", Some("audio/L16;rate=48000;channels=2"))
            .unwrap();
        assert_eq!(codec.kind(), CodecKind::L16);
        assert_eq!(codec.sample_rate(), Some(48000));
        assert!(matches!(
            registry.create_by_identifier("wma", None),
            Err(CodecError::UnknownCodec(_))
        ));
    }

    #[test]
    fn test_accepting() {
        let registry = registry();
        let kinds: Vec<CodecKind> = registry
            .accepting("Audio/X-Flac")
            .iter()
            .map(|e| e.kind())
            .collect();
        assert_eq!(kinds, vec![CodecKind::Flac]);
        assert!(registry.accepting("video/mp4").is_empty());
    }

    #[test]
    fn test_negotiate_orders_by_priority() {
        let registry = registry();
        let advertised = [
            "audio/L16;rate=44100;channels=2",
            "audio/flac",
            "audio/mpeg",
            "video/mp4",
        ];
        let codecs = registry.negotiate(&advertised, &StaticProbe::all(), Some(256));
        let kinds: Vec<CodecKind> = codecs.iter().map(|c| c.kind()).collect();
        assert_eq!(kinds, vec![CodecKind::Mp3, CodecKind::Flac, CodecKind::L16]);
        assert_eq!(codecs[0].bit_rate(), Some(256));
        assert_eq!(codecs[0].specific_mime_type(), "audio/mpeg");
        assert_eq!(codecs[2].sample_rate(), Some(44100));
    }

    #[test]
    fn test_negotiate_skips_disabled_and_unavailable() {
        let registry = registry();
        registry.set_enabled("mp3", false).unwrap();
        let probe = StaticProbe::none().with_kind(EncoderKind::new(
            EncoderBackend::Avconv,
            CodecKind::Wav,
        ));

        let advertised = ["audio/mpeg", "audio/wav", "audio/flac"];
        let codecs = registry.negotiate(&advertised, &probe, None);
        assert_eq!(codecs.len(), 1);
        assert_eq!(codecs[0].kind(), CodecKind::Wav);

        assert!(registry.best(&advertised, &StaticProbe::none(), None).is_none());
    }

    #[test]
    fn test_negotiate_keeps_greatest_of_kind() {
        let registry = registry();
        let advertised = [
            "audio/L16;rate=44100;channels=1",
            "audio/L16;rate=48000;channels=2",
            "audio/mp3",
            "audio/mpeg",
        ];
        let codecs = registry.negotiate(&advertised, &StaticProbe::all(), None);
        assert_eq!(codecs.len(), 2);
        assert_eq!(codecs[0].specific_mime_type(), "audio/mp3");
        assert_eq!(
            codecs[1].specific_mime_type(),
            "audio/L16;rate=48000;channels=2"
        );

        let best = registry.best(&advertised, &StaticProbe::all(), None).unwrap();
        assert_eq!(best.kind(), CodecKind::Mp3);
    }

    #[test]
    fn test_global_registry() {
        let global = CodecRegistry::global();
        assert!(std::ptr::eq(global, CodecRegistry::global()));
        assert_eq!(global.len(), 7);

        let opus = Codec::new(CodecKind::Opus, None);
        opus.set_enabled(false);
        assert!(!Codec::new(CodecKind::Opus, Some("audio/x-opus")).enabled());
        opus.set_enabled(true);
        assert!(Codec::new(CodecKind::Opus, None).enabled());
    }
}

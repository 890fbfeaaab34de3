//! Capture source description for a monitor
//!
//! Recording itself happens outside this crate; descriptors only hand out a
//! description of the capture the encoder expects on its input.

use serde::Serialize;

/// Raw sample format produced by the recorder
pub const RECORDER_FORMAT: &str = "s16le";
/// Sample rate produced by the recorder, in Hz
pub const RECORDER_SAMPLE_RATE: u32 = 44100;
/// Channel count produced by the recorder
pub const RECORDER_CHANNELS: u8 = 2;

/// Capture source for a PulseAudio monitor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonitorRecorder {
    monitor: String,
}

impl MonitorRecorder {
    pub fn new(monitor: impl Into<String>) -> Self {
        Self {
            monitor: monitor.into(),
        }
    }

    pub fn monitor(&self) -> &str {
        &self.monitor
    }

    /// Command line of the capture process
    pub fn command(&self) -> Vec<String> {
        vec![
            "parec".to_string(),
            format!("--format={}", RECORDER_FORMAT),
            format!("--rate={}", RECORDER_SAMPLE_RATE),
            format!("--channels={}", RECORDER_CHANNELS),
            format!("--device={}", self.monitor),
        ]
    }
}

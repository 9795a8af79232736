//! Uploaded audio handling
//!
//! An [`AudioInput`] is the handle the analyzer receives for an upload. It is
//! validated on construction (accepted extension, non-empty payload) so the
//! generators downstream never see a missing input.
//!
//! The bytes are never read for scoring. They are only probed with symphonia
//! to show basic stream facts (sample rate, channels, duration) next to the
//! report, and a failed probe is not an error.

use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Accepted upload formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Mp3,
    Wav,
}

impl AudioFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "mp3" => Some(AudioFormat::Mp3),
            "wav" | "wave" => Some(AudioFormat::Wav),
            _ => None,
        }
    }

    /// Resolve the format from a file name or path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Wav => "wav",
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension().to_uppercase())
    }
}

/// Basic stream facts read from the container header
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AudioInfo {
    pub sample_rate: Option<u32>,
    pub channels: Option<usize>,
    pub duration_secs: Option<f64>,
}

/// A validated upload. Clones share the payload.
#[derive(Debug, Clone)]
pub struct AudioInput {
    file_name: String,
    format: AudioFormat,
    bytes: Arc<[u8]>,
}

impl AudioInput {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let file_name = file_name.into();
        let format = AudioFormat::from_path(&file_name).ok_or_else(|| {
            let ext = Path::new(&file_name)
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("")
                .to_string();
            Error::UnsupportedFormat(if ext.is_empty() { file_name.clone() } else { ext })
        })?;

        if bytes.is_empty() {
            return Err(Error::EmptyInput);
        }

        Ok(Self { file_name, format, bytes: bytes.into() })
    }

    /// Read an audio file from disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        // Check the extension before reading a possibly large file
        if AudioFormat::from_path(path).is_none() {
            return Self::new(file_name, vec![]);
        }

        let bytes = std::fs::read(path)?;
        Self::new(file_name, bytes)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Probe the container for display metadata.
    ///
    /// Returns `None` when symphonia cannot recognise the stream.
    pub fn probe(&self) -> Option<AudioInfo> {
        let cursor = std::io::Cursor::new(Arc::clone(&self.bytes));
        let mss = MediaSourceStream::new(Box::new(cursor), Default::default());

        let mut hint = Hint::new();
        hint.with_extension(self.format.extension());

        let probed = symphonia::default::get_probe()
            .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
            .ok()?;

        let track = probed.format.default_track()?;
        let params = &track.codec_params;

        let duration_secs = match (params.n_frames, params.sample_rate) {
            (Some(frames), Some(rate)) if rate > 0 => Some(frames as f64 / rate as f64),
            _ => None,
        };

        Some(AudioInfo {
            sample_rate: params.sample_rate,
            channels: params.channels.map(|c| c.count()),
            duration_secs,
        })
    }
}

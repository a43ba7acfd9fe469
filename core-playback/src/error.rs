//! # Playback Error Types
//!
//! Error types for opening, decoding and seeking a media resource.

use bridge_traits::BridgeError;
use thiserror::Error;

/// Errors that can occur during playback operations.
#[derive(Error, Debug)]
pub enum PlaybackError {
    // ========================================================================
    // Open Errors
    // ========================================================================
    /// The resource could not be opened by the demuxer.
    #[error("Failed to open media resource {url}: {reason}")]
    OpenFailed { url: String, reason: String },

    /// The container opened but its stream information could not be probed.
    #[error("No stream information for {0}")]
    NoStreamInfo(String),

    /// The container holds neither a video nor an audio stream.
    #[error("No video or audio stream in {0}")]
    NoUsableStream(String),

    /// No decoder is available for a stream's codec.
    #[error("Decoder not found for codec: {0}")]
    CodecNotFound(String),

    /// A decoder was found but could not be opened.
    #[error("Could not open codec: {0}")]
    CodecOpenFailed(String),

    /// The pixel converter for the video stream could not be created.
    #[error("Could not create frame converter: {0}")]
    ConverterFailed(String),

    // ========================================================================
    // Decode Errors
    // ========================================================================
    /// A packet could not be decoded.
    #[error("Decoding error on stream {stream_index}: {reason}")]
    DecodeFailed { stream_index: usize, reason: String },

    /// A decoded picture could not be converted to the output layout.
    #[error("Frame conversion failed: {0}")]
    ConversionFailed(String),

    /// The demuxer could no longer read the resource.
    #[error("Failed to read packet: {0}")]
    ReadFailed(String),

    // ========================================================================
    // Playback Control Errors
    // ========================================================================
    /// The demuxer rejected a seek request.
    #[error("Seek failed: {0}")]
    SeekFailed(String),

    /// Speed multiplier must be finite and positive.
    #[error("Invalid speed multiplier: {0} (must be > 0)")]
    InvalidSpeed(f64),

    /// Attempted operation when no resource is open.
    #[error("No media resource loaded")]
    NoResourceLoaded,

    /// Player configuration was rejected by `PlayerConfig::validate`.
    #[error("Invalid player configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Error reported by a bridge collaborator.
    #[error("Bridge error: {0}")]
    Bridge(#[from] BridgeError),

    /// Error from the runtime layer (configuration, logging).
    #[error("Runtime error: {0}")]
    Runtime(#[from] core_runtime::Error),
}

impl PlaybackError {
    /// Returns `true` for errors that abort [`MediaPlayer::open`](crate::MediaPlayer::open).
    pub fn is_open_failure(&self) -> bool {
        matches!(
            self,
            PlaybackError::OpenFailed { .. }
                | PlaybackError::NoStreamInfo(_)
                | PlaybackError::NoUsableStream(_)
                | PlaybackError::CodecNotFound(_)
                | PlaybackError::CodecOpenFailed(_)
                | PlaybackError::ConverterFailed(_)
        )
    }

    /// Returns `true` if playback can continue after this error.
    ///
    /// Decode, conversion and seek failures only cost one round; the player
    /// absorbs them and keeps the resource open.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PlaybackError::DecodeFailed { .. }
                | PlaybackError::ConversionFailed(_)
                | PlaybackError::SeekFailed(_)
        )
    }

    /// Map a decoder factory error to the matching open failure.
    pub(crate) fn from_decoder_open(codec_id: &str, err: BridgeError) -> Self {
        match err {
            BridgeError::CodecNotFound(codec) => PlaybackError::CodecNotFound(codec),
            BridgeError::CodecOpenFailed(reason) => PlaybackError::CodecOpenFailed(reason),
            other => PlaybackError::CodecOpenFailed(format!("{}: {}", codec_id, other)),
        }
    }
}

/// Result type for playback operations.
pub type Result<T> = std::result::Result<T, PlaybackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_failures_are_classified() {
        let err = PlaybackError::OpenFailed {
            url: "missing.mp4".to_string(),
            reason: "not found".to_string(),
        };
        assert!(err.is_open_failure());
        assert!(!err.is_recoverable());
        assert!(PlaybackError::ConverterFailed("yuv".to_string()).is_open_failure());
    }

    #[test]
    fn decode_and_seek_failures_are_recoverable() {
        let decode = PlaybackError::DecodeFailed {
            stream_index: 1,
            reason: "corrupt".to_string(),
        };
        assert!(decode.is_recoverable());
        assert!(PlaybackError::SeekFailed("eof".to_string()).is_recoverable());
        assert!(!PlaybackError::ReadFailed("io".to_string()).is_recoverable());
        assert!(!PlaybackError::NoResourceLoaded.is_open_failure());
    }

    #[test]
    fn decoder_open_errors_map_to_open_failures() {
        let not_found =
            PlaybackError::from_decoder_open("hevc", BridgeError::CodecNotFound("hevc".into()));
        assert!(matches!(not_found, PlaybackError::CodecNotFound(ref c) if c == "hevc"));

        let other = PlaybackError::from_decoder_open(
            "vp9",
            BridgeError::OperationFailed("no threads".into()),
        );
        assert!(matches!(other, PlaybackError::CodecOpenFailed(ref msg) if msg.contains("vp9")));
        assert!(other.is_open_failure());
    }

    #[test]
    fn bridge_errors_convert() {
        let err: PlaybackError = BridgeError::NotAvailable("scaler".into()).into();
        assert!(matches!(err, PlaybackError::Bridge(_)));
        assert!(err.to_string().contains("scaler"));
    }
}

//! Content classification from stream presence and rate signals.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of content an opened resource holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    VideoAudio,
    VideoOnly,
    AudioOnly,
    /// A single picture, decoded once at open.
    Image,
}

impl ContentType {
    pub fn has_video(&self) -> bool {
        matches!(
            self,
            ContentType::VideoAudio | ContentType::VideoOnly | ContentType::Image
        )
    }

    pub fn has_audio(&self) -> bool {
        matches!(self, ContentType::VideoAudio | ContentType::AudioOnly)
    }

    pub fn is_image(&self) -> bool {
        matches!(self, ContentType::Image)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContentType::VideoAudio => "video+audio",
            ContentType::VideoOnly => "video",
            ContentType::AudioOnly => "audio",
            ContentType::Image => "image",
        };
        f.write_str(name)
    }
}

/// Inputs to [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContentSignals {
    pub has_video: bool,
    pub has_audio: bool,
    /// Resolved bitrate in kbit/s.
    pub bitrate_kbps: i64,
    /// Sample rate of the tracked audio stream, 0 when there is none.
    pub audio_sample_rate: i64,
}

/// Classify a resource once its stream info has been resolved.
///
/// A resource without bitrate and without audio sample rate is a still
/// image. Returns `None` when neither a video nor an audio stream is tracked
/// and the image rule does not apply.
pub fn classify(signals: ContentSignals) -> Option<ContentType> {
    if signals.bitrate_kbps <= 0 && signals.audio_sample_rate <= 0 {
        return Some(ContentType::Image);
    }

    match (signals.has_video, signals.has_audio) {
        (true, true) => Some(ContentType::VideoAudio),
        (true, false) => Some(ContentType::VideoOnly),
        (false, true) => Some(ContentType::AudioOnly),
        (false, false) => None,
    }
}

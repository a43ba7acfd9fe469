//! # Media Player
//!
//! Playback state machine for a single open media resource.
//!
//! ## Overview
//!
//! The host drives the player from its own tick: each call to
//! [`MediaPlayer::update`] advances the cursor by one frame and runs one
//! decode round. While the resource accepts seeks, every tick seeks to its
//! target frame first ([`SeekMode::Direct`]); after the first failed seek the
//! player decodes forward only, and only while playing
//! ([`SeekMode::Sequential`]).
//!
//! ## Usage
//!
//! ```ignore
//! use core_playback::{MediaPlayer, PlayerConfig};
//!
//! let mut player = MediaPlayer::new(&core_config, PlayerConfig::default())?;
//! player.open("/videos/clip.mp4")?;
//! player.play();
//!
//! loop {
//!     player.update();
//!     if let Some(sample) = player.video_sample() {
//!         present(sample.data(), sample.width(), sample.height());
//!     }
//!     sleep(player.frame_interval_ms());
//! }
//! ```

use crate::classifier::ContentType;
use crate::config::PlayerConfig;
use crate::cursor::{Direction, LoopMode, PlaybackCursor, PlaybackState, SeekMode};
use crate::decoder::{pipeline, still_image, RoundOutcome};
use crate::error::{PlaybackError, Result};
use crate::resource::{OpenResource, ResourceId};
use crate::sample::{AudioSample, VideoSample};
use crate::seek;
use crate::time::{self, EPS};
use bridge_traits::{MediaBackend, MediaFileReader};
use core_runtime::config::CoreConfig;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Player shared with auxiliary threads.
pub type SharedMediaPlayer = Arc<Mutex<MediaPlayer>>;

/// Orchestrates demuxing, decoding, conversion and seeking for one resource.
pub struct MediaPlayer {
    backend: Arc<dyn MediaBackend>,
    file_reader: Arc<dyn MediaFileReader>,
    config: PlayerConfig,
    resource: Option<OpenResource>,
    cursor: PlaybackCursor,
    state: PlaybackState,
    frame_decoded: bool,
}

impl MediaPlayer {
    /// Create a player from the runtime capabilities and player settings.
    pub fn new(core: &CoreConfig, config: PlayerConfig) -> Result<Self> {
        config.validate().map_err(PlaybackError::InvalidConfig)?;

        Ok(Self {
            backend: Arc::clone(&core.media_backend),
            file_reader: Arc::clone(&core.file_reader),
            cursor: PlaybackCursor::new(config.loop_mode, config.direction, config.speed),
            config,
            resource: None,
            state: PlaybackState::Closed,
            frame_decoded: false,
        })
    }

    /// Wrap the player for use across threads.
    pub fn into_shared(self) -> SharedMediaPlayer {
        Arc::new(Mutex::new(self))
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Open `url`, closing any resource that is already open.
    ///
    /// Still images are decoded here, once. A failing image decode leaves
    /// the resource open in [`PlaybackState::Error`].
    ///
    /// # Errors
    ///
    /// Returns an open failure (see [`PlaybackError::is_open_failure`]); the
    /// player is then closed and every partially acquired handle released.
    #[instrument(skip(self))]
    pub fn open(&mut self, url: &str) -> Result<()> {
        self.close();

        let mut resource = match OpenResource::open(
            self.backend.as_ref(),
            url,
            self.config.output_format,
        ) {
            Ok(resource) => resource,
            Err(e) => {
                error!(error = %e, "Failed to open media resource");
                return Err(e);
            }
        };

        self.cursor.rewind();
        self.state = PlaybackState::Opened;
        self.frame_decoded = false;

        if resource.content_type.is_image() {
            self.cursor.current_frame = 0;
            self.cursor.current_time_ms = 0.0;
            match still_image::decode_still(&mut resource, self.file_reader.as_ref()) {
                Ok(()) => self.frame_decoded = true,
                Err(e) => {
                    warn!(resource_id = %resource.id, error = %e, "Still image decode failed");
                    self.state = PlaybackState::Error;
                }
            }
        }

        self.resource = Some(resource);
        Ok(())
    }

    /// Release the open resource. Safe to call in any state, any number of
    /// times.
    pub fn close(&mut self) {
        if self.resource.is_some() {
            self.stop();
        }
        if let Some(mut resource) = self.resource.take() {
            resource.release();
            info!(resource_id = %resource.id, "Closed media resource");
        }
        self.cursor.rewind();
        self.state = PlaybackState::Closed;
        self.frame_decoded = false;
    }

    // ========================================================================
    // Transport Controls
    // ========================================================================

    /// Start or resume playback. Ignored for still images, in the error
    /// state and when nothing is open. From end of stream, rewinds first.
    pub fn play(&mut self) {
        let Some(resource) = self.resource.as_mut() else {
            return;
        };
        if resource.content_type.is_image() {
            return;
        }

        match self.state {
            PlaybackState::Opened | PlaybackState::Paused | PlaybackState::Stopped => {}
            PlaybackState::Eof => Self::rewind(resource, &mut self.cursor),
            PlaybackState::Playing | PlaybackState::Error | PlaybackState::Closed => return,
        }

        debug!(resource_id = %resource.id, from = %self.state, "Play");
        self.state = PlaybackState::Playing;
    }

    /// Pause playback. Ignored in the error state and when nothing is open.
    pub fn pause(&mut self) {
        if self.resource.is_none() || self.state == PlaybackState::Error {
            return;
        }
        self.state = PlaybackState::Paused;
    }

    /// Stop playback and return to the start of the resource.
    ///
    /// Seeks to frame 0 even when the resource has been found unseekable;
    /// the result of that seek does not affect the seek mode.
    pub fn stop(&mut self) {
        let Some(resource) = self.resource.as_mut() else {
            return;
        };
        self.state = PlaybackState::Stopped;
        Self::rewind(resource, &mut self.cursor);
    }

    fn rewind(resource: &mut OpenResource, cursor: &mut PlaybackCursor) {
        cursor.rewind();
        if let Err(e) = seek::seek_to_frame(resource, 0) {
            debug!(resource_id = %resource.id, error = %e, "Rewind seek failed");
        }
    }

    // ========================================================================
    // Tick
    // ========================================================================

    /// Advance by one frame and run one decode round.
    ///
    /// Does nothing for still images, when nothing is open, and at end of
    /// stream or after an error. In sequential mode the round only runs while
    /// playing, but the cursor advances on every tick.
    pub fn update(&mut self) {
        self.frame_decoded = false;

        let Some(resource) = self.resource.as_mut() else {
            return;
        };
        if resource.content_type.is_image()
            || matches!(self.state, PlaybackState::Eof | PlaybackState::Error)
        {
            return;
        }

        if self.cursor.current_time_ms < 0.0 {
            self.cursor.target_time_ms = 0.0;
        }

        let target = self.cursor.next_frame();
        match resource.seek_mode {
            SeekMode::Direct => {
                if let Err(e) = seek::seek_to_frame(resource, target) {
                    warn!(
                        resource_id = %resource.id,
                        frame = target,
                        error = %e,
                        "Seek failed, switching to sequential decoding"
                    );
                    resource.seek_mode.record_seek(false);
                }
            }
            SeekMode::Sequential => {
                if self.state != PlaybackState::Playing {
                    self.cursor.aim(target, resource.info.fps);
                    self.cursor.commit(target);
                    return;
                }
            }
        }

        self.cursor.aim(target, resource.info.fps);

        match pipeline::decode_one_round(resource, self.config.max_packets_per_round) {
            Ok(RoundOutcome::EndOfStream) => {
                self.handle_end_of_stream(target);
            }
            Ok(outcome) => {
                self.frame_decoded = outcome.produced_sample();
                self.cursor.commit(target);
            }
            Err(e) if e.is_recoverable() => {
                debug!(resource_id = %resource.id, frame = target, error = %e, "No sample this round");
                self.cursor.commit(target);
            }
            Err(e) => {
                error!(resource_id = %resource.id, error = %e, "Playback failed");
                self.state = PlaybackState::Error;
            }
        }
    }

    fn handle_end_of_stream(&mut self, target: i64) {
        let Some(resource) = self.resource.as_mut() else {
            return;
        };

        let can_rewind = resource.seek_mode.is_direct();
        match self.cursor.loop_mode {
            LoopMode::NoLoop => {
                self.cursor.commit(target);
                self.state = PlaybackState::Eof;
                info!(resource_id = %resource.id, frame = target, "End of stream");
            }
            LoopMode::Loop | LoopMode::Bidirectional if !can_rewind => {
                self.cursor.commit(target);
                self.state = PlaybackState::Eof;
                info!(
                    resource_id = %resource.id,
                    frame = target,
                    "End of stream, resource is not seekable so looping stops"
                );
            }
            LoopMode::Loop => {
                debug!(resource_id = %resource.id, "End of stream, looping");
                Self::rewind(resource, &mut self.cursor);
            }
            LoopMode::Bidirectional => {
                self.cursor.direction = self.cursor.direction.reversed();
                debug!(
                    resource_id = %resource.id,
                    direction = ?self.cursor.direction,
                    "End of stream, reversing"
                );
                Self::rewind(resource, &mut self.cursor);
            }
        }
    }

    // ========================================================================
    // Seeking
    // ========================================================================

    /// Reposition to frame `frame`; the next [`update`](Self::update)
    /// produces it.
    ///
    /// A failed seek switches the resource to sequential decoding. Negative
    /// targets are rejected without touching the demuxer or the seek mode.
    pub fn seek_to_frame(&mut self, frame: i64) -> Result<()> {
        let resource = self
            .resource
            .as_mut()
            .ok_or(PlaybackError::NoResourceLoaded)?;
        if frame < 0 {
            return Err(PlaybackError::SeekFailed(format!(
                "negative frame target {}",
                frame
            )));
        }

        let result = seek::seek_to_frame(resource, frame);
        resource.seek_mode.record_seek(result.is_ok());
        result?;

        let time_ms = time::frame_to_time_ms(frame, resource.info.fps);
        self.cursor.reposition(frame, time_ms);
        if self.state == PlaybackState::Eof {
            self.state = PlaybackState::Paused;
        }
        Ok(())
    }

    /// Reposition to `time_ms`, honouring the playback direction.
    ///
    /// A failed seek switches the resource to sequential decoding. Negative
    /// or non-finite targets are rejected without touching the seek mode.
    pub fn seek_to_time(&mut self, time_ms: f64) -> Result<()> {
        let resource = self
            .resource
            .as_mut()
            .ok_or(PlaybackError::NoResourceLoaded)?;
        if !time_ms.is_finite() || time_ms < 0.0 {
            return Err(PlaybackError::SeekFailed(format!(
                "invalid time target {}",
                time_ms
            )));
        }

        let result = seek::seek_to_time(resource, time_ms, self.cursor.direction);
        resource.seek_mode.record_seek(result.is_ok());
        result?;

        let frame = time::frame_number_from_time(time_ms, resource.info.fps);
        self.cursor.reposition(frame, time_ms);
        if self.state == PlaybackState::Eof {
            self.state = PlaybackState::Paused;
        }
        Ok(())
    }

    // ========================================================================
    // Settings
    // ========================================================================

    pub fn set_loop_mode(&mut self, loop_mode: LoopMode) {
        self.cursor.loop_mode = loop_mode;
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.cursor.direction = direction;
    }

    /// Set the speed multiplier used by [`frame_interval_ms`](Self::frame_interval_ms).
    pub fn set_speed(&mut self, speed: f64) -> Result<()> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(PlaybackError::InvalidSpeed(speed));
        }
        self.cursor.speed = speed;
        Ok(())
    }

    pub fn loop_mode(&self) -> LoopMode {
        self.cursor.loop_mode
    }

    pub fn direction(&self) -> Direction {
        self.cursor.direction
    }

    pub fn speed(&self) -> f64 {
        self.cursor.speed
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.resource.is_some()
    }

    /// Whether the last [`update`](Self::update) produced a sample.
    pub fn is_frame_decoded(&self) -> bool {
        self.frame_decoded
    }

    pub fn resource_id(&self) -> Option<ResourceId> {
        self.resource.as_ref().map(|resource| resource.id)
    }

    pub fn url(&self) -> Option<&str> {
        self.resource.as_ref().map(|resource| resource.url.as_str())
    }

    pub fn content_type(&self) -> Option<ContentType> {
        self.resource.as_ref().map(|resource| resource.content_type)
    }

    pub fn seek_mode(&self) -> Option<SeekMode> {
        self.resource.as_ref().map(|resource| resource.seek_mode)
    }

    pub fn cursor(&self) -> &PlaybackCursor {
        &self.cursor
    }

    pub fn current_frame(&self) -> i64 {
        self.cursor.current_frame
    }

    pub fn current_time_ms(&self) -> f64 {
        self.cursor.current_time_ms
    }

    pub fn target_time_ms(&self) -> f64 {
        self.cursor.target_time_ms
    }

    pub fn duration_ms(&self) -> f64 {
        self.resource
            .as_ref()
            .map_or(0.0, |resource| resource.info.duration_ms)
    }

    pub fn fps(&self) -> f64 {
        self.resource.as_ref().map_or(0.0, |resource| resource.info.fps)
    }

    pub fn frame_count(&self) -> u64 {
        self.resource
            .as_ref()
            .map_or(0, |resource| resource.info.frame_count)
    }

    /// Overall bitrate in kbit/s.
    pub fn bitrate_kbps(&self) -> i64 {
        self.resource
            .as_ref()
            .map_or(0, |resource| resource.info.bitrate_kbps)
    }

    pub fn width(&self) -> u32 {
        self.video_track().map_or(0, |track| track.width)
    }

    pub fn height(&self) -> u32 {
        self.video_track().map_or(0, |track| track.height)
    }

    pub fn video_codec_name(&self) -> Option<&str> {
        self.video_track().map(|track| track.codec_name.as_str())
    }

    pub fn audio_codec_name(&self) -> Option<&str> {
        self.audio_track().map(|track| track.codec_name.as_str())
    }

    pub fn audio_sample_rate(&self) -> u32 {
        self.audio_track().map_or(0, |track| track.sample_rate)
    }

    pub fn audio_channels(&self) -> u16 {
        self.audio_track().map_or(0, |track| track.channels)
    }

    /// The latest decoded picture.
    pub fn video_sample(&self) -> Option<&VideoSample> {
        self.resource.as_ref()?.video_sample.as_ref()
    }

    /// The latest decoded audio block, valid until the next decode.
    pub fn audio_sample(&self) -> Option<AudioSample<'_>> {
        self.resource.as_ref()?.audio_sample()
    }

    /// Frame shown at `time_ms`, 0 when the frame rate is unknown.
    pub fn calculate_frame_number_from_time(&self, time_ms: f64) -> i64 {
        time::frame_number_from_time(time_ms, self.fps())
    }

    /// Milliseconds between ticks at the current speed, 0 when the frame
    /// rate is unknown.
    pub fn frame_interval_ms(&self) -> f64 {
        let fps = self.fps();
        if fps < EPS {
            return 0.0;
        }
        time::frame_interval_ms(fps, self.cursor.speed)
    }

    fn video_track(&self) -> Option<&crate::resource::VideoTrack> {
        self.resource.as_ref()?.video.as_ref()
    }

    fn audio_track(&self) -> Option<&crate::resource::AudioTrack> {
        self.resource.as_ref()?.audio.as_ref()
    }
}

impl std::fmt::Debug for MediaPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaPlayer")
            .field("url", &self.url())
            .field("state", &self.state)
            .field("cursor", &self.cursor)
            .field("seek_mode", &self.seek_mode())
            .finish()
    }
}

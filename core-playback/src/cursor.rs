//! Playback position, lifecycle state and seek mode.

use crate::time::frame_to_time_ms;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlaybackState {
    /// No resource is open.
    #[default]
    Closed,
    Opened,
    Playing,
    Paused,
    Stopped,
    /// The decode pipeline ran out of packets.
    Eof,
    /// The resource could not be read or decoded any further.
    Error,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlaybackState::Closed => "closed",
            PlaybackState::Opened => "opened",
            PlaybackState::Playing => "playing",
            PlaybackState::Paused => "paused",
            PlaybackState::Stopped => "stopped",
            PlaybackState::Eof => "eof",
            PlaybackState::Error => "error",
        };
        f.write_str(name)
    }
}

/// What happens when the pipeline reaches the end of the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopMode {
    /// Stop at the end.
    #[default]
    NoLoop,
    /// Rewind and keep playing.
    Loop,
    /// Rewind and reverse direction.
    Bidirectional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// How `update()` reaches its target frame.
///
/// Starts as [`SeekMode::Direct`] and drops to [`SeekMode::Sequential`] the
/// first time a seek fails. The switch never reverts for the open resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SeekMode {
    /// Seek to every target frame, then decode.
    #[default]
    Direct,
    /// Decode forward without seeking.
    Sequential,
}

impl SeekMode {
    pub fn is_direct(&self) -> bool {
        matches!(self, SeekMode::Direct)
    }

    /// Record a seek result; a failure latches [`SeekMode::Sequential`].
    pub(crate) fn record_seek(&mut self, succeeded: bool) {
        if !succeeded {
            *self = SeekMode::Sequential;
        }
    }
}

/// Position bookkeeping for the open resource.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackCursor {
    /// Last frame decoded or targeted, -1 before the first decode.
    pub current_frame: i64,
    /// Negative until the first round has run.
    pub current_time_ms: f64,
    pub target_time_ms: f64,
    pub direction: Direction,
    pub loop_mode: LoopMode,
    /// Always positive.
    pub speed: f64,
}

impl Default for PlaybackCursor {
    fn default() -> Self {
        Self::new(LoopMode::default(), Direction::default(), 1.0)
    }
}

impl PlaybackCursor {
    pub fn new(loop_mode: LoopMode, direction: Direction, speed: f64) -> Self {
        Self {
            current_frame: -1,
            current_time_ms: -1.0,
            target_time_ms: 0.0,
            direction,
            loop_mode,
            speed,
        }
    }

    /// Forget the position; the next round decodes frame 0.
    ///
    /// Direction, loop mode and speed are kept.
    pub fn rewind(&mut self) {
        self.current_frame = -1;
        self.current_time_ms = -1.0;
        self.target_time_ms = 0.0;
    }

    /// Frame the next round should produce.
    pub fn next_frame(&self) -> i64 {
        self.current_frame.saturating_add(1)
    }

    /// Point the cursor at `frame` without committing it.
    pub(crate) fn aim(&mut self, frame: i64, fps: f64) {
        self.target_time_ms = frame_to_time_ms(frame, fps);
    }

    /// Make `frame` the current position.
    pub(crate) fn commit(&mut self, frame: i64) {
        self.current_frame = frame;
        self.current_time_ms = self.target_time_ms;
    }

    /// Reposition so that the next round produces `frame`.
    pub(crate) fn reposition(&mut self, frame: i64, time_ms: f64) {
        self.current_frame = frame - 1;
        self.current_time_ms = time_ms;
        self.target_time_ms = time_ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seek_mode_latch_is_one_way() {
        let mut mode = SeekMode::default();
        assert!(mode.is_direct());

        mode.record_seek(true);
        assert_eq!(mode, SeekMode::Direct);

        mode.record_seek(false);
        assert_eq!(mode, SeekMode::Sequential);

        mode.record_seek(true);
        assert_eq!(mode, SeekMode::Sequential);
    }

    #[test]
    fn cursor_starts_before_first_frame() {
        let cursor = PlaybackCursor::default();
        assert_eq!(cursor.current_frame, -1);
        assert!(cursor.current_time_ms < 0.0);
        assert_eq!(cursor.next_frame(), 0);
        assert_eq!(cursor.speed, 1.0);
    }

    #[test]
    fn next_frame_saturates_at_the_last_representable_frame() {
        let mut cursor = PlaybackCursor::default();
        cursor.reposition(i64::MAX, f64::MAX);
        assert_eq!(cursor.next_frame(), i64::MAX);

        cursor.commit(i64::MAX);
        assert_eq!(cursor.next_frame(), i64::MAX);
    }

    #[test]
    fn aim_and_commit_advance_by_frame_interval() {
        let mut cursor = PlaybackCursor::default();

        for expected in 0..3 {
            let frame = cursor.next_frame();
            cursor.aim(frame, 10.0);
            cursor.commit(frame);
            assert_eq!(cursor.current_frame, expected);
            assert_eq!(cursor.current_time_ms, expected as f64 * 100.0);
        }
    }

    #[test]
    fn rewind_keeps_playback_settings() {
        let mut cursor = PlaybackCursor::new(LoopMode::Bidirectional, Direction::Backward, 2.0);
        cursor.aim(5, 25.0);
        cursor.commit(5);

        cursor.rewind();
        assert_eq!(cursor.current_frame, -1);
        assert_eq!(cursor.target_time_ms, 0.0);
        assert_eq!(cursor.direction, Direction::Backward);
        assert_eq!(cursor.loop_mode, LoopMode::Bidirectional);
        assert_eq!(cursor.speed, 2.0);
    }

    #[test]
    fn reposition_targets_requested_frame() {
        let mut cursor = PlaybackCursor::default();
        cursor.reposition(12, 480.0);
        assert_eq!(cursor.next_frame(), 12);
        assert_eq!(cursor.target_time_ms, 480.0);
    }

    #[test]
    fn direction_reverses() {
        assert_eq!(Direction::Forward.reversed(), Direction::Backward);
        assert_eq!(Direction::Backward.reversed(), Direction::Forward);
    }
}

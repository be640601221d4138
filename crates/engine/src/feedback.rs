//! Sound and haptic cues.
//!
//! The engine fires cues and never waits on them. Real audio output lives
//! outside this crate; the provided implementations either drop cues or log
//! them.

use tracing::debug;

use crate::types::{HapticKind, SoundEffect};

pub trait Feedback: Send + Sync {
    fn play(&self, sound: SoundEffect);
    fn haptic(&self, kind: HapticKind);
}

/// Drops every cue.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentFeedback;

impl Feedback for SilentFeedback {
    fn play(&self, _sound: SoundEffect) {}
    fn haptic(&self, _kind: HapticKind) {}
}

/// Emits each cue as a debug-level tracing event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFeedback;

impl Feedback for LogFeedback {
    fn play(&self, sound: SoundEffect) {
        debug!(sound = sound.as_str(), "sound cue");
    }

    fn haptic(&self, kind: HapticKind) {
        debug!(haptic = kind.as_str(), "haptic cue");
    }
}

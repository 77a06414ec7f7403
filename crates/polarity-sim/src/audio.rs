//! Per-tick audio request queue.

use std::collections::HashSet;

use polarity_core::events::{AudioRequest, Sound};

/// Collects audio requests for the current tick.
///
/// `play` requests are deduplicated within a tick so that several
/// identical hits land as one report instead of a clipped stack.
/// Loop and stop requests pass through untouched.
#[derive(Debug, Default)]
pub struct AudioQueue {
    requests: Vec<AudioRequest>,
    played: HashSet<Sound>,
}

impl AudioQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the per-tick play dedup set.
    pub fn begin_frame(&mut self) {
        self.played.clear();
    }

    /// Request a one-shot sound, at most once per tick.
    pub fn play(&mut self, sound: Sound) {
        if self.played.insert(sound) {
            self.requests.push(AudioRequest::Play(sound));
        }
    }

    /// Request a looping sound.
    pub fn start_loop(&mut self, sound: Sound) {
        self.requests.push(AudioRequest::Loop(sound));
    }

    /// Request that a looping sound stop.
    pub fn stop(&mut self, sound: Sound) {
        self.requests.push(AudioRequest::Stop(sound));
    }

    /// Take all requests queued this tick.
    pub fn drain(&mut self) -> Vec<AudioRequest> {
        std::mem::take(&mut self.requests)
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

//! Playback state persistence across host restarts.
//!
//! This module provides the single source of truth for mirroring one
//! player's position, playing flag and track identity into a key-value
//! store, so the host can put the user back where they were after a reload,
//! a navigation or a restart.
//!
//! Architecture:
//! - All player lifecycle events flow through the persister's `on_*` methods
//! - Restoring seeks the player back and re-issues a best-effort play request
//! - A change of track resets the stored state instead of applying it
//! - An initializing guard keeps the player's first position report from
//!   clobbering a just-restored position

use serde::{Deserialize, Serialize};

use crate::player::{PlayCallback, PlayerEvent, PlayerHandle};
use crate::store::StateStore;

/// Storage key for the last recorded playback position, in seconds.
pub const KEY_CURRENT_TIME: &str = "audioCurrentTime";
/// Storage key for whether playback was active when last recorded.
pub const KEY_WAS_PLAYING: &str = "audioWasPlaying";
/// Storage key for the source URL the other two keys describe.
pub const KEY_SOURCE: &str = "audioSrc";

/// Decoded view of the persisted playback state.
///
/// Decoding never fails: a missing or unparsable position reads as `0.0`,
/// and only the literal string `"true"` sets the playing flag, so a
/// corrupted entry degrades to a safe default instead of an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPlayback {
    pub position: f64,
    pub was_playing: bool,
    pub source: Option<String>,
}

impl SavedPlayback {
    fn read<S: StateStore>(store: &S) -> Self {
        Self {
            position: store
                .get(KEY_CURRENT_TIME)
                .and_then(|raw| raw.parse::<f64>().ok())
                .filter(|secs| secs.is_finite())
                .unwrap_or(0.0),
            was_playing: store.get(KEY_WAS_PLAYING).as_deref() == Some("true"),
            source: store.get(KEY_SOURCE),
        }
    }
}

fn encode_flag(playing: bool) -> &'static str {
    if playing {
        "true"
    } else {
        "false"
    }
}

/// Synchronizes one player's playback position/state with a persisted
/// key-value store.
///
/// One persister per player. Two persisters (or two processes) writing the
/// same storage namespace race and overwrite each other's state; no
/// cross-writer coordination is attempted.
pub struct AudioStatePersister<P, S> {
    player: P,
    store: S,
    /// Suppresses position writes until the first restore completes. Set at
    /// construction, cleared at the end of every restore, never re-set.
    initializing: bool,
}

impl<P: PlayerHandle, S: StateStore> AudioStatePersister<P, S> {
    /// Create a persister without touching the player or the store.
    pub fn new(player: P, store: S) -> Self {
        Self {
            player,
            store,
            initializing: true,
        }
    }

    /// Wire up persistence for an optional player and run the initial
    /// restore.
    ///
    /// Returns `None` when the host has no player, in which case nothing is
    /// read or written.
    pub fn attach(player: Option<P>, store: S) -> Option<Self> {
        let mut persister = Self::new(player?, store);
        persister.on_restore();
        Some(persister)
    }

    /// Restore the player from the persisted state.
    ///
    /// Call once on startup and again whenever the host page/view is shown
    /// (covers both fresh loads and back/forward restores; repeated calls
    /// are safe).
    ///
    /// If the stored source matches the player's current source, the player
    /// is seeked to the stored position and, if playback was active when
    /// last recorded, asked to start playing. Any other stored source is
    /// stale: the store is reset to the current track at position zero,
    /// marked playing, and playback is requested immediately.
    pub fn on_restore(&mut self) {
        let Some(current_source) = self.player.source_url() else {
            // Nothing loaded: nothing to restore or to key state on.
            log::debug!("[AudioStatePersister] restore skipped, player has no source");
            self.initializing = false;
            return;
        };

        let saved = SavedPlayback::read(&self.store);

        if saved.source.as_deref() == Some(current_source.as_str()) {
            log::info!(
                "[AudioStatePersister] resuming '{}' at {:.1}s ({})",
                current_source,
                saved.position,
                if saved.was_playing { "playing" } else { "paused" }
            );
            self.player.seek(saved.position);
            if saved.was_playing {
                self.attempt_play();
            }
        } else {
            // Different or unknown track: the stored fields describe some
            // other source and must not be applied.
            log::info!(
                "[AudioStatePersister] new track '{}', resetting saved state",
                current_source
            );
            self.store.set(KEY_SOURCE, &current_source);
            self.store.set(KEY_CURRENT_TIME, "0");
            self.store.set(KEY_WAS_PLAYING, encode_flag(true));
            self.attempt_play();
        }

        self.initializing = false;
    }

    /// Persist the player's current position.
    ///
    /// Suppressed until the first restore completes, so the position-zero
    /// report the player emits while starting up cannot overwrite the
    /// position the restore just applied.
    pub fn on_time_update(&mut self) {
        if self.initializing {
            return;
        }
        self.store
            .set(KEY_CURRENT_TIME, &self.player.position().to_string());
    }

    /// Record that playback started.
    pub fn on_play(&mut self) {
        self.store.set(KEY_WAS_PLAYING, encode_flag(true));
    }

    /// Record that playback paused.
    pub fn on_pause(&mut self) {
        self.store.set(KEY_WAS_PLAYING, encode_flag(false));
    }

    /// Final snapshot before the host goes away, in case the last periodic
    /// position update was missed.
    pub fn on_unload(&mut self) {
        let position = self.player.position();
        let playing = !self.player.is_paused();
        self.store.set(KEY_CURRENT_TIME, &position.to_string());
        self.store.set(KEY_WAS_PLAYING, encode_flag(playing));
        log::debug!(
            "[AudioStatePersister] unload snapshot at {:.1}s ({})",
            position,
            if playing { "playing" } else { "paused" }
        );
    }

    /// Forward a raw host event to the matching handler.
    pub fn handle_event(&mut self, event: PlayerEvent) {
        match event {
            PlayerEvent::PageShow => self.on_restore(),
            PlayerEvent::TimeUpdate => self.on_time_update(),
            PlayerEvent::Play => self.on_play(),
            PlayerEvent::Pause => self.on_pause(),
            PlayerEvent::BeforeUnload => self.on_unload(),
        }
    }

    /// Decode the persisted state, e.g. for host UI ("resume at 3:42?").
    pub fn saved_state(&self) -> SavedPlayback {
        SavedPlayback::read(&self.store)
    }

    /// Issue a best-effort play request. A refusal only produces a
    /// diagnostic log line; stored state is left exactly as it is.
    fn attempt_play(&mut self) {
        let on_result: PlayCallback = Box::new(|outcome| {
            if let Err(rejected) = outcome {
                log::info!("[AudioStatePersister] {}", rejected);
            }
        });
        self.player.request_play(on_result);
    }
}

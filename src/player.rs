use crate::errors::PlayRejected;

/// Outcome callback for a deferred playback-start attempt.
///
/// Implementations may invoke it right away (synchronous players, tests) or
/// once the underlying attempt settles. The persister never waits on it and
/// never cancels or retries an attempt it has issued.
pub type PlayCallback = Box<dyn FnOnce(Result<(), PlayRejected>) + Send + 'static>;

/// The controlled player, as far as persistence is concerned.
///
/// Hosts implement this over whatever actually plays audio, be it a media
/// element behind a bridge or a native decoder thread. Only the
/// identity/position/paused surface is needed.
pub trait PlayerHandle {
    /// Resolved URL (or any stable identity) of the currently loaded track.
    /// `None` when nothing is loaded.
    fn source_url(&self) -> Option<String>;

    /// Current playback position in seconds.
    fn position(&self) -> f64;

    /// Move the playback position, in seconds.
    fn seek(&mut self, position: f64);

    /// Whether the player is currently paused.
    fn is_paused(&self) -> bool;

    /// Ask the player to start playback, best effort.
    ///
    /// Must not block. The outcome is reported through `on_result`; a
    /// [`PlayRejected`] there means the player refused to start (autoplay
    /// policy being the classic case) and is informational only.
    fn request_play(&mut self, on_result: PlayCallback);
}

/// Host lifecycle signals a persister consumes, for hosts that prefer to
/// forward raw events instead of calling the `on_*` methods directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    /// The page/view became visible: fresh load or back/forward restore.
    PageShow,
    /// The player reported playback-position progress.
    TimeUpdate,
    /// Playback started.
    Play,
    /// Playback paused.
    Pause,
    /// The host is about to go away.
    BeforeUnload,
}

//! Resume-where-you-left-off playback persistence.
//!
//! Mirrors a single player's playback position, playing flag and track
//! identity into a key-value store, so the host can put the user back where
//! they were after a reload, a navigation or a restart. A change of track
//! resets the stored state instead of applying it.
//!
//! The host wires its player lifecycle events to one
//! [`AudioStatePersister`]: construct it (or [`AudioStatePersister::attach`]
//! it, which also runs the initial restore), then call `on_restore` when the
//! page/view shows, `on_time_update` on position progress, `on_play` /
//! `on_pause` on state changes and `on_unload` right before the host goes
//! away. Hosts that already have an event pipeline can forward
//! [`PlayerEvent`]s to [`AudioStatePersister::handle_event`] instead.
//!
//! Storage is any [`StateStore`]: [`JsonFileStore`] persists to a JSON file
//! under the user's config directory, [`MemoryStore`] keeps everything
//! in-process for tests and ephemeral hosts.
//!
//! Known limitation: two writers sharing one storage namespace (two windows
//! over the same file, say) race and overwrite each other's state; no
//! cross-writer coordination is attempted.

pub mod errors;
pub mod persister;
pub mod player;
pub mod store;

pub use errors::{PlayRejected, StoreError};
pub use persister::{
    AudioStatePersister, SavedPlayback, KEY_CURRENT_TIME, KEY_SOURCE, KEY_WAS_PLAYING,
};
pub use player::{PlayCallback, PlayerEvent, PlayerHandle};
pub use store::{JsonFileStore, MemoryStore, SharedStore, StateStore};

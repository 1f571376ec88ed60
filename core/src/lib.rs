pub mod catalog;
pub mod config;
pub mod context;
pub mod game_data;
pub mod highlight;
pub mod roster;
pub mod watcher;

// Re-exports for convenience
pub use catalog::{CatalogEntry, StatusCatalog};
pub use config::{ConfigError, ConfyStore, MemoryStore, SettingsStore};
pub use context::WatcherContext;
pub use game_data::{Eligibility, GameData, Job, StaticGameData, StatusInfo};
pub use highlight::{Highlight, HighlightProjector, InWorldLabel};
pub use roster::{ActorRecord, EntityId, EntityRoster, EntitySnapshot, NO_ENTITY, StaticRoster};
pub use watcher::{ActorState, ActorWatcher, EffectKind, TickOutcome};

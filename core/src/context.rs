//! Watcher context
//!
//! Owns everything the watcher needs between frames: static game data, the
//! loaded settings and their store, the status catalog, and the watcher
//! itself. Hosts create one context and forward zone changes and frame ticks
//! to it; renderers read [`WatcherContext::highlights`].

use rezwatch_types::WatcherSettings;

use crate::catalog::StatusCatalog;
use crate::config::{Config, ConfigError, SettingsStore};
use crate::game_data::{Eligibility, GameData};
use crate::highlight::{Highlight, HighlightProjector};
use crate::roster::EntityRoster;
use crate::watcher::{ActorWatcher, DerivedStateTable, LocalPlayer, PlayerContext, TickOutcome};

pub struct WatcherContext<G, S> {
    game_data: G,
    config: Config<S>,
    catalog: StatusCatalog,
    watcher: ActorWatcher,
}

impl<G: GameData, S: SettingsStore> WatcherContext<G, S> {
    /// Load settings, build the status catalog and start watching if enabled.
    ///
    /// Override ids that no longer name a dispellable status are dropped and
    /// the corrected override is written back.
    pub fn new(game_data: G, store: S) -> Self {
        let mut config = Config::load(store);
        let load = StatusCatalog::load(&game_data, &config.settings().unmonitored_statuses);

        if load.needs_repersist() {
            let ignored = load.catalog.ignored_ids();
            if let Err(e) = config.update(|s| s.unmonitored_statuses = ignored) {
                tracing::error!(error = %e, "Failed to save corrected ignored statuses");
            }
        }

        let mut watcher = ActorWatcher::new();
        if config.settings().enabled {
            watcher.enable();
        }

        tracing::debug!(
            monitored = load.catalog.monitored_len(),
            ignored = load.catalog.ignored_len(),
            enabled = watcher.is_enabled(),
            "Watcher context ready"
        );

        Self {
            game_data,
            config,
            catalog: load.catalog,
            watcher,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Host events
    // ═══════════════════════════════════════════════════════════════════════

    pub fn on_zone_changed(&mut self, zone_id: u16) {
        self.watcher.on_zone_changed(zone_id, &self.game_data);
    }

    pub fn on_tick<R: EntityRoster + ?Sized>(&mut self, roster: &R) -> TickOutcome {
        self.watcher.on_tick(roster, &self.catalog)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Settings
    // ═══════════════════════════════════════════════════════════════════════

    /// Turn the watcher on or off and persist the choice
    pub fn set_enabled(&mut self, enabled: bool) -> Result<(), ConfigError> {
        self.apply_enabled(enabled);
        if self.config.settings().enabled == enabled {
            return Ok(());
        }
        self.config.update(|s| s.enabled = enabled)
    }

    /// Move a status between monitored and ignored. Returns whether the
    /// catalog changed; the override is persisted only when it did.
    pub fn toggle_status(&mut self, status_id: u16) -> Result<bool, ConfigError> {
        let changed = self.catalog.toggle(status_id);
        self.persist_catalog(changed)
    }

    /// Ignore every dispellable status
    pub fn clear_monitored(&mut self) -> Result<bool, ConfigError> {
        let changed = self.catalog.clear_monitored();
        self.persist_catalog(changed)
    }

    /// Monitor every dispellable status
    pub fn clear_ignored(&mut self) -> Result<bool, ConfigError> {
        let changed = self.catalog.clear_ignored();
        self.persist_catalog(changed)
    }

    /// Edit settings in place and persist them.
    ///
    /// Changes to `enabled` or `unmonitored_statuses` take effect
    /// immediately.
    pub fn update_settings(
        &mut self,
        f: impl FnOnce(&mut WatcherSettings),
    ) -> Result<(), ConfigError> {
        let was_enabled = self.config.settings().enabled;
        let previous_override = self.config.settings().unmonitored_statuses.clone();
        let mut result = self.config.update(f);

        let enabled = self.config.settings().enabled;
        if enabled != was_enabled {
            self.apply_enabled(enabled);
        }
        let unmonitored = &self.config.settings().unmonitored_statuses;
        if *unmonitored != previous_override {
            let load = StatusCatalog::load(&self.game_data, unmonitored);
            let repersist = load.needs_repersist();
            self.catalog = load.catalog;
            if repersist {
                let ignored = self.catalog.ignored_ids();
                result = result.and(self.config.update(|s| s.unmonitored_statuses = ignored));
            }
        }
        result
    }

    fn apply_enabled(&mut self, enabled: bool) {
        if enabled {
            self.watcher.enable();
        } else {
            self.watcher.disable();
        }
    }

    fn persist_catalog(&mut self, changed: bool) -> Result<bool, ConfigError> {
        if !changed {
            return Ok(false);
        }
        let ignored = self.catalog.ignored_ids();
        self.config.update(|s| s.unmonitored_statuses = ignored)?;
        Ok(true)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Output
    // ═══════════════════════════════════════════════════════════════════════

    /// What the local player can act on, from the last scan
    pub fn eligibility(&self) -> Eligibility {
        self.watcher.local_player().eligibility()
    }

    /// Highlights for the last scan, ordered by target id
    pub fn highlights(&self) -> Vec<Highlight> {
        HighlightProjector::new(
            self.watcher.table(),
            self.watcher.player_context(),
            self.watcher.local_player(),
            self.config.settings(),
        )
        .project()
    }

    // --- Accessors ---

    pub fn settings(&self) -> &WatcherSettings {
        self.config.settings()
    }

    pub fn store(&self) -> &S {
        self.config.store()
    }

    pub fn catalog(&self) -> &StatusCatalog {
        &self.catalog
    }

    pub fn game_data(&self) -> &G {
        &self.game_data
    }

    pub fn watcher(&self) -> &ActorWatcher {
        &self.watcher
    }

    pub fn table(&self) -> &DerivedStateTable {
        self.watcher.table()
    }

    pub fn player_context(&self) -> PlayerContext {
        self.watcher.player_context()
    }

    pub fn local_player(&self) -> LocalPlayer {
        self.watcher.local_player()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::config::MemoryStore;
    use crate::game_data::{Job, StaticGameData, StatusInfo};
    use crate::roster::{ActorRecord, StaticRoster};
    use crate::watcher::WatcherState;

    const PARALYSIS: u16 = 17;
    const DOOM: u16 = 215;
    const PVP_ZONE: u16 = 376;

    fn make_game_data() -> StaticGameData {
        StaticGameData::new(
            vec![
                StatusInfo::new(PARALYSIS, "Paralysis", true),
                StatusInfo::new(DOOM, "Doom", true),
                StatusInfo::new(10, "Poison", false),
            ],
            [PVP_ZONE],
        )
    }

    fn make_store(unmonitored: &[u16]) -> MemoryStore {
        let mut settings = WatcherSettings::default();
        settings.unmonitored_statuses = unmonitored.iter().copied().collect();
        MemoryStore::new(settings)
    }

    fn ids(set: &[u16]) -> BTreeSet<u16> {
        set.iter().copied().collect()
    }

    #[test]
    fn test_new_enables_from_settings() {
        let ctx = WatcherContext::new(make_game_data(), make_store(&[]));
        assert!(ctx.watcher().is_enabled());
        assert_eq!(ctx.store().saves, 0);

        let mut settings = WatcherSettings::default();
        settings.enabled = false;
        let ctx = WatcherContext::new(make_game_data(), MemoryStore::new(settings));
        assert_eq!(ctx.watcher().state(), WatcherState::Disabled);
    }

    #[test]
    fn test_stale_ignored_ids_are_repersisted() {
        // 10 is not dispellable, 9999 does not exist
        let ctx = WatcherContext::new(make_game_data(), make_store(&[10, DOOM, 9999]));

        assert_eq!(ctx.store().saves, 1);
        assert_eq!(ctx.store().settings.unmonitored_statuses, ids(&[DOOM]));
        assert_eq!(ctx.settings().unmonitored_statuses, ids(&[DOOM]));
        assert!(ctx.catalog().is_ignored(DOOM));
    }

    #[test]
    fn test_split_name_group_is_repersisted_whole() {
        let mut game_data = make_game_data();
        game_data.statuses.push(StatusInfo::new(910, "doom", true));
        let mut ctx = WatcherContext::new(game_data, make_store(&[910]));

        assert_eq!(ctx.store().saves, 1);
        assert_eq!(ctx.store().settings.unmonitored_statuses, ids(&[DOOM, 910]));
        assert!(ctx.catalog().is_ignored(DOOM));

        // Toggling either member twice leaves the saved list unchanged
        assert!(ctx.toggle_status(DOOM).unwrap());
        assert!(ctx.toggle_status(DOOM).unwrap());
        assert_eq!(ctx.store().settings.unmonitored_statuses, ids(&[DOOM, 910]));
    }

    #[test]
    fn test_toggle_persists_only_on_change() {
        let mut ctx = WatcherContext::new(make_game_data(), make_store(&[]));

        assert!(ctx.toggle_status(PARALYSIS).unwrap());
        assert_eq!(ctx.store().saves, 1);
        assert_eq!(ctx.store().settings.unmonitored_statuses, ids(&[PARALYSIS]));

        assert!(!ctx.toggle_status(10).unwrap());
        assert_eq!(ctx.store().saves, 1);

        assert!(ctx.toggle_status(PARALYSIS).unwrap());
        assert!(ctx.store().settings.unmonitored_statuses.is_empty());
    }

    #[test]
    fn test_clear_lists_persist() {
        let mut ctx = WatcherContext::new(make_game_data(), make_store(&[]));

        assert!(ctx.clear_monitored().unwrap());
        assert_eq!(
            ctx.store().settings.unmonitored_statuses,
            ids(&[PARALYSIS, DOOM])
        );
        assert!(!ctx.clear_monitored().unwrap());

        assert!(ctx.clear_ignored().unwrap());
        assert!(ctx.store().settings.unmonitored_statuses.is_empty());
        assert_eq!(ctx.store().saves, 2);
    }

    #[test]
    fn test_set_enabled_persists_and_clears_state() {
        let mut ctx = WatcherContext::new(make_game_data(), make_store(&[]));
        let mut roster = StaticRoster::new();
        let mut afflicted = ActorRecord::player(30, "Afflicted");
        afflicted.statuses = vec![DOOM];
        roster.place(2, afflicted);

        assert_eq!(ctx.on_tick(&roster), TickOutcome::Scanned);
        assert!(ctx.table().contains(30));

        ctx.set_enabled(false).unwrap();
        assert!(!ctx.store().settings.enabled);
        assert!(ctx.table().is_empty());
        assert_eq!(ctx.on_tick(&roster), TickOutcome::Disabled);

        // Already disabled; nothing to write
        ctx.set_enabled(false).unwrap();
        assert_eq!(ctx.store().saves, 1);

        ctx.set_enabled(true).unwrap();
        assert!(ctx.store().settings.enabled);
        assert_eq!(ctx.on_tick(&roster), TickOutcome::Scanned);
    }

    #[test]
    fn test_update_settings_rebuilds_catalog() {
        let mut ctx = WatcherContext::new(make_game_data(), make_store(&[]));

        ctx.update_settings(|s| {
            s.unmonitored_statuses = ids(&[DOOM, 4242]);
            s.show_icon = false;
        })
        .unwrap();

        assert!(ctx.catalog().is_ignored(DOOM));
        assert!(!ctx.settings().show_icon);
        // The unknown id was dropped and the override written again
        assert_eq!(ctx.store().settings.unmonitored_statuses, ids(&[DOOM]));
        assert_eq!(ctx.store().saves, 2);

        ctx.update_settings(|s| s.enabled = false).unwrap();
        assert!(!ctx.watcher().is_enabled());
    }

    #[test]
    fn test_pvp_zone_suspends_ticks() {
        let mut ctx = WatcherContext::new(make_game_data(), make_store(&[]));
        let roster = StaticRoster::new();

        ctx.on_zone_changed(PVP_ZONE);
        assert_eq!(ctx.on_tick(&roster), TickOutcome::Suspended);
        ctx.on_zone_changed(132);
        assert_eq!(ctx.on_tick(&roster), TickOutcome::Scanned);
    }

    #[test]
    fn test_highlights_follow_local_job() {
        let mut ctx = WatcherContext::new(make_game_data(), make_store(&[]));
        ctx.update_settings(|s| s.restricted_jobs_dispel = true).unwrap();

        let mut roster = StaticRoster::new();
        let mut local = ActorRecord::player(1, "Local");
        local.job = Job::War;
        local.level = 90;
        roster.place(0, local);
        let mut afflicted = ActorRecord::player(30, "Afflicted");
        afflicted.statuses = vec![DOOM];
        roster.place(2, afflicted);

        ctx.on_tick(&roster);
        assert!(!ctx.eligibility().can_cleanse());
        assert!(ctx.highlights().is_empty());

        if let Some(record) = roster.get_mut(0) {
            record.job = Job::Whm;
        }
        ctx.on_tick(&roster);
        assert!(ctx.eligibility().can_cleanse());
        let highlights = ctx.highlights();
        assert_eq!(highlights.len(), 1);
        assert_eq!(highlights[0].target, 30);
    }
}

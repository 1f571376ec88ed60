//! Frame-by-frame watcher for dead, raised and afflicted party members.
//!
//! # Architecture
//!
//! ```text
//!   host tick ──► ActorWatcher::on_tick ──► EntityScanner::scan
//!                        ▲                        │
//!   zone change ─────────┘ (suspends in PvP)      ▼
//!                                        DerivedStateTable + PlayerContext
//!                                                 │
//!                                                 ▼
//!                                   highlight projection / renderer
//! ```
//!
//! The watcher owns the scan output between ticks; renderers read it through
//! shared references and must tolerate it being one tick old.

mod scanner;
mod state;
mod table;


pub use scanner::{EntityScanner, ScanState};
pub use state::{ActorState, EffectKind};
pub use table::{DerivedStateTable, LocalPlayer, PlayerContext};

use crate::catalog::StatusCatalog;
use crate::game_data::GameData;
use crate::roster::EntityRoster;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WatcherState {
    #[default]
    Disabled,
    Enabled,
}

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Scanned,
    /// Inside a PvP zone; the previous output was left untouched
    Suspended,
    Disabled,
}

#[derive(Debug, Default)]
pub struct ActorWatcher {
    state: WatcherState,
    in_pvp_zone: bool,
    scan: ScanState,
}

impl ActorWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> WatcherState {
        self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.state == WatcherState::Enabled
    }

    pub fn is_suspended(&self) -> bool {
        self.in_pvp_zone
    }

    pub fn enable(&mut self) {
        if self.is_enabled() {
            return;
        }
        self.state = WatcherState::Enabled;
        tracing::info!("Actor watcher enabled");
    }

    /// Stop watching and drop all derived state, caches included
    pub fn disable(&mut self) {
        if !self.is_enabled() {
            return;
        }
        self.state = WatcherState::Disabled;
        self.scan.clear();
        tracing::info!("Actor watcher disabled");
    }

    /// Territory changed; suspend tracking inside PvP zones
    pub fn on_zone_changed(&mut self, zone_id: u16, game_data: &dyn GameData) {
        let in_pvp_zone = game_data.is_pvp_zone(zone_id);
        if in_pvp_zone != self.in_pvp_zone {
            if in_pvp_zone {
                tracing::info!(zone_id, "Entered PvP zone, suspending tracking");
            } else {
                tracing::info!(zone_id, "Left PvP zone, resuming tracking");
            }
        }
        self.in_pvp_zone = in_pvp_zone;
    }

    /// Per-frame update
    pub fn on_tick<R: EntityRoster + ?Sized>(
        &mut self,
        roster: &R,
        catalog: &StatusCatalog,
    ) -> TickOutcome {
        if !self.is_enabled() {
            return TickOutcome::Disabled;
        }
        if self.in_pvp_zone {
            return TickOutcome::Suspended;
        }

        EntityScanner::new(catalog).scan(roster, &mut self.scan);
        TickOutcome::Scanned
    }

    // --- Accessors ---

    pub fn table(&self) -> &DerivedStateTable {
        &self.scan.table
    }

    pub fn player_context(&self) -> PlayerContext {
        self.scan.player
    }

    pub fn local_player(&self) -> LocalPlayer {
        self.scan.local
    }

    pub fn scan_state(&self) -> &ScanState {
        &self.scan
    }
}

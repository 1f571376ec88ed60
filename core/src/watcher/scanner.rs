//! Per-tick roster walk.
//!
//! Visits every player slot of the roster once, classifies each player as
//! dead / casting / afflicted, and rebuilds the derived state table from
//! scratch. Nothing in here can fail: an unreadable slot is an empty slot and
//! an unknown id classifies as [`EffectKind::None`].

use hashbrown::HashSet;

use crate::catalog::StatusCatalog;
use crate::game_data::{classify_cast, is_revival_marker};
use crate::roster::{
    EntityId, EntityRoster, EntitySnapshot, LOCAL_PLAYER_SLOT, NO_ENTITY, PLAYER_SLOT_STRIDE,
    ROSTER_LENGTH,
};

use super::{ActorState, DerivedStateTable, EffectKind, LocalPlayer, PlayerContext};

/// Everything a scan produces
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanState {
    pub table: DerivedStateTable,
    pub player: PlayerContext,
    pub local: LocalPlayer,
}

impl ScanState {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn clear(&mut self) {
        self.table.clear();
        self.player = PlayerContext::default();
        self.local = LocalPlayer::default();
    }
}

/// What an entity's status list says about it
#[derive(Debug, Clone, Copy, Default)]
struct StatusFindings {
    /// Carries a pending-revival marker
    revival_pending: bool,
    /// Carries at least one monitored status
    monitored: bool,
}

/// Walks the roster and derives per-entity state.
pub struct EntityScanner<'a> {
    catalog: &'a StatusCatalog,
}

impl<'a> EntityScanner<'a> {
    pub fn new(catalog: &'a StatusCatalog) -> Self {
        Self { catalog }
    }

    /// Run one full scan cycle into `state`.
    ///
    /// Derived states from the previous cycle are discarded; the name and
    /// position caches and the local player's previous caster state are
    /// carried over.
    pub fn scan<R: EntityRoster + ?Sized>(&self, roster: &R, state: &mut ScanState) {
        state.table.begin_cycle();
        state.player = state.player.begin_cycle();
        state.local = LocalPlayer::default();

        let mut present: HashSet<EntityId> = HashSet::new();
        let slots = roster.slot_count().min(ROSTER_LENGTH);

        for slot in (0..slots).step_by(PLAYER_SLOT_STRIDE) {
            let Some(entity) = roster.entity(slot) else {
                continue;
            };
            if !entity.is_player() || entity.id == NO_ENTITY {
                continue;
            }

            present.insert(entity.id);
            if slot == LOCAL_PLAYER_SLOT {
                state.local = LocalPlayer {
                    id: entity.id,
                    job: entity.job,
                    level: entity.level,
                };
            }

            if entity.is_dead {
                self.scan_dead(&entity, state);
            } else {
                self.scan_alive(slot, &entity, state);
            }
        }

        // Cast targets that are not players in view are nothing we can show
        state.table.retain_states(|id| present.contains(&id));

        tracing::trace!(
            entries = state.table.len(),
            player_target = state.player.target,
            "Roster scan complete"
        );
    }

    fn inspect_statuses(&self, entity: &EntitySnapshot<'_>) -> StatusFindings {
        let mut findings = StatusFindings::default();
        for status_id in entity.active_statuses() {
            findings.revival_pending |= is_revival_marker(status_id);
            findings.monitored |= self.catalog.is_monitored(status_id);
        }
        findings
    }

    fn scan_dead(&self, entity: &EntitySnapshot<'_>, state: &mut ScanState) {
        let findings = self.inspect_statuses(entity);

        state.table.cache_position(entity.id, entity.position);
        if findings.revival_pending {
            state.table.set(entity.id, ActorState::REVIVED);
        }
        state.table.cache_name(entity.id, entity.name);
    }

    fn scan_alive(&self, slot: usize, entity: &EntitySnapshot<'_>, state: &mut ScanState) {
        let kind = classify_cast(entity.cast.as_ref());
        let findings = self.inspect_statuses(entity);
        if kind.is_none() && !findings.monitored {
            return;
        }

        let id = entity.id;
        if findings.monitored {
            state
                .table
                .upsert(id, ActorState::MONITORED, |s| s.with_monitored_status(true));
            state.table.cache_position(id, entity.position);
        }
        state.table.cache_name(id, entity.name);

        if kind.is_none() {
            return;
        }
        let target = entity.cast.map_or(NO_ENTITY, |cast| cast.target);

        if slot == LOCAL_PLAYER_SLOT {
            state.player = PlayerContext::new(target, ActorState::casting(id, kind));
        }
        if target == NO_ENTITY {
            return;
        }

        match kind {
            EffectKind::Revival => {
                // Keep the first raiser's credit unless it belongs to the
                // local player's last cast.
                let local_caster = state.player.state.caster();
                let may_credit = state
                    .table
                    .get(target)
                    .is_none_or(|credited| credited.caster() == local_caster);
                if may_credit {
                    credit(&mut state.table, target, id, kind);
                }
            }
            EffectKind::Cleanse => credit(&mut state.table, target, id, kind),
            EffectKind::None => {}
        }
    }
}

fn credit(table: &mut DerivedStateTable, target: EntityId, caster: EntityId, kind: EffectKind) {
    table.upsert(target, ActorState::casting(caster, kind), |s| {
        s.with_caster(caster, kind)
    });
}

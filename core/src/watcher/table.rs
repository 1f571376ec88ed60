use hashbrown::HashMap;

use crate::game_data::{Eligibility, Job};
use crate::roster::{EntityId, NO_ENTITY, Position};

use super::ActorState;

/// Output of the watcher, rebuilt every scan cycle.
///
/// `states` only holds entities with something to report; absence means
/// "nothing known". The name and position caches outlive a cycle so a corpse
/// that drops out of the scan window can still be labelled and located.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedStateTable {
    states: HashMap<EntityId, ActorState>,
    names: HashMap<EntityId, String>,
    positions: HashMap<EntityId, Position>,
}

impl DerivedStateTable {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Per-cycle state ---

    pub fn get(&self, id: EntityId) -> Option<ActorState> {
        self.states.get(&id).copied()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.states.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, ActorState)> + '_ {
        self.states.iter().map(|(&id, &state)| (id, state))
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub(crate) fn set(&mut self, id: EntityId, state: ActorState) {
        self.states.insert(id, state);
    }

    /// Replace the entry for `id` with `f(existing)`, or insert `fresh`
    pub(crate) fn upsert(
        &mut self,
        id: EntityId,
        fresh: ActorState,
        f: impl FnOnce(ActorState) -> ActorState,
    ) {
        let next = self.states.get(&id).map_or(fresh, |&state| f(state));
        self.states.insert(id, next);
    }

    pub(crate) fn retain_states(&mut self, mut keep: impl FnMut(EntityId) -> bool) {
        self.states.retain(|&id, _| keep(id));
    }

    /// Start a new cycle: drop the derived states, keep the caches
    pub(crate) fn begin_cycle(&mut self) {
        self.states.clear();
    }

    // --- Caches ---

    pub fn name(&self, id: EntityId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    pub fn position(&self, id: EntityId) -> Option<Position> {
        self.positions.get(&id).copied()
    }

    pub fn cached_names(&self) -> usize {
        self.names.len()
    }

    pub(crate) fn cache_name(&mut self, id: EntityId, name: &str) {
        if !self.names.contains_key(&id) {
            self.names.insert(id, name.to_owned());
        }
    }

    pub(crate) fn cache_position(&mut self, id: EntityId, position: Position) {
        self.positions.insert(id, position);
    }

    /// Drop everything, caches included
    pub(crate) fn clear(&mut self) {
        self.states.clear();
        self.names.clear();
        self.positions.clear();
    }
}

/// What the local player is casting this cycle.
///
/// `target == NO_ENTITY` means the local player is not casting a tracked
/// effect. `state` records the local player as caster and survives into the
/// next cycle, where the revival tie-break compares against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerContext {
    pub target: EntityId,
    pub state: ActorState,
}

impl PlayerContext {
    pub fn new(target: EntityId, state: ActorState) -> Self {
        Self { target, state }
    }

    pub fn is_casting(&self) -> bool {
        self.target != NO_ENTITY
    }

    /// Reset the target for a new cycle, keeping the previous caster state
    pub(crate) fn begin_cycle(self) -> Self {
        Self {
            target: NO_ENTITY,
            state: self.state,
        }
    }
}

/// The entity in the local player's slot, `id == NO_ENTITY` when empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LocalPlayer {
    pub id: EntityId,
    pub job: Job,
    pub level: u8,
}

impl LocalPlayer {
    pub fn is(&self, id: EntityId) -> bool {
        self.id != NO_ENTITY && self.id == id
    }

    pub fn eligibility(&self) -> Eligibility {
        Eligibility::new(self.job, self.level)
    }
}

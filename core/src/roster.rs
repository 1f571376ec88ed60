//! Typed access to the host's entity roster.
//!
//! The host exposes its visible entities as a fixed-size, slot-indexed table.
//! Player characters occupy the even slots (odd slots hold their companions)
//! and slot 0 is always the local player. Hosts implement [`EntityRoster`]
//! over whatever storage they have; the watcher only sees
//! [`EntitySnapshot`]s.

use serde::{Deserialize, Serialize};

use crate::game_data::Job;

/// Game object id. Unique among present entities, may be reused after despawn.
pub type EntityId = u32;

/// "No entity" / "no active caster"
pub const NO_ENTITY: EntityId = 0;

/// Slots in the host roster that can hold players or their companions
pub const ROSTER_LENGTH: usize = 200;

/// Players sit on every other slot
pub const PLAYER_SLOT_STRIDE: usize = 2;

/// The local player's slot
pub const LOCAL_PLAYER_SLOT: usize = 0;

/// Size of an entity's status list
pub const MAX_STATUS_EFFECTS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    #[default]
    Player,
    BattleNpc,
    EventNpc,
    Companion,
    Other,
}

/// What kind of thing an entity is currently casting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    #[default]
    Action,
    Item,
    Other,
}

/// An in-flight cast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastInfo {
    #[serde(default)]
    pub action_type: ActionType,
    pub action_id: u32,
    #[serde(default)]
    pub target: EntityId,
}

/// Borrowed view of one roster entity, valid for one scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntitySnapshot<'a> {
    pub id: EntityId,
    pub kind: ObjectKind,
    pub name: &'a str,
    pub position: Position,
    pub is_dead: bool,
    pub job: Job,
    pub level: u8,
    pub cast: Option<CastInfo>,
    /// Active status ids. Zero entries are empty status slots.
    pub statuses: &'a [u16],
}

impl EntitySnapshot<'_> {
    pub fn is_player(&self) -> bool {
        self.kind == ObjectKind::Player
    }

    /// Occupied status slots, bounded to the size of the game's status list
    pub fn active_statuses(&self) -> impl Iterator<Item = u16> + '_ {
        self.statuses
            .iter()
            .take(MAX_STATUS_EFFECTS)
            .copied()
            .filter(|&id| id != 0)
    }
}

/// Slot-indexed read access to the visible entities.
pub trait EntityRoster {
    /// Number of addressable slots
    fn slot_count(&self) -> usize {
        ROSTER_LENGTH
    }

    /// Entity in `slot`, or `None` if the slot is empty or unreadable
    fn entity(&self, slot: usize) -> Option<EntitySnapshot<'_>>;
}

// ═══════════════════════════════════════════════════════════════════════════
// Owned roster
// ═══════════════════════════════════════════════════════════════════════════

/// Owned entity data, for hosts that copy the roster out and for fixtures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorRecord {
    pub id: EntityId,
    #[serde(default)]
    pub kind: ObjectKind,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub is_dead: bool,
    #[serde(default)]
    pub job: Job,
    #[serde(default)]
    pub level: u8,
    #[serde(default)]
    pub cast: Option<CastInfo>,
    #[serde(default)]
    pub statuses: Vec<u16>,
}

impl ActorRecord {
    pub fn player(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            kind: ObjectKind::Player,
            name: name.into(),
            position: Position::default(),
            is_dead: false,
            job: Job::Adv,
            level: 0,
            cast: None,
            statuses: Vec::new(),
        }
    }

    pub fn snapshot(&self) -> EntitySnapshot<'_> {
        EntitySnapshot {
            id: self.id,
            kind: self.kind,
            name: &self.name,
            position: self.position,
            is_dead: self.is_dead,
            job: self.job,
            level: self.level,
            cast: self.cast,
            statuses: &self.statuses,
        }
    }
}

/// A roster held in memory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticRoster {
    slots: Vec<Option<ActorRecord>>,
}

impl StaticRoster {
    pub fn new() -> Self {
        Self {
            slots: vec![None; ROSTER_LENGTH],
        }
    }

    /// Put `record` into `slot`. Slots past the roster length are ignored.
    pub fn place(&mut self, slot: usize, record: ActorRecord) {
        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = Some(record);
        }
    }

    pub fn vacate(&mut self, slot: usize) {
        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = None;
        }
    }

    pub fn get(&self, slot: usize) -> Option<&ActorRecord> {
        self.slots.get(slot)?.as_ref()
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut ActorRecord> {
        self.slots.get_mut(slot)?.as_mut()
    }
}

impl EntityRoster for StaticRoster {
    fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn entity(&self, slot: usize) -> Option<EntitySnapshot<'_>> {
        self.get(slot).map(ActorRecord::snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_statuses_skip_empty_slots_and_cap_length() {
        let mut record = ActorRecord::player(1, "A");
        record.statuses = vec![0, 17, 0, 3];
        record.statuses.extend(std::iter::repeat_n(9, 30));
        let snapshot = record.snapshot();
        let active: Vec<u16> = snapshot.active_statuses().collect();
        assert_eq!(&active[..2], &[17, 3]);
        // 20 slots read, two of them empty
        assert_eq!(active.len(), MAX_STATUS_EFFECTS - 2);
    }

    #[test]
    fn out_of_range_slots_read_as_empty() {
        let mut roster = StaticRoster::new();
        roster.place(ROSTER_LENGTH + 4, ActorRecord::player(1, "A"));
        assert_eq!(roster.entity(ROSTER_LENGTH + 4), None);
        assert_eq!(roster.entity(ROSTER_LENGTH * 10), None);
        roster.place(2, ActorRecord::player(2, "B"));
        assert_eq!(roster.entity(2).map(|e| e.id), Some(2));
        roster.vacate(2);
        assert_eq!(roster.entity(2), None);
    }
}

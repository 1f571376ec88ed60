//! Status effects and zone attributes from the game's static data sheets.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Statuses a dead player carries while a resurrection is pending
pub static REVIVAL_MARKER_STATUS_IDS: phf::Set<u16> = phf::phf_set! {
    148u16,
    1140u16,
};

pub fn is_revival_marker(status_id: u16) -> bool {
    REVIVAL_MARKER_STATUS_IDS.contains(&status_id)
}

/// One row of the status sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusInfo {
    pub id: u16,
    pub name: String,
    #[serde(default)]
    pub can_dispel: bool,
}

impl StatusInfo {
    pub fn new(id: u16, name: impl Into<String>, can_dispel: bool) -> Self {
        Self {
            id,
            name: name.into(),
            can_dispel,
        }
    }

    /// Statuses the watcher can monitor: dispellable and named
    pub fn is_watchable(&self) -> bool {
        self.can_dispel && !self.name.is_empty()
    }
}

/// Read access to the game's static data.
pub trait GameData {
    /// Every row of the status sheet
    fn statuses(&self) -> Vec<StatusInfo>;

    /// Whether the zone is a player-versus-player zone
    fn is_pvp_zone(&self, zone_id: u16) -> bool;
}

/// Table-backed [`GameData`], for hosts that export the sheets up front
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticGameData {
    #[serde(default)]
    pub statuses: Vec<StatusInfo>,
    #[serde(default)]
    pub pvp_zones: BTreeSet<u16>,
}

impl StaticGameData {
    pub fn new(statuses: Vec<StatusInfo>, pvp_zones: impl IntoIterator<Item = u16>) -> Self {
        Self {
            statuses,
            pvp_zones: pvp_zones.into_iter().collect(),
        }
    }
}

impl GameData for StaticGameData {
    fn statuses(&self) -> Vec<StatusInfo> {
        self.statuses.clone()
    }

    fn is_pvp_zone(&self, zone_id: u16) -> bool {
        self.pvp_zones.contains(&zone_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revival_markers() {
        assert!(is_revival_marker(148));
        assert!(is_revival_marker(1140));
        assert!(!is_revival_marker(0));
        assert!(!is_revival_marker(149));
    }

    #[test]
    fn unnamed_or_undispellable_statuses_are_not_watchable() {
        assert!(StatusInfo::new(17, "Paralysis", true).is_watchable());
        assert!(!StatusInfo::new(18, "", true).is_watchable());
        assert!(!StatusInfo::new(19, "Weakness", false).is_watchable());
    }

    #[test]
    fn static_game_data_zone_lookup() {
        let data = StaticGameData::new(vec![], [376, 554]);
        assert!(data.is_pvp_zone(376));
        assert!(!data.is_pvp_zone(132));
    }
}

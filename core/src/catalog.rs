//! Monitored / ignored partition of the dispellable statuses.
//!
//! The universe is every named, dispellable row of the game's status sheet.
//! All of them start out monitored; the persisted override set lists the ids
//! the user moved to the ignored side. The catalog itself is pure data; the
//! owning [`WatcherContext`](crate::WatcherContext) writes the override back
//! through its settings store after every change.

use std::collections::{BTreeMap, BTreeSet};

use crate::game_data::{GameData, StatusInfo};

/// A status the user can monitor or ignore
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: u16,
    pub name: String,
    /// Lowercased name; statuses sharing it are toggled together
    group: String,
}

impl CatalogEntry {
    fn from_status(status: StatusInfo) -> Self {
        let group = status.name.to_lowercase();
        Self {
            id: status.id,
            name: status.name,
            group,
        }
    }
}

/// Result of building a catalog from static data plus a persisted override
#[derive(Debug)]
pub struct CatalogLoad {
    pub catalog: StatusCatalog,
    /// Override ids that are no longer dispellable statuses
    pub stale: Vec<u16>,
    /// Ids ignored because another status with the same name was
    pub widened: Vec<u16>,
}

impl CatalogLoad {
    pub fn needs_repersist(&self) -> bool {
        !self.stale.is_empty() || !self.widened.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusCatalog {
    monitored: BTreeMap<u16, CatalogEntry>,
    ignored: BTreeMap<u16, CatalogEntry>,
}

impl StatusCatalog {
    /// Build the partition from the status sheet and the persisted override.
    ///
    /// Statuses sharing a name are never split: if the override ignores any
    /// of them, all of them are ignored.
    pub fn load(game_data: &dyn GameData, unmonitored: &BTreeSet<u16>) -> CatalogLoad {
        Self::from_statuses(game_data.statuses(), unmonitored)
    }

    pub fn from_statuses(
        statuses: impl IntoIterator<Item = StatusInfo>,
        unmonitored: &BTreeSet<u16>,
    ) -> CatalogLoad {
        let mut monitored: BTreeMap<u16, CatalogEntry> = statuses
            .into_iter()
            .filter(StatusInfo::is_watchable)
            .map(|status| (status.id, CatalogEntry::from_status(status)))
            .collect();
        let mut ignored = BTreeMap::new();
        let mut stale = Vec::new();

        for &id in unmonitored {
            match monitored.remove(&id) {
                Some(entry) => {
                    ignored.insert(id, entry);
                }
                None => stale.push(id),
            }
        }

        let ignored_groups: BTreeSet<String> =
            ignored.values().map(|entry| entry.group.clone()).collect();
        let widened: Vec<u16> = monitored
            .values()
            .filter(|entry| ignored_groups.contains(&entry.group))
            .map(|entry| entry.id)
            .collect();
        for id in &widened {
            if let Some(entry) = monitored.remove(id) {
                ignored.insert(*id, entry);
            }
        }

        if !stale.is_empty() {
            tracing::warn!(?stale, "Dropping unknown statuses from the ignored list");
        }
        if !widened.is_empty() {
            tracing::warn!(?widened, "Ignoring statuses that share a name with ignored ones");
        }

        CatalogLoad {
            catalog: Self { monitored, ignored },
            stale,
            widened,
        }
    }

    pub fn is_monitored(&self, status_id: u16) -> bool {
        self.monitored.contains_key(&status_id)
    }

    pub fn is_ignored(&self, status_id: u16) -> bool {
        self.ignored.contains_key(&status_id)
    }

    pub fn contains(&self, status_id: u16) -> bool {
        self.is_monitored(status_id) || self.is_ignored(status_id)
    }

    /// Monitored statuses, ordered by id
    pub fn monitored(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.monitored.values()
    }

    /// Ignored statuses, ordered by id
    pub fn ignored(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.ignored.values()
    }

    pub fn monitored_len(&self) -> usize {
        self.monitored.len()
    }

    pub fn ignored_len(&self) -> usize {
        self.ignored.len()
    }

    /// The override set to persist
    pub fn ignored_ids(&self) -> BTreeSet<u16> {
        self.ignored.keys().copied().collect()
    }

    /// Move a status to the other side, together with every status sharing
    /// its name. Returns false if the id is not a dispellable status.
    pub fn toggle(&mut self, status_id: u16) -> bool {
        if let Some(group) = self.monitored.get(&status_id).map(|e| e.group.clone()) {
            move_group(&mut self.monitored, &mut self.ignored, &group);
            true
        } else if let Some(group) = self.ignored.get(&status_id).map(|e| e.group.clone()) {
            move_group(&mut self.ignored, &mut self.monitored, &group);
            true
        } else {
            tracing::warn!(status_id, "Cannot toggle status, it is not a dispellable status");
            false
        }
    }

    /// Ignore every status. Returns whether anything moved.
    pub fn clear_monitored(&mut self) -> bool {
        if self.monitored.is_empty() {
            return false;
        }
        self.ignored.append(&mut self.monitored);
        true
    }

    /// Monitor every status. Returns whether anything moved.
    pub fn clear_ignored(&mut self) -> bool {
        if self.ignored.is_empty() {
            return false;
        }
        self.monitored.append(&mut self.ignored);
        true
    }
}

fn move_group(
    from: &mut BTreeMap<u16, CatalogEntry>,
    to: &mut BTreeMap<u16, CatalogEntry>,
    group: &str,
) {
    let ids: Vec<u16> = from
        .values()
        .filter(|entry| entry.group == group)
        .map(|entry| entry.id)
        .collect();
    for id in ids {
        if let Some(entry) = from.remove(&id) {
            to.insert(id, entry);
        }
    }
}

//! Scenario files: static game data plus one roster snapshot per frame.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use rezwatch_core::StaticGameData;
use rezwatch_core::roster::{ActorRecord, ROSTER_LENGTH, StaticRoster};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse scenario {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("frame {frame}: slot {slot} is outside the roster")]
    SlotOutOfRange { frame: usize, slot: usize },
    #[error("frame {frame}: slot {slot} is used twice")]
    DuplicateSlot { frame: usize, slot: usize },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub game_data: StaticGameData,
    #[serde(default)]
    pub frames: Vec<Frame>,
}

/// One host frame
#[derive(Debug, Clone, Deserialize)]
pub struct Frame {
    /// Zone change delivered before this frame's tick
    #[serde(default)]
    pub zone: Option<u16>,
    /// Number of consecutive ticks this roster is held for
    #[serde(default = "default_repeat")]
    pub repeat: u32,
    #[serde(default)]
    pub actors: Vec<SlotActor>,
}

fn default_repeat() -> u32 {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlotActor {
    pub slot: usize,
    #[serde(flatten)]
    pub actor: ActorRecord,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let text = std::fs::read_to_string(path).map_err(|source| ScenarioError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| ScenarioError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Reject frames that cannot be laid out on a roster
    pub fn validate(&self) -> Result<(), ScenarioError> {
        for (frame, f) in self.frames.iter().enumerate() {
            let mut used = BTreeSet::new();
            for entry in &f.actors {
                if entry.slot >= ROSTER_LENGTH {
                    return Err(ScenarioError::SlotOutOfRange {
                        frame,
                        slot: entry.slot,
                    });
                }
                if !used.insert(entry.slot) {
                    return Err(ScenarioError::DuplicateSlot {
                        frame,
                        slot: entry.slot,
                    });
                }
            }
        }
        Ok(())
    }

    /// Total ticks the scenario runs for
    pub fn tick_count(&self) -> u64 {
        self.frames.iter().map(|f| u64::from(f.repeat)).sum()
    }
}

impl Frame {
    pub fn roster(&self) -> StaticRoster {
        let mut roster = StaticRoster::new();
        for entry in &self.actors {
            roster.place(entry.slot, entry.actor.clone());
        }
        roster
    }
}

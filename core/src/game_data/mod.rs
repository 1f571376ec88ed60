mod actions;
mod job;
mod statuses;

pub use actions::{ACTION_EFFECTS, classify_action, classify_cast};
pub use job::{Eligibility, Job};
pub use statuses::{
    GameData, REVIVAL_MARKER_STATUS_IDS, StaticGameData, StatusInfo, is_revival_marker,
};

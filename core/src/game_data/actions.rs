//! Resurrection and cleanse abilities.
//!
//! Every action id that raises a dead player or removes a detrimental
//! status, across all jobs and special content actions. Casts of anything
//! else classify as [`EffectKind::None`].

use crate::roster::{ActionType, CastInfo};
use crate::watcher::EffectKind;

pub static ACTION_EFFECTS: phf::Map<u32, EffectKind> = phf::phf_map! {
    173u32 => EffectKind::Revival,   // Resurrection (ACN, SMN, SCH)
    125u32 => EffectKind::Revival,   // Raise (CNJ, WHM)
    3603u32 => EffectKind::Revival,  // Ascend (AST)
    18317u32 => EffectKind::Revival, // Angel Whisper (BLU)
    208u32 => EffectKind::Revival,   // Pulse of Life (WHM LB3)
    4247u32 => EffectKind::Revival,  // Angel Feathers (SCH LB3)
    4248u32 => EffectKind::Revival,  // Astral Stasis (AST LB3)
    7523u32 => EffectKind::Revival,  // Verraise (RDM)
    24287u32 => EffectKind::Revival, // Egeiro (SGE)
    22345u32 => EffectKind::Revival, // Lost Sacrifice (Bozja)
    20730u32 => EffectKind::Revival, // Lost Arise (Bozja)
    12996u32 => EffectKind::Revival, // Raise L (Eureka)

    7568u32 => EffectKind::Cleanse,  // Esuna
    3561u32 => EffectKind::Cleanse,  // The Warden's Paean (instant)
    18318u32 => EffectKind::Cleanse, // Exuviation (BLU)
};

/// Classify an action id into the revival/cleanse domain
pub fn classify_action(action_id: u32) -> EffectKind {
    ACTION_EFFECTS
        .get(&action_id)
        .copied()
        .unwrap_or(EffectKind::None)
}

/// Classify an in-flight cast. Only casts of regular actions count; item use
/// and other cast types never credit anyone.
pub fn classify_cast(cast: Option<&CastInfo>) -> EffectKind {
    match cast {
        Some(cast) if cast.action_type == ActionType::Action => classify_action(cast.action_id),
        _ => EffectKind::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cast(action_type: ActionType, action_id: u32) -> CastInfo {
        CastInfo {
            action_type,
            action_id,
            target: 7,
        }
    }

    #[test]
    fn known_actions_classify() {
        assert_eq!(classify_action(125), EffectKind::Revival);
        assert_eq!(classify_action(7523), EffectKind::Revival);
        assert_eq!(classify_action(12996), EffectKind::Revival);
        assert_eq!(classify_action(7568), EffectKind::Cleanse);
        assert_eq!(classify_action(18318), EffectKind::Cleanse);
    }

    #[test]
    fn unknown_action_is_none() {
        assert_eq!(classify_action(0), EffectKind::None);
        assert_eq!(classify_action(7), EffectKind::None);
        assert_eq!(classify_action(u32::MAX), EffectKind::None);
    }

    #[test]
    fn only_action_casts_are_classified() {
        assert_eq!(classify_cast(Some(&cast(ActionType::Action, 125))), EffectKind::Revival);
        // Item id colliding with a raise action id
        assert_eq!(classify_cast(Some(&cast(ActionType::Item, 125))), EffectKind::None);
        assert_eq!(classify_cast(Some(&cast(ActionType::Other, 7568))), EffectKind::None);
        assert_eq!(classify_cast(None), EffectKind::None);
    }
}

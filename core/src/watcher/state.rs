use crate::roster::{EntityId, NO_ENTITY};

/// The two effect domains the watcher cares about.
///
/// Shared by in-flight casts (who is raising / cleansing) and passive
/// status markers (already raised / carrying a monitored status).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EffectKind {
    #[default]
    None,
    Revival,
    Cleanse,
}

impl EffectKind {
    pub fn is_none(self) -> bool {
        self == EffectKind::None
    }
}

/// Derived per-entity state.
///
/// A plain value: every change produces a new `ActorState` so a half-built
/// entry from the current cycle is never confused with a previous one.
/// `caster != NO_ENTITY` always implies `kind != EffectKind::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ActorState {
    caster: EntityId,
    kind: EffectKind,
    has_monitored_status: bool,
}

impl ActorState {
    pub const NOTHING: ActorState = ActorState {
        caster: NO_ENTITY,
        kind: EffectKind::None,
        has_monitored_status: false,
    };

    /// Dead and already carrying a pending revival
    pub const REVIVED: ActorState = ActorState {
        caster: NO_ENTITY,
        kind: EffectKind::Revival,
        has_monitored_status: false,
    };

    /// Alive with a monitored status and nobody acting on it yet
    pub const MONITORED: ActorState = ActorState {
        caster: NO_ENTITY,
        kind: EffectKind::None,
        has_monitored_status: true,
    };

    /// `caster` is casting `kind` on the entity owning this state
    pub fn casting(caster: EntityId, kind: EffectKind) -> Self {
        Self::NOTHING.with_caster(caster, kind)
    }

    pub fn caster(&self) -> EntityId {
        self.caster
    }

    pub fn kind(&self) -> EffectKind {
        self.kind
    }

    pub fn has_monitored_status(&self) -> bool {
        self.has_monitored_status
    }

    /// Someone is actively casting on this entity
    pub fn has_caster(&self) -> bool {
        self.caster != NO_ENTITY
    }

    pub fn with_monitored_status(self, has_monitored_status: bool) -> Self {
        Self {
            has_monitored_status,
            ..self
        }
    }

    /// Credit `caster` with a `kind` cast, keeping the monitored flag.
    /// Crediting with `EffectKind::None` clears the caster.
    pub fn with_caster(self, caster: EntityId, kind: EffectKind) -> Self {
        let caster = if kind.is_none() { NO_ENTITY } else { caster };
        Self {
            caster,
            kind,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crediting_keeps_monitored_flag() {
        let state = ActorState::MONITORED.with_caster(5, EffectKind::Cleanse);
        assert_eq!(state.caster(), 5);
        assert_eq!(state.kind(), EffectKind::Cleanse);
        assert!(state.has_monitored_status());
    }

    #[test]
    fn monitored_flag_keeps_credit() {
        let state = ActorState::casting(9, EffectKind::Revival).with_monitored_status(true);
        assert_eq!(state.caster(), 9);
        assert_eq!(state.kind(), EffectKind::Revival);
        assert!(state.has_monitored_status());
    }

    #[test]
    fn caster_without_kind_is_unrepresentable() {
        let state = ActorState::casting(9, EffectKind::None);
        assert!(!state.has_caster());
        assert_eq!(state, ActorState::NOTHING);
    }
}

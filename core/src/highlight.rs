//! Highlight projection
//!
//! Turns one cycle of scan output into what a renderer should draw: a frame
//! color for the party/alliance list, a caster label, and an optional
//! in-world label anchored at the target's cached position. Nothing here
//! touches pixels; renderers consume [`Highlight`] values.

use rezwatch_types::{PackedColor, RectStyle, WatcherSettings};

use crate::game_data::Eligibility;
use crate::roster::{EntityId, NO_ENTITY, Position};
use crate::watcher::{ActorState, DerivedStateTable, EffectKind, LocalPlayer, PlayerContext};

/// Shown as the caster when a player raises themselves
pub const SELF_RAISE_LABEL: &str = "LIMIT BREAK";
/// Shown when the caster's name was never cached
pub const UNKNOWN_CASTER_LABEL: &str = "Unknown";

/// Which highlight domains are drawn this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawGates {
    pub raises: bool,
    pub cleanses: bool,
}

impl DrawGates {
    /// A domain is drawn when enabled, unless it is restricted to capable
    /// jobs and the local player's job cannot perform it
    pub fn new(settings: &WatcherSettings, eligibility: Eligibility) -> Self {
        Self {
            raises: settings.enabled_raise && !(settings.restricted_jobs && !eligibility.can_revive()),
            cleanses: settings.enabled_dispel
                && !(settings.restricted_jobs_dispel && !eligibility.can_cleanse()),
        }
    }

    pub fn any(self) -> bool {
        self.raises || self.cleanses
    }
}

/// Rectangle drawn over the target's party or alliance list entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHighlight {
    pub color: PackedColor,
    /// Fill color, `None` for outline-only styles
    pub fill: Option<PackedColor>,
    /// Outline color, `None` for fill-only styles
    pub outline: Option<PackedColor>,
    /// Draw on the party list
    pub party: bool,
    /// Draw on the alliance lists
    pub alliance: bool,
}

impl FrameHighlight {
    fn new(color: PackedColor, style: RectStyle, party: bool, alliance: bool) -> Self {
        Self {
            color,
            fill: style.fills().then_some(color),
            outline: style.outlines().then(|| style.outline_color(color)),
            party,
            alliance,
        }
    }
}

/// Text label drawn in the world above a target
#[derive(Debug, Clone, PartialEq)]
pub struct InWorldLabel {
    /// Revival or Cleanse; selects the icon and background
    pub domain: EffectKind,
    pub text: String,
    pub show_icon: bool,
    pub icon_scale: f32,
    pub show_text: bool,
    pub background: PackedColor,
}

/// Everything a renderer needs for one entry of the derived table
#[derive(Debug, Clone, PartialEq)]
pub struct Highlight {
    pub target: EntityId,
    pub state: ActorState,
    /// Party/alliance frame rectangle, `None` when nothing should be drawn
    pub frame: Option<FrameHighlight>,
    /// Caster name for the party frame; empty when there is none to show
    pub caster_label: String,
    /// In-world label, `None` when the domain is gated off
    pub label: Option<InWorldLabel>,
    /// World-space anchor for the label; `None` when suppressed or unknown
    pub anchor: Option<Position>,
}

impl Highlight {
    pub fn frame_color(&self) -> Option<PackedColor> {
        self.frame.map(|frame| frame.color)
    }
}

/// Read-only view over one cycle of scan output
pub struct HighlightProjector<'a> {
    table: &'a DerivedStateTable,
    player: PlayerContext,
    local: LocalPlayer,
    settings: &'a WatcherSettings,
    gates: DrawGates,
}

impl<'a> HighlightProjector<'a> {
    pub fn new(
        table: &'a DerivedStateTable,
        player: PlayerContext,
        local: LocalPlayer,
        settings: &'a WatcherSettings,
    ) -> Self {
        let gates = DrawGates::new(settings, local.eligibility());
        Self {
            table,
            player,
            local,
            settings,
            gates,
        }
    }

    /// Project every drawable entry, ordered by target id
    pub fn project(&self) -> Vec<Highlight> {
        if !self.gates.any() {
            return Vec::new();
        }

        let mut entries: Vec<(EntityId, ActorState)> = self.table.iter().collect();
        entries.sort_unstable_by_key(|&(id, _)| id);

        entries
            .into_iter()
            .filter_map(|(target, state)| self.project_entry(target, state))
            .collect()
    }

    /// Project one entry; `None` when its domain is gated off
    pub fn project_entry(&self, target: EntityId, state: ActorState) -> Option<Highlight> {
        if !self.gates.raises && state.kind() == EffectKind::Revival && !state.has_monitored_status()
        {
            return None;
        }
        if !self.gates.cleanses && state.kind() != EffectKind::Revival {
            return None;
        }

        let caster_name = self.caster_name(target, state);
        let caster_label = if self.settings.show_caster_names {
            caster_name.clone()
        } else {
            String::new()
        };

        Some(Highlight {
            target,
            state,
            frame: self.frame(target, state),
            caster_label,
            label: self.in_world_label(&caster_name, state),
            anchor: self.anchor(target, state),
        })
    }

    fn frame(&self, target: EntityId, state: ActorState) -> Option<FrameHighlight> {
        let settings = self.settings;
        if !settings.show_group_frame && !settings.show_alliance_frame {
            return None;
        }
        let color = self.frame_color(target, state)?;
        Some(FrameHighlight::new(
            color,
            settings.rect_style,
            settings.show_group_frame,
            settings.show_alliance_frame,
        ))
    }

    /// Frame color for an entry
    pub fn frame_color(&self, target: EntityId, state: ActorState) -> Option<PackedColor> {
        let colors = &self.settings.colors;
        let player_on_target = self.player.target != NO_ENTITY && self.player.target == target;
        let someone_else_credited = state.caster() != self.player.state.caster();

        if self.gates.cleanses {
            if state.has_monitored_status() {
                if state.kind() == EffectKind::Cleanse && state.has_caster() {
                    return Some(if player_on_target && someone_else_credited {
                        colors.double_raise
                    } else {
                        colors.currently_cleansing
                    });
                }
                return Some(colors.dispellable);
            }
            if state.kind() == EffectKind::Cleanse {
                // Status already gone; only worth flagging if we are wasting a cast on it
                return player_on_target.then_some(colors.double_raise);
            }
        }

        if self.gates.raises {
            if !state.has_caster() {
                return Some(if player_on_target {
                    colors.double_raise
                } else {
                    colors.raised
                });
            }
            return Some(if player_on_target && someone_else_credited {
                colors.double_raise
            } else {
                colors.currently_raising
            });
        }

        None
    }

    fn caster_name(&self, target: EntityId, state: ActorState) -> String {
        let caster = state.caster();
        if state.kind() != EffectKind::Cleanse {
            if caster == target {
                return SELF_RAISE_LABEL.to_string();
            }
            if caster == NO_ENTITY {
                return String::new();
            }
        }
        self.table
            .name(caster)
            .unwrap_or(UNKNOWN_CASTER_LABEL)
            .to_string()
    }

    fn in_world_label(&self, caster_name: &str, state: ActorState) -> Option<InWorldLabel> {
        let (domain, text) = if !state.has_caster() {
            if state.has_monitored_status() {
                (EffectKind::Cleanse, "Needs Cleanse".to_string())
            } else {
                (EffectKind::Revival, "Already Raised".to_string())
            }
        } else if state.kind() == EffectKind::Revival {
            (EffectKind::Revival, format!("Raise: {caster_name}"))
        } else {
            (EffectKind::Cleanse, format!("Cleanse: {caster_name}"))
        };

        let settings = self.settings;
        match domain {
            EffectKind::Revival if self.gates.raises => Some(InWorldLabel {
                domain,
                text,
                show_icon: settings.show_icon,
                icon_scale: settings.icon_scale,
                show_text: settings.show_in_world_text,
                background: settings.colors.in_world_background_raise,
            }),
            EffectKind::Cleanse if self.gates.cleanses => Some(InWorldLabel {
                domain,
                text,
                show_icon: settings.show_icon_dispel,
                icon_scale: settings.icon_scale,
                show_text: settings.show_in_world_text_dispel,
                background: settings.colors.in_world_background_cleanse,
            }),
            _ => None,
        }
    }

    fn anchor(&self, target: EntityId, state: ActorState) -> Option<Position> {
        if state.caster() == target {
            return None;
        }
        if self.settings.hide_symbols_on_self && self.local.is(target) {
            return None;
        }
        self.table.position(target)
    }
}

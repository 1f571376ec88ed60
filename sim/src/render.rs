//! Text renderer standing in for the host overlay.

use std::io::Write;

use rezwatch_core::highlight::Highlight;
use rezwatch_core::watcher::DerivedStateTable;
use rezwatch_core::{EffectKind, TickOutcome};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write frame {tick}")]
    Write {
        tick: u64,
        #[source]
        source: std::io::Error,
    },
}

pub struct TextRenderer<W> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write one block for a tick: a header line, then one line per highlight
    pub fn render(
        &mut self,
        tick: u64,
        outcome: TickOutcome,
        table: &DerivedStateTable,
        highlights: &[Highlight],
    ) -> Result<(), RenderError> {
        self.write_frame(tick, outcome, table, highlights)
            .map_err(|source| RenderError::Write { tick, source })
    }

    fn write_frame(
        &mut self,
        tick: u64,
        outcome: TickOutcome,
        table: &DerivedStateTable,
        highlights: &[Highlight],
    ) -> std::io::Result<()> {
        let status = match outcome {
            TickOutcome::Scanned => "scanned",
            TickOutcome::Suspended => "suspended",
            TickOutcome::Disabled => "disabled",
        };
        writeln!(self.out, "tick {tick} [{status}] {} highlight(s)", highlights.len())?;

        for h in highlights {
            let target = match table.name(h.target) {
                Some(name) => name.to_string(),
                None => format!("#{}", h.target),
            };
            let kind = match h.state.kind() {
                EffectKind::Revival => "revival",
                EffectKind::Cleanse => "cleanse",
                EffectKind::None => "status",
            };
            write!(self.out, "  {target:<16} {kind:<8}")?;
            if let Some(frame) = h.frame {
                let lists = match (frame.party, frame.alliance) {
                    (true, true) => "party+alliance",
                    (true, false) => "party",
                    _ => "alliance",
                };
                write!(self.out, " frame[{lists}]=#{:08X}", frame.color.0)?;
                if let Some(outline) = frame.outline {
                    write!(self.out, " outline=#{:08X}", outline.0)?;
                }
            }
            if !h.caster_label.is_empty() {
                write!(self.out, " caster={}", h.caster_label)?;
            }
            if let Some(label) = &h.label {
                if label.show_icon {
                    write!(self.out, " icon x{:.1}", label.icon_scale)?;
                }
                if label.show_text {
                    write!(self.out, " \"{}\"", label.text)?;
                }
            }
            if let Some(pos) = h.anchor {
                write!(self.out, " @({:.1}, {:.1}, {:.1})", pos.x, pos.y, pos.z)?;
            }
            writeln!(self.out)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rezwatch_core::roster::{ActorRecord, Position, StaticRoster};
    use rezwatch_core::watcher::{EntityScanner, ScanState};
    use rezwatch_core::{HighlightProjector, StatusCatalog};
    use rezwatch_types::WatcherSettings;

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("overlay gone"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn scan_corpse() -> ScanState {
        let mut roster = StaticRoster::new();
        let mut corpse = ActorRecord::player(20, "Corpse");
        corpse.is_dead = true;
        corpse.statuses = vec![148];
        corpse.position = Position::new(1.0, 2.0, 3.0);
        roster.place(2, corpse);

        let catalog = StatusCatalog::default();
        let mut state = ScanState::new();
        EntityScanner::new(&catalog).scan(&roster, &mut state);
        state
    }

    #[test]
    fn renders_one_line_per_highlight() {
        let state = scan_corpse();
        let settings = WatcherSettings::default();
        let highlights =
            HighlightProjector::new(&state.table, state.player, state.local, &settings).project();

        let mut renderer = TextRenderer::new(Vec::new());
        renderer
            .render(7, TickOutcome::Scanned, &state.table, &highlights)
            .unwrap();
        let text = String::from_utf8(renderer.into_inner()).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "tick 7 [scanned] 1 highlight(s)");
        assert!(lines[1].contains("Corpse"));
        assert!(lines[1].contains("frame[party+alliance]=#60D2FF00"));
        assert!(lines[1].contains("outline=#FFD2FF00"));
        assert!(lines[1].contains("icon x1.0"));
        assert!(lines[1].contains("\"Already Raised\""));
        assert!(lines[1].contains("@(1.0, 2.0, 3.0)"));
    }

    #[test]
    fn write_failure_is_reported_with_tick() {
        let state = scan_corpse();
        let mut renderer = TextRenderer::new(FailingWriter);
        let err = renderer
            .render(3, TickOutcome::Suspended, &state.table, &[])
            .unwrap_err();
        assert!(matches!(err, RenderError::Write { tick: 3, .. }));
    }
}

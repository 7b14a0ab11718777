//! Per-pane status line.
//!
//! Composition is split in two stages: [`compose_status`] yields ordered
//! segments and [`format_status`] joins them. Inactive panes omit the mode
//! and pending-key segments.
//!
//! Active pane: `NORMAL  name[+]  3:7  2d`
//! Inactive pane: `name  1:1`

use core_events::KeySequence;
use core_state::Mode;

pub struct StatusContext<'a> {
    pub mode: Mode,
    pub active: bool,
    pub name: &'a str,
    pub dirty: bool,
    /// 0-based cursor line.
    pub line: usize,
    /// 0-based visual column.
    pub col: usize,
    pub pending: &'a KeySequence,
    pub repeat: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSegment<'a> {
    Mode(&'static str),
    Name { name: &'a str, dirty: bool },
    Position { line_1: usize, col_1: usize },
    /// Count prefix and keys typed so far in an unfinished gesture.
    Pending(String),
}

pub fn compose_status<'a>(ctx: &StatusContext<'a>) -> Vec<StatusSegment<'a>> {
    let mut segs = Vec::with_capacity(4);
    if ctx.active {
        segs.push(StatusSegment::Mode(ctx.mode.label()));
    }
    segs.push(StatusSegment::Name {
        name: ctx.name,
        dirty: ctx.dirty,
    });
    segs.push(StatusSegment::Position {
        line_1: ctx.line + 1,
        col_1: ctx.col + 1,
    });
    if ctx.active && (ctx.repeat > 0 || !ctx.pending.is_empty()) {
        let mut pending = String::new();
        if ctx.repeat > 0 {
            pending.push_str(&ctx.repeat.to_string());
        }
        pending.push_str(&ctx.pending.to_string());
        segs.push(StatusSegment::Pending(pending));
    }
    segs
}

pub fn format_status(segs: &[StatusSegment<'_>]) -> String {
    let parts: Vec<String> = segs
        .iter()
        .map(|s| match s {
            StatusSegment::Mode(label) => (*label).to_string(),
            StatusSegment::Name { name, dirty } => {
                if *dirty {
                    format!("{name} [+]")
                } else {
                    (*name).to_string()
                }
            }
            StatusSegment::Position { line_1, col_1 } => format!("{line_1}:{col_1}"),
            StatusSegment::Pending(keys) => keys.clone(),
        })
        .collect();
    format!(" {}", parts.join("  "))
}

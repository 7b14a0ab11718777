//! Model to [`Frame`] translation.

use core_events::KeySequence;
use core_model::{EditorModel, LayoutRegion, NodeId, PANE_STATUS_ROWS, Pane};
use core_state::{BufferEntry, Mode};
use core_text::grapheme::visual_col;

use crate::status::{StatusContext, compose_status, format_status};
use crate::{CellFlags, Frame};

const SEPARATOR: &str = "│";
const EMPTY_LINE: &str = "~";

/// Everything one frame is drawn from.
pub struct FrameInput<'a> {
    pub model: &'a EditorModel,
    pub pending: &'a KeySequence,
    pub repeat: u32,
    pub width: u16,
    pub height: u16,
}

pub fn compose_frame(input: &FrameInput<'_>) -> Frame {
    let mut frame = Frame::new(input.width, input.height);
    let model = input.model;
    let cmd_rows = (model.state.command.rows() as u16).min(input.height);
    let pane_area = LayoutRegion::new(0, 0, input.width, input.height - cmd_rows);

    if pane_area.height > 0 && pane_area.width > 0 {
        let layout = model.panes.layout(pane_area);
        let current = model.panes.current();
        for &(id, region) in layout.regions() {
            if let Some(pane) = model.panes.pane(id) {
                draw_pane(&mut frame, input, id == current, pane, region);
            }
        }
        for sep in layout.separators() {
            for y in sep.y..sep.y + sep.height {
                for x in sep.x..sep.x + sep.width {
                    frame.set_cluster(x, y, SEPARATOR, 1, CellFlags::empty());
                }
            }
        }
        if model.state.mode() != Mode::Command {
            frame.cursor = pane_cursor(model, current, layout.region_of(current));
        }
    }

    if cmd_rows > 0 {
        draw_command_window(&mut frame, model, pane_area.height, cmd_rows);
    }
    frame
}

fn display_name(entry: &BufferEntry) -> &str {
    entry
        .path
        .as_deref()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .unwrap_or(&entry.buffer.name)
}

fn draw_pane(frame: &mut Frame, input: &FrameInput<'_>, active: bool, pane: &Pane, region: LayoutRegion) {
    let Some(entry) = input.model.state.buffers.get(pane.buffer) else {
        tracing::warn!(target: "runtime", buffer = pane.buffer.get(), "pane_without_buffer");
        return;
    };
    let buffer = &entry.buffer;
    let text_rows = region.height.saturating_sub(PANE_STATUS_ROWS);
    let gutter = pane.gutter.width.min(region.width);

    for row in 0..text_rows {
        let y = region.y + row;
        let idx = pane.viewport_first_line + row as usize;
        match buffer.line(idx) {
            Some(line) => {
                if gutter > 0 {
                    let label = format!("{:>w$} ", idx + 1, w = (gutter - 1) as usize);
                    frame.put_str(region.x, y, gutter, &label, CellFlags::empty());
                }
                frame.put_str(region.x + gutter, y, region.width - gutter, &line, CellFlags::empty());
            }
            None => {
                frame.put_str(region.x, y, region.width, EMPTY_LINE, CellFlags::empty());
            }
        }
    }

    if region.height >= PANE_STATUS_ROWS {
        let y = region.y + region.height - PANE_STATUS_ROWS;
        let line = buffer.line(pane.cursor.line).unwrap_or_default();
        let ctx = StatusContext {
            mode: input.model.state.mode(),
            active,
            name: display_name(entry),
            dirty: entry.dirty,
            line: pane.cursor.line,
            col: visual_col(&line, pane.cursor.byte),
            pending: input.pending,
            repeat: input.repeat,
        };
        let text = format_status(&compose_status(&ctx));
        frame.fill(region.x, y, region.width, CellFlags::REVERSE);
        frame.put_str(region.x, y, region.width, &text, CellFlags::REVERSE);
    }
}

fn pane_cursor(model: &EditorModel, id: NodeId, region: Option<LayoutRegion>) -> Option<(u16, u16)> {
    let region = region?;
    let pane = model.panes.pane(id)?;
    let entry = model.state.buffers.get(pane.buffer)?;
    let row = pane.cursor.line.checked_sub(pane.viewport_first_line)?;
    if row >= region.height.saturating_sub(PANE_STATUS_ROWS) as usize {
        return None;
    }
    let line = entry.buffer.line(pane.cursor.line).unwrap_or_default();
    let col = pane.gutter.width as usize + visual_col(&line, pane.cursor.byte);
    let max_col = region.width.saturating_sub(1) as usize;
    Some((region.x + col.min(max_col) as u16, region.y + row as u16))
}

/// Output lines first, then the `:` or `/` prompt on the last row.
fn draw_command_window(frame: &mut Frame, model: &EditorModel, top: u16, rows: u16) {
    let command = &model.state.command;
    let width = frame.width;
    let output = command.output();
    let skip = output.len().saturating_sub(rows.saturating_sub(1) as usize);
    for (i, line) in output.iter().skip(skip).enumerate() {
        frame.put_str(0, top + i as u16, width, line, CellFlags::empty());
    }

    let prompt_y = top + rows - 1;
    if model.state.mode() == Mode::Command {
        let lead = frame.put_str(0, prompt_y, width, command.prompt(), CellFlags::empty());
        let used = frame.put_str(lead, prompt_y, width.saturating_sub(lead), command.input_text(), CellFlags::empty());
        frame.cursor = Some(((lead + used).min(width.saturating_sub(1)), prompt_y));
    }
}

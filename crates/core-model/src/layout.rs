//! Screen geometry for the pane tree.
//!
//! Regions are expressed in terminal cell units (`u16`). A `Layout` is the
//! result of resizing the pane tree into a given area: one region per leaf in
//! tree order (first before second), plus one-column separators drawn between
//! the halves of a vertical split.
//!
//! Invariants:
//! * Leaf regions never overlap each other or a separator.
//! * The union of leaf regions and separators covers the input area exactly.

use crate::pane_tree::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutRegion {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl LayoutRegion {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> u32 {
        u32::from(self.width) * u32::from(self.height)
    }

    /// Split side by side. Reserves a one-column separator when there is room
    /// for at least one column on each side; returns `(first, separator, second)`.
    pub fn split_columns(&self, ratio: f32) -> (LayoutRegion, Option<LayoutRegion>, LayoutRegion) {
        let sep = self.width >= 3;
        let avail = if sep { self.width - 1 } else { self.width };
        let first_w = share(avail, ratio);
        let second_w = avail - first_w;
        let first = LayoutRegion::new(self.x, self.y, first_w, self.height);
        let (separator, second_x) = if sep {
            (
                Some(LayoutRegion::new(self.x + first_w, self.y, 1, self.height)),
                self.x + first_w + 1,
            )
        } else {
            (None, self.x + first_w)
        };
        let second = LayoutRegion::new(second_x, self.y, second_w, self.height);
        (first, separator, second)
    }

    /// Split stacked. Each pane draws its own status row, so no separator.
    pub fn split_rows(&self, ratio: f32) -> (LayoutRegion, LayoutRegion) {
        let first_h = share(self.height, ratio);
        (
            LayoutRegion::new(self.x, self.y, self.width, first_h),
            LayoutRegion::new(self.x, self.y + first_h, self.width, self.height - first_h),
        )
    }
}

/// `total * ratio` rounded down, kept within `1..total` when `total >= 2` so
/// neither side collapses.
fn share(total: u16, ratio: f32) -> u16 {
    let raw = (f32::from(total) * ratio).floor() as u16;
    if total >= 2 {
        raw.clamp(1, total - 1)
    } else {
        raw.min(total)
    }
}

/// Resolved geometry of every leaf in the pane tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    regions: Vec<(NodeId, LayoutRegion)>,
    separators: Vec<LayoutRegion>,
}

impl Layout {
    pub(crate) fn push_region(&mut self, id: NodeId, region: LayoutRegion) {
        self.regions.push((id, region));
    }

    pub(crate) fn push_separator(&mut self, region: LayoutRegion) {
        self.separators.push(region);
    }

    pub fn regions(&self) -> &[(NodeId, LayoutRegion)] {
        &self.regions
    }

    pub fn separators(&self) -> &[LayoutRegion] {
        &self.separators
    }

    pub fn region_of(&self, id: NodeId) -> Option<LayoutRegion> {
        self.regions.iter().find(|(n, _)| *n == id).map(|(_, r)| *r)
    }
}

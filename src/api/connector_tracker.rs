use crate::core::PixelPoint;

/// Segment between two consecutive label anchors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectorSegment {
    pub from_index: usize,
    pub to_index: usize,
    pub from: PixelPoint,
    pub to: PixelPoint,
}

/// Sequential state for value-label connectors within one series.
///
/// Tracks the previously visited label (`last_index`, `last_anchor`,
/// `last_in_bounds`) and advances on every visited index. A segment joins the
/// previous and current anchors when the indices are adjacent and at least one
/// endpoint is in bounds; index `0` never closes a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectorTracker {
    last_anchor: PixelPoint,
    last_index: usize,
    last_in_bounds: bool,
}

impl ConnectorTracker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_anchor: PixelPoint::default(),
            last_index: 0,
            last_in_bounds: false,
        }
    }

    /// Visits label `index` and returns the segment closing on it, if any.
    pub fn advance(
        &mut self,
        index: usize,
        anchor: PixelPoint,
        in_bounds: bool,
    ) -> Option<ConnectorSegment> {
        let adjacent = index != 0 && Some(index) == self.last_index.checked_add(1);
        let segment = (adjacent && (in_bounds || self.last_in_bounds)).then(|| ConnectorSegment {
            from_index: self.last_index,
            to_index: index,
            from: self.last_anchor,
            to: anchor,
        });

        self.last_anchor = anchor;
        self.last_index = index;
        self.last_in_bounds = in_bounds;
        segment
    }

    #[must_use]
    pub fn last_index(&self) -> usize {
        self.last_index
    }

    #[must_use]
    pub fn last_in_bounds(&self) -> bool {
        self.last_in_bounds
    }
}

impl Default for ConnectorTracker {
    fn default() -> Self {
        Self::new()
    }
}

//! Vertical-flow layout.
//!
//! Sections are stacked top to bottom. Heights are known before anything is
//! emitted, so the document height is fixed up front.

/// Running y-offset over a stack of blocks.
#[derive(Debug, Clone)]
pub struct VerticalFlow {
    margin: f64,
    gap: f64,
    cursor: f64,
    placed: usize,
}

impl VerticalFlow {
    /// Start a flow with an outer margin and a gap between blocks.
    pub fn new(margin: f64, gap: f64) -> Self {
        Self {
            margin,
            gap,
            cursor: margin,
            placed: 0,
        }
    }

    /// Reserve `height` and return the block's top, or `None` for empty blocks.
    ///
    /// Empty blocks take no space and add no gap.
    pub fn place(&mut self, height: f64) -> Option<f64> {
        if height.is_nan() || height <= 0.0 {
            return None;
        }
        let top = if self.placed == 0 {
            self.cursor
        } else {
            self.cursor + self.gap
        };
        self.cursor = top + height;
        self.placed += 1;
        Some(top)
    }

    /// Number of non-empty blocks placed so far.
    pub fn placed(&self) -> usize {
        self.placed
    }

    /// Height of everything placed, including both margins.
    pub fn total_height(&self) -> f64 {
        self.cursor + self.margin
    }
}

/// Top offsets for a list of heights, plus the resulting total height.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub offsets: Vec<Option<f64>>,
    pub total_height: f64,
}

impl Layout {
    /// Lay out `heights` in order.
    pub fn stack(heights: &[f64], margin: f64, gap: f64) -> Self {
        let mut flow = VerticalFlow::new(margin, gap);
        let offsets = heights.iter().map(|&h| flow.place(h)).collect();
        Self {
            offsets,
            total_height: flow.total_height(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_accumulates_offsets() {
        let mut flow = VerticalFlow::new(20.0, 10.0);
        assert_eq!(flow.place(100.0), Some(20.0));
        assert_eq!(flow.place(50.0), Some(130.0));
        assert_eq!(flow.total_height(), 200.0);
    }

    #[test]
    fn test_empty_blocks_are_skipped() {
        let layout = Layout::stack(&[40.0, 0.0, f64::NAN, 40.0], 10.0, 5.0);
        assert_eq!(layout.offsets, vec![Some(10.0), None, None, Some(55.0)]);
        assert_eq!(layout.total_height, 105.0);
    }

    #[test]
    fn test_nothing_placed_is_just_margins() {
        let flow = VerticalFlow::new(24.0, 16.0);
        assert_eq!(flow.placed(), 0);
        assert_eq!(flow.total_height(), 48.0);
    }
}

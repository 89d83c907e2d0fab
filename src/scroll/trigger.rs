use serde::{Deserialize, Serialize};

use crate::dom::Layout;
use crate::scroll::anchor::Anchor;

/// Scroll offsets bounding a timeline's progress domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollRange {
    pub start: f32,
    pub end: f32,
}

impl ScrollRange {
    /// Normalised progress in [0, 1]. A collapsed range acts as a step at
    /// `start`.
    #[must_use]
    pub fn progress(&self, scroll: f32) -> f32 {
        if self.end > self.start {
            ((scroll - self.start) / (self.end - self.start)).clamp(0.0, 1.0)
        } else if scroll >= self.start {
            1.0
        } else {
            0.0
        }
    }
}

/// Trigger element plus start and end anchors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerRegion {
    pub trigger: String,
    pub start: Anchor,
    pub end: Anchor,
}

impl TriggerRegion {
    /// Resolves the anchors against the current layout. `None` when the
    /// trigger element is not on the page.
    #[must_use]
    pub fn resolve(&self, layout: &dyn Layout) -> Option<ScrollRange> {
        let rect = layout.element_rect(&self.trigger)?;
        let viewport = layout.viewport().height;
        Some(ScrollRange {
            start: self.start.scroll_offset(rect.top, rect.height, viewport),
            end: self.end.scroll_offset(rect.top, rect.height, viewport),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Rect, Size};
    use crate::dom::StaticLayout;

    #[test]
    fn top_center_to_bottom_center() {
        let layout = StaticLayout::new(Size::new(1000.0, 800.0))
            .with_element("#e", Rect::new(0.0, 1000.0, 1000.0, 500.0));
        let region = TriggerRegion {
            trigger: "#e".into(),
            start: "top center".parse().unwrap(),
            end: "bottom center".parse().unwrap(),
        };
        let range = region.resolve(&layout).unwrap();
        assert_eq!(range, ScrollRange { start: 600.0, end: 1100.0 });
        assert_eq!(range.progress(0.0), 0.0);
        assert_eq!(range.progress(850.0), 0.5);
        assert_eq!(range.progress(5000.0), 1.0);
    }

    #[test]
    fn collapsed_range_is_a_step() {
        let range = ScrollRange { start: 100.0, end: 100.0 };
        assert_eq!(range.progress(99.0), 0.0);
        assert_eq!(range.progress(100.0), 1.0);
    }
}

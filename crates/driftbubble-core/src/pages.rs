//! Paged content tracking and boundary dismissal.
//!
//! The open card hosts a vertically paged view. Scrolling back past the
//! first page or forward past the last one is the signal to dismiss the card.

use crate::config::PagesConfig;

/// Raised when a scroll release pushes past the first or last page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryOverscroll {
    /// Released toward the previous page while on the first page.
    Leading,
    /// Released toward the next page while on the last page.
    Trailing,
}

/// Corner radii of the two extreme pages while rubber-banding.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CornerRadii {
    pub first: f64,
    pub last: f64,
}

/// Tracks the current page of the paged sub-view.
#[derive(Debug, Clone)]
pub struct PageBridge {
    page_count: usize,
    page_height: f64,
    current_page: usize,
    max_corner_radius: f64,
    rubber_band_rate: f64,
}

impl PageBridge {
    /// Create a bridge for the configured number of pages.
    pub fn new(config: &PagesConfig, page_height: f64) -> Self {
        Self {
            page_count: config.page_count.max(1),
            page_height,
            current_page: 0,
            max_corner_radius: config.max_corner_radius,
            rubber_band_rate: config.rubber_band_rate,
        }
    }

    pub fn page_height(&self) -> f64 {
        self.page_height
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn last_page(&self) -> usize {
        self.page_count - 1
    }

    /// Follow the widget frame: pages are as tall as the card.
    pub fn set_page_height(&mut self, height: f64) {
        self.page_height = height;
    }

    /// Scroll offset of the last page's top edge.
    fn max_offset(&self) -> f64 {
        self.last_page() as f64 * self.page_height
    }

    /// Sample the scroll offset and recompute the current page.
    pub fn on_scroll(&mut self, offset_y: f64) -> usize {
        if !offset_y.is_finite() || self.page_height.is_nan() || self.page_height <= 0.0 {
            return self.current_page;
        }
        let page = (offset_y / self.page_height).round();
        self.current_page = page.clamp(0.0, self.last_page() as f64) as usize;
        self.current_page
    }

    /// Handle the end of a scroll drag with its release velocity.
    ///
    /// Positive velocity points toward later pages.
    pub fn on_release(&self, velocity_y: f64) -> Option<BoundaryOverscroll> {
        if self.current_page == 0 && velocity_y < 0.0 {
            return Some(BoundaryOverscroll::Leading);
        }
        if self.current_page == self.last_page() && velocity_y > 0.0 {
            return Some(BoundaryOverscroll::Trailing);
        }
        None
    }

    /// Rubber-band corner radii for a scroll offset.
    pub fn corner_radii(&self, offset_y: f64) -> CornerRadii {
        let mut radii = CornerRadii::default();
        if !offset_y.is_finite() {
            return radii;
        }
        if offset_y < 0.0 {
            radii.first = self.rubber_band(-offset_y);
        }
        let max_offset = self.max_offset();
        if offset_y > max_offset {
            radii.last = self.rubber_band(offset_y - max_offset);
        }
        radii
    }

    fn rubber_band(&self, overscroll: f64) -> f64 {
        (overscroll * self.rubber_band_rate).min(self.max_corner_radius)
    }
}

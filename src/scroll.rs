//! Scroll geometry to normalized progress.

use log::debug;

/// Normalized animation progress, always within [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Progress(f64);

impl Progress {
    pub const ZERO: Progress = Progress(0.0);
    pub const ONE: Progress = Progress(1.0);

    /// Clamps into [0, 1]; NaN maps to 0.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 1.0))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl From<Progress> for f64 {
    fn from(p: Progress) -> f64 {
        p.0
    }
}

/// Geometry of a scroll-bound section at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollExtent {
    pub viewport_height: f64,
    pub content_height: f64,
    /// How far the section top has moved above the viewport top (`-rect.top`).
    pub scroll_offset: f64,
}

impl ScrollExtent {
    /// Build from a bounding box top relative to the viewport.
    pub fn from_bounding_top(top: f64, content_height: f64, viewport_height: f64) -> Self {
        Self {
            viewport_height,
            content_height,
            scroll_offset: -top,
        }
    }

    pub fn scrollable_distance(&self) -> f64 {
        self.content_height - self.viewport_height
    }
}

/// Progress through a section that pins while its content scrolls past.
/// Content that fits in the viewport never advances.
pub fn compute_scroll_progress(extent: &ScrollExtent) -> Progress {
    let distance = extent.scrollable_distance();
    // Negated so NaN also lands here.
    if !(distance > 0.0) {
        return Progress::ZERO;
    }
    Progress::new(extent.scroll_offset / distance)
}

/// Progress that runs while a section's top travels from `start_fraction` of
/// the viewport height up to `end_offset` pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerWindow {
    pub start_fraction: f64,
    pub end_offset: f64,
}

impl Default for TriggerWindow {
    fn default() -> Self {
        Self {
            start_fraction: 0.6,
            end_offset: -50.0,
        }
    }
}

impl TriggerWindow {
    pub fn progress(&self, top: f64, viewport_height: f64) -> Progress {
        let start = viewport_height * self.start_fraction;
        let span = start - self.end_offset;
        if !(span > 0.0) {
            return Progress::ZERO;
        }
        Progress::new((start - top) / span)
    }
}

/// Remembers the last published progress so hosts can skip unchanged frames.
#[derive(Debug, Clone, Default)]
pub struct ScrollProgressTracker {
    last: Option<Progress>,
}

impl ScrollProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Progress {
        self.last.unwrap_or_default()
    }

    /// Returns the new progress only if it differs from the previous one.
    pub fn update(&mut self, extent: &ScrollExtent) -> Option<Progress> {
        self.publish(compute_scroll_progress(extent))
    }

    pub fn update_window(
        &mut self,
        window: &TriggerWindow,
        top: f64,
        viewport_height: f64,
    ) -> Option<Progress> {
        self.publish(window.progress(top, viewport_height))
    }

    fn publish(&mut self, progress: Progress) -> Option<Progress> {
        if self.last == Some(progress) {
            return None;
        }
        debug!("scroll progress {:.4}", progress.get());
        self.last = Some(progress);
        Some(progress)
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

//! Vertically scrolling text track where the item nearest the focal line is
//! fully opaque and the others fade and shrink with distance.

use crate::config::{CarouselConfig, CarouselLayout};
use crate::error::ConfigError;
use crate::scroll::Progress;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualWeight {
    pub opacity: f64,
    pub scale: f64,
}

/// Total distance the track moves over the whole section.
pub fn travel_distance(layout: &CarouselLayout, item_count: usize) -> f64 {
    item_count.saturating_sub(1) as f64 * layout.item_extent
}

/// Vertical translation applied to the whole track.
pub fn track_offset(layout: &CarouselLayout, item_count: usize, progress: Progress) -> f64 {
    layout.start_offset - progress.get() * travel_distance(layout, item_count)
}

/// Opacity and scale of item `index` for the given scroll progress.
pub fn visual_weight(index: usize, progress: Progress, config: &CarouselConfig, layout: &CarouselLayout) -> VisualWeight {
    let offset = track_offset(layout, config.item_count, progress);
    let item_pos = index as f64 * layout.item_extent + offset;
    let distance = (item_pos - layout.focal_center + layout.item_extent / 2.0).abs();
    let opacity = (1.0 - distance / layout.falloff_radius).clamp(config.min_opacity, config.max_opacity);
    VisualWeight {
        opacity,
        scale: config.base_scale + config.scale_gain * opacity,
    }
}

#[derive(Debug, Clone)]
pub struct TextCarousel {
    config: CarouselConfig,
    layout: CarouselLayout,
    viewport_height: f64,
}

impl TextCarousel {
    pub fn new(config: CarouselConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let layout = config.desktop;
        Ok(Self {
            config,
            layout,
            viewport_height: 0.0,
        })
    }

    /// Picks the layout for the new viewport. Returns true if it changed.
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        self.viewport_height = height;
        let next = if width < self.config.breakpoint_width {
            self.config.mobile
        } else {
            self.config.desktop
        };
        let changed = next != self.layout;
        self.layout = next;
        changed
    }

    pub fn layout(&self) -> &CarouselLayout {
        &self.layout
    }

    pub fn item_count(&self) -> usize {
        self.config.item_count
    }

    /// Height the section needs so the track can scroll its full travel.
    pub fn section_height(&self) -> f64 {
        self.viewport_height + travel_distance(&self.layout, self.config.item_count)
    }

    pub fn track_offset(&self, progress: Progress) -> f64 {
        track_offset(&self.layout, self.config.item_count, progress)
    }

    pub fn weight(&self, index: usize, progress: Progress) -> VisualWeight {
        visual_weight(index, progress, &self.config, &self.layout)
    }

    pub fn weights(&self, progress: Progress) -> Vec<VisualWeight> {
        (0..self.config.item_count)
            .map(|i| self.weight(i, progress))
            .collect()
    }

    /// Item closest to the focal line.
    pub fn focused(&self, progress: Progress) -> Option<usize> {
        self.weights(progress)
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.opacity.total_cmp(&b.1.opacity))
            .map(|(i, _)| i)
    }
}

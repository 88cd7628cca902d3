//! Marker travelling along a curved road, revealing milestones as it goes.

use crate::config::RoadConfig;
use crate::error::ConfigError;
use crate::gfx::bezier::{Point, QuadraticBezier};
use crate::scroll::{Progress, TriggerWindow};
use log::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct Milestone<P> {
    pub position_t: f64,
    pub payload: P,
}

impl<P> Milestone<P> {
    pub fn new(position_t: f64, payload: P) -> Self {
        Self {
            position_t,
            payload,
        }
    }
}

// Indices of `milestones` by ascending position; ties keep list order.
fn position_order<P>(milestones: &[Milestone<P>]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..milestones.len()).collect();
    order.sort_by(|&a, &b| {
        milestones[a]
            .position_t
            .total_cmp(&milestones[b].position_t)
    });
    order
}

fn active_in_order<P>(
    milestones: &[Milestone<P>],
    order: &[usize],
    progress: f64,
    lead_in: f64,
) -> Option<usize> {
    order
        .iter()
        .copied()
        .take_while(|&i| progress >= milestones[i].position_t - lead_in)
        .last()
}

/// Index (into `milestones`) of the furthest milestone already reached,
/// counting each one as reached `lead_in` before its position. The list
/// does not need to be sorted.
pub fn active_milestone<P>(milestones: &[Milestone<P>], progress: f64, lead_in: f64) -> Option<usize> {
    active_in_order(milestones, &position_order(milestones), progress, lead_in)
}

/// Everything needed to draw one frame of the road.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadFrame {
    pub progress: Progress,
    pub marker_t: f64,
    pub marker: Point,
    pub heading_deg: f64,
    pub active: Option<usize>,
    /// Road up to the split point.
    pub travelled: QuadraticBezier,
    /// Road after the split point.
    pub remaining: QuadraticBezier,
}

#[derive(Debug, Clone)]
pub struct RoadAnimation<P> {
    curve: QuadraticBezier,
    milestones: Vec<Milestone<P>>,
    order: Vec<usize>,
    lead_in: f64,
    window: TriggerWindow,
}

impl<P> RoadAnimation<P> {
    pub fn new(
        curve: QuadraticBezier,
        milestones: Vec<Milestone<P>>,
        lead_in: f64,
    ) -> Result<Self, ConfigError> {
        if !(0.0..1.0).contains(&lead_in) {
            return Err(ConfigError::LeadInOutOfRange(lead_in));
        }
        if let Some(bad) = milestones
            .iter()
            .find(|m| !(0.0..=1.0).contains(&m.position_t))
        {
            return Err(ConfigError::MilestoneOutOfRange(bad.position_t));
        }
        let order = position_order(&milestones);
        Ok(Self {
            curve,
            milestones,
            order,
            lead_in,
            window: TriggerWindow::default(),
        })
    }

    pub fn with_window(mut self, window: TriggerWindow) -> Self {
        self.window = window;
        self
    }

    pub fn curve(&self) -> &QuadraticBezier {
        &self.curve
    }

    pub fn milestones(&self) -> &[Milestone<P>] {
        &self.milestones
    }

    pub fn window(&self) -> &TriggerWindow {
        &self.window
    }

    pub fn active(&self, progress: Progress) -> Option<usize> {
        active_in_order(&self.milestones, &self.order, progress.get(), self.lead_in)
    }

    pub fn active_payload(&self, progress: Progress) -> Option<&P> {
        self.active(progress).map(|i| &self.milestones[i].payload)
    }

    /// Where the marker parks and the road changes colour.
    pub fn split_t(&self) -> f64 {
        self.order
            .last()
            .map_or(1.0, |&i| self.milestones[i].position_t)
    }

    pub fn frame(&self, progress: Progress) -> RoadFrame {
        let split_t = self.split_t();
        let marker_t = progress.get().min(split_t);
        let (travelled, remaining) = self.curve.split_at(split_t);
        let active = self.active(progress);
        debug!(
            "road frame progress {:.3} marker_t {:.3} active {:?}",
            progress.get(),
            marker_t,
            active
        );
        RoadFrame {
            progress,
            marker_t,
            marker: self.curve.point_at(marker_t),
            heading_deg: self.curve.tangent_angle_at(marker_t),
            active,
            travelled,
            remaining,
        }
    }
}

impl RoadAnimation<()> {
    pub fn from_config(config: &RoadConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let curve = QuadraticBezier::from_arrays(config.p0, config.p1, config.p2);
        let milestones = config
            .milestones
            .iter()
            .map(|&t| Milestone::new(t, ()))
            .collect();
        let window = TriggerWindow {
            start_fraction: config.trigger_start_fraction,
            end_offset: config.trigger_end_offset,
        };
        Ok(Self::new(curve, milestones, config.lead_in)?.with_window(window))
    }
}

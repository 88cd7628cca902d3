//! Guided breathing session: a lead-in followed by repeated
//! inhale / hold / exhale cycles, all driven by wall-clock time.

use crate::config::BreathingConfig;
use crate::error::ConfigError;
use crate::events::{EventHub, Subscription};
use crate::gfx::anim::{lerp, CubicBezierEasing, Timeline};
use crate::timer::{TimerId, TimerSet};
use log::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Prepare,
    GetReady,
    Active,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreathPhase {
    Inhale,
    Hold,
    Exhale,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreathSample {
    pub elapsed_ms: u64,
    /// Zero-based cycle index.
    pub cycle: u32,
    pub phase: BreathPhase,
    /// Lung fill: rises during inhale, pinned at 1 while holding, falls during exhale.
    pub progress: f64,
    /// Index of the narrative band for `elapsed_ms`.
    pub narrative: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TimelineEvent {
    StatusChanged {
        from: SessionStatus,
        to: SessionStatus,
        at_ms: u64,
    },
    PhaseChanged {
        phase: BreathPhase,
        cycle: u32,
    },
    NarrativeChanged(usize),
    Breath(BreathSample),
}

/// Number of thresholds already reached.
pub fn narrative_band(thresholds_ms: &[u64], elapsed_ms: u64) -> usize {
    thresholds_ms.iter().take_while(|&&t| elapsed_ms >= t).count()
}

/// Breath state `elapsed_ms` into the active part of a session.
///
/// `config` must have passed [`BreathingConfig::validate`].
pub fn sample_at(config: &BreathingConfig, elapsed_ms: u64) -> BreathSample {
    let cycle_ms = config.cycle_ms();
    let cycle_elapsed = elapsed_ms % cycle_ms;
    let hold_end = config.inhale_ms.saturating_add(config.hold_ms);

    let (phase, progress) = if cycle_elapsed < config.inhale_ms {
        (
            BreathPhase::Inhale,
            cycle_elapsed as f64 / config.inhale_ms as f64,
        )
    } else if cycle_elapsed < hold_end {
        (BreathPhase::Hold, 1.0)
    } else {
        let exhale_elapsed = cycle_elapsed - hold_end;
        (
            BreathPhase::Exhale,
            1.0 - exhale_elapsed as f64 / config.exhale_ms as f64,
        )
    };

    BreathSample {
        elapsed_ms,
        cycle: (elapsed_ms / cycle_ms) as u32,
        phase,
        progress,
        narrative: narrative_band(&config.narrative_thresholds_ms, elapsed_ms),
    }
}

pub struct BreathingEngine {
    config: BreathingConfig,
    status: SessionStatus,
    timers: TimerSet,
    lead_in: Option<TimerId>,
    poll: Option<TimerId>,
    session: Timeline,
    sphere_easing: CubicBezierEasing,
    last_sample: Option<BreathSample>,
    events: EventHub<TimelineEvent>,
}

impl BreathingEngine {
    pub fn new(config: BreathingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let session = Timeline::new(config.total_ms());
        let sphere_easing = CubicBezierEasing::from_points(config.sphere_easing);
        Ok(Self {
            config,
            status: SessionStatus::Prepare,
            timers: TimerSet::new(),
            lead_in: None,
            poll: None,
            session,
            sphere_easing,
            last_sample: None,
            events: EventHub::new(),
        })
    }

    pub fn config(&self) -> &BreathingConfig {
        &self.config
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn last_sample(&self) -> Option<BreathSample> {
        self.last_sample
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    pub fn total_ms(&self) -> u64 {
        self.config.total_ms()
    }

    pub fn subscribe(&self, callback: impl FnMut(&TimelineEvent) + 'static) -> Subscription {
        self.events.subscribe(callback)
    }

    /// Begins the lead-in. Only valid from `Prepare`.
    pub fn start(&mut self, now_ms: u64) -> bool {
        if self.status != SessionStatus::Prepare {
            warn!("start ignored, session is {:?}", self.status);
            return false;
        }
        self.lead_in = Some(self.timers.set_timeout(now_ms, self.config.prepare_ms));
        self.set_status(SessionStatus::GetReady, now_ms);
        info!(
            "Breathing session started, active in {}ms, {} cycles of {}ms",
            self.config.prepare_ms,
            self.config.cycles,
            self.config.cycle_ms()
        );
        true
    }

    /// Back to `Prepare` from any status, dropping every pending timer.
    pub fn reset(&mut self, now_ms: u64) {
        let cleared = self.timers.clear_all();
        self.lead_in = None;
        self.poll = None;
        self.last_sample = None;
        info!("Breathing session reset, {} timers cleared", cleared);
        self.set_status(SessionStatus::Prepare, now_ms);
    }

    /// Runs every timer due at `now_ms`.
    pub fn update(&mut self, now_ms: u64) {
        while let Some(fired) = self.timers.next_due(now_ms) {
            if Some(fired.id) == self.lead_in {
                self.lead_in = None;
                self.activate(fired.due_ms);
            } else if Some(fired.id) == self.poll {
                self.poll_tick(now_ms);
            } else {
                warn!("unowned timer {:?} fired, clearing it", fired.id);
                self.timers.clear(fired.id);
            }
        }
    }

    fn activate(&mut self, at_ms: u64) {
        self.session.start(at_ms);
        self.poll = Some(self.timers.set_interval(at_ms, self.config.poll_interval_ms));
        self.set_status(SessionStatus::Active, at_ms);
        self.publish(sample_at(&self.config, 0));
    }

    fn poll_tick(&mut self, now_ms: u64) {
        self.session.update(now_ms);
        if self.session.is_complete() {
            self.finish(now_ms);
            return;
        }
        self.publish(sample_at(&self.config, self.session.elapsed_ms()));
    }

    fn finish(&mut self, now_ms: u64) {
        if let Some(id) = self.poll.take() {
            self.timers.clear(id);
        }
        info!(
            "Breathing session complete after {}ms",
            self.session.elapsed_ms()
        );
        self.set_status(SessionStatus::Done, now_ms);
    }

    fn publish(&mut self, sample: BreathSample) {
        let prev = self.last_sample.replace(sample);
        let phase_changed = prev.map_or(true, |p| p.phase != sample.phase || p.cycle != sample.cycle);
        if phase_changed {
            debug!("cycle {} {:?}", sample.cycle, sample.phase);
            self.events.emit(&TimelineEvent::PhaseChanged {
                phase: sample.phase,
                cycle: sample.cycle,
            });
        }
        if prev.map_or(true, |p| p.narrative != sample.narrative) {
            self.events
                .emit(&TimelineEvent::NarrativeChanged(sample.narrative));
        }
        self.events.emit(&TimelineEvent::Breath(sample));
    }

    fn set_status(&mut self, to: SessionStatus, at_ms: u64) {
        let from = self.status;
        if from == to {
            return;
        }
        self.status = to;
        self.events
            .emit(&TimelineEvent::StatusChanged { from, to, at_ms });
    }

    /// Scale of the sphere: shrinks from 1 to 0 across the active session.
    pub fn sphere_scale(&self, now_ms: u64) -> f64 {
        if self.status != SessionStatus::Active {
            return 1.0;
        }
        let mut tl = self.session.clone();
        tl.update(now_ms);
        lerp(1.0, 0.0, tl.eased_progress(&self.sphere_easing))
    }
}

impl Drop for BreathingEngine {
    fn drop(&mut self) {
        let cleared = self.timers.clear_all();
        if cleared > 0 {
            debug!("breathing engine dropped with {} pending timers", cleared);
        }
    }
}

//! Scroll- and time-driven animation state for a personal site: scroll
//! progress, a guided breathing session, a road-with-milestones animation
//! and a fading text carousel. Everything here is pure state; hosts feed in
//! events and wall-clock time and render whatever comes out.

pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod features;
pub mod gfx;
pub mod scroll;
pub mod timer;

pub use config::Config;
pub use error::ConfigError;
pub use events::{EventHub, Subscription};
pub use features::breathing::{
    sample_at, BreathPhase, BreathSample, BreathingEngine, SessionStatus, TimelineEvent,
};
pub use features::carousel::{visual_weight, TextCarousel, VisualWeight};
pub use features::road::{active_milestone, Milestone, RoadAnimation, RoadFrame};
pub use gfx::bezier::{Point, QuadraticBezier};
pub use scroll::{compute_scroll_progress, Progress, ScrollExtent, ScrollProgressTracker, TriggerWindow};
pub use timer::{Clock, ManualClock, SystemClock};

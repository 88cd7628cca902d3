use crate::config::Config;
use crate::features::breathing::{BreathingEngine, SessionStatus};
use crate::features::carousel::{TextCarousel, VisualWeight};
use crate::features::parallax::ParallaxView;
use crate::features::road::{RoadAnimation, RoadFrame};
use crate::scroll::{Progress, ScrollExtent, ScrollProgressTracker};
use anyhow::Result;
use log::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    About,
    Education,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// `top` is the section's bounding-box top relative to the viewport.
    Scroll { section: Section, top: f64, height: f64 },
    Resize { width: f64, height: f64 },
    PointerMove { x: f64, y: f64 },
    Orientation { beta: Option<f64>, gamma: Option<f64> },
    Wheel { delta_y: f64 },
    StartSession,
    ResetSession,
}

pub struct App {
    pub config: Config,
    pub viewport: [f64; 2],
    pub time_ms: u64,

    pub about: ScrollProgressTracker,
    pub education: ScrollProgressTracker,
    pub carousel: TextCarousel,
    pub road: RoadAnimation<()>,

    pub breathing: BreathingEngine,
    pub parallax: ParallaxView,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let carousel = TextCarousel::new(config.carousel.clone())?;
        let road = RoadAnimation::from_config(&config.road)?;
        let breathing = BreathingEngine::new(config.breathing.clone())?;
        let parallax = ParallaxView::new(config.parallax.clone())?;
        Ok(Self {
            config,
            viewport: [0.0, 0.0],
            time_ms: 0,
            about: ScrollProgressTracker::new(),
            education: ScrollProgressTracker::new(),
            carousel,
            road,
            breathing,
            parallax,
        })
    }

    /// Returns true when something visible changed.
    pub fn handle_event(&mut self, event: UiEvent) -> bool {
        match event {
            UiEvent::Scroll {
                section: Section::About,
                top,
                height,
            } => {
                let extent = ScrollExtent::from_bounding_top(top, height, self.viewport[1]);
                self.about.update(&extent).is_some()
            }
            UiEvent::Scroll {
                section: Section::Education,
                top,
                ..
            } => {
                let window = *self.road.window();
                self.education
                    .update_window(&window, top, self.viewport[1])
                    .is_some()
            }
            UiEvent::Resize { width, height } => {
                self.viewport = [width, height];
                if self.carousel.resize(width, height) {
                    info!(
                        "Carousel layout switched, item extent {}",
                        self.carousel.layout().item_extent
                    );
                }
                true
            }
            UiEvent::PointerMove { x, y } => {
                self.parallax
                    .pointer_moved(x, y, self.viewport[0], self.viewport[1]);
                true
            }
            UiEvent::Orientation { beta, gamma } => self.parallax.orientation_changed(beta, gamma),
            UiEvent::Wheel { delta_y } => {
                self.parallax.wheel(delta_y);
                true
            }
            UiEvent::StartSession => self.breathing.start(self.time_ms),
            UiEvent::ResetSession => {
                self.breathing.reset(self.time_ms);
                true
            }
        }
    }

    pub fn update(&mut self, now_ms: u64) {
        self.time_ms = now_ms;
        self.breathing.update(now_ms);
    }

    pub fn session_status(&self) -> SessionStatus {
        self.breathing.status()
    }

    pub fn about_progress(&self) -> Progress {
        self.about.current()
    }

    pub fn about_weights(&self) -> Vec<VisualWeight> {
        self.carousel.weights(self.about.current())
    }

    pub fn education_frame(&self) -> RoadFrame {
        self.road.frame(self.education.current())
    }
}

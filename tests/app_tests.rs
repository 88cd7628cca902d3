use sunpath::app::{App, Section, UiEvent};
use sunpath::config::ParallaxConfig;
use sunpath::features::parallax::ParallaxView;
use sunpath::{Config, SessionStatus};

fn app() -> App {
    let mut app = App::new(Config::default()).unwrap();
    app.handle_event(UiEvent::Resize {
        width: 1280.0,
        height: 800.0,
    });
    app
}

#[test]
fn pointer_maps_to_unit_square() {
    let mut view = ParallaxView::new(ParallaxConfig::default()).unwrap();
    view.pointer_moved(0.0, 0.0, 1000.0, 500.0);
    assert_eq!((view.pos.x, view.pos.y), (-1.0, -1.0));
    view.pointer_moved(750.0, 250.0, 1000.0, 500.0);
    assert_eq!((view.pos.x, view.pos.y), (0.5, 0.0));
    assert_eq!(view.offset_px().x, -15.0);
    // Zero-sized viewport is ignored.
    view.pointer_moved(10.0, 10.0, 0.0, 0.0);
    assert_eq!(view.pos.x, 0.5);
}

#[test]
fn orientation_is_clamped_and_ignores_missing_readings() {
    let mut view = ParallaxView::new(ParallaxConfig::default()).unwrap();
    assert!(view.orientation_changed(Some(90.0), Some(22.5)));
    assert_eq!((view.pos.x, view.pos.y), (0.5, 1.0));
    assert!(view.orientation_changed(Some(-30.0), Some(-120.0)));
    assert_eq!((view.pos.x, view.pos.y), (-1.0, -1.0));

    assert!(!view.orientation_changed(None, Some(10.0)));
    assert!(!view.orientation_changed(Some(0.0), Some(10.0)));
    assert_eq!((view.pos.x, view.pos.y), (-1.0, -1.0));
}

#[test]
fn wheel_zoom_stays_in_bounds() {
    let mut view = ParallaxView::new(ParallaxConfig::default()).unwrap();
    assert_eq!(view.zoom, 1.1);
    view.wheel(-100.0);
    assert!((view.zoom - 1.2).abs() < 1e-12);
    view.wheel(-10_000.0);
    assert_eq!(view.zoom, 1.5);
    view.wheel(10_000.0);
    assert_eq!(view.zoom, 1.1);
}

#[test]
fn about_section_progress_follows_scroll() {
    let mut app = app();
    let height = app.carousel.section_height();
    assert_eq!(height, 2200.0);

    assert!(app.handle_event(UiEvent::Scroll {
        section: Section::About,
        top: -700.0,
        height,
    }));
    assert!((app.about_progress().get() - 0.5).abs() < 1e-12);
    // Same position again: nothing to redraw.
    assert!(!app.handle_event(UiEvent::Scroll {
        section: Section::About,
        top: -700.0,
        height,
    }));
    assert_eq!(app.about_weights().len(), 6);
}

#[test]
fn education_section_uses_trigger_window() {
    let mut app = app();
    app.handle_event(UiEvent::Scroll {
        section: Section::Education,
        top: 900.0,
        height: 500.0,
    });
    let frame = app.education_frame();
    assert_eq!(frame.progress.get(), 0.0);
    assert_eq!(frame.active, None);

    app.handle_event(UiEvent::Scroll {
        section: Section::Education,
        top: -50.0,
        height: 500.0,
    });
    let frame = app.education_frame();
    assert_eq!(frame.progress.get(), 1.0);
    assert_eq!(frame.active, Some(2));
    assert_eq!(frame.marker_t, 0.85);
}

#[test]
fn session_events_drive_breathing_engine() {
    let mut app = app();
    app.update(1_000);
    assert!(app.handle_event(UiEvent::StartSession));
    assert_eq!(app.session_status(), SessionStatus::GetReady);
    assert!(!app.handle_event(UiEvent::StartSession));

    app.update(5_000);
    assert_eq!(app.session_status(), SessionStatus::Active);

    app.handle_event(UiEvent::ResetSession);
    assert_eq!(app.session_status(), SessionStatus::Prepare);
    assert_eq!(app.breathing.pending_timers(), 0);
    app.update(500_000);
    assert_eq!(app.session_status(), SessionStatus::Prepare);
}

#[test]
fn invalid_config_fails_app_construction() {
    let mut config = Config::default();
    config.breathing.cycles = 0;
    assert!(App::new(config).is_err());
}

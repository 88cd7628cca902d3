use sunpath::config::CarouselConfig;
use sunpath::features::carousel::{track_offset, travel_distance};
use sunpath::{visual_weight, ConfigError, Progress, TextCarousel};

fn desktop() -> TextCarousel {
    let mut c = TextCarousel::new(CarouselConfig::default()).unwrap();
    c.resize(1280.0, 800.0);
    c
}

#[test]
fn travel_and_section_height() {
    let c = desktop();
    assert_eq!(travel_distance(c.layout(), 6), 1400.0);
    assert_eq!(c.section_height(), 800.0 + 1400.0);
    assert_eq!(c.track_offset(Progress::ZERO), 100.0);
    assert_eq!(c.track_offset(Progress::ONE), -1300.0);
}

#[test]
fn single_item_never_travels() {
    let cfg = CarouselConfig::default();
    assert_eq!(travel_distance(&cfg.desktop, 1), 0.0);
    assert_eq!(travel_distance(&cfg.desktop, 0), 0.0);
    assert_eq!(track_offset(&cfg.desktop, 1, Progress::ONE), cfg.desktop.start_offset);
}

#[test]
fn first_and_last_items_lead_at_the_ends() {
    let c = desktop();
    let start = c.weights(Progress::ZERO);
    // |0 * 280 + 100 - 300 + 140| = 60
    assert!((start[0].opacity - (1.0 - 60.0 / 350.0)).abs() < 1e-12);
    assert_eq!(c.focused(Progress::ZERO), Some(0));
    assert_eq!(c.focused(Progress::ONE), Some(5));
    let end = c.weights(Progress::ONE);
    assert!((end[5].opacity - start[0].opacity).abs() < 1e-12);
}

#[test]
fn opacity_respects_bounds_and_scale_tracks_opacity() {
    let c = desktop();
    let cfg = CarouselConfig::default();
    for step in 0..=100 {
        let p = Progress::new(step as f64 / 100.0);
        for w in c.weights(p) {
            assert!(w.opacity >= cfg.min_opacity && w.opacity <= cfg.max_opacity);
            let expected = cfg.base_scale + cfg.scale_gain * w.opacity;
            assert!((w.scale - expected).abs() < 1e-12);
        }
    }
    // Far-away item bottoms out at the minimum.
    assert_eq!(c.weight(5, Progress::ZERO).opacity, cfg.min_opacity);
}

#[test]
fn weight_is_continuous_in_progress() {
    let c = desktop();
    for index in 0..c.item_count() {
        let mut prev = c.weight(index, Progress::ZERO);
        for step in 1..=1000 {
            let w = c.weight(index, Progress::new(step as f64 / 1000.0));
            // 1.4px of travel per step over a 350px falloff.
            assert!((w.opacity - prev.opacity).abs() <= 1.4 / 350.0 + 1e-9);
            prev = w;
        }
    }
}

#[test]
fn weight_is_deterministic() {
    let cfg = CarouselConfig::default();
    let a = visual_weight(3, Progress::new(0.37), &cfg, &cfg.desktop);
    let b = visual_weight(3, Progress::new(0.37), &cfg, &cfg.desktop);
    assert_eq!(a, b);
}

#[test]
fn narrow_viewport_switches_to_mobile_layout() {
    let mut c = desktop();
    assert!(c.resize(500.0, 700.0));
    assert_eq!(c.layout().item_extent, 240.0);
    assert_eq!(c.section_height(), 700.0 + 5.0 * 240.0);
    assert!(!c.resize(600.0, 700.0));
    assert!(c.resize(768.0, 700.0));
    assert_eq!(c.layout().item_extent, 280.0);
}

#[test]
fn rejects_bad_falloff_and_opacity() {
    let mut cfg = CarouselConfig::default();
    cfg.desktop.falloff_radius = 0.0;
    assert!(matches!(
        TextCarousel::new(cfg),
        Err(ConfigError::NotPositive { field: "falloff_radius", .. })
    ));

    let cfg = CarouselConfig {
        min_opacity: 0.8,
        max_opacity: 0.2,
        ..CarouselConfig::default()
    };
    assert!(matches!(
        TextCarousel::new(cfg),
        Err(ConfigError::OpacityBounds { .. })
    ));
}

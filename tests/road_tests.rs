use sunpath::config::RoadConfig;
use sunpath::{active_milestone, ConfigError, Milestone, Progress, QuadraticBezier, RoadAnimation};

const LEAD_IN: f64 = 0.05;

fn milestones(positions: &[f64]) -> Vec<Milestone<&'static str>> {
    let names = ["bachelor", "master", "doctorate", "postdoc"];
    positions
        .iter()
        .zip(names)
        .map(|(&t, name)| Milestone::new(t, name))
        .collect()
}

fn road() -> RoadAnimation<&'static str> {
    let curve = QuadraticBezier::from_arrays([-120.0, 350.0], [600.0, 200.0], [1320.0, 350.0]);
    RoadAnimation::new(curve, milestones(&[0.2, 0.5, 0.82]), LEAD_IN).unwrap()
}

#[test]
fn activation_scenario() {
    let ms = milestones(&[0.2, 0.5, 0.82]);
    assert_eq!(active_milestone(&ms, 0.14, LEAD_IN), None);
    assert_eq!(active_milestone(&ms, 0.16, LEAD_IN), Some(0));
    assert_eq!(active_milestone(&ms, 0.5, LEAD_IN), Some(1));
    assert_eq!(active_milestone(&ms, 0.769, LEAD_IN), Some(1));
    // Reaching exactly positionT - leadIn counts as active.
    assert_eq!(active_milestone(&ms, 0.77, LEAD_IN), Some(2));
    assert_eq!(active_milestone(&ms, 1.0, LEAD_IN), Some(2));
}

#[test]
fn boundary_is_inclusive() {
    let ms = milestones(&[0.5]);
    assert_eq!(active_milestone(&ms, 0.5 - LEAD_IN, LEAD_IN), Some(0));
    assert_eq!(active_milestone(&ms, 0.4, 0.1), Some(0));
    assert_eq!(active_milestone(&ms, 0.5, 0.0), Some(0));
    assert_eq!(active_milestone(&ms, 0.4999, 0.0), None);
}

#[test]
fn unsorted_milestones_use_position_order() {
    // List order: doctorate-ish first, then bachelor, then master.
    let ms = milestones(&[0.82, 0.2, 0.5]);
    assert_eq!(active_milestone(&ms, 0.14, LEAD_IN), None);
    assert_eq!(active_milestone(&ms, 0.16, LEAD_IN), Some(1));
    assert_eq!(active_milestone(&ms, 0.6, LEAD_IN), Some(2));
    assert_eq!(active_milestone(&ms, 0.9, LEAD_IN), Some(0));
}

#[test]
fn equal_positions_prefer_later_entry() {
    let ms = milestones(&[0.3, 0.3]);
    assert_eq!(active_milestone(&ms, 0.3, LEAD_IN), Some(1));
}

#[test]
fn empty_milestones_never_activate() {
    let ms: Vec<Milestone<()>> = Vec::new();
    assert_eq!(active_milestone(&ms, 1.0, LEAD_IN), None);
}

#[test]
fn marker_parks_at_final_milestone() {
    let road = road();
    assert_eq!(road.split_t(), 0.82);

    let frame = road.frame(Progress::new(0.4));
    assert_eq!(frame.marker_t, 0.4);
    assert_eq!(frame.marker, road.curve().point_at(0.4));
    assert_eq!(frame.active, Some(0));

    let parked = road.frame(Progress::ONE);
    assert_eq!(parked.marker_t, 0.82);
    assert_eq!(parked.marker, road.curve().point_at(0.82));
    assert_eq!(parked.heading_deg, road.curve().tangent_angle_at(0.82));
    assert_eq!(road.active_payload(Progress::ONE), Some(&"doctorate"));
}

#[test]
fn frame_splits_road_at_final_milestone() {
    let road = road();
    let frame = road.frame(Progress::new(0.3));
    assert_eq!(frame.travelled.p0, road.curve().p0);
    assert_eq!(frame.remaining.p2, road.curve().p2);
    let joint = road.curve().point_at(0.82);
    assert!((frame.travelled.p2 - joint).length() < 1e-9);
    assert_eq!(frame.travelled.p2, frame.remaining.p0);
}

#[test]
fn road_from_default_config() {
    let road = RoadAnimation::from_config(&RoadConfig::default()).unwrap();
    assert_eq!(road.milestones().len(), 3);
    assert_eq!(road.split_t(), 0.85);
    assert_eq!(road.active(Progress::new(0.09)), None);
    assert_eq!(road.active(Progress::new(0.1)), Some(0));
    assert_eq!(road.window().start_fraction, 0.6);
    assert_eq!(road.window().end_offset, -50.0);
}

#[test]
fn rejects_bad_lead_in_and_positions() {
    let curve = QuadraticBezier::from_arrays([0.0, 0.0], [1.0, 1.0], [2.0, 0.0]);
    assert!(matches!(
        RoadAnimation::new(curve, milestones(&[0.5]), 1.5),
        Err(ConfigError::LeadInOutOfRange(_))
    ));
    assert!(matches!(
        RoadAnimation::new(curve, milestones(&[0.5, 1.2]), LEAD_IN),
        Err(ConfigError::MilestoneOutOfRange(_))
    ));
}

use trackshot::error::{MalformedInput, TrackError};
use trackshot::geometry::RenderGeometry;
use trackshot::gpx::parse_gpx;
use trackshot::kml::parse_kml;
use trackshot::link::build_maps_link;
use trackshot::track::GeoPoint;
use trackshot::waypoints::synthesize;

fn load_fixture(path: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{path}")).unwrap()
}

// ---- gpx/ ----

#[test]
fn test_01_named_track_points_promoted() {
    let data = parse_gpx(&load_fixture("gpx/01_named_track.gpx")).unwrap();

    assert_eq!(data.route_points.len(), 4);
    assert_eq!(data.route_points[0], GeoPoint::new(35.6762, 139.6503));

    let labels: Vec<&str> = data.waypoints.iter().map(|w| w.label.as_str()).collect();
    assert_eq!(labels, vec!["Trailhead", "Ridge viewpoint"]);
    assert_eq!(data.waypoints[1].point, GeoPoint::new(35.685, 139.66));
}

#[test]
fn test_02_bare_track_synthesizes_all_eleven() {
    let data = parse_gpx(&load_fixture("gpx/02_bare_track_11_points.gpx")).unwrap();

    assert_eq!(data.route_points.len(), 11);
    // stride = max(1, 11 / 10) = 1: indices 0 through 10, in order
    assert_eq!(data.waypoints.len(), 11);
    for (wp, pt) in data.waypoints.iter().zip(&data.route_points) {
        assert_eq!(wp.point, *pt);
    }
    assert_eq!(data.waypoints[0].label, "Start of route");
    for i in 1..=9 {
        assert_eq!(data.waypoints[i].label, format!("Point {i}"));
    }
    assert_eq!(data.waypoints[10].label, "End of route");
}

#[test]
fn test_03_explicit_waypoints_suppress_synthesis() {
    let data = parse_gpx(&load_fixture("gpx/03_waypoints_and_route.gpx")).unwrap();

    // Route geometry comes from <rte> only
    assert_eq!(data.route_points.len(), 3);

    let labels: Vec<&str> = data.waypoints.iter().map(|w| w.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "Tokyo Tower: Observation deck",
            "Point: Riverside bench",
            "Point",
        ]
    );
}

#[test]
fn test_04_malformed_gpx() {
    let err = parse_gpx(&load_fixture("gpx/04_malformed.gpx")).unwrap_err();
    assert!(matches!(
        err,
        TrackError::MalformedInput(MalformedInput::Xml(_))
    ));
}

#[test]
fn test_08_standalone_waypoints_follow_track_waypoints() {
    let data = parse_gpx(&load_fixture("gpx/08_waypoints_before_track.gpx")).unwrap();

    assert_eq!(data.route_points.len(), 3);
    // The <wpt> appears first in the file but is appended after the
    // track-derived waypoints, so marker numbering follows the route
    let labels: Vec<&str> = data.waypoints.iter().map(|w| w.label.as_str()).collect();
    assert_eq!(labels, vec!["Trailhead", "Ridge viewpoint", "Tokyo Tower"]);
}

// ---- kml/ ----

#[test]
fn test_05_named_placemarks_round_trip() {
    let data = parse_kml(&load_fixture("kml/05_named_placemarks.kml")).unwrap();

    // Three single-point placemarks: each contributes to both sequences
    assert_eq!(data.route_points.len(), 3);
    assert_eq!(data.waypoints.len(), 3);

    let labels: Vec<&str> = data.waypoints.iter().map(|w| w.label.as_str()).collect();
    assert_eq!(labels, vec!["Tokyo Tower", "Shibuya Crossing", "Senso-ji"]);
    for (wp, pt) in data.waypoints.iter().zip(&data.route_points) {
        assert_eq!(wp.point, *pt);
    }
    assert_eq!(data.route_points[0], GeoPoint::new(35.6586, 139.7454));
}

#[test]
fn test_06_line_string_synthesizes_endpoints() {
    let data = parse_kml(&load_fixture("kml/06_line_string.kml")).unwrap();

    assert_eq!(data.route_points.len(), 4);
    assert_eq!(data.waypoints.len(), 2);
    assert_eq!(data.waypoints[0].label, "Start of route");
    assert_eq!(data.waypoints[1].label, "End of route");
    assert_eq!(data.waypoints[1].point, GeoPoint::new(35.67, 139.76));
}

#[test]
fn test_07_malformed_kml() {
    let err = parse_kml(&load_fixture("kml/07_malformed.kml")).unwrap_err();
    assert!(matches!(
        err,
        TrackError::MalformedInput(MalformedInput::Xml(_))
    ));
}

// ---- synthesis boundaries ----

#[test]
fn test_synthesis_count_boundaries() {
    let route = |n: usize| -> Vec<GeoPoint> {
        (0..n)
            .map(|i| GeoPoint::new(35.0 + i as f64 * 0.01, 139.0 + i as f64 * 0.01))
            .collect()
    };

    assert_eq!(synthesize(&route(1)).len(), 1);
    assert_eq!(synthesize(&route(2)).len(), 2);
    assert_eq!(synthesize(&route(10)).len(), 2);
    for n in [11usize, 25, 60, 240] {
        let stride = (n / 10).max(1);
        assert_eq!(synthesize(&route(n)).len(), 2 + (n - 2) / stride, "n = {n}");
    }
}

// ---- projection ----

#[test]
fn test_corner_points_project_into_unit_square() {
    let points = vec![
        GeoPoint::new(35.0, 139.0),
        GeoPoint::new(36.0, 139.2),
        GeoPoint::new(35.4, 140.1),
        GeoPoint::new(34.9, 139.6),
    ];
    let geom = RenderGeometry::normalize(&points).unwrap();
    for p in &points {
        let (x, y) = geom.project(*p);
        assert!((0.0..=1.0).contains(&x));
        assert!((0.0..=1.0).contains(&y));
    }
}

// ---- deep-link ----

#[test]
fn test_deep_link_contract() {
    let two = vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0)];
    assert_eq!(
        build_maps_link(&two).unwrap(),
        "https://www.google.com/maps/dir/?api=1&origin=0,0&destination=1,1"
    );

    let thirty: Vec<GeoPoint> = (0..30)
        .map(|i| GeoPoint::new(i as f64 * 0.1, i as f64 * 0.1))
        .collect();
    let link = build_maps_link(&thirty).unwrap();
    assert!(!link.contains("waypoints"));
}

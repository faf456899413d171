//! Integration tests for connector routing

use connector_router::connector::{
    shortcut_l_shape, validate, Angle, AttachmentError, BoundingBox, ConnectionPoint,
    ConnectorRouter, Endpoint, NoObstacleRouter, Point, Rect, RoutingMode,
};
use pretty_assertions::assert_eq;

fn diagonal() -> (Rect, Rect, ConnectionPoint, ConnectionPoint) {
    (
        Rect::centered(200.0, 200.0, 60.0, 60.0),
        Rect::centered(400.0, 400.0, 60.0, 60.0),
        ConnectionPoint::new(Point::new(230.0, 200.0), 0),
        ConnectionPoint::new(Point::new(370.0, 400.0), 180),
    )
}

fn is_orthogonal(path: &[Point]) -> bool {
    path.windows(2).all(|w| w[0].x == w[1].x || w[0].y == w[1].y)
}

fn length(path: &[Point]) -> f64 {
    path.windows(2)
        .map(|w| (w[1].x - w[0].x).abs() + (w[1].y - w[0].y).abs())
        .sum()
}

#[test]
fn test_vertical_collinear_nodes() {
    let a = Rect::centered(100.0, 100.0, 50.0, 40.0);
    let b = Rect::centered(100.0, 300.0, 60.0, 50.0);
    let ca = ConnectionPoint::new(Point::new(100.0, 120.0), 90);
    let cb = ConnectionPoint::new(Point::new(100.0, 275.0), -90);

    for smart in [true, false] {
        let path = ConnectorRouter::new().route(&a, &b, &ca, &cb, smart).unwrap();
        assert_eq!(path, vec![Point::new(100.0, 120.0), Point::new(100.0, 275.0)]);
    }
}

#[test]
fn test_diagonal_orthogonal_tie_bends_horizontally() {
    let (a, b, ca, cb) = diagonal();
    let path = ConnectorRouter::new().route(&a, &b, &ca, &cb, false).unwrap();
    assert_eq!(
        path,
        vec![
            Point::new(230.0, 200.0),
            Point::new(300.0, 200.0),
            Point::new(300.0, 400.0),
            Point::new(370.0, 400.0),
        ]
    );
}

#[test]
fn test_point_off_border_is_rejected() {
    let a = Rect::centered(100.0, 100.0, 50.0, 40.0);
    let cp = ConnectionPoint::new(Point::new(100.0, 80.0), 0);
    let err = validate(&a, &cp, 0.01).unwrap_err();
    assert!(matches!(err, AttachmentError::PointNotOnBorder { angle: 0, .. }));
    assert!(err.to_string().contains("0° border"));

    let b = Rect::centered(300.0, 300.0, 60.0, 50.0);
    let cb = ConnectionPoint::on_side(&b, Angle::Left, 0.0);
    let err = ConnectorRouter::new().route(&a, &b, &cp, &cb, true).unwrap_err();
    assert_eq!(err.endpoint(), Endpoint::Start);
}

#[test]
fn test_empty_obstacle_route_matches_orthogonal() {
    let (a, b, ca, cb) = diagonal();
    let fallback = ConnectorRouter::new().route(&a, &b, &ca, &cb, false).unwrap();

    let empty = |_: &[BoundingBox], _: [Point; 2]| -> Option<Vec<Point>> { Some(Vec::new()) };
    let smart = ConnectorRouter::with_obstacle_router(empty)
        .route(&a, &b, &ca, &cb, true)
        .unwrap();
    assert_eq!(smart, fallback);

    let smart = ConnectorRouter::with_obstacle_router(NoObstacleRouter)
        .route(&a, &b, &ca, &cb, true)
        .unwrap();
    assert_eq!(smart, fallback);
}

#[test]
fn test_default_smart_route_avoids_nodes() {
    let (a, b, ca, cb) = diagonal();
    let path = ConnectorRouter::new().route(&a, &b, &ca, &cb, true).unwrap();

    assert_eq!(path.first(), Some(&ca.point));
    assert_eq!(path.last(), Some(&cb.point));
    assert!(is_orthogonal(&path));
    assert_eq!(length(&path), 340.0);
}

#[test]
fn test_far_apart_nodes_fall_back_to_orthogonal() {
    let a = Rect::centered(0.0, 0.0, 50.0, 40.0);
    let b = Rect::centered(1e17, 1e17, 60.0, 60.0);
    let ca = ConnectionPoint::on_side(&a, Angle::Right, 0.0);
    let cb = ConnectionPoint::on_side(&b, Angle::Left, 0.0);

    let path = ConnectorRouter::new().route(&a, &b, &ca, &cb, true).unwrap();
    assert_eq!(path, shortcut_l_shape(ca.point, cb.point));
}

#[test]
fn test_route_is_repeatable() {
    let (a, b, ca, cb) = diagonal();
    let router = ConnectorRouter::new();
    for mode in [RoutingMode::Smart, RoutingMode::Orthogonal] {
        let first = router.route_with_mode(&a, &b, &ca, &cb, mode).unwrap();
        let second = router.route_with_mode(&a, &b, &ca, &cb, mode).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_every_side_pair_routes_end_to_end() {
    let a = Rect::centered(100.0, 100.0, 50.0, 40.0);
    let b = Rect::centered(320.0, 260.0, 60.0, 50.0);
    let router = ConnectorRouter::new();

    for side_a in Angle::ALL {
        for side_b in Angle::ALL {
            let ca = ConnectionPoint::on_side(&a, side_a, 5.0);
            let cb = ConnectionPoint::on_side(&b, side_b, -5.0);
            assert!(validate(&a, &ca, 0.01).is_ok());
            assert!(validate(&b, &cb, 0.01).is_ok());

            for mode in [RoutingMode::Smart, RoutingMode::Orthogonal] {
                let connector = router.connect(&a, &b, &ca, &cb, mode).unwrap();
                let path = &connector.path;
                assert!(path.len() >= 2, "{side_a:?} -> {side_b:?} ({mode:?})");
                assert_eq!(path.first(), Some(&ca.point));
                assert_eq!(path.last(), Some(&cb.point));
                assert!(is_orthogonal(path), "{side_a:?} -> {side_b:?}: {path:?}");
            }
        }
    }
}

#[test]
fn test_resynced_point_stays_valid() {
    let old = Rect::centered(100.0, 100.0, 50.0, 40.0);
    let moved = Rect::centered(180.0, 140.0, 80.0, 60.0);
    let cp = ConnectionPoint::on_side(&old, Angle::Down, 10.0);

    let cp = cp.resync(&old, &moved).unwrap();
    assert_eq!(cp.point, Point::new(190.0, 170.0));
    assert!(validate(&moved, &cp, 0.01).is_ok());
}

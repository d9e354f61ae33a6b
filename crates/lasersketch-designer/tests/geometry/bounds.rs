use lasersketch_designer::{
    calculate_bounds_from_points, scale_points, BoundingBox, ElementStore, Point, PointElement,
    Vertex,
};
use proptest::prelude::*;

fn assert_box_close(actual: BoundingBox, expected: BoundingBox, tol: f64) {
    assert!(
        (actual.x - expected.x).abs() < tol
            && (actual.y - expected.y).abs() < tol
            && (actual.width - expected.width).abs() < tol
            && (actual.height - expected.height).abs() < tol,
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}

#[test]
fn test_circle_bounds() {
    let circle = PointElement::circle(30.0, 40.0, 25.0);
    let bb = calculate_bounds_from_points(&circle.vertices, circle.closed);
    assert_box_close(bb, BoundingBox::new(5.0, 15.0, 50.0, 50.0), 1e-6);
}

#[test]
fn test_ellipse_bounds() {
    let ellipse = PointElement::ellipse(0.0, 0.0, 40.0, 10.0);
    assert_box_close(
        ellipse.bounds(),
        BoundingBox::new(-40.0, -10.0, 80.0, 20.0),
        1e-6,
    );
}

#[test]
fn test_selection_bounds_through_groups() {
    let mut store = ElementStore::new();
    let a = store.add_shape("a", PointElement::rectangle(0.0, 0.0, 10.0, 10.0));
    let b = store.add_shape("b", PointElement::rectangle(50.0, 20.0, 10.0, 10.0));
    let c = store.add_shape("c", PointElement::rectangle(-100.0, 0.0, 1.0, 1.0));
    let group = store.add_group("group", vec![a, b]);

    assert_eq!(
        store.selection_bounds(&[group]),
        Some(BoundingBox::new(0.0, 0.0, 60.0, 30.0))
    );
    assert_eq!(store.flatten_shapes(&[group, a]), vec![a, b]);

    store.set_visible(group, false);
    assert_eq!(store.selection_bounds(&[group]), None);
    assert_eq!(
        store.selection_bounds(&[group, c]),
        Some(BoundingBox::new(-100.0, 0.0, 1.0, 1.0))
    );
}

#[test]
fn test_nested_groups_flatten() {
    let mut store = ElementStore::new();
    let a = store.add_shape("a", PointElement::line(Point::new(0.0, 0.0), Point::new(1.0, 1.0)));
    let inner = store.add_group("inner", vec![a]);
    let outer = store.add_group("outer", vec![inner]);
    assert_eq!(store.flatten_shapes(&[outer]), vec![a]);
    assert_eq!(store.flatten_shapes(&[999]), Vec::<u64>::new());
}

fn curved_shape() -> Vec<Vertex> {
    vec![
        Vertex::corner(0.0, 0.0, None, Some(Point::new(20.0, -30.0))),
        Vertex::smooth(
            60.0,
            10.0,
            Some(Point::new(40.0, 30.0)),
            Some(Point::new(80.0, -10.0)),
        ),
        Vertex::new(100.0, 60.0),
    ]
}

proptest! {
    #[test]
    fn prop_bounds_scale_linearly(k in 1.01f64..10.0, px in -50.0f64..50.0, py in -50.0f64..50.0) {
        let shape = curved_shape();
        let before = calculate_bounds_from_points(&shape, true);
        let scaled = scale_points(&shape, k, k, Point::new(px, py));
        let after = calculate_bounds_from_points(&scaled, true);

        prop_assert!((after.width - before.width * k).abs() < 1e-6 * k.max(1.0) * before.width.max(1.0));
        prop_assert!((after.height - before.height * k).abs() < 1e-6 * k.max(1.0) * before.height.max(1.0));
    }
}

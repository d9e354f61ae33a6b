use lasersketch_designer::{
    calculate_bounds_from_points, flip_horizontal, flip_vertical, parse_handle, resize_points,
    BoundingBox, DragDelta, HandleName, HorizontalSide, Point, PointElement, TransformHandle,
    Vertex, VerticalSide,
};
use proptest::prelude::*;

fn pivot_of(bb: &BoundingBox, handle: &TransformHandle, from_center: bool) -> Point {
    let c = bb.center();
    let x = match (handle.horizontal, from_center) {
        (Some(_), true) | (None, _) => c.x,
        (Some(HorizontalSide::Right), false) => bb.min_x(),
        (Some(HorizontalSide::Left), false) => bb.max_x(),
    };
    let y = match (handle.vertical, from_center) {
        (Some(_), true) | (None, _) => c.y,
        (Some(VerticalSide::Bottom), false) => bb.min_y(),
        (Some(VerticalSide::Top), false) => bb.max_y(),
    };
    Point::new(x, y)
}

fn handle_pos(bb: &BoundingBox, handle: &TransformHandle) -> Point {
    let c = bb.center();
    let x = match handle.horizontal {
        Some(HorizontalSide::Right) => bb.max_x(),
        Some(HorizontalSide::Left) => bb.min_x(),
        None => c.x,
    };
    let y = match handle.vertical {
        Some(VerticalSide::Bottom) => bb.max_y(),
        Some(VerticalSide::Top) => bb.min_y(),
        None => c.y,
    };
    Point::new(x, y)
}

#[test]
fn test_rectangle_east_drag() {
    let rect = PointElement::rectangle(0.0, 0.0, 100.0, 50.0);
    let bb = rect.bounds();
    let out = resize_points(
        &rect.vertices,
        &bb,
        DragDelta::new(20.0, 0.0),
        &parse_handle("e").unwrap(),
        false,
    );
    let expected = [(0.0, 0.0), (120.0, 0.0), (120.0, 50.0), (0.0, 50.0)];
    for (v, (x, y)) in out.iter().zip(expected) {
        assert!((v.x - x).abs() < 1e-9, "x should be {}, got {}", x, v.x);
        assert!((v.y - y).abs() < 1e-9, "y should be {}, got {}", y, v.y);
    }
}

#[test]
fn test_rectangle_east_drag_from_center() {
    let rect = PointElement::rectangle(0.0, 0.0, 100.0, 50.0);
    let bb = rect.bounds();
    let out = resize_points(
        &rect.vertices,
        &bb,
        DragDelta::new(20.0, 0.0),
        &parse_handle("e").unwrap(),
        true,
    );
    let expected = [(-10.0, 0.0), (110.0, 0.0), (110.0, 50.0), (-10.0, 50.0)];
    for (v, (x, y)) in out.iter().zip(expected) {
        assert!((v.x - x).abs() < 1e-9, "x should be {}, got {}", x, v.x);
        assert!((v.y - y).abs() < 1e-9, "y should be {}, got {}", y, v.y);
    }
}

#[test]
fn test_corner_drag_scales_both_axes() {
    let rect = PointElement::rectangle(10.0, 10.0, 100.0, 100.0);
    let bb = rect.bounds();
    let out = resize_points(
        &rect.vertices,
        &bb,
        DragDelta::new(-10.0, -20.0),
        &parse_handle("nw").unwrap(),
        false,
    );
    let after = calculate_bounds_from_points(&out, true);
    assert!((after.x - 0.0).abs() < 1e-9, "x should be 0, got {}", after.x);
    assert!((after.y + 10.0).abs() < 1e-9, "y should be -10, got {}", after.y);
    assert!((after.max_x() - 110.0).abs() < 1e-9);
    assert!((after.max_y() - 110.0).abs() < 1e-9);
}

#[test]
fn test_resize_keeps_inactive_axis() {
    let tri = vec![
        Vertex::new(0.0, 0.0),
        Vertex::new(40.0, 10.0),
        Vertex::new(20.0, 30.0),
    ];
    let bb = calculate_bounds_from_points(&tri, true);
    let out = resize_points(
        &tri,
        &bb,
        DragDelta::new(15.0, 99.0),
        &parse_handle("s").unwrap(),
        false,
    );
    for (a, b) in tri.iter().zip(&out) {
        assert_eq!(a.x, b.x);
    }
}

#[test]
fn test_invalid_handle_rejected() {
    assert!(parse_handle("north").is_err());
    assert!("x".parse::<HandleName>().is_err());
}

fn arb_box() -> impl Strategy<Value = BoundingBox> {
    (-500.0f64..500.0, -500.0f64..500.0, 1.0f64..500.0, 1.0f64..500.0)
        .prop_map(|(x, y, w, h)| BoundingBox::new(x, y, w, h))
}

fn arb_handle() -> impl Strategy<Value = HandleName> {
    prop::sample::select(HandleName::ALL.to_vec())
}

proptest! {
    #[test]
    fn prop_pivot_never_moves(
        bb in arb_box(),
        name in arb_handle(),
        from_center in any::<bool>(),
        dx in -200.0f64..200.0,
        dy in -200.0f64..200.0,
    ) {
        let handle = name.to_handle();
        let pivot = pivot_of(&bb, &handle, from_center);
        let vertices = vec![Vertex::new(pivot.x, pivot.y)];
        let out = resize_points(&vertices, &bb, DragDelta::new(dx, dy), &handle, from_center);
        prop_assert!(out[0].position().approx_eq(&pivot, 1e-9));
    }

    #[test]
    fn prop_handle_follows_pointer(
        bb in arb_box(),
        name in arb_handle(),
        dx in -200.0f64..200.0,
        dy in -200.0f64..200.0,
    ) {
        let handle = name.to_handle();
        let pos = handle_pos(&bb, &handle);
        let vertices = vec![Vertex::new(pos.x, pos.y)];
        let out = resize_points(&vertices, &bb, DragDelta::new(dx, dy), &handle, false);

        let expected_x = if handle.horizontal.is_some() { pos.x + dx } else { pos.x };
        let expected_y = if handle.vertical.is_some() { pos.y + dy } else { pos.y };
        prop_assert!((out[0].x - expected_x).abs() < 1e-9);
        prop_assert!((out[0].y - expected_y).abs() < 1e-9);
    }

    #[test]
    fn prop_flip_is_an_involution(
        xs in prop::collection::vec((-1000.0f64..1000.0, -1000.0f64..1000.0), 2..12),
        hx in -50.0f64..50.0,
        hy in -50.0f64..50.0,
    ) {
        let vertices: Vec<Vertex> = xs
            .iter()
            .map(|&(x, y)| Vertex::corner(x, y, Some(Point::new(x + hx, y + hy)), None))
            .collect();
        let bb = calculate_bounds_from_points(&vertices, false);

        for (twice, original) in [
            (flip_horizontal(&flip_horizontal(&vertices, &bb), &bb), &vertices),
            (flip_vertical(&flip_vertical(&vertices, &bb), &bb), &vertices),
        ] {
            for (a, b) in twice.iter().zip(original.iter()) {
                prop_assert!(a.position().approx_eq(&b.position(), 1e-6));
                let (ha, hb) = (a.prev_handle().unwrap(), b.prev_handle().unwrap());
                prop_assert!(ha.approx_eq(&hb, 1e-6));
            }
        }
    }
}

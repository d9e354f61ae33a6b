use lasersketch_designer::{generate_path_data, parse_path, parse_path_data, Point, Vertex};
use proptest::prelude::*;

#[test]
fn test_cubic_path_round_trip_text() {
    let vertices = parse_path_data("M 0 0 C 25 0 75 100 100 100");
    assert_eq!(vertices.len(), 2);
    assert_eq!(
        generate_path_data(&vertices, false),
        "M 0 0 C 25 0, 75 100, 100 100"
    );
}

#[test]
fn test_relative_move_after_close() {
    let parsed = parse_path("M0,0 L10,0 L10,10 L0,10 Z m5,5 L20,15 L20,5 L5,15 Z");
    assert!(parsed.closed);
    assert_eq!(parsed.vertices.len(), 8);
    assert_eq!(parsed.vertices[4].position(), Point::new(5.0, 5.0));
}

#[test]
fn test_relative_commands() {
    let vertices = parse_path_data("m 10 10 l 10 0 c 0 5 5 10 10 10 q 5 0 5 5");
    let positions: Vec<_> = vertices.iter().map(Vertex::position).collect();
    assert_eq!(
        positions,
        vec![
            Point::new(10.0, 10.0),
            Point::new(20.0, 10.0),
            Point::new(30.0, 20.0),
            Point::new(35.0, 25.0),
        ]
    );
    assert_eq!(vertices[1].next_handle(), Some(Point::new(20.0, 15.0)));
    assert_eq!(vertices[2].prev_handle(), Some(Point::new(25.0, 20.0)));
}

#[test]
fn test_compact_number_syntax() {
    let vertices = parse_path_data("M10-5L-.5.5l1e1,0");
    let positions: Vec<_> = vertices.iter().map(Vertex::position).collect();
    assert_eq!(
        positions,
        vec![
            Point::new(10.0, -5.0),
            Point::new(-0.5, 0.5),
            Point::new(9.5, 0.5),
        ]
    );
}

#[test]
fn test_malformed_tokens_degrade() {
    let vertices = parse_path_data("M 0 0 L 10 # 10 L 20 0");
    assert_eq!(vertices.len(), 3);
    assert_eq!(vertices[1].position(), Point::new(10.0, 10.0));
}

#[test]
fn test_serialize_one_sided_handle() {
    let vertices = vec![
        Vertex::new(0.0, 0.0),
        Vertex::smooth(50.0, 0.0, Some(Point::new(40.0, -10.0)), None),
        Vertex::new(100.0, 0.0),
    ];
    assert_eq!(
        generate_path_data(&vertices, false),
        "M 0 0 C 0 0, 40 -10, 50 0 L 100 0"
    );
}

/// Vertex arrays the serializer can represent: handles on sides without a
/// segment are dropped.
fn arb_shape() -> impl Strategy<Value = (Vec<Vertex>, bool)> {
    let offset = (1i32..40, any::<bool>()).prop_map(|(v, neg)| (if neg { -v } else { v }) as f64);
    let handle = prop::option::of((offset.clone(), offset));
    let vertex = (0i32..50, -200i32..200, handle.clone(), handle);
    (prop::collection::vec(vertex, 2..9), any::<bool>()).prop_map(|(raw, closed)| {
        let n = raw.len();
        let wraps = closed && n >= 3;
        let vertices = raw
            .into_iter()
            .enumerate()
            .map(|(i, (jx, y, prev, next))| {
                let x = (i as i32 * 100 + jx) as f64;
                let y = y as f64;
                let prev = prev.filter(|_| i > 0 || wraps);
                let next = next.filter(|_| i + 1 < n || wraps);
                let at = |(dx, dy): (f64, f64)| Point::new(x + dx, y + dy);
                if prev.is_none() && next.is_none() {
                    Vertex::new(x, y)
                } else {
                    Vertex::corner(x, y, prev.map(at), next.map(at))
                }
            })
            .collect();
        (vertices, closed)
    })
}

proptest! {
    #[test]
    fn prop_parse_serialize_round_trip((vertices, closed) in arb_shape()) {
        let d = generate_path_data(&vertices, closed);
        let parsed = parse_path(&d);

        prop_assert_eq!(parsed.vertices.len(), vertices.len(), "path: {}", d);
        prop_assert_eq!(parsed.closed, closed && vertices.len() >= 3);
        for (a, b) in parsed.vertices.iter().zip(&vertices) {
            prop_assert!(a.position().approx_eq(&b.position(), 1e-9));
            prop_assert_eq!(a.prev_handle().is_some(), b.prev_handle().is_some(), "path: {}", d);
            prop_assert_eq!(a.next_handle().is_some(), b.next_handle().is_some(), "path: {}", d);
            if let (Some(ha), Some(hb)) = (a.prev_handle(), b.prev_handle()) {
                prop_assert!(ha.approx_eq(&hb, 1e-9));
            }
            if let (Some(ha), Some(hb)) = (a.next_handle(), b.next_handle()) {
                prop_assert!(ha.approx_eq(&hb, 1e-9));
            }
        }

        prop_assert_eq!(generate_path_data(&parsed.vertices, parsed.closed), d);
    }
}

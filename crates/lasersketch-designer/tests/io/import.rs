use lasersketch_core::ImportError;
use lasersketch_designer::{
    center_elements, crop_elements_to_bounds, union_bounds, BoundingBox, ImportMode,
    NormalizeOptions, Point, PointElement, ShapeKind, SvgImporter,
};
use std::io::Write;

fn importer(mode: ImportMode) -> SvgImporter {
    SvgImporter::new(NormalizeOptions {
        mode,
        ..NormalizeOptions::default()
    })
}

fn batch_box(elements: &[PointElement]) -> BoundingBox {
    union_bounds(elements.iter().map(PointElement::bounds)).unwrap()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_import_all_element_kinds() {
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100mm" height="100mm" viewBox="0 0 100 100">
        <path id="p1" d="M 0 0 C 25 0 75 100 100 100"/>
        <rect x="10" y="10" width="20" height="20"/>
        <circle cx="50" cy="50" r="10"/>
        <ellipse cx="50" cy="50" rx="20" ry="5"/>
        <line x1="0" y1="0" x2="10" y2="10"/>
        <polyline points="0,0 10,0 10,10"/>
        <polygon points="0 0 10 0 5 8"/>
    </svg>"#;
    let design = importer(ImportMode::IntoExisting).import_string(svg).unwrap();

    let kinds: Vec<_> = design
        .elements
        .iter()
        .map(lasersketch_designer::shape_kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            ShapeKind::Curve,
            ShapeKind::Polygon,
            ShapeKind::Ellipse,
            ShapeKind::Ellipse,
            ShapeKind::Line,
            ShapeKind::Polyline,
            ShapeKind::Polygon,
        ]
    );
    assert_eq!(design.skipped, 0);
    assert!(!design.laser_compatible);
}

#[test]
fn test_into_existing_keeps_millimetres() {
    let svg = r#"<svg width="100mm" height="100mm" viewBox="0 0 100 100"><rect x="10" y="10" width="20" height="20"/></svg>"#;
    let design = importer(ImportMode::IntoExisting).import_string(svg).unwrap();
    assert_eq!(design.scale, 1.0);
    assert_eq!(design.elements[0].bounds(), BoundingBox::new(10.0, 10.0, 20.0, 20.0));
}

#[test]
fn test_unit_conversions() {
    let cases = [
        ("cm", 10.0),
        ("in", 25.4),
        ("px", 25.4 / 96.0),
        ("", 25.4 / 96.0),
    ];
    for (unit, factor) in cases {
        let svg = format!(
            r#"<svg width="10{unit}" height="10{unit}"><rect x="0" y="0" width="10" height="5"/></svg>"#
        );
        let design = importer(ImportMode::IntoExisting).import_string(&svg).unwrap();
        let bb = design.elements[0].bounds();
        assert_close(bb.width, 10.0 * factor);
        assert_close(bb.height, 5.0 * factor);
    }
}

#[test]
fn test_fresh_import_fits_target() {
    let svg = r#"<svg width="200mm" height="100mm" viewBox="0 0 200 100"><rect x="0" y="0" width="200" height="100"/></svg>"#;
    let design = importer(ImportMode::FreshDocument).import_string(svg).unwrap();
    assert_close(design.scale, 5.0);
    let bb = design.elements[0].bounds();
    assert_close(bb.width, 1000.0);
    assert_close(bb.height, 500.0);
}

#[test]
fn test_view_box_offset_is_applied() {
    let svg = r#"<svg width="100mm" height="100mm" viewBox="-50 -50 100 100"><rect x="-50" y="-50" width="10" height="10"/></svg>"#;
    let design = importer(ImportMode::IntoExisting).import_string(svg).unwrap();
    assert_eq!(design.elements[0].bounds(), BoundingBox::new(0.0, 0.0, 10.0, 10.0));
}

#[test]
fn test_handles_scale_with_anchors() {
    let svg = r#"<svg width="10cm" height="10cm" viewBox="0 0 10 10"><path d="M 0 0 C 1 0 2 1 3 1"/></svg>"#;
    let design = importer(ImportMode::IntoExisting).import_string(svg).unwrap();
    let vertices = &design.elements[0].vertices;
    assert_eq!(vertices[0].next_handle(), Some(Point::new(10.0, 0.0)));
    assert_eq!(vertices[1].prev_handle(), Some(Point::new(20.0, 10.0)));
    assert_eq!(vertices[1].position(), Point::new(30.0, 10.0));
}

#[test]
fn test_group_translate_is_applied() {
    let svg = r#"<svg width="100mm" height="100mm" viewBox="0 0 100 100"><g transform="translate(50,0)"><rect x="0" y="0" width="10" height="10"/></g></svg>"#;
    let design = importer(ImportMode::IntoExisting).import_string(svg).unwrap();
    assert_eq!(design.elements[0].bounds(), BoundingBox::new(50.0, 0.0, 10.0, 10.0));
}

#[test]
fn test_nested_transforms_compose() {
    let svg = r#"<svg width="100mm" height="100mm" viewBox="0 0 100 100">
        <g transform="translate(10,0)">
            <g transform="scale(2)">
                <rect x="0" y="0" width="5" height="5" transform="translate(1,1)"/>
            </g>
            <rect x="0" y="0" width="5" height="5"/>
            <g/>
        </g>
        <rect x="0" y="0" width="5" height="5"/>
    </svg>"#;
    let design = importer(ImportMode::IntoExisting).import_string(svg).unwrap();
    let boxes: Vec<_> = design.elements.iter().map(PointElement::bounds).collect();
    assert_eq!(
        boxes,
        vec![
            BoundingBox::new(12.0, 2.0, 10.0, 10.0),
            BoundingBox::new(10.0, 0.0, 5.0, 5.0),
            BoundingBox::new(0.0, 0.0, 5.0, 5.0),
        ]
    );
}

#[test]
fn test_group_matrix_moves_handles() {
    let svg = r#"<svg width="100mm" height="100mm" viewBox="0 0 100 100"><g transform="matrix(2,0,0,2,5,5)"><path d="M 0 0 C 1 0 2 1 3 1"/></g></svg>"#;
    let design = importer(ImportMode::IntoExisting).import_string(svg).unwrap();
    let vertices = &design.elements[0].vertices;
    assert_eq!(vertices[0].position(), Point::new(5.0, 5.0));
    assert_eq!(vertices[0].next_handle(), Some(Point::new(7.0, 5.0)));
    assert_eq!(vertices[1].prev_handle(), Some(Point::new(9.0, 7.0)));
    assert_eq!(vertices[1].position(), Point::new(11.0, 7.0));
}

#[test]
fn test_degenerate_shapes_are_skipped() {
    let svg = r#"<svg><path d="M 5 5"/><rect width="0" height="10"/><line x1="0" y1="0" x2="5" y2="5"/></svg>"#;
    let design = importer(ImportMode::IntoExisting).import_string(svg).unwrap();
    assert_eq!(design.elements.len(), 1);
    assert_eq!(design.skipped, 2);
}

#[test]
fn test_no_usable_shapes() {
    let err = importer(ImportMode::IntoExisting)
        .import_string(r#"<svg><path d="M 0 0"/></svg>"#)
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<ImportError>(),
        Some(&ImportError::NoUsableShapes)
    );
}

#[test]
fn test_empty_document() {
    let design = SvgImporter::default()
        .import_string(r#"<svg width="100" height="100"></svg>"#)
        .unwrap();
    assert!(design.elements.is_empty());
}

#[test]
fn test_import_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"<svg width="50mm" height="50mm" viewBox="0 0 50 50"><circle cx="25" cy="25" r="5"/></svg>"#
    )
    .unwrap();

    let design = importer(ImportMode::IntoExisting)
        .import_file(file.path())
        .unwrap();
    assert_eq!(design.elements.len(), 1);

    let missing = SvgImporter::default().import_file(file.path().with_extension("nope"));
    assert!(missing.is_err());
}

#[test]
fn test_crop_shrinks_oversized_batch() {
    let batch = vec![
        PointElement::rectangle(0.0, 0.0, 2000.0, 500.0),
        PointElement::circle(1000.0, 250.0, 100.0),
    ];
    let before = batch_box(&batch);
    let cropped = crop_elements_to_bounds(&batch, 1000.0, 1000.0);
    let after = batch_box(&cropped);

    assert_close(after.width, 1000.0);
    assert_close(after.height, 250.0);
    assert_close(after.center().x, before.center().x);
    assert_close(after.center().y, before.center().y);

    // Circle keeps its proportions: handles were scaled too.
    let circle = cropped[1].bounds();
    assert_close(circle.width, 100.0);
    assert_close(circle.height, 100.0);
}

#[test]
fn test_crop_never_upscales() {
    let batch = vec![PointElement::rectangle(0.0, 0.0, 10.0, 10.0)];
    assert_eq!(crop_elements_to_bounds(&batch, 1000.0, 1000.0), batch);
}

#[test]
fn test_center_only_when_fitting() {
    let batch = vec![PointElement::rectangle(0.0, 0.0, 100.0, 50.0)];
    let centred = center_elements(&batch, 500.0, 500.0, 1000.0, 1000.0);
    assert_eq!(batch_box(&centred), BoundingBox::new(450.0, 475.0, 100.0, 50.0));

    let big = vec![PointElement::rectangle(0.0, 0.0, 2000.0, 50.0)];
    assert_eq!(center_elements(&big, 500.0, 500.0, 1000.0, 1000.0), big);
}

#[test]
fn test_crop_then_center() {
    let batch = vec![PointElement::rectangle(-300.0, 0.0, 2000.0, 2000.0)];
    let placed = center_elements(
        &crop_elements_to_bounds(&batch, 1000.0, 1000.0),
        500.0,
        500.0,
        1000.0,
        1000.0,
    );
    let bb = batch_box(&placed);
    assert_close(bb.x, 0.0);
    assert_close(bb.y, 0.0);
    assert_close(bb.width, 1000.0);
}

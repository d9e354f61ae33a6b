use lasersketch_designer::{
    has_laser_marker, to_svg_document, ImportMode, NormalizeOptions, Point, PointElement,
    SvgImporter, Vertex,
};

#[test]
fn test_export_reimports_unchanged() {
    let elements = vec![
        PointElement::rectangle(10.0, 10.0, 80.0, 40.0),
        PointElement::new(
            vec![
                Vertex::corner(0.0, 0.0, None, Some(Point::new(25.0, 0.0))),
                Vertex::corner(100.0, 100.0, Some(Point::new(75.0, 100.0)), None),
            ],
            false,
        ),
    ];
    let svg = to_svg_document(&elements, 300.0, 200.0);
    assert!(has_laser_marker(&svg));

    let importer = SvgImporter::new(NormalizeOptions {
        mode: ImportMode::IntoExisting,
        ..NormalizeOptions::default()
    });
    let design = importer.import_string(&svg).unwrap();
    assert!(design.laser_compatible);
    assert_eq!(design.scale, 1.0);
    assert_eq!(design.elements, elements);
}

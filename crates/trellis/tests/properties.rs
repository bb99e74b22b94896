//! End-to-end properties of the generate-then-render pipeline.

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use trellis::{
    Dimensions, GeometryConfig, LegacyPatternConfig, LineCap, PatternGeneratorConfig, PatternType,
    RenderOptions, Scene, Shape, StyleConfig, default_registry, generate_legacy_pattern_svg,
    generate_pattern_svg, render_svg,
};

/// Parse `markup`, returning (root element count, names of root's children).
fn xml_structure(markup: &str) -> (usize, Vec<String>) {
    let mut reader = Reader::from_str(markup);
    reader.config_mut().trim_text(true);
    let mut depth = 0usize;
    let mut roots = 0usize;
    let mut children = Vec::new();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                if depth == 0 {
                    roots += 1;
                } else if depth == 1 {
                    children.push(String::from_utf8_lossy(e.name().as_ref()).into_owned());
                }
                depth += 1;
            }
            Ok(Event::Empty(e)) => {
                if depth == 0 {
                    roots += 1;
                } else if depth == 1 {
                    children.push(String::from_utf8_lossy(e.name().as_ref()).into_owned());
                }
            }
            Ok(Event::End(_)) => depth -= 1,
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => panic!("markup is not well-formed: {e}\n{markup}"),
        }
        buf.clear();
    }
    assert_eq!(depth, 0, "unbalanced markup");
    (roots, children)
}

fn geometry(cell: f64, gap: f64, w: f64, h: f64) -> GeometryConfig {
    GeometryConfig {
        cell_size: Some(cell),
        gap: Some(gap),
        width: Some(w),
        height: Some(h),
    }
}

#[test]
fn every_pattern_renders_well_formed_markup() {
    let style = StyleConfig {
        stroke_color: Some("#0099cc".into()),
        stroke_opacity: Some(0.7),
        line_cap: Some(LineCap::Square),
        stroke_dasharray: Some(vec![4.0, 2.0]),
        background_color: Some("#ffffff".into()),
        ..Default::default()
    };
    for pattern in PatternType::all() {
        let svg = generate_pattern_svg(pattern.name(), &geometry(24.0, 4.0, 320.0, 240.0), &style, None)
            .unwrap();
        let (roots, children) = xml_structure(&svg);
        assert_eq!(roots, 1, "{pattern}");
        assert_eq!(children.first().map(String::as_str), Some("rect"), "{pattern}: background first");
        assert!(children.len() > 1, "{pattern}: no pattern elements");
        assert!(svg.contains(r#"stroke-dasharray="4,2""#));
        assert!(svg.contains(r#"stroke-linecap="square""#));
    }
}

#[test]
fn path_data_parses() {
    for pattern in [PatternType::Zigzag, PatternType::Waves] {
        let scene = default_registry()
            .lookup(pattern.name())
            .unwrap()
            .generate(&PatternGeneratorConfig::new(
                geometry(20.0, 0.0, 200.0, 100.0),
                StyleConfig::default(),
            ));
        assert!(!scene.is_empty());
        for element in &scene.elements {
            let Shape::Path { d } = &element.shape else {
                panic!("{pattern} should only emit paths");
            };
            let segments: Vec<_> = svgtypes::PathParser::from(d.as_str())
                .collect::<Result<_, _>>()
                .unwrap_or_else(|e| panic!("{pattern}: bad path data {d:?}: {e}"));
            assert!(matches!(
                segments.first(),
                Some(svgtypes::PathSegment::MoveTo { abs: true, .. })
            ));
            assert!(segments.len() > 1);
        }
    }
}

#[test]
fn grid_exactness() {
    let config = PatternGeneratorConfig::new(geometry(20.0, 0.0, 100.0, 100.0), StyleConfig::default());
    let scene = default_registry().lookup("grid").unwrap().generate(&config);
    assert_eq!(scene.elements.len(), 25);
    assert_eq!(scene.metadata.element_count, 25);
    assert_eq!(
        scene.elements[1].shape,
        Shape::Rectangle { x: 20.0, y: 0.0, width: 20.0, height: 20.0 }
    );
}

#[test]
fn oversized_cell_renders_empty_document() {
    let svg = generate_pattern_svg(
        "grid",
        &GeometryConfig { cell_size: Some(1000.0), width: Some(100.0), height: Some(100.0), ..Default::default() },
        &StyleConfig::default(),
        None,
    )
    .unwrap();
    let (roots, children) = xml_structure(&svg);
    assert_eq!(roots, 1);
    assert!(children.is_empty());
}

#[test]
fn renderer_structure() {
    let scene = Scene::empty(Dimensions::new(800.0, 600.0));
    let svg = render_svg(&scene, &RenderOptions::default());
    assert_eq!(svg.matches("<svg").count(), 1);
    assert_eq!(svg.matches("</svg>").count(), 1);
    assert!(svg.contains(r#"viewBox="0 0 800 600""#));
    assert!(svg.trim_start().starts_with("<svg"));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn determinism_and_no_timestamp_leak() {
    for pattern in PatternType::all() {
        let a = generate_pattern_svg(pattern.name(), &GeometryConfig::default(), &StyleConfig::default(), None)
            .unwrap();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = generate_pattern_svg(pattern.name(), &GeometryConfig::default(), &StyleConfig::default(), None)
            .unwrap();
        assert_eq!(a, b, "{pattern}");
    }
}

#[test]
fn non_mutation() {
    let config = PatternGeneratorConfig::new(
        geometry(18.0, 2.0, 300.0, 200.0),
        StyleConfig {
            stroke_dasharray: Some(vec![5.0, 5.0]),
            background_color: Some("#eee".into()),
            ..Default::default()
        },
    );
    let snapshot = config.clone();
    for pattern in PatternType::all() {
        let _ = pattern.generator().generate(&config);
        assert_eq!(config, snapshot, "{pattern}");
    }
}

#[test]
fn unknown_type_message() {
    let err = generate_pattern_svg("not-a-type", &GeometryConfig::default(), &StyleConfig::default(), None)
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("not-a-type"));
    assert!(message.contains("grid, dots, diagonalGrid, isometric, zigzag, waves, cross"));
}

#[test]
fn legacy_adapter_round_trip() {
    let legacy = LegacyPatternConfig {
        cell_size: Some(30.0),
        stroke_color: Some("#FF5733".into()),
        width: Some(400.0),
        height: Some(300.0),
        ..Default::default()
    };
    let split = legacy.split();
    let a = generate_legacy_pattern_svg("grid", &legacy, None).unwrap();
    let b = generate_pattern_svg("grid", &split.geometry, &split.style, None).unwrap();
    assert_eq!(a, b);
}

#[test]
fn scene_json_uses_camel_case_and_shape_tags() {
    let config = PatternGeneratorConfig::new(geometry(50.0, 0.0, 100.0, 100.0), StyleConfig::default());
    let scene = default_registry().lookup("dots").unwrap().generate(&config);
    let json = serde_json::to_value(&scene).unwrap();
    assert_eq!(json["metadata"]["elementCount"], 4);
    assert_eq!(json["elements"][0]["shape"], "circle");
    assert_eq!(json["elements"][0]["data"]["lineCap"], "round");
    let back: Scene = serde_json::from_value(json).unwrap();
    assert_eq!(back, scene);
}

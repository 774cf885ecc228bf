use super::*;
use serde_json::json;

fn errors_of(v: Value) -> SchemaErrors {
    layout_from_value(&v).unwrap_err()
}

#[test]
fn minimal_layout_uses_default_canvas() {
    let layout = layout_from_value(&json!({})).unwrap();
    assert_eq!(layout.size, DEFAULT_CANVAS);
    assert!(layout.layers.is_empty());
}

#[test]
fn layer_size_defaults_to_canvas_and_offset_to_origin() {
    let layout = layout_from_value(&json!({
        "size": {"width": 300, "height": 200},
        "layers": [{"rectangle": {}}]
    }))
    .unwrap();
    let layer = &layout.layers[0];
    assert_eq!(layer.size, Size::new(300, 200));
    assert_eq!(layer.offset, Offset::new(0, 0));
    assert!(matches!(layer.kind, LayerKind::Rectangle(_)));
}

#[test]
fn layer_order_is_preserved() {
    let layout = layout_from_value(&json!({
        "layers": [
            {"background": {"color": "black"}},
            {"ellipse": {}},
            {"typography": {"content": "hi"}},
            {"polygon": {"sides": 5}}
        ]
    }))
    .unwrap();
    let kinds: Vec<&str> = layout.layers.iter().map(|l| l.kind.name()).collect();
    assert_eq!(kinds, vec!["background", "ellipse", "typography", "polygon"]);
}

#[test]
fn unknown_fields_are_rejected_at_every_level() {
    let err = errors_of(json!({"sizes": {}}));
    assert!(err.has_path("$.sizes"), "{err}");
    assert!(err.to_string().contains("unknown field"));

    let err = errors_of(json!({"layers": [{"rectangle": {"colour": "red"}}]}));
    assert!(err.has_path("$.layers[0].rectangle.colour"), "{err}");

    let err = errors_of(json!({"layers": [{"rectangle": {"border": {"width": 1, "style": "dashed"}}}]}));
    assert!(err.has_path("$.layers[0].rectangle.border.style"), "{err}");
}

#[test]
fn type_errors_name_the_offending_field() {
    let err = errors_of(json!({"layers": [{"rectangle": {"radius": "big"}}]}));
    assert!(err.has_path("$.layers[0].rectangle.radius"), "{err}");
    assert!(err.to_string().contains("invalid type"));

    let err = errors_of(json!({
        "layers": [{"ellipse": {"color": {"linear_gradient": {"spread": 3}}}}]
    }));
    assert!(err.has_path("$.layers[0].ellipse.color.linear_gradient.spread"), "{err}");
}

#[test]
fn layer_needs_exactly_one_shape_key() {
    let err = errors_of(json!({"layers": [{"size": {"width": 1, "height": 1}}]}));
    assert!(err.has_path("$.layers[0]"));
    assert!(err.to_string().contains("found: none"));

    let err = errors_of(json!({"layers": [{"rectangle": {}, "ellipse": {}}]}));
    assert!(err.to_string().contains("rectangle, ellipse"));
}

#[test]
fn sizes_must_be_positive() {
    let err = errors_of(json!({"size": {"width": 0, "height": -3}}));
    assert!(err.has_path("$.size.width"));
    assert!(err.has_path("$.size.height"));
    assert_eq!(err.errors().len(), 2);
}

#[test]
fn sizes_beyond_the_raster_limit_are_rejected() {
    let err = errors_of(json!({
        "size": {"width": 4_000_000_000_u64, "height": 100},
        "layers": [{"size": {"width": 10, "height": 70000}, "rectangle": {}}]
    }));
    assert!(err.has_path("$.size.width"), "{err}");
    assert!(err.has_path("$.layers[0].size.height"), "{err}");
    assert_eq!(err.errors().len(), 2);

    let edge = i64::from(MAX_RASTER_EDGE);
    assert!(Layout::from_value(&json!({"size": {"width": edge, "height": 1}})).is_ok());
}

#[test]
fn polygon_with_two_sides_is_invalid() {
    let err = errors_of(json!({"layers": [{"polygon": {"sides": 2}}]}));
    assert!(err.has_path("$.layers[0].polygon.sides"), "{err}");
}

#[test]
fn polygon_accepts_two_explicit_points() {
    let layout = layout_from_value(&json!({
        "layers": [{"polygon": {"sides": [{"x": 0, "y": 0}, {"x": 10}]}}]
    }))
    .unwrap();
    let LayerKind::Polygon(p) = &layout.layers[0].kind else {
        panic!("expected polygon");
    };
    let Shape::Polygon { sides: Sides::Points(pts), .. } = &p.shape else {
        panic!("expected explicit points");
    };
    assert_eq!(pts, &vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);

    let err = errors_of(json!({"layers": [{"polygon": {"sides": [{"x": 1, "y": 1}]}}]}));
    assert!(err.has_path("$.layers[0].polygon.sides"));
}

#[test]
fn negative_border_width_and_radius_are_rejected() {
    let err = errors_of(json!({"layers": [{"rectangle": {"radius": -1, "border": {"width": -2}}}]}));
    assert!(err.has_path("$.layers[0].rectangle.radius"));
    assert!(err.has_path("$.layers[0].rectangle.border.width"));
}

#[test]
fn bad_colors_report_their_path() {
    let err = errors_of(json!({"layers": [{"ellipse": {"color": "blurple"}}]}));
    assert!(err.has_path("$.layers[0].ellipse.color"));

    let err = errors_of(json!({"layers": [{"ellipse": {"color": 42}}]}));
    assert!(err.has_path("$.layers[0].ellipse.color"));
}

#[test]
fn gradient_stops_must_be_in_unit_range() {
    let err = errors_of(json!({"layers": [{"rectangle": {"color": {"linear_gradient": {
        "colors": {"0": "red", "1.5": "blue"}
    }}}}]}));
    assert!(
        err.has_path("$.layers[0].rectangle.color.linear_gradient.colors[\"1.5\"]"),
        "{err}"
    );
}

#[test]
fn duplicate_stop_positions_are_rejected() {
    let err = errors_of(json!({"layers": [{"rectangle": {"color": {"radial_gradient": {
        "colors": {"0.5": "red", "0.50": "blue"}
    }}}}]}));
    assert!(err.to_string().contains("duplicate"));
}

#[test]
fn stops_are_sorted_regardless_of_input_order() {
    let layout = layout_from_value(&json!({"layers": [{"rectangle": {"color": {"conical_gradient": {
        "colors": {"1": "white", "0": "black", "0.25": "red"}
    }}}}]}))
    .unwrap();
    let LayerKind::Rectangle(r) = &layout.layers[0].kind else {
        panic!("expected rectangle");
    };
    let Some(Color::Conical(g)) = &r.color else {
        panic!("expected conical gradient");
    };
    let positions: Vec<f32> = g.ramp.stops().iter().map(|s| s.position).collect();
    assert_eq!(positions, vec![0.0, 0.25, 1.0]);
}

#[test]
fn presets_resolve_by_index_and_name() {
    layout_from_value(&json!({"layers": [{"rectangle": {"color": {"linear_gradient": {"preset": 5}}}}]}))
        .unwrap();
    layout_from_value(&json!({"layers": [{"rectangle": {"color": {"linear_gradient": {"preset": "NightFade"}}}}]}))
        .unwrap();

    let err = errors_of(json!({"layers": [{"rectangle": {"color": {"linear_gradient": {"preset": 0}}}}]}));
    assert!(err.has_path("$.layers[0].rectangle.color.linear_gradient.preset"));

    let err = errors_of(json!({"layers": [{"rectangle": {"color": {"linear_gradient": {"preset": "Nope"}}}}]}));
    assert!(err.to_string().contains("unknown preset"));

    let err = errors_of(json!({"layers": [{"rectangle": {"color": {"linear_gradient": {
        "preset": 1, "colors": {"0": "red"}
    }}}}]}));
    assert!(err.to_string().contains("not both"));
}

#[test]
fn radial_defaults_follow_the_layer_box() {
    let layout = layout_from_value(&json!({"layers": [{
        "size": {"width": 200, "height": 100},
        "ellipse": {"color": {"radial_gradient": {"colors": {"0": "red", "1": "blue"}}}}
    }]}))
    .unwrap();
    let LayerKind::Ellipse(e) = &layout.layers[0].kind else {
        panic!("expected ellipse");
    };
    let Some(Color::Radial(g)) = &e.color else {
        panic!("expected radial gradient");
    };
    assert_eq!(g.center, Point::new(100.0, 50.0));
    assert_eq!(g.radius, 50.0);
    assert_eq!(g.focal_point, g.center);
}

#[test]
fn typography_options_are_checked() {
    let err = errors_of(json!({"layers": [{"typography": {
        "content": "x", "align": "justify", "line": {"amount": 0}, "overflow": "maybe"
    }}]}));
    assert!(err.has_path("$.layers[0].typography.align"));
    assert!(err.has_path("$.layers[0].typography.line.amount"));
    assert!(err.has_path("$.layers[0].typography.overflow"));
}

#[test]
fn typography_overflow_accepts_words_and_booleans() {
    for (v, expected) in [
        (json!("on"), Overflow::On),
        (json!("off"), Overflow::Off),
        (json!(true), Overflow::On),
    ] {
        let layout = layout_from_value(&json!({"layers": [{"typography": {"content": "x", "overflow": v}}]}))
            .unwrap();
        let LayerKind::Typography(t) = &layout.layers[0].kind else {
            panic!("expected typography");
        };
        assert_eq!(t.overflow, expected);
    }
}

#[test]
fn mask_defaults_to_layer_box_and_needs_a_shape() {
    let layout = layout_from_value(&json!({"layers": [{
        "size": {"width": 50, "height": 40},
        "rectangle": {},
        "mask": {"invert": true, "ellipse": {}}
    }]}))
    .unwrap();
    let mask = layout.layers[0].mask.as_ref().unwrap();
    assert_eq!(mask.size, Size::new(50, 40));
    assert!(mask.invert);

    let err = errors_of(json!({"layers": [{"rectangle": {}, "mask": {"invert": true}}]}));
    assert!(err.has_path("$.layers[0].mask"));
}

#[test]
fn every_offending_layer_is_reported() {
    let err = errors_of(json!({"layers": [
        {"polygon": {"sides": 1}},
        {"rectangle": {}},
        {"ellipse": {"color": "nope"}}
    ]}));
    assert!(err.has_path("$.layers[0].polygon.sides"));
    assert!(err.has_path("$.layers[2].ellipse.color"));
    assert_eq!(err.errors().len(), 2);
}

#[test]
fn corners_select_rounded_corners() {
    let layout = layout_from_value(&json!({"layers": [{"rectangle": {
        "radius": 5, "corners": ["top_left", "bottom_right"]
    }}]}))
    .unwrap();
    let LayerKind::Rectangle(r) = &layout.layers[0].kind else {
        panic!("expected rectangle");
    };
    let Shape::Rectangle { corners, .. } = r.shape else {
        panic!("expected rectangle shape");
    };
    assert!(corners.top_left && corners.bottom_right);
    assert!(!corners.top_right && !corners.bottom_left);
}

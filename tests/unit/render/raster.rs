use super::*;
use crate::geometry::Shape;
use crate::geometry::shapes::Corners;

#[test]
fn full_box_rectangle_covers_everything() {
    let size = Size::new(8, 5);
    let path = Shape::Rectangle {
        radius: 0.0,
        corners: Corners::NONE,
    }
    .fill_path(size);
    let cov = fill_coverage(&path, size).unwrap();
    assert!(cov.alpha.iter().all(|&a| a == 255));
}

#[test]
fn circle_coverage_is_round() {
    let size = Size::new(20, 20);
    let path = Shape::Ellipse {
        arc: None,
        border_to_origin: false,
    }
    .fill_path(size);
    let cov = fill_coverage(&path, size).unwrap();
    assert_eq!(cov.at(10, 10), 255);
    assert_eq!(cov.at(0, 0), 0);
    assert_eq!(cov.at(19, 19), 0);
}

#[test]
fn stroke_is_centered_on_the_path() {
    let size = Size::new(10, 10);
    let mut path = BezPath::new();
    path.move_to((0.0, 5.0));
    path.line_to((10.0, 5.0));
    let cov = stroke_coverage(&path, size, 2.0).unwrap();
    assert_eq!(cov.at(5, 4), 255);
    assert_eq!(cov.at(5, 5), 255);
    assert_eq!(cov.at(5, 2), 0);
    assert_eq!(cov.at(5, 7), 0);
}

#[test]
fn intersect_and_invert() {
    let mut a = Coverage {
        size: Size::new(3, 1),
        alpha: vec![255, 128, 0],
    };
    let b = Coverage {
        size: Size::new(3, 1),
        alpha: vec![128, 255, 255],
    };
    a.intersect(&b);
    assert_eq!(a.alpha, [128, 128, 0]);
    a.invert();
    assert_eq!(a.alpha, [127, 127, 255]);
}

#[test]
fn oversized_surface_is_a_geometry_error() {
    let err = fill_coverage(&BezPath::new(), Size::new(70_000, 1)).unwrap_err();
    assert!(matches!(err, CardError::Geometry(_)));
}

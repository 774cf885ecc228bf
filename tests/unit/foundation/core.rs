use super::*;

#[test]
fn size_greater_by_area() {
    let a = Size::new(150, 50);
    let b = Size::new(100, 50);
    assert!(a > b);
    assert!(!(a < b));
    assert!(a != b);
    assert!(a >= b);
    assert!(!(a <= b));
}

#[test]
fn size_less_by_area() {
    let a = Size::new(50, 50);
    let b = Size::new(100, 50);
    assert!(a < b);
    assert!(!(a > b));
    assert!(a <= b);
    assert!(!(a >= b));
}

#[test]
fn size_equal_is_component_wise() {
    let a = Size::new(100, 50);
    let b = Size::new(100, 50);
    assert!(a == b);
    assert!(!(a < b));
    assert!(!(a > b));
    assert!(a <= b);
    assert!(a >= b);
}

#[test]
fn size_same_area_different_shape_is_unordered() {
    let a = Size::new(100, 50);
    let b = Size::new(50, 100);
    assert!(a != b);
    assert!(!(a < b));
    assert!(!(a > b));
    assert!(!(a <= b));
    assert!(!(a >= b));
    assert_eq!(a.partial_cmp(&b), None);
}

#[test]
fn premultiply_rounds_to_nearest() {
    let c = Rgba8::new(255, 128, 0, 128).premultiply();
    assert_eq!(c.to_array(), [128, 64, 0, 128]);
    assert_eq!(Rgba8::new(10, 20, 30, 0).premultiply(), Rgba8Premul::transparent());
}

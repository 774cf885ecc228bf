use super::*;

fn solid(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_pixel(w, h, image::Rgba([200, 100, 50, 255]))
}

fn temp_dir(tag: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("social-cards-decode-{tag}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn same_size_is_returned_unchanged() {
    let img = solid(8, 4);
    assert_eq!(fit_to_box(&img, Size::new(8, 4), AspectPolicy::Fit), img);
}

#[test]
fn stretch_fills_the_box_exactly() {
    let out = fit_to_box(&solid(10, 2), Size::new(4, 4), AspectPolicy::Stretch);
    assert_eq!(out.dimensions(), (4, 4));
    assert!(out.pixels().all(|p| p.0[3] == 255));
}

#[test]
fn fit_pads_the_short_dimension_with_transparency() {
    // 20x10 into 10x10: width drives the scale, leaving 10x5 centered vertically.
    let out = fit_to_box(&solid(20, 10), Size::new(10, 10), AspectPolicy::Fit);
    assert_eq!(out.dimensions(), (10, 10));
    assert_eq!(out.get_pixel(5, 0).0[3], 0);
    assert_eq!(out.get_pixel(5, 5).0[3], 255);
    assert_eq!(out.get_pixel(5, 9).0[3], 0);
}

#[test]
fn height_policy_crops_overflowing_width() {
    // 20x10 into 10x10 matching height: scaled to 20x10 and cropped to the middle.
    let out = fit_to_box(&solid(40, 20), Size::new(10, 10), AspectPolicy::Height);
    assert_eq!(out.dimensions(), (10, 10));
    assert!(out.pixels().all(|p| p.0[3] == 255));
}

#[test]
fn premultiply_zeroes_transparent_pixels() {
    let mut px = [255u8, 128, 0, 128, 9, 9, 9, 0];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(px, [128, 64, 0, 128, 0, 0, 0, 0]);
}

#[test]
fn prepare_png_is_premultiplied_and_boxed() {
    let dir = temp_dir("png");
    let path = dir.join("half.png");
    RgbaImage::from_pixel(2, 2, image::Rgba([255, 255, 255, 128]))
        .save(&path)
        .unwrap();

    let cache = AssetCache::new(dir.join("cache"));
    let prepared = prepare_image(&path, &cache, Size::new(2, 2), AspectPolicy::Fit).unwrap();
    assert_eq!((prepared.width, prepared.height), (2, 2));
    assert_eq!(&prepared.rgba8_premul[..4], &[128, 128, 128, 128]);
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn prepare_svg_goes_through_the_raster_cache() {
    let dir = temp_dir("svg");
    let path = dir.join("square.svg");
    std::fs::write(
        &path,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect width="10" height="10" fill="red"/></svg>"#,
    )
    .unwrap();

    let cache = AssetCache::new(dir.join("cache"));
    let prepared = prepare_image(&path, &cache, Size::new(20, 20), AspectPolicy::Fit).unwrap();
    assert_eq!((prepared.width, prepared.height), (20, 20));
    assert_eq!(&prepared.rgba8_premul[..4], &[255, 0, 0, 255]);
    assert_eq!(std::fs::read_dir(cache.svg_dir()).unwrap().count(), 1);
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn missing_file_is_an_error() {
    let cache = AssetCache::new(std::env::temp_dir());
    assert!(prepare_image(Path::new("/definitely/not/here.png"), &cache, Size::new(1, 1), AspectPolicy::Fit).is_err());
}

use cube_ngin::resources::{
    asset_path,
    texture::{DecodedImage, load_image},
};

#[test]
fn should_load_bundled_texture() {
    let image = load_image("checker.png").unwrap();
    assert_eq!((image.width, image.height), (128, 128));
    assert_eq!(image.pixels.len(), 128 * 128 * 4);
    // opaque everywhere
    assert!(image.pixels.chunks(4).all(|px| px[3] == 255));
}

#[test]
fn should_resolve_direct_paths_before_asset_names() {
    let direct = asset_path("assets/checker.png");
    assert!(direct.ends_with("assets/checker.png"));
    assert!(asset_path("checker.png").is_file());
}

#[test]
fn should_report_missing_texture() {
    let err = load_image("does-not-exist.png").unwrap_err();
    assert!(format!("{err:#}").contains("does-not-exist.png"), "{err:#}");
}

#[test]
fn should_reject_undecodable_bytes() {
    assert!(DecodedImage::from_bytes(b"definitely not an image").is_err());
}

#[test]
fn should_expand_grey_images_to_rgba() {
    let grey = image::DynamicImage::ImageLuma8(image::GrayImage::from_pixel(
        3,
        2,
        image::Luma([90]),
    ));
    let decoded = DecodedImage::from_image(&grey);
    assert_eq!(decoded.channels, 1);
    assert_eq!(decoded.pixels.len(), 3 * 2 * 4);
    assert_eq!(&decoded.pixels[..4], &[90, 90, 90, 255]);
}

use image::Rgb;

use super::*;

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn frame_names_are_unpadded() {
    assert_eq!(
        frame_file_name("000", SiblingTag::First, FrameIndex(0)),
        "000_0_0.png"
    );
    assert_eq!(
        frame_file_name("abc", SiblingTag::Second, FrameIndex(42)),
        "abc_1_42.png"
    );
}

#[test]
fn missing_output_directory_is_a_configuration_error() {
    let err = FrameWriter::new("target/unit_writer_missing/nope").unwrap_err();
    assert!(matches!(err, ReelError::Configuration(_)));
}

#[test]
fn writes_rgb_png_and_overwrites() {
    let dir = scratch("unit_writer_overwrite");
    let writer = FrameWriter::new(&dir).unwrap();
    assert_eq!(writer.out_dir(), dir.as_path());

    let red = RgbImage::from_pixel(2, 3, Rgb([255, 0, 0]));
    let path = writer
        .write(&red, "000", SiblingTag::First, FrameIndex(7))
        .unwrap();
    assert_eq!(path, dir.join("000_0_7.png"));

    let blue = RgbImage::from_pixel(2, 3, Rgb([0, 0, 255]));
    writer
        .write(&blue, "000", SiblingTag::First, FrameIndex(7))
        .unwrap();

    let back = image::open(&path).unwrap();
    assert_eq!(back.color(), image::ColorType::Rgb8);
    let back = back.to_rgb8();
    assert_eq!(back.dimensions(), (2, 3));
    assert_eq!(*back.get_pixel(1, 2), Rgb([0, 0, 255]));
}

use super::*;

#[test]
fn nan_is_black_under_every_palette() {
    assert_eq!(color(f32::NAN), Rgb([0, 0, 0]));
    assert_eq!(Palette::Hue.color(f32::NAN), BOUNDED);
    assert_eq!(Palette::Grayscale.color(f32::NAN), BOUNDED);
}

#[test]
fn hue_zero_and_full_turn_are_red() {
    assert_eq!(color(0.0), Rgb([255, 0, 0]));
    assert_eq!(color(255.0), Rgb([255, 0, 0]));
}

#[test]
fn hue_sectors_hit_primary_and_secondary_colors() {
    assert_eq!(hsb_to_rgb(0.5, 1.0, 1.0), Rgb([0, 255, 255]));
    assert_eq!(hsb_to_rgb(0.25, 1.0, 1.0), Rgb([127, 255, 0]));
    assert_eq!(hsb_to_rgb(0.75, 1.0, 1.0), Rgb([127, 0, 255]));
}

#[test]
fn every_hue_is_fully_saturated_and_bright() {
    for h in 0..=255u16 {
        let Rgb([r, g, b]) = color(f32::from(h));
        let px = [r, g, b];
        assert_eq!(px.iter().copied().max(), Some(255), "hue {h}: {px:?}");
        assert_eq!(px.iter().copied().min(), Some(0), "hue {h}: {px:?}");
    }
}

#[test]
fn hues_outside_the_turn_wrap() {
    assert_eq!(color(-255.0), color(0.0));
    assert_eq!(color(255.0 + 127.5), color(127.5));
}

#[test]
fn grayscale_uses_the_sample_as_brightness() {
    assert_eq!(Palette::Grayscale.color(0.0), Rgb([0, 0, 0]));
    assert_eq!(Palette::Grayscale.color(255.0), Rgb([255, 255, 255]));
    assert_eq!(Palette::Grayscale.color(100.0), Rgb([100, 100, 100]));
    assert_eq!(Palette::Grayscale.color(400.0), Rgb([255, 255, 255]));
}

#[test]
fn palette_names_display() {
    assert_eq!(Palette::Hue.to_string(), "hue");
    assert_eq!(Palette::Grayscale.to_string(), "grayscale");
    assert_eq!(Palette::default(), Palette::Hue);
}

use std::fmt;

use image::Rgb;

/// Color of a bounded (non-escaping) cell under every palette.
pub const BOUNDED: Rgb<u8> = Rgb([0, 0, 0]);

/// Sample value that corresponds to one full turn of the hue wheel.
///
/// Hue, saturation and brightness all range over `[0, 255]`; a hue of `255` lands back on red.
pub const HSB_SCALE: f32 = 255.0;

/// Coloring rule applied to every sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Palette {
    /// Sample is a hue at full saturation and brightness.
    #[default]
    Hue,
    /// Sample is a brightness with zero saturation.
    Grayscale,
}

impl Palette {
    /// Map one sample to a pixel color. `NaN` is always [`BOUNDED`].
    pub fn color(self, sample: f32) -> Rgb<u8> {
        if sample.is_nan() {
            return BOUNDED;
        }
        match self {
            Self::Hue => hsb_to_rgb(sample / HSB_SCALE, 1.0, 1.0),
            Self::Grayscale => hsb_to_rgb(0.0, 0.0, sample / HSB_SCALE),
        }
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hue => "hue",
            Self::Grayscale => "grayscale",
        })
    }
}

/// Default coloring rule: [`Palette::Hue`].
pub fn color(sample: f32) -> Rgb<u8> {
    Palette::Hue.color(sample)
}

/// HSB to RGB with normalized inputs.
///
/// Hue wraps around the unit turn. Channels are scaled to `[0, 255]` and truncated, matching the
/// drawing library the upstream frames were originally rendered with.
pub fn hsb_to_rgb(hue: f32, saturation: f32, brightness: f32) -> Rgb<u8> {
    fn channel(v: f32) -> u8 {
        (255.0 * v) as u8
    }

    if saturation == 0.0 {
        let v = channel(brightness);
        return Rgb([v, v, v]);
    }

    let which = hue.rem_euclid(1.0) * 6.0;
    let f = which - which.floor();
    let p = brightness * (1.0 - saturation);
    let q = brightness * (1.0 - saturation * f);
    let t = brightness * (1.0 - saturation * (1.0 - f));

    let (r, g, b) = match which as u32 {
        0 => (brightness, t, p),
        1 => (q, brightness, p),
        2 => (p, brightness, t),
        3 => (p, q, brightness),
        4 => (t, p, brightness),
        _ => (brightness, p, q),
    };

    Rgb([channel(r), channel(g), channel(b)])
}

#[cfg(test)]
#[path = "../../tests/unit/color/palette.rs"]
mod tests;

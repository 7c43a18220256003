use image::Rgb;

use super::*;
use crate::color::palette::color;
use crate::foundation::core::Dimensions;

fn series(width: u32, height: u32, frames: Vec<Vec<f32>>) -> FrameSeries {
    FrameSeries::new(Dimensions::new(width, height).unwrap(), frames).unwrap()
}

// Small deterministic generator; samples land in [0, 255] with roughly one in eight NaN.
fn lcg_samples(seed: u64, n: usize) -> Vec<f32> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
    (0..n)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let bits = (state >> 33) as u32;
            if bits % 8 == 0 {
                f32::NAN
            } else {
                (bits % 25600) as f32 / 100.0
            }
        })
        .collect()
}

#[test]
fn cells_run_down_columns() {
    assert_eq!(cell_to_pixel(0, 2), (0, 0));
    assert_eq!(cell_to_pixel(1, 2), (0, 1));
    assert_eq!(cell_to_pixel(2, 2), (1, 0));
    assert_eq!(cell_to_pixel(5, 2), (2, 1));
}

#[test]
fn three_by_two_grid_maps_cells_in_column_order() {
    let samples = vec![0.0, 40.0, 80.0, 120.0, 160.0, 200.0];
    let fs = series(3, 2, vec![samples.clone()]);
    let mut r = Rasterizer::new(Palette::Hue);
    let img = r.paint(&fs, FrameIndex(0)).unwrap();

    assert_eq!(img.dimensions(), (3, 2));
    let expected = [(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)];
    for (cell, (x, y)) in expected.into_iter().enumerate() {
        assert_eq!(*img.get_pixel(x, y), color(samples[cell]), "cell {cell}");
    }
}

#[test]
fn nan_cells_paint_black() {
    let fs = series(2, 2, vec![vec![0.0, f32::NAN, 128.0, 192.0]]);
    let mut r = Rasterizer::new(Palette::Hue);
    let img = r.paint(&fs, FrameIndex(0)).unwrap();
    assert_eq!(*img.get_pixel(0, 1), Rgb([0, 0, 0]));
    assert_eq!(*img.get_pixel(0, 0), Rgb([255, 0, 0]));
}

#[test]
fn pixel_equals_color_of_x_times_height_plus_y() {
    let shapes = [(3, 2), (2, 3), (5, 1), (1, 4), (7, 4), (4, 9), (16, 3)];
    let mut r = Rasterizer::new(Palette::Hue);
    for (seed, (w, h)) in shapes.into_iter().enumerate() {
        let frames = vec![
            lcg_samples(seed as u64, (w * h) as usize),
            lcg_samples(seed as u64 + 100, (w * h) as usize),
        ];
        let fs = series(w, h, frames);
        for i in 0..fs.iterations() as u64 {
            let img = r.paint(&fs, FrameIndex(i)).unwrap();
            assert_eq!(img.dimensions(), (w, h));
            let frame = fs.frame(FrameIndex(i)).unwrap();
            for x in 0..w {
                for y in 0..h {
                    let cell = (x * h + y) as usize;
                    assert_eq!(
                        *img.get_pixel(x, y),
                        color(frame[cell]),
                        "{w}x{h} frame {i} at ({x},{y})"
                    );
                }
            }
        }
    }
}

#[test]
fn buffer_is_reused_and_resized() {
    let mut buf = RgbImage::from_pixel(2, 2, Rgb([9, 9, 9]));
    let fs = series(2, 2, vec![vec![f32::NAN; 4]]);
    paint_frame(&fs, FrameIndex(0), Palette::Hue, &mut buf).unwrap();
    assert!(buf.pixels().all(|p| *p == Rgb([0, 0, 0])));

    let wide = series(4, 1, vec![vec![0.0; 4]]);
    paint_frame(&wide, FrameIndex(0), Palette::Hue, &mut buf).unwrap();
    assert_eq!(buf.dimensions(), (4, 1));
}

#[test]
fn out_of_range_frame_is_an_error() {
    let fs = series(1, 1, vec![vec![0.0]]);
    let mut r = Rasterizer::new(Palette::Grayscale);
    assert!(r.paint(&fs, FrameIndex(1)).is_err());
    assert_eq!(r.palette(), Palette::Grayscale);
}

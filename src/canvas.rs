use std::fs;
use std::path::Path;

use crate::consts::{ PPM_LINE_WIDTH, PPM_MAX_COLOR };
use crate::error::Result;
use crate::color::Color;

/// A canvas for drawing pixels.
///
/// This structure stores the results of the ray tracer, one unclamped
/// `Color` per pixel. `(0, 0)` is the top-left pixel and `y` grows downward.
///
/// Once rendering finishes, the `Canvas` can be saved as a plain (P3) PPM
/// image.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Canvas {
    /// The width of the canvas, in pixels.
    pub width: usize,

    /// The height of the canvas, in pixels.
    pub height: usize,

    /// The pixels of the canvas, stored row by row.
    pixels: Vec<Color>,
}

impl Canvas {
    /// Creates a black canvas with specified width and height.
    pub fn new(width: usize, height: usize) -> Canvas {
        Canvas {
            width,
            height,
            pixels: vec![Color::black(); width * height],
        }
    }

    /// Writes a color to a location on the `Canvas`.
    ///
    /// Out-of-bounds pixels are ignored. `x` is the column and `y` the row,
    /// both zero-indexed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use phong_tracer::color::Color;
    /// # use phong_tracer::canvas::Canvas;
    /// let purple = Color::rgb(1.0, 0.0, 1.0);
    /// let mut canvas = Canvas::new(8, 8);
    /// canvas.write_pixel(4, 2, &purple);
    /// assert_eq!(canvas.pixel_at(4, 2), Some(purple));
    /// assert_eq!(canvas.pixel_at(8, 2), None);
    /// ```
    pub fn write_pixel(&mut self, x: usize, y: usize, pixel: &Color) {
        if x >= self.width || y >= self.height {
            return;
        }

        self.pixels[(y * self.width) + x] = *pixel;
    }

    /// Reads a color from a location on the `Canvas`, or `None` if the
    /// location is out-of-bounds.
    pub fn pixel_at(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }

        Some(self.pixels[(y * self.width) + x])
    }

    /// Serializes the canvas as a plain PPM image.
    ///
    /// Every row starts on a new line. Within a row, values are separated by
    /// single spaces and a line is broken before any value that would bring
    /// it to `PPM_LINE_WIDTH` characters.
    pub fn to_ppm(&self) -> String {
        let mut out = format!("P3\n{} {}\n{}\n",
            self.width, self.height, PPM_MAX_COLOR as u32);

        if self.width == 0 {
            return out;
        }

        for row in self.pixels.chunks(self.width) {
            let mut line_len = 0;

            for pixel in row.iter() {
                for channel in [pixel.r, pixel.g, pixel.b].iter() {
                    let s = channel_to_byte(*channel).to_string();

                    if line_len + s.len() >= PPM_LINE_WIDTH {
                        out.push('\n');
                        line_len = 0;
                    } else if line_len > 0 {
                        out.push(' ');
                        line_len += 1;
                    }

                    line_len += s.len();
                    out.push_str(&s);
                }
            }

            out.push('\n');
        }

        out
    }

    /// Saves a canvas to a PPM file.
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_ppm())?;
        Ok(())
    }
}

fn channel_to_byte(c: f64) -> u8 {
    (c.clamp(0.0, 1.0) * PPM_MAX_COLOR).round() as u8
}

#[test]
fn new_canvas_is_black() {
    let c = Canvas::new(10, 20);

    assert_eq!(c.width, 10);
    assert_eq!(c.height, 20);
    for y in 0..20 {
        for x in 0..10 {
            assert_eq!(c.pixel_at(x, y), Some(Color::black()));
        }
    }
}

#[test]
fn write_pixel_only_touches_one_pixel() {
    let mut c = Canvas::new(10, 20);
    let red = Color::rgb(1.0, 0.0, 0.0);
    c.write_pixel(2, 3, &red);

    assert_eq!(c.pixel_at(2, 3), Some(red));
    assert_eq!(c.pixel_at(2, 1), Some(Color::black()));
    assert_eq!(c.pixel_at(1, 3), Some(Color::black()));
}

#[test]
fn out_of_bounds_write_is_ignored() {
    let mut c = Canvas::new(2, 2);
    c.write_pixel(2, 0, &Color::white());
    c.write_pixel(0, 5, &Color::white());

    assert_eq!(c, Canvas::new(2, 2));
}

#[test]
fn ppm_header() {
    let ppm = Canvas::new(5, 3).to_ppm();
    let lines: Vec<&str> = ppm.lines().take(3).collect();

    assert_eq!(lines, vec!["P3", "5 3", "255"]);
}

#[test]
fn ppm_pixel_data_is_clamped_and_scaled() {
    let mut c = Canvas::new(5, 3);
    c.write_pixel(0, 0, &Color::rgb(1.5, 0.0, 0.0));
    c.write_pixel(2, 1, &Color::rgb(0.0, 0.5, 0.0));
    c.write_pixel(4, 2, &Color::rgb(-0.5, 0.0, 1.0));

    let ppm = c.to_ppm();
    let lines: Vec<&str> = ppm.lines().skip(3).collect();

    assert_eq!(lines, vec![
        "255 0 0 0 0 0 0 0 0 0 0 0 0 0 0",
        "0 0 0 0 0 0 0 128 0 0 0 0 0 0 0",
        "0 0 0 0 0 0 0 0 0 0 0 0 0 0 255",
    ]);
}

#[test]
fn ppm_splits_long_lines() {
    let mut c = Canvas::new(10, 2);
    for y in 0..2 {
        for x in 0..10 {
            c.write_pixel(x, y, &Color::rgb(1.0, 0.8, 0.6));
        }
    }

    let ppm = c.to_ppm();
    let lines: Vec<&str> = ppm.lines().skip(3).collect();

    assert_eq!(lines, vec![
        "255 204 153 255 204 153 255 204 153 255 204 153 255 204 153 255 204",
        "153 255 204 153 255 204 153 255 204 153 255 204 153",
        "255 204 153 255 204 153 255 204 153 255 204 153 255 204 153 255 204",
        "153 255 204 153 255 204 153 255 204 153 255 204 153",
    ]);
    assert!(lines.iter().all(|l| l.len() < PPM_LINE_WIDTH));
}

#[test]
fn ppm_ends_with_newline() {
    assert!(Canvas::new(5, 3).to_ppm().ends_with('\n'));
}

//! Side-by-side match visualization
//!
//! Renders the two resized grayscale images next to each other, marks
//! every keypoint and draws accepted matches as lines colored by their
//! confidence, then writes the plot as a PNG.

use std::fs;
use std::path::Path;

use image::{GrayImage, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_circle_mut, draw_line_segment_mut};
use palette::{Hsl, IntoColor, Srgb};
use thiserror::Error;

use crate::matching::MatchingOutcome;

/// Horizontal gap between the two panes.
const PANE_GAP: u32 = 10;
const KEYPOINT_RADIUS: i32 = 2;
const KEYPOINT_COLOR: Rgb<u8> = Rgb([30, 30, 30]);
const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// The error type for writing the match plot.
#[derive(Debug, Error)]
pub enum VizError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to write match plot {path}: {source}")]
    Save {
        path: String,
        source: image::ImageError,
    },
}

/// Map a confidence in `[0, 1]` onto a blue-to-red gradient.
pub fn confidence_color(confidence: f32) -> Rgb<u8> {
    let hue = 240.0 * (1.0 - confidence.clamp(0.0, 1.0));
    let hsl = Hsl::new(hue, 0.9, 0.5);
    let rgb: Srgb = hsl.into_color();
    Rgb([
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    ])
}

/// Render both panes with keypoint markers and confidence-colored match
/// lines.
pub fn render_matches(outcome: &MatchingOutcome) -> RgbImage {
    let (w0, h0) = outcome.image0.dimensions();
    let (w1, h1) = outcome.image1.dimensions();
    let offset = w0 + PANE_GAP;

    let mut canvas = RgbImage::from_pixel(offset + w1, h0.max(h1), BACKGROUND);
    blit_gray(&mut canvas, &outcome.image0, 0);
    blit_gray(&mut canvas, &outcome.image1, offset);

    for kp in &outcome.result.keypoints0 {
        draw_hollow_circle_mut(
            &mut canvas,
            (kp.x as i32, kp.y as i32),
            KEYPOINT_RADIUS,
            KEYPOINT_COLOR,
        );
    }
    for kp in &outcome.result.keypoints1 {
        draw_hollow_circle_mut(
            &mut canvas,
            (kp.x as i32 + offset as i32, kp.y as i32),
            KEYPOINT_RADIUS,
            KEYPOINT_COLOR,
        );
    }

    for m in outcome.result.valid_matches() {
        let color = confidence_color(m.confidence);
        let to_x = m.to.x + offset as f32;
        draw_line_segment_mut(&mut canvas, (m.from.x, m.from.y), (to_x, m.to.y), color);
        draw_filled_circle_mut(
            &mut canvas,
            (m.from.x as i32, m.from.y as i32),
            KEYPOINT_RADIUS,
            color,
        );
        draw_filled_circle_mut(
            &mut canvas,
            (to_x as i32, m.to.y as i32),
            KEYPOINT_RADIUS,
            color,
        );
    }

    canvas
}

fn blit_gray(canvas: &mut RgbImage, pane: &GrayImage, x_offset: u32) {
    for (x, y, p) in pane.enumerate_pixels() {
        let v = p.0[0];
        canvas.put_pixel(x + x_offset, y, Rgb([v, v, v]));
    }
}

/// Write the plot, creating the output directory if absent.
pub fn write_matches_plot(path: &Path, plot: &RgbImage) -> Result<(), VizError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| VizError::CreateDir {
            path: parent.display().to_string(),
            source,
        })?;
    }
    plot.save(path).map_err(|source| VizError::Save {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::{Keypoint, MatchResult, MatchingOutcome};

    fn outcome_with(result: MatchResult) -> MatchingOutcome {
        MatchingOutcome {
            image0: GrayImage::new(64, 48),
            image1: GrayImage::new(64, 48),
            result,
        }
    }

    #[test]
    fn test_confidence_gradient_endpoints() {
        let low = confidence_color(0.0);
        let high = confidence_color(1.0);

        assert!(low.0[2] > low.0[0], "low confidence should lean blue");
        assert!(high.0[0] > high.0[2], "high confidence should lean red");
    }

    #[test]
    fn test_confidence_color_clamps_out_of_range() {
        assert_eq!(confidence_color(-1.0), confidence_color(0.0));
        assert_eq!(confidence_color(2.0), confidence_color(1.0));
    }

    #[test]
    fn test_canvas_spans_both_panes() {
        let canvas = render_matches(&outcome_with(MatchResult::default()));

        assert_eq!(canvas.dimensions(), (64 + PANE_GAP + 64, 48));
    }

    #[test]
    fn test_match_endpoints_carry_confidence_color() {
        let result = MatchResult {
            keypoints0: vec![Keypoint {
                x: 10.0,
                y: 10.0,
                score: 1.0,
            }],
            keypoints1: vec![Keypoint {
                x: 20.0,
                y: 12.0,
                score: 1.0,
            }],
            matches0: vec![0],
            confidence0: vec![0.9],
        };
        let canvas = render_matches(&outcome_with(result));
        let color = confidence_color(0.9);

        // filled marker at the left-pane endpoint
        assert_eq!(*canvas.get_pixel(10, 10), color);
        // and at the right-pane endpoint, shifted past the gap
        assert_eq!(*canvas.get_pixel(20 + 64 + PANE_GAP, 12), color);
    }

    #[test]
    fn test_write_creates_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output").join("matches.png");
        let canvas = render_matches(&outcome_with(MatchResult::default()));

        write_matches_plot(&path, &canvas).unwrap();

        assert!(path.exists());
    }
}

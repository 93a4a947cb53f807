//! Static PNG rendering of a normalized route.

use std::io::Cursor;

use ab_glyph::{FontRef, PxScale};
use image::{ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut, draw_text_mut, text_size};

use crate::error::{Result, TrackError};
use crate::geometry::RenderGeometry;
use crate::track::{GeoPoint, Waypoint};

/// Square canvas edge length in pixels.
pub const CANVAS_SIZE: u32 = 1200;

const MARGIN: f64 = 60.0;
const TITLE: &str = "GPS Track";

const BACKGROUND: Rgba<u8> = Rgba([0xf2, 0xf2, 0xe8, 0xff]);
const ROUTE_COLOR: Rgba<u8> = Rgba([211, 47, 47, 255]);
const MARKER_COLOR: Rgba<u8> = Rgba([25, 118, 210, 255]);
const MARKER_FILL: Rgba<u8> = Rgba([255, 255, 255, 255]);
const TEXT_COLOR: Rgba<u8> = Rgba([40, 40, 40, 255]);

const MARKER_RADIUS: i32 = 14;
const LABEL_SCALE: f32 = 20.0;
const TITLE_SCALE: f32 = 30.0;

const FONT_DATA: &[u8] = include_bytes!("../assets/DejaVuSansMono.ttf");

/// Draw the route polyline and numbered waypoint markers onto a fixed-size
/// square canvas and return the PNG-encoded bytes.
///
/// Markers are annotated with their 1-based position in `waypoints`; the
/// textual labels travel out-of-band. Each call owns its canvas, so
/// concurrent renders never share a drawing surface.
pub fn render_track(
    route_points: &[GeoPoint],
    waypoints: &[Waypoint],
    geometry: &RenderGeometry,
) -> Result<Vec<u8>> {
    if route_points.is_empty() {
        return Err(TrackError::RenderPrecondition(
            "renderer invoked with an empty route",
        ));
    }

    let mut img = RgbaImage::from_pixel(CANVAS_SIZE, CANVAS_SIZE, BACKGROUND);
    let font = FontRef::try_from_slice(FONT_DATA).expect("embedded font is valid");

    for pair in route_points.windows(2) {
        let from = to_canvas(geometry, pair[0]);
        let to = to_canvas(geometry, pair[1]);
        // Repeat with 1px offsets for a thicker stroke
        for (dx, dy) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)] {
            draw_line_segment_mut(
                &mut img,
                (from.0 + dx, from.1 + dy),
                (to.0 + dx, to.1 + dy),
                ROUTE_COLOR,
            );
        }
    }

    let label_scale = PxScale::from(LABEL_SCALE);
    for (i, wp) in waypoints.iter().enumerate() {
        let (cx, cy) = to_canvas(geometry, wp.point);
        let center = (cx.round() as i32, cy.round() as i32);
        draw_filled_circle_mut(&mut img, center, MARKER_RADIUS, MARKER_COLOR);
        draw_filled_circle_mut(&mut img, center, MARKER_RADIUS - 4, MARKER_FILL);

        let number = (i + 1).to_string();
        let (tw, th) = text_size(label_scale, &font, &number);
        draw_text_mut(
            &mut img,
            TEXT_COLOR,
            center.0 - (tw / 2) as i32,
            center.1 - (th / 2) as i32,
            label_scale,
            &font,
            &number,
        );
    }

    let title_scale = PxScale::from(TITLE_SCALE);
    let (tw, _) = text_size(title_scale, &font, TITLE);
    draw_text_mut(
        &mut img,
        TEXT_COLOR,
        (CANVAS_SIZE / 2) as i32 - (tw / 2) as i32,
        (MARGIN / 3.0) as i32,
        title_scale,
        &font,
        TITLE,
    );

    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(png)
}

/// Map a geographic point to canvas pixels. The unit-square projection is
/// scaled into the margins and the y axis flipped so north points up.
fn to_canvas(geometry: &RenderGeometry, point: GeoPoint) -> (f32, f32) {
    let (nx, ny) = geometry.project(point);
    let extent = CANVAS_SIZE as f64 - 2.0 * MARGIN;
    let x = MARGIN + nx * extent;
    let y = CANVAS_SIZE as f64 - MARGIN - ny * extent;
    (x as f32, y as f32)
}

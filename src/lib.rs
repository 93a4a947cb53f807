//! trackshot: GPS track files in, annotated route images out.
//!
//! Parses GPX and KML files into a unified [`track::TrackData`] model,
//! synthesizes waypoints for tracks that carry none, renders a static PNG of
//! the route with numbered markers, and builds a Google Maps directions link.
//!
//! ```no_run
//! let bytes = std::fs::read("hike.gpx")?;
//! let summary = trackshot::process_track("hike.gpx", &bytes)?;
//! std::fs::write("hike.png", &summary.image_png)?;
//! if let Some(link) = &summary.maps_link {
//!     println!("{link}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod geometry;
pub mod gpx;
pub mod kml;
pub mod link;
pub mod pipeline;
pub mod render;
pub mod track;
pub mod waypoints;

mod xml;

pub use error::{MalformedInput, Result, TrackError};
pub use pipeline::{TrackFormat, TrackSummary, process_track};
pub use track::{GeoPoint, TrackData, Waypoint};

//! # knbk-trajectory
//!
//! Converts survey stations (measured depth, inclination, azimuth) into
//! cumulative 3D positions for plotting the wellbore path.
//!
//! ## Example
//!
//! ```rust
//! use knbk_trajectory::{integrate, SurveyStation};
//!
//! let stations = [
//!     SurveyStation::new(0.0, 0.0, 0.0),
//!     SurveyStation::new(100.0, 0.0, 0.0),
//! ];
//! let path = integrate(&stations);
//!
//! assert_eq!(path.len(), 2);
//! assert_eq!(path[1].z, 100.0);
//! ```

mod error;
mod integrator;
mod plot;
mod sheet;
mod station;

pub use error::{TrajectoryError, TrajectoryResult};
pub use integrator::{integrate, Position};
pub use plot::{AxisRange, PlotExtents, PlotSeries};
pub use sheet::SurveySheet;
pub use station::{parse_number, stations_from_rows, SurveyStation};

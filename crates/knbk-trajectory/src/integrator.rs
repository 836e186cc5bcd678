//! Survey stations to cumulative 3D positions

use log::debug;

use crate::station::SurveyStation;

/// A point on the wellbore path. `z` grows with vertical depth.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    /// Create a position
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The surface origin
    pub const ORIGIN: Position = Position {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
}

/// Integrate survey stations into positions, one per station.
///
/// The first station is placed at the origin with zero inclination and
/// azimuth whatever its recorded angles are. Each following station adds
/// the angle changes since the previous station to the running angles and
/// projects the whole depth step along the updated direction:
///
/// ```text
/// dx = dMD * sin(inc) * cos(az)
/// dy = dMD * sin(inc) * sin(az)
/// dz = dMD * cos(inc)
/// ```
///
/// This is a tangential step using the end-of-interval angles, not the
/// minimum curvature method; positions must match it exactly.
pub fn integrate(stations: &[SurveyStation]) -> Vec<Position> {
    let mut positions = Vec::with_capacity(stations.len());
    if stations.is_empty() {
        return positions;
    }

    let mut position = Position::ORIGIN;
    let mut inclination = 0.0_f64;
    let mut azimuth = 0.0_f64;
    positions.push(position);

    for pair in stations.windows(2) {
        let (prev, cur) = (&pair[0], &pair[1]);

        let delta_depth = cur.measured_depth - prev.measured_depth;
        inclination += (cur.inclination_deg - prev.inclination_deg).to_radians();
        azimuth += (cur.azimuth_deg - prev.azimuth_deg).to_radians();

        position.x += delta_depth * inclination.sin() * azimuth.cos();
        position.y += delta_depth * inclination.sin() * azimuth.sin();
        position.z += delta_depth * inclination.cos();
        positions.push(position);
    }

    debug!("integrated {} survey stations", stations.len());
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Position, expected: (f64, f64, f64)) {
        let close = |a: f64, b: f64| (a - b).abs() <= 1e-9 * b.abs().max(1.0);
        assert!(
            close(actual.x, expected.0) && close(actual.y, expected.1) && close(actual.z, expected.2),
            "{:?} != {:?}",
            actual,
            expected
        );
    }

    #[test]
    fn test_empty_and_single() {
        assert!(integrate(&[]).is_empty());
        assert_eq!(
            integrate(&[SurveyStation::new(1500.0, 12.0, 270.0)]),
            vec![Position::ORIGIN]
        );
    }

    #[test]
    fn test_three_stations() {
        let stations = [
            SurveyStation::new(0.0, 0.0, 0.0),
            SurveyStation::new(10.0, 5.0, 0.0),
            SurveyStation::new(20.0, 10.0, 90.0),
        ];
        let path = integrate(&stations);
        assert_eq!(path.len(), 3);
        assert_eq!(path[0], Position::ORIGIN);

        let inc1 = 5.0_f64.to_radians();
        let p1 = (10.0 * inc1.sin(), 0.0, 10.0 * inc1.cos());
        assert_close(path[1], p1);

        let inc2 = 10.0_f64.to_radians();
        let az2 = 90.0_f64.to_radians();
        let p2 = (
            p1.0 + 10.0 * inc2.sin() * az2.cos(),
            p1.1 + 10.0 * inc2.sin() * az2.sin(),
            p1.2 + 10.0 * inc2.cos(),
        );
        assert_close(path[2], p2);
        assert_close(path[2], (0.871_557_427_476_581_7, 1.736_481_776_669_303, 19.810_024_511_039_535));
    }

    #[test]
    fn test_vertical_well() {
        let stations: Vec<_> = (0..5)
            .map(|i| SurveyStation::new(i as f64 * 30.0, 0.0, 0.0))
            .collect();
        let path = integrate(&stations);
        assert_close(path[4], (0.0, 0.0, 120.0));
    }

    #[test]
    fn test_first_station_angles_are_ignored() {
        // Only the change in angles matters: a well surveyed at 30 deg then
        // 40 deg is integrated as if it started vertical
        let stations = [
            SurveyStation::new(100.0, 30.0, 0.0),
            SurveyStation::new(200.0, 40.0, 0.0),
        ];
        let path = integrate(&stations);
        let inc = 10.0_f64.to_radians();
        assert_close(path[1], (100.0 * inc.sin(), 0.0, 100.0 * inc.cos()));
    }
}

use crate::geo::{Geometry, Position};

const EPSILON: f64 = 1e-6;

/// `start, start + step, ...` strictly below `stop`.
fn range(start: f64, stop: f64, step: f64) -> impl Iterator<Item = f64> {
    let n = ((stop - start) / step).ceil().max(0.0) as usize;
    (0..n).map(move |i| start + i as f64 * step)
}

/// Samples from `start` to `stop` at `step`, always ending exactly on `stop`.
fn samples(start: f64, stop: f64, step: f64) -> Vec<f64> {
    let mut values: Vec<f64> = range(start, stop - EPSILON, step).collect();
    values.push(stop);
    values
}

/// Latitude/longitude grid generator.
///
/// Major lines every 90° run almost pole to pole; minor lines every 10° stop at
/// ±80° latitude so they do not crowd the poles.
#[derive(Debug, Clone, PartialEq)]
pub struct Graticule {
    /// `[(lon0, lat0), (lon1, lat1)]`
    pub extent_major: [(f64, f64); 2],
    pub extent_minor: [(f64, f64); 2],
    pub step_major: (f64, f64),
    pub step_minor: (f64, f64),
    /// Sampling interval along each line, in degrees.
    pub precision: f64,
}

impl Default for Graticule {
    fn default() -> Self {
        Self {
            extent_major: [(-180.0, -90.0 + EPSILON), (180.0, 90.0 - EPSILON)],
            extent_minor: [(-180.0, -80.0 - EPSILON), (180.0, 80.0 + EPSILON)],
            step_major: (90.0, 90.0),
            step_minor: (10.0, 10.0),
            precision: 2.5,
        }
    }
}

impl Graticule {
    fn meridian(&self, lon: f64, lat0: f64, lat1: f64) -> Vec<Position> {
        samples(lat0, lat1, self.precision)
            .into_iter()
            .map(|lat| Position::new(lon, lat))
            .collect()
    }

    fn parallel(&self, lat: f64, lon0: f64, lon1: f64) -> Vec<Position> {
        samples(lon0, lon1, self.precision)
            .into_iter()
            .map(|lon| Position::new(lon, lat))
            .collect()
    }

    /// Every grid line: major meridians, major parallels, then the minor lines
    /// that do not coincide with a major one.
    pub fn lines(&self) -> Vec<Vec<Position>> {
        let [(lon0_major, lat0_major), (lon1_major, lat1_major)] = self.extent_major;
        let [(lon0_minor, lat0_minor), (lon1_minor, lat1_minor)] = self.extent_minor;
        let (dx_major, dy_major) = self.step_major;
        let (dx_minor, dy_minor) = self.step_minor;

        let major_meridians = range(
            (lon0_major / dx_major).ceil() * dx_major,
            lon1_major,
            dx_major,
        )
        .map(|lon| self.meridian(lon, lat0_major, lat1_major));

        let major_parallels = range(
            (lat0_major / dy_major).ceil() * dy_major,
            lat1_major,
            dy_major,
        )
        .map(|lat| self.parallel(lat, lon0_major, lon1_major));

        let minor_meridians = range(
            (lon0_minor / dx_minor).ceil() * dx_minor,
            lon1_minor,
            dx_minor,
        )
        .filter(|lon| (lon % dx_major).abs() > EPSILON)
        .map(|lon| self.meridian(lon, lat0_minor, lat1_minor));

        let minor_parallels = range(
            (lat0_minor / dy_minor).ceil() * dy_minor,
            lat1_minor,
            dy_minor,
        )
        .filter(|lat| (lat % dy_major).abs() > EPSILON)
        .map(|lat| self.parallel(lat, lon0_minor, lon1_minor));

        major_meridians
            .chain(major_parallels)
            .chain(minor_meridians)
            .chain(minor_parallels)
            .collect()
    }

    pub fn to_geometry(&self) -> Geometry {
        Geometry::MultiLineString {
            coordinates: self.lines(),
        }
    }
}

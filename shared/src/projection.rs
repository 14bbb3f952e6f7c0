use std::f64::consts::PI;

use crate::geo::{FeatureCollection, Position};
use crate::path::GeoPath;

const RADIANS: f64 = PI / 180.0;

/// Reference scale used while measuring bounds in `fit_size`.
const FIT_REFERENCE_SCALE: f64 = 150.0;

/// Unit vector on the sphere. After rotation, `x` points at the viewer and
/// `(y, z)` are the orthographic plane coordinates (east, north).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn scaled(self, k: f64) -> Self {
        Self::new(self.x * k, self.y * k, self.z * k)
    }

    pub fn plus(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    /// Whether the point lies on the hemisphere facing the viewer.
    pub fn is_visible(self) -> bool {
        self.x > 0.0
    }
}

/// Orthographic projection with a fit/translate transform and a two-axis rotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Orthographic {
    scale: f64,
    translate: (f64, f64),
    rotation: [f64; 2],
}

impl Default for Orthographic {
    fn default() -> Self {
        Self {
            scale: 249.5,
            translate: (480.0, 250.0),
            rotation: [0.0, 0.0],
        }
    }
}

impl Orthographic {
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    pub fn translate(&self) -> (f64, f64) {
        self.translate
    }

    pub fn set_translate(&mut self, translate: (f64, f64)) {
        self.translate = translate;
    }

    /// `[lambda, phi]` in degrees.
    pub fn rotation(&self) -> [f64; 2] {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: [f64; 2]) {
        self.rotation = rotation;
    }

    /// Rotate a geographic position into view space: shift longitude by lambda,
    /// then tilt about the east axis by phi.
    pub fn rotate(&self, p: Position) -> Vec3 {
        let lambda = (p.lon + self.rotation[0]) * RADIANS;
        let phi = p.lat * RADIANS;
        let (sin_dphi, cos_dphi) = (self.rotation[1] * RADIANS).sin_cos();

        let cos_phi = phi.cos();
        let x = lambda.cos() * cos_phi;
        let y = lambda.sin() * cos_phi;
        let z = phi.sin();

        Vec3::new(
            x * cos_dphi - z * sin_dphi,
            y,
            z * cos_dphi + x * sin_dphi,
        )
    }

    /// Map a view-space vector to drawing coordinates (y grows downward).
    pub fn to_screen(&self, v: Vec3) -> (f64, f64) {
        (
            self.translate.0 + self.scale * v.y,
            self.translate.1 - self.scale * v.z,
        )
    }

    /// Project a position, `None` when it faces away from the viewer.
    pub fn project(&self, p: Position) -> Option<(f64, f64)> {
        let v = self.rotate(p);
        v.is_visible().then(|| self.to_screen(v))
    }

    /// Scale and translate so the clipped collection fills `size` exactly.
    /// Empty or degenerate bounds leave the projection untouched.
    pub fn fit_size(&mut self, size: (f64, f64), collection: &FeatureCollection) {
        let previous = (self.scale, self.translate);
        self.scale = FIT_REFERENCE_SCALE;
        self.translate = (0.0, 0.0);

        let bounds = GeoPath::new(self).collection_bounds(collection);
        let Some([(x0, y0), (x1, y1)]) = bounds else {
            (self.scale, self.translate) = previous;
            return;
        };

        let (w, h) = size;
        let k = (w / (x1 - x0)).min(h / (y1 - y0));
        if !k.is_finite() || k <= 0.0 {
            (self.scale, self.translate) = previous;
            return;
        }

        self.scale = FIT_REFERENCE_SCALE * k;
        self.translate = ((w - k * (x0 + x1)) / 2.0, (h - k * (y0 + y1)) / 2.0);
    }
}

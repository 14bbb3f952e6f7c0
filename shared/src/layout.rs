/// Viewport geometry captured once at startup.
///
/// The globe occupies the right half of the surface: its fit box is half the
/// viewport width by the full height, centered in that half.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobeLayout {
    pub surface: (f64, f64),
    pub globe_size: (f64, f64),
    pub center: (f64, f64),
}

impl GlobeLayout {
    pub fn from_viewport(width: f64, height: f64) -> Self {
        let globe_size = (width / 2.0, height);
        Self {
            surface: (width, height),
            globe_size,
            center: (width - globe_size.0 / 2.0, height / 2.0),
        }
    }
}

use crate::colors::{Palette, ShapeStyle};
use crate::config::GlobeConfig;
use crate::geo::{FeatureCollection, Geometry};
use crate::graticule::Graticule;
use crate::info::CountryInfo;
use crate::interaction::{DragPhase, DragSession, Rotation};
use crate::layout::GlobeLayout;
use crate::path::GeoPath;
use crate::projection::Orthographic;

pub const COUNTRY_CLASS: &str = "country";
pub const GRATICULE_CLASS: &str = "graticule";

/// All mutable globe state in one place: projection, rotation, drag session,
/// highlighted country and the last info shown.
#[derive(Debug, Clone)]
pub struct GlobeState {
    features: FeatureCollection,
    layout: GlobeLayout,
    projection: Orthographic,
    graticule: Geometry,
    rotation: Rotation,
    drag: DragSession,
    highlighted: Option<usize>,
    info: Option<CountryInfo>,
    palette: Palette,
    drag_sensitivity: f64,
}

impl GlobeState {
    pub fn new(features: FeatureCollection, layout: GlobeLayout, config: &GlobeConfig) -> Self {
        let config = config.clone().sanitized();
        let mut projection = Orthographic::default();
        projection.fit_size(layout.globe_size, &features);
        projection.set_translate(layout.center);

        Self {
            features,
            layout,
            projection,
            graticule: Graticule::default().to_geometry(),
            rotation: Rotation::default(),
            drag: DragSession::default(),
            highlighted: None,
            info: None,
            palette: config.palette,
            drag_sensitivity: config.drag_sensitivity,
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn features(&self) -> &FeatureCollection {
        &self.features
    }

    pub fn layout(&self) -> GlobeLayout {
        self.layout
    }

    pub fn projection(&self) -> &Orthographic {
        &self.projection
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn drag_phase(&self) -> DragPhase {
        self.drag.phase()
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Info for the most recently hovered country; stays after the pointer leaves.
    pub fn info(&self) -> Option<&CountryInfo> {
        self.info.as_ref()
    }

    pub fn pointer_down(&mut self) {
        self.drag.pointer_down();
    }

    pub fn pointer_up(&mut self) {
        self.drag.pointer_up();
    }

    /// Apply a pointer-move delta. Returns `true` when the globe was rotated and
    /// every path must be redrawn.
    pub fn pointer_move(&mut self, dx: f64, dy: f64) -> bool {
        let moved = self
            .drag
            .pointer_move(&mut self.rotation, dx, dy, self.drag_sensitivity);
        if moved {
            self.projection.set_rotation(self.rotation.as_angles());
        }
        moved
    }

    /// Highlight country `index` and load its details into the info panel.
    /// Out-of-range indices change nothing.
    pub fn hover(&mut self, index: usize) -> Option<&CountryInfo> {
        let feature = self.features.get(index)?;
        self.info = Some(CountryInfo::from_feature(feature));
        self.highlighted = Some(index);
        self.info.as_ref()
    }

    /// Current path data for country `index`; empty for missing geometry or
    /// a country entirely on the far side.
    pub fn country_path(&self, index: usize) -> String {
        self.features
            .get(index)
            .and_then(|f| f.geometry.as_ref())
            .map(|g| GeoPath::new(&self.projection).svg(g))
            .unwrap_or_default()
    }

    pub fn graticule_path(&self) -> String {
        GeoPath::new(&self.projection).svg(&self.graticule)
    }

    pub fn country_style(&self, index: usize) -> ShapeStyle<'_> {
        self.palette.country(self.highlighted == Some(index))
    }

    pub fn graticule_style(&self) -> ShapeStyle<'_> {
        self.palette.graticule()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{Feature, Position};
    use serde_json::json;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum ShapeKind {
        Country(usize),
        Graticule,
    }

    /// One drawn shape, as the surface would show it right now.
    #[derive(Debug)]
    struct Shape {
        kind: ShapeKind,
        d: String,
        fill: String,
        stroke: String,
    }

    /// Every shape in draw order: one per feature, then the graticule.
    fn scene(globe: &GlobeState) -> Vec<Shape> {
        let mut shapes: Vec<Shape> = (0..globe.len())
            .map(|i| {
                let style = globe.country_style(i);
                Shape {
                    kind: ShapeKind::Country(i),
                    d: globe.country_path(i),
                    fill: style.fill.to_string(),
                    stroke: style.stroke.to_string(),
                }
            })
            .collect();
        let style = globe.graticule_style();
        shapes.push(Shape {
            kind: ShapeKind::Graticule,
            d: globe.graticule_path(),
            fill: style.fill.to_string(),
            stroke: style.stroke.to_string(),
        });
        shapes
    }

    /// Clockwise square with its south-west corner at `(lon, lat)`.
    fn square(lon: f64, lat: f64, size: f64) -> Geometry {
        Geometry::Polygon {
            coordinates: vec![vec![
                Position::new(lon, lat),
                Position::new(lon, lat + size),
                Position::new(lon + size, lat + size),
                Position::new(lon + size, lat),
                Position::new(lon, lat),
            ]],
        }
    }

    fn country(name: &str, geometry: Option<Geometry>) -> Feature {
        Feature {
            geometry,
            properties: json!({
                "formal_en": name,
                "continent": "Asia",
                "income_grp": "High income",
                "pop_est": 123456
            })
            .as_object()
            .cloned(),
        }
    }

    fn two_country_globe() -> GlobeState {
        let features = FeatureCollection {
            features: vec![
                country("Republic X", Some(square(-20.0, -10.0, 15.0))),
                country("Kingdom Y", Some(square(5.0, 0.0, 20.0))),
            ],
        };
        GlobeState::new(
            features,
            GlobeLayout::from_viewport(1200.0, 800.0),
            &GlobeConfig::default(),
        )
    }

    fn country_paths(globe: &GlobeState) -> Vec<String> {
        (0..globe.len()).map(|i| globe.country_path(i)).collect()
    }

    #[test]
    fn one_country_shape_per_feature() {
        for n in [0usize, 1, 5, 12] {
            let features = FeatureCollection {
                features: (0..n)
                    .map(|i| country("C", Some(square(i as f64 * 5.0 - 30.0, 0.0, 4.0))))
                    .collect(),
            };
            let globe = GlobeState::new(
                features,
                GlobeLayout::from_viewport(800.0, 600.0),
                &GlobeConfig::default(),
            );
            let shapes = scene(&globe);
            let countries = shapes
                .iter()
                .filter(|s| matches!(s.kind, ShapeKind::Country(_)))
                .count();
            assert_eq!(countries, n);
            assert_eq!(shapes.len(), n + 1);
            assert_eq!(shapes.last().map(|s| s.kind), Some(ShapeKind::Graticule));
            assert_eq!(shapes.last().map(|s| s.fill.as_str()), Some("none"));
        }
    }

    #[test]
    fn null_geometry_still_gets_a_shape() {
        let features = FeatureCollection {
            features: vec![country("Ghost", None), country("Real", Some(square(0.0, 0.0, 10.0)))],
        };
        let globe = GlobeState::new(
            features,
            GlobeLayout::from_viewport(800.0, 600.0),
            &GlobeConfig::default(),
        );
        let shapes = scene(&globe);
        assert_eq!(shapes.len(), 3);
        assert_eq!(shapes[0].d, "");
        assert!(!shapes[1].d.is_empty());
    }

    #[test]
    fn projection_is_fitted_then_centered_in_right_half() {
        let globe = two_country_globe();
        assert_eq!(globe.projection().translate(), (900.0, 400.0));
        assert!(globe.projection().scale() > 0.0);
    }

    #[test]
    fn bindings_survive_rotation() {
        let mut globe = two_country_globe();
        globe.pointer_down();
        globe.pointer_move(45.0, -9.0);

        for (i, shape) in scene(&globe).iter().enumerate().take(globe.len()) {
            assert_eq!(shape.kind, ShapeKind::Country(i));
            let expected = GeoPath::new(globe.projection())
                .svg(globe.features().get(i).and_then(|f| f.geometry.as_ref()).expect("geometry"));
            assert_eq!(shape.d, expected);
        }
    }

    #[test]
    fn idle_moves_change_nothing() {
        let mut globe = two_country_globe();
        let before = country_paths(&globe);
        let graticule_before = globe.graticule_path();

        assert!(!globe.pointer_move(30.0, 12.0));
        assert_eq!(globe.rotation(), Rotation::default());
        assert_eq!(country_paths(&globe), before);
        assert_eq!(globe.graticule_path(), graticule_before);
    }

    #[test]
    fn release_stops_rotation() {
        let mut globe = two_country_globe();
        globe.pointer_down();
        assert!(globe.pointer_move(9.0, 3.0));
        globe.pointer_up();
        assert_eq!(globe.drag_phase(), DragPhase::Idle);
        assert!(!globe.pointer_move(9.0, 3.0));
        assert_eq!(globe.rotation(), Rotation { x: 3.0, y: 1.0 });
    }

    #[test]
    fn hover_highlights_exactly_one_country() {
        let mut globe = two_country_globe();
        globe.hover(0);
        globe.hover(1);

        let shapes = scene(&globe);
        let highlighted: Vec<ShapeKind> = shapes
            .iter()
            .filter(|s| s.fill == "#6ea9ff" && s.stroke == "white")
            .map(|s| s.kind)
            .collect();
        assert_eq!(highlighted, vec![ShapeKind::Country(1)]);
        assert_eq!(shapes[0].fill, "#33415c");
        assert_eq!(shapes[0].stroke, "#060a0f");
    }

    #[test]
    fn hover_fills_info_panel_and_keeps_it() {
        let mut globe = two_country_globe();
        assert!(globe.info().is_none());

        let text = globe.hover(0).map(CountryInfo::to_text).expect("in range");
        assert!(text.contains("Republic X"));
        assert!(text.contains("Income Group: High income"));
        assert!(text.contains("Population: 123456"));
        assert!(text.contains("Continent: Asia"));

        assert!(globe.hover(7).is_none());
        assert_eq!(globe.highlighted(), Some(0));
        assert_eq!(globe.info().map(|i| i.name.as_str()), Some("Republic X"));
    }

    #[test]
    fn hover_does_not_touch_geometry() {
        let mut globe = two_country_globe();
        let before = country_paths(&globe);
        globe.hover(1);
        assert_eq!(country_paths(&globe), before);
    }

    const TWO_COUNTRIES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {
                    "formal_en": "Republic X",
                    "continent": "Asia",
                    "income_grp": "High income",
                    "pop_est": 123456
                },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-20, -10], [-20, 5], [-5, 5], [-5, -10], [-20, -10]]]
                }
            },
            {
                "type": "Feature",
                "properties": { "formal_en": "Kingdom Y" },
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [[[[5, 0], [5, 20], [25, 20], [25, 0], [5, 0]]]]
                }
            }
        ]
    }"#;

    #[test]
    fn drag_scenario_rotates_and_redraws() {
        let features = FeatureCollection::from_json(TWO_COUNTRIES).expect("valid geojson");
        let mut globe = GlobeState::new(
            features,
            GlobeLayout::from_viewport(1200.0, 800.0),
            &GlobeConfig::default(),
        );
        assert_eq!(globe.len(), 2);
        let before = country_paths(&globe);
        let graticule_before = globe.graticule_path();
        assert!(before.iter().all(|d| !d.is_empty()));

        globe.pointer_down();
        assert!(globe.pointer_move(30.0, 0.0));

        assert_eq!(globe.rotation(), Rotation { x: 10.0, y: 0.0 });
        assert_eq!(globe.projection().rotation(), [10.0, 0.0]);
        let after = country_paths(&globe);
        assert_ne!(after[0], before[0]);
        assert_ne!(after[1], before[1]);
        assert_ne!(globe.graticule_path(), graticule_before);

        let info = globe.hover(1).map(CountryInfo::to_text).expect("in range");
        assert!(info.starts_with("Kingdom Y\n"), "{info}");
        assert!(info.contains("Continent: undefined"), "{info}");
    }

    #[test]
    fn custom_sensitivity_is_honored() {
        let config = GlobeConfig {
            drag_sensitivity: 6.0,
            ..GlobeConfig::default()
        };
        let mut globe = GlobeState::new(
            FeatureCollection::default(),
            GlobeLayout::from_viewport(800.0, 600.0),
            &config,
        );
        globe.pointer_down();
        globe.pointer_move(30.0, -12.0);
        assert_eq!(globe.rotation(), Rotation { x: 5.0, y: -2.0 });
    }

    #[test]
    fn unusable_sensitivity_falls_back_to_default() {
        for bad in [0.0, -4.0, f64::NAN, f64::INFINITY] {
            let config = GlobeConfig {
                drag_sensitivity: bad,
                ..GlobeConfig::default()
            };
            let mut globe = two_country_globe_with(&config);
            globe.pointer_down();
            assert!(globe.pointer_move(30.0, -12.0));
            assert_eq!(globe.rotation(), Rotation { x: 10.0, y: -4.0 });
            assert!(country_paths(&globe).iter().all(|d| !d.is_empty()));
        }
    }

    fn two_country_globe_with(config: &GlobeConfig) -> GlobeState {
        let features = FeatureCollection::from_json(TWO_COUNTRIES).expect("valid geojson");
        GlobeState::new(features, GlobeLayout::from_viewport(1200.0, 800.0), config)
    }
}

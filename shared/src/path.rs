use std::fmt::Write;

use crate::clip::{clip_line, clip_ring};
use crate::geo::{FeatureCollection, Geometry, Position};
use crate::projection::{Orthographic, Vec3};

/// Radius of the circle drawn for point geometries.
pub const POINT_RADIUS: f64 = 4.5;

/// Receiver of projected drawing commands.
pub trait PathSink {
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn close_path(&mut self);
    fn point(&mut self, x: f64, y: f64);
}

/// Round to 3 decimals; `-0` prints as `0`.
fn push_coord(buf: &mut String, v: f64) {
    let rounded = (v * 1000.0).round() / 1000.0 + 0.0;
    let _ = write!(buf, "{rounded}");
}

/// Builds an SVG path `d` attribute.
#[derive(Debug)]
pub struct SvgPathWriter {
    buf: String,
    point_radius: f64,
}

impl SvgPathWriter {
    pub fn new(point_radius: f64) -> Self {
        Self {
            buf: String::new(),
            point_radius,
        }
    }

    pub fn finish(self) -> String {
        self.buf
    }

    fn push_xy(&mut self, cmd: char, x: f64, y: f64) {
        self.buf.push(cmd);
        push_coord(&mut self.buf, x);
        self.buf.push(',');
        push_coord(&mut self.buf, y);
    }
}

impl PathSink for SvgPathWriter {
    fn move_to(&mut self, x: f64, y: f64) {
        self.push_xy('M', x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.push_xy('L', x, y);
    }

    fn close_path(&mut self) {
        self.buf.push('Z');
    }

    fn point(&mut self, x: f64, y: f64) {
        self.push_xy('M', x, y);
        let r = self.point_radius;
        let _ = write!(
            self.buf,
            "m0,{r}a{r},{r} 0 1,1 0,{}a{r},{r} 0 1,1 0,{}z",
            -2.0 * r,
            2.0 * r
        );
    }
}

/// Accumulates the bounding box of every emitted coordinate.
#[derive(Debug, Default)]
pub struct BoundsSink {
    bounds: Option<[(f64, f64); 2]>,
}

impl BoundsSink {
    fn extend(&mut self, x: f64, y: f64) {
        let b = self.bounds.get_or_insert([(x, y), (x, y)]);
        b[0].0 = b[0].0.min(x);
        b[0].1 = b[0].1.min(y);
        b[1].0 = b[1].0.max(x);
        b[1].1 = b[1].1.max(y);
    }

    /// `[(x0, y0), (x1, y1)]`, or `None` when nothing was drawn.
    pub fn finish(self) -> Option<[(f64, f64); 2]> {
        self.bounds
    }
}

impl PathSink for BoundsSink {
    fn move_to(&mut self, x: f64, y: f64) {
        self.extend(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.extend(x, y);
    }

    fn close_path(&mut self) {}

    fn point(&mut self, x: f64, y: f64) {
        self.extend(x, y);
    }
}

/// Path generator bound to a projection. Reads the projection's live rotation
/// on every call; nothing is cached between calls.
pub struct GeoPath<'a> {
    projection: &'a Orthographic,
    point_radius: f64,
}

impl<'a> GeoPath<'a> {
    pub fn new(projection: &'a Orthographic) -> Self {
        Self {
            projection,
            point_radius: POINT_RADIUS,
        }
    }

    /// SVG path data for a geometry; empty when it is entirely on the far side.
    pub fn svg(&self, geometry: &Geometry) -> String {
        let mut writer = SvgPathWriter::new(self.point_radius);
        self.stream(geometry, &mut writer);
        writer.finish()
    }

    pub fn bounds(&self, geometry: &Geometry) -> Option<[(f64, f64); 2]> {
        let mut sink = BoundsSink::default();
        self.stream(geometry, &mut sink);
        sink.finish()
    }

    pub fn collection_bounds(&self, collection: &FeatureCollection) -> Option<[(f64, f64); 2]> {
        let mut sink = BoundsSink::default();
        for geometry in collection.features.iter().filter_map(|f| f.geometry.as_ref()) {
            self.stream(geometry, &mut sink);
        }
        sink.finish()
    }

    /// Project, clip and emit a geometry into `sink`.
    pub fn stream(&self, geometry: &Geometry, sink: &mut impl PathSink) {
        match geometry {
            Geometry::Point { coordinates } => self.stream_point(*coordinates, sink),
            Geometry::MultiPoint { coordinates } => {
                for p in coordinates {
                    self.stream_point(*p, sink);
                }
            }
            Geometry::LineString { coordinates } => self.stream_line(coordinates, sink),
            Geometry::MultiLineString { coordinates } => {
                for line in coordinates {
                    self.stream_line(line, sink);
                }
            }
            Geometry::Polygon { coordinates } => self.stream_polygon(coordinates, sink),
            Geometry::MultiPolygon { coordinates } => {
                for polygon in coordinates {
                    self.stream_polygon(polygon, sink);
                }
            }
            Geometry::GeometryCollection { geometries } => {
                for g in geometries {
                    self.stream(g, sink);
                }
            }
        }
    }

    fn stream_point(&self, p: Position, sink: &mut impl PathSink) {
        if let Some((x, y)) = self.projection.project(p) {
            sink.point(x, y);
        }
    }

    fn rotate_all(&self, positions: &[Position]) -> Vec<Vec3> {
        positions.iter().map(|&p| self.projection.rotate(p)).collect()
    }

    fn stream_line(&self, line: &[Position], sink: &mut impl PathSink) {
        for run in clip_line(&self.rotate_all(line)) {
            self.emit_run(&run, sink);
        }
    }

    fn stream_polygon(&self, rings: &[Vec<Position>], sink: &mut impl PathSink) {
        for ring in rings {
            let open = match ring.as_slice() {
                [first, .., last] if first == last => &ring[..ring.len() - 1],
                _ => ring.as_slice(),
            };
            if open.is_empty() {
                continue;
            }
            for clipped in clip_ring(&self.rotate_all(open)) {
                self.emit_run(&clipped, sink);
                sink.close_path();
            }
        }
    }

    fn emit_run(&self, run: &[Vec3], sink: &mut impl PathSink) {
        let mut points = run.iter().map(|&v| self.projection.to_screen(v));
        let Some((x, y)) = points.next() else {
            return;
        };
        sink.move_to(x, y);
        for (x, y) in points {
            sink.line_to(x, y);
        }
    }
}

//! Clipping of rotated geometry to the hemisphere facing the viewer.
//!
//! Everything here works on view-space unit vectors (see [`Vec3`]); the horizon
//! is the great circle `x == 0`.

use std::f64::consts::{PI, TAU};

use crate::projection::Vec3;

/// Angular step used when closing a clipped ring along the horizon.
const HORIZON_STEP: f64 = 6.0 * PI / 180.0;

/// Point where the great arc from `a` to `b` crosses the horizon.
/// Expects `a` and `b` on opposite sides.
fn horizon_crossing(a: Vec3, b: Vec3) -> Vec3 {
    let crossing = a.scaled(b.x.abs()).plus(b.scaled(a.x.abs()));
    let (y, z) = (crossing.y, crossing.z);
    let len = (y * y + z * z).sqrt();
    if len == 0.0 {
        return Vec3::new(0.0, a.y, a.z);
    }
    Vec3::new(0.0, y / len, z / len)
}

fn horizon_angle(v: Vec3) -> f64 {
    v.z.atan2(v.y)
}

/// Append the interior points of the horizon arc that leaves `from` and turns
/// through `delta` radians (negative is clockwise).
fn push_horizon_arc(from: Vec3, delta: f64, out: &mut Vec<Vec3>) {
    let start = horizon_angle(from);
    let steps = (delta.abs() / HORIZON_STEP).ceil() as usize;
    for i in 1..steps {
        let t = start + delta * i as f64 / steps as f64;
        let (sin, cos) = t.sin_cos();
        out.push(Vec3::new(0.0, cos, sin));
    }
}

/// Split a polyline into its visible runs. Runs shorter than two points are dropped.
pub fn clip_line(line: &[Vec3]) -> Vec<Vec<Vec3>> {
    let mut runs = Vec::new();
    let mut run: Vec<Vec3> = Vec::new();
    let mut prev: Option<Vec3> = None;

    for &v in line {
        match prev {
            None if v.is_visible() => run.push(v),
            None => {}
            Some(p) => match (p.is_visible(), v.is_visible()) {
                (true, true) => run.push(v),
                (true, false) => {
                    run.push(horizon_crossing(p, v));
                    if run.len() > 1 {
                        runs.push(std::mem::take(&mut run));
                    } else {
                        run.clear();
                    }
                }
                (false, true) => {
                    run.push(horizon_crossing(p, v));
                    run.push(v);
                }
                (false, false) => {}
            },
        }
        prev = Some(v);
    }

    if run.len() > 1 {
        runs.push(run);
    }
    runs
}

/// Clip an open ring (no repeated closing vertex) to the visible hemisphere.
///
/// Rings wind clockwise around their interior. A ring with no vertex on the
/// horizon's far side passes through unchanged and a ring with no visible
/// vertex is dropped. Otherwise the ring is cut into visible runs, each
/// running from an entry crossing to an exit crossing, and every exit is joined
/// clockwise along the horizon to the nearest entry. The result may hold several
/// closed rings.
pub fn clip_ring(ring: &[Vec3]) -> Vec<Vec<Vec3>> {
    let Some(start) = ring.iter().position(|v| v.is_visible()) else {
        return Vec::new();
    };
    if ring.iter().all(|v| v.is_visible()) {
        return vec![ring.to_vec()];
    }

    let n = ring.len();
    let mut runs: Vec<Vec<Vec3>> = Vec::new();
    let mut current = vec![ring[start]];

    for step in 0..n {
        let a = ring[(start + step) % n];
        let b = ring[(start + step + 1) % n];
        match (a.is_visible(), b.is_visible()) {
            (true, true) => current.push(b),
            (true, false) => {
                current.push(horizon_crossing(a, b));
                runs.push(std::mem::take(&mut current));
            }
            (false, true) => {
                current.push(horizon_crossing(a, b));
                current.push(b);
            }
            (false, false) => {}
        }
    }

    // The walk ends back on the start vertex, which already opens the first run.
    current.pop();
    if let Some(first) = runs.first_mut() {
        current.append(first);
        *first = current;
    }

    join_runs(&runs)
}

/// For every run, the run whose entry is reached first when turning clockwise
/// from its exit, together with the signed turn.
fn link_runs(runs: &[Vec<Vec3>]) -> Vec<Option<(usize, f64)>> {
    runs.iter()
        .map(|run| {
            let exit = horizon_angle(*run.last()?);
            runs.iter()
                .enumerate()
                .filter_map(|(j, other)| {
                    let entry = horizon_angle(*other.first()?);
                    Some((j, (exit - entry).rem_euclid(TAU)))
                })
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(j, turn)| (j, -turn))
        })
        .collect()
}

fn join_runs(runs: &[Vec<Vec3>]) -> Vec<Vec<Vec3>> {
    let links = link_runs(runs);
    let mut visited = vec![false; runs.len()];
    let mut rings = Vec::new();

    for first in 0..runs.len() {
        let mut ring = Vec::new();
        let mut i = first;
        while !visited[i] {
            visited[i] = true;
            ring.extend_from_slice(&runs[i]);
            let (Some(&exit), Some((next, turn))) = (runs[i].last(), links[i]) else {
                break;
            };
            push_horizon_arc(exit, turn, &mut ring);
            i = next;
        }
        if ring.len() > 2 {
            rings.push(ring);
        }
    }
    rings
}

//! Point-in-polygon containment by longitudinal ray casting.

use crate::bbox::bbox_from_geofence;
use crate::constants::M_2PI;
use crate::types::{BBox, GeoCoord, GeoPolygon, Geofence};

/// Shift a longitude east of the antimeridian into a continuous range when
/// the loop is transmeridian.
#[inline]
fn normalize_lng(lng: f64, is_transmeridian: bool) -> f64 {
  if is_transmeridian && lng < 0.0 {
    lng + M_2PI
  } else {
    lng
  }
}

/// Whether a geofence loop contains the point, by casting a westward ray
/// and counting edge crossings. `bbox` must be the loop's bounding box.
#[must_use]
pub(crate) fn point_inside_geofence(geofence: &Geofence, bbox: &BBox, coord: &GeoCoord) -> bool {
  if !bbox.contains(coord) {
    return false;
  }

  let is_transmeridian = bbox.is_transmeridian();
  let mut contains = false;

  let lat = coord.lat;
  let mut lng = normalize_lng(coord.lon, is_transmeridian);

  let n = geofence.verts.len();
  for i in 0..n {
    let mut a = geofence.verts[i];
    let mut b = geofence.verts[(i + 1) % n];

    // Orient each edge south to north so the crossing test is uniform.
    if a.lat > b.lat {
      std::mem::swap(&mut a, &mut b);
    }

    // A ray at this latitude cannot meet the segment.
    if lat < a.lat || lat > b.lat {
      continue;
    }

    let a_lng = normalize_lng(a.lon, is_transmeridian);
    let b_lng = normalize_lng(b.lon, is_transmeridian);

    // Point exactly on an endpoint longitude: bias the ray westerly to
    // break the tie deterministically.
    if a_lng == lng || b_lng == lng {
      lng -= f64::EPSILON;
    }

    // Longitude of the segment at the ray's latitude.
    let ratio = (lat - a.lat) / (b.lat - a.lat);
    let test_lng = normalize_lng(a_lng + (b_lng - a_lng) * ratio, is_transmeridian);

    if test_lng > lng {
      contains = !contains;
    }
  }

  contains
}

/// Whether a polygon (outer loop minus holes) contains the point.
#[must_use]
pub fn point_inside_polygon(polygon: &GeoPolygon, coord: &GeoCoord) -> bool {
  let outer_bbox = bbox_from_geofence(&polygon.geofence);
  if !point_inside_geofence(&polygon.geofence, &outer_bbox, coord) {
    return false;
  }

  for hole in &polygon.holes {
    let hole_bbox = bbox_from_geofence(hole);
    if point_inside_geofence(hole, &hole_bbox, coord) {
      return false;
    }
  }

  true
}

#[cfg(test)]
mod tests {
  use std::f64::consts::PI;

  use super::*;

  fn square() -> Geofence {
    Geofence::new(vec![
      GeoCoord::new(0.1, 0.1),
      GeoCoord::new(0.1, 0.3),
      GeoCoord::new(0.3, 0.3),
      GeoCoord::new(0.3, 0.1),
    ])
  }

  #[test]
  fn contains_interior_not_exterior() {
    let fence = square();
    let bbox = bbox_from_geofence(&fence);
    assert!(point_inside_geofence(&fence, &bbox, &GeoCoord::new(0.2, 0.2)));
    assert!(!point_inside_geofence(&fence, &bbox, &GeoCoord::new(0.4, 0.2)));
    assert!(!point_inside_geofence(&fence, &bbox, &GeoCoord::new(0.2, 0.4)));
  }

  #[test]
  fn holes_are_excluded() {
    let polygon = GeoPolygon {
      geofence: square(),
      holes: vec![Geofence::new(vec![
        GeoCoord::new(0.15, 0.15),
        GeoCoord::new(0.15, 0.25),
        GeoCoord::new(0.25, 0.25),
        GeoCoord::new(0.25, 0.15),
      ])],
    };
    assert!(point_inside_polygon(&polygon, &GeoCoord::new(0.12, 0.12)));
    assert!(!point_inside_polygon(&polygon, &GeoCoord::new(0.2, 0.2)));
  }

  #[test]
  fn transmeridian_fence_contains_wrapped_points() {
    let fence = Geofence::new(vec![
      GeoCoord::new(0.4, PI - 0.1),
      GeoCoord::new(0.4, -PI + 0.1),
      GeoCoord::new(-0.4, -PI + 0.1),
      GeoCoord::new(-0.4, PI - 0.1),
    ]);
    let bbox = bbox_from_geofence(&fence);
    assert!(point_inside_geofence(&fence, &bbox, &GeoCoord::new(0.0, PI)));
    assert!(point_inside_geofence(&fence, &bbox, &GeoCoord::new(0.0, -PI + 0.05)));
    assert!(!point_inside_geofence(&fence, &bbox, &GeoCoord::new(0.0, 0.0)));
  }

}

//! Fill a polygon with the cells whose centers it contains.
//!
//! The sweep covers the polygon's bounding box with a k-ring around its
//! center cell, then keeps the cells whose centers pass the ray-cast
//! containment test. Uniquely assigns cells between adjacent polygons with
//! zero overlap.

use crate::bbox::{bbox_from_geofence, bbox_hex_radius};
use crate::geo::{constrain_lat, constrain_lng};
use crate::indexing::{geo_to_h3, h3_to_geo};
use crate::polygon::point_inside_polygon;
use crate::traversal::{k_ring, max_kring_size};
use crate::types::{GeoPolygon, H3Error, H3Index, H3_NULL};

/// Upper bound on the number of cells `polyfill` can emit for the polygon
/// at the given resolution.
pub fn max_polyfill_size(polygon: &GeoPolygon, res: i32) -> Result<usize, H3Error> {
  let bbox = bbox_from_geofence(&polygon.geofence);
  let radius = bbox_hex_radius(&bbox, res)?;
  Ok(max_kring_size(radius))
}

/// Write every cell at resolution `res` whose center lies inside the
/// polygon. The output slice must hold `max_polyfill_size` entries; unused
/// slots are `H3_NULL`. Returns the number of cells written.
pub fn polyfill(polygon: &GeoPolygon, res: i32, out: &mut [H3Index]) -> Result<usize, H3Error> {
  let bbox = bbox_from_geofence(&polygon.geofence);
  let radius = bbox_hex_radius(&bbox, res)?;
  let size = max_kring_size(radius);
  if out.len() < size {
    return Err(H3Error::MemoryBounds);
  }

  let center_cell = geo_to_h3(&bbox.center(), res)?;
  let mut candidates = vec![H3_NULL; size];
  k_ring(center_cell, radius, &mut candidates)?;

  out[..size].fill(H3_NULL);
  let mut written = 0;
  for &cell in candidates.iter().filter(|&&c| c != H3_NULL) {
    let mut center = h3_to_geo(cell)?;
    center.lat = constrain_lat(center.lat);
    center.lon = constrain_lng(center.lon);
    if point_inside_polygon(polygon, &center) {
      out[written] = cell;
      written += 1;
    }
  }

  Ok(written)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::geo::degs_to_rads;
  use crate::types::{GeoCoord, Geofence};

  fn sf_polygon() -> GeoPolygon {
    // Roughly downtown San Francisco.
    let verts = [
      (37.813_318_999_983_238, -122.409_290_778_795_61),
      (37.787_559_461_038_4, -122.392_738_151_944_86),
      (37.772_909_000_010_96, -122.402_601_790_744_17),
      (37.770_715_082_133_51, -122.424_984_608_380_56),
      (37.773_569_994_967_84, -122.440_827_616_975_71),
      (37.786_443_186_828_04, -122.441_065_050_029_4),
      (37.805_056_523_913_45, -122.432_837_941_840_44),
    ];
    GeoPolygon {
      geofence: Geofence::new(
        verts
          .iter()
          .map(|&(lat, lon)| GeoCoord::new(degs_to_rads(lat), degs_to_rads(lon)))
          .collect(),
      ),
      holes: Vec::new(),
    }
  }

  #[test]
  fn fills_known_polygon() {
    let polygon = sf_polygon();
    let size = max_polyfill_size(&polygon, 9).unwrap();
    let mut out = vec![H3_NULL; size];
    let n = polyfill(&polygon, 9, &mut out).unwrap();

    assert!(n > 0);
    assert!(n <= size);
    for &cell in &out[..n] {
      assert!(cell.is_valid());
      assert_eq!(cell.resolution(), 9);
      let center = h3_to_geo(cell).unwrap();
      assert!(point_inside_polygon(&polygon, &center));
    }
    // No duplicates.
    let mut sorted = out[..n].to_vec();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), n);
  }

  #[test]
  fn coarser_resolution_yields_fewer_cells() {
    let polygon = sf_polygon();
    let mut coarse = vec![H3_NULL; max_polyfill_size(&polygon, 8).unwrap()];
    let mut fine = vec![H3_NULL; max_polyfill_size(&polygon, 10).unwrap()];
    let n_coarse = polyfill(&polygon, 8, &mut coarse).unwrap();
    let n_fine = polyfill(&polygon, 10, &mut fine).unwrap();
    assert!(n_fine > n_coarse * 10, "aperture 7 squared between res 8 and 10");
  }

  #[test]
  fn hole_cells_are_excluded() {
    let mut polygon = sf_polygon();
    // Use the polygon's own bbox center region as a hole.
    let hole = [
      (37.787, -122.434),
      (37.779, -122.434),
      (37.779, -122.417),
      (37.787, -122.417),
    ];
    polygon.holes.push(Geofence::new(
      hole
        .iter()
        .map(|&(lat, lon)| GeoCoord::new(degs_to_rads(lat), degs_to_rads(lon)))
        .collect(),
    ));

    let size = max_polyfill_size(&polygon, 9).unwrap();
    let mut with_hole = vec![H3_NULL; size];
    let n_hole = polyfill(&polygon, 9, &mut with_hole).unwrap();

    let plain = sf_polygon();
    let mut without_hole = vec![H3_NULL; size];
    let n_plain = polyfill(&plain, 9, &mut without_hole).unwrap();

    assert!(n_hole < n_plain);
  }
}

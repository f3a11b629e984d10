//! Geographic bounding boxes over geofences, with antimeridian support.

use std::f64::consts::PI;

use crate::constants::M_2PI;
use crate::geo::constrain_lng;
use crate::indexing::{geo_to_h3, h3_to_geo, h3_to_geo_boundary};
use crate::types::{BBox, GeoCoord, Geofence, H3Error};

impl BBox {
  /// Whether the box spans the antimeridian.
  #[must_use]
  pub fn is_transmeridian(&self) -> bool {
    self.east < self.west
  }

  /// Center of the box, longitude normalized into [-pi, pi].
  #[must_use]
  pub fn center(&self) -> GeoCoord {
    let east = if self.is_transmeridian() { self.east + M_2PI } else { self.east };
    GeoCoord {
      lat: (self.north + self.south) / 2.0,
      lon: constrain_lng((east + self.west) / 2.0),
    }
  }

  /// Whether the box contains the point.
  #[must_use]
  pub fn contains(&self, point: &GeoCoord) -> bool {
    point.lat >= self.south
      && point.lat <= self.north
      && if self.is_transmeridian() {
        point.lon >= self.west || point.lon <= self.east
      } else {
        point.lon >= self.west && point.lon <= self.east
      }
  }
}

/// Bounding box of a geofence. An edge spanning more than half the globe
/// in longitude flags the fence as transmeridian, swapping east and west
/// to the extreme same-signed longitudes.
#[must_use]
pub fn bbox_from_geofence(geofence: &Geofence) -> BBox {
  if geofence.verts.is_empty() {
    return BBox::default();
  }

  let mut bbox = BBox {
    south: f64::MAX,
    west: f64::MAX,
    north: -f64::MAX,
    east: -f64::MAX,
  };
  let mut min_pos_lon = f64::MAX;
  let mut max_neg_lon = -f64::MAX;
  let mut is_transmeridian = false;

  for (i, coord) in geofence.verts.iter().enumerate() {
    let next = &geofence.verts[(i + 1) % geofence.verts.len()];

    bbox.south = bbox.south.min(coord.lat);
    bbox.west = bbox.west.min(coord.lon);
    bbox.north = bbox.north.max(coord.lat);
    bbox.east = bbox.east.max(coord.lon);

    if coord.lon > 0.0 && coord.lon < min_pos_lon {
      min_pos_lon = coord.lon;
    }
    if coord.lon < 0.0 && coord.lon > max_neg_lon {
      max_neg_lon = coord.lon;
    }

    // An arc longer than half the globe can only be a wraparound.
    if (coord.lon - next.lon).abs() > PI {
      is_transmeridian = true;
    }
  }

  if is_transmeridian {
    bbox.east = max_neg_lon;
    bbox.west = min_pos_lon;
  }

  bbox
}

/// Radius in grid cells needed for a k-ring from the box center to cover
/// the whole box at the given resolution.
pub fn bbox_hex_radius(bbox: &BBox, res: i32) -> Result<i32, H3Error> {
  let center = bbox.center();

  // The corner on the side closest to the equator maximizes the great
  // circle distance within the box.
  let origin = GeoCoord {
    lat: if bbox.north < 0.0 { bbox.north } else { bbox.south },
    lon: bbox.east,
  };
  let bbox_radius_km = origin.dist_km(&center);

  // Cell radius at the box center, from its own boundary.
  let center_cell = geo_to_h3(&center, res)?;
  let cell_center = h3_to_geo(center_cell)?;
  let boundary = h3_to_geo_boundary(center_cell)?;
  let cell_radius_km = cell_center.dist_km(&boundary.verts[0]);

  // The tightest ring of cell centers covering a disc sits at 1.5 cell
  // radii per ring step.
  Ok((bbox_radius_km / (1.5 * cell_radius_km)).ceil() as i32)
}

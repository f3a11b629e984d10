//! Angular and great-circle primitives on the unit sphere.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::constants::{EARTH_RADIUS_KM, EPSILON, EPSILON_RAD, M_2PI};
use crate::types::{GeoCoord, Vec3d};

/// Convert degrees to radians.
#[inline]
#[must_use]
pub fn degs_to_rads(degrees: f64) -> f64 {
  degrees * PI / 180.0
}

/// Convert radians to degrees.
#[inline]
#[must_use]
pub fn rads_to_degs(radians: f64) -> f64 {
  radians * 180.0 / PI
}

/// Normalize an angle into [0, 2pi).
#[inline]
#[must_use]
pub(crate) fn pos_angle_rads(rads: f64) -> f64 {
  let tmp = if rads < 0.0 { rads + M_2PI } else { rads };
  if rads >= M_2PI {
    tmp - M_2PI
  } else {
    tmp
  }
}

/// Constrain a latitude to [-pi/2, pi/2].
#[inline]
#[must_use]
pub(crate) fn constrain_lat(mut lat: f64) -> f64 {
  while lat > FRAC_PI_2 {
    lat -= PI;
  }
  lat
}

/// Constrain a longitude to [-pi, pi].
#[inline]
#[must_use]
pub(crate) fn constrain_lng(mut lng: f64) -> f64 {
  while lng > PI {
    lng -= M_2PI;
  }
  while lng < -PI {
    lng += M_2PI;
  }
  lng
}

impl GeoCoord {
  /// Construct from radians.
  #[must_use]
  pub const fn new(lat: f64, lon: f64) -> Self {
    Self { lat, lon }
  }

  /// Construct from degrees.
  #[must_use]
  pub fn from_degrees(lat: f64, lon: f64) -> Self {
    Self {
      lat: degs_to_rads(lat),
      lon: degs_to_rads(lon),
    }
  }

  /// Whether both coordinates are within `threshold` radians.
  #[must_use]
  pub fn almost_equal_threshold(&self, other: &GeoCoord, threshold: f64) -> bool {
    (self.lat - other.lat).abs() < threshold && (self.lon - other.lon).abs() < threshold
  }

  /// Whether both coordinates are within the standard epsilon.
  #[must_use]
  pub fn almost_equal(&self, other: &GeoCoord) -> bool {
    self.almost_equal_threshold(other, EPSILON_RAD)
  }

  /// Great-circle distance to `other`, in radians, by the haversine formula.
  #[must_use]
  pub fn dist_rads(&self, other: &GeoCoord) -> f64 {
    let sin_lat = ((other.lat - self.lat) / 2.0).sin();
    let sin_lng = ((other.lon - self.lon) / 2.0).sin();
    let a = sin_lat * sin_lat + self.lat.cos() * other.lat.cos() * sin_lng * sin_lng;
    2.0 * a.sqrt().atan2((1.0 - a).sqrt())
  }

  /// Great-circle distance to `other` in kilometers.
  #[must_use]
  pub fn dist_km(&self, other: &GeoCoord) -> f64 {
    self.dist_rads(other) * EARTH_RADIUS_KM
  }

  /// Great-circle distance to `other` in meters.
  #[must_use]
  pub fn dist_m(&self, other: &GeoCoord) -> f64 {
    self.dist_km(other) * 1000.0
  }

  /// Azimuth from this point to `other`, in radians from due north.
  #[must_use]
  pub(crate) fn azimuth_rads(&self, other: &GeoCoord) -> f64 {
    (other.lat.cos() * (other.lon - self.lon).sin()).atan2(
      self.lat.cos() * other.lat.sin() - self.lat.sin() * other.lat.cos() * (other.lon - self.lon).cos(),
    )
  }

  /// The point at the given azimuth and great-circle distance from this
  /// point. Distances under epsilon return the point itself; results that
  /// land on a pole pin the longitude to 0.
  #[must_use]
  pub(crate) fn at_az_distance_rads(&self, az: f64, distance: f64) -> GeoCoord {
    if distance < EPSILON {
      return *self;
    }

    let az = pos_angle_rads(az);
    let mut out = GeoCoord::default();

    if az < EPSILON || (az - PI).abs() < EPSILON {
      // Due north or south; the longitude does not change.
      out.lat = if az < EPSILON {
        self.lat + distance
      } else {
        self.lat - distance
      };
      if (out.lat - FRAC_PI_2).abs() < EPSILON {
        out.lat = FRAC_PI_2;
        out.lon = 0.0;
      } else if (out.lat + FRAC_PI_2).abs() < EPSILON {
        out.lat = -FRAC_PI_2;
        out.lon = 0.0;
      } else {
        out.lon = constrain_lng(self.lon);
      }
    } else {
      let sinlat =
        (self.lat.sin() * distance.cos() + self.lat.cos() * distance.sin() * az.cos()).clamp(-1.0, 1.0);
      out.lat = sinlat.asin();
      if (out.lat - FRAC_PI_2).abs() < EPSILON {
        out.lat = FRAC_PI_2;
        out.lon = 0.0;
      } else if (out.lat + FRAC_PI_2).abs() < EPSILON {
        out.lat = -FRAC_PI_2;
        out.lon = 0.0;
      } else {
        let sinlon = (az.sin() * distance.sin() / out.lat.cos()).clamp(-1.0, 1.0);
        let coslon =
          ((distance.cos() - self.lat.sin() * out.lat.sin()) / self.lat.cos() / out.lat.cos()).clamp(-1.0, 1.0);
        out.lon = constrain_lng(self.lon + sinlon.atan2(coslon));
      }
    }
    out
  }

  /// Project onto the unit sphere.
  #[must_use]
  pub(crate) fn to_vec3d(&self) -> Vec3d {
    let r = self.lat.cos();
    Vec3d {
      x: self.lon.cos() * r,
      y: self.lon.sin() * r,
      z: self.lat.sin(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use approx::assert_relative_eq;

  #[test]
  fn pos_angle_wraps() {
    assert_relative_eq!(pos_angle_rads(-PI), PI);
    assert_relative_eq!(pos_angle_rads(M_2PI), 0.0);
    assert_relative_eq!(pos_angle_rads(0.5), 0.5);
  }

  #[test]
  fn constrain_lng_wraps_antimeridian() {
    assert_relative_eq!(constrain_lng(PI + 0.1), -PI + 0.1, epsilon = 1e-12);
    assert_relative_eq!(constrain_lng(-PI - 0.1), PI - 0.1, epsilon = 1e-12);
    assert_relative_eq!(constrain_lng(0.3), 0.3);
  }

  #[test]
  fn haversine_quarter_circle() {
    let equator = GeoCoord::new(0.0, 0.0);
    let pole = GeoCoord::new(FRAC_PI_2, 0.0);
    assert_relative_eq!(equator.dist_rads(&pole), FRAC_PI_2, epsilon = 1e-12);
  }

  #[test]
  fn azimuth_due_east_at_equator() {
    let origin = GeoCoord::new(0.0, 0.0);
    let east = GeoCoord::new(0.0, 0.01);
    assert_relative_eq!(origin.azimuth_rads(&east), FRAC_PI_2, epsilon = 1e-9);
  }

  #[test]
  fn az_distance_round_trip() {
    let origin = GeoCoord::from_degrees(37.779, -122.419);
    let dest = origin.at_az_distance_rads(1.0, 0.25);
    assert_relative_eq!(origin.dist_rads(&dest), 0.25, epsilon = 1e-9);
    assert_relative_eq!(pos_angle_rads(origin.azimuth_rads(&dest)), 1.0, epsilon = 1e-9);
  }

  #[test]
  fn az_distance_due_north_hits_pole() {
    let origin = GeoCoord::new(FRAC_PI_2 - 0.25, 1.5);
    let dest = origin.at_az_distance_rads(0.0, 0.25);
    assert_relative_eq!(dest.lat, FRAC_PI_2);
    assert_relative_eq!(dest.lon, 0.0);
  }

  #[test]
  fn vec3d_is_unit_length() {
    let g = GeoCoord::from_degrees(48.8, 2.35);
    let v = g.to_vec3d();
    assert_relative_eq!(v.x * v.x + v.y * v.y + v.z * v.z, 1.0, epsilon = 1e-12);
  }
}

//! Core value types shared across the crate.
//!
//! Every type here is a plain value; the library holds no state beyond the
//! static tables in `base_cells` and `face_ijk`.

use crate::constants::MAX_CELL_BNDRY_VERTS;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "serde")]
use serde_repr::{Deserialize_repr, Serialize_repr};
use thiserror::Error;

/// A 64-bit grid index: a cell, a directed edge, or a canonical vertex,
/// depending on the mode bits. See the `index` module for the bit layout.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct H3Index(pub u64);

/// The null index. Returned in unused slots of bulk outputs.
pub const H3_NULL: H3Index = H3Index(0);

/// Latitude/longitude pair in radians.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeoCoord {
  /// Latitude in radians.
  pub lat: f64,
  /// Longitude in radians.
  pub lon: f64,
}

/// The vertex loop of a cell boundary, counter-clockwise.
///
/// Class III cells may pick up distortion vertices where an edge crosses an
/// icosahedron edge, so the worst case is ten vertices (pentagon with five
/// crossings). Slots past `num_verts` are not significant.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeoBoundary {
  /// Number of valid vertices.
  pub num_verts: usize,
  /// Vertices in counter-clockwise order.
  pub verts: [GeoCoord; MAX_CELL_BNDRY_VERTS],
}

/// A closed loop of geographic vertices. The last vertex connects back to
/// the first implicitly.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Geofence {
  /// Loop vertices in order.
  pub verts: Vec<GeoCoord>,
}

impl Geofence {
  #[must_use]
  pub fn new(verts: Vec<GeoCoord>) -> Self {
    Self { verts }
  }

  #[must_use]
  pub fn num_verts(&self) -> usize {
    self.verts.len()
  }
}

/// A polygon: one outer geofence plus zero or more hole loops.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeoPolygon {
  /// The outer loop.
  pub geofence: Geofence,
  /// Hole loops.
  pub holes: Vec<Geofence>,
}

/// Geographic bounding box in radians. A box with `east < west` spans the
/// antimeridian.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BBox {
  pub north: f64,
  pub south: f64,
  pub east: f64,
  pub west: f64,
}

/// Two-axis hex coordinates relative to an anchoring origin cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoordIJ {
  pub i: i32,
  pub j: i32,
}

/// Three-axis hex-lattice coordinates, axes spaced 120 degrees apart.
///
/// The normalized form has at least one zero component and the other two
/// non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoordIJK {
  pub i: i32,
  pub j: i32,
  pub k: i32,
}

/// A cell located on a specific icosahedron face: face number 0..19 plus an
/// IJK offset in that face's face-centered coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FaceIJK {
  /// Icosahedron face number (0..19).
  pub face: i32,
  /// IJK offset on that face.
  pub coord: CoordIJK,
}

/// 2D Cartesian vector, used for the in-face gnomonic plane.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec2d {
  pub x: f64,
  pub y: f64,
}

/// 3D Cartesian vector on the unit sphere.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec3d {
  pub x: f64,
  pub y: f64,
  pub z: f64,
}

/// A digit of the index path: the center or one of the six IJK+ axis
/// directions. `InvalidDigit` (7) doubles as the fill value for unused
/// digit positions in an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Hash, Default)]
#[repr(u8)]
#[cfg_attr(feature = "serde", derive(Serialize_repr, Deserialize_repr))]
pub enum Direction {
  /// No movement; the center digit.
  #[default]
  Center = 0,
  /// K axis. Deleted beneath pentagons.
  KAxes = 1,
  /// J axis.
  JAxes = 2,
  /// J+K direction.
  JkAxes = 3,
  /// I axis.
  IAxes = 4,
  /// I+K direction.
  IkAxes = 5,
  /// I+J direction.
  IjAxes = 6,
  /// Out-of-alphabet marker; fills digit positions finer than the index
  /// resolution.
  InvalidDigit = 7,
}

impl Direction {
  /// The six traversable axis directions, counter-clockwise starting from J.
  /// The ring-walking traversal algorithms rely on this ordering.
  pub const AXES_CCW: [Direction; 6] = [
    Direction::JAxes,
    Direction::JkAxes,
    Direction::KAxes,
    Direction::IkAxes,
    Direction::IAxes,
    Direction::IjAxes,
  ];

  /// Rotate the digit 60 degrees counter-clockwise.
  /// Center and invalid digits are fixed points.
  #[inline]
  #[must_use]
  pub const fn rotate60_ccw(self) -> Self {
    match self {
      Direction::KAxes => Direction::IkAxes,
      Direction::IkAxes => Direction::IAxes,
      Direction::IAxes => Direction::IjAxes,
      Direction::IjAxes => Direction::JAxes,
      Direction::JAxes => Direction::JkAxes,
      Direction::JkAxes => Direction::KAxes,
      other => other,
    }
  }

  /// Rotate the digit 60 degrees clockwise.
  #[inline]
  #[must_use]
  pub const fn rotate60_cw(self) -> Self {
    match self {
      Direction::KAxes => Direction::JkAxes,
      Direction::JkAxes => Direction::JAxes,
      Direction::JAxes => Direction::IjAxes,
      Direction::IjAxes => Direction::IAxes,
      Direction::IAxes => Direction::IkAxes,
      Direction::IkAxes => Direction::KAxes,
      other => other,
    }
  }

  /// Reinterpret a raw 3-bit value as a digit. The caller must have masked
  /// the value into 0..=7.
  #[inline]
  #[must_use]
  pub(crate) const fn from_bits(bits: u8) -> Self {
    debug_assert!(bits <= 7);
    // SAFETY: Direction is repr(u8) with contiguous discriminants 0..=7.
    unsafe { std::mem::transmute(bits) }
  }
}

impl TryFrom<u8> for Direction {
  type Error = H3Error;

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    if value <= 7 {
      Ok(Direction::from_bits(value))
    } else {
      Err(H3Error::Domain)
    }
  }
}

/// Error conditions surfaced by the library.
///
/// Local-IJ operations report pentagon-ambiguous unfoldings as `Pentagon`
/// rather than risk a wrong answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[repr(u32)]
#[cfg_attr(feature = "serde", derive(Serialize_repr, Deserialize_repr))]
pub enum H3Error {
  /// The operation failed for an unspecified reason.
  #[error("operation failed")]
  Failed = 1,
  /// An argument was outside its acceptable range.
  #[error("argument out of range")]
  Domain = 2,
  /// A latitude or longitude argument was not finite.
  #[error("latitude or longitude out of range")]
  LatLngDomain = 3,
  /// A resolution argument was outside 0..=15.
  #[error("resolution out of range")]
  ResDomain = 4,
  /// A cell index argument failed validation.
  #[error("invalid cell index")]
  CellInvalid = 5,
  /// A directed edge index argument failed validation.
  #[error("invalid directed edge index")]
  EdgeInvalid = 6,
  /// A vertex index argument failed validation.
  #[error("invalid vertex index")]
  VertexInvalid = 7,
  /// A pentagon distortion was encountered that the algorithm declines to
  /// resolve.
  #[error("pentagon distortion encountered")]
  Pentagon = 9,
  /// Duplicate indexes in a set-valued input.
  #[error("duplicate input index")]
  DuplicateInput = 10,
  /// The two cell arguments are not neighbors.
  #[error("cells are not neighbors")]
  NotNeighbors = 11,
  /// The two index arguments have different resolutions.
  #[error("resolution mismatch")]
  ResMismatch = 12,
  /// A caller-supplied output buffer was too small.
  #[error("output buffer too small")]
  MemoryBounds = 14,
  /// Internal hashing failed to terminate; only reachable on invalid input.
  #[error("compaction hash loop exceeded")]
  LoopExceeded = 15,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn direction_rotations_are_inverse() {
    for bits in 0u8..=7 {
      let d = Direction::from_bits(bits);
      assert_eq!(d.rotate60_ccw().rotate60_cw(), d);
      assert_eq!(d.rotate60_cw().rotate60_ccw(), d);
    }
  }

  #[test]
  fn direction_rotation_cycle() {
    // K -> IK -> I -> IJ -> J -> JK -> K, counter-clockwise.
    let mut d = Direction::KAxes;
    let cycle = [
      Direction::IkAxes,
      Direction::IAxes,
      Direction::IjAxes,
      Direction::JAxes,
      Direction::JkAxes,
      Direction::KAxes,
    ];
    for expected in cycle {
      d = d.rotate60_ccw();
      assert_eq!(d, expected);
    }
  }

  #[test]
  fn direction_try_from_rejects_out_of_range() {
    assert_eq!(Direction::try_from(3u8), Ok(Direction::JkAxes));
    assert_eq!(Direction::try_from(8u8), Err(H3Error::Domain));
  }
}

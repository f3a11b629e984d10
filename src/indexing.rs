//! Conversions between geographic points and cell indexes.
//!
//! Encoding climbs the aperture 7 hierarchy from the finest resolution,
//! extracting one digit per level; decoding descends from the base cell's
//! home face, applying overage adjustments where the path leaves the face.

use crate::base_cells::{
  base_cell_is_cw_offset, base_cell_to_face_ijk, face_ijk_to_base_cell, face_ijk_to_base_cell_ccwrot60,
  is_base_cell_pentagon, MAX_FACE_COORD,
};
use crate::constants::{MAX_H3_RES, NUM_HEX_VERTS, NUM_PENT_VERTS};
use crate::face_ijk::Overage;
use crate::index::is_res_class_iii;
use crate::types::{CoordIJK, Direction, FaceIJK, GeoBoundary, GeoCoord, H3Error, H3Index, H3_NULL};

/// Index the cell containing a geographic point at the given resolution.
pub fn geo_to_h3(g: &GeoCoord, res: i32) -> Result<H3Index, H3Error> {
  if !(0..=MAX_H3_RES).contains(&res) {
    return Err(H3Error::ResDomain);
  }
  if !g.lat.is_finite() || !g.lon.is_finite() {
    return Err(H3Error::LatLngDomain);
  }

  let fijk = FaceIJK::from_geo(g, res);
  let h = face_ijk_to_h3(&fijk, res);
  if h == H3_NULL {
    Err(H3Error::Failed)
  } else {
    Ok(h)
  }
}

/// Center point of a cell.
pub fn h3_to_geo(h: H3Index) -> Result<GeoCoord, H3Error> {
  if !h.is_valid() {
    return Err(H3Error::CellInvalid);
  }
  let fijk = h3_to_face_ijk(h);
  Ok(fijk.to_geo(h.resolution()))
}

/// Boundary vertices of a cell, counter-clockwise.
pub fn h3_to_geo_boundary(h: H3Index) -> Result<GeoBoundary, H3Error> {
  if !h.is_valid() {
    return Err(H3Error::CellInvalid);
  }
  let fijk = h3_to_face_ijk(h);
  let res = h.resolution();
  Ok(if h.is_pentagon() {
    fijk.pent_to_boundary(res, 0, NUM_PENT_VERTS)
  } else {
    fijk.to_boundary(res, 0, NUM_HEX_VERTS)
  })
}

/// Encode a face coordinate at the given resolution into an index.
///
/// Builds bottom-up: each aperture 7 climb yields the digit at that level
/// as the unit difference between the pre-climb coordinate and the
/// re-descended parent center. Returns `H3_NULL` if the coordinate does not
/// land within `MAX_FACE_COORD` of a face origin at resolution 0.
#[must_use]
pub(crate) fn face_ijk_to_h3(fijk: &FaceIJK, res: i32) -> H3Index {
  let mut h = H3Index::new_cell(res, 0, Direction::Center);

  if res == 0 {
    if fijk.coord.i > MAX_FACE_COORD || fijk.coord.j > MAX_FACE_COORD || fijk.coord.k > MAX_FACE_COORD {
      return H3_NULL;
    }
    h.set_base_cell(face_ijk_to_base_cell(fijk));
    return h;
  }

  let mut fijk_bc = *fijk;
  let ijk = &mut fijk_bc.coord;
  for r in (0..res).rev() {
    let last_ijk = *ijk;
    let class_iii = is_res_class_iii(r + 1);
    if class_iii {
      ijk.up_ap7();
    } else {
      ijk.up_ap7r();
    }
    let mut last_center = *ijk;
    if class_iii {
      last_center.down_ap7();
    } else {
      last_center.down_ap7r();
    }

    let diff = (last_ijk - last_center).normalized();
    h.set_digit(r + 1, diff.unit_digit());
  }

  if fijk_bc.coord.i > MAX_FACE_COORD || fijk_bc.coord.j > MAX_FACE_COORD || fijk_bc.coord.k > MAX_FACE_COORD {
    return H3_NULL;
  }

  let base_cell = face_ijk_to_base_cell(&fijk_bc);
  h.set_base_cell(base_cell);

  // Rotate into the canonical orientation of the base cell.
  let num_rots = face_ijk_to_base_cell_ccwrot60(&fijk_bc);
  if is_base_cell_pentagon(base_cell) {
    // Push the path out of the deleted k subsequence first.
    if h.leading_non_zero_digit() == Direction::KAxes {
      if base_cell_is_cw_offset(base_cell, fijk_bc.face) {
        h = h.rotate60_cw();
      } else {
        h = h.rotate60_ccw();
      }
    }
    for _ in 0..num_rots {
      h = h.rotate_pent60_ccw();
    }
  } else {
    for _ in 0..num_rots {
      h = h.rotate60_ccw();
    }
  }

  h
}

/// Decode an index to its face coordinate, applying overage adjustments
/// when the digit path walks off the home face.
#[must_use]
pub(crate) fn h3_to_face_ijk(h: H3Index) -> FaceIJK {
  let mut h = h;
  let base_cell = h.base_cell();

  // All of leading-digit-5 sub-sequences of a pentagon are adjusted into
  // place by a clockwise rotation.
  if is_base_cell_pentagon(base_cell) && h.leading_non_zero_digit() == Direction::IkAxes {
    h = h.rotate60_cw();
  }

  let mut fijk = base_cell_to_face_ijk(base_cell);
  if !h3_to_face_ijk_with_initialized_fijk(h, &mut fijk) {
    // The path never left the home face.
    return fijk;
  }

  let orig_ijk = fijk.coord;

  // Overage is only detectable on a Class II grid; drop Class III one
  // aperture 7r finer.
  let mut res = h.resolution();
  if is_res_class_iii(res) {
    fijk.coord.down_ap7r();
    res += 1;
  }

  let pent_leading_4 = is_base_cell_pentagon(base_cell) && h.leading_non_zero_digit() == Direction::IAxes;
  if fijk.adjust_overage_class_ii(res, pent_leading_4, false) != Overage::NoOverage {
    // Pentagon bases can overage across several faces in sequence.
    if is_base_cell_pentagon(base_cell) {
      while fijk.adjust_overage_class_ii(res, false, false) != Overage::NoOverage {}
    }
    if res != h.resolution() {
      fijk.coord.up_ap7r();
    }
  } else if res != h.resolution() {
    fijk.coord = orig_ijk;
  }

  fijk
}

/// Walk the digit path down from an already-initialized face coordinate.
/// Returns whether overage is possible at all for this index.
pub(crate) fn h3_to_face_ijk_with_initialized_fijk(h: H3Index, fijk: &mut FaceIJK) -> bool {
  let res = h.resolution();

  // A hexagon base cell anchored at a face origin never overages.
  let mut possible_overage = true;
  if !is_base_cell_pentagon(h.base_cell()) && (res == 0 || (fijk.coord == CoordIJK::default())) {
    possible_overage = false;
  }

  for r in 1..=res {
    if is_res_class_iii(r) {
      fijk.coord.down_ap7();
    } else {
      fijk.coord.down_ap7r();
    }
    fijk.coord.to_neighbor(h.digit(r));
  }

  possible_overage
}

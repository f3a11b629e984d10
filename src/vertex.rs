//! Canonical vertex indexes (mode 4).
//!
//! Every topological vertex of the grid is shared by two or three cells;
//! the canonical index embeds the owner cell with the lowest index among
//! them plus the vertex number in that owner's frame.

use crate::base_cells::{
  base_cell_to_ccwrot60, base_cell_to_face_ijk, is_base_cell_pentagon, is_base_cell_polar_pentagon,
  PENTAGON_DIRECTION_FACES,
};
use crate::constants::{H3_CELL_MODE, H3_VERTEX_MODE, NUM_HEX_VERTS, NUM_PENT_VERTS};
use crate::indexing::h3_to_face_ijk;
use crate::traversal::{direction_for_neighbor, h3_neighbor_rotations};
use crate::types::{Direction, GeoCoord, H3Error, H3Index, H3_NULL};

/// Marker for an invalid vertex number.
const INVALID_VERTEX_NUM: i32 = -1;

/// The pentagon direction-faces table is indexed by digit minus this.
const DIRECTION_INDEX_OFFSET: usize = 2;

/// Vertex number on the home face for each hexagon direction; unused for
/// the center digit.
static DIRECTION_TO_VERTEX_NUM_HEX: [i32; 7] = [INVALID_VERTEX_NUM, 3, 1, 2, 5, 4, 0];
/// Pentagon counterpart; the K direction is deleted.
static DIRECTION_TO_VERTEX_NUM_PENT: [i32; 7] = [INVALID_VERTEX_NUM, INVALID_VERTEX_NUM, 1, 2, 4, 3, 0];

/// Direction whose edge starts at each hexagon vertex number.
static VERTEX_NUM_TO_DIRECTION_HEX: [Direction; NUM_HEX_VERTS] = [
  Direction::IjAxes,
  Direction::JAxes,
  Direction::JkAxes,
  Direction::KAxes,
  Direction::IkAxes,
  Direction::IAxes,
];
/// Pentagon counterpart.
static VERTEX_NUM_TO_DIRECTION_PENT: [Direction; NUM_PENT_VERTS] = [
  Direction::IjAxes,
  Direction::JAxes,
  Direction::JkAxes,
  Direction::IkAxes,
  Direction::IAxes,
];

/// CCW rotation of a cell's vertex numbering relative to the directional
/// layout of its neighbors, caused by the faces the cell's path crossed.
fn vertex_rotations(cell: H3Index) -> i32 {
  let fijk = h3_to_face_ijk(cell);
  let base_cell = cell.base_cell();
  let cell_leading_digit = cell.leading_non_zero_digit();

  let base_fijk = base_cell_to_face_ijk(base_cell);
  let mut ccw_rot60 = base_cell_to_ccwrot60(base_cell, fijk.face);

  if is_base_cell_pentagon(base_cell) {
    let dir_faces = PENTAGON_DIRECTION_FACES
      .iter()
      .find(|p| p.base_cell == base_cell)
      .expect("every pentagon base cell has a direction-faces entry");

    let ik_face = dir_faces.faces[Direction::IkAxes as usize - DIRECTION_INDEX_OFFSET];
    let jk_face = dir_faces.faces[Direction::JkAxes as usize - DIRECTION_INDEX_OFFSET];

    // Polar neighbors and IK neighbors pick up one extra rotation.
    if fijk.face != base_fijk.face && (is_base_cell_polar_pentagon(base_cell) || fijk.face == ik_face) {
      ccw_rot60 = (ccw_rot60 + 1) % 6;
    }

    // Crossing the deleted subsequence rotates the numbering.
    if cell_leading_digit == Direction::JkAxes && fijk.face == ik_face {
      // JK into IK territory: rotate clockwise.
      ccw_rot60 = (ccw_rot60 + 5) % 6;
    } else if cell_leading_digit == Direction::IkAxes && fijk.face == jk_face {
      // IK into JK territory: rotate counter-clockwise.
      ccw_rot60 = (ccw_rot60 + 1) % 6;
    }
  }

  ccw_rot60
}

/// The vertex number at the start of the edge in the given direction from
/// the cell, or `INVALID_VERTEX_NUM` for illegal directions.
pub(crate) fn vertex_num_for_direction(origin: H3Index, direction: Direction) -> i32 {
  let is_pent = origin.is_pentagon();

  if direction == Direction::Center
    || direction == Direction::InvalidDigit
    || (is_pent && direction == Direction::KAxes)
  {
    return INVALID_VERTEX_NUM;
  }

  let rotations = vertex_rotations(origin);

  if is_pent {
    (DIRECTION_TO_VERTEX_NUM_PENT[direction as usize] + NUM_PENT_VERTS as i32 - rotations)
      .rem_euclid(NUM_PENT_VERTS as i32)
  } else {
    (DIRECTION_TO_VERTEX_NUM_HEX[direction as usize] + NUM_HEX_VERTS as i32 - rotations)
      .rem_euclid(NUM_HEX_VERTS as i32)
  }
}

/// The direction whose edge starts at the given vertex number, or
/// `InvalidDigit` for an out-of-range vertex number.
fn direction_for_vertex_num(origin: H3Index, vertex_num: i32) -> Direction {
  let is_pent = origin.is_pentagon();
  let num_verts = if is_pent { NUM_PENT_VERTS } else { NUM_HEX_VERTS } as i32;
  if !(0..num_verts).contains(&vertex_num) {
    return Direction::InvalidDigit;
  }

  let rotations = vertex_rotations(origin);
  let rotated = ((vertex_num + rotations) % num_verts) as usize;
  if is_pent {
    VERTEX_NUM_TO_DIRECTION_PENT[rotated]
  } else {
    VERTEX_NUM_TO_DIRECTION_HEX[rotated]
  }
}

/// The canonical vertex index for vertex number `vertex_num` of the cell.
///
/// The owner is the lowest-indexed of the cells sharing the vertex; the
/// vertex number is renumbered into the owner's frame.
pub fn cell_to_vertex(cell: H3Index, vertex_num: i32) -> Result<H3Index, H3Error> {
  if !cell.is_valid() {
    return Err(H3Error::CellInvalid);
  }

  let cell_is_pentagon = cell.is_pentagon();
  let cell_num_verts = if cell_is_pentagon { NUM_PENT_VERTS } else { NUM_HEX_VERTS } as i32;
  let res = cell.resolution();

  if !(0..cell_num_verts).contains(&vertex_num) {
    return Err(H3Error::Domain);
  }

  let mut owner = cell;
  let mut owner_vertex_num = vertex_num;

  // A center child always has the lowest index of any of its neighbors,
  // so the owner search can be skipped for it.
  if res == 0 || cell.digit(res) != Direction::Center {
    // The two neighbors across the edges meeting at this vertex.
    // Vertex numbers are CCW, so vertex - 1 bounds the edge on the right.
    let left = direction_for_vertex_num(cell, vertex_num);
    if left == Direction::InvalidDigit {
      return Err(H3Error::Failed);
    }
    let mut l_rotations = 0;
    let left_neighbor = h3_neighbor_rotations(cell, left, &mut l_rotations)?;
    if left_neighbor < owner {
      owner = left_neighbor;
    }

    let right = direction_for_vertex_num(cell, (vertex_num + cell_num_verts - 1) % cell_num_verts);
    if right == Direction::InvalidDigit {
      return Err(H3Error::Failed);
    }
    let mut r_rotations = 0;
    let right_neighbor = h3_neighbor_rotations(cell, right, &mut r_rotations)?;
    if right_neighbor < owner {
      owner = right_neighbor;
    }

    if owner != cell {
      let dir = direction_for_neighbor(owner, cell);
      if dir == Direction::Center || dir == Direction::InvalidDigit {
        return Err(H3Error::Failed);
      }

      if owner == right_neighbor {
        owner_vertex_num = vertex_num_for_direction(owner, dir);
      } else {
        // The left neighbor owns the far end of its edge toward the cell.
        owner_vertex_num = vertex_num_for_direction(owner, dir) + 1;
        let owner_num_verts = if owner.is_pentagon() { NUM_PENT_VERTS } else { NUM_HEX_VERTS } as i32;
        if owner_vertex_num == owner_num_verts {
          owner_vertex_num = 0;
        }
      }
    }
  }

  let mut vertex = owner;
  vertex.set_mode(H3_VERTEX_MODE);
  vertex.set_reserved_bits(owner_vertex_num as u8);
  Ok(vertex)
}

/// All canonical vertexes of a cell. The output slice must hold six
/// entries; a pentagon leaves the last slot `H3_NULL`.
pub fn cell_to_vertexes(cell: H3Index, out: &mut [H3Index]) -> Result<(), H3Error> {
  if out.len() < NUM_HEX_VERTS {
    return Err(H3Error::MemoryBounds);
  }
  let num_verts = if cell.is_pentagon() { NUM_PENT_VERTS } else { NUM_HEX_VERTS };
  for v in 0..num_verts {
    out[v] = cell_to_vertex(cell, v as i32)?;
  }
  for slot in out.iter_mut().take(NUM_HEX_VERTS).skip(num_verts) {
    *slot = H3_NULL;
  }
  Ok(())
}

/// Geographic coordinates of a vertex index.
pub fn vertex_to_point(vertex: H3Index) -> Result<GeoCoord, H3Error> {
  if vertex.mode() != H3_VERTEX_MODE {
    return Err(H3Error::VertexInvalid);
  }

  let vertex_num = i32::from(vertex.reserved_bits());
  let mut owner = vertex;
  owner.set_mode(H3_CELL_MODE);
  owner.set_reserved_bits(0);
  if !owner.is_valid() {
    return Err(H3Error::VertexInvalid);
  }

  let fijk = h3_to_face_ijk(owner);
  let res = owner.resolution();
  let boundary = if owner.is_pentagon() {
    fijk.pent_to_boundary(res, vertex_num as usize, 1)
  } else {
    fijk.to_boundary(res, vertex_num as usize, 1)
  };

  Ok(boundary.verts[0])
}

/// Whether the input is a valid, canonical vertex index.
#[must_use]
pub fn is_valid_vertex(vertex: H3Index) -> bool {
  if vertex.mode() != H3_VERTEX_MODE {
    return false;
  }

  let vertex_num = i32::from(vertex.reserved_bits());
  let mut owner = vertex;
  owner.set_mode(H3_CELL_MODE);
  owner.set_reserved_bits(0);
  if !owner.is_valid() {
    return false;
  }

  // Canonical means recreating from the owner reproduces the input.
  matches!(cell_to_vertex(owner, vertex_num), Ok(canonical) if canonical == vertex)
}

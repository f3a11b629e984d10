//! Directed edge indexes (mode 2): an owner cell plus a direction 1..=6
//! packed into the reserved bits.

use crate::constants::{EARTH_RADIUS_KM, H3_CELL_MODE, H3_EDGE_MODE};
use crate::indexing::h3_to_face_ijk;
use crate::traversal::{direction_for_neighbor, h3_neighbor_rotations};
use crate::types::{Direction, GeoBoundary, H3Error, H3Index};
use crate::vertex::vertex_num_for_direction;

/// The directed edge from `origin` to a neighboring `destination`.
/// Fails with `NotNeighbors` if the cells do not share an edge.
pub fn get_h3_unidirectional_edge(origin: H3Index, destination: H3Index) -> Result<H3Index, H3Error> {
  if !origin.is_valid() || !destination.is_valid() {
    return Err(H3Error::CellInvalid);
  }

  let direction = direction_for_neighbor(origin, destination);
  if direction == Direction::InvalidDigit || direction == Direction::Center {
    return Err(H3Error::NotNeighbors);
  }

  let mut edge = origin;
  edge.set_mode(H3_EDGE_MODE);
  edge.set_reserved_bits(direction as u8);
  Ok(edge)
}

/// The origin cell of a directed edge.
pub fn get_origin_h3_index_from_unidirectional_edge(edge: H3Index) -> Result<H3Index, H3Error> {
  if edge.mode() != H3_EDGE_MODE {
    return Err(H3Error::EdgeInvalid);
  }
  let mut origin = edge;
  origin.set_mode(H3_CELL_MODE);
  origin.set_reserved_bits(0);
  Ok(origin)
}

/// The destination cell of a directed edge.
pub fn get_destination_h3_index_from_unidirectional_edge(edge: H3Index) -> Result<H3Index, H3Error> {
  let origin = get_origin_h3_index_from_unidirectional_edge(edge)?;
  let direction = Direction::from_bits(edge.reserved_bits());
  let mut rotations = 0;
  h3_neighbor_rotations(origin, direction, &mut rotations)
}

/// Both endpoint cells of a directed edge, origin first.
pub fn get_h3_indexes_from_unidirectional_edge(edge: H3Index) -> Result<(H3Index, H3Index), H3Error> {
  Ok((
    get_origin_h3_index_from_unidirectional_edge(edge)?,
    get_destination_h3_index_from_unidirectional_edge(edge)?,
  ))
}

/// Whether the input is a valid directed edge index: edge mode, direction
/// 1..=6 (never K from a pentagon), and a valid owner cell.
#[must_use]
pub fn h3_unidirectional_edge_is_valid(edge: H3Index) -> bool {
  if edge.mode() != H3_EDGE_MODE {
    return false;
  }

  let direction = edge.reserved_bits();
  if !(Direction::KAxes as u8..=Direction::IjAxes as u8).contains(&direction) {
    return false;
  }

  let mut origin = edge;
  origin.set_mode(H3_CELL_MODE);
  origin.set_reserved_bits(0);
  if origin.is_pentagon() && direction == Direction::KAxes as u8 {
    return false;
  }

  origin.is_valid()
}

/// All directed edges with the given origin. The output slice must hold
/// six entries; a pentagon's deleted K slot stays `H3_NULL`.
pub fn get_h3_unidirectional_edges_from_hexagon(origin: H3Index, out: &mut [H3Index]) -> Result<(), H3Error> {
  if out.len() < 6 {
    return Err(H3Error::MemoryBounds);
  }

  let is_pentagon = origin.is_pentagon();
  for (i, slot) in out.iter_mut().enumerate().take(6) {
    if is_pentagon && i == 0 {
      *slot = crate::types::H3_NULL;
    } else {
      let mut edge = origin;
      edge.set_mode(H3_EDGE_MODE);
      edge.set_reserved_bits(i as u8 + 1);
      *slot = edge;
    }
  }
  Ok(())
}

/// The geographic endpoints of a directed edge: the two boundary vertices
/// bordering the edge's direction, plus a possible distortion vertex.
pub fn get_h3_unidirectional_edge_boundary(edge: H3Index) -> Result<GeoBoundary, H3Error> {
  if !h3_unidirectional_edge_is_valid(edge) {
    return Err(H3Error::EdgeInvalid);
  }

  let direction = Direction::from_bits(edge.reserved_bits());
  let origin = get_origin_h3_index_from_unidirectional_edge(edge)?;

  let start_vertex = vertex_num_for_direction(origin, direction);
  if start_vertex < 0 {
    return Err(H3Error::EdgeInvalid);
  }

  let fijk = h3_to_face_ijk(origin);
  let res = origin.resolution();
  Ok(if origin.is_pentagon() {
    fijk.pent_to_boundary(res, start_vertex as usize, 2)
  } else {
    fijk.to_boundary(res, start_vertex as usize, 2)
  })
}

/// Length of a directed edge in radians, summed along its boundary.
pub fn exact_edge_length_rads(edge: H3Index) -> Result<f64, H3Error> {
  let boundary = get_h3_unidirectional_edge_boundary(edge)?;
  let mut length = 0.0;
  for pair in boundary.verts[..boundary.num_verts].windows(2) {
    length += pair[0].dist_rads(&pair[1]);
  }
  Ok(length)
}

/// Length of a directed edge in kilometers.
pub fn exact_edge_length_km(edge: H3Index) -> Result<f64, H3Error> {
  Ok(exact_edge_length_rads(edge)? * EARTH_RADIUS_KM)
}

/// Length of a directed edge in meters.
pub fn exact_edge_length_m(edge: H3Index) -> Result<f64, H3Error> {
  Ok(exact_edge_length_km(edge)? * 1000.0)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::geo::degs_to_rads;
  use crate::indexing::geo_to_h3;
  use crate::types::{GeoCoord, H3_NULL};

  fn sf_cell(res: i32) -> H3Index {
    let g = GeoCoord::new(degs_to_rads(37.779_265), degs_to_rads(-122.419_277));
    geo_to_h3(&g, res).unwrap()
  }

  #[test]
  fn edge_round_trip() {
    let origin = sf_cell(9);
    let mut rotations = 0;
    let destination = h3_neighbor_rotations(origin, Direction::JkAxes, &mut rotations).unwrap();

    let edge = get_h3_unidirectional_edge(origin, destination).unwrap();
    assert!(h3_unidirectional_edge_is_valid(edge));
    assert_eq!(get_h3_indexes_from_unidirectional_edge(edge).unwrap(), (origin, destination));
  }

  #[test]
  fn non_neighbors_are_rejected() {
    let origin = sf_cell(9);
    let far = sf_cell(9);
    assert_eq!(get_h3_unidirectional_edge(origin, far), Err(H3Error::NotNeighbors));
    let coarse = sf_cell(8);
    assert!(get_h3_unidirectional_edge(origin, coarse).is_err());
  }

  #[test]
  fn hexagon_emits_six_edges_pentagon_five() {
    let hex = sf_cell(7);
    let mut edges = [H3_NULL; 6];
    get_h3_unidirectional_edges_from_hexagon(hex, &mut edges).unwrap();
    assert!(edges.iter().all(|&e| e != H3_NULL && h3_unidirectional_edge_is_valid(e)));
    for &e in &edges {
      assert_eq!(get_origin_h3_index_from_unidirectional_edge(e), Ok(hex));
      let dest = get_destination_h3_index_from_unidirectional_edge(e).unwrap();
      assert_eq!(crate::traversal::h3_indexes_are_neighbors(hex, dest), Ok(true));
    }

    let pent = H3Index::new_cell(4, 97, Direction::Center);
    get_h3_unidirectional_edges_from_hexagon(pent, &mut edges).unwrap();
    assert_eq!(edges[0], H3_NULL);
    assert!(edges[1..].iter().all(|&e| h3_unidirectional_edge_is_valid(e)));
  }

  #[test]
  fn cell_indexes_are_not_edges() {
    assert!(!h3_unidirectional_edge_is_valid(sf_cell(5)));
    assert!(get_origin_h3_index_from_unidirectional_edge(sf_cell(5)).is_err());
  }

  #[test]
  fn edge_boundary_has_two_or_three_verts() {
    let origin = sf_cell(6);
    let mut edges = [H3_NULL; 6];
    get_h3_unidirectional_edges_from_hexagon(origin, &mut edges).unwrap();
    for &e in &edges {
      let boundary = get_h3_unidirectional_edge_boundary(e).unwrap();
      assert!((2..=3).contains(&boundary.num_verts));
    }
  }

  #[test]
  fn edge_lengths_are_positive_and_consistent() {
    let origin = sf_cell(5);
    let mut edges = [H3_NULL; 6];
    get_h3_unidirectional_edges_from_hexagon(origin, &mut edges).unwrap();

    for &e in &edges {
      let rads = exact_edge_length_rads(e).unwrap();
      assert!(rads > 0.0);
      let km = exact_edge_length_km(e).unwrap();
      assert!((km / rads - EARTH_RADIUS_KM).abs() < 1e-9);
      assert!((exact_edge_length_m(e).unwrap() / km - 1000.0).abs() < 1e-9);
    }

    // Edges of one cell have comparable lengths.
    let lengths: Vec<f64> = edges.iter().map(|&e| exact_edge_length_km(e).unwrap()).collect();
    let min = lengths.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = lengths.iter().cloned().fold(0.0, f64::max);
    assert!(max < 2.0 * min);
  }
}

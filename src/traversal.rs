//! Neighbor traversal: single steps, k-rings, and hollow rings.
//!
//! A neighbor step rewrites the digit path from the finest level upward,
//! carrying into coarser digits until the step is absorbed, possibly
//! crossing into a neighboring base cell. Every pentagon crossing folds the
//! traversal direction by 60 degrees; the accumulated rotation is reported
//! back to ring-walking callers so they can keep their bearings.

use std::collections::{HashMap, VecDeque};

use crate::base_cells::{
  base_cell_is_cw_offset, base_cell_neighbor, is_base_cell_pentagon, is_base_cell_polar_pentagon, BASE_CELL_DATA,
  BASE_CELL_NEIGHBOR_60CCW_ROTS, INVALID_BASE_CELL,
};
use crate::constants::NUM_BASE_CELLS;
use crate::index::is_res_class_iii;
use crate::types::{Direction, H3Error, H3Index, H3_NULL};

/// Ring traversal enters each new ring moving along the I axis.
const NEXT_RING_DIRECTION: Direction = Direction::IAxes;

use Direction::{Center, IAxes, IjAxes, IkAxes, InvalidDigit, JAxes, JkAxes, KAxes};

/// New digit when traversing along a Class II orientation:
/// current digit -> traversal direction -> new digit.
#[rustfmt::skip]
static NEW_DIGIT_II: [[Direction; 7]; 7] = [
  [Center, KAxes,  JAxes,  JkAxes, IAxes,  IkAxes, IjAxes],
  [KAxes,  IAxes,  JkAxes, IjAxes, IkAxes, JAxes,  Center],
  [JAxes,  JkAxes, KAxes,  IAxes,  IjAxes, Center, IkAxes],
  [JkAxes, IjAxes, IAxes,  IkAxes, Center, KAxes,  JAxes],
  [IAxes,  IkAxes, IjAxes, Center, JAxes,  JkAxes, KAxes],
  [IkAxes, JAxes,  Center, KAxes,  JkAxes, IjAxes, IAxes],
  [IjAxes, Center, IkAxes, JAxes,  KAxes,  IAxes,  JkAxes],
];

/// Carry direction into the next-coarser digit along a Class II
/// orientation: current digit -> traversal direction -> carry.
#[rustfmt::skip]
static NEW_ADJUSTMENT_II: [[Direction; 7]; 7] = [
  [Center, Center, Center, Center, Center, Center, Center],
  [Center, KAxes,  Center, KAxes,  Center, IkAxes, Center],
  [Center, Center, JAxes,  JkAxes, Center, Center, JAxes],
  [Center, KAxes,  JkAxes, JkAxes, Center, Center, Center],
  [Center, Center, Center, Center, IAxes,  IAxes,  IjAxes],
  [Center, IkAxes, Center, Center, IAxes,  IkAxes, Center],
  [Center, Center, JAxes,  Center, IjAxes, Center, IjAxes],
];

/// `NEW_DIGIT_II` counterpart for a Class III orientation.
#[rustfmt::skip]
static NEW_DIGIT_III: [[Direction; 7]; 7] = [
  [Center, KAxes,  JAxes,  JkAxes, IAxes,  IkAxes, IjAxes],
  [KAxes,  JAxes,  JkAxes, IAxes,  IkAxes, IjAxes, Center],
  [JAxes,  JkAxes, IAxes,  IkAxes, IjAxes, Center, KAxes],
  [JkAxes, IAxes,  IkAxes, IjAxes, Center, KAxes,  JAxes],
  [IAxes,  IkAxes, IjAxes, Center, KAxes,  JAxes,  JkAxes],
  [IkAxes, IjAxes, Center, KAxes,  JAxes,  JkAxes, IAxes],
  [IjAxes, Center, KAxes,  JAxes,  JkAxes, IAxes,  IkAxes],
];

/// `NEW_ADJUSTMENT_II` counterpart for a Class III orientation.
#[rustfmt::skip]
static NEW_ADJUSTMENT_III: [[Direction; 7]; 7] = [
  [Center, Center, Center, Center, Center, Center, Center],
  [Center, KAxes,  Center, JkAxes, Center, KAxes,  Center],
  [Center, Center, JAxes,  JAxes,  Center, Center, IjAxes],
  [Center, JkAxes, JAxes,  JkAxes, Center, Center, Center],
  [Center, Center, Center, Center, IAxes,  IkAxes, IAxes],
  [Center, KAxes,  Center, Center, IkAxes, IkAxes, Center],
  [Center, Center, IjAxes, Center, IAxes,  Center, IjAxes],
];

/// Step to the neighboring cell in the given direction.
///
/// `rotations` carries the caller's accumulated CCW rotation of its
/// direction frame: the step direction is pre-rotated by it, and it is
/// updated with any rotation the crossing itself introduces. Fails with
/// `Pentagon` when the step would land in the deleted K subsequence of a
/// pentagon in a way that has no defined result.
pub(crate) fn h3_neighbor_rotations(
  origin: H3Index,
  dir: Direction,
  rotations: &mut i32,
) -> Result<H3Index, H3Error> {
  if dir == Center || dir == InvalidDigit {
    return Err(H3Error::Domain);
  }

  let mut out = origin;
  let mut dir = dir;

  *rotations = rotations.rem_euclid(6);
  for _ in 0..*rotations {
    dir = dir.rotate60_ccw();
  }

  let old_base_cell = out.base_cell();
  if !(0..NUM_BASE_CELLS).contains(&old_base_cell) {
    return Err(H3Error::CellInvalid);
  }
  let old_leading_digit = out.leading_non_zero_digit();

  // Rewrite digits from the finest level up until the carry is absorbed.
  let mut new_rotations = 0;
  let mut r = out.resolution() - 1;
  loop {
    if r == -1 {
      out.set_base_cell(base_cell_neighbor(old_base_cell, dir));
      new_rotations = BASE_CELL_NEIGHBOR_60CCW_ROTS[old_base_cell as usize][dir as usize];

      if out.base_cell() == INVALID_BASE_CELL {
        // The deleted K neighbor at base cell level; this edge actually
        // borders the IK neighbor.
        out.set_base_cell(base_cell_neighbor(old_base_cell, IkAxes));
        new_rotations = BASE_CELL_NEIGHBOR_60CCW_ROTS[old_base_cell as usize][IkAxes as usize];

        out = out.rotate60_ccw();
        *rotations += 1;
      }
      break;
    }

    let old_digit = out.digit(r + 1);
    if old_digit == InvalidDigit {
      // Only possible on an invalid input index.
      return Err(H3Error::CellInvalid);
    }

    let next_dir;
    if is_res_class_iii(r + 1) {
      out.set_digit(r + 1, NEW_DIGIT_II[old_digit as usize][dir as usize]);
      next_dir = NEW_ADJUSTMENT_II[old_digit as usize][dir as usize];
    } else {
      out.set_digit(r + 1, NEW_DIGIT_III[old_digit as usize][dir as usize]);
      next_dir = NEW_ADJUSTMENT_III[old_digit as usize][dir as usize];
    }

    if next_dir == Center {
      // No more carries.
      break;
    }
    dir = next_dir;
    r -= 1;
  }

  let new_base_cell = out.base_cell();
  if is_base_cell_pentagon(new_base_cell) {
    let mut already_adjusted_k_subsequence = false;

    // Force rotation out of the missing K-axis subsequence.
    if out.leading_non_zero_digit() == KAxes {
      if old_base_cell != new_base_cell {
        // Entered the deleted subsequence from a different base cell; the
        // offset-face flag decides the unwinding direction.
        if base_cell_is_cw_offset(new_base_cell, BASE_CELL_DATA[old_base_cell as usize].home.face) {
          out = out.rotate60_cw();
        } else {
          out = out.rotate60_ccw();
        }
        already_adjusted_k_subsequence = true;
      } else {
        // Entered from within the same pentagon base cell.
        match old_leading_digit {
          Center => return Err(H3Error::Pentagon), // K direction is deleted here
          JkAxes => {
            out = out.rotate60_ccw();
            *rotations += 1;
          }
          IkAxes => {
            out = out.rotate60_cw();
            *rotations += 5;
          }
          _ => return Err(H3Error::Failed),
        }
      }
    }

    for _ in 0..new_rotations {
      out = out.rotate_pent60_ccw();
    }

    if old_base_cell != new_base_cell {
      if is_base_cell_polar_pentagon(new_base_cell) {
        // Polar pentagons have all-I neighbors; every crossing except from
        // the two aligned base cells folds the frame.
        if old_base_cell != 118 && old_base_cell != 8 && out.leading_non_zero_digit() != JkAxes {
          *rotations += 1;
        }
      } else if out.leading_non_zero_digit() == IkAxes && !already_adjusted_k_subsequence {
        // Distortion introduced to the fifth neighbor by the deleted
        // subsequence.
        *rotations += 1;
      }
    }
  } else {
    for _ in 0..new_rotations {
      out = out.rotate60_ccw();
    }
  }

  *rotations = (*rotations + new_rotations).rem_euclid(6);
  Ok(out)
}

/// The direction from a cell to a directly adjacent cell, `Center` for
/// itself, or `InvalidDigit` if they are not neighbors.
#[must_use]
pub(crate) fn direction_for_neighbor(origin: H3Index, destination: H3Index) -> Direction {
  if origin == destination {
    return Center;
  }

  // Pentagons have no K neighbor.
  let start = if origin.is_pentagon() { JAxes as u8 } else { KAxes as u8 };
  for bits in start..=IjAxes as u8 {
    let dir = Direction::from_bits(bits);
    let mut rotations = 0;
    if let Ok(neighbor) = h3_neighbor_rotations(origin, dir, &mut rotations) {
      if neighbor == destination {
        return dir;
      }
    }
  }
  InvalidDigit
}

/// Whether two cell indexes share an edge.
pub fn h3_indexes_are_neighbors(origin: H3Index, destination: H3Index) -> Result<bool, H3Error> {
  if !origin.is_valid() || !destination.is_valid() {
    return Err(H3Error::CellInvalid);
  }
  if origin == destination {
    return Ok(false);
  }
  if origin.resolution() != destination.resolution() {
    return Err(H3Error::ResMismatch);
  }
  Ok(direction_for_neighbor(origin, destination) != InvalidDigit)
}

/// Number of cells within grid distance `k` of any cell:
/// `1 + 6 * (k * (k + 1) / 2)`.
#[must_use]
pub fn max_kring_size(k: i32) -> usize {
  (1 + 3 * k * (k + 1)) as usize
}

/// All cells within grid distance `k` of the origin. Unused slots are
/// `H3_NULL`.
pub fn k_ring(origin: H3Index, k: i32, out: &mut [H3Index]) -> Result<(), H3Error> {
  let mut distances = vec![0i32; max_kring_size(k)];
  k_ring_distances(origin, k, out, &mut distances)
}

/// `k_ring` with grid distances reported alongside each output slot.
///
/// Tries the fast ring-by-ring walk first, then falls back to a
/// deduplicating breadth-first search when a pentagon disturbs the rings.
pub fn k_ring_distances(
  origin: H3Index,
  k: i32,
  out: &mut [H3Index],
  distances: &mut [i32],
) -> Result<(), H3Error> {
  if k < 0 {
    return Err(H3Error::Domain);
  }
  let size = max_kring_size(k);
  if out.len() < size || distances.len() < size {
    return Err(H3Error::MemoryBounds);
  }

  match hex_range_distances(origin, k, out, Some(distances)) {
    Ok(()) => Ok(()),
    Err(H3Error::Pentagon) => {
      out[..size].fill(H3_NULL);
      distances[..size].fill(0);
      k_ring_internal(origin, k, out, distances)
    }
    Err(e) => Err(e),
  }
}

/// Breadth-first traversal that tolerates pentagons, writing cells in
/// discovery order.
fn k_ring_internal(origin: H3Index, k: i32, out: &mut [H3Index], distances: &mut [i32]) -> Result<(), H3Error> {
  let mut seen: HashMap<H3Index, i32> = HashMap::with_capacity(max_kring_size(k));
  let mut queue = VecDeque::new();

  seen.insert(origin, 0);
  out[0] = origin;
  distances[0] = 0;
  let mut written = 1;
  queue.push_back((origin, 0));

  while let Some((h, depth)) = queue.pop_front() {
    if depth >= k {
      continue;
    }
    for dir in Direction::AXES_CCW {
      let mut rotations = 0;
      match h3_neighbor_rotations(h, dir, &mut rotations) {
        Ok(neighbor) => {
          if !seen.contains_key(&neighbor) {
            seen.insert(neighbor, depth + 1);
            out[written] = neighbor;
            distances[written] = depth + 1;
            written += 1;
            queue.push_back((neighbor, depth + 1));
          }
        }
        // The deleted direction of a pentagon simply has no neighbor.
        Err(H3Error::Pentagon) => continue,
        Err(e) => return Err(e),
      }
    }
  }

  Ok(())
}

/// Fast ring-by-ring neighborhood walk. Fails with `Pentagon` as soon as a
/// pentagon (or its distortion) is encountered; callers fall back to
/// `k_ring`.
pub fn hex_range(origin: H3Index, k: i32, out: &mut [H3Index]) -> Result<(), H3Error> {
  hex_range_distances(origin, k, out, None)
}

/// `hex_range` with optional per-cell distances.
pub fn hex_range_distances(
  origin: H3Index,
  k: i32,
  out: &mut [H3Index],
  mut distances: Option<&mut [i32]>,
) -> Result<(), H3Error> {
  if k < 0 {
    return Err(H3Error::Domain);
  }
  let size = max_kring_size(k);
  if out.len() < size {
    return Err(H3Error::MemoryBounds);
  }
  if let Some(d) = distances.as_deref() {
    if d.len() < size {
      return Err(H3Error::MemoryBounds);
    }
  }

  let mut origin = origin;
  let mut idx = 0;
  out[idx] = origin;
  if let Some(d) = distances.as_deref_mut() {
    d[idx] = 0;
  }
  idx += 1;

  if origin.is_pentagon() {
    return Err(H3Error::Pentagon);
  }

  // Ring number, side of the ring, and position along the side.
  let mut ring = 1;
  let mut direction = 0;
  let mut i = 0;
  // Accumulated frame rotation from crossed faces.
  let mut rotations = 0;

  while ring <= k {
    if direction == 0 && i == 0 {
      // Step out to the next ring. This cell is written at ring close.
      origin = h3_neighbor_rotations(origin, NEXT_RING_DIRECTION, &mut rotations)?;
      if origin.is_pentagon() {
        return Err(H3Error::Pentagon);
      }
    }

    origin = h3_neighbor_rotations(origin, Direction::AXES_CCW[direction], &mut rotations)?;
    out[idx] = origin;
    if let Some(d) = distances.as_deref_mut() {
      d[idx] = ring;
    }
    idx += 1;

    i += 1;
    if i == ring {
      i = 0;
      direction += 1;
      if direction == 6 {
        direction = 0;
        ring += 1;
      }
    }

    if origin.is_pentagon() {
      return Err(H3Error::Pentagon);
    }
  }

  Ok(())
}

/// The hollow ring of cells at exactly grid distance `k`. Fails with
/// `Pentagon` when a pentagon distorts the ring.
pub fn hex_ring(origin: H3Index, k: i32, out: &mut [H3Index]) -> Result<(), H3Error> {
  if k < 0 {
    return Err(H3Error::Domain);
  }
  let size = if k == 0 { 1 } else { 6 * k as usize };
  if out.len() < size {
    return Err(H3Error::MemoryBounds);
  }

  if k == 0 {
    out[0] = origin;
    return Ok(());
  }

  let mut idx = 0;
  let mut rotations = 0;
  let mut origin = origin;

  if origin.is_pentagon() {
    return Err(H3Error::Pentagon);
  }

  for _ in 0..k {
    origin = h3_neighbor_rotations(origin, NEXT_RING_DIRECTION, &mut rotations)?;
    if origin.is_pentagon() {
      return Err(H3Error::Pentagon);
    }
  }

  let last_index = origin;
  out[idx] = origin;
  idx += 1;

  for direction in 0..6 {
    for pos in 0..k {
      origin = h3_neighbor_rotations(origin, Direction::AXES_CCW[direction], &mut rotations)?;

      // The last step closes the ring back onto the first cell.
      if pos != k - 1 || direction != 5 {
        out[idx] = origin;
        idx += 1;
        if origin.is_pentagon() {
          return Err(H3Error::Pentagon);
        }
      }
    }
  }

  // A mismatch at closure means pentagonal distortion occurred.
  if last_index != origin {
    return Err(H3Error::Pentagon);
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::geo::degs_to_rads;
  use crate::indexing::geo_to_h3;
  use crate::types::GeoCoord;

  fn sf_cell(res: i32) -> H3Index {
    let g = GeoCoord::new(degs_to_rads(37.779_265), degs_to_rads(-122.419_277));
    geo_to_h3(&g, res).unwrap()
  }

  #[test]
  fn single_steps_reach_six_distinct_neighbors() {
    let origin = sf_cell(9);
    let mut neighbors = Vec::new();
    for dir in Direction::AXES_CCW {
      let mut rotations = 0;
      let n = h3_neighbor_rotations(origin, dir, &mut rotations).unwrap();
      assert!(n.is_valid());
      assert_ne!(n, origin);
      neighbors.push(n);
    }
    neighbors.sort();
    neighbors.dedup();
    assert_eq!(neighbors.len(), 6);
  }

  #[test]
  fn neighbor_direction_round_trip() {
    let origin = sf_cell(7);
    for dir in Direction::AXES_CCW {
      let mut rotations = 0;
      let n = h3_neighbor_rotations(origin, dir, &mut rotations).unwrap();
      assert_eq!(direction_for_neighbor(origin, n), dir);
      assert_eq!(h3_indexes_are_neighbors(origin, n), Ok(true));
      assert_eq!(h3_indexes_are_neighbors(n, origin), Ok(true));
    }
  }

  #[test]
  fn pentagon_has_five_neighbors() {
    let pent = H3Index::new_cell(3, 49, Direction::Center);
    assert!(pent.is_pentagon());

    let mut rotations = 0;
    assert_eq!(
      h3_neighbor_rotations(pent, Direction::KAxes, &mut rotations),
      Err(H3Error::Pentagon)
    );

    let mut neighbors = Vec::new();
    for dir in Direction::AXES_CCW {
      let mut rotations = 0;
      if let Ok(n) = h3_neighbor_rotations(pent, dir, &mut rotations) {
        neighbors.push(n);
      }
    }
    neighbors.sort();
    neighbors.dedup();
    assert_eq!(neighbors.len(), 5);
  }

  #[test]
  fn k_ring_sizes() {
    assert_eq!(max_kring_size(0), 1);
    assert_eq!(max_kring_size(1), 7);
    assert_eq!(max_kring_size(2), 19);
    assert_eq!(max_kring_size(5), 91);
  }

  #[test]
  fn k_ring_one_matches_neighbors() {
    let origin = sf_cell(9);
    let mut out = vec![H3_NULL; max_kring_size(1)];
    k_ring(origin, 1, &mut out).unwrap();

    let live: Vec<_> = out.iter().copied().filter(|&h| h != H3_NULL).collect();
    assert_eq!(live.len(), 7);
    assert!(live.contains(&origin));
    for h in live {
      if h != origin {
        assert_eq!(h3_indexes_are_neighbors(origin, h), Ok(true));
      }
    }
  }

  #[test]
  fn k_ring_distances_are_consistent() {
    let origin = sf_cell(8);
    let k = 3;
    let size = max_kring_size(k);
    let mut out = vec![H3_NULL; size];
    let mut dist = vec![0i32; size];
    k_ring_distances(origin, k, &mut out, &mut dist).unwrap();

    let mut per_ring = [0usize; 4];
    for (h, d) in out.iter().zip(dist.iter()) {
      if *h != H3_NULL {
        per_ring[*d as usize] += 1;
      }
    }
    assert_eq!(per_ring, [1, 6, 12, 18]);
  }

  #[test]
  fn k_ring_around_pentagon_falls_back() {
    let pent = H3Index::new_cell(2, 4, Direction::Center);
    let k = 2;
    let size = max_kring_size(k);
    let mut out = vec![H3_NULL; size];
    let mut dist = vec![0i32; size];
    k_ring_distances(pent, k, &mut out, &mut dist).unwrap();

    let live = out.iter().filter(|&&h| h != H3_NULL).count();
    // A pentagon k-ring is smaller than a hexagon one: 1 + 5 + 10.
    assert_eq!(live, 16);
  }

  #[test]
  fn hex_range_fails_on_pentagon() {
    let pent = H3Index::new_cell(2, 4, Direction::Center);
    let mut out = vec![H3_NULL; max_kring_size(1)];
    assert_eq!(hex_range(pent, 1, &mut out), Err(H3Error::Pentagon));
  }

  #[test]
  fn hex_ring_matches_k_ring_band() {
    let origin = sf_cell(8);
    let k = 2;
    let mut ring = vec![H3_NULL; 6 * k as usize];
    hex_ring(origin, k, &mut ring).unwrap();
    assert_eq!(ring.iter().filter(|&&h| h != H3_NULL).count(), 12);

    let size = max_kring_size(k);
    let mut disk = vec![H3_NULL; size];
    let mut dist = vec![0i32; size];
    k_ring_distances(origin, k, &mut disk, &mut dist).unwrap();
    for h in &ring {
      let pos = disk.iter().position(|d| d == h).unwrap();
      assert_eq!(dist[pos], k);
    }
  }

  #[test]
  fn neighbors_have_grid_distance_one() {
    let origin = sf_cell(6);
    let mut out = vec![H3_NULL; max_kring_size(1)];
    k_ring(origin, 1, &mut out).unwrap();
    for &h in out.iter().filter(|&&h| h != H3_NULL && h != origin) {
      assert_eq!(crate::local_ij::h3_distance(origin, h), Ok(1));
    }
  }
}

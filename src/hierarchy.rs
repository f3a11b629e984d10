//! Hierarchy operations: parent, children, compaction.

use std::collections::HashMap;

use crate::constants::MAX_H3_RES;
use crate::math::ipow;
use crate::types::{Direction, H3Error, H3Index, H3_NULL};

/// Whether `child_res` is a legal child resolution of `parent_res`.
#[inline]
#[must_use]
fn is_valid_child_res(parent_res: i32, child_res: i32) -> bool {
  (parent_res..=MAX_H3_RES).contains(&child_res)
}

/// The unique ancestor of a cell at a coarser resolution.
///
/// Truncates the digit path: positions past the parent resolution become 7.
/// A cell is its own parent at its own resolution.
pub fn h3_to_parent(h: H3Index, parent_res: i32) -> Result<H3Index, H3Error> {
  let child_res = h.resolution();
  if !(0..=MAX_H3_RES).contains(&parent_res) {
    return Err(H3Error::ResDomain);
  }
  if parent_res > child_res {
    return Err(H3Error::ResMismatch);
  }
  if parent_res == child_res {
    return Ok(h);
  }

  let mut parent = h;
  parent.set_resolution(parent_res);
  for r in parent_res + 1..=child_res {
    parent.set_digit(r, Direction::InvalidDigit);
  }
  Ok(parent)
}

/// Upper bound on the number of children slots: `7^(child_res - res)`.
/// Pentagon cells leave their deleted-direction slots as `H3_NULL`.
pub fn max_h3_to_children_size(h: H3Index, child_res: i32) -> Result<usize, H3Error> {
  let res = h.resolution();
  if !is_valid_child_res(res, child_res) {
    return Err(H3Error::ResDomain);
  }
  Ok(ipow(7, i64::from(child_res - res)) as usize)
}

/// The direct child of a cell in the given digit slot.
#[must_use]
fn make_direct_child(h: H3Index, digit: Direction) -> H3Index {
  let mut child = h;
  let child_res = h.resolution() + 1;
  child.set_resolution(child_res);
  child.set_digit(child_res, digit);
  child
}

/// Enumerate all descendants at `child_res` in row-major digit order.
///
/// The output slice must hold `max_h3_to_children_size` entries; slots for
/// the deleted K direction under pentagons are filled with `H3_NULL`.
pub fn h3_to_children(h: H3Index, child_res: i32, out: &mut [H3Index]) -> Result<usize, H3Error> {
  let size = max_h3_to_children_size(h, child_res)?;
  if out.len() < size {
    return Err(H3Error::MemoryBounds);
  }
  fill_children(h, child_res, &mut out[..size]);
  Ok(size)
}

fn fill_children(h: H3Index, child_res: i32, out: &mut [H3Index]) {
  if h.resolution() == child_res {
    out[0] = h;
    return;
  }

  let step = out.len() / 7;
  let is_pent = h.is_pentagon();
  for digit in 0u8..7 {
    let chunk = &mut out[digit as usize * step..(digit as usize + 1) * step];
    if is_pent && digit == Direction::KAxes as u8 {
      chunk.fill(H3_NULL);
    } else {
      fill_children(make_direct_child(h, Direction::from_bits(digit)), child_res, chunk);
    }
  }
}

/// The descendant at `child_res` whose digit path is all centers.
pub fn h3_to_center_child(h: H3Index, child_res: i32) -> Result<H3Index, H3Error> {
  let res = h.resolution();
  if !is_valid_child_res(res, child_res) {
    return Err(H3Error::ResDomain);
  }

  let mut child = h;
  child.set_resolution(child_res);
  for r in res + 1..=child_res {
    child.set_digit(r, Direction::Center);
  }
  Ok(child)
}

/// Replace every complete sibling set in the input with its parent,
/// repeatedly, writing the minimal covering set.
///
/// All inputs must share one resolution and contain no duplicates; a
/// duplicate that overfills a parent is reported as `DuplicateInput`.
/// Returns the number of indexes written.
pub fn compact(h3_set: &[H3Index], out: &mut [H3Index]) -> Result<usize, H3Error> {
  let remaining: Vec<H3Index> = h3_set.iter().copied().filter(|&h| h != H3_NULL).collect();
  let Some(&first) = remaining.first() else {
    return Ok(0);
  };
  let res = first.resolution();
  if remaining.iter().any(|h| h.resolution() != res) {
    return Err(H3Error::ResMismatch);
  }

  let mut remaining = remaining;
  let mut written = 0usize;

  while !remaining.is_empty() {
    let res = remaining[0].resolution();
    if res == 0 {
      // Base cells have no parent; emit as-is.
      written = copy_out(&remaining, out, written)?;
      break;
    }
    let parent_res = res - 1;

    // Count children seen per parent. A complete set is 7 for a hexagon
    // parent, 6 for a pentagon (the K child does not exist).
    let mut child_counts: HashMap<H3Index, u32> = HashMap::with_capacity(remaining.len());
    for &h in &remaining {
      let parent = h3_to_parent(h, parent_res)?;
      let count = child_counts.entry(parent).or_insert(0);
      *count += 1;
      if *count > sibling_count(parent) {
        return Err(H3Error::DuplicateInput);
      }
    }

    // Children of incomplete parents are final output; complete parents
    // feed the next round.
    for &h in &remaining {
      let parent = h3_to_parent(h, parent_res)?;
      if child_counts[&parent] != sibling_count(parent) {
        written = copy_out(&[h], out, written)?;
      }
    }

    remaining = child_counts
      .into_iter()
      .filter(|&(parent, count)| count == sibling_count(parent))
      .map(|(parent, _)| parent)
      .collect();
  }

  Ok(written)
}

fn sibling_count(parent: H3Index) -> u32 {
  if parent.is_pentagon() {
    6
  } else {
    7
  }
}

fn copy_out(src: &[H3Index], out: &mut [H3Index], mut written: usize) -> Result<usize, H3Error> {
  for &h in src {
    if written >= out.len() {
      return Err(H3Error::MemoryBounds);
    }
    out[written] = h;
    written += 1;
  }
  Ok(written)
}

/// Upper bound on the output size of `uncompact` at resolution `res`.
pub fn max_uncompact_size(compacted: &[H3Index], res: i32) -> Result<usize, H3Error> {
  let mut size = 0i64;
  for &h in compacted {
    if h == H3_NULL {
      continue;
    }
    if !is_valid_child_res(h.resolution(), res) {
      return Err(H3Error::ResMismatch);
    }
    size += ipow(7, i64::from(res - h.resolution()));
  }
  Ok(size as usize)
}

/// Expand every input to its descendants at resolution `res`. Inputs finer
/// than `res` are an error. Returns the number of slots consumed
/// (including `H3_NULL` padding under pentagons).
pub fn uncompact(compacted: &[H3Index], res: i32, out: &mut [H3Index]) -> Result<usize, H3Error> {
  let mut offset = 0usize;
  for &h in compacted {
    if h == H3_NULL {
      continue;
    }
    if !is_valid_child_res(h.resolution(), res) {
      return Err(H3Error::ResMismatch);
    }
    let size = max_h3_to_children_size(h, res)?;
    if offset + size > out.len() {
      return Err(H3Error::MemoryBounds);
    }
    h3_to_children(h, res, &mut out[offset..offset + size])?;
    offset += size;
  }
  Ok(offset)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::geo::degs_to_rads;
  use crate::indexing::geo_to_h3;
  use crate::types::GeoCoord;

  fn sf_cell(res: i32) -> H3Index {
    let g = GeoCoord::new(degs_to_rads(37.7749), degs_to_rads(-122.4194));
    geo_to_h3(&g, res).unwrap()
  }

  #[test]
  fn parent_truncates_path() {
    let child = sf_cell(9);
    let parent = h3_to_parent(child, 8).unwrap();
    assert_eq!(parent.resolution(), 8);
    assert_eq!(parent, sf_cell(8));
    // A cell is its own parent at its own resolution.
    assert_eq!(h3_to_parent(child, 9).unwrap(), child);
    // Parent of parent commutes with direct ancestor.
    assert_eq!(h3_to_parent(child, 5).unwrap(), h3_to_parent(parent, 5).unwrap());
  }

  #[test]
  fn parent_rejects_bad_resolutions() {
    let h = sf_cell(5);
    assert_eq!(h3_to_parent(h, -1), Err(H3Error::ResDomain));
    assert_eq!(h3_to_parent(h, 6), Err(H3Error::ResMismatch));
  }

  #[test]
  fn children_round_trip_to_parent() {
    let h = sf_cell(6);
    let size = max_h3_to_children_size(h, 8).unwrap();
    assert_eq!(size, 49);
    let mut children = vec![H3_NULL; size];
    h3_to_children(h, 8, &mut children).unwrap();
    for &child in &children {
      assert_ne!(child, H3_NULL);
      assert!(child.is_valid());
      assert_eq!(h3_to_parent(child, 6).unwrap(), h);
    }
    // Children are distinct.
    let mut sorted = children.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), 49);
  }

  #[test]
  fn pentagon_children_skip_deleted_direction() {
    // Res 1 pentagon expanded two levels yields 5*7 + 6 = 41 live children.
    let pent = H3Index::new_cell(1, 4, Direction::Center);
    let size = max_h3_to_children_size(pent, 3).unwrap();
    assert_eq!(size, 49);
    let mut children = vec![H3_NULL; size];
    h3_to_children(pent, 3, &mut children).unwrap();

    let live: Vec<_> = children.iter().filter(|&&c| c != H3_NULL).collect();
    assert_eq!(live.len(), 41);
    for &&child in &live {
      assert!(child.is_valid());
      assert_eq!(h3_to_parent(child, 1).unwrap(), pent);
    }
  }

  #[test]
  fn center_child_is_first_child() {
    let h = sf_cell(4);
    let center = h3_to_center_child(h, 6).unwrap();
    assert_eq!(center.resolution(), 6);
    assert_eq!(h3_to_parent(center, 4).unwrap(), h);
    assert_eq!(center.digit(5), Direction::Center);
    assert_eq!(center.digit(6), Direction::Center);
  }

  #[test]
  fn compact_collapses_complete_sets() {
    let h = sf_cell(5);
    let size = max_h3_to_children_size(h, 7).unwrap();
    let mut children = vec![H3_NULL; size];
    h3_to_children(h, 7, &mut children).unwrap();

    let mut compacted = vec![H3_NULL; size];
    let n = compact(&children, &mut compacted).unwrap();
    assert_eq!(n, 1);
    assert_eq!(compacted[0], h);
  }

  #[test]
  fn compact_keeps_partial_sets() {
    let h = sf_cell(5);
    let mut children = vec![H3_NULL; 7];
    h3_to_children(h, 6, &mut children).unwrap();

    // Drop one child; nothing can collapse.
    let partial: Vec<H3Index> = children[1..].to_vec();
    let mut compacted = vec![H3_NULL; partial.len()];
    let n = compact(&partial, &mut compacted).unwrap();
    assert_eq!(n, 6);
    let mut got: Vec<_> = compacted[..n].to_vec();
    got.sort();
    let mut expected = partial.clone();
    expected.sort();
    assert_eq!(got, expected);
  }

  #[test]
  fn compact_detects_duplicates() {
    let h = sf_cell(5);
    let mut children = vec![H3_NULL; 7];
    h3_to_children(h, 6, &mut children).unwrap();
    let mut dup = children.clone();
    dup.push(children[0]);
    let mut out = vec![H3_NULL; dup.len()];
    assert_eq!(compact(&dup, &mut out), Err(H3Error::DuplicateInput));
  }

  #[test]
  fn uncompact_then_compact_is_stable() {
    let h = sf_cell(4);
    let set = [h];
    let size = max_uncompact_size(&set, 6).unwrap();
    assert_eq!(size, 49);
    let mut expanded = vec![H3_NULL; size];
    let n = uncompact(&set, 6, &mut expanded).unwrap();
    assert_eq!(n, 49);

    let mut recompacted = vec![H3_NULL; size];
    let m = compact(&expanded, &mut recompacted).unwrap();
    assert_eq!(m, 1);
    assert_eq!(recompacted[0], h);
  }

  #[test]
  fn uncompact_rejects_finer_input() {
    let h = sf_cell(7);
    let mut out = vec![H3_NULL; 1];
    assert_eq!(uncompact(&[h], 5, &mut out), Err(H3Error::ResMismatch));
  }

  #[test]
  fn pentagon_compact_round_trip() {
    let pent = H3Index::new_cell(2, 38, Direction::Center);
    let size = max_uncompact_size(&[pent], 4).unwrap();
    let mut expanded = vec![H3_NULL; size];
    uncompact(&[pent], 4, &mut expanded).unwrap();

    let mut recompacted = vec![H3_NULL; size];
    let m = compact(&expanded, &mut recompacted).unwrap();
    assert_eq!(m, 1);
    assert_eq!(recompacted[0], pent);
  }
}

//! Validity checks and grid census helpers.

use crate::base_cells::is_base_cell_pentagon;
use crate::constants::{H3_CELL_MODE, MAX_H3_RES, NUM_BASE_CELLS, NUM_PENTAGONS};
use crate::math::ipow;
use crate::types::{Direction, H3Index, H3_NULL};

impl H3Index {
  /// Whether this is a structurally valid, canonical cell index: zero high
  /// bit, cell mode, zero reserved bits, base cell and resolution in
  /// range, digits in the alphabet with all trailing positions 7, and no
  /// K-axis leading digit under a pentagon base cell.
  #[must_use]
  pub fn is_valid(self) -> bool {
    if self.high_bit() != 0 || self.mode() != H3_CELL_MODE || self.reserved_bits() != 0 {
      return false;
    }

    let base_cell = self.base_cell();
    if !(0..NUM_BASE_CELLS).contains(&base_cell) {
      return false;
    }

    let res = self.resolution();
    if !(0..=MAX_H3_RES).contains(&res) {
      return false;
    }

    let mut found_first_nonzero = false;
    for r in 1..=res {
      let digit = self.digit(r);
      if digit == Direction::InvalidDigit {
        return false;
      }
      if !found_first_nonzero && digit != Direction::Center {
        found_first_nonzero = true;
        // The deleted subsequence: K may not lead under a pentagon.
        if is_base_cell_pentagon(base_cell) && digit == Direction::KAxes {
          return false;
        }
      }
    }

    for r in res + 1..=MAX_H3_RES {
      if self.digit(r) != Direction::InvalidDigit {
        return false;
      }
    }

    true
  }

  /// Whether this cell is a pentagon: a pentagon base cell with an
  /// all-centers digit path.
  #[must_use]
  pub fn is_pentagon(self) -> bool {
    is_base_cell_pentagon(self.base_cell()) && self.leading_non_zero_digit() == Direction::Center
  }
}

/// Number of unique cells at a resolution: `2 + 120 * 7^res`.
#[must_use]
pub fn num_hexagons(res: i32) -> i64 {
  2 + 120 * ipow(7, i64::from(res))
}

/// Number of resolution 0 cells.
#[must_use]
pub fn res0_index_count() -> i32 {
  NUM_BASE_CELLS
}

/// All resolution 0 cell indexes, in base cell order. The output slice must
/// hold `res0_index_count()` entries.
pub fn get_res0_indexes(out: &mut [H3Index]) {
  for (bc, slot) in out.iter_mut().enumerate().take(NUM_BASE_CELLS as usize) {
    *slot = H3Index::new_cell(0, bc as i32, Direction::Center);
  }
}

/// Number of pentagons per resolution.
#[must_use]
pub fn pentagon_index_count() -> i32 {
  NUM_PENTAGONS
}

/// All pentagon cells at the given resolution. The output slice must hold
/// `pentagon_index_count()` entries. Fails silently (fills `H3_NULL`) on an
/// out-of-range resolution.
pub fn get_pentagon_indexes(res: i32, out: &mut [H3Index]) {
  let mut slot = 0;
  for bc in 0..NUM_BASE_CELLS {
    if slot >= out.len() {
      break;
    }
    if is_base_cell_pentagon(bc) {
      out[slot] = if (0..=MAX_H3_RES).contains(&res) {
        H3Index::new_cell(res, bc, Direction::Center)
      } else {
        H3_NULL
      };
      slot += 1;
    }
  }
}

//! The 64-bit index codec.
//!
//! Bit fields, high to low: 1 reserved high bit (0), 4 mode bits, 3
//! reserved bits (edge direction / vertex number), 4 resolution bits, 7
//! base cell bits, then fifteen 3-bit digits with the coarsest digit first.
//! Digit positions finer than the index resolution hold 7.

pub mod inspection;
pub mod strings;

use crate::constants::{
  H3_BC_MASK, H3_BC_OFFSET, H3_CELL_MODE, H3_DIGIT_MASK, H3_HIGH_BIT_MASK, H3_INIT, H3_MODE_MASK, H3_MODE_OFFSET,
  H3_PER_DIGIT_OFFSET, H3_RESERVED_MASK, H3_RESERVED_OFFSET, H3_RES_MASK, H3_RES_OFFSET, MAX_H3_RES,
};
use crate::types::{Direction, H3Index};

/// Whether a resolution is Class III (odd), i.e. rotated `M_AP7_ROT_RADS`
/// counter-clockwise relative to the icosahedron face axes.
#[inline]
#[must_use]
pub const fn is_res_class_iii(res: i32) -> bool {
  res % 2 == 1
}

impl H3Index {
  /// Construct a cell index with every digit from 1 to `res` set to
  /// `init_digit` and the remaining digit positions filled with 7.
  #[must_use]
  pub fn new_cell(res: i32, base_cell: i32, init_digit: Direction) -> Self {
    let mut h = H3Index(H3_INIT);
    h.set_mode(H3_CELL_MODE);
    h.set_resolution(res);
    h.set_base_cell(base_cell);
    for r in 1..=res {
      h.set_digit(r, init_digit);
    }
    h
  }

  /// The index mode (1 = cell, 2 = directed edge, 4 = vertex).
  #[inline]
  #[must_use]
  pub const fn mode(self) -> u8 {
    ((self.0 & H3_MODE_MASK) >> H3_MODE_OFFSET) as u8
  }

  #[inline]
  pub fn set_mode(&mut self, mode: u8) {
    self.0 = (self.0 & !H3_MODE_MASK) | ((mode as u64) << H3_MODE_OFFSET);
  }

  /// The resolution, 0..=15.
  #[inline]
  #[must_use]
  pub const fn resolution(self) -> i32 {
    ((self.0 & H3_RES_MASK) >> H3_RES_OFFSET) as i32
  }

  #[inline]
  pub fn set_resolution(&mut self, res: i32) {
    self.0 = (self.0 & !H3_RES_MASK) | ((res as u64) << H3_RES_OFFSET);
  }

  /// The base cell number, 0..=121 in a valid index.
  #[inline]
  #[must_use]
  pub const fn base_cell(self) -> i32 {
    ((self.0 & H3_BC_MASK) >> H3_BC_OFFSET) as i32
  }

  #[inline]
  pub fn set_base_cell(&mut self, base_cell: i32) {
    self.0 = (self.0 & !H3_BC_MASK) | ((base_cell as u64) << H3_BC_OFFSET);
  }

  /// The reserved bits: 0 for cells, the direction for directed edges, the
  /// vertex number for vertex indexes.
  #[inline]
  #[must_use]
  pub const fn reserved_bits(self) -> u8 {
    ((self.0 & H3_RESERVED_MASK) >> H3_RESERVED_OFFSET) as u8
  }

  #[inline]
  pub fn set_reserved_bits(&mut self, v: u8) {
    self.0 = (self.0 & !H3_RESERVED_MASK) | ((v as u64) << H3_RESERVED_OFFSET);
  }

  /// The reserved high bit, always 0 in a valid index.
  #[inline]
  #[must_use]
  pub const fn high_bit(self) -> u8 {
    ((self.0 & H3_HIGH_BIT_MASK) >> 63) as u8
  }

  #[inline]
  pub fn set_high_bit(&mut self, v: u8) {
    self.0 = (self.0 & !H3_HIGH_BIT_MASK) | ((v as u64) << 63);
  }

  /// The digit at resolution level `res` (1-based).
  #[inline]
  #[must_use]
  pub fn digit(self, res: i32) -> Direction {
    let shift = (MAX_H3_RES - res) as u32 * H3_PER_DIGIT_OFFSET;
    Direction::from_bits(((self.0 >> shift) & H3_DIGIT_MASK) as u8)
  }

  /// Set the digit at resolution level `res` (1-based).
  #[inline]
  pub fn set_digit(&mut self, res: i32, digit: Direction) {
    let shift = (MAX_H3_RES - res) as u32 * H3_PER_DIGIT_OFFSET;
    self.0 = (self.0 & !(H3_DIGIT_MASK << shift)) | ((digit as u64) << shift);
  }

  /// Whether this index's resolution is Class III.
  #[inline]
  #[must_use]
  pub fn is_res_class_iii(self) -> bool {
    is_res_class_iii(self.resolution())
  }

  /// The coarsest non-center digit, which fixes a pentagon descendant's
  /// orientation. `Center` if the whole path is centers.
  #[must_use]
  pub fn leading_non_zero_digit(self) -> Direction {
    for r in 1..=self.resolution() {
      let digit = self.digit(r);
      if digit != Direction::Center {
        return digit;
      }
    }
    Direction::Center
  }

  /// Rotate the digit path 60 degrees counter-clockwise.
  #[must_use]
  pub(crate) fn rotate60_ccw(mut self) -> Self {
    for r in 1..=self.resolution() {
      self.set_digit(r, self.digit(r).rotate60_ccw());
    }
    self
  }

  /// Rotate the digit path 60 degrees clockwise.
  #[must_use]
  pub(crate) fn rotate60_cw(mut self) -> Self {
    for r in 1..=self.resolution() {
      self.set_digit(r, self.digit(r).rotate60_cw());
    }
    self
  }

  /// Rotate a pentagon-rooted digit path 60 degrees counter-clockwise,
  /// rotating once more if the leading digit lands on the deleted K axis.
  #[must_use]
  pub(crate) fn rotate_pent60_ccw(mut self) -> Self {
    let mut found_first_nonzero = false;
    for r in 1..=self.resolution() {
      self.set_digit(r, self.digit(r).rotate60_ccw());

      if !found_first_nonzero && self.digit(r) != Direction::Center {
        found_first_nonzero = true;
        if self.leading_non_zero_digit() == Direction::KAxes {
          self = self.rotate60_ccw();
        }
      }
    }
    self
  }

  /// Clockwise counterpart of `rotate_pent60_ccw`.
  #[must_use]
  pub(crate) fn rotate_pent60_cw(mut self) -> Self {
    let mut found_first_nonzero = false;
    for r in 1..=self.resolution() {
      self.set_digit(r, self.digit(r).rotate60_cw());

      if !found_first_nonzero && self.digit(r) != Direction::Center {
        found_first_nonzero = true;
        if self.leading_non_zero_digit() == Direction::KAxes {
          self = self.rotate60_cw();
        }
      }
    }
    self
  }
}

//! Grid system and bit-layout constants.
//!
//! The named boundary constants (`MAX_H3_RES`, `NUM_BASE_CELLS`,
//! `RES0_U_GNOMONIC`, ...) are a compatibility surface and must match the
//! reference values bit-for-bit.

use std::f64::consts;

/// 2 * pi.
pub const M_2PI: f64 = 2.0 * consts::PI;

/// General-purpose floating point comparison threshold.
pub const EPSILON: f64 = 0.000_000_000_000_000_1;
/// Floating point comparison threshold in degrees (~0.1 mm).
pub const EPSILON_DEG: f64 = 0.000_000_001;
/// Floating point comparison threshold in radians (~0.1 mm).
pub const EPSILON_RAD: f64 = EPSILON_DEG * consts::PI / 180.0;

/// sin(60 degrees).
pub const M_SIN60: f64 = 0.866_025_403_784_438_6;

/// sqrt(7); the linear scale ratio between adjacent resolutions.
pub const M_SQRT7: f64 = 2.645_751_311_064_590_590_501_615_753_639_260_425_7;
/// 1 / sqrt(7).
pub const M_RSQRT7: f64 = 1.0 / M_SQRT7;

/// Rotation angle between Class II and Class III resolution axes,
/// asin(sqrt(3/28)).
pub const M_AP7_ROT_RADS: f64 = 0.333_473_172_251_832_11;

/// Scaling factor from the resolution 0 unit hex length to gnomonic unit
/// length (the planar distance between adjacent cell centers at res 0).
pub const RES0_U_GNOMONIC: f64 = 0.381_966_011_250_105_000_03;
/// 1 / RES0_U_GNOMONIC.
pub const INV_RES0_U_GNOMONIC: f64 = 1.0 / RES0_U_GNOMONIC;

/// Earth authalic radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.007_180_918_475;

/// Finest grid resolution. The grid has 16 resolutions, 0 through 15.
pub const MAX_H3_RES: i32 = 15;
/// Number of faces on the icosahedron.
pub const NUM_ICOSA_FACES: i32 = 20;
/// Number of resolution 0 cells.
pub const NUM_BASE_CELLS: i32 = 122;
/// Number of pentagons per resolution.
pub const NUM_PENTAGONS: i32 = 12;
/// Vertices in a hexagon.
pub const NUM_HEX_VERTS: usize = 6;
/// Topological vertices in a pentagon.
pub const NUM_PENT_VERTS: usize = 5;
/// Worst-case boundary vertex count: a pentagon with five distortion
/// vertices.
pub const MAX_CELL_BNDRY_VERTS: usize = 10;

/// Marker for an invalid icosahedron face.
pub const INVALID_FACE: i32 = -1;
/// Marker for an invalid rotation count.
pub const INVALID_ROTATIONS: i32 = -1;

// 64-bit index layout, high bit to low:
//   1 reserved (0) | 4 mode | 3 reserved/direction/vertex | 4 resolution |
//   7 base cell | 15 x 3-bit digits.

/// Bit offset of the mode field.
pub const H3_MODE_OFFSET: u32 = 59;
/// Bit offset of the reserved field (edge direction / vertex number).
pub const H3_RESERVED_OFFSET: u32 = 56;
/// Bit offset of the resolution field.
pub const H3_RES_OFFSET: u32 = 52;
/// Bit offset of the base cell field.
pub const H3_BC_OFFSET: u32 = 45;
/// Width in bits of a single resolution digit.
pub const H3_PER_DIGIT_OFFSET: u32 = 3;

/// The lone high bit; always 0 in a valid index.
pub const H3_HIGH_BIT_MASK: u64 = 1 << 63;
/// The 4 mode bits.
pub const H3_MODE_MASK: u64 = 0b1111 << H3_MODE_OFFSET;
/// The 3 reserved bits.
pub const H3_RESERVED_MASK: u64 = 0b111 << H3_RESERVED_OFFSET;
/// The 4 resolution bits.
pub const H3_RES_MASK: u64 = 0b1111 << H3_RES_OFFSET;
/// The 7 base cell bits.
pub const H3_BC_MASK: u64 = 0b111_1111 << H3_BC_OFFSET;
/// The 3 bits of a single digit, unshifted.
pub const H3_DIGIT_MASK: u64 = 0b111;

/// Index modes.
pub const H3_CELL_MODE: u8 = 1;
pub const H3_EDGE_MODE: u8 = 2;
pub const H3_VERTEX_MODE: u8 = 4;

/// Blank index template: mode 0, resolution 0, base cell 0, every digit 7.
/// Constructors start here and write the fields they need.
pub const H3_INIT: u64 = 0x0000_1fff_ffff_ffff;

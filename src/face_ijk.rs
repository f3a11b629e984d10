//! Cells as offsets on icosahedron faces.
//!
//! A `FaceIJK` pins a cell to one of the 20 faces with an IJK offset in the
//! face-centered coordinate system. Geographic points come in through a
//! gnomonic projection about the nearest face center; coordinates that fall
//! past a face edge ("overage") are re-expressed on the adjacent face.
//! Cell vertices are located on a finer aperture 3 substrate grid.

use crate::constants::{
  EPSILON, INV_RES0_U_GNOMONIC, MAX_H3_RES, M_AP7_ROT_RADS, M_RSQRT7, M_SIN60, M_SQRT7, NUM_HEX_VERTS,
  NUM_ICOSA_FACES, NUM_PENT_VERTS, RES0_U_GNOMONIC,
};
use crate::geo::pos_angle_rads;
use crate::index::is_res_class_iii;
use crate::types::{CoordIJK, FaceIJK, GeoBoundary, GeoCoord, Vec2d, Vec3d};

/// Face quadrant indices into `FACE_NEIGHBORS`.
pub(crate) const IJ_QUADRANT: usize = 1;
pub(crate) const KI_QUADRANT: usize = 2;
pub(crate) const JK_QUADRANT: usize = 3;

/// Icosahedron face centers in lat/lon radians.
#[rustfmt::skip]
pub(crate) static FACE_CENTER_GEO: [GeoCoord; NUM_ICOSA_FACES as usize] = [
  GeoCoord { lat: 0.803_582_649_718_989_942, lon: 1.248_397_419_617_396_099 },  // face 0
  GeoCoord { lat: 1.307_747_883_455_638_156, lon: 2.536_945_009_877_921_159 },  // face 1
  GeoCoord { lat: 1.054_751_253_523_952_054, lon: -1.347_517_358_900_396_623 }, // face 2
  GeoCoord { lat: 0.600_191_595_538_186_799, lon: -0.450_603_909_469_755_746 }, // face 3
  GeoCoord { lat: 0.491_715_428_198_773_866, lon: 0.401_988_202_911_306_943 },  // face 4
  GeoCoord { lat: 0.172_745_327_415_618_701, lon: 1.678_146_885_280_433_686 },  // face 5
  GeoCoord { lat: 0.605_929_321_571_350_690, lon: 2.953_923_329_812_411_617 },  // face 6
  GeoCoord { lat: 0.427_370_518_328_979_641, lon: -1.888_876_200_336_285_401 }, // face 7
  GeoCoord { lat: -0.079_066_118_549_212_831, lon: -0.733_429_513_380_867_741 },// face 8
  GeoCoord { lat: -0.230_961_644_455_383_637, lon: 0.506_495_587_332_349_035 }, // face 9
  GeoCoord { lat: 0.079_066_118_549_212_831, lon: 2.408_163_140_208_925_497 }, // face 10
  GeoCoord { lat: 0.230_961_644_455_383_637, lon: -2.635_097_066_257_444_203 },// face 11
  GeoCoord { lat: -0.172_745_327_415_618_701, lon: -1.463_445_768_309_359_553 },// face 12
  GeoCoord { lat: -0.605_929_321_571_350_690, lon: -0.187_669_323_777_381_622 },// face 13
  GeoCoord { lat: -0.427_370_518_328_979_641, lon: 1.252_716_453_253_507_838 },// face 14
  GeoCoord { lat: -0.600_191_595_538_186_799, lon: 2.690_988_744_120_037_492 },// face 15
  GeoCoord { lat: -0.491_715_428_198_773_866, lon: -2.739_604_450_678_486_295 },// face 16
  GeoCoord { lat: -0.803_582_649_718_989_942, lon: -1.893_195_233_972_397_139 },// face 17
  GeoCoord { lat: -1.307_747_883_455_638_156, lon: -0.604_647_643_711_872_080 },// face 18
  GeoCoord { lat: -1.054_751_253_523_952_054, lon: 1.794_075_294_689_396_615 },// face 19
];

/// Icosahedron face centers as unit 3-vectors.
#[rustfmt::skip]
static FACE_CENTER_POINT: [Vec3d; NUM_ICOSA_FACES as usize] = [
  Vec3d { x: 0.219_930_779_140_460_6,   y: 0.658_369_178_027_499_6,   z: 0.719_847_537_892_618_2 },   // face 0
  Vec3d { x: -0.213_923_483_450_142_1,  y: 0.147_817_182_955_070_3,   z: 0.965_601_793_521_420_5 },   // face 1
  Vec3d { x: 0.109_262_527_878_479_7,   y: -0.481_195_157_287_321_0,  z: 0.869_777_512_128_725_3 },   // face 2
  Vec3d { x: 0.742_856_730_158_679_1,   y: -0.359_394_167_827_802_8,  z: 0.564_800_593_651_703_3 },   // face 3
  Vec3d { x: 0.811_253_470_914_096_9,   y: 0.344_895_323_763_938_4,   z: 0.472_138_773_641_393_0 },   // face 4
  Vec3d { x: -0.105_549_814_961_392_1,  y: 0.979_445_729_641_141_3,   z: 0.171_887_461_000_936_5 },   // face 5
  Vec3d { x: -0.807_540_757_997_009_2,  y: 0.153_355_248_589_881_8,   z: 0.569_526_199_488_268_8 },   // face 6
  Vec3d { x: -0.284_614_806_978_790_7,  y: -0.864_408_097_265_420_6,  z: 0.414_479_255_247_354_0 },   // face 7
  Vec3d { x: 0.740_562_147_385_448_2,   y: -0.667_329_956_456_552_4,  z: -0.078_983_764_632_673_77 }, // face 8
  Vec3d { x: 0.851_230_398_647_429_3,   y: 0.472_234_378_858_268_1,   z: -0.228_913_738_868_780_8 },  // face 9
  Vec3d { x: -0.740_562_147_385_448_1,  y: 0.667_329_956_456_552_4,   z: 0.078_983_764_632_673_77 },  // face 10
  Vec3d { x: -0.851_230_398_647_429_2,  y: -0.472_234_378_858_268_2,  z: 0.228_913_738_868_780_8 },   // face 11
  Vec3d { x: 0.105_549_814_961_391_9,   y: -0.979_445_729_641_141_3,  z: -0.171_887_461_000_936_5 },  // face 12
  Vec3d { x: 0.807_540_757_997_009_2,   y: -0.153_355_248_589_881_9,  z: -0.569_526_199_488_268_8 },  // face 13
  Vec3d { x: 0.284_614_806_978_790_8,   y: 0.864_408_097_265_420_4,   z: -0.414_479_255_247_354_0 },  // face 14
  Vec3d { x: -0.742_856_730_158_679_1,  y: 0.359_394_167_827_802_7,   z: -0.564_800_593_651_703_3 },  // face 15
  Vec3d { x: -0.811_253_470_914_097_1,  y: -0.344_895_323_763_938_2,  z: -0.472_138_773_641_393_0 },  // face 16
  Vec3d { x: -0.219_930_779_140_460_7,  y: -0.658_369_178_027_499_6,  z: -0.719_847_537_892_618_2 },  // face 17
  Vec3d { x: 0.213_923_483_450_142_0,   y: -0.147_817_182_955_070_4,  z: -0.965_601_793_521_420_5 },  // face 18
  Vec3d { x: -0.109_262_527_878_479_6,  y: 0.481_195_157_287_321_0,   z: -0.869_777_512_128_725_3 },  // face 19
];

/// Azimuth in radians from each face center to its vertices 0, 1, 2
/// (the Class II i, j, k axes).
#[rustfmt::skip]
static FACE_AXES_AZ_RADS_CII: [[f64; 3]; NUM_ICOSA_FACES as usize] = [
  [5.619_958_268_523_939_882, 3.525_563_166_130_744_542, 1.431_168_063_737_548_730],  // face 0
  [5.760_339_081_714_187_279, 3.665_943_979_320_991_689, 1.571_548_876_927_796_127],  // face 1
  [0.780_213_654_393_430_055, 4.969_003_859_179_821_079, 2.874_608_756_786_625_655],  // face 2
  [0.430_469_363_979_999_913, 4.619_259_568_766_391_033, 2.524_864_466_373_195_467],  // face 3
  [6.130_269_123_335_110_658, 4.035_874_020_941_915_804, 1.941_478_918_548_720_291],  // face 4
  [2.692_877_706_530_642_877, 0.598_482_604_137_447_119, 4.787_272_808_923_838_195],  // face 5
  [2.982_963_003_477_243_874, 0.888_567_901_084_048_369, 5.077_358_105_870_438_581],  // face 6
  [3.532_912_002_790_141_181, 1.438_516_900_396_945_656, 5.627_307_105_183_335_890],  // face 7
  [3.494_305_004_259_568_154, 1.399_909_901_866_372_864, 5.588_700_106_652_763_840],  // face 8
  [3.003_214_169_499_538_391, 0.908_819_067_106_342_928, 5.097_609_271_892_733_906],  // face 9
  [5.930_472_956_509_811_562, 3.836_077_854_116_616_049, 1.741_682_751_723_420_374],  // face 10
  [0.138_378_484_090_254_847, 4.327_168_688_876_645_809, 2.232_773_586_483_450_311],  // face 11
  [0.448_714_947_059_150_361, 4.637_505_151_845_541_521, 2.543_110_049_452_346_120],  // face 12
  [0.158_629_650_112_549_365, 4.347_419_854_898_940_135, 2.253_024_752_505_744_869],  // face 13
  [5.891_865_957_979_238_535, 3.797_470_855_586_043_358, 1.703_075_753_192_847_583],  // face 14
  [2.711_123_289_609_793_325, 0.616_728_187_216_597_620, 4.805_518_392_002_988_683],  // face 15
  [3.294_508_837_434_268_316, 1.200_113_735_041_072_948, 5.388_903_939_827_463_911],  // face 16
  [3.804_819_692_245_439_833, 1.710_424_589_852_244_509, 5.899_214_794_638_635_928],  // face 17
  [3.664_438_879_055_192_436, 1.570_043_776_661_997_111, 5.758_833_981_448_388_530],  // face 18
  [2.361_378_999_196_363_184, 0.266_983_896_803_167_583, 4.455_774_101_589_558_636],  // face 19
];

/// Orientation of an adjacent face relative to the current one: the face
/// number, the resolution 0 translation, and the CCW rotations to apply
/// when crossing onto it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FaceOrientIJK {
  pub face: i32,
  pub translate: CoordIJK,
  pub ccw_rot60: i32,
}

const fn orient(face: i32, i: i32, j: i32, k: i32, ccw_rot60: i32) -> FaceOrientIJK {
  FaceOrientIJK {
    face,
    translate: CoordIJK { i, j, k },
    ccw_rot60,
  }
}

/// Neighboring face orientations, indexed by face and quadrant
/// (central, IJ, KI, JK).
#[rustfmt::skip]
pub(crate) static FACE_NEIGHBORS: [[FaceOrientIJK; 4]; NUM_ICOSA_FACES as usize] = [
  [orient(0, 0, 0, 0, 0),  orient(4, 2, 0, 2, 1),  orient(1, 2, 2, 0, 5),  orient(5, 0, 2, 2, 3)],  // face 0
  [orient(1, 0, 0, 0, 0),  orient(0, 2, 0, 2, 1),  orient(2, 2, 2, 0, 5),  orient(6, 0, 2, 2, 3)],  // face 1
  [orient(2, 0, 0, 0, 0),  orient(1, 2, 0, 2, 1),  orient(3, 2, 2, 0, 5),  orient(7, 0, 2, 2, 3)],  // face 2
  [orient(3, 0, 0, 0, 0),  orient(2, 2, 0, 2, 1),  orient(4, 2, 2, 0, 5),  orient(8, 0, 2, 2, 3)],  // face 3
  [orient(4, 0, 0, 0, 0),  orient(3, 2, 0, 2, 1),  orient(0, 2, 2, 0, 5),  orient(9, 0, 2, 2, 3)],  // face 4
  [orient(5, 0, 0, 0, 0),  orient(10, 2, 2, 0, 3), orient(14, 2, 0, 2, 3), orient(0, 0, 2, 2, 3)],  // face 5
  [orient(6, 0, 0, 0, 0),  orient(11, 2, 2, 0, 3), orient(10, 2, 0, 2, 3), orient(1, 0, 2, 2, 3)],  // face 6
  [orient(7, 0, 0, 0, 0),  orient(12, 2, 2, 0, 3), orient(11, 2, 0, 2, 3), orient(2, 0, 2, 2, 3)],  // face 7
  [orient(8, 0, 0, 0, 0),  orient(13, 2, 2, 0, 3), orient(12, 2, 0, 2, 3), orient(3, 0, 2, 2, 3)],  // face 8
  [orient(9, 0, 0, 0, 0),  orient(14, 2, 2, 0, 3), orient(13, 2, 0, 2, 3), orient(4, 0, 2, 2, 3)],  // face 9
  [orient(10, 0, 0, 0, 0), orient(5, 2, 2, 0, 3),  orient(6, 2, 0, 2, 3),  orient(15, 0, 2, 2, 3)], // face 10
  [orient(11, 0, 0, 0, 0), orient(6, 2, 2, 0, 3),  orient(7, 2, 0, 2, 3),  orient(16, 0, 2, 2, 3)], // face 11
  [orient(12, 0, 0, 0, 0), orient(7, 2, 2, 0, 3),  orient(8, 2, 0, 2, 3),  orient(17, 0, 2, 2, 3)], // face 12
  [orient(13, 0, 0, 0, 0), orient(8, 2, 2, 0, 3),  orient(9, 2, 0, 2, 3),  orient(18, 0, 2, 2, 3)], // face 13
  [orient(14, 0, 0, 0, 0), orient(9, 2, 2, 0, 3),  orient(5, 2, 0, 2, 3),  orient(19, 0, 2, 2, 3)], // face 14
  [orient(15, 0, 0, 0, 0), orient(16, 2, 0, 2, 1), orient(19, 2, 2, 0, 5), orient(10, 0, 2, 2, 3)], // face 15
  [orient(16, 0, 0, 0, 0), orient(17, 2, 0, 2, 1), orient(15, 2, 2, 0, 5), orient(11, 0, 2, 2, 3)], // face 16
  [orient(17, 0, 0, 0, 0), orient(18, 2, 0, 2, 1), orient(16, 2, 2, 0, 5), orient(12, 0, 2, 2, 3)], // face 17
  [orient(18, 0, 0, 0, 0), orient(19, 2, 0, 2, 1), orient(17, 2, 2, 0, 5), orient(13, 0, 2, 2, 3)], // face 18
  [orient(19, 0, 0, 0, 0), orient(15, 2, 0, 2, 1), orient(18, 2, 2, 0, 5), orient(14, 0, 2, 2, 3)], // face 19
];

/// Quadrant direction from one face to an adjacent face, derived from
/// `FACE_NEIGHBORS`, or -1 if the faces are not adjacent.
#[must_use]
pub(crate) fn adjacent_face_dir(from: i32, to: i32) -> i32 {
  for quadrant in 0..4 {
    if FACE_NEIGHBORS[from as usize][quadrant].face == to {
      return quadrant as i32;
    }
  }
  -1
}

/// Largest IJK component sum on a face by Class II resolution; odd slots
/// are unused (Class III resolutions look up res + 1).
#[rustfmt::skip]
static MAX_DIM_BY_CII_RES: [i32; (MAX_H3_RES + 2) as usize] = [
  2, -1, 14, -1, 98, -1, 686, -1, 4802, -1, 33_614, -1, 235_298, -1, 1_647_086, -1, 11_529_602,
];

/// Resolution 0 unit length in finer Class II resolution units; odd slots
/// unused as above.
#[rustfmt::skip]
static UNIT_SCALE_BY_CII_RES: [i32; (MAX_H3_RES + 2) as usize] = [
  1, -1, 7, -1, 49, -1, 343, -1, 2401, -1, 16_807, -1, 117_649, -1, 823_543, -1, 5_764_801,
];

/// Result of an overage adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Overage {
  /// Coordinate lies on the original face.
  NoOverage,
  /// Coordinate lies exactly on a face edge (substrate grids only).
  FaceEdge,
  /// Coordinate moved onto the interior of an adjacent face.
  NewFace,
}

/// Substrate offsets of the six hexagon vertices around a Class II cell
/// center, counter-clockwise from the i-axis. Reached by the aperture
/// sequence 3, 3r.
#[rustfmt::skip]
static VERTS_CII: [CoordIJK; NUM_HEX_VERTS] = [
  CoordIJK { i: 2, j: 1, k: 0 },
  CoordIJK { i: 1, j: 2, k: 0 },
  CoordIJK { i: 0, j: 2, k: 1 },
  CoordIJK { i: 0, j: 1, k: 2 },
  CoordIJK { i: 1, j: 0, k: 2 },
  CoordIJK { i: 2, j: 0, k: 1 },
];

/// Substrate offsets of the six hexagon vertices around a Class III cell
/// center, reached by the aperture sequence 3, 3r, 7r.
#[rustfmt::skip]
static VERTS_CIII: [CoordIJK; NUM_HEX_VERTS] = [
  CoordIJK { i: 5, j: 4, k: 0 },
  CoordIJK { i: 1, j: 5, k: 0 },
  CoordIJK { i: 0, j: 5, k: 4 },
  CoordIJK { i: 0, j: 1, k: 5 },
  CoordIJK { i: 4, j: 0, k: 5 },
  CoordIJK { i: 5, j: 0, k: 1 },
];

/// Find the icosahedron face nearest the point, and the squared Euclidean
/// distance from its center.
fn nearest_face(g: &GeoCoord) -> (i32, f64) {
  let v3d = g.to_vec3d();

  let mut face = 0;
  let mut sqd = 5.0;
  for (f, center) in FACE_CENTER_POINT.iter().enumerate() {
    let d = center.square_dist(&v3d);
    if d < sqd {
      face = f as i32;
      sqd = d;
    }
  }
  (face, sqd)
}

/// Project a geographic point into hex2d coordinates on the nearest face at
/// the given resolution. Returns the face and the planar coordinate.
fn geo_to_hex2d(g: &GeoCoord, res: i32) -> (i32, Vec2d) {
  let (face, sqd) = nearest_face(g);

  // Great-circle distance from the face center.
  let r = (1.0 - sqd / 2.0).clamp(-1.0, 1.0).acos();
  if r < EPSILON {
    return (face, Vec2d::default());
  }

  // Angle from the face's i-axis, counter-clockwise.
  let az = FACE_CENTER_GEO[face as usize].azimuth_rads(g);
  let mut theta = pos_angle_rads(FACE_AXES_AZ_RADS_CII[face as usize][0] - pos_angle_rads(az));

  // Class III grids are rotated relative to the face axes.
  if is_res_class_iii(res) {
    theta = pos_angle_rads(theta - M_AP7_ROT_RADS);
  }

  // Gnomonic scaling, then into hex2d units at the target resolution.
  let mut r = r.tan() * INV_RES0_U_GNOMONIC;
  for _ in 0..res {
    r *= M_SQRT7;
  }

  (face, Vec2d::new(r * theta.cos(), r * theta.sin()))
}

/// Unproject a hex2d coordinate on a face back to a geographic point.
/// `substrate` marks coordinates on the aperture 3 vertex grid.
fn hex2d_to_geo(v: &Vec2d, face: i32, res: i32, substrate: bool) -> GeoCoord {
  let mut r = v.mag();
  if r < EPSILON {
    return FACE_CENTER_GEO[face as usize];
  }

  let mut theta = v.y.atan2(v.x);

  // Scale back to res 0 units.
  for _ in 0..res {
    r *= M_RSQRT7;
  }
  if substrate {
    // Substrate grids sit an extra aperture 3 (and 7r for Class III) down.
    r /= 3.0;
    if is_res_class_iii(res) {
      r *= M_RSQRT7;
    }
  }

  r = (r * RES0_U_GNOMONIC).atan();

  if !substrate && is_res_class_iii(res) {
    theta = pos_angle_rads(theta + M_AP7_ROT_RADS);
  }

  let az = pos_angle_rads(FACE_AXES_AZ_RADS_CII[face as usize][0] - theta);
  FACE_CENTER_GEO[face as usize].at_az_distance_rads(az, r)
}

impl FaceIJK {
  /// Locate the containing cell of a geographic point at the given
  /// resolution.
  #[must_use]
  pub(crate) fn from_geo(g: &GeoCoord, res: i32) -> Self {
    let (face, v) = geo_to_hex2d(g, res);
    FaceIJK {
      face,
      coord: v.to_coord_ijk(),
    }
  }

  /// Center point of this cell at the given resolution.
  #[must_use]
  pub(crate) fn to_geo(&self, res: i32) -> GeoCoord {
    hex2d_to_geo(&self.coord.to_hex2d(), self.face, res, false)
  }

  /// Re-express the coordinate on the adjacent face if it has spilled over
  /// the edge of its current face.
  ///
  /// `pent_leading_4` marks a pentagon cell whose leading digit is 4: its
  /// KI quadrant must first jump across the deleted subsequence (translate
  /// to the corner, rotate 60 degrees clockwise, translate back).
  /// `substrate` triples the face dimension for the vertex grid.
  pub(crate) fn adjust_overage_class_ii(&mut self, res: i32, pent_leading_4: bool, substrate: bool) -> Overage {
    let mut max_dim = MAX_DIM_BY_CII_RES[res as usize];
    if substrate {
      max_dim *= 3;
    }

    let sum = self.coord.i + self.coord.j + self.coord.k;
    if substrate && sum == max_dim {
      return Overage::FaceEdge;
    }
    if sum <= max_dim {
      return Overage::NoOverage;
    }

    let orientation = if self.coord.k > 0 {
      if self.coord.j > 0 {
        &FACE_NEIGHBORS[self.face as usize][JK_QUADRANT]
      } else {
        // KI quadrant
        if pent_leading_4 {
          // Jump across the deleted k subsequence: rotate about the corner.
          let corner = CoordIJK::new(max_dim, 0, 0);
          let mut shifted = self.coord - corner;
          shifted.rotate60_cw();
          self.coord = shifted + corner;
        }
        &FACE_NEIGHBORS[self.face as usize][KI_QUADRANT]
      }
    } else {
      &FACE_NEIGHBORS[self.face as usize][IJ_QUADRANT]
    };

    self.face = orientation.face;

    for _ in 0..orientation.ccw_rot60 {
      self.coord.rotate60_ccw();
    }

    let mut unit_scale = UNIT_SCALE_BY_CII_RES[res as usize];
    if substrate {
      unit_scale *= 3;
    }
    self.coord = self.coord + orientation.translate.scaled(unit_scale);
    self.coord.normalize();

    // A substrate vertex can land exactly on the new face's edge.
    if substrate && self.coord.i + self.coord.j + self.coord.k == max_dim {
      Overage::FaceEdge
    } else {
      Overage::NewFace
    }
  }

  /// Repeatedly adjust a substrate pentagon vertex until it stops crossing
  /// onto new faces.
  pub(crate) fn adjust_pent_vert_overage(&mut self, res: i32) -> Overage {
    loop {
      let overage = self.adjust_overage_class_ii(res, false, true);
      if overage != Overage::NewFace {
        return overage;
      }
    }
  }

  /// Compute the substrate-grid vertices of the hexagonal cell centered
  /// here. Moves `self` and `res` onto the substrate grid.
  pub(crate) fn to_verts(&mut self, res: &mut i32) -> [FaceIJK; NUM_HEX_VERTS] {
    let verts = if is_res_class_iii(*res) { &VERTS_CIII } else { &VERTS_CII };

    // Drop the center onto the aperture 33r substrate.
    self.coord.down_ap3();
    self.coord.down_ap3r();
    // Class III needs one more 7r to land on a Class II grid.
    if is_res_class_iii(*res) {
      self.coord.down_ap7r();
      *res += 1;
    }

    std::array::from_fn(|v| FaceIJK {
      face: self.face,
      coord: (self.coord + verts[v]).normalized(),
    })
  }

  /// Pentagon counterpart of `to_verts`: five topological vertices.
  pub(crate) fn pent_to_verts(&mut self, res: &mut i32) -> [FaceIJK; NUM_PENT_VERTS] {
    let verts = if is_res_class_iii(*res) { &VERTS_CIII } else { &VERTS_CII };

    self.coord.down_ap3();
    self.coord.down_ap3r();
    if is_res_class_iii(*res) {
      self.coord.down_ap7r();
      *res += 1;
    }

    std::array::from_fn(|v| FaceIJK {
      face: self.face,
      coord: (self.coord + verts[v]).normalized(),
    })
  }

  /// Geographic boundary of the hexagonal cell centered here, starting at
  /// vertex `start` and spanning `length` topological vertices. Class III
  /// cells pick up an extra distortion vertex wherever an edge crosses an
  /// icosahedron edge.
  #[must_use]
  pub(crate) fn to_boundary(&self, res: i32, start: usize, length: usize) -> GeoBoundary {
    let mut center = *self;
    let mut adj_res = res;
    let fijk_verts = center.to_verts(&mut adj_res);

    // One extra iteration tests the closing edge for a distortion vertex.
    let additional_iteration = usize::from(length == NUM_HEX_VERTS);

    let mut g = GeoBoundary::default();
    let mut last_face = -1;
    let mut last_overage = Overage::NoOverage;

    for vert in start..start + length + additional_iteration {
      let v = vert % NUM_HEX_VERTS;

      let mut fijk = fijk_verts[v];
      let overage = fijk.adjust_overage_class_ii(adj_res, false, true);

      // Each face is its own projection plane, so a Class III edge that
      // changes face crosses an icosahedron edge and needs an extra
      // vertex at the intersection. Class II edges have their vertices
      // on the face edge itself.
      if is_res_class_iii(res) && vert > start && fijk.face != last_face && last_overage != Overage::FaceEdge {
        let last_v = (v + 5) % NUM_HEX_VERTS;
        let orig2d0 = fijk_verts[last_v].coord.to_hex2d();
        let orig2d1 = fijk_verts[v].coord.to_hex2d();

        // Icosahedron face edge endpoints in substrate hex2d.
        let max_dim = f64::from(MAX_DIM_BY_CII_RES[adj_res as usize]);
        let v0 = Vec2d::new(3.0 * max_dim, 0.0);
        let v1 = Vec2d::new(-1.5 * max_dim, 3.0 * M_SIN60 * max_dim);
        let v2 = Vec2d::new(-1.5 * max_dim, -3.0 * M_SIN60 * max_dim);

        let face2 = if last_face == center.face { fijk.face } else { last_face };
        let (edge0, edge1) = match adjacent_face_dir(center.face, face2) as usize {
          IJ_QUADRANT => (&v0, &v1),
          JK_QUADRANT => (&v1, &v2),
          _ => (&v2, &v0), // KI
        };

        let inter = Vec2d::intersect(&orig2d0, &orig2d1, edge0, edge1);
        // An intersection at a cell vertex needs no extra point: both edge
        // halves already lie on single faces.
        let at_vertex = orig2d0.eq_exact(&inter) || orig2d1.eq_exact(&inter);
        if !at_vertex {
          g.verts[g.num_verts] = hex2d_to_geo(&inter, center.face, adj_res, true);
          g.num_verts += 1;
        }
      }

      // The trailing iteration only probes the closing edge.
      if vert < start + NUM_HEX_VERTS {
        g.verts[g.num_verts] = hex2d_to_geo(&fijk.coord.to_hex2d(), fijk.face, adj_res, true);
        g.num_verts += 1;
      }

      last_face = fijk.face;
      last_overage = overage;
    }

    g
  }

  /// Pentagon counterpart of `to_boundary`. Every Class III pentagon edge
  /// crosses an icosahedron edge, so the intersection is always emitted.
  #[must_use]
  pub(crate) fn pent_to_boundary(&self, res: i32, start: usize, length: usize) -> GeoBoundary {
    let mut center = *self;
    let mut adj_res = res;
    let fijk_verts = center.pent_to_verts(&mut adj_res);

    let additional_iteration = usize::from(length == NUM_PENT_VERTS);

    let mut g = GeoBoundary::default();
    let mut last_fijk = FaceIJK::default();

    for vert in start..start + length + additional_iteration {
      let v = vert % NUM_PENT_VERTS;

      let mut fijk = fijk_verts[v];
      fijk.adjust_pent_vert_overage(adj_res);

      if is_res_class_iii(res) && vert > start {
        // Express this vertex on the previous vertex's face to find where
        // the connecting edge leaves that face.
        let mut tmp_fijk = fijk;
        let current_to_last = adjacent_face_dir(tmp_fijk.face, last_fijk.face);
        let orientation = &FACE_NEIGHBORS[tmp_fijk.face as usize][current_to_last as usize];

        tmp_fijk.face = orientation.face;
        for _ in 0..orientation.ccw_rot60 {
          tmp_fijk.coord.rotate60_ccw();
        }
        let trans = orientation
          .translate
          .scaled(UNIT_SCALE_BY_CII_RES[adj_res as usize] * 3);
        tmp_fijk.coord = (tmp_fijk.coord + trans).normalized();

        let orig2d0 = last_fijk.coord.to_hex2d();
        let orig2d1 = tmp_fijk.coord.to_hex2d();

        let max_dim = f64::from(MAX_DIM_BY_CII_RES[adj_res as usize]);
        let v0 = Vec2d::new(3.0 * max_dim, 0.0);
        let v1 = Vec2d::new(-1.5 * max_dim, 3.0 * M_SIN60 * max_dim);
        let v2 = Vec2d::new(-1.5 * max_dim, -3.0 * M_SIN60 * max_dim);

        let (edge0, edge1) = match adjacent_face_dir(tmp_fijk.face, fijk.face) as usize {
          IJ_QUADRANT => (&v0, &v1),
          JK_QUADRANT => (&v1, &v2),
          _ => (&v2, &v0), // KI
        };

        let inter = Vec2d::intersect(&orig2d0, &orig2d1, edge0, edge1);
        g.verts[g.num_verts] = hex2d_to_geo(&inter, tmp_fijk.face, adj_res, true);
        g.num_verts += 1;
      }

      if vert < start + NUM_PENT_VERTS {
        g.verts[g.num_verts] = hex2d_to_geo(&fijk.coord.to_hex2d(), fijk.face, adj_res, true);
        g.num_verts += 1;
      }

      last_fijk = fijk;
    }

    g
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::geo::degs_to_rads;

  #[test]
  fn nearest_face_picks_face_centers() {
    for (f, center) in FACE_CENTER_GEO.iter().enumerate() {
      let (face, sqd) = nearest_face(center);
      assert_eq!(face, f as i32);
      assert!(sqd < 1e-12);
    }
  }

  #[test]
  fn face_centers_project_to_origin() {
    for res in [0, 5, 15] {
      for (f, center) in FACE_CENTER_GEO.iter().enumerate() {
        let (face, v) = geo_to_hex2d(center, res);
        assert_eq!(face, f as i32);
        assert!(v.mag() < 1e-9, "face {f} res {res}");
      }
    }
  }

  #[test]
  fn geo_round_trip_through_face_ijk() {
    let g = GeoCoord::new(degs_to_rads(37.779_265), degs_to_rads(-122.419_277));
    for res in 0..=15 {
      let fijk = FaceIJK::from_geo(&g, res);
      let back = fijk.to_geo(res);
      // The cell center must be within one cell radius of the input.
      assert!(
        g.dist_rads(&back) < crate::constants::EPSILON + 0.3 / f64::from(1 << res),
        "res {res}"
      );
      // And the center must be a fixed point of quantization, whichever
      // face representation it lands on.
      let requantized = FaceIJK::from_geo(&back, res);
      assert!(back.dist_rads(&requantized.to_geo(res)) < 1e-9, "res {res}");
    }
  }

  #[test]
  fn adjacent_face_dir_matches_neighbors_table() {
    for face in 0..NUM_ICOSA_FACES {
      assert_eq!(adjacent_face_dir(face, face), 0);
      let mut adjacent = 0;
      for other in 0..NUM_ICOSA_FACES {
        if other != face && adjacent_face_dir(face, other) > 0 {
          adjacent += 1;
        }
      }
      assert_eq!(adjacent, 3, "face {face} has three IJK-reachable neighbors");
    }
  }

  #[test]
  fn overage_is_identity_inside_face() {
    let mut fijk = FaceIJK {
      face: 3,
      coord: CoordIJK::new(1, 0, 0),
    };
    let before = fijk;
    assert_eq!(fijk.adjust_overage_class_ii(0, false, false), Overage::NoOverage);
    assert_eq!(fijk, before);
  }

  #[test]
  fn overage_moves_past_edge_onto_new_face() {
    // Component sum beyond maxDim at res 0 (2) must leave the face.
    let mut fijk = FaceIJK {
      face: 0,
      coord: CoordIJK::new(3, 0, 0),
    };
    assert_eq!(fijk.adjust_overage_class_ii(0, false, false), Overage::NewFace);
    assert_ne!(fijk.face, 0);
  }

  #[test]
  fn hex_boundary_has_six_or_more_verts() {
    let g = GeoCoord::new(degs_to_rads(37.779_265), degs_to_rads(-122.419_277));
    for res in 0..=4 {
      let fijk = FaceIJK::from_geo(&g, res);
      let boundary = fijk.to_boundary(res, 0, NUM_HEX_VERTS);
      assert!(
        (NUM_HEX_VERTS..=NUM_HEX_VERTS + 4).contains(&boundary.num_verts),
        "res {res}: {}",
        boundary.num_verts
      );
    }
  }
}

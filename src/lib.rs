#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::similar_names)]

//! `xs-dggs` is a hierarchical hexagonal discrete global grid for the
//! sphere: 122 base cells (12 pentagons) projected onto an icosahedron,
//! subdivided aperture 7 through sixteen resolutions, with every cell,
//! directed edge, and vertex addressed by a single 64-bit index.
//!
//! All operations are pure functions of their inputs; the only process
//! state is a set of immutable lookup tables.

pub mod base_cells;
pub mod bbox;
pub mod constants;
pub mod edge;
pub mod face_ijk;
pub mod geo;
pub mod hierarchy;
pub mod ijk;
pub mod index;
pub mod indexing;
pub mod local_ij;
pub mod math;
pub mod polyfill;
pub mod polygon;
pub mod traversal;
pub mod types;
pub mod vertex;

pub use constants::{
  EARTH_RADIUS_KM, EPSILON_RAD, MAX_CELL_BNDRY_VERTS, MAX_H3_RES, NUM_BASE_CELLS, NUM_HEX_VERTS, NUM_ICOSA_FACES,
  NUM_PENTAGONS, NUM_PENT_VERTS,
};
pub use types::{
  BBox, CoordIJ, CoordIJK, Direction, FaceIJK, GeoBoundary, GeoCoord, GeoPolygon, Geofence, H3Error, H3Index, Vec2d,
  Vec3d, H3_NULL,
};

pub use geo::{degs_to_rads, rads_to_degs};
pub use index::inspection::{
  get_pentagon_indexes, get_res0_indexes, num_hexagons, pentagon_index_count, res0_index_count,
};
pub use index::is_res_class_iii;
pub use index::strings::{h3_to_string, h3_to_string_alloc, string_to_h3};

pub use hierarchy::{
  compact, h3_to_center_child, h3_to_children, h3_to_parent, max_h3_to_children_size, max_uncompact_size, uncompact,
};
pub use indexing::{geo_to_h3, h3_to_geo, h3_to_geo_boundary};
pub use local_ij::{
  experimental_h3_to_local_ij, experimental_local_ij_to_h3, h3_distance, h3_line, h3_line_size, h3_to_local_ijk,
  local_ijk_to_h3,
};
pub use traversal::{
  h3_indexes_are_neighbors, hex_range, hex_range_distances, hex_ring, k_ring, k_ring_distances, max_kring_size,
};

pub use edge::{
  exact_edge_length_km, exact_edge_length_m, exact_edge_length_rads, get_destination_h3_index_from_unidirectional_edge,
  get_h3_indexes_from_unidirectional_edge, get_h3_unidirectional_edge, get_h3_unidirectional_edge_boundary,
  get_h3_unidirectional_edges_from_hexagon, get_origin_h3_index_from_unidirectional_edge,
  h3_unidirectional_edge_is_valid,
};
pub use vertex::{cell_to_vertex, cell_to_vertexes, is_valid_vertex, vertex_to_point};

pub use bbox::{bbox_from_geofence, bbox_hex_radius};
pub use polyfill::{max_polyfill_size, polyfill};
pub use polygon::point_inside_polygon;

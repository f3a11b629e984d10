use xs_dggs::*;

fn cell_at(lat_deg: f64, lon_deg: f64, res: i32) -> H3Index {
  geo_to_h3(&GeoCoord::new(degs_to_rads(lat_deg), degs_to_rads(lon_deg)), res).unwrap()
}

#[test]
fn edge_round_trip_for_all_neighbors() {
  let origin = cell_at(37.779, -122.419, 9);
  let mut ring = vec![H3_NULL; max_kring_size(1)];
  k_ring(origin, 1, &mut ring).unwrap();

  for &neighbor in ring.iter().filter(|&&h| h != H3_NULL && h != origin) {
    let edge = get_h3_unidirectional_edge(origin, neighbor).unwrap();
    assert!(h3_unidirectional_edge_is_valid(edge));
    let (o, d) = get_h3_indexes_from_unidirectional_edge(edge).unwrap();
    assert_eq!((o, d), (origin, neighbor));

    // The reverse edge is a distinct index with swapped endpoints.
    let reverse = get_h3_unidirectional_edge(neighbor, origin).unwrap();
    assert_ne!(reverse, edge);
    assert_eq!(
      get_h3_indexes_from_unidirectional_edge(reverse).unwrap(),
      (neighbor, origin)
    );
  }
}

#[test]
fn pentagon_edges() {
  let pent = H3Index::new_cell(6, 107, Direction::Center);
  let mut edges = [H3_NULL; 6];
  get_h3_unidirectional_edges_from_hexagon(pent, &mut edges).unwrap();

  assert_eq!(edges[0], H3_NULL);
  for &edge in &edges[1..] {
    assert!(h3_unidirectional_edge_is_valid(edge));
    let dest = get_destination_h3_index_from_unidirectional_edge(edge).unwrap();
    assert_eq!(h3_indexes_are_neighbors(pent, dest), Ok(true));
  }
}

#[test]
fn edge_boundary_endpoints_lie_on_both_cell_boundaries() {
  let origin = cell_at(40.69, -74.04, 6);
  let mut edges = [H3_NULL; 6];
  get_h3_unidirectional_edges_from_hexagon(origin, &mut edges).unwrap();

  let cell_boundary = h3_to_geo_boundary(origin).unwrap();
  for &edge in &edges {
    let eb = get_h3_unidirectional_edge_boundary(edge).unwrap();
    assert!(eb.num_verts >= 2);
    for v in &eb.verts[..eb.num_verts] {
      let on_cell = cell_boundary.verts[..cell_boundary.num_verts]
        .iter()
        .any(|b| b.almost_equal_threshold(v, 1e-9));
      assert!(on_cell);
    }
  }
}

#[test]
fn edge_lengths_scale_with_resolution() {
  let coarse = cell_at(37.779, -122.419, 4);
  let fine = cell_at(37.779, -122.419, 5);

  let mut coarse_edges = [H3_NULL; 6];
  let mut fine_edges = [H3_NULL; 6];
  get_h3_unidirectional_edges_from_hexagon(coarse, &mut coarse_edges).unwrap();
  get_h3_unidirectional_edges_from_hexagon(fine, &mut fine_edges).unwrap();

  let coarse_len = exact_edge_length_km(coarse_edges[0]).unwrap();
  let fine_len = exact_edge_length_km(fine_edges[0]).unwrap();

  // One aperture 7 step shrinks edges by about sqrt(7).
  let ratio = coarse_len / fine_len;
  assert!((2.0..4.0).contains(&ratio), "ratio {ratio}");
}

#[test]
fn vertexes_are_shared_canonically() {
  let origin = cell_at(48.85, 2.35, 8);
  let mut ring = vec![H3_NULL; max_kring_size(1)];
  k_ring(origin, 1, &mut ring).unwrap();

  // Collect canonical vertexes of the origin and all neighbors; each of
  // the origin's six vertexes must appear in exactly three cells' sets.
  let mut origin_verts = [H3_NULL; 6];
  cell_to_vertexes(origin, &mut origin_verts).unwrap();

  for &v in &origin_verts {
    let mut appearances = 0;
    for &cell in ring.iter().filter(|&&h| h != H3_NULL) {
      let mut verts = [H3_NULL; 6];
      cell_to_vertexes(cell, &mut verts).unwrap();
      if verts.contains(&v) {
        appearances += 1;
      }
    }
    assert_eq!(appearances, 3, "vertex shared by three cells");
  }
}

#[test]
fn vertex_points_are_distinct() {
  let cell = cell_at(-1.28, 36.82, 7);
  let mut verts = [H3_NULL; 6];
  cell_to_vertexes(cell, &mut verts).unwrap();

  let points: Vec<GeoCoord> = verts.iter().map(|&v| vertex_to_point(v).unwrap()).collect();
  for (i, a) in points.iter().enumerate() {
    for b in &points[i + 1..] {
      assert!(!a.almost_equal(b));
    }
  }
}

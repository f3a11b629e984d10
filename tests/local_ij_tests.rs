use xs_dggs::*;

fn cell_at(lat_deg: f64, lon_deg: f64, res: i32) -> H3Index {
  geo_to_h3(&GeoCoord::new(degs_to_rads(lat_deg), degs_to_rads(lon_deg)), res).unwrap()
}

#[test]
fn garbage_index_fails_local_ij() {
  let bc1 = H3Index::new_cell(0, 15, Direction::Center);
  let garbage = H3Index(0x7fff_ffff_ffff_ffff);
  assert!(experimental_h3_to_local_ij(bc1, garbage).is_err());
}

#[test]
fn local_ij_round_trips_across_base_cells() {
  // Origins on both hexagons and pentagons, observed over a 2-disk.
  let origins = [
    cell_at(37.779, -122.419, 5),
    cell_at(64.1, -21.9, 5),
    H3Index::new_cell(5, 14, Direction::Center),
  ];
  for origin in origins {
    let size = max_kring_size(2);
    let mut disk = vec![H3_NULL; size];
    k_ring(origin, 2, &mut disk).unwrap();

    for &h in disk.iter().filter(|&&h| h != H3_NULL) {
      match experimental_h3_to_local_ij(origin, h) {
        Ok(ij) => {
          assert_eq!(experimental_local_ij_to_h3(origin, &ij), Ok(h));
        }
        // Pentagon-adjacent unfoldings may conservatively refuse.
        Err(H3Error::Pentagon) => {}
        Err(other) => panic!("unexpected error {other:?}"),
      }
    }
  }
}

#[test]
fn distance_is_a_metric_locally() {
  let a = cell_at(52.52, 13.40, 7);
  let b = cell_at(52.55, 13.45, 7);
  let c = cell_at(52.50, 13.50, 7);

  let ab = h3_distance(a, b).unwrap();
  let bc = h3_distance(b, c).unwrap();
  let ac = h3_distance(a, c).unwrap();

  assert_eq!(h3_distance(b, a), Ok(ab));
  assert!(ac <= ab + bc, "triangle inequality");
  assert_eq!(h3_distance(a, a), Ok(0));
}

#[test]
fn line_length_and_adjacency_guarantees() {
  let pairs = [
    (cell_at(37.779, -122.419, 7), cell_at(37.68, -122.2, 7)),
    (cell_at(-12.0, 18.0, 4), cell_at(-12.9, 19.1, 4)),
  ];
  for (start, end) in pairs {
    let distance = h3_distance(start, end).unwrap();
    let mut line = vec![H3_NULL; h3_line_size(start, end).unwrap()];
    let n = h3_line(start, end, &mut line).unwrap();

    assert_eq!(n as i32, distance + 1);
    assert_eq!(line[0], start);
    assert_eq!(line[n - 1], end);
    for pair in line[..n].windows(2) {
      assert_eq!(h3_indexes_are_neighbors(pair[0], pair[1]), Ok(true));
    }
  }
}

#[test]
fn cross_resolution_distance_fails() {
  let a = cell_at(1.0, 1.0, 5);
  let b = cell_at(1.0, 1.0, 6);
  assert_eq!(h3_distance(a, b), Err(H3Error::ResMismatch));
}

#[test]
fn distant_base_cells_fail_conservatively() {
  // Antipodal cells cannot be unfolded into one local frame.
  let a = cell_at(37.779, -122.419, 3);
  let b = cell_at(-37.779, 57.581, 3);
  assert!(h3_distance(a, b).is_err());
}

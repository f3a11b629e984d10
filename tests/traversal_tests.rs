use xs_dggs::*;

fn cell_at(lat_deg: f64, lon_deg: f64, res: i32) -> H3Index {
  geo_to_h3(&GeoCoord::new(degs_to_rads(lat_deg), degs_to_rads(lon_deg)), res).unwrap()
}

#[test]
fn k_ring_counts_match_hex_numbers() {
  let origin = cell_at(51.5, -0.12, 8);
  for k in 0..5 {
    let size = max_kring_size(k);
    let mut out = vec![H3_NULL; size];
    k_ring(origin, k, &mut out).unwrap();
    let live = out.iter().filter(|&&h| h != H3_NULL).count();
    assert_eq!(live, (1 + 3 * k * (k + 1)) as usize);
  }
}

#[test]
fn k_ring_membership_is_symmetric() {
  let a = cell_at(35.68, 139.69, 7);
  let mut out = vec![H3_NULL; max_kring_size(1)];
  k_ring(a, 1, &mut out).unwrap();

  for &b in out.iter().filter(|&&h| h != H3_NULL && h != a) {
    assert_eq!(h3_indexes_are_neighbors(a, b), Ok(true));
    assert_eq!(h3_distance(a, b), Ok(1));

    // a appears in b's ring too.
    let mut back = vec![H3_NULL; max_kring_size(1)];
    k_ring(b, 1, &mut back).unwrap();
    assert!(back.contains(&a));
  }
}

#[test]
fn k_ring_distances_agree_with_h3_distance() {
  let origin = cell_at(-33.87, 151.21, 6);
  let k = 4;
  let size = max_kring_size(k);
  let mut out = vec![H3_NULL; size];
  let mut dist = vec![0i32; size];
  k_ring_distances(origin, k, &mut out, &mut dist).unwrap();

  for (&h, &d) in out.iter().zip(dist.iter()) {
    if h == H3_NULL {
      continue;
    }
    assert_eq!(h3_distance(origin, h), Ok(d));
  }
}

#[test]
fn hex_range_succeeds_away_from_pentagons_and_fails_on_them() {
  let origin = cell_at(48.85, 2.35, 9);
  let mut out = vec![H3_NULL; max_kring_size(3)];
  hex_range(origin, 3, &mut out).unwrap();
  assert!(out.iter().all(|&h| h != H3_NULL));

  let pent = H3Index::new_cell(9, 24, Direction::Center);
  assert_eq!(hex_range(pent, 1, &mut out), Err(H3Error::Pentagon));

  // k_ring still works there.
  let size = max_kring_size(1);
  let mut disk = vec![H3_NULL; size];
  k_ring(pent, 1, &mut disk).unwrap();
  assert_eq!(disk.iter().filter(|&&h| h != H3_NULL).count(), 6);
}

#[test]
fn hex_ring_cells_are_all_at_distance_k() {
  let origin = cell_at(37.779, -122.419, 9);
  for k in 1..4 {
    let mut ring = vec![H3_NULL; 6 * k as usize];
    hex_ring(origin, k, &mut ring).unwrap();
    for &h in &ring {
      assert_eq!(h3_distance(origin, h), Ok(k));
    }
  }
}

#[test]
fn pentagon_disk_sizes() {
  // 1 + 5 + 10 + 15 cells for k = 3 around a pentagon.
  let pent = H3Index::new_cell(4, 58, Direction::Center);
  let k = 3;
  let size = max_kring_size(k);
  let mut out = vec![H3_NULL; size];
  let mut dist = vec![0i32; size];
  k_ring_distances(pent, k, &mut out, &mut dist).unwrap();

  let mut per_ring = [0usize; 4];
  for (&h, &d) in out.iter().zip(dist.iter()) {
    if h != H3_NULL {
      per_ring[d as usize] += 1;
    }
  }
  assert_eq!(per_ring, [1, 5, 10, 15]);
}

#[test]
fn res0_rings_cross_base_cells() {
  let origin = H3Index::new_cell(0, 16, Direction::Center);
  let mut out = vec![H3_NULL; max_kring_size(1)];
  k_ring(origin, 1, &mut out).unwrap();

  let live: Vec<_> = out.iter().copied().filter(|&h| h != H3_NULL).collect();
  assert_eq!(live.len(), 7);
  for h in live {
    assert_eq!(h.resolution(), 0);
    assert!(h.is_valid());
  }
}

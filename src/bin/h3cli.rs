//! Line-oriented driver for the grid library.
//!
//! Reads one command per line from stdin and prints results to stdout.
//! Index arguments are 16-character-or-less lowercase hex; coordinates are
//! degrees. Exits non-zero on the first malformed input.
//!
//! Commands:
//!   geoToH3 <lat> <lon> <res>
//!   h3ToGeo <index>
//!   h3ToGeoBoundary <index>
//!   kRing <index> <k>
//!   h3Line <start> <end>
//!   compact <index> [<index> ...]
//!   uncompact <res> <index> [<index> ...]
//!   polyfill <res> <lat> <lon> [<lat> <lon> ...]

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use xs_dggs::{
  compact, degs_to_rads, geo_to_h3, h3_line, h3_line_size, h3_to_geo, h3_to_geo_boundary, h3_to_string_alloc, k_ring,
  max_kring_size, max_polyfill_size, max_uncompact_size, polyfill, rads_to_degs, string_to_h3, uncompact, GeoCoord,
  GeoPolygon, Geofence, H3Index, H3_NULL,
};

fn main() -> ExitCode {
  let stdin = io::stdin();
  let stdout = io::stdout();
  let mut out = stdout.lock();

  for line in stdin.lock().lines() {
    let line = match line {
      Ok(line) => line,
      Err(err) => {
        eprintln!("read error: {err}");
        return ExitCode::FAILURE;
      }
    };
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
      continue;
    }

    if let Err(msg) = run_command(trimmed, &mut out) {
      eprintln!("error: {msg}");
      return ExitCode::FAILURE;
    }
  }

  ExitCode::SUCCESS
}

fn run_command(line: &str, out: &mut impl Write) -> Result<(), String> {
  let mut parts = line.split_whitespace();
  let command = parts.next().expect("line is non-empty");
  let args: Vec<&str> = parts.collect();

  match command {
    "geoToH3" => {
      let (lat, lon, res) = (parse_f64(&args, 0)?, parse_f64(&args, 1)?, parse_i32(&args, 2)?);
      let g = GeoCoord::new(degs_to_rads(lat), degs_to_rads(lon));
      let h = geo_to_h3(&g, res).map_err(|e| e.to_string())?;
      writeln!(out, "{}", h3_to_string_alloc(h)).map_err(|e| e.to_string())
    }
    "h3ToGeo" => {
      let h = parse_index(&args, 0)?;
      let g = h3_to_geo(h).map_err(|e| e.to_string())?;
      writeln!(out, "{:.10} {:.10}", rads_to_degs(g.lat), rads_to_degs(g.lon)).map_err(|e| e.to_string())
    }
    "h3ToGeoBoundary" => {
      let h = parse_index(&args, 0)?;
      let boundary = h3_to_geo_boundary(h).map_err(|e| e.to_string())?;
      for v in &boundary.verts[..boundary.num_verts] {
        writeln!(out, "{:.10} {:.10}", rads_to_degs(v.lat), rads_to_degs(v.lon)).map_err(|e| e.to_string())?;
      }
      Ok(())
    }
    "kRing" => {
      let h = parse_index(&args, 0)?;
      let k = parse_i32(&args, 1)?;
      let mut cells = vec![H3_NULL; max_kring_size(k)];
      k_ring(h, k, &mut cells).map_err(|e| e.to_string())?;
      print_indexes(out, cells.iter().copied())
    }
    "h3Line" => {
      let start = parse_index(&args, 0)?;
      let end = parse_index(&args, 1)?;
      let mut cells = vec![H3_NULL; h3_line_size(start, end).map_err(|e| e.to_string())?];
      h3_line(start, end, &mut cells).map_err(|e| e.to_string())?;
      print_indexes(out, cells.iter().copied())
    }
    "compact" => {
      let set = parse_index_list(&args, 0)?;
      let mut compacted = vec![H3_NULL; set.len()];
      let n = compact(&set, &mut compacted).map_err(|e| e.to_string())?;
      print_indexes(out, compacted[..n].iter().copied())
    }
    "uncompact" => {
      let res = parse_i32(&args, 0)?;
      let set = parse_index_list(&args, 1)?;
      let size = max_uncompact_size(&set, res).map_err(|e| e.to_string())?;
      let mut expanded = vec![H3_NULL; size];
      uncompact(&set, res, &mut expanded).map_err(|e| e.to_string())?;
      print_indexes(out, expanded.iter().copied())
    }
    "polyfill" => {
      let res = parse_i32(&args, 0)?;
      let coords = &args[1..];
      if coords.len() < 6 || coords.len() % 2 != 0 {
        return Err("polyfill needs at least three lat/lon pairs".into());
      }
      let verts = coords
        .chunks(2)
        .map(|pair| {
          Ok(GeoCoord::new(
            degs_to_rads(pair[0].parse().map_err(|_| "bad latitude")?),
            degs_to_rads(pair[1].parse().map_err(|_| "bad longitude")?),
          ))
        })
        .collect::<Result<Vec<_>, String>>()?;
      let polygon = GeoPolygon {
        geofence: Geofence::new(verts),
        holes: Vec::new(),
      };
      let size = max_polyfill_size(&polygon, res).map_err(|e| e.to_string())?;
      let mut cells = vec![H3_NULL; size];
      let n = polyfill(&polygon, res, &mut cells).map_err(|e| e.to_string())?;
      print_indexes(out, cells[..n].iter().copied())
    }
    other => Err(format!("unknown command: {other}")),
  }
}

fn parse_f64(args: &[&str], pos: usize) -> Result<f64, String> {
  args
    .get(pos)
    .ok_or_else(|| format!("missing argument {pos}"))?
    .parse()
    .map_err(|_| format!("bad number in argument {pos}"))
}

fn parse_i32(args: &[&str], pos: usize) -> Result<i32, String> {
  args
    .get(pos)
    .ok_or_else(|| format!("missing argument {pos}"))?
    .parse()
    .map_err(|_| format!("bad integer in argument {pos}"))
}

fn parse_index(args: &[&str], pos: usize) -> Result<H3Index, String> {
  let s = args.get(pos).ok_or_else(|| format!("missing argument {pos}"))?;
  let h = string_to_h3(s);
  if h == H3_NULL {
    return Err(format!("malformed index: {s}"));
  }
  Ok(h)
}

fn parse_index_list(args: &[&str], from: usize) -> Result<Vec<H3Index>, String> {
  if args.len() <= from {
    return Err("missing index list".into());
  }
  args[from..]
    .iter()
    .map(|s| {
      let h = string_to_h3(s);
      if h == H3_NULL {
        Err(format!("malformed index: {s}"))
      } else {
        Ok(h)
      }
    })
    .collect()
}

fn print_indexes(out: &mut impl Write, cells: impl Iterator<Item = H3Index>) -> Result<(), String> {
  for h in cells {
    if h != H3_NULL {
      writeln!(out, "{}", h3_to_string_alloc(h)).map_err(|e| e.to_string())?;
    }
  }
  Ok(())
}

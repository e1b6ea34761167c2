//! Text files of measured rays, one per line:
//!
//! ```text
//! # origin (D numbers)   delta (D numbers)   value
//! -1.0 1.5               6.0 0.0             42.5
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::{Error, Result, Ray};
use crate::utils::parse_ray;

pub fn parse_rays<const D: usize>(reader: impl BufRead) -> Result<Vec<Ray<D>>> {
    let mut rays = vec![];
    for (n, line) in reader.lines().enumerate() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() || text.starts_with('#') { continue }
        let ray = parse_ray::<D>(text).map_err(|message| Error::RayParse { line: n + 1, message })?;
        rays.push(ray);
    }
    Ok(rays)
}

pub fn read_rays<const D: usize>(path: &Path) -> Result<Vec<Ray<D>>> {
    let rays = parse_rays(BufReader::new(File::open(path)?))?;
    log::info!("read {} rays from {}", crate::utils::group_digits(rays.len()), path.display());
    Ok(rays)
}

pub fn write_rays<const D: usize>(rays: &[Ray<D>], path: &Path) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for Ray { line, value } in rays {
        let numbers = line.origin.coords().into_iter()
            .chain(line.delta.components())
            .chain(std::iter::once(*value));
        writeln!(out, "{}", itertools::join(numbers, " "))?;
    }
    out.flush()?;
    Ok(())
}

//! Read and write text files that store one point per line as
//! whitespace-separated floating-point values.

// std
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
// others
use tracing::debug;
// hypersphere
use crate::core::error::{Error, Result};
use crate::core::geometry::{PointCloud, VectorN};
use crate::core::hypersphere::Float;

/// Parse a point file. Empty lines and lines starting with `#` are
/// ignored; the first point fixes the dimension of the cloud.
pub fn read_point_file<P: AsRef<Path>>(path: P) -> Result<PointCloud> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let mut points: Vec<VectorN> = Vec::new();
    let mut dimension: Option<usize> = None;
    for (line_number, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut values: Vec<Float> = Vec::new();
        for token in line.split_whitespace() {
            match token.parse::<Float>() {
                Ok(value) => values.push(value),
                Err(_) => {
                    return Err(Error::Parse {
                        path: path.to_path_buf(),
                        line: line_number + 1,
                        token: token.to_string(),
                    })
                }
            }
        }
        let expected = *dimension.get_or_insert(values.len());
        if values.len() != expected {
            return Err(Error::DimensionMismatch {
                expected,
                got: values.len(),
            });
        }
        points.push(VectorN::from_slice(&values));
    }
    debug!(path = %path.display(), points = points.len(), "read point file");
    PointCloud::new(dimension.unwrap_or(0), points)
}

/// Write one point per line, components separated by a single space.
pub fn write_point_file<P: AsRef<Path>>(path: P, cloud: &PointCloud) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    for v in cloud {
        let row: Vec<String> = v.components().iter().map(|c| c.to_string()).collect();
        writeln!(writer, "{}", row.join(" "))?;
    }
    writer.flush()?;
    Ok(())
}

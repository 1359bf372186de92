use anyhow::{bail, Context, Result};
use ndarray::{Array1, Array2};
use std::path::Path;

/// Read a whitespace-delimited numeric matrix from a file
///
/// Rows are records, columns are floating-point fields; any run of spaces
/// or tabs acts as a single separator and blank lines are skipped. Every
/// row must carry the same number of fields.
pub fn read_matrix<P: AsRef<Path>>(path: P) -> Result<Array2<f64>> {
    let path = path.as_ref();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b' ')
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let mut rows: Vec<Vec<f64>> = Vec::new();

    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("failed to read {}", path.display()))?;

        // Repeated spaces show up as empty fields with a single-byte
        // delimiter, and tabs survive inside a field; re-split on runs of
        // whitespace before parsing
        let values: Vec<f64> = record
            .iter()
            .flat_map(str::split_whitespace)
            .map(|field| {
                field
                    .parse::<f64>()
                    .with_context(|| format!("bad numeric field {:?} on line {}", field, line + 1))
            })
            .collect::<Result<_>>()?;

        if values.is_empty() {
            continue;
        }

        if let Some(first) = rows.first() {
            if values.len() != first.len() {
                bail!(
                    "line {} of {} has {} fields, expected {}",
                    line + 1,
                    path.display(),
                    values.len(),
                    first.len()
                );
            }
        }

        rows.push(values);
    }

    if rows.is_empty() {
        bail!("{} contains no numeric data", path.display());
    }

    let n_rows = rows.len();
    let n_cols = rows[0].len();
    let flat: Vec<f64> = rows.into_iter().flatten().collect();

    Array2::from_shape_vec((n_rows, n_cols), flat)
        .with_context(|| format!("failed to shape data from {}", path.display()))
}

/// Read a one-column parameter file into a flat vector
///
/// The layout used by the case `params.txt` files: one value per line.
pub fn read_params<P: AsRef<Path>>(path: P) -> Result<Array1<f64>> {
    let matrix = read_matrix(&path)?;

    if matrix.ncols() != 1 {
        bail!(
            "{} holds a {} column matrix, expected a single column",
            path.as_ref().display(),
            matrix.ncols()
        );
    }

    Ok(matrix.column(0).to_owned())
}

//! Sweep manifest: one CSV row per generated task.
//!
//! The orchestration layer consumes this file to map SLURM array indices to
//! the scale-factor configuration each task was generated from.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GenerateError, Result};

/// One sweep task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestRow {
    pub task_id: u32,
    /// Human-readable parameter name, e.g. `STAB_Ematch`.
    pub parameter: String,
    pub scale: f64,
    /// Scale-factor JSON file, relative to the manifest.
    pub config_file: PathBuf,
}

/// Write rows to a CSV manifest.
pub fn write_manifest(path: &Path, rows: &[ManifestRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|source| GenerateError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    for row in rows {
        writer
            .serialize(row)
            .map_err(|source| GenerateError::Csv {
                path: path.to_path_buf(),
                source,
            })?;
    }
    writer.flush()?;
    tracing::info!(path = %path.display(), tasks = rows.len(), "wrote sweep manifest");
    Ok(())
}

/// Read a CSV manifest. Missing or malformed columns fail here.
pub fn read_manifest(path: &Path) -> Result<Vec<ManifestRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| GenerateError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let row: ManifestRow = result.map_err(|source| GenerateError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(row);
    }
    Ok(rows)
}

/// Read and validate a manifest: task ids must be unique and every
/// referenced config file must exist relative to the manifest.
pub fn validate_manifest(path: &Path) -> Result<Vec<ManifestRow>> {
    let rows = read_manifest(path)?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));

    let mut seen = std::collections::BTreeSet::new();
    for row in &rows {
        if !seen.insert(row.task_id) {
            return Err(GenerateError::manifest(format!(
                "duplicate task_id {}",
                row.task_id
            )));
        }
        let config = base.join(&row.config_file);
        if !config.is_file() {
            return Err(GenerateError::manifest(format!(
                "task {} references missing config file {}",
                row.task_id,
                row.config_file.display()
            )));
        }
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn rows() -> Vec<ManifestRow> {
        vec![
            ManifestRow {
                task_id: 0,
                parameter: "STAB_Ematch".to_string(),
                scale: 1.10,
                config_file: PathBuf::from("scales_000.json"),
            },
            ManifestRow {
                task_id: 1,
                parameter: "MY_AS1_Wa".to_string(),
                scale: 0.95,
                config_file: PathBuf::from("scales_001.json"),
            },
        ]
    }

    #[test]
    fn manifest_round_trips_through_csv() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("manifest.csv");
        write_manifest(&path, &rows()).expect("write");
        assert_eq!(read_manifest(&path).expect("read"), rows());
    }

    #[test]
    fn validation_requires_config_files_to_exist() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("manifest.csv");
        write_manifest(&path, &rows()).expect("write");

        let err = validate_manifest(&path).expect_err("configs missing");
        assert!(format!("{err}").contains("scales_000.json"));

        for name in ["scales_000.json", "scales_001.json"] {
            std::fs::write(dir.path().join(name), "{}").expect("config");
        }
        assert_eq!(validate_manifest(&path).expect("valid").len(), 2);
    }

    #[test]
    fn duplicate_task_ids_are_rejected() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("manifest.csv");
        let mut duplicated = rows();
        duplicated[1].task_id = 0;
        write_manifest(&path, &duplicated).expect("write");
        for name in ["scales_000.json", "scales_001.json"] {
            std::fs::write(dir.path().join(name), "{}").expect("config");
        }

        let err = validate_manifest(&path).expect_err("duplicate id");
        assert!(format!("{err}").contains("duplicate task_id 0"));
    }

    #[test]
    fn missing_column_is_a_csv_error() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("manifest.csv");
        std::fs::write(&path, "task_id,parameter\n0,STAB_Ematch\n").expect("seed");
        assert!(matches!(
            read_manifest(&path),
            Err(GenerateError::Csv { .. })
        ));
    }
}

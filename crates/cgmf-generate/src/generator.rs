//! Baseline copy plus decode-scale-encode for the perturbable files.

use std::fs;
use std::path::{Path, PathBuf};

use cgmf_codec::codecs::tke_model::TkeScales;
use cgmf_codec::codecs::{
    deformations, gdr_params, level_density, mass_yields, rta, spin_scaling, tke_model,
};
use cgmf_codec::{FileKind, Result as CodecResult};
use cgmf_model::TargetNuclide;

use crate::config::ScaleConfig;
use crate::error::{GenerateError, Result};

/// What a generation request did, per file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationReport {
    /// Files copied verbatim from the baseline.
    pub copied: usize,
    /// Parameter files rewritten through a codec.
    pub perturbed: Vec<FileKind>,
    /// Known file kinds absent from the baseline.
    pub skipped: Vec<FileKind>,
}

/// Produce one perturbed input deck.
///
/// Copies `source_dir` into `output_dir` verbatim, then rewrites each known
/// parameter file in place through its codec with the factors in `config`.
/// A known file kind missing from the baseline is skipped with a warning,
/// matching how sweep baselines often carry only a subset of the inputs.
pub fn generate(
    source_dir: &Path,
    output_dir: &Path,
    target: TargetNuclide,
    config: &ScaleConfig,
) -> Result<GenerationReport> {
    if !source_dir.is_dir() {
        return Err(GenerateError::DirectoryNotFound {
            path: source_dir.to_path_buf(),
        });
    }
    let tke_scales = config.tke_model.to_scales()?;

    let span = tracing::info_span!("generate", target = target.zaid().value());
    let _guard = span.enter();

    let mut report = GenerationReport::default();
    copy_dir(source_dir, output_dir, &mut report.copied)?;

    let mut found: Vec<(FileKind, PathBuf)> = Vec::new();
    collect_parameter_files(output_dir, &mut found)?;

    for kind in FileKind::ALL {
        let paths: Vec<&PathBuf> = found
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, p)| p)
            .collect();
        if paths.is_empty() {
            tracing::warn!(file = %kind, "parameter file absent from baseline, skipping");
            report.skipped.push(kind);
            continue;
        }
        for path in paths {
            perturb_file(kind, path, target, config, &tke_scales)?;
        }
        tracing::info!(file = %kind, "perturbed");
        report.perturbed.push(kind);
    }

    tracing::info!(
        copied = report.copied,
        perturbed = report.perturbed.len(),
        skipped = report.skipped.len(),
        "generation complete"
    );
    Ok(report)
}

fn copy_dir(source: &Path, dest: &Path, copied: &mut usize) -> Result<()> {
    fs::create_dir_all(dest)?;
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let from = entry.path();
        let to = dest.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir(&from, &to, copied)?;
        } else {
            fs::copy(&from, &to)?;
            *copied += 1;
        }
    }
    Ok(())
}

fn collect_parameter_files(dir: &Path, found: &mut Vec<(FileKind, PathBuf)>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            collect_parameter_files(&path, found)?;
        } else if let Some(kind) = FileKind::from_path(&path) {
            found.push((kind, path));
        }
    }
    Ok(())
}

fn perturb_file(
    kind: FileKind,
    path: &Path,
    target: TargetNuclide,
    config: &ScaleConfig,
    tke_scales: &TkeScales,
) -> Result<()> {
    let text = fs::read_to_string(path)?;
    let rewritten = perturb_text(kind, &text, target, config, tke_scales).map_err(|source| {
        GenerateError::Codec {
            file: path.to_path_buf(),
            source,
        }
    })?;
    write_atomic(path, &rewritten)
}

fn perturb_text(
    kind: FileKind,
    text: &str,
    target: TargetNuclide,
    config: &ScaleConfig,
    tke_scales: &TkeScales,
) -> CodecResult<String> {
    match kind {
        FileKind::GdrParams => {
            gdr_params::encode(&gdr_params::decode(text)?, &config.gdr_params)
        }
        FileKind::LevelDensity => {
            level_density::encode(&level_density::decode(text)?, &config.level_density)
        }
        FileKind::Deformations => {
            deformations::encode(&deformations::decode(text)?, &config.deformations)
        }
        // The mass-ratio table keys on the target identifier as stored,
        // sign convention included; no compound resolution.
        FileKind::Rta => rta::encode(
            &rta::decode(text)?,
            target.zaid(),
            config.rta.scale_factor,
        ),
        FileKind::SpinScaling => spin_scaling::encode(
            &spin_scaling::decode(text)?,
            target,
            config.spin_scaling.alpha_0,
            config.spin_scaling.alpha_slope,
        ),
        FileKind::TkeModel => {
            tke_model::encode(&tke_model::decode(text)?, target, tke_scales)
        }
        FileKind::MassYields => {
            mass_yields::encode(&mass_yields::decode(text)?, target, &config.mass_yields)
        }
    }
}

/// Replace `path` all-or-nothing: write a sibling temp file, then rename
/// over the destination so a concurrent reader never sees a torn file.
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("output");
    let tmp = path.with_file_name(format!("{file_name}.tmp"));
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_write_replaces_contents() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let path = dir.path().join("kcksyst.dat");
        fs::write(&path, "before").expect("seed");
        write_atomic(&path, "after").expect("write");
        assert_eq!(fs::read_to_string(&path).expect("read"), "after");
        assert!(!path.with_file_name("kcksyst.dat.tmp").exists());
    }
}

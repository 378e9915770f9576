//! Subcommand entry points.

use anyhow::{Context, Result};

use cgmf_generate::{ScaleConfig, generate, validate_manifest};
use cgmf_model::TargetNuclide;

use crate::cli::{GenerateArgs, ValidateManifestArgs};

pub fn run_generate(args: &GenerateArgs) -> Result<()> {
    let config = match &args.scales {
        Some(path) => ScaleConfig::from_path(path)
            .with_context(|| format!("load scale configuration {}", path.display()))?,
        None => ScaleConfig::default(),
    };
    let report = generate(
        &args.source_dir,
        &args.output_dir,
        TargetNuclide::new(args.target),
        &config,
    )
    .with_context(|| format!("generate deck in {}", args.output_dir.display()))?;
    println!(
        "{}: {} files copied, {} perturbed, {} skipped",
        args.output_dir.display(),
        report.copied,
        report.perturbed.len(),
        report.skipped.len()
    );
    Ok(())
}

pub fn run_validate_manifest(args: &ValidateManifestArgs) -> Result<()> {
    let rows = validate_manifest(&args.manifest)
        .with_context(|| format!("validate {}", args.manifest.display()))?;
    println!("{}: {} tasks ok", args.manifest.display(), rows.len());
    Ok(())
}

//! Scale-factor configuration, one section per perturbable file.
//!
//! The JSON layout mirrors the sweep tooling's scale-factor templates:
//! sections keyed by file type, each holding named factors or fixed-length
//! factor vectors. Anything omitted defaults to 1.0, so an empty object is
//! a valid identity configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use cgmf_codec::codecs::tke_model::{SIGMA_TKE_LEN, TKE_AH_LEN, TKE_EN_LEN, TkeScales};
use cgmf_model::ScaleSet;

use crate::error::{GenerateError, Result};

fn one() -> f64 {
    1.0
}

/// Uniform factor over the target's R_T(A) array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RtaConfig {
    #[serde(default = "one")]
    pub scale_factor: f64,
}

impl Default for RtaConfig {
    fn default() -> Self {
        RtaConfig { scale_factor: 1.0 }
    }
}

/// Independent factors for the two spin-scaling parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinScalingConfig {
    #[serde(default = "one")]
    pub alpha_0: f64,
    #[serde(default = "one")]
    pub alpha_slope: f64,
}

impl Default for SpinScalingConfig {
    fn default() -> Self {
        SpinScalingConfig {
            alpha_0: 1.0,
            alpha_slope: 1.0,
        }
    }
}

/// Per-parameter factor vectors for the TKE model, grouped 4 + 11 + 11.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TkeModelConfig {
    pub tke_en: Vec<f64>,
    pub tke_ah: Vec<f64>,
    pub sigma_tke: Vec<f64>,
}

impl Default for TkeModelConfig {
    fn default() -> Self {
        TkeModelConfig {
            tke_en: vec![1.0; TKE_EN_LEN],
            tke_ah: vec![1.0; TKE_AH_LEN],
            sigma_tke: vec![1.0; SIGMA_TKE_LEN],
        }
    }
}

impl TkeModelConfig {
    /// Convert to the codec's fixed-size form, validating vector lengths.
    pub fn to_scales(&self) -> Result<TkeScales> {
        let mut scales = TkeScales::default();
        copy_group(&mut scales.tke_en, &self.tke_en, "tke_en")?;
        copy_group(&mut scales.tke_ah, &self.tke_ah, "tke_ah")?;
        copy_group(&mut scales.sigma_tke, &self.sigma_tke, "sigma_tke")?;
        Ok(scales)
    }
}

fn copy_group(dest: &mut [f64], src: &[f64], name: &str) -> Result<()> {
    if src.len() != dest.len() {
        return Err(GenerateError::config(format!(
            "{name} must have {} factors, got {}",
            dest.len(),
            src.len()
        )));
    }
    dest.copy_from_slice(src);
    Ok(())
}

/// The full scale-factor configuration for one generation request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScaleConfig {
    pub gdr_params: ScaleSet,
    pub level_density: ScaleSet,
    pub deformations: ScaleSet,
    pub rta: RtaConfig,
    pub spin_scaling: SpinScalingConfig,
    pub tke_model: TkeModelConfig,
    pub mass_yields: ScaleSet,
}

impl ScaleConfig {
    /// Load from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: ScaleConfig =
            serde_json::from_str(&text).map_err(|source| GenerateError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Check the vector-valued sections against their required lengths.
    pub fn validate(&self) -> Result<()> {
        self.tke_model.to_scales().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_the_identity_configuration() {
        let config: ScaleConfig = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(config, ScaleConfig::default());
        assert!(config.gdr_params.is_identity());
        assert_eq!(config.rta.scale_factor, 1.0);
        config.validate().expect("valid");
    }

    #[test]
    fn sections_deserialize_independently() {
        let config: ScaleConfig = serde_json::from_str(
            r#"{
                "gdr_params": {"M1_E_const": 1.1},
                "level_density": {"STAB_Ematch": 1.05},
                "spin_scaling": {"alpha_0": 0.9},
                "rta": {"scale_factor": 1.2}
            }"#,
        )
        .expect("deserialize");
        assert_eq!(config.gdr_params.factor("M1_E_const"), 1.1);
        assert_eq!(config.level_density.factor("STAB_Ematch"), 1.05);
        assert_eq!(config.spin_scaling.alpha_0, 0.9);
        assert_eq!(config.spin_scaling.alpha_slope, 1.0);
        assert_eq!(config.rta.scale_factor, 1.2);
    }

    #[test]
    fn wrong_tke_vector_length_is_rejected() {
        let config: ScaleConfig = serde_json::from_str(
            r#"{"tke_model": {"tke_en": [1.0, 1.0]}}"#,
        )
        .expect("deserialize");
        let err = config.validate().expect_err("must fail");
        assert!(format!("{err}").contains("tke_en must have 4 factors, got 2"));
    }

    #[test]
    fn unknown_sections_are_rejected() {
        let result: std::result::Result<ScaleConfig, _> =
            serde_json::from_str(r#"{"anisotropy": {}}"#);
        assert!(result.is_err());
    }
}

//! Maps parameter-file names to the codec responsible for them.

use std::fmt;
use std::path::Path;

/// The seven perturbable parameter-file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// `gstrength_gdr_params.dat`: key=value radiative-strength parameters.
    GdrParams,
    /// `kcksyst.dat`: strict 97-column level-density systematics.
    LevelDensity,
    /// `deformations.dat`: ground-state beta2 deformation table.
    Deformations,
    /// `rta.dat`: fixed-prefix R_T(A) mass-ratio arrays.
    Rta,
    /// `spinscalingmodel.dat`: whitespace-stream spin-scaling parameters.
    SpinScaling,
    /// `tkemodel.dat`: fixed-27-token total-kinetic-energy model.
    TkeModel,
    /// `yamodel.dat`: multi-record Gaussian mass-yield model.
    MassYields,
}

impl FileKind {
    pub const ALL: [FileKind; 7] = [
        FileKind::GdrParams,
        FileKind::LevelDensity,
        FileKind::Deformations,
        FileKind::Rta,
        FileKind::SpinScaling,
        FileKind::TkeModel,
        FileKind::MassYields,
    ];

    /// The on-disk file name this codec owns.
    pub fn file_name(self) -> &'static str {
        match self {
            FileKind::GdrParams => "gstrength_gdr_params.dat",
            FileKind::LevelDensity => "kcksyst.dat",
            FileKind::Deformations => "deformations.dat",
            FileKind::Rta => "rta.dat",
            FileKind::SpinScaling => "spinscalingmodel.dat",
            FileKind::TkeModel => "tkemodel.dat",
            FileKind::MassYields => "yamodel.dat",
        }
    }

    /// Identify the codec for a file name, if any.
    pub fn from_file_name(name: &str) -> Option<FileKind> {
        FileKind::ALL
            .into_iter()
            .find(|kind| kind.file_name() == name)
    }

    /// Identify the codec for a path by its final component.
    pub fn from_path(path: &Path) -> Option<FileKind> {
        path.file_name()
            .and_then(|name| name.to_str())
            .and_then(FileKind::from_file_name)
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

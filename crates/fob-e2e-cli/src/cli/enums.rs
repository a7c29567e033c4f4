use clap::ValueEnum;
use fob_e2e::ArtifactKind;

/// Artifact kind selection for the run command
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum Kind {
    /// Compiled JavaScript output
    #[value(name = "js")]
    Js,

    /// TypeScript declaration output
    #[value(name = "dts")]
    Dts,

    /// Code and declarations from the same build
    #[value(name = "all")]
    All,
}

impl Kind {
    /// The single artifact kind to scan, or `None` for [`Kind::All`].
    pub fn artifact_kind(self) -> Option<ArtifactKind> {
        match self {
            Kind::Js => Some(ArtifactKind::Code),
            Kind::Dts => Some(ArtifactKind::Declaration),
            Kind::All => None,
        }
    }
}

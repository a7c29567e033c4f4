#[cfg(test)]
mod tests {
    use crate::cli::{Cli, Command, Kind};
    use clap::Parser;
    use fob_e2e::ArtifactKind;
    use std::path::PathBuf;

    fn run_args(argv: &[&str]) -> crate::cli::RunArgs {
        let cli = Cli::try_parse_from(argv).expect("valid arguments");
        match cli.command {
            Command::Run(args) => args,
        }
    }

    #[test]
    fn test_run_defaults() {
        let args = run_args(&["fob-e2e", "run", "fixtures/basic"]);
        assert_eq!(args.fixture, PathBuf::from("fixtures/basic"));
        assert_eq!(args.kind, Kind::Js);
        assert!(args.engine.is_none());
        assert!(args.args.is_empty());
    }

    #[test]
    fn test_run_engine_with_hyphenated_args() {
        let args = run_args(&[
            "fob-e2e",
            "run",
            "fixtures/basic",
            "--engine",
            "sh",
            "--arg",
            "-c",
            "--arg",
            "true",
            "--kind",
            "all",
        ]);
        assert_eq!(args.engine.as_deref(), Some("sh"));
        assert_eq!(args.args, ["-c", "true"]);
        assert_eq!(args.kind, Kind::All);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["fob-e2e", "run", "f", "-v", "--no-color"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.no_color);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["fob-e2e", "-v", "-q", "run", "f"]).is_err());
    }

    #[test]
    fn test_invalid_kind_rejected() {
        assert!(Cli::try_parse_from(["fob-e2e", "run", "f", "--kind", "css"]).is_err());
    }

    #[test]
    fn test_kind_maps_to_artifact_kind() {
        assert_eq!(Kind::Js.artifact_kind(), Some(ArtifactKind::Code));
        assert_eq!(Kind::Dts.artifact_kind(), Some(ArtifactKind::Declaration));
        assert_eq!(Kind::All.artifact_kind(), None);
    }

    #[test]
    fn test_fixture_is_required() {
        assert!(Cli::try_parse_from(["fob-e2e", "run"]).is_err());
    }
}

//! Library integration tests.

use shapecheck::ShapecheckError;

#[test]
fn error_types_are_public() {
    let err = ShapecheckError::UnknownLanguage {
        name: "cobol".into(),
    };
    assert!(err.to_string().contains("cobol"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> shapecheck::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use shapecheck::cli::{Cli, Commands};

    let cli = Cli::parse_from([
        "shapecheck",
        "check",
        "main.js",
        "-r",
        "reqs.json",
        "--format",
        "json",
    ]);

    if let Commands::Check(args) = cli.command {
        assert_eq!(args.source.to_str(), Some("main.js"));
        assert_eq!(args.format.as_deref(), Some("json"));
    } else {
        panic!("Expected Check command");
    }
}

#[test]
fn global_flags_follow_subcommands() {
    use clap::Parser;
    use shapecheck::cli::{Cli, Commands};

    let cli = Cli::parse_from(["shapecheck", "paths", "-", "--verbose", "--no-color"]);
    assert!(cli.verbose);
    assert!(cli.no_color);
    assert!(matches!(cli.command, Commands::Paths(_)));
}

#[test]
fn top_level_reexports() {
    let report = shapecheck::analyze(
        r#"{"required": [{"pattern": "IfStatement", "description": "branch"}]}"#,
        "if (x) {}",
    );
    let verdict: &shapecheck::Verdict = &report.verdict;
    assert!(verdict.overall_match);
    assert_eq!(shapecheck::PathMode::default(), shapecheck::PathMode::Cumulative);
}

use super::*;

#[test]
fn parses_collect_gdelt_with_defaults() {
    let cli =
        Cli::try_parse_from(["qdata-cli", "collect", "gdelt"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Collect {
            source: SourceArg::Gdelt,
            query: None,
            dry_run: false
        }
    ));
}

#[test]
fn parses_collect_newsapi_with_query_and_dry_run() {
    let cli = Cli::try_parse_from([
        "qdata-cli",
        "collect",
        "newsapi",
        "--query",
        "bond yields",
        "--dry-run",
    ])
    .expect("expected valid cli args");

    let Commands::Collect {
        source,
        query,
        dry_run,
    } = cli.command
    else {
        panic!("expected collect command");
    };
    assert_eq!(source, SourceArg::Newsapi);
    assert_eq!(query.as_deref(), Some("bond yields"));
    assert!(dry_run);
}

#[test]
fn parses_probe_command() {
    let cli = Cli::try_parse_from(["qdata-cli", "probe"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Probe));
}

#[test]
fn rejects_unknown_source() {
    let result = Cli::try_parse_from(["qdata-cli", "collect", "twitter"]);
    assert!(result.is_err());
}

#[test]
fn requires_a_command() {
    let result = Cli::try_parse_from(["qdata-cli"]);
    assert!(result.is_err());
}

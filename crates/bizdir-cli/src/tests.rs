use super::*;

#[test]
fn parses_crawl_with_defaults() {
    let cli = Cli::try_parse_from(["bizdir-cli", "crawl"]).expect("expected valid cli args");

    match cli.command {
        Commands::Crawl {
            start_url,
            output,
            max_pages,
        } => {
            assert!(start_url.is_none());
            assert_eq!(output, PathBuf::from("datoscif_companies.json"));
            assert!(max_pages.is_none());
        }
        other => panic!("expected crawl, got {other:?}"),
    }
}

#[test]
fn parses_crawl_overrides() {
    let cli = Cli::try_parse_from([
        "bizdir-cli",
        "crawl",
        "--start-url",
        "https://www.datoscif.es/empresas-nuevas/empresas-creadas-hoy-en-espana/4",
        "--max-pages",
        "3",
        "--output",
        "out.json",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Crawl {
            start_url: Some(_),
            max_pages: Some(3),
            ..
        }
    ));
}

#[test]
fn enrich_requires_input() {
    assert!(Cli::try_parse_from(["bizdir-cli", "enrich"]).is_err());
}

#[test]
fn parses_enrich_flags() {
    let cli = Cli::try_parse_from([
        "bizdir-cli",
        "enrich",
        "--input",
        "datoscif_companies.json",
        "--batch-size",
        "10",
        "--limit",
        "50",
        "--resume",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Commands::Enrich {
            input,
            output,
            batch_size,
            limit,
            resume,
        } => {
            assert_eq!(input, PathBuf::from("datoscif_companies.json"));
            assert_eq!(output, PathBuf::from("companies_with_phones_enhanced.json"));
            assert_eq!(batch_size, Some(10));
            assert_eq!(limit, Some(50));
            assert!(resume);
        }
        other => panic!("expected enrich, got {other:?}"),
    }
}

#[test]
fn enrich_rejects_zero_batch_size() {
    let result = Cli::try_parse_from([
        "bizdir-cli",
        "enrich",
        "--input",
        "in.json",
        "--batch-size",
        "0",
    ]);
    assert!(result.is_err());
}

#[test]
fn parses_export_without_input() {
    let cli = Cli::try_parse_from(["bizdir-cli", "export"]).expect("expected valid cli args");

    match cli.command {
        Commands::Export { input, output } => {
            assert!(input.is_none());
            assert_eq!(output, PathBuf::from("companies_with_phones.csv"));
        }
        other => panic!("expected export, got {other:?}"),
    }
}

#[test]
fn parses_config_command() {
    let cli = Cli::try_parse_from(["bizdir-cli", "config"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Config));
}

#[test]
fn missing_command_is_an_error() {
    assert!(Cli::try_parse_from(["bizdir-cli"]).is_err());
}

#[test]
fn quiet_flag_is_global() {
    let cli = Cli::try_parse_from(["bizdir-cli", "export", "--quiet"])
        .expect("expected valid cli args");
    assert!(cli.quiet);
}

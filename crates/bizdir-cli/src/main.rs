mod console;
mod crawl;
mod enrich;
mod export;

use std::path::PathBuf;

use bizdir_core::{ProgressSink, TracingSink};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::console::ConsoleSink;

#[derive(Debug, Parser)]
#[command(name = "bizdir-cli")]
#[command(about = "Crawl new-company listings, enrich them with phone numbers, export CSV")]
struct Cli {
    /// Send progress to the log instead of printing it
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Walk the paginated listing and save every company found
    Crawl {
        /// First listing page (defaults to `BIZDIR_START_URL`)
        #[arg(long)]
        start_url: Option<String>,
        /// JSON file to write records to
        #[arg(long, default_value = crawl::DEFAULT_OUTPUT)]
        output: PathBuf,
        /// Stop after this many pages (defaults to `BIZDIR_CRAWL_MAX_PAGES`)
        #[arg(long)]
        max_pages: Option<usize>,
    },
    /// Search for a phone number for every record in a crawl file
    Enrich {
        /// Records produced by `crawl`
        #[arg(long)]
        input: PathBuf,
        /// Result file, rewritten after every batch
        #[arg(long, default_value = enrich::DEFAULT_OUTPUT)]
        output: PathBuf,
        /// Records per checkpoint (defaults to `BIZDIR_BATCH_SIZE`)
        #[arg(long, value_parser = parse_batch_size)]
        batch_size: Option<usize>,
        /// Only process the first N input records
        #[arg(long)]
        limit: Option<usize>,
        /// Continue from an existing result file instead of starting over
        #[arg(long)]
        resume: bool,
    },
    /// Write the records that have a phone number to CSV
    Export {
        /// Result file (defaults to the first known result file found)
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long, default_value = bizdir_store::DEFAULT_EXPORT_PATH)]
        output: PathBuf,
    },
    /// Print the effective configuration
    Config,
}

fn parse_batch_size(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("batch size must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bizdir_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut sink: Box<dyn ProgressSink> = if cli.quiet {
        Box::new(TracingSink)
    } else {
        Box::new(ConsoleSink)
    };

    match cli.command {
        Commands::Crawl {
            start_url,
            output,
            max_pages,
        } => crawl::run_crawl(&config, start_url, &output, max_pages, sink.as_mut()).await,
        Commands::Enrich {
            input,
            output,
            batch_size,
            limit,
            resume,
        } => {
            let args = enrich::EnrichArgs {
                input,
                output,
                batch_size,
                limit,
                resume,
            };
            enrich::run_enrich(&config, args, sink.as_mut()).await
        }
        Commands::Export { input, output } => export::run_export(input.as_deref(), &output),
        Commands::Config => {
            println!("{config:#?}");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests;

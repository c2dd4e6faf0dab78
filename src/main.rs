use anyhow::Result;
use clap::Parser;

use favicon_finder::http::build_http_client;
use favicon_finder::logging::init_logging;
use favicon_finder::processor::{build_finder, process_sites};
use favicon_finder::types::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let client = build_http_client(&cli)?;
    let finder = build_finder(&cli, client);

    process_sites(cli, finder).await
}

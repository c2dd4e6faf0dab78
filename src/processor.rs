use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use reqwest::Client;
use std::io::{self, BufRead};
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::sync::Mutex;

use crate::finder::Finder;
use crate::icon::Icon;
use crate::logger::TracingLogger;
use crate::output::{CSV_HEADER, format_csv_line, format_json_line, format_plain_output};
use crate::types::{Cli, OutputFormat};
use crate::utils::normalize_url_scheme;

/// Shared output state for concurrent sites
struct ProcessingContext {
    output_writer: Option<Arc<Mutex<BufWriter<File>>>>,
    csv_header_written: Mutex<bool>,
}

/// Build a finder from CLI discovery and filter options
pub fn build_finder(cli: &Cli, client: Client) -> Finder {
    let mut builder = Finder::builder().client(client).logger(TracingLogger);

    if cli.ignore_well_known {
        builder = builder.ignore_well_known();
    }
    if cli.ignore_manifest {
        builder = builder.ignore_manifest();
    }
    if !cli.mime_type.is_empty() {
        builder = builder.only_mime_types(cli.mime_type.iter().map(|m| m.trim().to_string()));
    }
    if let Some(width) = cli.min_width {
        builder = builder.min_width(width);
    }
    if let Some(width) = cli.max_width {
        builder = builder.max_width(width);
    }
    if let Some(height) = cli.min_height {
        builder = builder.min_height(height);
    }
    if let Some(height) = cli.max_height {
        builder = builder.max_height(height);
    }
    if cli.only_square {
        builder = builder.only_square();
    }
    if cli.ignore_no_size {
        builder = builder.ignore_no_size();
    }

    builder.build()
}

/// Find icons for every site given on the command line or stdin
pub async fn process_sites(cli: Cli, finder: Finder) -> Result<()> {
    let output_writer: Option<Arc<Mutex<BufWriter<File>>>> = if let Some(output_path) = &cli.output
    {
        let file = File::create(output_path)
            .await
            .with_context(|| format!("create {}", output_path))?;
        Some(Arc::new(Mutex::new(BufWriter::new(file))))
    } else {
        None
    };

    let context = ProcessingContext {
        output_writer,
        csv_header_written: Mutex::new(false),
    };

    if let Some(path) = &cli.html {
        process_markup(&cli, &finder, &context, path).await?;
    } else {
        let sites: Vec<String> = if cli.urls.is_empty() {
            io::stdin().lock().lines().map_while(|line| line.ok()).collect()
        } else {
            cli.urls.clone()
        };

        let concurrency_limit = if cli.concurrency == 0 {
            None
        } else {
            Some(cli.concurrency)
        };

        let finder = &finder;
        let cli_ref = &cli;
        let context_ref = &context;
        stream::iter(sites.into_iter().filter(|s| !s.trim().is_empty()))
            .for_each_concurrent(concurrency_limit, |site| async move {
                let site = normalize_url_scheme(&site);
                match finder.find(&site).await {
                    Ok(icons) => write_icons(cli_ref, context_ref, &site, &icons).await,
                    Err(e) => tracing::error!("[{}] - Error: {}", site, e),
                }
            })
            .await;
    }

    // Ensure all buffered output is written to file before exiting
    if let Some(writer) = &context.output_writer {
        let mut writer = writer.lock().await;
        writer.flush().await?;
    }

    Ok(())
}

/// Discover icons in a local markup file ("-" reads stdin)
async fn process_markup(cli: &Cli, finder: &Finder, context: &ProcessingContext, path: &str) -> Result<()> {
    let base_url = cli.base_url.as_deref();
    let icons = if path == "-" {
        finder.find_reader(tokio::io::stdin(), base_url).await?
    } else {
        let file = File::open(path)
            .await
            .with_context(|| format!("open {}", path))?;
        finder.find_reader(file, base_url).await?
    };
    let site = base_url.unwrap_or(path);
    write_icons(cli, context, site, &icons).await;
    Ok(())
}

/// Format one site's icons and write them as a single block
async fn write_icons(cli: &Cli, context: &ProcessingContext, site: &str, icons: &[Icon]) {
    if icons.is_empty() {
        tracing::info!("[{}] - no icons found", site);
        return;
    }

    let mut output_str = String::new();
    if let OutputFormat::Csv = cli.format {
        let mut header_written = context.csv_header_written.lock().await;
        if !*header_written {
            output_str.push_str(CSV_HEADER);
            *header_written = true;
        }
    }

    let colored = cli.output.is_none() && !cli.no_color;
    for icon in icons {
        let line = match cli.format {
            OutputFormat::Plain => format_plain_output(site, icon, &cli.strf, colored),
            OutputFormat::Jsonl => format_json_line(site, icon),
            OutputFormat::Csv => format_csv_line(site, icon),
        };
        output_str.push_str(&line);
    }

    write_output(output_str, &context.output_writer).await;
}

/// Write output to file or stdout
async fn write_output(output_str: String, output_writer: &Option<Arc<Mutex<BufWriter<File>>>>) {
    if let Some(writer) = output_writer {
        let mut writer = writer.lock().await;
        if let Err(e) = writer.write_all(output_str.as_bytes()).await {
            tracing::error!("Error writing to output file: {}", e);
        }
    } else {
        print!("{}", output_str);
    }
}

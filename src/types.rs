use clap::Parser;

/// Output format options
#[derive(clap::ValueEnum, Debug, Clone, Default)]
pub enum OutputFormat {
    #[default]
    Plain,
    Jsonl,
    Csv,
}

/// CLI arguments structure
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Site URLs to inspect. Read from stdin, one per line, when omitted.
    pub urls: Vec<String>,

    // NETWORK
    /// Timeout for each request in seconds.
    #[arg(long, default_value_t = 10, help_heading = "NETWORK")]
    pub timeout: u64,

    /// Maximum number of sites processed concurrently (0 for unlimited).
    #[arg(long, default_value_t = 0, help_heading = "NETWORK")]
    pub concurrency: usize,

    /// Use a proxy for requests (e.g., "http://127.0.0.1:8080").
    #[arg(long, help_heading = "NETWORK")]
    pub proxy: Option<String>,

    /// Accept invalid TLS certificates.
    #[arg(long, help_heading = "NETWORK")]
    pub insecure: bool,

    /// Whether to follow HTTP redirects.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set, help_heading = "NETWORK")]
    pub follow_redirect: bool,

    /// Custom headers to add to every request (e.g., "User-Agent: my-app").
    #[arg(short = 'H', long, help_heading = "NETWORK")]
    pub headers: Vec<String>,

    // DISCOVERY
    /// Skip /favicon.ico and /apple-touch-icon.png.
    #[arg(long, help_heading = "DISCOVERY")]
    pub ignore_well_known: bool,

    /// Don't read web app manifests.
    #[arg(long, help_heading = "DISCOVERY")]
    pub ignore_manifest: bool,

    /// Read markup from a file ("-" for stdin) instead of fetching sites.
    #[arg(long, help_heading = "DISCOVERY")]
    pub html: Option<String>,

    /// Base URL for resolving links in --html markup.
    #[arg(long, requires = "html", help_heading = "DISCOVERY")]
    pub base_url: Option<String>,

    // FILTER
    /// Only keep icons of these MIME types (e.g., "image/png,image/jpeg").
    #[arg(long, value_delimiter = ',', help_heading = "FILTER")]
    pub mime_type: Vec<String>,

    /// Minimum icon width.
    #[arg(long, help_heading = "FILTER")]
    pub min_width: Option<u32>,

    /// Maximum icon width.
    #[arg(long, help_heading = "FILTER")]
    pub max_width: Option<u32>,

    /// Minimum icon height.
    #[arg(long, help_heading = "FILTER")]
    pub min_height: Option<u32>,

    /// Maximum icon height.
    #[arg(long, help_heading = "FILTER")]
    pub max_height: Option<u32>,

    /// Only keep square icons (icons of unknown size are kept).
    #[arg(long, help_heading = "FILTER")]
    pub only_square: bool,

    /// Skip icons whose size is unknown.
    #[arg(long, help_heading = "FILTER")]
    pub ignore_no_size: bool,

    // OUTPUT
    /// Output file to save results (instead of stdout).
    #[arg(short, long, help_heading = "OUTPUT")]
    pub output: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Plain, help_heading = "OUTPUT")]
    pub format: OutputFormat,

    #[arg(
        short = 'S',
        long,
        help_heading = "OUTPUT",
        long_help = "Custom format string for plain output (e.g. \"%width %url\").\nPlaceholders: %site, %url, %mimetype, %ext, %width, %height, %hash"
    )]
    pub strf: Option<String>,

    /// Disable color output.
    #[arg(long, help_heading = "OUTPUT")]
    pub no_color: bool,

    /// Log discovery progress to stderr.
    #[arg(short, long, help_heading = "OUTPUT")]
    pub verbose: bool,
}

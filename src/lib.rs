//! Find icons for websites.
//!
//! Icons are collected from the page markup (`<link>` icons, Open Graph and
//! Twitter images), the page's web app manifest, and well-known paths such as
//! `/favicon.ico`. Results are deduplicated, filtered and sorted widest first.
//!
//! ```no_run
//! # async fn run() -> favicon_finder::Result<()> {
//! let finder = favicon_finder::Finder::builder()
//!     .only_png()
//!     .min_width(64)
//!     .build();
//! for icon in finder.find("https://www.rust-lang.org/").await? {
//!     println!("{}", icon);
//! }
//! # Ok(())
//! # }
//! ```

pub mod constants;
pub mod error;
pub mod extract;
pub mod filter;
pub mod finder;
pub mod http;
pub mod icon;
pub mod logger;
pub mod logging;
pub mod output;
pub mod processor;
pub mod rank;
pub mod types;
pub mod utils;

pub use error::{FaviconError, Result};
pub use filter::Filter;
pub use finder::{Finder, FinderBuilder, find, find_html};
pub use http::{Fetch, Fetched, HttpFetcher, MemoryFetcher};
pub use icon::Icon;
pub use logger::{Logger, NullLogger, TracingLogger};

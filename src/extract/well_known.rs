use url::Url;

use crate::constants::WELL_KNOWN_ICONS;
use crate::http::Fetch;
use crate::icon::Icon;
use crate::logger::Logger;
use crate::utils::site_root;

/// Look for conventional icon files in the server root.
///
/// A name is kept only when retrieving it succeeds; failures are logged and
/// skipped. Nothing is fetched when `base` has no host.
pub async fn fetch_well_known(fetcher: &dyn Fetch, logger: &dyn Logger, base: &Url) -> Vec<Icon> {
    let Some(root) = site_root(base) else {
        return Vec::new();
    };

    let mut icons = Vec::new();
    for name in WELL_KNOWN_ICONS {
        let url = format!("{}{}", root, name);
        match fetcher.fetch(&url).await {
            Ok(_) => {
                logger.record(&format!("(well-known) {}", url));
                icons.push(Icon::new(url));
            }
            Err(e) => logger.record(&format!("(well-known) {}", e)),
        }
    }
    icons
}

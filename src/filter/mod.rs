use std::fmt;
use std::sync::Arc;

use crate::constants::{MIME_ICO, MIME_ICO_MS, MIME_PNG};
use crate::icon::Icon;

/// Accepts, rejects or rewrites an icon.
///
/// Returning `None` drops the icon and skips any remaining filters.
#[derive(Clone)]
pub struct Filter(Arc<dyn Fn(Icon) -> Option<Icon> + Send + Sync>);

impl Filter {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Icon) -> Option<Icon> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Filter that keeps icons matching `predicate` unchanged.
    pub fn keep<P>(predicate: P) -> Self
    where
        P: Fn(&Icon) -> bool + Send + Sync + 'static,
    {
        Self::new(move |icon| predicate(&icon).then_some(icon))
    }

    pub fn apply(&self, icon: Icon) -> Option<Icon> {
        (self.0)(icon)
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Filter")
    }
}

/// Run `icon` through `filters` in order, stopping at the first rejection.
pub fn apply_filters(icon: Icon, filters: &[Filter]) -> Option<Icon> {
    filters
        .iter()
        .try_fold(icon, |icon, filter| filter.apply(icon))
}

/// Keep icons whose MIME type is one of `mime_types`.
pub fn only_mime_types<I, S>(mime_types: I) -> Filter
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let allowed: Vec<String> = mime_types.into_iter().map(Into::into).collect();
    Filter::keep(move |icon| allowed.iter().any(|m| *m == icon.mime_type))
}

pub fn only_png() -> Filter {
    only_mime_types([MIME_PNG])
}

pub fn only_ico() -> Filter {
    only_mime_types([MIME_ICO, MIME_ICO_MS])
}

/// Keep square icons. Icons of unknown size pass.
pub fn only_square() -> Filter {
    Filter::keep(Icon::is_square)
}

pub fn ignore_no_size() -> Filter {
    Filter::keep(Icon::has_known_size)
}

pub fn min_width(width: u32) -> Filter {
    Filter::keep(move |icon| icon.width >= width)
}

pub fn max_width(width: u32) -> Filter {
    Filter::keep(move |icon| icon.width <= width)
}

pub fn min_height(height: u32) -> Filter {
    Filter::keep(move |icon| icon.height >= height)
}

pub fn max_height(height: u32) -> Filter {
    Filter::keep(move |icon| icon.height <= height)
}

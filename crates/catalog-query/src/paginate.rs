//! Page slicing with clamped page numbers.

use catalog_record::CatalogRecord;
use tracing::debug;

use crate::config::QueryConfig;

/// One page of a record view.
///
/// `from` and `to` are the 1-based inclusive positions of the page's first
/// and last rows within the whole view; both are `None` on an empty page.
///
/// # Example
///
/// ```rust
/// use catalog_query::Collection;
/// use catalog_record::CatalogRecord;
///
/// let products = Collection::new((1..=7).map(CatalogRecord::new).collect());
///
/// let page = products.query().paginate(3, 3);
/// assert_eq!(page.data.len(), 1);
/// assert_eq!((page.from, page.to), (Some(7), Some(7)));
/// assert!(!page.has_more_pages);
///
/// // Out-of-range pages clamp instead of failing.
/// assert_eq!(products.query().paginate(99, 3).current_page, 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Page<'a> {
    /// Rows on this page, in view order.
    pub data: Vec<&'a CatalogRecord>,
    /// Page actually served, after clamping.
    pub current_page: usize,
    /// Page size actually used.
    pub per_page: usize,
    /// Number of rows in the whole view.
    pub total: usize,
    /// Last page number; 1 when the view is empty.
    pub last_page: usize,
    /// Position of the first row on this page.
    pub from: Option<usize>,
    /// Position of the last row on this page.
    pub to: Option<usize>,
    /// Whether pages follow this one.
    pub has_more_pages: bool,
}

impl<'a> Page<'a> {
    /// Number of rows on this page.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if this page holds no rows.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns true if this is the first page.
    pub fn on_first_page(&self) -> bool {
        self.current_page == 1
    }

    /// The next page number, if any.
    pub fn next_page(&self) -> Option<usize> {
        self.has_more_pages.then_some(self.current_page + 1)
    }

    /// The previous page number, if any.
    pub fn previous_page(&self) -> Option<usize> {
        (self.current_page > 1).then(|| self.current_page - 1)
    }
}

pub(crate) fn paginate<'a>(
    rows: Vec<&'a CatalogRecord>,
    page: usize,
    per_page: usize,
    config: &QueryConfig,
) -> Page<'a> {
    let per_page = config.resolve_per_page(per_page);
    let total = rows.len();
    let last_page = total.div_ceil(per_page).max(1);
    let current_page = page.clamp(1, last_page);
    if current_page != page {
        debug!(requested = page, served = current_page, last_page, "page clamped");
    }

    let offset = (current_page - 1) * per_page;
    let end = (offset + per_page).min(total);
    let data: Vec<&'a CatalogRecord> = rows
        .into_iter()
        .skip(offset)
        .take(end.saturating_sub(offset))
        .collect();
    let (from, to) = if data.is_empty() {
        (None, None)
    } else {
        (Some(offset + 1), Some(end))
    };

    Page {
        data,
        current_page,
        per_page,
        total,
        last_page,
        from,
        to,
        has_more_pages: current_page < last_page,
    }
}

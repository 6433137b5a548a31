//! Configuration types for the collection engine.

/// Per-collection query settings.
///
/// Everything else is a per-call parameter; there is no global or
/// environment-driven configuration.
///
/// # Example
///
/// ```rust
/// use catalog_query::QueryConfig;
///
/// let config = QueryConfig::builder()
///     .with_default_per_page(20)
///     .with_max_per_page(100)
///     .with_numeric_strings(true)
///     .build();
///
/// assert_eq!(config.default_per_page, 20);
/// assert_eq!(config.max_per_page, Some(100));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryConfig {
    /// Page size used when `paginate` is called with `per_page == 0`.
    pub default_per_page: usize,
    /// Upper bound applied to every requested page size (None = unbounded).
    pub max_per_page: Option<usize>,
    /// Treat numeric-looking strings (`"19.90"`) as numbers in range
    /// filters, comparisons, numeric sorting and aggregates.
    pub numeric_strings: bool,
    /// Run filters and aggregates on the rayon pool (requires the
    /// `parallel` feature).
    pub parallel: bool,
    /// Minimum number of rows before the parallel path is taken.
    pub parallel_threshold: usize,
}

impl QueryConfig {
    /// Creates a new builder for QueryConfig.
    pub fn builder() -> QueryConfigBuilder {
        QueryConfigBuilder::default()
    }

    /// Resolves a requested page size against the defaults and bounds.
    pub(crate) fn resolve_per_page(&self, requested: usize) -> usize {
        let per_page = if requested == 0 {
            self.default_per_page
        } else {
            requested
        };
        let per_page = match self.max_per_page {
            Some(max) => per_page.min(max),
            None => per_page,
        };
        per_page.max(1)
    }

    /// Returns true if a view of `rows` rows should use the parallel path.
    #[cfg(feature = "parallel")]
    pub(crate) fn use_parallel(&self, rows: usize) -> bool {
        self.parallel && rows >= self.parallel_threshold
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_per_page: 15,
            max_per_page: None,
            numeric_strings: false,
            parallel: false,
            parallel_threshold: 10_000,
        }
    }
}

/// Builder for QueryConfig.
#[derive(Debug, Clone, Default)]
pub struct QueryConfigBuilder {
    default_per_page: Option<usize>,
    max_per_page: Option<usize>,
    numeric_strings: bool,
    parallel: bool,
    parallel_threshold: Option<usize>,
}

impl QueryConfigBuilder {
    /// Sets the fallback page size (values below 1 are raised to 1).
    pub fn with_default_per_page(mut self, per_page: usize) -> Self {
        self.default_per_page = Some(per_page);
        self
    }

    /// Caps every requested page size.
    pub fn with_max_per_page(mut self, max: usize) -> Self {
        self.max_per_page = Some(max);
        self
    }

    /// Enables or disables numeric interpretation of strings.
    pub fn with_numeric_strings(mut self, enabled: bool) -> Self {
        self.numeric_strings = enabled;
        self
    }

    /// Enables or disables parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the row count at which parallel execution kicks in.
    pub fn with_parallel_threshold(mut self, rows: usize) -> Self {
        self.parallel_threshold = Some(rows);
        self
    }

    /// Builds the QueryConfig.
    pub fn build(self) -> QueryConfig {
        let defaults = QueryConfig::default();
        QueryConfig {
            default_per_page: self
                .default_per_page
                .unwrap_or(defaults.default_per_page)
                .max(1),
            max_per_page: self.max_per_page.map(|max| max.max(1)),
            numeric_strings: self.numeric_strings,
            parallel: self.parallel,
            parallel_threshold: self
                .parallel_threshold
                .unwrap_or(defaults.parallel_threshold),
        }
    }
}

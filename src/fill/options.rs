//! Fill options.

/// Options for filling a template.
#[derive(Debug, Clone)]
pub struct FillOptions {
    /// Whether header and footer stories are filled
    pub include_headers_footers: bool,

    /// How the creditor table is recognized
    pub creditor_table: CreditorTableConfig,
}

impl FillOptions {
    /// Create new fill options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable filling of headers and footers.
    pub fn with_headers_footers(mut self, include: bool) -> Self {
        self.include_headers_footers = include;
        self
    }

    /// Set the creditor table configuration.
    pub fn with_creditor_table(mut self, config: CreditorTableConfig) -> Self {
        self.creditor_table = config;
        self
    }
}

impl Default for FillOptions {
    fn default() -> Self {
        Self {
            include_headers_footers: true,
            creditor_table: CreditorTableConfig::default(),
        }
    }
}

/// Markers used to find the creditor table and its trailing section.
///
/// Markers and table text are compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditorTableConfig {
    /// Marker that must appear in the header row
    pub header_marker: String,

    /// At least one of these must also appear in the header row
    pub obligation_markers: Vec<String>,

    /// Marker of the "section 2" block that follows the creditor rows
    pub section_marker: String,
}

impl CreditorTableConfig {
    /// Create a configuration with the default markers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the header marker.
    pub fn with_header_marker(mut self, marker: impl Into<String>) -> Self {
        self.header_marker = marker.into();
        self
    }

    /// Replace the obligation markers.
    pub fn with_obligation_markers<S: Into<String>>(
        mut self,
        markers: impl IntoIterator<Item = S>,
    ) -> Self {
        self.obligation_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    /// Set the section 2 marker.
    pub fn with_section_marker(mut self, marker: impl Into<String>) -> Self {
        self.section_marker = marker.into();
        self
    }
}

impl Default for CreditorTableConfig {
    fn default() -> Self {
        Self {
            header_marker: "кредитор".to_string(),
            obligation_markers: vec![
                "обязательство".to_string(),
                "денежным обязательствам".to_string(),
            ],
            section_marker: "обязательные платежи".to_string(),
        }
    }
}

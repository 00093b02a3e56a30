//! Package loading options.

/// Options for opening DOCX packages.
#[derive(Debug, Clone)]
pub struct OpenOptions {
    /// Error handling mode for header and footer parts
    pub error_mode: ErrorMode,

    /// Whether to parse header and footer parts at all
    pub load_stories: bool,
}

impl OpenOptions {
    /// Create new open options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (keep unparseable header/footer parts as raw bytes).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable or disable header/footer parsing.
    pub fn with_stories(mut self, load: bool) -> Self {
        self.load_stories = load;
        self
    }
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            load_stories: true,
        }
    }
}

/// Error handling mode while opening a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any malformed part
    #[default]
    Strict,
    /// Skip malformed header/footer parts and continue
    Lenient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_options_builder() {
        let options = OpenOptions::new().lenient().with_stories(false);
        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert!(!options.load_stories);
    }

    #[test]
    fn test_default_options() {
        let options = OpenOptions::default();
        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert!(options.load_stories);
    }
}

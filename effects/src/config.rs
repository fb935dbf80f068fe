//! Preprocessor configuration.

/// Which line-correction directives are emitted around an include expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineDirectives {
    /// `#line` before the included text (pointing into the included file)
    /// and after it (restoring the including file).
    ///
    /// The leading directive lands in front of the included text, so an
    /// include that pulls in a `#version` line must not use this mode.
    Bracket,
    /// Only the restoring `#line` after the included text.
    #[default]
    Restore,
    /// No directives at all.
    Off,
}

/// Tokens and options used when scanning multi-effect source files.
///
/// # Example
///
/// ```ignore
/// let config = PreprocessorConfig::default()
///     .with_extension(".shader")
///     .with_line_directives(LineDirectives::Bracket);
/// let preprocessor = EffectPreprocessor::new(config);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreprocessorConfig {
    extension: String,
    marker: String,
    include: String,
    separator: char,
    line_directives: LineDirectives,
}

impl Default for PreprocessorConfig {
    fn default() -> Self {
        Self {
            extension: ".glsl".to_string(),
            marker: "--".to_string(),
            include: "#include".to_string(),
            separator: '.',
            line_directives: LineDirectives::Restore,
        }
    }
}

impl PreprocessorConfig {
    /// Extension appended to a key's file prefix to form the file name.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Token that opens a new effect when it starts a line.
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Token that starts an include directive.
    pub fn include(&self) -> &str {
        &self.include
    }

    /// Separator between the file prefix and the effect name of a key.
    pub fn separator(&self) -> char {
        self.separator
    }

    pub fn line_directives(&self) -> LineDirectives {
        self.line_directives
    }

    /// Set the shader file extension. A missing leading dot is added.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.extension = if extension.is_empty() || extension.starts_with('.') {
            extension
        } else {
            format!(".{extension}")
        };
        self
    }

    /// Set the token that opens an effect.
    ///
    /// # Panics
    ///
    /// Panics if `marker` is empty.
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        assert!(!self.marker.is_empty(), "effect marker must not be empty");
        self
    }

    /// Set the token that starts an include directive.
    ///
    /// # Panics
    ///
    /// Panics if `include` is empty.
    pub fn with_include(mut self, include: impl Into<String>) -> Self {
        self.include = include.into();
        assert!(!self.include.is_empty(), "include token must not be empty");
        self
    }

    /// Set the separator between file prefix and effect name.
    ///
    /// # Panics
    ///
    /// Panics on `/`, `\` or whitespace. Path separators belong to the
    /// file prefix and keys are trimmed.
    pub fn with_separator(mut self, separator: char) -> Self {
        assert!(
            !matches!(separator, '/' | '\\') && !separator.is_whitespace(),
            "'{separator}' cannot separate file prefix and effect name"
        );
        self.separator = separator;
        self
    }

    pub fn with_line_directives(mut self, line_directives: LineDirectives) -> Self {
        self.line_directives = line_directives;
        self
    }
}

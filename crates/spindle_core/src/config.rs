//! Generator configuration.

/// Settings for file framing and import aliasing.
///
/// # Example
///
/// ```
/// use spindle_core::GeneratorConfig;
///
/// let config = GeneratorConfig::default()
///     .with_banner("// Generated. DO NOT EDIT.")
///     .without_build_tag()
///     .with_alias_prefix("dep");
/// assert_eq!(config.alias_prefix(), "dep");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    banner: String,
    build_tag: Option<String>,
    alias_prefix: String,
}

impl GeneratorConfig {
    /// Banner written as the first line of every generated file.
    pub const DEFAULT_BANNER: &'static str = "// Code generated by spindle. DO NOT EDIT.";

    /// Build constraint keeping generated code and injector declarations
    /// apart.
    pub const DEFAULT_BUILD_TAG: &'static str = "!spindleinject";

    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the banner line.
    #[must_use]
    pub fn with_banner(mut self, banner: impl Into<String>) -> Self {
        self.banner = banner.into();
        self
    }

    /// Sets the build constraint expression.
    #[must_use]
    pub fn with_build_tag(mut self, tag: impl Into<String>) -> Self {
        self.build_tag = Some(tag.into());
        self
    }

    /// Omits the build constraint line.
    #[must_use]
    pub fn without_build_tag(mut self) -> Self {
        self.build_tag = None;
        self
    }

    /// Sets the prefix of import aliases (`pkg` gives `pkg0`, `pkg1`, ...).
    #[must_use]
    pub fn with_alias_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.alias_prefix = prefix.into();
        self
    }

    /// Returns the banner line.
    #[must_use]
    pub fn banner(&self) -> &str {
        &self.banner
    }

    /// Returns the build constraint, if any.
    #[must_use]
    pub fn build_tag(&self) -> Option<&str> {
        self.build_tag.as_deref()
    }

    /// Returns the import alias prefix.
    #[must_use]
    pub fn alias_prefix(&self) -> &str {
        &self.alias_prefix
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            banner: Self::DEFAULT_BANNER.to_string(),
            build_tag: Some(Self::DEFAULT_BUILD_TAG.to_string()),
            alias_prefix: spindle_codegen::ImportTable::DEFAULT_PREFIX.to_string(),
        }
    }
}

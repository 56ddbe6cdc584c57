//! Engine configuration.

use genus_resolver::ResolverConfig;

/// Default resolver recursion limit.
pub const DEFAULT_MAX_DEPTH: usize = genus_resolver::DEFAULT_MAX_DEPTH;

/// Default parser nesting limit.
pub const DEFAULT_MAX_PARSE_DEPTH: usize = genus_parser::DEFAULT_MAX_DEPTH;

/// Limits and switches for a [`TypeEngine`](crate::TypeEngine).
///
/// ```
/// use genus::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_max_depth(32)
///     .with_implicit_packages(["java.lang", "java.util"]);
/// assert_eq!(config.max_depth, 32);
/// assert!(config.cache_substitutions);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Descriptor nesting and inheritance depth before the resolver gives up.
    pub max_depth: usize,
    /// Bracket nesting accepted by the parser.
    pub max_parse_depth: usize,
    /// Memoize substitution maps per context type.
    pub cache_substitutions: bool,
    /// Packages searched when a class name does not resolve as written.
    pub implicit_packages: Vec<String>,
    /// Check parsed types against registry arities in `TypeEngine::parse`.
    pub validate_parsed: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_parse_depth: DEFAULT_MAX_PARSE_DEPTH,
            cache_substitutions: true,
            implicit_packages: vec!["java.lang".to_string()],
            validate_parsed: false,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_parse_depth(mut self, max_parse_depth: usize) -> Self {
        self.max_parse_depth = max_parse_depth;
        self
    }

    pub fn with_cache_substitutions(mut self, enabled: bool) -> Self {
        self.cache_substitutions = enabled;
        self
    }

    /// Replace the implicit package list. An empty list disables fallback
    /// lookup entirely.
    pub fn with_implicit_packages<I, S>(mut self, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.implicit_packages = packages.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_validate_parsed(mut self, enabled: bool) -> Self {
        self.validate_parsed = enabled;
        self
    }

    /// The subset the resolver consumes.
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            max_depth: self.max_depth,
            cache_substitutions: self.cache_substitutions,
        }
    }
}

use waymark_router::MatchOptions;

/// Routing settings.
///
/// Fixed on the [`RouterBuilder`](crate::RouterBuilder) before any route is registered and copied
/// into the sealed [`Router`](crate::Router).
///
/// # Examples
/// ```
/// use waymark::RoutingConfig;
///
/// let config = RoutingConfig::new()
///     .ignore_trailing_slashes(false)
///     .case_insensitive_routes(true);
///
/// assert!(!config.trailing_slashes_ignored());
/// assert!(config.is_case_insensitive());
/// assert!(!config.multiple_slashes_merged());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutingConfig {
    ignore_trailing_slashes: bool,
    treat_multiple_slashes_as_single_slash: bool,
    case_insensitive_routes: bool,
}

impl RoutingConfig {
    /// Creates default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether `/test` and `/test/` are interchangeable.
    ///
    /// When disabled, a template ending with `/` only matches request paths ending with `/`, and
    /// vice versa. Enabled by default.
    pub fn ignore_trailing_slashes(mut self, ignore: bool) -> Self {
        self.ignore_trailing_slashes = ignore;
        self
    }

    /// Sets whether runs of slashes in request paths collapse into one.
    ///
    /// Disabled by default, so `/a//b` has an empty middle segment that no parameter accepts.
    pub fn treat_multiple_slashes_as_single_slash(mut self, merge: bool) -> Self {
        self.treat_multiple_slashes_as_single_slash = merge;
        self
    }

    /// Sets whether static template text compares ASCII-case-insensitively.
    ///
    /// Parameter names stay case-sensitive and captured values keep their casing. Disabled by
    /// default.
    pub fn case_insensitive_routes(mut self, insensitive: bool) -> Self {
        self.case_insensitive_routes = insensitive;
        self
    }

    /// Returns true if trailing slashes are ignored.
    pub fn trailing_slashes_ignored(&self) -> bool {
        self.ignore_trailing_slashes
    }

    /// Returns true if repeated slashes are merged.
    pub fn multiple_slashes_merged(&self) -> bool {
        self.treat_multiple_slashes_as_single_slash
    }

    /// Returns true if static segments ignore ASCII case.
    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive_routes
    }

    pub(crate) fn match_options(&self) -> MatchOptions {
        MatchOptions {
            ignore_trailing_slashes: self.ignore_trailing_slashes,
            case_insensitive: self.case_insensitive_routes,
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        RoutingConfig {
            ignore_trailing_slashes: true,
            treat_multiple_slashes_as_single_slash: false,
            case_insensitive_routes: false,
        }
    }
}

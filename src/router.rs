use ahash::AHashMap;
use http::Method;
use serde::Deserialize;
use waymark_router::{Params, RequestPath, ResourceId, ResourcePath};

use crate::{
    config::RoutingConfig,
    error::MissingParameterError,
    registry::{FilterKind, RouterBuilder},
};

type Routes<T> = waymark_router::Router<T>;

/// Sealed, read-only router.
///
/// Built by [`RouterBuilder::seal`]. Lookups are pure functions of the registered routes, the
/// method and the path, so a router can be shared freely between threads.
#[derive(Debug)]
pub struct Router<T> {
    config: RoutingConfig,
    routes: AHashMap<Method, Routes<T>>,
    index: Vec<(Method, ResourceId)>,
    before: Routes<T>,
    after: Routes<T>,
}

impl<T> Router<T> {
    pub(crate) fn new(
        config: RoutingConfig,
        routes: AHashMap<Method, Routes<T>>,
        index: Vec<(Method, ResourceId)>,
        before: Routes<T>,
        after: Routes<T>,
    ) -> Self {
        Router {
            config,
            routes,
            index,
            before,
            after,
        }
    }

    /// Constructs new `RouterBuilder` with default configuration.
    pub fn builder() -> RouterBuilder<T> {
        RouterBuilder::new()
    }

    /// Returns reference to configuration.
    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Finds the handler for a `method` request to `path`.
    ///
    /// Only routes registered for `method` are considered. When several match, the most specific
    /// one wins (see [`waymark_router::Router::recognize`]). Returns `None` when nothing matches.
    pub fn match_route<R>(&self, method: &Method, path: &R) -> Option<MatchResult<'_, T>>
    where
        R: ResourcePath + ?Sized,
    {
        let routes = self.routes.get(method)?;
        let path = self.request_path(path);

        routes
            .recognize(&path, self.config.match_options())
            .and_then(|(handler, params, id)| {
                let (pattern, _) = routes.get(id)?;

                Some(MatchResult {
                    handler,
                    params,
                    template: pattern.pattern(),
                })
            })
    }

    /// Returns all filters of `kind` matching `path`, in registration order.
    ///
    /// Each result carries the parameters bound by its own template.
    pub fn match_filters<R>(&self, kind: FilterKind, path: &R) -> Vec<FilterMatch<'_, T>>
    where
        R: ResourcePath + ?Sized,
    {
        let filters = self.filters_of(kind);
        let path = self.request_path(path);

        filters
            .recognize_all(&path, self.config.match_options())
            .into_iter()
            .filter_map(|(handler, params, id)| {
                let (pattern, _) = filters.get(id)?;

                Some(MatchResult {
                    handler,
                    params,
                    template: pattern.pattern(),
                })
            })
            .collect()
    }

    /// Returns the methods that have a route matching `path`, in the order they were first
    /// registered.
    ///
    /// An empty result for a path that has no route for the requested method distinguishes "not
    /// found" from "method not allowed".
    pub fn allowed_methods<R>(&self, path: &R) -> Vec<Method>
    where
        R: ResourcePath + ?Sized,
    {
        let path = self.request_path(path);
        let opts = self.config.match_options();

        let mut methods = Vec::new();

        for (method, _) in &self.index {
            if methods.contains(method) {
                continue;
            }

            if self
                .routes
                .get(method)
                .map_or(false, |routes| routes.has_match(&path, opts))
            {
                methods.push(method.clone());
            }
        }

        methods
    }

    /// Iterates over registered routes as `(method, template)` pairs, in registration order.
    pub fn routes(&self) -> impl Iterator<Item = (&Method, &str)> {
        self.index.iter().filter_map(move |(method, id)| {
            let (pattern, _) = self.routes.get(method)?.get(*id)?;
            Some((method, pattern.pattern()))
        })
    }

    /// Iterates over filter templates of `kind`, in registration order.
    pub fn filters(&self, kind: FilterKind) -> impl Iterator<Item = &str> {
        self.filters_of(kind)
            .iter()
            .map(|(pattern, _)| pattern.pattern())
    }

    fn filters_of(&self, kind: FilterKind) -> &Routes<T> {
        match kind {
            FilterKind::Before => &self.before,
            FilterKind::After => &self.after,
        }
    }

    fn request_path<'a, R>(&self, path: &'a R) -> RequestPath<'a>
    where
        R: ResourcePath + ?Sized,
    {
        RequestPath::from_resource(path, self.config.multiple_slashes_merged())
    }
}

/// A matched route and the values its template captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult<'a, T> {
    handler: &'a T,
    params: Params,
    template: &'a str,
}

/// A matched filter; filters carry their own bindings.
pub type FilterMatch<'a, T> = MatchResult<'a, T>;

impl<'a, T> MatchResult<'a, T> {
    /// Returns the matched handler.
    pub fn handler(&self) -> &'a T {
        self.handler
    }

    /// Returns the canonical template that matched.
    pub fn template(&self) -> &'a str {
        self.template
    }

    /// Returns the decoded value bound to the parameter `name`.
    ///
    /// Names are case-sensitive.
    ///
    /// # Errors
    /// Returns [`MissingParameterError`] if the matched template has no parameter called `name`.
    pub fn path_param(&self, name: &str) -> Result<&str, MissingParameterError> {
        self.params
            .get(name)
            .ok_or_else(|| MissingParameterError::new(name))
    }

    /// Returns the decoded value captured by the `idx`-th wildcard.
    pub fn splat(&self, idx: usize) -> Option<&str> {
        self.params.splat(idx)
    }

    /// Returns all wildcard captures in left-to-right order.
    pub fn splats(&self) -> &[String] {
        self.params.splats()
    }

    /// Returns all captured values.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Consumes the match, returning its captured values.
    pub fn into_params(self) -> Params {
        self.params
    }

    /// Deserializes the named parameters into `U`.
    ///
    /// # Examples
    /// ```
    /// use http::Method;
    /// use serde::Deserialize;
    /// use waymark::RouterBuilder;
    ///
    /// #[derive(Deserialize)]
    /// struct Info {
    ///     user: String,
    ///     id: u32,
    /// }
    ///
    /// let mut builder = RouterBuilder::new();
    /// builder.get("/:user/posts/:id", ()).unwrap();
    /// let router = builder.seal();
    ///
    /// let matched = router.match_route(&Method::GET, "/alice/posts/7").unwrap();
    /// let info: Info = matched.load().unwrap();
    /// assert_eq!(info.user, "alice");
    /// assert_eq!(info.id, 7);
    /// ```
    pub fn load<'de, U>(&'de self) -> Result<U, serde::de::value::Error>
    where
        U: Deserialize<'de>,
    {
        self.params.load()
    }
}

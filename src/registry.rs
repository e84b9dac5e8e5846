use ahash::{AHashMap, AHashSet};
use http::Method;
use log::{debug, warn};
use waymark_router::{join_paths, PathPattern, PatternKind, ResourceId};

use crate::{config::RoutingConfig, error::PatternError, router::Router};

type Routes<T> = waymark_router::RouterBuilder<T>;

/// Which side of the route handler a filter runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Before,
    After,
}

/// Mutable route and filter registry.
///
/// Templates are compiled as they are registered, so malformed ones are rejected immediately.
/// Call [`seal`](Self::seal) once everything is registered to get the immutable [`Router`].
///
/// # Examples
/// ```
/// use http::Method;
/// use waymark::RouterBuilder;
///
/// let mut builder = RouterBuilder::new();
/// builder.get("/", "index")?;
/// builder.with_prefix("/users", |users| {
///     users.get("", "list")?;
///     users.get("/:id", "show")?;
///     Ok(())
/// })?;
///
/// let router = builder.seal();
/// let matched = router.match_route(&Method::GET, "/users/42").unwrap();
/// assert_eq!(*matched.handler(), "show");
/// assert_eq!(matched.path_param("id")?, "42");
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct RouterBuilder<T> {
    config: RoutingConfig,
    routes: AHashMap<Method, Routes<T>>,
    index: Vec<(Method, ResourceId)>,
    registered: AHashSet<(Method, PathPattern)>,
    before: Routes<T>,
    after: Routes<T>,
    prefix: Vec<String>,
}

impl<T> RouterBuilder<T> {
    /// Creates an empty registry with default configuration.
    pub fn new() -> Self {
        Self::with_config(RoutingConfig::default())
    }

    /// Creates an empty registry with the given configuration.
    pub fn with_config(config: RoutingConfig) -> Self {
        RouterBuilder {
            config,
            routes: AHashMap::default(),
            index: Vec::new(),
            registered: AHashSet::default(),
            before: Routes::default(),
            after: Routes::default(),
            prefix: Vec::new(),
        }
    }

    /// Returns reference to configuration.
    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Registers `handler` for `method` requests matching `template`.
    ///
    /// Inside [`with_prefix`](Self::with_prefix) the template is relative to the group. Registering
    /// the same method and template twice keeps both; the earlier registration always wins.
    ///
    /// # Errors
    /// Returns [`PatternError`] if the template does not compile.
    pub fn register(
        &mut self,
        method: Method,
        template: &str,
        handler: T,
    ) -> Result<&mut Self, PatternError> {
        let pattern = PathPattern::route(&self.full_path(template))?;

        if !self.registered.insert((method.clone(), pattern.clone())) {
            warn!(
                "route {} {} is already registered; the earlier handler takes precedence",
                method,
                pattern.pattern()
            );
        }

        debug!("registering route {} {}", method, pattern.pattern());

        let routes = self.routes.entry(method.clone()).or_default();
        let id = ResourceId(routes.len());
        routes.push(pattern, handler);
        self.index.push((method, id));

        Ok(self)
    }

    /// Registers a before or after filter matching `template`.
    ///
    /// Filters are not bound to a method. Their templates may end with a non sub-path wildcard
    /// (`/p*`) that also matches every path below. Inside a group, `*` on its own stands for the
    /// group path and everything below it.
    ///
    /// # Errors
    /// Returns [`PatternError`] if the template does not compile.
    pub fn register_filter(
        &mut self,
        kind: FilterKind,
        template: &str,
        handler: T,
    ) -> Result<&mut Self, PatternError> {
        let template = if template == "*" && !self.prefix.is_empty() {
            let mut group = self.full_path("");
            if group.ends_with('/') {
                group.pop();
            }
            group.push('*');
            group
        } else if template == "*" {
            template.to_owned()
        } else {
            self.full_path(template)
        };

        let pattern = PathPattern::new(&template, PatternKind::Filter)?;

        debug!("registering {:?} filter {}", kind, pattern.pattern());

        match kind {
            FilterKind::Before => self.before.push(pattern, handler),
            FilterKind::After => self.after.push(pattern, handler),
        };

        Ok(self)
    }

    /// Registers everything added by `group` under `prefix`.
    ///
    /// Groups nest; prefixes are joined with exactly one slash between them. An empty child
    /// template registers the group path itself.
    ///
    /// # Errors
    /// Returns the first [`PatternError`] raised inside `group`. Routes registered before the
    /// error stay registered.
    pub fn with_prefix<F>(&mut self, prefix: &str, group: F) -> Result<&mut Self, PatternError>
    where
        F: FnOnce(&mut Self) -> Result<(), PatternError>,
    {
        self.prefix.push(prefix.to_owned());
        let res = group(self);
        self.prefix.pop();

        res.map(|_| self)
    }

    /// Registers a `GET` route.
    pub fn get(&mut self, template: &str, handler: T) -> Result<&mut Self, PatternError> {
        self.register(Method::GET, template, handler)
    }

    /// Registers a `POST` route.
    pub fn post(&mut self, template: &str, handler: T) -> Result<&mut Self, PatternError> {
        self.register(Method::POST, template, handler)
    }

    /// Registers a `PUT` route.
    pub fn put(&mut self, template: &str, handler: T) -> Result<&mut Self, PatternError> {
        self.register(Method::PUT, template, handler)
    }

    /// Registers a `PATCH` route.
    pub fn patch(&mut self, template: &str, handler: T) -> Result<&mut Self, PatternError> {
        self.register(Method::PATCH, template, handler)
    }

    /// Registers a `DELETE` route.
    pub fn delete(&mut self, template: &str, handler: T) -> Result<&mut Self, PatternError> {
        self.register(Method::DELETE, template, handler)
    }

    /// Registers a `HEAD` route.
    pub fn head(&mut self, template: &str, handler: T) -> Result<&mut Self, PatternError> {
        self.register(Method::HEAD, template, handler)
    }

    /// Registers an `OPTIONS` route.
    pub fn options(&mut self, template: &str, handler: T) -> Result<&mut Self, PatternError> {
        self.register(Method::OPTIONS, template, handler)
    }

    /// Registers a before filter.
    pub fn before(&mut self, template: &str, handler: T) -> Result<&mut Self, PatternError> {
        self.register_filter(FilterKind::Before, template, handler)
    }

    /// Registers an after filter.
    pub fn after(&mut self, template: &str, handler: T) -> Result<&mut Self, PatternError> {
        self.register_filter(FilterKind::After, template, handler)
    }

    /// Finishes registration.
    pub fn seal(self) -> Router<T> {
        debug!(
            "sealing router with {} routes, {} before and {} after filters",
            self.index.len(),
            self.before.len(),
            self.after.len()
        );

        let routes = self
            .routes
            .into_iter()
            .map(|(method, routes)| (method, routes.finish()))
            .collect();

        Router::new(
            self.config,
            routes,
            self.index,
            self.before.finish(),
            self.after.finish(),
        )
    }

    fn full_path(&self, template: &str) -> String {
        join_paths(
            self.prefix
                .iter()
                .map(String::as_str)
                .chain(std::iter::once(template)),
        )
    }
}

impl<T> Default for RouterBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

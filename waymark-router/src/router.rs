use tracing::trace;

use crate::{MatchOptions, Params, PathPattern, RequestPath};

/// Position of a route in the order it was pushed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceId(pub usize);

/// Ordered list of compiled patterns and their values.
///
/// The router holds no method information; callers keep one router per HTTP method (or per
/// filter kind) and pick the right one before matching.
#[derive(Debug, Clone)]
pub struct Router<T> {
    routes: Vec<(PathPattern, T)>,
}

impl<T> Router<T> {
    /// Constructs new `RouterBuilder` with empty route list.
    pub fn build() -> RouterBuilder<T> {
        RouterBuilder { routes: Vec::new() }
    }

    /// Finds the most specific route matching `path`.
    ///
    /// Every route is considered. Among the ones that match, the one whose segments rank best
    /// from the left wins: static text beats a regex-constrained segment, which beats a parameter
    /// or wildcard. Routes that tie keep their push order, so the earlier one wins.
    pub fn recognize(
        &self,
        path: &RequestPath<'_>,
        opts: MatchOptions,
    ) -> Option<(&T, Params, ResourceId)> {
        let mut best: Option<usize> = None;

        for (idx, (pattern, _)) in self.routes.iter().enumerate() {
            if let Some(best) = best {
                // a route that can't rank strictly better is not worth matching
                if pattern.ranks() >= self.routes[best].0.ranks() {
                    continue;
                }
            }

            if pattern.is_match(path, opts) {
                best = Some(idx);
            }
        }

        let idx = best?;
        let (pattern, val) = &self.routes[idx];
        let params = pattern.capture(path, opts)?;

        trace!("path {:?} matched pattern {:?}", path.as_str(), pattern.pattern());

        Some((val, params, ResourceId(idx)))
    }

    /// Returns every route matching `path`, in push order.
    pub fn recognize_all(
        &self,
        path: &RequestPath<'_>,
        opts: MatchOptions,
    ) -> Vec<(&T, Params, ResourceId)> {
        self.routes
            .iter()
            .enumerate()
            .filter_map(|(idx, (pattern, val))| {
                pattern
                    .capture(path, opts)
                    .map(|params| (val, params, ResourceId(idx)))
            })
            .collect()
    }

    /// Returns true if any route matches `path`.
    pub fn has_match(&self, path: &RequestPath<'_>, opts: MatchOptions) -> bool {
        self.routes
            .iter()
            .any(|(pattern, _)| pattern.is_match(path, opts))
    }

    /// Returns the pattern and value stored for `id`.
    pub fn get(&self, id: ResourceId) -> Option<(&PathPattern, &T)> {
        self.routes
            .get(id.0)
            .map(|(pattern, val)| (pattern, val))
    }

    /// Iterates over all routes in push order.
    pub fn iter(&self) -> impl Iterator<Item = (&PathPattern, &T)> {
        self.routes.iter().map(|(pattern, val)| (pattern, val))
    }

    /// Returns the number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if the router has no routes.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Builder for an ordered [routing](Router) list.
#[derive(Debug)]
pub struct RouterBuilder<T> {
    routes: Vec<(PathPattern, T)>,
}

impl<T> RouterBuilder<T> {
    /// Adds a new route to the end of the routing list.
    ///
    /// Returns mutable references to elements of the new route.
    pub fn push(&mut self, pattern: PathPattern, val: T) -> (&PathPattern, &mut T) {
        self.routes.push((pattern, val));

        let idx = self.routes.len() - 1;
        let (pattern, val) = &mut self.routes[idx];
        (pattern, val)
    }

    /// Returns the number of routes pushed so far.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if nothing has been pushed.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Finish configuration and create router instance.
    pub fn finish(self) -> Router<T> {
        Router {
            routes: self.routes,
        }
    }
}

impl<T> Default for RouterBuilder<T> {
    fn default() -> Self {
        Router::build()
    }
}

//! Request path routing for web frameworks.
//!
//! Waymark decides which handler serves a request and which filters run around it. Routes are
//! bound to an HTTP method and a path template; filters run before or after the route handler and
//! are matched on the path alone.
//!
//! # Examples
//! ```
//! use http::Method;
//! use waymark::{FilterKind, RouterBuilder};
//!
//! let mut builder = RouterBuilder::new();
//! builder
//!     .get("/users/:id", "show user")?
//!     .get("/users/me", "show current user")?
//!     .before("/users*", "authenticate")?;
//! let router = builder.seal();
//!
//! let matched = router.match_route(&Method::GET, "/users/42").unwrap();
//! assert_eq!(*matched.handler(), "show user");
//! assert_eq!(matched.path_param("id")?, "42");
//!
//! let matched = router.match_route(&Method::GET, "/users/me").unwrap();
//! assert_eq!(*matched.handler(), "show current user");
//!
//! let filters = router.match_filters(FilterKind::Before, "/users/42");
//! assert_eq!(*filters[0].handler(), "authenticate");
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! # Path Templates
//! Templates are split on `/`. Each segment is static text, a named parameter (`:id`), a wildcard
//! (`*`) or a regex constraining the segment at its position (`[0-9]+`). Filters may also end with
//! a non sub-path wildcard (`/p*`) that matches `/p` and everything below it. See
//! [`PathPattern`](waymark_router::PathPattern) for details.
//!
//! # Matching
//! Request paths are split before they are percent-decoded, so `/TE%2FST` is a single segment
//! whose value is `TE/ST`. When several routes match, static segments beat regex segments, which
//! beat parameters and wildcards, comparing from the left. Routes that are equally specific keep
//! their registration order.

#![deny(rust_2018_idioms, nonstandard_style)]
#![warn(future_incompatible)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod config;
pub mod error;
pub mod global;
mod handler;
mod registry;
mod router;

pub use waymark_router::{Params, PathPattern, ResourcePath};

pub use crate::{
    config::RoutingConfig,
    error::{MissingParameterError, PatternError, RegistryError},
    handler::{handler, BoxHandler, Handler},
    registry::{FilterKind, RouterBuilder},
    router::{FilterMatch, MatchResult, Router},
};

pub mod dev {
    //! Lower level routing primitives.

    pub use waymark_router::{
        decode_segment, join_paths, MatchOptions, ParamsDeserializer, PatternKind, RequestPath,
        Segment,
    };
}

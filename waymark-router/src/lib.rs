//! Path template compilation and request path matching.
//!
//! Templates such as `/users/:id`, `/files/*` or `/:slug/[0-9]+` are compiled once into a
//! [`PathPattern`] made of typed [`Segment`]s. Request paths are split into raw segments by
//! [`RequestPath`] and matched structurally, producing [`Params`].

#![deny(rust_2018_idioms, nonstandard_style)]
#![warn(future_incompatible)]

mod de;
mod error;
mod params;
mod path;
mod pattern;
mod quoter;
mod resource_path;
mod router;
mod segment_regex;

pub use self::{
    de::ParamsDeserializer,
    error::PatternError,
    params::{Params, ParamsIter},
    path::{join_paths, RequestPath},
    pattern::{MatchOptions, PathPattern, PatternKind, Segment},
    quoter::decode_segment,
    resource_path::ResourcePath,
    router::{ResourceId, Router, RouterBuilder},
    segment_regex::SegmentRegex,
};

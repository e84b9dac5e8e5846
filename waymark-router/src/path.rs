use smallvec::SmallVec;

use crate::ResourcePath;

/// A request path split into raw segments.
///
/// Splitting happens on the un-decoded path so that an encoded slash (`%2F`) stays inside its
/// segment. Segments are percent-decoded individually, and only when a pattern asks for them.
///
/// A single leading slash is stripped. A single trailing slash is stripped and remembered, so
/// `/test` and `/test/` both produce the segment list `["test"]`. The root path `/` has no
/// segments and no trailing slash.
#[derive(Debug, Clone)]
pub struct RequestPath<'a> {
    path: &'a str,
    segments: SmallVec<[&'a str; 8]>,
    trailing_slash: bool,
}

impl<'a> RequestPath<'a> {
    /// Splits `path` keeping empty segments produced by repeated slashes.
    pub fn new(path: &'a str) -> Self {
        Self::parse(path, false)
    }

    /// Splits `path`, dropping empty segments produced by repeated slashes when `merge_slashes`
    /// is set.
    pub fn parse(path: &'a str, merge_slashes: bool) -> Self {
        let rest = path.strip_prefix('/').unwrap_or(path);

        let (rest, trailing_slash) = match rest.strip_suffix('/') {
            Some(rest) => (rest, true),
            None => (rest, false),
        };

        let mut segments = SmallVec::new();

        if !rest.is_empty() || trailing_slash {
            segments.extend(
                rest.split('/')
                    .filter(|segment| !(merge_slashes && segment.is_empty())),
            );
        }

        RequestPath {
            path,
            segments,
            trailing_slash,
        }
    }

    /// Splits the path of any [`ResourcePath`].
    pub fn from_resource<R: ResourcePath + ?Sized>(resource: &'a R, merge_slashes: bool) -> Self {
        Self::parse(resource.path(), merge_slashes)
    }

    /// Returns the full, undecoded path.
    #[inline]
    pub fn as_str(&self) -> &'a str {
        self.path
    }

    /// Returns the raw, still percent-encoded segments.
    #[inline]
    pub fn segments(&self) -> &[&'a str] {
        &self.segments
    }

    /// Returns true if the path ended with a slash after its last segment.
    #[inline]
    pub fn has_trailing_slash(&self) -> bool {
        self.trailing_slash
    }
}

/// Concatenates template parts with exactly one slash between them.
///
/// Used when nesting path groups: missing separators are inserted, redundant ones collapsed and
/// a single leading slash ensured. A trailing slash on the last non-empty part is kept.
///
/// # Examples
/// ```
/// use waymark_router::join_paths;
///
/// assert_eq!(join_paths(["test", ":id"]), "/test/:id");
/// assert_eq!(join_paths(["/test/", "/:id/"]), "/test/:id/");
/// assert_eq!(join_paths(["test", ""]), "/test");
/// assert_eq!(join_paths(["", ""]), "/");
/// ```
pub fn join_paths<'a, I>(parts: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut joined = String::with_capacity(32);
    let mut trailing_slash = false;

    for part in parts {
        if part.is_empty() {
            continue;
        }

        trailing_slash = part.ends_with('/');

        for segment in part.split('/').filter(|segment| !segment.is_empty()) {
            joined.push('/');
            joined.push_str(segment);
        }
    }

    if joined.is_empty() {
        joined.push('/');
    } else if trailing_slash {
        joined.push('/');
    }

    joined
}

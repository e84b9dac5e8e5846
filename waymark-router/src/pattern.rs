use std::{
    cmp::Ordering,
    hash::{Hash, Hasher},
    sync::Arc,
};

use tracing::trace;

use crate::{decode_segment, join_paths, Params, PatternError, RequestPath, SegmentRegex};

/// One compiled unit of a path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text; must equal the decoded path segment.
    Static(String),

    /// Named parameter (`:name`); binds the decoded value of one non-empty path segment.
    Param(Arc<str>),

    /// Bare regex (`[0-9]+`); the raw path segment at this position must match it. Creates no
    /// binding.
    RegexConstrained(SegmentRegex),

    /// Unnamed wildcard (`*`); matches one path segment and captures it as a splat.
    Wildcard,

    /// Trailing `*` attached to the previous segment without a slash (`p*`, `:pp*`); matches the
    /// rest of the path, including nothing at all. Filters only.
    NonSubPathWildcard,
}

/// Whether a pattern belongs to a route or a filter.
///
/// Only filter patterns may contain a [`Segment::NonSubPathWildcard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    Route,
    Filter,
}

/// Settings that change how a compiled pattern is compared to a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// When false, a pattern ending with `/` only matches paths ending with `/` and vice versa.
    pub ignore_trailing_slashes: bool,

    /// When true, static segments compare ASCII-case-insensitively.
    pub case_insensitive: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        MatchOptions {
            ignore_trailing_slashes: true,
            case_insensitive: false,
        }
    }
}

/// Precedence of a segment kind at one position; lower wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum Rank {
    Static,
    Regex,
    Dynamic,
}

/// A compiled path template.
///
/// # Pattern Format
/// A template is a list of `/`-separated segments. Empty segments produced by leading, trailing
/// or repeated slashes are dropped, so `/users`, `users` and `//users/` compile to the same
/// segment list. Each segment is one of:
///
/// - `:name`: a named parameter; matches any non-empty segment and binds its decoded value.
///   Names are case-sensitive, so `/:a/:A` has two distinct parameters.
/// - `*`: a wildcard; matches any one segment and appends its decoded value to the splats.
/// - a regex containing a bracketed class, such as `[0-9]+`: constrains the raw segment at its
///   position. It must directly follow a named or static segment and never binds a value. Other
///   regex syntax without a class (`report(1)`, `a+b`) is static text.
/// - `stem*`: a _non sub-path wildcard_ (filters only, last segment only). The stem is matched
///   as usual except that a static stem only needs to be a prefix of its segment; whatever
///   follows is accepted, including nothing.
/// - anything else: static text, compared case-sensitively with the decoded segment.
///
/// The filter template `*` on its own matches every path.
///
/// # Examples
/// ```
/// use waymark_router::{MatchOptions, PathPattern, RequestPath};
///
/// let pattern = PathPattern::route("/users/:id").unwrap();
/// let params = pattern
///     .capture(&RequestPath::new("/users/42"), MatchOptions::default())
///     .unwrap();
/// assert_eq!(params.get("id"), Some("42"));
///
/// let filter = PathPattern::filter("/p*").unwrap();
/// assert!(filter.is_match(&RequestPath::new("/p"), MatchOptions::default()));
/// assert!(filter.is_match(&RequestPath::new("/p/test"), MatchOptions::default()));
/// ```
#[derive(Clone, Debug)]
pub struct PathPattern {
    /// Canonical template this pattern was compiled from.
    pattern: String,

    kind: PatternKind,

    /// Segments in template order.
    segments: Vec<Segment>,

    /// Whether the template ended with a slash.
    trailing_slash: bool,

    /// Per-position precedence, derived from `segments`.
    ranks: Vec<Rank>,
}

impl PathPattern {
    /// Compiles a route template.
    ///
    /// # Errors
    /// Returns [`PatternError`] for malformed templates, including any use of a non sub-path
    /// wildcard.
    pub fn route(template: &str) -> Result<Self, PatternError> {
        Self::new(template, PatternKind::Route)
    }

    /// Compiles a filter template.
    ///
    /// # Errors
    /// Returns [`PatternError`] for malformed templates.
    pub fn filter(template: &str) -> Result<Self, PatternError> {
        Self::new(template, PatternKind::Filter)
    }

    /// Compiles a template of the given kind.
    pub fn new(template: &str, kind: PatternKind) -> Result<Self, PatternError> {
        let (pattern, segments, trailing_slash) = Self::parse(template, kind)?;

        let ranks = segments
            .iter()
            .map(|segment| match segment {
                Segment::Static(_) => Rank::Static,
                Segment::RegexConstrained(_) => Rank::Regex,
                Segment::Param(_) | Segment::Wildcard | Segment::NonSubPathWildcard => {
                    Rank::Dynamic
                }
            })
            .collect();

        trace!(
            "compiled {:?} pattern {:?} into {} segments",
            kind,
            pattern,
            segments.len()
        );

        Ok(PathPattern {
            pattern,
            kind,
            segments,
            trailing_slash,
            ranks,
        })
    }

    /// Returns the canonical template string.
    ///
    /// # Examples
    /// ```
    /// # use waymark_router::PathPattern;
    /// assert_eq!(PathPattern::route("test//:id/").unwrap().pattern(), "/test/:id/");
    /// ```
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns whether this is a route or a filter pattern.
    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    /// Returns the compiled segments.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns true if the template ended with a slash.
    pub fn has_trailing_slash(&self) -> bool {
        self.trailing_slash
    }

    /// Returns the names of all parameters, in template order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Param(name) => Some(&**name),
            _ => None,
        })
    }

    pub(crate) fn ranks(&self) -> &[Rank] {
        &self.ranks
    }

    /// Compares structural precedence with `other`, position by position from the left.
    ///
    /// A static segment beats a regex-constrained one, which beats a parameter or wildcard. The
    /// first position that differs decides. `Ordering::Less` means `self` is preferred.
    ///
    /// # Examples
    /// ```
    /// # use std::cmp::Ordering;
    /// # use waymark_router::PathPattern;
    /// let fixed = PathPattern::route("/users/me").unwrap();
    /// let any = PathPattern::route("/users/:id").unwrap();
    /// assert_eq!(fixed.precedence(&any), Ordering::Less);
    /// ```
    pub fn precedence(&self, other: &PathPattern) -> Ordering {
        self.ranks.cmp(&other.ranks)
    }

    /// Returns `true` if `path` matches this pattern.
    ///
    /// Agrees with [`capture`](Self::capture) but does not decode or collect anything.
    #[inline]
    pub fn is_match(&self, path: &RequestPath<'_>, opts: MatchOptions) -> bool {
        self.walk(path, opts, None)
    }

    /// Matches `path` and collects parameter and wildcard values.
    ///
    /// Returns `None` if `path` does not match.
    ///
    /// # Examples
    /// ```
    /// use waymark_router::{MatchOptions, PathPattern, RequestPath};
    ///
    /// let pattern = PathPattern::route("/:path-param/path/*").unwrap();
    /// let path = RequestPath::new("/java%2Fkotlin/path/%2Fjava%2Fkotlin");
    /// let params = pattern.capture(&path, MatchOptions::default()).unwrap();
    /// assert_eq!(params.get("path-param"), Some("java/kotlin"));
    /// assert_eq!(params.splat(0), Some("/java/kotlin"));
    /// ```
    pub fn capture(&self, path: &RequestPath<'_>, opts: MatchOptions) -> Option<Params> {
        let mut params = Params::new();

        if self.walk(path, opts, Some(&mut params)) {
            Some(params)
        } else {
            None
        }
    }

    fn walk(
        &self,
        path: &RequestPath<'_>,
        opts: MatchOptions,
        mut params: Option<&mut Params>,
    ) -> bool {
        let raw = path.segments();

        let (fixed, open_tail) = match self.segments.split_last() {
            Some((Segment::NonSubPathWildcard, fixed)) => (fixed, true),
            _ => (self.segments.as_slice(), false),
        };

        if open_tail {
            if raw.len() < fixed.len() {
                return false;
            }
        } else {
            if raw.len() != fixed.len() {
                return false;
            }

            if !opts.ignore_trailing_slashes && self.trailing_slash != path.has_trailing_slash() {
                return false;
            }
        }

        let stem_idx = if open_tail { fixed.len().checked_sub(1) } else { None };

        for (idx, (segment, raw)) in fixed.iter().zip(raw).enumerate() {
            let matched = match segment {
                Segment::Static(text) => {
                    let decoded = decode_segment(raw);

                    if stem_idx == Some(idx) {
                        static_prefix(&decoded, text, opts)
                    } else {
                        static_eq(&decoded, text, opts)
                    }
                }

                Segment::Param(name) => {
                    if raw.is_empty() {
                        false
                    } else {
                        if let Some(params) = params.as_deref_mut() {
                            params.add(Arc::clone(name), decode_segment(raw).into_owned());
                        }
                        true
                    }
                }

                Segment::RegexConstrained(re) => re.is_match(raw),

                Segment::Wildcard => {
                    if let Some(params) = params.as_deref_mut() {
                        params.add_splat(decode_segment(raw).into_owned());
                    }
                    true
                }

                // compilation only allows this as the final segment
                Segment::NonSubPathWildcard => false,
            };

            if !matched {
                return false;
            }
        }

        true
    }

    /// Splits `template` into segments.
    ///
    /// Returns the canonical template, the segments and whether the template had a trailing
    /// slash.
    fn parse(
        template: &str,
        kind: PatternKind,
    ) -> Result<(String, Vec<Segment>, bool), PatternError> {
        if kind == PatternKind::Filter && template == "*" {
            return Ok((
                template.to_owned(),
                vec![Segment::NonSubPathWildcard],
                false,
            ));
        }

        let pattern = join_paths([template]);
        let trailing_slash = pattern.len() > 1 && pattern.ends_with('/');

        let parts = pattern
            .split('/')
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>();

        let mut segments = Vec::with_capacity(parts.len() + 1);

        for (idx, part) in parts.iter().enumerate() {
            match non_sub_path_stem(part) {
                Some(stem) => {
                    if idx + 1 != parts.len() {
                        return Err(PatternError::MisplacedWildcard { pattern: pattern.clone() });
                    }

                    if kind == PatternKind::Route {
                        return Err(PatternError::WildcardInRoute { pattern: pattern.clone() });
                    }

                    let segment = Self::parse_segment(&pattern, stem, &segments)?;
                    segments.push(segment);
                    segments.push(Segment::NonSubPathWildcard);
                }

                None => {
                    let segment = Self::parse_segment(&pattern, part, &segments)?;
                    segments.push(segment);
                }
            }
        }

        let mut names = segments.iter().filter_map(|segment| match segment {
            Segment::Param(name) => Some(name),
            _ => None,
        });

        while let Some(name) = names.next() {
            if names.clone().any(|other| other == name) {
                return Err(PatternError::DuplicateParamName {
                    name: name.to_string(),
                    pattern,
                });
            }
        }

        Ok((pattern, segments, trailing_slash))
    }

    /// Parses one `/`-free template segment.
    fn parse_segment(
        pattern: &str,
        part: &str,
        previous: &[Segment],
    ) -> Result<Segment, PatternError> {
        if part == "*" {
            return Ok(Segment::Wildcard);
        }

        if let Some(name) = part.strip_prefix(':') {
            if name.is_empty() {
                return Err(PatternError::EmptyParamName {
                    pattern: pattern.to_owned(),
                });
            }

            return Ok(Segment::Param(Arc::from(name)));
        }

        if is_regex(part) {
            match previous.last() {
                Some(Segment::Param(_)) | Some(Segment::Static(_)) => {}
                _ => {
                    return Err(PatternError::DanglingRegex {
                        pattern: pattern.to_owned(),
                        segment: part.to_owned(),
                    })
                }
            }

            return SegmentRegex::new(part)
                .map(Segment::RegexConstrained)
                .map_err(|message| PatternError::InvalidRegex {
                    pattern: pattern.to_owned(),
                    segment: part.to_owned(),
                    message,
                });
        }

        Ok(Segment::Static(decode_segment(part).into_owned()))
    }
}

/// Returns the stem of a `stem*` segment.
fn non_sub_path_stem(part: &str) -> Option<&str> {
    if part == "*" || is_regex(part) {
        return None;
    }

    part.strip_suffix('*')
}

/// A segment is a regex when it contains a bracketed character class (`[0-9]+`, `v[0-9]`).
fn is_regex(part: &str) -> bool {
    if part.starts_with(':') {
        return false;
    }

    part.find('[')
        .map_or(false, |open| part[open + 1..].contains(']'))
}

#[inline]
fn static_eq(value: &str, text: &str, opts: MatchOptions) -> bool {
    if opts.case_insensitive {
        value.eq_ignore_ascii_case(text)
    } else {
        value == text
    }
}

#[inline]
fn static_prefix(value: &str, text: &str, opts: MatchOptions) -> bool {
    value
        .get(..text.len())
        .map_or(false, |head| static_eq(head, text, opts))
}

impl Eq for PathPattern {}

impl PartialEq for PathPattern {
    fn eq(&self, other: &PathPattern) -> bool {
        self.pattern == other.pattern && self.kind == other.kind
    }
}

impl Hash for PathPattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pattern.hash(state);
        self.kind.hash(state);
    }
}

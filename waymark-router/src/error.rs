use derive_more::{Display, Error};

/// Errors raised while compiling a path template.
///
/// All of these surface at registration time; a compiled [`PathPattern`](crate::PathPattern)
/// never fails while matching.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[non_exhaustive]
pub enum PatternError {
    /// A non sub-path wildcard (`p*`) appeared before the last segment.
    #[display("non sub-path wildcard must be the last segment in pattern \"{pattern}\"")]
    MisplacedWildcard { pattern: String },

    /// A non sub-path wildcard was used in a route pattern.
    #[display("non sub-path wildcards are only allowed in filter patterns: \"{pattern}\"")]
    WildcardInRoute { pattern: String },

    /// A regex segment was not preceded by a named or static segment.
    #[display("regex segment \"{segment}\" in pattern \"{pattern}\" constrains no adjacent segment")]
    DanglingRegex { pattern: String, segment: String },

    /// A regex segment failed to compile.
    #[display("invalid regex segment \"{segment}\" in pattern \"{pattern}\": {message}")]
    InvalidRegex {
        pattern: String,
        segment: String,
        message: String,
    },

    /// A `:` segment without a name.
    #[display("empty parameter name in pattern \"{pattern}\"")]
    EmptyParamName { pattern: String },

    /// The same parameter name appears twice in one pattern.
    #[display("parameter \"{name}\" is defined more than once in pattern \"{pattern}\"")]
    DuplicateParamName { pattern: String, name: String },
}

impl PatternError {
    /// Returns the template that failed to compile.
    pub fn pattern(&self) -> &str {
        match self {
            Self::MisplacedWildcard { pattern }
            | Self::WildcardInRoute { pattern }
            | Self::DanglingRegex { pattern, .. }
            | Self::InvalidRegex { pattern, .. }
            | Self::EmptyParamName { pattern }
            | Self::DuplicateParamName { pattern, .. } => pattern,
        }
    }
}

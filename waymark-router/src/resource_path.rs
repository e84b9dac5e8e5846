/// Abstraction over types that can provide a request path for routing.
///
/// Lookups accept a reference to any implementor, so callers can pass a `&str`, a `&String` or,
/// with the `http` feature, an [`http::Uri`] without converting first.
pub trait ResourcePath {
    fn path(&self) -> &str;
}

impl ResourcePath for String {
    fn path(&self) -> &str {
        self.as_str()
    }
}

impl ResourcePath for &str {
    fn path(&self) -> &str {
        self
    }
}

impl ResourcePath for bytestring::ByteString {
    fn path(&self) -> &str {
        self
    }
}

#[cfg(feature = "http")]
impl ResourcePath for http::Uri {
    fn path(&self) -> &str {
        self.path()
    }
}

impl ResourcePath for str {
    fn path(&self) -> &str {
        self
    }
}

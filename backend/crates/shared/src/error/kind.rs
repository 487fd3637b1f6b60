//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum that maps to HTTP status codes.

/// HTTP-facing error classification
///
/// The service owns a single route, so the only failures a client can see
/// are routing ones: an unknown path or a known path with the wrong method.
///
/// ## Notes
/// * `non_exhaustive` - new classes are added only when a handler can
///   actually produce them
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::MethodNotAllowed;
/// assert_eq!(kind.status_code(), 405);
/// assert_eq!(kind.as_str(), "Method Not Allowed");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// 404 - Not Found: no route matches the path
    NotFound,
    /// 405 - Method Not Allowed: the path exists for other methods only
    MethodNotAllowed,
}

impl ErrorKind {
    /// Get the HTTP status code
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::NotFound.status_code(), 404);
    /// ```
    #[inline]
    pub const fn status_code(&self) -> u16 {
        match self {
            ErrorKind::NotFound => 404,
            ErrorKind::MethodNotAllowed => 405,
        }
    }

    /// Get the reason phrase rendered as the problem `title`
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "Not Found",
            ErrorKind::MethodNotAllowed => "Method Not Allowed",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

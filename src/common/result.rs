use crate::common::error::HgDevError;

/// Result alias used across the crate
///
/// # Examples
///
/// ```
/// use hgdev::common::result::HgDevResult;
/// use hgdev::common::error::HgDevError;
///
/// fn example_with_error() -> HgDevResult<()> {
///     Err(HgDevError::config_error("Something went wrong"))
/// }
/// ```
pub type HgDevResult<T> = Result<T, HgDevError>;

/// Attach filesystem context to io results
pub trait ResultExt<T> {
    /// Map an io error into a [`HgDevError::FileSystemError`] naming `path`
    ///
    /// # Examples
    ///
    /// ```
    /// use hgdev::common::result::{HgDevResult, ResultExt};
    /// use std::path::PathBuf;
    ///
    /// let result: Result<(), std::io::Error> = Err(std::io::Error::new(
    ///     std::io::ErrorKind::NotFound, "file not found"
    /// ));
    /// let mapped: HgDevResult<()> =
    ///     result.with_filesystem_error("Failed to write", PathBuf::from("/repos/README"));
    /// assert!(mapped.is_err());
    /// ```
    fn with_filesystem_error(
        self,
        message: impl Into<String>,
        path: impl Into<std::path::PathBuf>,
    ) -> HgDevResult<T>;
}

impl<T> ResultExt<T> for Result<T, std::io::Error> {
    fn with_filesystem_error(
        self,
        message: impl Into<String>,
        path: impl Into<std::path::PathBuf>,
    ) -> HgDevResult<T> {
        self.map_err(|e| HgDevError::filesystem_error_with_source(message, Some(path.into()), e))
    }
}

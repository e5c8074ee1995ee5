//! Transport seam: moves the bytes of one source locator into a local file.
//!
//! The fetcher only depends on the `Transport` trait; `CurlTransport` is the
//! production implementation, tests plug in their own.

mod easy;

pub use easy::CurlTransport;

use crate::error::TransferError;
use std::path::Path;

/// Schemes the curl transport is allowed to fetch.
pub const SUPPORTED_SCHEMES: &[&str] = &["http", "https", "ftp", "ftps", "file"];

/// Performs one blocking transfer of `source` into the file at `dest`.
///
/// Implementations create or truncate `dest` and return the number of bytes
/// written. A partially written `dest` may be left behind on error; the
/// caller is responsible for removing it.
pub trait Transport {
    fn transfer(&self, source: &str, dest: &Path) -> Result<u64, TransferError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn transfer(&self, source: &str, dest: &Path) -> Result<u64, TransferError> {
        (**self).transfer(source, dest)
    }
}

/// Returns the lowercase scheme of `source` if it is one we can fetch.
pub fn supported_scheme(source: &str) -> Result<String, TransferError> {
    let parsed =
        url::Url::parse(source).map_err(|_| TransferError::UnsupportedScheme(source.to_string()))?;
    let scheme = parsed.scheme().to_ascii_lowercase();
    if SUPPORTED_SCHEMES.contains(&scheme.as_str()) {
        Ok(scheme)
    } else {
        Err(TransferError::UnsupportedScheme(scheme))
    }
}

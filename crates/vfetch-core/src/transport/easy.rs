//! Blocking libcurl transport (single GET, sequential write).

use super::{supported_scheme, Transport};
use crate::config::TransferConfig;
use crate::error::TransferError;
use curl::easy::Easy;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

/// Downloads one source with a libcurl easy handle, honouring `TransferConfig` limits.
#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    opts: TransferConfig,
}

impl CurlTransport {
    pub fn new(opts: TransferConfig) -> Self {
        Self { opts }
    }

    fn configure(&self, easy: &mut Easy, source: &str) -> Result<(), curl::Error> {
        easy.url(source)?;
        easy.follow_location(true)?;
        easy.max_redirections(self.opts.max_redirections)?;
        easy.connect_timeout(Duration::from_secs(self.opts.connect_timeout_secs))?;
        easy.timeout(Duration::from_secs(self.opts.timeout_secs))?;
        easy.low_speed_limit(self.opts.low_speed_limit)?;
        easy.low_speed_time(Duration::from_secs(self.opts.low_speed_time_secs))?;
        if let Some(speed) = self.opts.max_bytes_per_sec {
            easy.max_recv_speed(speed)?;
        }
        if let Some(ua) = &self.opts.user_agent {
            easy.useragent(ua)?;
        }
        Ok(())
    }
}

impl Transport for CurlTransport {
    fn transfer(&self, source: &str, dest: &Path) -> Result<u64, TransferError> {
        let scheme = supported_scheme(source)?;

        let mut easy = Easy::new();
        self.configure(&mut easy, source)?;

        let mut file = File::create(dest).map_err(TransferError::Storage)?;
        let mut written = 0u64;
        let mut storage_err: Option<std::io::Error> = None;
        let mut perform_err: Option<curl::Error> = None;
        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| match file.write_all(data) {
                Ok(()) => {
                    written += data.len() as u64;
                    Ok(data.len())
                }
                Err(e) => {
                    storage_err = Some(e);
                    Ok(0) // abort transfer
                }
            })?;
            if let Err(e) = transfer.perform() {
                perform_err = Some(e);
            }
        }

        // A short write makes curl report a write error; the disk error is the real cause.
        if let Some(e) = storage_err {
            return Err(TransferError::Storage(e));
        }
        if let Some(e) = perform_err {
            return Err(TransferError::Curl(e));
        }

        if scheme.starts_with("http") {
            let code = easy.response_code()?;
            if !(200..300).contains(&code) {
                return Err(TransferError::Http(code));
            }
        }

        file.sync_all().map_err(TransferError::Storage)?;
        tracing::debug!(source, bytes = written, "transfer complete");
        Ok(written)
    }
}

pub mod config;
pub mod logging;

pub mod checksum;
pub mod error;
pub mod fetcher;
pub mod manifest;
pub mod request;
pub mod storage;
pub mod transport;
pub mod url_model;

pub use error::{FetchError, TransferError};
pub use fetcher::{FetchOutcome, Fetcher};
pub use request::FetchRequest;

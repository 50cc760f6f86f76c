//! Download minecraft.jar assets from the upstream asset host
//!
//! One GET per download, no retries. The response body is handed to the
//! store as a byte stream so a jar never has to fit in memory.

use std::io::{self, Read};
use std::time::Duration;

use indicatif::ProgressBar;
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use thiserror::Error;

use crate::cache::store::{self, Store};
use crate::core::error::Error;
use crate::core::progress::{download_bar, ProgressReader};

/// Default asset host serving `/<version>/minecraft.jar` downloads.
pub const DEFAULT_HOST: &str = "http://assets.minecraft.net";

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Minecraft {0} does not exist upstream")]
    VersionNotFound(String),

    #[error("asset host answered HTTP {0}")]
    Http(StatusCode),

    #[error("network request: {0}")]
    Network(#[from] reqwest::Error),
}

/// Streaming response body plus the size advertised by the server.
#[derive(Debug)]
pub struct Download {
    response: Response,
}

impl Download {
    /// Total size from `Content-Length`, if the server sent one.
    pub fn total_size(&self) -> Option<u64> {
        self.response.content_length()
    }
}

impl Read for Download {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.response.read(buf)
    }
}

/// Issues one GET per download against a fixed asset host.
pub struct Fetcher {
    client: Client,
    host: String,
}

impl Fetcher {
    /// Client against `host`. `None` disables the request timeout.
    pub fn new(host: impl Into<String>, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            host: host.into(),
        })
    }

    /// URL a version's jar is served from.
    ///
    /// The host routes on the version with every dot replaced by an
    /// underscore: `1.8.9` becomes `/1_8_9/minecraft.jar`. This is the only
    /// place that translation happens.
    pub fn asset_url(&self, version: &str) -> String {
        format!("{}/{}/minecraft.jar", self.host, version.replace('.', "_"))
    }

    /// GET a version's jar, returning the body as a byte stream.
    pub fn download(&self, version: &str) -> Result<Download, FetchError> {
        let response = self.client.get(self.asset_url(version)).send()?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(FetchError::VersionNotFound(version.to_string())),
            status if !status.is_success() => Err(FetchError::Http(status)),
            _ => Ok(Download { response }),
        }
    }
}

/// Download a version into the cache and make it active.
///
/// The download is staged by the store and only renamed into the cache once
/// complete, so a failed or not-found download leaves no cache entry behind.
pub fn run_install(store: &Store, fetcher: &Fetcher, version: &str, quiet: bool) -> Result<(), Error> {
    let download = fetcher.download(version)?;

    let bar = if quiet {
        ProgressBar::hidden()
    } else {
        download_bar(download.total_size())
    };
    bar.set_message(format!("Downloading Minecraft v{version}"));

    let mut body = ProgressReader::new(download, |transferred| bar.set_position(transferred));
    store.put(version, &mut body)?;
    bar.finish();

    store::run_use(store, version)
}

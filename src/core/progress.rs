//! Byte-level progress reporting for streamed downloads
//!
//! Progress is a UI side-channel: the transfer itself flows through
//! [`ProgressReader`], which invokes an observer with the cumulative byte
//! count after each chunk. Rendering is left to whatever the observer
//! drives, normally an indicatif bar from [`download_bar`].

use std::io::{self, Read};

use indicatif::{ProgressBar, ProgressStyle};

/// Read adapter that reports cumulative progress as bytes flow through.
pub struct ProgressReader<R, F> {
    inner: R,
    observer: F,
    transferred: u64,
}

impl<R: Read, F: FnMut(u64)> ProgressReader<R, F> {
    pub fn new(inner: R, observer: F) -> Self {
        Self {
            inner,
            observer,
            transferred: 0,
        }
    }
}

impl<R: Read, F: FnMut(u64)> Read for ProgressReader<R, F> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n > 0 {
            self.transferred += n as u64;
            (self.observer)(self.transferred);
        }
        Ok(n)
    }
}

/// Progress bar for a download of `total` bytes.
///
/// Without a `Content-Length` the bar degrades to a plain byte counter: no
/// percentage, no ETA.
pub fn download_bar(total: Option<u64>) -> ProgressBar {
    match total {
        Some(len) => {
            let bar = ProgressBar::new(len);
            bar.set_style(
                ProgressStyle::with_template("{msg} [{bar:20}] ({percent:>3}%, {eta})")
                    .unwrap()
                    .progress_chars("= "),
            );
            bar
        }
        None => {
            let bar = ProgressBar::new_spinner();
            bar.set_style(ProgressStyle::with_template("{msg} {bytes}").unwrap());
            bar
        }
    }
}

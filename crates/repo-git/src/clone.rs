//! Cloning a remote into a workspace directory

use std::cell::Cell;
use std::time::{Duration, Instant};

use git2::build::RepoBuilder;
use git2::{CertificateCheckStatus, FetchOptions, RemoteCallbacks};
use repo_fs::NormalizedPath;

use crate::{Error, Result};

/// Options for a single clone.
#[derive(Debug, Clone, Copy, Default)]
pub struct CloneOptions {
    /// Abort the clone once this much time has passed.
    ///
    /// Checked whenever libgit2 reports progress or verifies a certificate,
    /// so a remote that stalls before sending anything is only cut off by
    /// the transport's own timeouts.
    pub timeout: Option<Duration>,
}

/// Time limit shared by the remote callbacks of one clone.
struct Deadline {
    at: Option<Instant>,
    hit: Cell<bool>,
}

impl Deadline {
    fn new(timeout: Option<Duration>) -> Self {
        Self {
            at: timeout.map(|t| Instant::now() + t),
            hit: Cell::new(false),
        }
    }

    /// Returns false once the deadline has passed, and remembers that it did.
    fn check(&self) -> bool {
        match self.at {
            Some(at) if Instant::now() >= at => {
                self.hit.set(true);
                false
            }
            _ => true,
        }
    }

    fn expired(&self) -> bool {
        self.hit.get()
    }
}

/// Clone `url` at `branch` into `target`.
///
/// `target` must not exist or must be an empty directory. The clone is
/// aborted from the remote callbacks when the timeout elapses.
pub fn clone_into(
    url: &str,
    branch: &str,
    target: &NormalizedPath,
    options: CloneOptions,
) -> Result<()> {
    let deadline = Deadline::new(options.timeout);

    let mut callbacks = RemoteCallbacks::new();
    callbacks.transfer_progress(|_progress| deadline.check());
    callbacks.sideband_progress(|_message| deadline.check());
    callbacks.certificate_check(|_cert, _host| {
        if deadline.check() {
            Ok(CertificateCheckStatus::CertificatePassthrough)
        } else {
            Err(git2::Error::from_str("clone deadline passed"))
        }
    });

    let mut fetch = FetchOptions::new();
    fetch.remote_callbacks(callbacks);

    let mut builder = RepoBuilder::new();
    builder.branch(branch).fetch_options(fetch);

    tracing::debug!(url = %url, branch = %branch, target = %target, "Cloning repository");

    match builder.clone(url, &target.to_native()) {
        Ok(_) => Ok(()),
        Err(e) => {
            let message = match options.timeout {
                Some(timeout) if deadline.expired() => {
                    format!("timed out after {}s", timeout.as_secs())
                }
                _ => e.message().to_string(),
            };
            Err(Error::CloneFailed {
                url: url.to_string(),
                branch: branch.to_string(),
                message,
            })
        }
    }
}

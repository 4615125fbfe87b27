//! Local image import as data URLs
//!
//! Files are checked (MIME type from the extension, size from metadata) on
//! the UI thread before anything is read; the read itself runs on a worker
//! thread and reports back through a channel. Every request gets a ticket and
//! only the newest ticket per target is delivered, so a slow early read can
//! never overwrite the result of a later selection.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use image::ImageFormat;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::constants::upload::{IMAGE_MIME_PREFIX, MAX_FILE_SIZE};
use crate::data_url;
use crate::i18n::Message;

#[derive(Debug, Error)]
pub enum FileReadError {
    #[error("{} is not an image file", .path.display())]
    InvalidType { path: PathBuf },
    #[error("{} is {size} bytes (max {max})", .path.display())]
    TooLarge { path: PathBuf, size: u64, max: u64 },
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FileReadError {
    /// Notification shown to the user for this failure
    pub fn message(&self) -> Message {
        match self {
            FileReadError::InvalidType { .. } => Message::InvalidImageType,
            FileReadError::TooLarge { .. } => Message::FileTooLarge,
            FileReadError::Read { .. } => Message::FileReadFailed,
        }
    }
}

/// Which editor field a file feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadTarget {
    Border,
    Avatar,
}

/// MIME type implied by the file extension, if it is an image
pub fn image_mime(path: &Path) -> Option<&'static str> {
    ImageFormat::from_path(path)
        .ok()
        .map(|format| format.to_mime_type())
        .filter(|mime| mime.starts_with(IMAGE_MIME_PREFIX))
}

/// Validate type and size without reading the file contents
pub fn check(path: &Path) -> Result<&'static str, FileReadError> {
    let mime = image_mime(path).ok_or_else(|| FileReadError::InvalidType {
        path: path.to_path_buf(),
    })?;

    let size = fs::metadata(path)
        .map_err(|source| FileReadError::Read {
            path: path.to_path_buf(),
            source,
        })?
        .len();
    if size > MAX_FILE_SIZE {
        return Err(FileReadError::TooLarge {
            path: path.to_path_buf(),
            size,
            max: MAX_FILE_SIZE,
        });
    }

    Ok(mime)
}

/// Blocking read of an image file into a data URL
pub fn read_as_data_url(path: &Path) -> Result<String, FileReadError> {
    let mime = check(path)?;
    read_checked(path, mime)
}

fn read_checked(path: &Path, mime: &str) -> Result<String, FileReadError> {
    let bytes = fs::read(path).map_err(|source| FileReadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(data_url::encode(mime, &bytes))
}

/// Finished read delivered to the UI loop
#[derive(Debug)]
pub struct Completion {
    pub target: UploadTarget,
    pub ticket: u64,
    pub result: Result<String, FileReadError>,
}

/// Issues background reads and filters out superseded completions
pub struct FileLoader {
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
    next_ticket: u64,
    latest: HashMap<UploadTarget, u64>,
}

impl FileLoader {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx,
            next_ticket: 0,
            latest: HashMap::new(),
        }
    }

    /// Start reading `path` for `target`.
    /// Type and size are rejected here, before any read is attempted.
    pub fn request(&mut self, target: UploadTarget, path: PathBuf) -> Result<u64, FileReadError> {
        let mime = check(&path)?;

        self.next_ticket += 1;
        let ticket = self.next_ticket;
        if let Some(previous) = self.latest.insert(target, ticket) {
            debug!(upload = ?target, previous, ticket, "Superseding in-flight file read");
        }

        info!(upload = ?target, ticket, path = %path.display(), mime, "Reading image file");
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = read_checked(&path, mime);
            // Receiver is gone only when the editor was dropped
            let _ = tx.send(Completion { target, ticket, result });
        });

        Ok(ticket)
    }

    /// Drain finished reads, keeping only the newest per target
    pub fn poll(&mut self) -> Vec<Completion> {
        let mut done = Vec::new();
        while let Ok(completion) = self.rx.try_recv() {
            if let Some(accepted) = self.accept(completion) {
                done.push(accepted);
            }
        }
        done
    }

    /// Block until the next current completion arrives or the timeout passes
    #[cfg(test)]
    pub fn wait(&mut self, timeout: std::time::Duration) -> Option<Completion> {
        let deadline = std::time::Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(std::time::Instant::now());
            let completion = self.rx.recv_timeout(remaining).ok()?;
            if let Some(accepted) = self.accept(completion) {
                return Some(accepted);
            }
        }
    }

    pub fn in_flight(&self) -> bool {
        !self.latest.is_empty()
    }

    fn accept(&mut self, completion: Completion) -> Option<Completion> {
        if self.latest.get(&completion.target) != Some(&completion.ticket) {
            warn!(upload = ?completion.target, ticket = completion.ticket, "Dropping stale file read");
            return None;
        }
        self.latest.remove(&completion.target);
        Some(completion)
    }
}

impl Default for FileLoader {
    fn default() -> Self {
        Self::new()
    }
}

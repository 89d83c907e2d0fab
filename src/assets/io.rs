//! Asset byte sources.
//!
//! Readers fetch raw bytes for a URI and report progress as
//! `(loaded, total)` byte counts while data arrives.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::errors::{Result, ScrollyError};

/// Progress callback: bytes received so far and the expected total, if known.
pub type ProgressFn<'a> = &'a mut dyn FnMut(u64, Option<u64>);

const READ_CHUNK: usize = 64 * 1024;

/// Reads assets from a directory on disk. Absolute page paths such as
/// `/spidey.glb` resolve against the root.
#[derive(Debug)]
pub struct FileAssetReader {
    root_path: PathBuf,
}

impl FileAssetReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            root_path: path.as_ref().to_path_buf(),
        }
    }

    #[inline]
    #[must_use]
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    fn read_bytes(&self, uri: &str, progress: ProgressFn<'_>) -> Result<Vec<u8>> {
        let path = self.root_path.join(uri.trim_start_matches('/'));
        let mut file = std::fs::File::open(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ScrollyError::AssetNotFound(path.display().to_string()),
            _ => ScrollyError::Io(e),
        })?;
        let total = file.metadata().ok().map(|m| m.len());

        let mut data = Vec::with_capacity(total.unwrap_or(0) as usize);
        let mut chunk = vec![0u8; READ_CHUNK];
        loop {
            let n = file.read(&mut chunk)?;
            if n == 0 {
                break;
            }
            data.extend_from_slice(&chunk[..n]);
            progress(data.len() as u64, total);
        }
        Ok(data)
    }
}

/// Outcome a memory entry resolves to.
#[derive(Debug, Clone)]
enum MemoryEntry {
    Bytes(Arc<Vec<u8>>),
    Failure(String),
}

/// In-memory asset source. Entries may be gated so that their load stays
/// pending until the returned sender fires, which models a slow network.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetReader {
    entries: Arc<RwLock<FxHashMap<String, (MemoryEntry, Option<flume::Receiver<()>>)>>>,
}

impl MemoryAssetReader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, uri: impl Into<String>, bytes: Vec<u8>) {
        self.entries
            .write()
            .insert(uri.into(), (MemoryEntry::Bytes(Arc::new(bytes)), None));
    }

    /// Registers an entry whose load fails with a network error.
    pub fn insert_failure(&self, uri: impl Into<String>, reason: impl Into<String>) {
        self.entries
            .write()
            .insert(uri.into(), (MemoryEntry::Failure(reason.into()), None));
    }

    /// Registers an entry that only resolves once the returned sender sends
    /// (or is dropped, which aborts the load).
    #[must_use]
    pub fn insert_gated(&self, uri: impl Into<String>, bytes: Vec<u8>) -> flume::Sender<()> {
        let (tx, rx) = flume::bounded(1);
        self.entries
            .write()
            .insert(uri.into(), (MemoryEntry::Bytes(Arc::new(bytes)), Some(rx)));
        tx
    }

    async fn read_bytes(&self, uri: &str, progress: ProgressFn<'_>) -> Result<Vec<u8>> {
        let (entry, gate) = self
            .entries
            .read()
            .get(uri)
            .cloned()
            .ok_or_else(|| ScrollyError::AssetNotFound(uri.to_string()))?;

        if let Some(gate) = gate {
            gate.recv_async()
                .await
                .map_err(|_| ScrollyError::Network(format!("request for `{uri}` aborted")))?;
        }

        match entry {
            MemoryEntry::Failure(reason) => Err(ScrollyError::Network(reason)),
            MemoryEntry::Bytes(bytes) => {
                let total = bytes.len() as u64;
                let step = (bytes.len() / 4).max(1);
                let mut loaded = 0usize;
                while loaded < bytes.len() {
                    loaded = (loaded + step).min(bytes.len());
                    progress(loaded as u64, Some(total));
                }
                Ok(bytes.as_ref().clone())
            }
        }
    }
}

/// Fetches assets over HTTP(S).
#[cfg(feature = "http")]
#[derive(Debug)]
pub struct HttpAssetReader {
    base_url: String,
}

#[cfg(feature = "http")]
impl HttpAssetReader {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { base_url }
    }

    fn resolve(&self, uri: &str) -> String {
        if uri.starts_with("http://") || uri.starts_with("https://") {
            uri.to_string()
        } else {
            format!("{}{}", self.base_url, uri.trim_start_matches('/'))
        }
    }

    async fn read_bytes(&self, uri: &str, progress: ProgressFn<'_>) -> Result<Vec<u8>> {
        let request = ehttp::Request::get(self.resolve(uri));
        let response = ehttp::fetch_async(request)
            .await
            .map_err(ScrollyError::Network)?;
        if !response.ok {
            return Err(ScrollyError::Http {
                status: response.status,
            });
        }
        let total = response.bytes.len() as u64;
        progress(total, Some(total));
        Ok(response.bytes)
    }
}

/// Reader variant enum, avoiding trait-object dispatch for async reads.
#[derive(Clone)]
pub enum AssetReaderVariant {
    File(Arc<FileAssetReader>),
    Memory(MemoryAssetReader),
    #[cfg(feature = "http")]
    Http(Arc<HttpAssetReader>),
}

impl AssetReaderVariant {
    /// Picks a reader for a base path or URL.
    pub fn from_source(source: &str) -> Result<Self> {
        if source.starts_with("http://") || source.starts_with("https://") {
            #[cfg(feature = "http")]
            {
                Ok(Self::Http(Arc::new(HttpAssetReader::new(source))))
            }
            #[cfg(not(feature = "http"))]
            {
                Err(ScrollyError::FeatureNotEnabled(
                    "HTTP feature is not enabled. Enable it with `features = [\"http\"]`".to_string(),
                ))
            }
        } else {
            Ok(Self::File(Arc::new(FileAssetReader::new(source))))
        }
    }

    pub async fn read_bytes(&self, uri: &str, progress: ProgressFn<'_>) -> Result<Vec<u8>> {
        match self {
            Self::File(r) => r.read_bytes(uri, progress),
            Self::Memory(r) => r.read_bytes(uri, progress).await,
            #[cfg(feature = "http")]
            Self::Http(r) => r.read_bytes(uri, progress).await,
        }
    }
}

impl From<MemoryAssetReader> for AssetReaderVariant {
    fn from(reader: MemoryAssetReader) -> Self {
        Self::Memory(reader)
    }
}

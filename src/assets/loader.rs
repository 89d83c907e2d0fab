//! Asynchronous, single-threaded asset loading.
//!
//! Loads run as tasks on a cooperative [`LocalPool`]. The host pumps the pool
//! once per frame; completions are delivered over a channel to the
//! [`LoadRequest`] owned by whoever issued the load, so a slow or failed
//! load never blocks anyone else.

use std::rc::Rc;

use futures::executor::LocalPool;
use futures::task::LocalSpawnExt;

use crate::assets::io::AssetReaderVariant;
use crate::assets::loaders::{AssetParser, ExtensionParser, LoadedAsset, decode_texture};
use crate::errors::{Result, ScrollyError};
use crate::scene::TextureImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Pending,
    Loaded,
    Failed,
}

enum LoadEvent<T> {
    Progress(f32),
    Done(Result<T>),
}

/// Handle to one in-flight or completed load.
///
/// `pending → loaded | failed`; the terminal transition is observed exactly
/// once through [`LoadRequest::poll`].
pub struct LoadRequest<T> {
    url: String,
    rx: flume::Receiver<LoadEvent<T>>,
    progress: f32,
    status: LoadStatus,
}

impl<T> LoadRequest<T> {
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn status(&self) -> LoadStatus {
        self.status
    }

    /// Last reported fraction in [0, 1]. Never decreases.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Drains delivered events. Returns the outcome on the call that observes
    /// completion, `None` before and after.
    pub fn poll(&mut self) -> Option<Result<T>> {
        if self.status != LoadStatus::Pending {
            return None;
        }
        loop {
            match self.rx.try_recv() {
                Ok(LoadEvent::Progress(p)) => self.progress = self.progress.max(p),
                Ok(LoadEvent::Done(result)) => {
                    self.status = match &result {
                        Ok(_) => {
                            self.progress = 1.0;
                            LoadStatus::Loaded
                        }
                        Err(_) => LoadStatus::Failed,
                    };
                    return Some(result);
                }
                Err(flume::TryRecvError::Empty) => return None,
                Err(flume::TryRecvError::Disconnected) => {
                    self.status = LoadStatus::Failed;
                    return Some(Err(ScrollyError::asset_load(
                        &self.url,
                        "loader dropped the request",
                    )));
                }
            }
        }
    }
}

/// Issues asset and texture loads and drives them to completion.
pub struct AssetLoader {
    pool: LocalPool,
    reader: AssetReaderVariant,
    parser: Rc<dyn AssetParser>,
}

impl AssetLoader {
    #[must_use]
    pub fn new(reader: impl Into<AssetReaderVariant>) -> Self {
        Self {
            pool: LocalPool::new(),
            reader: reader.into(),
            parser: Rc::new(ExtensionParser),
        }
    }

    #[must_use]
    pub fn with_parser(mut self, parser: impl AssetParser + 'static) -> Self {
        self.parser = Rc::new(parser);
        self
    }

    /// Starts loading a 3D asset. The returned request resolves to the parsed
    /// scene graph and its clips.
    pub fn load_asset(&self, url: &str) -> LoadRequest<LoadedAsset> {
        let parser = Rc::clone(&self.parser);
        self.spawn(url, move |url, bytes| parser.parse(url, &bytes))
    }

    /// Starts loading and decoding a texture image.
    pub fn load_texture(&self, url: &str) -> LoadRequest<TextureImage> {
        self.spawn(url, |_, bytes| decode_texture(&bytes))
    }

    /// Runs every ready task until none can make progress.
    pub fn pump(&mut self) {
        self.pool.run_until_stalled();
    }

    fn spawn<T, F>(&self, url: &str, finish: F) -> LoadRequest<T>
    where
        T: 'static,
        F: FnOnce(&str, Vec<u8>) -> Result<T> + 'static,
    {
        let (tx, rx) = flume::unbounded();
        let request = LoadRequest {
            url: url.to_string(),
            rx,
            progress: 0.0,
            status: LoadStatus::Pending,
        };

        let reader = self.reader.clone();
        let task_url = url.to_string();
        let task_tx = tx.clone();
        let task = async move {
            let mut reported = 0.0_f32;
            let mut on_progress = |loaded: u64, total: Option<u64>| {
                let Some(total) = total.filter(|&t| t > 0) else {
                    return;
                };
                let fraction = (loaded as f64 / total as f64).clamp(0.0, 1.0) as f32;
                if fraction > reported {
                    reported = fraction;
                    log::debug!("{task_url}: {:.0}% loaded", fraction * 100.0);
                    let _ = task_tx.send(LoadEvent::Progress(fraction));
                }
            };

            let result = reader
                .read_bytes(&task_url, &mut on_progress)
                .await
                .and_then(|bytes| finish(&task_url, bytes))
                .map_err(|e| match e {
                    e @ ScrollyError::AssetLoad { .. } => e,
                    other => ScrollyError::asset_load(&task_url, other),
                });
            // The requester may already be gone; nothing to deliver then.
            let _ = task_tx.send(LoadEvent::Done(result));
        };

        if let Err(e) = self.pool.spawner().spawn_local(task) {
            let _ = tx.send(LoadEvent::Done(Err(ScrollyError::asset_load(url, e))));
        }
        request
    }
}

use std::sync::{Arc, OnceLock};

use tokio::runtime::{Handle, Runtime};

use crate::animation::AnimationClip;
use crate::assets::io::AssetReader;
use crate::assets::loaders;
use crate::errors::{Result, ViewerError};
use crate::scene::Scene;

fn get_asset_runtime() -> &'static Runtime {
    static RUNTIME: OnceLock<Runtime> = OnceLock::new();
    RUNTIME.get_or_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .thread_name("asset-loader")
            .enable_all()
            .build()
            .expect("Failed to create asset loader runtime")
    })
}

/// Outcome of one asynchronous load, delivered to the viewer's event queue.
#[derive(Debug)]
pub enum LoadEvent {
    Model {
        locator: String,
        result: Result<Scene>,
    },
    Animation {
        name: String,
        locator: String,
        result: Result<AnimationClip>,
    },
}

/// Issues fire-and-forget loads and reports completions over a channel.
///
/// Loads are independent: each one completes (or fails) on its own and posts
/// exactly one [`LoadEvent`]. Nothing is cancelled; if the receiving side has
/// been dropped the event is discarded.
pub struct AssetServer<R: AssetReader> {
    reader: Arc<R>,
    events: flume::Sender<LoadEvent>,
    runtime: Handle,
}

impl<R: AssetReader> Clone for AssetServer<R> {
    fn clone(&self) -> Self {
        Self {
            reader: Arc::clone(&self.reader),
            events: self.events.clone(),
            runtime: self.runtime.clone(),
        }
    }
}

impl<R: AssetReader> AssetServer<R> {
    /// Creates a server on the shared asset-loader runtime.
    pub fn new(reader: R, events: flume::Sender<LoadEvent>) -> Self {
        Self::with_runtime(reader, events, get_asset_runtime().handle().clone())
    }

    pub fn with_runtime(reader: R, events: flume::Sender<LoadEvent>, runtime: Handle) -> Self {
        Self {
            reader: Arc::new(reader),
            events,
            runtime,
        }
    }

    #[must_use]
    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Starts loading the avatar model at `locator`.
    pub fn load_model(&self, locator: &str) {
        let reader = Arc::clone(&self.reader);
        let events = self.events.clone();
        let locator = locator.to_string();

        self.runtime.spawn(async move {
            let result = match fetch(&*reader, &locator).await {
                Ok(bytes) => {
                    let uri = locator.clone();
                    decode_blocking(move || loaders::decode_model(&uri, &bytes)).await
                }
                Err(e) => Err(e),
            };
            post(&events, LoadEvent::Model { locator, result });
        });
    }

    /// Starts loading the first clip of the asset at `locator`, tagged `name`.
    pub fn load_animation(&self, name: &str, locator: &str) {
        let reader = Arc::clone(&self.reader);
        let events = self.events.clone();
        let name = name.to_string();
        let locator = locator.to_string();

        self.runtime.spawn(async move {
            let result = match fetch(&*reader, &locator).await {
                Ok(bytes) => {
                    let uri = locator.clone();
                    decode_blocking(move || loaders::decode_animation(&uri, &bytes)).await
                }
                Err(e) => Err(e),
            };
            post(&events, LoadEvent::Animation { name, locator, result });
        });
    }
}

async fn fetch<R: AssetReader>(reader: &R, uri: &str) -> Result<Vec<u8>> {
    reader
        .read_bytes(uri)
        .await
        .map_err(|e| ViewerError::AssetRead {
            uri: uri.to_string(),
            reason: format!("{e:#}"),
        })
}

/// Runs CPU-bound decoding on the blocking pool.
async fn decode_blocking<T, F>(decode: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(decode).await?
}

fn post(events: &flume::Sender<LoadEvent>, event: LoadEvent) {
    if events.send(event).is_err() {
        log::debug!("Load completed after the viewer was torn down; discarding");
    }
}

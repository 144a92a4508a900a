//! Index lifecycle management.
//!
//! One `IndexService` per process owns the cached index and the
//! single-flight build: the first `ensure_index` caller creates a shared
//! build future, every concurrent caller awaits the same handle, and the
//! builder runs exactly once. A failed build clears the handle so a later
//! call can retry.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use tracing::{debug, info, warn};

use knowledge_types::KnowledgeConfig;

use crate::builder::build_index;
use crate::error::IndexError;
use crate::index::KnowledgeIndex;
use crate::loader::load_documents;

type SharedBuild = Shared<BoxFuture<'static, Result<Arc<KnowledgeIndex>, IndexError>>>;

/// Current phase of the index lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexStatus {
    /// No build has been requested yet
    Idle,
    /// A build is in flight
    Building,
    /// The index is cached and serving queries
    Ready,
    /// The last build failed; a later call may retry
    Failed(String),
}

struct ServiceState {
    cached: Option<Arc<KnowledgeIndex>>,
    in_flight: Option<SharedBuild>,
    status: IndexStatus,
    builds_started: u64,
}

/// Owns the memoized index build. Cheap to share via `Arc`.
pub struct IndexService {
    state: Arc<Mutex<ServiceState>>,
    config: KnowledgeConfig,
}

impl IndexService {
    pub fn new(config: KnowledgeConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(ServiceState {
                cached: None,
                in_flight: None,
                status: IndexStatus::Idle,
                builds_started: 0,
            })),
            config,
        }
    }

    /// Resolve the index, building it on first demand.
    ///
    /// Concurrent callers issued before the first build settles all await
    /// the same shared future: exactly one build runs, and every caller
    /// observes the identical index or the identical failure.
    pub async fn ensure_index(&self) -> Result<Arc<KnowledgeIndex>, IndexError> {
        let build = {
            let mut state = self.state.lock().expect("index state lock poisoned");
            if let Some(index) = &state.cached {
                return Ok(index.clone());
            }
            match &state.in_flight {
                Some(build) => build.clone(),
                None => {
                    let build = Self::build_future(self.state.clone(), self.config.clone());
                    state.status = IndexStatus::Building;
                    state.builds_started += 1;
                    state.in_flight = Some(build.clone());
                    debug!(build = state.builds_started, "Starting index build");
                    build
                }
            }
        };
        build.await
    }

    /// Start the build without blocking the caller.
    ///
    /// A failure is logged here; concurrent `ensure_index` waiters still
    /// receive it through the shared future.
    pub fn trigger_background(self: &Arc<Self>) {
        let service = self.clone();
        tokio::spawn(async move {
            if let Err(e) = service.ensure_index().await {
                warn!(error = %e, "Background index build failed");
            }
        });
    }

    /// Non-blocking snapshot of the lifecycle phase.
    pub fn status(&self) -> IndexStatus {
        self.state
            .lock()
            .expect("index state lock poisoned")
            .status
            .clone()
    }

    /// The cached index, if a build has completed.
    pub fn cached(&self) -> Option<Arc<KnowledgeIndex>> {
        self.state
            .lock()
            .expect("index state lock poisoned")
            .cached
            .clone()
    }

    /// How many builds have been started over the process lifetime.
    pub fn builds_started(&self) -> u64 {
        self.state
            .lock()
            .expect("index state lock poisoned")
            .builds_started
    }

    fn build_future(state: Arc<Mutex<ServiceState>>, config: KnowledgeConfig) -> SharedBuild {
        async move {
            let started = Instant::now();
            let result = Self::run_build(&config).await;

            let mut state = state.lock().expect("index state lock poisoned");
            state.in_flight = None;
            match result {
                Ok(index) => {
                    let index = Arc::new(index);
                    info!(
                        documents = index.total_documents,
                        terms = index.unique_terms(),
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "Knowledge index ready"
                    );
                    state.cached = Some(index.clone());
                    state.status = IndexStatus::Ready;
                    Ok(index)
                }
                Err(e) => {
                    warn!(error = %e, "Knowledge index build failed");
                    state.status = IndexStatus::Failed(e.to_string());
                    Err(e)
                }
            }
        }
        .boxed()
        .shared()
    }

    async fn run_build(config: &KnowledgeConfig) -> Result<KnowledgeIndex, IndexError> {
        let root = config.knowledge_dir.clone();
        let extensions = config.extensions.clone();
        let documents = tokio::task::spawn_blocking(move || load_documents(&root, &extensions))
            .await
            .map_err(|e| IndexError::Build(format!("build task panicked: {e}")))??;
        Ok(build_index(documents))
    }
}

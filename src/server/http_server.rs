use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context as _, Result};
use chrono::{DateTime, Utc};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::time::timeout;
use tracing::{debug, error, info};

use crate::handlers::{
    compose, CompressionHandler, DirectoryHandler, FileHandler, Handler, ResponseHeadersHandler,
};
use crate::http::paths::http_path_for_filepath;
use crate::http::request::Method;
use crate::routing::{MethodRouter, RadixTree};
use crate::server::connection;
use crate::util::fs;

/// How long one accept call may block before shutdown is re-checked.
const ACCEPT_DEADLINE: Duration = Duration::from_secs(1);

/// The origin server: routing table, listener configuration and the bits
/// of state shared across connections.
///
/// Routes are registered before [`start_serving`](Self::start_serving) and
/// read-only afterwards (`&mut self` on registration enforces that). The
/// request index is the only mutable shared state.
pub struct HttpServer {
    routes: RadixTree<MethodRouter>,
    port: u16,
    req_index: Mutex<u64>,
    common_headers: ResponseHeadersHandler,
    compression: Arc<dyn Handler>,
}

impl HttpServer {
    pub fn new(port: u16) -> Self {
        Self {
            routes: RadixTree::new(),
            port,
            req_index: Mutex::new(0),
            common_headers: ResponseHeadersHandler::new(),
            compression: Arc::new(CompressionHandler::new()),
        }
    }

    /// Pins the `Date` header clock, for byte-deterministic tests.
    pub fn set_clock(&mut self, clock: fn() -> DateTime<Utc>) {
        self.common_headers = ResponseHeadersHandler::with_clock(clock);
    }

    /// Registers a handler for `method` on `path`.
    pub fn add_handler(
        &mut self,
        path: &str,
        method: Method,
        handler: Arc<dyn Handler>,
    ) -> Result<()> {
        if let Some(router) = self.routes.find_mut(path) {
            router.insert(method, handler);
            return Ok(());
        }
        let mut router = MethodRouter::new();
        router.insert(method, handler);
        self.routes
            .insert(path, router)
            .with_context(|| format!("registering route {path}"))?;
        Ok(())
    }

    /// Walks the filesystem below `root` and registers a GET route for
    /// every file (file handler composed with compression) and every
    /// directory (pre-rendered listing).
    pub fn add_routes(&mut self, root: &Path) -> Result<()> {
        for file in fs::list_files_recursive(root)? {
            self.add_file_route(root, &file)?;
        }
        for dir in fs::list_dirs_recursive(root)? {
            self.add_dir_route(root, &dir)?;
        }
        Ok(())
    }

    fn add_file_route(&mut self, root: &Path, rel: &Path) -> Result<()> {
        let path = http_path_for_filepath(&rel.to_string_lossy());
        let file_handler: Arc<dyn Handler> = Arc::new(FileHandler::new(root.join(rel))?);
        let handler = compose(file_handler, Arc::clone(&self.compression));
        self.add_handler(&path, Method::GET, handler)
    }

    fn add_dir_route(&mut self, root: &Path, rel: &Path) -> Result<()> {
        let path = http_path_for_filepath(&rel.to_string_lossy());
        let handler = Arc::new(DirectoryHandler::new(&root.join(rel), rel)?);
        self.add_handler(&path, Method::GET, handler)
    }

    /// Binds the listener and accepts connections until `shutdown` flips to
    /// true. Accept runs under a short deadline so cancellation is observed
    /// between accepts; the listener closes when this returns.
    pub async fn start_serving(self: Arc<Self>, shutdown: watch::Receiver<bool>) -> Result<()> {
        let listener = TcpListener::bind(("0.0.0.0", self.port))
            .await
            .with_context(|| format!("binding TCP listener on port {}", self.port))?;
        info!(port = self.port, "listening");

        loop {
            if *shutdown.borrow() {
                info!("shutting down");
                return Ok(());
            }
            match timeout(ACCEPT_DEADLINE, listener.accept()).await {
                // accept deadline: expected, go re-check shutdown
                Err(_) => continue,
                Ok(Err(err)) => {
                    error!(error = %err, "failed accepting connection");
                    continue;
                }
                Ok(Ok((stream, peer))) => {
                    debug!(%peer, "accepted connection");
                    let server = Arc::clone(&self);
                    tokio::spawn(connection::handle_connection(server, stream));
                }
            }
        }
    }

    pub(crate) fn routes(&self) -> &RadixTree<MethodRouter> {
        &self.routes
    }

    pub(crate) fn common_headers(&self) -> &ResponseHeadersHandler {
        &self.common_headers
    }

    /// Next value of the monotonic request index, wrapping at u64::MAX.
    pub(crate) fn next_req_index(&self) -> u64 {
        let mut guard = self.req_index.lock().expect("request index lock poisoned");
        let index = *guard;
        *guard = guard.wrapping_add(1);
        index
    }
}

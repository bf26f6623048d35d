//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use backend::domain::WriteMode;
use backend::domain::ports::UserStore;

/// Everything the server needs beyond the health state.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) store: Arc<dyn UserStore>,
    pub(crate) write_mode: WriteMode,
}

impl ServerConfig {
    /// Construct a server configuration around an already-built store.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, store: Arc<dyn UserStore>) -> Self {
        Self {
            bind_addr,
            store,
            write_mode: WriteMode::default(),
        }
    }

    /// Select how create and update guard against existing records.
    #[must_use]
    pub fn with_write_mode(mut self, write_mode: WriteMode) -> Self {
        self.write_mode = write_mode;
        self
    }
}

use std::sync::Arc;

use tracing::debug;

use crate::api::{HttpNewsApi, NewsApi};
use crate::app::error::Result;
use crate::config::Config;

/// Wires the backend client to the loaded configuration.
pub struct AppContext {
    pub api: Arc<dyn NewsApi>,
    pub config: Arc<Config>,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let http = HttpNewsApi::new(&config.api)?;
        debug!("Using backend at {}", http.base_url());
        let api: Arc<dyn NewsApi> = Arc::new(http);
        Ok(Self::with_api(config, api))
    }

    /// Use a caller-supplied backend, e.g. a stub in tests.
    pub fn with_api(config: Config, api: Arc<dyn NewsApi>) -> Self {
        Self {
            api,
            config: Arc::new(config),
        }
    }
}

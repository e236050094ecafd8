use crate::config::Config;
use crate::error::{AppError, CLIENT_NOT_INITIALIZED, MISSING_API_KEY};
use crate::services::openai::OpenAiClient;
use std::sync::Arc;
use std::time::Instant;
use tera::Tera;

/// Whether the completion provider can be called, and why not.
#[derive(Debug, Clone)]
pub enum Provider {
    Ready(OpenAiClient),
    MissingKey,
    InitFailed(String),
}

impl Provider {
    pub fn from_config(config: &Config) -> Self {
        let Some(key) = config.openai_api_key.as_deref() else {
            return Provider::MissingKey;
        };
        match OpenAiClient::new(key, config.openai_base_url.as_str()) {
            Ok(client) => Provider::Ready(client),
            Err(e) => Provider::InitFailed(e.to_string()),
        }
    }

    pub fn client(&self) -> Result<&OpenAiClient, AppError> {
        match self {
            Provider::Ready(client) => Ok(client),
            Provider::MissingKey => Err(AppError::Configuration(MISSING_API_KEY.into())),
            Provider::InitFailed(_) => Err(AppError::Configuration(CLIENT_NOT_INITIALIZED.into())),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Provider::Ready(_))
    }
}

#[derive(Clone)]
pub struct AppState {
    pub tera: Arc<Tera>,
    pub config: Arc<Config>,
    pub provider: Arc<Provider>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let provider = Provider::from_config(&config);
        match &provider {
            Provider::Ready(_) => tracing::info!("OpenAI client ready"),
            Provider::MissingKey => {
                tracing::warn!("OPENAI_API_KEY not set; summarize requests will fail")
            }
            Provider::InitFailed(e) => tracing::error!("OpenAI client failed to initialize: {}", e),
        }

        Ok(AppState {
            tera: Arc::new(load_templates()?),
            config: Arc::new(config),
            provider: Arc::new(provider),
            started_at: Instant::now(),
        })
    }
}

/// Templates are compiled into the binary so the server runs from any directory.
pub fn load_templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("base.html", include_str!("../templates/base.html")),
        ("home.html", include_str!("../templates/home.html")),
    ])?;
    Ok(tera)
}

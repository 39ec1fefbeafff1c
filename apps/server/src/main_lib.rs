use std::sync::Arc;

use crate::config::Config;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use quotesmith_ai::{AiSynthesizer, AiSynthesizerConfig};
use quotesmith_core::estimates::{
    EstimateService, EstimateServiceTrait, MockSynthesizer, PricingConfig, QuoteSynthesizerTrait,
};
use quotesmith_core::store::{InMemoryQuoteStore, QuoteStoreTrait};
use quotesmith_storage_sqlite::{db, SqliteQuoteRepository};

pub struct AppState {
    pub estimate_service: Arc<dyn EstimateServiceTrait>,
}

pub fn init_tracing() {
    let log_format = std::env::var("QS_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let pricing = PricingConfig::for_currency(&config.currency);

    let store: Arc<dyn QuoteStoreTrait> = match &config.db_path {
        Some(db_path) => {
            db::init(db_path)?;
            let pool = db::create_pool(db_path)?;
            db::run_migrations(&pool)?;
            let writer = db::write_actor::spawn_writer((*pool).clone());
            tracing::info!("Using SQLite store at {}", db_path);
            Arc::new(SqliteQuoteRepository::new(pool, writer))
        }
        None => {
            tracing::warn!("QS_DB_PATH not set - estimates are kept in memory only");
            Arc::new(InMemoryQuoteStore::new())
        }
    };

    let synthesizer: Arc<dyn QuoteSynthesizerTrait> = match &config.anthropic_api_key {
        Some(api_key) => {
            tracing::info!("Using AI synthesizer with model {}", config.ai_model);
            Arc::new(AiSynthesizer::new(
                api_key.clone(),
                AiSynthesizerConfig {
                    model_id: config.ai_model.clone(),
                    timeout_ms: config.ai_timeout_ms,
                    currency: pricing.currency.clone(),
                    currency_name: pricing.currency_name.clone(),
                    ..AiSynthesizerConfig::default()
                },
            ))
        }
        None => {
            tracing::warn!(
                "ANTHROPIC_API_KEY not set - estimate generation will use the mock synthesizer"
            );
            Arc::new(MockSynthesizer::new(pricing))
        }
    };

    let estimate_service: Arc<dyn EstimateServiceTrait> =
        Arc::new(EstimateService::new(store, synthesizer));

    Ok(Arc::new(AppState { estimate_service }))
}

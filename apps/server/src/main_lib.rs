use std::sync::Arc;

use captable_core::{CalculatorConfig, CapTableService, CapTableServiceTrait};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub cap_table_service: Arc<dyn CapTableServiceTrait + Send + Sync>,
}

pub fn init_tracing() {
    let log_format = std::env::var("CAPTABLE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
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

pub fn build_state(config: &Config) -> Arc<AppState> {
    let calculator_config = CalculatorConfig {
        share_discrepancy_tolerance: config.share_tolerance,
    };
    tracing::info!(
        "Share discrepancy tolerance: {}",
        calculator_config.share_discrepancy_tolerance
    );
    let cap_table_service = Arc::new(CapTableService::new(calculator_config));

    Arc::new(AppState { cap_table_service })
}

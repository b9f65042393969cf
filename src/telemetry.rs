//! Log output and span export.
//!
//! Spans from `#[tracing::instrument]` and the HTTP trace layer go both to the
//! formatted log output and, when enabled, to the OTLP collector.

use anyhow::Context;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_otlp::{SpanExporter, WithExportConfig};
use opentelemetry_sdk::{runtime, trace::TracerProvider, Resource};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::constants::{API_NAME, OTLP_TRACES_ENDPOINT, SERVICE_NAME};

/// Keeps the span exporter alive; call [`shutdown`](Self::shutdown) before
/// exit so buffered spans are flushed.
pub struct TelemetryGuard {
    provider: Option<TracerProvider>,
}

impl TelemetryGuard {
    pub fn shutdown(self) {
        if let Some(provider) = self.provider {
            if let Err(e) = provider.shutdown() {
                tracing::warn!("{} Failed to shut down tracing: {}", API_NAME, e);
            }
        }
    }
}

pub fn init(config: &Config) -> anyhow::Result<TelemetryGuard> {
    let provider = if config.otel_enabled {
        Some(build_tracer_provider()?)
    } else {
        None
    };
    let otel_layer = provider
        .as_ref()
        .map(|provider| tracing_opentelemetry::layer().with_tracer(provider.tracer(SERVICE_NAME)));

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(otel_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(TelemetryGuard { provider })
}

fn build_tracer_provider() -> anyhow::Result<TracerProvider> {
    let exporter = SpanExporter::builder()
        .with_http()
        .with_endpoint(OTLP_TRACES_ENDPOINT)
        .build()
        .context("Failed to create OTLP span exporter")?;

    Ok(TracerProvider::builder()
        .with_batch_exporter(exporter, runtime::Tokio)
        .with_resource(Resource::new(vec![KeyValue::new(
            "service.name",
            SERVICE_NAME,
        )]))
        .build())
}

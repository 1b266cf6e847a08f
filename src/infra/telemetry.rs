use std::sync::Once;

use metrics::{Unit, describe_counter, describe_histogram};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::application::analytics::{METRIC_PAGE_VIEW_FAILURES, METRIC_PAGE_VIEWS};
use crate::application::contact::METRIC_CONTACT_SUBMISSIONS;
use crate::application::page::METRIC_PAGE_RESOLVE_MS;
use crate::application::render::METRIC_SECTIONS_SKIPPED;
use crate::config::{LogFormat, LoggingSettings};

use super::error::InfraError;

static METRIC_DESCRIPTIONS: Once = Once::new();

/// Install a global tracing subscriber using the provided logging settings.
pub fn init(logging: &LoggingSettings) -> Result<(), InfraError> {
    describe_metrics();

    let env_filter = EnvFilter::builder()
        .with_default_directive(logging.level.into())
        .from_env_lossy();

    let fmt_layer = match logging.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed(),
        LogFormat::Compact => fmt::layer().compact().with_target(true).boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(ErrorLayer::default())
        .with(fmt_layer)
        .try_init()
        .map_err(|err| {
            InfraError::telemetry(format!("failed to install tracing subscriber: {err}"))
        })
}

fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_counter!(
            METRIC_PAGE_VIEWS,
            Unit::Count,
            "Total number of page views recorded."
        );
        describe_counter!(
            METRIC_PAGE_VIEW_FAILURES,
            Unit::Count,
            "Total number of page views that could not be recorded."
        );
        describe_counter!(
            METRIC_SECTIONS_SKIPPED,
            Unit::Count,
            "Total number of stored sections that produced no view."
        );
        describe_counter!(
            METRIC_CONTACT_SUBMISSIONS,
            Unit::Count,
            "Total number of contact form submissions, labelled by outcome."
        );
        describe_histogram!(
            METRIC_PAGE_RESOLVE_MS,
            Unit::Milliseconds,
            "Page resolution latency in milliseconds."
        );
    });
}

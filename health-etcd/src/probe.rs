use std::time::Instant;

use tokio_util::sync::CancellationToken;
use tracing::debug;
use typed_builder::TypedBuilder;

use health_core::ext::duration_ext::DurationExt;

use crate::error::ProbeError;
use crate::transport::{self, TlsInfo, REQUEST_TIMEOUT};

/// Key written by every probe. Reserved for the collector; the value is
/// idempotent, so nothing cleans it up.
pub const PROBE_KEY: &str = "/health_probe";
pub const PROBE_VALUE: &str = "health_probe";

#[derive(Debug, Clone, TypedBuilder)]
pub struct ProbeSetting {
    pub url: String,
    #[builder(default)]
    pub tls: TlsInfo,
    #[builder(default)]
    pub cancellation: CancellationToken,
}

/// Outcome of one member's probe. A sample always exists, healthy or not.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthSample {
    pub response_time_ms: f64,
    pub healthy: bool,
}

/// Probes one member with a single bounded write over a dedicated
/// connection. Any failure, including a transport that cannot even be
/// built, classifies the member unhealthy; nothing is retried and nothing
/// escapes as an error.
pub async fn probe(setting: ProbeSetting) -> HealthSample {
    let start = Instant::now();
    let outcome = write_probe_key(&setting).await;
    let response_time_ms = start.elapsed().as_millis_f64();
    match outcome {
        Ok(()) => HealthSample {
            response_time_ms,
            healthy: true,
        },
        Err(error) => {
            debug!("probe {} unhealthy: {}", setting.url, error);
            HealthSample {
                response_time_ms,
                healthy: false,
            }
        }
    }
}

async fn write_probe_key(setting: &ProbeSetting) -> Result<(), ProbeError> {
    let endpoints = [setting.url.clone()];
    let mut client = transport::connect(&endpoints, &setting.tls).await?;
    tokio::select! {
        _ = setting.cancellation.cancelled() => Err(ProbeError::Cancelled),
        outcome = tokio::time::timeout(REQUEST_TIMEOUT, client.put(PROBE_KEY, PROBE_VALUE, None)) => {
            outcome
                .map_err(|_| ProbeError::Timeout { timeout: REQUEST_TIMEOUT })?
                .map_err(ProbeError::Write)?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tokio_util::sync::CancellationToken;

    use crate::transport::TlsInfo;

    use super::*;

    #[tokio::test]
    async fn refused_connection_is_unhealthy() {
        let setting = ProbeSetting::builder()
            .url("http://127.0.0.1:1".to_string())
            .build();
        let sample = probe(setting).await;
        assert!(!sample.healthy);
        assert!(sample.response_time_ms >= 0.0);
    }

    #[tokio::test]
    async fn broken_tls_material_is_unhealthy_without_network() {
        let tls = TlsInfo {
            ca_file: Some(PathBuf::from("/nonexistent/ca.pem")),
            ..Default::default()
        };
        let setting = ProbeSetting::builder()
            .url("https://127.0.0.1:1".to_string())
            .tls(tls)
            .build();
        let sample = probe(setting).await;
        assert!(!sample.healthy);
        assert!(sample.response_time_ms >= 0.0);
    }

    #[tokio::test]
    async fn cancelled_probe_is_unhealthy() {
        let cancellation = CancellationToken::new();
        cancellation.cancel();
        let setting = ProbeSetting::builder()
            .url("http://127.0.0.1:1".to_string())
            .cancellation(cancellation)
            .build();
        let sample = probe(setting).await;
        assert!(!sample.healthy);
    }
}

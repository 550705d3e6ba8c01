use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("cannot read tls material {path}: {error}")]
    Io {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },
    #[error("client certificate and key must be configured together")]
    IncompleteIdentity,
    #[error("cannot construct etcd client: {0}")]
    Connect(#[source] etcd_client::Error),
}

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("member list did not complete within {timeout:?}")]
    Timeout { timeout: Duration },
    #[error("member list failed: {0}")]
    Request(#[source] etcd_client::Error),
}

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("health write did not complete within {timeout:?}")]
    Timeout { timeout: Duration },
    #[error("health write failed: {0}")]
    Write(#[source] etcd_client::Error),
    #[error("probe cancelled")]
    Cancelled,
}

/// Failure of a whole collection cycle. Raised only while the member list is
/// still unknown; once membership is resolved, per-member failures turn into
/// unhealthy records instead.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
}

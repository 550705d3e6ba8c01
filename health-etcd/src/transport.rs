use std::path::{Path, PathBuf};
use std::time::Duration;

use etcd_client::{Certificate, Client, ConnectOptions, Identity, TlsOptions};
use tokio::fs;

use crate::error::TransportError;

/// Handshake deadline for every connection this collector opens.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Deadline applied to every request issued over a built client.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Paths to the certificate material shared by the seed connection and every
/// per-member probe connection. All empty means plain or system-trust
/// transport, whatever the endpoint scheme asks for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlsInfo {
    pub ca_file: Option<PathBuf>,
    pub cert_file: Option<PathBuf>,
    pub key_file: Option<PathBuf>,
}

impl TlsInfo {
    pub fn is_empty(&self) -> bool {
        self.ca_file.is_none() && self.cert_file.is_none() && self.key_file.is_none()
    }

    async fn tls_options(&self) -> Result<Option<TlsOptions>, TransportError> {
        if self.is_empty() {
            return Ok(None);
        }
        let mut options = TlsOptions::new();
        if let Some(ca) = &self.ca_file {
            options = options.ca_certificate(Certificate::from_pem(read_pem(ca).await?));
        }
        match (&self.cert_file, &self.key_file) {
            (Some(cert), Some(key)) => {
                let cert = read_pem(cert).await?;
                let key = read_pem(key).await?;
                options = options.identity(Identity::from_pem(cert, key));
            }
            (None, None) => {}
            _ => return Err(TransportError::IncompleteIdentity),
        }
        Ok(Some(options))
    }
}

async fn read_pem(path: &Path) -> Result<Vec<u8>, TransportError> {
    fs::read(path).await.map_err(|error| TransportError::Io {
        path: path.to_path_buf(),
        error,
    })
}

/// Builds a client bound to `endpoints`. Certificate material is loaded here,
/// the connection itself is established lazily by the first request.
pub async fn connect(endpoints: &[String], tls: &TlsInfo) -> Result<Client, TransportError> {
    let mut options = ConnectOptions::new()
        .with_connect_timeout(CONNECT_TIMEOUT)
        .with_timeout(REQUEST_TIMEOUT);
    if let Some(tls) = tls.tls_options().await? {
        options = options.with_tls(tls);
    }
    Client::connect(endpoints, Some(options))
        .await
        .map_err(TransportError::Connect)
}

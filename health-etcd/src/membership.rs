use std::time::Duration;

use etcd_client::Client;
use tracing::debug;
use url::Url;

use crate::error::DiscoveryError;

/// Deadline for the member list round-trip.
pub const DISCOVERY_TIMEOUT: Duration = Duration::from_secs(20);
/// Client port assumed when a member advertises no client url.
pub const DEFAULT_CLIENT_PORT: u16 = 2379;

/// One cluster node as reported by the membership response. Valid for the
/// cycle that resolved it; the next cycle resolves again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub client_url: Option<String>,
}

impl Member {
    /// Address probed for this member. The advertised client url wins; a
    /// member that advertises none falls back to the `https://{name}:2379`
    /// convention.
    pub fn probe_url(&self) -> String {
        match &self.client_url {
            Some(url) => url.clone(),
            None => format!("https://{}:{}", self.name, DEFAULT_CLIENT_PORT),
        }
    }
}

/// Asks the cluster behind `client` for its current members, in response
/// order. Called once per cycle; failure here fails the cycle.
pub async fn resolve(client: &mut Client) -> Result<Vec<Member>, DiscoveryError> {
    let resp = tokio::time::timeout(DISCOVERY_TIMEOUT, client.member_list())
        .await
        .map_err(|_| DiscoveryError::Timeout {
            timeout: DISCOVERY_TIMEOUT,
        })?
        .map_err(DiscoveryError::Request)?;
    let members = resp
        .members()
        .iter()
        .map(|member| {
            let client_url = member
                .client_urls()
                .iter()
                .find(|url| Url::parse(url).is_ok())
                .cloned();
            Member {
                id: format!("{:x}", member.id()),
                name: member.name().to_string(),
                client_url,
            }
        })
        .collect::<Vec<_>>();
    debug!("resolved {} members {:?}", members.len(), members);
    Ok(members)
}

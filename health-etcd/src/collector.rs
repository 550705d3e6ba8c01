use futures::future::join_all;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use typed_builder::TypedBuilder;

use health_core::sink::{Fields, MetricSink, Tags};

use crate::config::HealthConfig;
use crate::error::CycleError;
use crate::membership::{self, Member};
use crate::probe::{self, HealthSample, ProbeSetting};
use crate::transport::{self, TlsInfo};

pub const MEASUREMENT: &str = "etcd_health_checks";

/// One configured collector instance. Holds configuration only; every
/// connection it opens lives inside a single `gather` call.
#[derive(Debug, Clone, TypedBuilder)]
pub struct EtcdHealth {
    pub endpoints: Vec<String>,
    #[builder(default)]
    pub tls: TlsInfo,
    pub cluster: String,
}

impl EtcdHealth {
    pub fn from_config(config: HealthConfig) -> Self {
        let HealthConfig {
            endpoints,
            ssl_ca_file,
            ssl_cert_file,
            ssl_key_file,
            cluster,
        } = config;
        Self {
            endpoints,
            tls: TlsInfo {
                ca_file: ssl_ca_file,
                cert_file: ssl_cert_file,
                key_file: ssl_key_file,
            },
            cluster,
        }
    }

    /// Runs one collection cycle: resolve membership through the seed
    /// endpoints, probe every member concurrently, emit one record per
    /// member in discovery order. Fails only while the member list is
    /// unknown; after that, probe failures become unhealthy records and the
    /// cycle still completes.
    pub async fn gather(
        &self,
        sink: &dyn MetricSink,
        cancellation: CancellationToken,
    ) -> Result<(), CycleError> {
        let mut seed = transport::connect(&self.endpoints, &self.tls).await?;
        let members = membership::resolve(&mut seed).await?;
        self.probe_members(&members, sink, cancellation).await;
        Ok(())
    }

    async fn probe_members(
        &self,
        members: &[Member],
        sink: &dyn MetricSink,
        cancellation: CancellationToken,
    ) {
        let probes = members.iter().map(|member| {
            let setting = ProbeSetting::builder()
                .url(member.probe_url())
                .tls(self.tls.clone())
                .cancellation(cancellation.child_token())
                .build();
            probe::probe(setting)
        });
        let samples = join_all(probes).await;
        for (member, sample) in members.iter().zip(samples) {
            debug!("{} probed {:?}", member.name, sample);
            self.emit_record(sink, member, sample);
        }
    }

    fn emit_record(&self, sink: &dyn MetricSink, member: &Member, sample: HealthSample) {
        let mut fields = Fields::new();
        fields.insert("response_time".to_string(), sample.response_time_ms.into());
        fields.insert("is_healthy".to_string(), (sample.healthy as i64).into());
        let mut tags = Tags::new();
        tags.insert("name".to_string(), member.name.clone());
        tags.insert("hostname".to_string(), member.name.clone());
        tags.insert("id".to_string(), member.id.clone());
        tags.insert("cluster".to_string(), self.cluster.clone());
        sink.emit(MEASUREMENT, fields, tags);
    }
}

#[cfg(test)]
mod tests {
    use tokio_util::sync::CancellationToken;

    use health_core::sink::memory::MemorySink;
    use health_core::sink::FieldValue;

    use crate::error::CycleError;
    use crate::membership::Member;

    use super::*;

    fn unreachable_member(id: &str, name: &str) -> Member {
        Member {
            id: id.to_string(),
            name: name.to_string(),
            client_url: Some("http://127.0.0.1:1".to_string()),
        }
    }

    fn collector(cluster: &str) -> EtcdHealth {
        EtcdHealth::builder()
            .endpoints(vec!["http://127.0.0.1:1".to_string()])
            .cluster(cluster.to_string())
            .build()
    }

    #[tokio::test]
    async fn every_member_yields_one_record() {
        let health = collector("prod");
        let members = vec![
            unreachable_member("a1", "n1"),
            unreachable_member("a2", "n2"),
        ];
        let sink = MemorySink::new();
        health
            .probe_members(&members, &sink, CancellationToken::new())
            .await;
        let points = sink.points();
        assert_eq!(points.len(), 2);
        for (point, member) in points.iter().zip(&members) {
            assert_eq!(point.measurement, MEASUREMENT);
            assert_eq!(point.tags["name"], member.name);
            assert_eq!(point.tags["hostname"], member.name);
            assert_eq!(point.tags["id"], member.id);
            assert_eq!(point.tags["cluster"], "prod");
            assert_eq!(point.fields["is_healthy"], FieldValue::Integer(0));
            match point.fields["response_time"] {
                FieldValue::Float(ms) => assert!(ms >= 0.0),
                other => panic!("response_time must be a float, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn consecutive_cycles_are_stable() {
        let health = collector("prod");
        let members = vec![
            unreachable_member("a1", "n1"),
            unreachable_member("a2", "n2"),
        ];
        let sink = MemorySink::new();
        health
            .probe_members(&members, &sink, CancellationToken::new())
            .await;
        let first = sink.points();
        sink.clear();
        health
            .probe_members(&members, &sink, CancellationToken::new())
            .await;
        let second = sink.points();
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.tags, b.tags);
        }
    }

    #[tokio::test]
    async fn failed_discovery_emits_nothing() {
        let health = collector("prod");
        let sink = MemorySink::new();
        let error = health
            .gather(&sink, CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(error, CycleError::Discovery(_)));
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn broken_seed_tls_emits_nothing() {
        let health = EtcdHealth::builder()
            .endpoints(vec!["https://127.0.0.1:1".to_string()])
            .tls(TlsInfo {
                ca_file: Some("/nonexistent/ca.pem".into()),
                ..Default::default()
            })
            .cluster("prod".to_string())
            .build();
        let sink = MemorySink::new();
        let error = health
            .gather(&sink, CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(error, CycleError::Transport(_)));
        assert!(sink.is_empty());
    }

    #[test]
    fn from_config_maps_tls_material() {
        let config = crate::config::HealthConfig {
            endpoints: vec!["https://10.0.0.1:2379".to_string()],
            ssl_ca_file: Some("/etc/ssl/ca.pem".into()),
            ssl_cert_file: Some("/etc/ssl/etcd.pem".into()),
            ssl_key_file: Some("/etc/ssl/etcd-key.pem".into()),
            cluster: "prod".to_string(),
        };
        let health = EtcdHealth::from_config(config);
        assert_eq!(health.endpoints, vec!["https://10.0.0.1:2379".to_string()]);
        assert_eq!(health.tls.ca_file, Some("/etc/ssl/ca.pem".into()));
        assert_eq!(health.cluster, "prod");
    }
}

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use health_core::ext::init_logger_with_filter;
use health_core::sink::log::LogSink;
use health_etcd::collector::EtcdHealth;
use health_etcd::transport::TlsInfo;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short, long, default_value = "https://localhost:2379")]
    endpoints: Vec<String>,
    #[arg(long)]
    ssl_ca_file: Option<PathBuf>,
    #[arg(long)]
    ssl_cert_file: Option<PathBuf>,
    #[arg(long)]
    ssl_key_file: Option<PathBuf>,
    #[arg(short, long, default_value = "default")]
    cluster: String,
    /// Seconds between cycles; a single cycle runs when absent.
    #[arg(short, long)]
    interval: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logger_with_filter("health=debug");
    let health = EtcdHealth::builder()
        .endpoints(args.endpoints)
        .tls(TlsInfo {
            ca_file: args.ssl_ca_file,
            cert_file: args.ssl_cert_file,
            key_file: args.ssl_key_file,
        })
        .cluster(args.cluster)
        .build();
    let sink = LogSink;
    let cancellation = CancellationToken::new();
    let Some(interval) = args.interval else {
        health.gather(&sink, cancellation).await?;
        return Ok(());
    };
    let mut ticker = tokio::time::interval(Duration::from_secs(interval));
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let cycle = cancellation.child_token();
                tokio::select! {
                    outcome = health.gather(&sink, cycle.clone()) => {
                        if let Some(error) = outcome.err() {
                            error!("collection cycle failed {:?}", error);
                        }
                    }
                    _ = tokio::signal::ctrl_c() => {
                        cycle.cancel();
                        info!("shutdown while a cycle was in flight");
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("shutting down");
                break;
            }
        }
    }
    Ok(())
}

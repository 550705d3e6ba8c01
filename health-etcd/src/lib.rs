pub const ETCD_HEALTH_CONFIG: &'static str = include_str!("../health.toml");

pub mod collector;
pub mod config;
pub mod error;
pub mod membership;
pub mod probe;
pub mod transport;

#[cfg(test)]
#[ctor::ctor]
fn init() {
    health_core::ext::init_logger(tracing::Level::DEBUG);
}

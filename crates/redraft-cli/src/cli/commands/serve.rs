//! Proxy server command.

use anyhow::Result;
use redraft_core::config::Config;
use redraft_proxy::ProxyConfig;

pub async fn run(config: &Config, addr: Option<String>) -> Result<()> {
    let mut server = config.server.clone();
    if let Some(addr) = addr {
        server.addr = addr;
    }
    let proxy = ProxyConfig::from_server_config(&server, config.request_timeout())?;
    redraft_proxy::serve(proxy).await
}

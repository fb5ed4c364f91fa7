use anyhow::{anyhow, Result};
use rocketmap_core::config::Config;
use std::path::Path;

/// Start the API server for the current project.
pub fn run(root: &Path, port: u16, no_open: bool) -> Result<()> {
    let config = Config::load(root).map_err(|e| anyhow!("{e}"))?;
    let name = config.project.clone();

    let rt = tokio::runtime::Runtime::new()?;
    let root_buf = root.to_path_buf();

    rt.block_on(async move {
        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
        let actual_port = listener.local_addr()?.port();

        println!("RocketMap server for '{name}' → http://localhost:{actual_port}");

        tokio::select! {
            res = rocketmap_server::serve_on(root_buf, listener, !no_open) => res,
            _ = tokio::signal::ctrl_c() => Ok(()),
        }
    })
}

//! Web server command.

use console::style;

use crate::config::ExtractorConfig;

/// Default port when the bind address names only a host.
const DEFAULT_PORT: u16 = 5000;

/// Start the web server.
pub async fn cmd_serve(settings: &ExtractorConfig, bind: &str) -> anyhow::Result<()> {
    let (host, port) = parse_bind_address(bind)?;

    tokio::fs::create_dir_all(&settings.upload_dir).await?;
    println!(
        "{} Storing uploads in {}",
        style("→").cyan(),
        settings.upload_dir.display()
    );
    println!(
        "{} Starting lipikar at http://{}:{}",
        style("→").cyan(),
        host,
        port
    );
    println!("  Press Ctrl+C to stop");

    crate::server::serve(settings, &host, port).await
}

/// Parse a bind address that can be:
/// - Just a port: "5000" -> 127.0.0.1:5000
/// - Just a host: "0.0.0.0" -> 0.0.0.0:5000
/// - Host and port: "0.0.0.0:5000" -> 0.0.0.0:5000
fn parse_bind_address(bind: &str) -> anyhow::Result<(String, u16)> {
    if let Ok(port) = bind.parse::<u16>() {
        return Ok(("127.0.0.1".to_string(), port));
    }

    if let Some((host, port_str)) = bind.rsplit_once(':') {
        let port = port_str
            .parse::<u16>()
            .map_err(|_| anyhow::anyhow!("Invalid port in bind address: {}", bind))?;
        return Ok((host.to_string(), port));
    }

    Ok((bind.to_string(), DEFAULT_PORT))
}

pub mod rest;

use std::{fmt::Display, path::PathBuf, time::Duration};

use anyhow::{Result, anyhow};
use movies_server::config::{Parser, ServerConfig};
use rand::Rng as _;
use reqwest::Url;
use tempfile::TempDir;
use tracing::{debug, error};

fn random_port() -> Result<u16> {
    let mut rng = rand::rng();

    let mut retries = 3;
    while retries > 0 {
        let port: u16 = rng.random_range(3030..4030);
        let addr: std::net::SocketAddr = format!("127.0.0.1:{}", port).parse()?;
        match std::net::TcpStream::connect_timeout(&addr, std::time::Duration::from_millis(100)) {
            Err(e) if e.kind() == std::io::ErrorKind::ConnectionRefused => return Ok(port),
            Err(_) => retries -= 1,
            Ok(_) => retries -= 1,
        }
    }

    Err(anyhow!("Could not find a free port"))
}

/// Keeps temporary data directory alive for the duration of a test.
pub struct ConfigGuard {
    #[allow(dead_code)]
    data_dir: TempDir,
}

fn test_data_dir() -> PathBuf {
    std::env::temp_dir().join("movies-e2e-tests")
}

pub fn test_config(test_name: &str) -> Result<(ServerConfig, ConfigGuard)> {
    let base_dir = test_data_dir();
    std::fs::create_dir_all(&base_dir)?;
    let tmp_data_dir = TempDir::with_prefix_in(format!("{}_", test_name), &base_dir)?;
    let data_dir = tmp_data_dir.path().to_string_lossy().to_string();
    let database_url = format!("sqlite://{}/movies.db", data_dir);
    let port = random_port()?;
    let port = port.to_string();
    let base_url = format!("http://127.0.0.1:{}/", port);
    let args = &[
        "movies-e2e-tests",
        "--data-dir",
        &data_dir,
        "--database-url",
        &database_url,
        "--port",
        &port,
        "--base-url",
        &base_url,
    ];
    let config = ServerConfig::try_parse_from(args)?;
    Ok((
        config,
        ConfigGuard {
            data_dir: tmp_data_dir,
        },
    ))
}

/// Prepares config and an empty, migrated database
pub async fn prepare_env(test_name: &str) -> Result<(ServerConfig, ConfigGuard)> {
    let (args, guard) = test_config(test_name)?;
    let pool = movies_dal::new_pool(&args.database_url(), 1).await?;
    movies_dal::migrate(&pool).await?;
    pool.close().await;
    Ok((args, guard))
}

/// Starts server in background and waits until it accepts connections.
pub async fn spawn_server(args: ServerConfig) -> Result<()> {
    let addr = format!("{}:{}", args.listen_address, args.port);
    tokio::spawn(async move {
        if let Err(e) = movies_server::run::run(args).await {
            error!("Server failed: {e}");
        }
    });

    for _ in 0..50 {
        if tokio::net::TcpStream::connect(&addr).await.is_ok() {
            debug!("Server is up on {addr}");
            return Ok(());
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    Err(anyhow!("Server did not start on {addr}"))
}

pub fn extend_url(url: &Url, segment: impl Display) -> Url {
    let mut url = url.clone();
    url.path_segments_mut()
        .expect("base url")
        .push(&segment.to_string());
    url
}

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use vasttrafik_sensor::config::Config;
use vasttrafik_sensor::sensor::{Sensor, build_sensors};
use vasttrafik_sensor::vasttrafik::VasttrafikClient;

/// Environment variable naming the config file.
const CONFIG_ENV: &str = "VASTTRAFIK_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "vasttrafik.toml";

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let path = config_path();
    let config = Config::load(&path)?;
    info!(
        path = %path.display(),
        departures = config.departures.len(),
        trips = config.planner.len(),
        "loaded config"
    );

    let client = VasttrafikClient::connect(config.planner_config()).await?;
    let mut sensors = build_sensors(Arc::new(client), &config).await?;
    info!("Built {} sensors", sensors.len());

    let mut interval = tokio::time::interval(Duration::from_secs(config.scan_interval_secs));

    loop {
        tokio::select! {
            _ = interval.tick() => update_all(&mut sensors).await,
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down");
                return Ok(());
            }
        }
    }
}

/// First CLI argument, then `VASTTRAFIK_CONFIG`, then `vasttrafik.toml`.
fn config_path() -> PathBuf {
    std::env::args_os()
        .nth(1)
        .or_else(|| std::env::var_os(CONFIG_ENV))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

async fn update_all(sensors: &mut [Box<dyn Sensor>]) {
    let results = join_all(sensors.iter_mut().map(|sensor| sensor.update())).await;

    for (sensor, result) in sensors.iter().zip(results) {
        if let Err(e) = result {
            warn!(sensor = sensor.name(), error = %e, "update failed");
            continue;
        }

        let attributes = serde_json::to_string(sensor.attributes()).unwrap_or_default();
        info!(
            sensor = sensor.name(),
            state = sensor.state().unwrap_or("unknown"),
            attributes = %attributes,
            "observation"
        );
    }
}

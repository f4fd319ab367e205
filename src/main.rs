use anyhow::Result;
use smarthome::*;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

use smarthome::models::{DeviceId, SensorTypeId};
use smarthome::repository::Repositories;
use smarthome::services::{PowerMeter, Services};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let app_config = config::AppConfig::load()?;

    let sqlite = repository::sqlite::SqliteRepo::connect(
        &app_config.database.path,
        app_config.database.max_pool_size,
    )
    .await?;
    sqlite.init().await?;
    let repos = Repositories::sqlite(sqlite);

    let seeded_meter = if app_config.bootstrap.seed {
        bootstrap::run(&repos).await?
    } else {
        bootstrap::find_grid_meter(&repos).await?
    };
    let grid_meter = match app_config.power_meter.device_id.or(seeded_meter) {
        Some(id) => id,
        None => {
            tracing::warn!(
                "No grid power meter configured or seeded; peak power reports will find no records"
            );
            DeviceId::new()
        }
    };
    let power_meter = PowerMeter {
        device_id: grid_meter,
        sensor_type: SensorTypeId::parse(&app_config.power_meter.sensor_type)?,
    };
    tracing::info!(device_id = %power_meter.device_id, sensor_type = %power_meter.sensor_type, "Grid power meter");

    let services = Services::new(&repos, power_meter, Arc::new(sun::NoaaSunCalculator));
    let app = routes::app(services);
    let addr = format!("{}:{}", app_config.server.host, app_config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = async {
            #[cfg(unix)]
            {
                let mut sigterm = match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                    Ok(s) => s,
                    Err(_) => {
                        let _ = tokio::signal::ctrl_c().await;
                        return;
                    }
                };
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = sigterm.recv() => {}
                }
            }
            #[cfg(not(unix))]
            {
                let _ = tokio::signal::ctrl_c().await;
            }
        } => {
            tracing::info!("Received shutdown signal");
        }
    }

    Ok(())
}

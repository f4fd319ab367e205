// SQLite-backed repositories. One pool, one table per aggregate; ids stored as text.

mod actuator;
mod catalogue;
mod device;
mod house;
mod log;
mod room;
mod sensor;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteQueryResult};
use std::path::Path;
use std::str::FromStr;

pub struct SqliteRepo {
    pool: SqlitePool,
}

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS houses (
        id TEXT PRIMARY KEY,
        door TEXT NOT NULL,
        street TEXT NOT NULL,
        city TEXT NOT NULL,
        country TEXT NOT NULL,
        postal_code TEXT NOT NULL,
        latitude REAL NOT NULL,
        longitude REAL NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS rooms (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        floor INTEGER NOT NULL,
        length REAL NOT NULL,
        width REAL NOT NULL,
        height REAL NOT NULL,
        house_id TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS devices (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        model TEXT NOT NULL,
        active INTEGER NOT NULL,
        room_id TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_devices_room ON devices(room_id)",
    "CREATE TABLE IF NOT EXISTS sensor_types (id TEXT PRIMARY KEY, unit TEXT NOT NULL)",
    "CREATE TABLE IF NOT EXISTS actuator_types (id TEXT PRIMARY KEY)",
    r#"
    CREATE TABLE IF NOT EXISTS sensors (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        device_id TEXT NOT NULL,
        sensor_type_id TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_sensors_device ON sensors(device_id)",
    r#"
    CREATE TABLE IF NOT EXISTS actuators (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        actuator_type_id TEXT NOT NULL,
        device_id TEXT NOT NULL,
        lower_limit TEXT,
        upper_limit TEXT,
        precision TEXT,
        status TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_actuators_device ON actuators(device_id)",
    r#"
    CREATE TABLE IF NOT EXISTS logs (
        id TEXT PRIMARY KEY,
        time TEXT NOT NULL,
        value TEXT NOT NULL,
        value_kind TEXT NOT NULL,
        numeric_value REAL,
        sensor_id TEXT NOT NULL,
        device_id TEXT NOT NULL,
        sensor_type_id TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_logs_device_type_time ON logs(device_id, sensor_type_id, time)",
    "CREATE INDEX IF NOT EXISTS idx_logs_type_time ON logs(sensor_type_id, time)",
];

impl SqliteRepo {
    pub async fn connect(path: &str, max_pool_size: u32) -> anyhow::Result<Self> {
        if let Some(parent) = Path::new(path).parent() {
            std::fs::create_dir_all(parent)?;
        }
        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .busy_timeout(std::time::Duration::from_secs(5))
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_pool_size)
            .connect_with(opts)
            .await?;
        Ok(Self { pool })
    }

    pub async fn init(&self) -> anyhow::Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Exactly one row written.
fn written(result: SqliteQueryResult) -> bool {
    result.rows_affected() == 1
}

use async_trait::async_trait;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use tracing::instrument;

use super::{SqliteRepo, written};
use crate::models::{Address, Gps, House, HouseId, Location};
use crate::repository::HouseRepository;

fn parse_row(row: &SqliteRow) -> anyhow::Result<House> {
    let id: String = row.try_get("id")?;
    let door: String = row.try_get("door")?;
    let street: String = row.try_get("street")?;
    let city: String = row.try_get("city")?;
    let country: String = row.try_get("country")?;
    let postal_code: String = row.try_get("postal_code")?;
    Ok(House {
        id: HouseId::parse(&id)?,
        location: Location {
            address: Address::new(&door, &street, &city, &country, &postal_code)?,
            gps: Gps::new(row.try_get("latitude")?, row.try_get("longitude")?)?,
        },
    })
}

#[async_trait]
impl HouseRepository for SqliteRepo {
    #[instrument(skip(self, house), fields(repo = "house", operation = "save"))]
    async fn save(&self, house: &House) -> anyhow::Result<bool> {
        let address = &house.location.address;
        let result = sqlx::query(
            "INSERT OR IGNORE INTO houses (id, door, street, city, country, postal_code, latitude, longitude)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(house.id.to_string())
        .bind(&address.door)
        .bind(&address.street)
        .bind(&address.city)
        .bind(address.country.as_str())
        .bind(&address.postal_code)
        .bind(house.location.gps.latitude)
        .bind(house.location.gps.longitude)
        .execute(&self.pool)
        .await?;
        Ok(written(result))
    }

    #[instrument(skip(self, house), fields(repo = "house", operation = "update"))]
    async fn update(&self, house: &House) -> anyhow::Result<bool> {
        let address = &house.location.address;
        let result = sqlx::query(
            "UPDATE houses SET door = $2, street = $3, city = $4, country = $5, postal_code = $6,
             latitude = $7, longitude = $8 WHERE id = $1",
        )
        .bind(house.id.to_string())
        .bind(&address.door)
        .bind(&address.street)
        .bind(&address.city)
        .bind(address.country.as_str())
        .bind(&address.postal_code)
        .bind(house.location.gps.latitude)
        .bind(house.location.gps.longitude)
        .execute(&self.pool)
        .await?;
        Ok(written(result))
    }

    #[instrument(skip(self), fields(repo = "house", operation = "find"))]
    async fn find(&self) -> anyhow::Result<Option<House>> {
        let row = sqlx::query("SELECT * FROM houses ORDER BY rowid LIMIT 1")
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(parse_row).transpose()
    }
}

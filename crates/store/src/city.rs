//! Cities

use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::{Executor, Row, Sqlite};

use crate::error::{Result, StoreError, require_id, require_text};

const ENTITY: &str = "city";

/// A city dimension row, belonging to one country
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    id: Option<i64>,
    name: String,
    zipcode: String,
    country_id: i64,
}

impl City {
    /// Create a new, unsaved city
    pub fn new(name: &str, zipcode: &str, country_id: i64) -> Result<Self> {
        Ok(Self {
            id: None,
            name: require_text(ENTITY, "name", name)?,
            zipcode: require_text(ENTITY, "zipcode", zipcode)?,
            country_id: require_id(ENTITY, "country_id", country_id)?,
        })
    }

    /// Primary key, once saved
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// City name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Postal code
    pub fn zipcode(&self) -> &str {
        &self.zipcode
    }

    /// Owning country
    pub fn country_id(&self) -> i64 {
        self.country_id
    }

    /// Rename the city
    pub fn set_name(&mut self, name: &str) -> Result<()> {
        self.name = require_text(ENTITY, "name", name)?;
        Ok(())
    }

    /// Change the postal code
    pub fn set_zipcode(&mut self, zipcode: &str) -> Result<()> {
        self.zipcode = require_text(ENTITY, "zipcode", zipcode)?;
        Ok(())
    }

    /// Move the city to another country
    pub fn set_country_id(&mut self, country_id: i64) -> Result<()> {
        self.country_id = require_id(ENTITY, "country_id", country_id)?;
        Ok(())
    }
}

/// Insert a new city or update an existing one, returning its id
pub async fn save<'e, E>(conn: E, city: &mut City) -> Result<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    match city.id {
        None => {
            let id = sqlx::query(
                "INSERT INTO cities (city_name, zipcode, country_id) VALUES (?, ?, ?)",
            )
            .bind(&city.name)
            .bind(&city.zipcode)
            .bind(city.country_id)
            .execute(conn)
            .await?
            .last_insert_rowid();
            city.id = Some(id);
            Ok(id)
        }
        Some(id) => {
            let updated = sqlx::query(
                "UPDATE cities SET city_name = ?, zipcode = ?, country_id = ? WHERE city_id = ?",
            )
            .bind(&city.name)
            .bind(&city.zipcode)
            .bind(city.country_id)
            .bind(id)
            .execute(conn)
            .await?
            .rows_affected();
            if updated == 0 {
                return Err(StoreError::NotFound { entity: ENTITY, id });
            }
            Ok(id)
        }
    }
}

/// Look up a city by id
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<City>> {
    let row = sqlx::query("SELECT * FROM cities WHERE city_id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.as_ref().map(from_row).transpose()?)
}

/// All cities ordered by name
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<City>> {
    let rows = sqlx::query("SELECT * FROM cities ORDER BY city_name")
        .fetch_all(pool)
        .await?;
    Ok(rows.iter().map(from_row).collect::<std::result::Result<_, _>>()?)
}

fn from_row(row: &SqliteRow) -> std::result::Result<City, sqlx::Error> {
    Ok(City {
        id: Some(row.try_get("city_id")?),
        name: row.try_get("city_name")?,
        zipcode: row.try_get("zipcode")?,
        country_id: row.try_get("country_id")?,
    })
}

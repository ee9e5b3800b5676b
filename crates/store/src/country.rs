//! Countries

use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::{Executor, Row, Sqlite};

use crate::error::{Result, StoreError, require_text};

const ENTITY: &str = "country";

/// A country dimension row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    id: Option<i64>,
    name: String,
    code: String,
}

impl Country {
    /// Create a new, unsaved country
    ///
    /// The code must be exactly two characters and is stored upper-case.
    pub fn new(name: &str, code: &str) -> Result<Self> {
        let mut country = Self {
            id: None,
            name: String::new(),
            code: String::new(),
        };
        country.set_name(name)?;
        country.set_code(code)?;
        Ok(country)
    }

    /// Primary key, once saved
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// Country name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Two-letter country code
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Rename the country
    pub fn set_name(&mut self, name: &str) -> Result<()> {
        self.name = require_text(ENTITY, "name", name)?;
        Ok(())
    }

    /// Change the country code
    pub fn set_code(&mut self, code: &str) -> Result<()> {
        let code = code.trim();
        if code.chars().count() != 2 {
            return Err(StoreError::validation(
                ENTITY,
                "code",
                "must be exactly 2 characters",
            ));
        }
        self.code = code.to_uppercase();
        Ok(())
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

/// Insert a new country or update an existing one, returning its id
pub async fn save<'e, E>(conn: E, country: &mut Country) -> Result<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    match country.id {
        None => {
            let id = sqlx::query("INSERT INTO countries (country_name, country_code) VALUES (?, ?)")
                .bind(&country.name)
                .bind(&country.code)
                .execute(conn)
                .await?
                .last_insert_rowid();
            country.id = Some(id);
            Ok(id)
        }
        Some(id) => {
            let updated = sqlx::query(
                "UPDATE countries SET country_name = ?, country_code = ? WHERE country_id = ?",
            )
            .bind(&country.name)
            .bind(&country.code)
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

/// Look up a country by id
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Country>> {
    let row = sqlx::query("SELECT * FROM countries WHERE country_id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.as_ref().map(from_row).transpose()?)
}

/// All countries ordered by name
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Country>> {
    let rows = sqlx::query("SELECT * FROM countries ORDER BY country_name")
        .fetch_all(pool)
        .await?;
    Ok(rows.iter().map(from_row).collect::<std::result::Result<_, _>>()?)
}

fn from_row(row: &SqliteRow) -> std::result::Result<Country, sqlx::Error> {
    Ok(Country {
        id: Some(row.try_get("country_id")?),
        name: row.try_get("country_name")?,
        code: row.try_get("country_code")?,
    })
}

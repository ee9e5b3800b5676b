//! Product categories

use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::{Executor, Row, Sqlite};

use crate::error::{Result, StoreError, require_text};

const ENTITY: &str = "category";

/// A product category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    id: Option<i64>,
    name: String,
}

impl Category {
    /// Create a new, unsaved category
    pub fn new(name: &str) -> Result<Self> {
        Ok(Self {
            id: None,
            name: require_text(ENTITY, "name", name)?,
        })
    }

    /// Primary key, once saved
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// Category name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the category
    pub fn set_name(&mut self, name: &str) -> Result<()> {
        self.name = require_text(ENTITY, "name", name)?;
        Ok(())
    }
}

/// Insert a new category or update an existing one, returning its id
pub async fn save<'e, E>(conn: E, category: &mut Category) -> Result<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    match category.id {
        None => {
            let id = sqlx::query("INSERT INTO categories (category_name) VALUES (?)")
                .bind(&category.name)
                .execute(conn)
                .await?
                .last_insert_rowid();
            category.id = Some(id);
            Ok(id)
        }
        Some(id) => {
            let updated =
                sqlx::query("UPDATE categories SET category_name = ? WHERE category_id = ?")
                    .bind(&category.name)
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

/// Look up a category by id
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Category>> {
    let row = sqlx::query("SELECT * FROM categories WHERE category_id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.as_ref().map(from_row).transpose()?)
}

/// All categories ordered by name
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Category>> {
    let rows = sqlx::query("SELECT * FROM categories ORDER BY category_name")
        .fetch_all(pool)
        .await?;
    Ok(rows.iter().map(from_row).collect::<std::result::Result<_, _>>()?)
}

fn from_row(row: &SqliteRow) -> std::result::Result<Category, sqlx::Error> {
    Ok(Category {
        id: Some(row.try_get("category_id")?),
        name: row.try_get("category_name")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    #[tokio::test]
    async fn test_save_and_list() {
        let db = Database::in_memory().await.unwrap();
        for name in ["Produce", "Dairy", "Bakery"] {
            save(db.pool(), &mut Category::new(name).unwrap())
                .await
                .unwrap();
        }

        let names: Vec<String> = get_all(db.pool())
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names, vec!["Bakery", "Dairy", "Produce"]);
    }

    #[test]
    fn test_blank_name_rejected() {
        assert!(matches!(
            Category::new("  "),
            Err(StoreError::Validation { field: "name", .. })
        ));
    }
}

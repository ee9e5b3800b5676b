//! Products

use std::str::FromStr;

use chrono::NaiveDate;
use grocery_query::DATE_FORMAT;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::{Executor, Row, Sqlite};

use crate::error::{Result, StoreError, require_id, require_text};

const ENTITY: &str = "product";

/// Days of shelf life at or below which a product counts as perishable
pub const PERISHABLE_MAX_DAYS: i64 = 30;

/// Product pricing class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProductClass {
    #[default]
    Regular,
    Premium,
    Economy,
}

impl ProductClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "Regular",
            Self::Premium => "Premium",
            Self::Economy => "Economy",
        }
    }
}

impl FromStr for ProductClass {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Regular" => Ok(Self::Regular),
            "Premium" => Ok(Self::Premium),
            "Economy" => Ok(Self::Economy),
            other => Err(StoreError::validation(
                ENTITY,
                "class",
                format!("unknown class '{}', expected Regular, Premium or Economy", other),
            )),
        }
    }
}

impl std::fmt::Display for ProductClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A product in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: Option<i64>,
    name: String,
    price: f64,
    category_id: i64,
    class: ProductClass,
    modify_date: NaiveDate,
    resistant: bool,
    is_allergic: bool,
    vitality_days: i64,
}

impl Product {
    /// Create a new, unsaved Regular product modified today
    pub fn new(name: &str, price: f64, category_id: i64) -> Result<Self> {
        let mut product = Self {
            id: None,
            name: require_text(ENTITY, "name", name)?,
            price: 0.0,
            category_id: require_id(ENTITY, "category_id", category_id)?,
            class: ProductClass::default(),
            modify_date: chrono::Local::now().date_naive(),
            resistant: false,
            is_allergic: false,
            vitality_days: 0,
        };
        product.set_price(price)?;
        Ok(product)
    }

    pub fn with_class(mut self, class: ProductClass) -> Self {
        self.class = class;
        self
    }

    pub fn with_modify_date(mut self, date: NaiveDate) -> Self {
        self.modify_date = date;
        self
    }

    pub fn with_vitality_days(mut self, days: i64) -> Self {
        self.vitality_days = days;
        self
    }

    /// Set the resistant and allergen flags
    pub fn with_flags(mut self, resistant: bool, is_allergic: bool) -> Self {
        self.resistant = resistant;
        self.is_allergic = is_allergic;
        self
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn category_id(&self) -> i64 {
        self.category_id
    }

    pub fn class(&self) -> ProductClass {
        self.class
    }

    pub fn modify_date(&self) -> NaiveDate {
        self.modify_date
    }

    pub fn resistant(&self) -> bool {
        self.resistant
    }

    pub fn is_allergic(&self) -> bool {
        self.is_allergic
    }

    pub fn vitality_days(&self) -> i64 {
        self.vitality_days
    }

    /// Rename the product
    pub fn set_name(&mut self, name: &str) -> Result<()> {
        self.name = require_text(ENTITY, "name", name)?;
        Ok(())
    }

    /// Change the list price; must be positive
    pub fn set_price(&mut self, price: f64) -> Result<()> {
        if !price.is_finite() || price <= 0.0 {
            return Err(StoreError::validation(
                ENTITY,
                "price",
                format!("must be greater than zero, got {}", price),
            ));
        }
        self.price = price;
        Ok(())
    }

    /// Change the pricing class
    pub fn set_class(&mut self, class: ProductClass) {
        self.class = class;
    }

    /// Price after a percentage discount in `0..=100`
    pub fn apply_discount(&self, percentage: f64) -> Result<f64> {
        if !(0.0..=100.0).contains(&percentage) {
            return Err(StoreError::validation(
                ENTITY,
                "discount",
                format!("percentage must be between 0 and 100, got {}", percentage),
            ));
        }
        Ok(self.price * (1.0 - percentage / 100.0))
    }

    pub fn is_premium(&self) -> bool {
        self.class == ProductClass::Premium
    }

    pub fn is_perishable(&self) -> bool {
        self.vitality_days <= PERISHABLE_MAX_DAYS
    }
}

impl std::fmt::Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - ${:.2} ({})", self.name, self.price, self.class)
    }
}

/// Insert a new product or update an existing one, returning its id
pub async fn save<'e, E>(conn: E, product: &mut Product) -> Result<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let modify_date = product.modify_date.format(DATE_FORMAT).to_string();
    match product.id {
        None => {
            let id = sqlx::query(
                "INSERT INTO products (product_name, price, category_id, class, modify_date, \
                 resistant, is_allergic, vitality_days) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&product.name)
            .bind(product.price)
            .bind(product.category_id)
            .bind(product.class.as_str())
            .bind(&modify_date)
            .bind(product.resistant)
            .bind(product.is_allergic)
            .bind(product.vitality_days)
            .execute(conn)
            .await?
            .last_insert_rowid();
            product.id = Some(id);
            Ok(id)
        }
        Some(id) => {
            let updated = sqlx::query(
                "UPDATE products SET product_name = ?, price = ?, category_id = ?, class = ?, \
                 modify_date = ?, resistant = ?, is_allergic = ?, vitality_days = ? \
                 WHERE product_id = ?",
            )
            .bind(&product.name)
            .bind(product.price)
            .bind(product.category_id)
            .bind(product.class.as_str())
            .bind(&modify_date)
            .bind(product.resistant)
            .bind(product.is_allergic)
            .bind(product.vitality_days)
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

/// Look up a product by id
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Product>> {
    let row = sqlx::query("SELECT * FROM products WHERE product_id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.as_ref().map(from_row).transpose()
}

/// All products ordered by name
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Product>> {
    let rows = sqlx::query("SELECT * FROM products ORDER BY product_name")
        .fetch_all(pool)
        .await?;
    rows.iter().map(from_row).collect()
}

/// Products in one category, ordered by name
pub async fn get_by_category(pool: &SqlitePool, category_id: i64) -> Result<Vec<Product>> {
    let rows = sqlx::query("SELECT * FROM products WHERE category_id = ? ORDER BY product_name")
        .bind(category_id)
        .fetch_all(pool)
        .await?;
    rows.iter().map(from_row).collect()
}

fn from_row(row: &SqliteRow) -> Result<Product> {
    let class: String = row.try_get("class")?;
    Ok(Product {
        id: Some(row.try_get("product_id")?),
        name: row.try_get("product_name")?,
        price: row.try_get("price")?,
        category_id: row.try_get("category_id")?,
        class: class.parse()?,
        modify_date: row.try_get("modify_date")?,
        resistant: row.try_get("resistant")?,
        is_allergic: row.try_get("is_allergic")?,
        vitality_days: row.try_get("vitality_days")?,
    })
}

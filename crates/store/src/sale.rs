//! Sales facts
//!
//! Sales are immutable once recorded: [`save`] only inserts.

use chrono::NaiveDateTime;
use grocery_query::DATETIME_FORMAT;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::{Executor, Row, Sqlite};
use tracing::debug;

use crate::error::{Result, StoreError, require_id, require_text};

const ENTITY: &str = "sale";

/// Default quantity at which a sale counts as bulk
pub const DEFAULT_BULK_THRESHOLD: i64 = 10;

/// One recorded sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    id: Option<i64>,
    sales_person_id: i64,
    customer_id: i64,
    product_id: i64,
    quantity: i64,
    discount: f64,
    total_price: f64,
    sales_date: NaiveDateTime,
    transaction_number: String,
}

impl Sale {
    /// Create a new, undiscounted sale
    ///
    /// `total_price` is the amount actually charged; reports sum it as-is.
    pub fn new(
        transaction_number: &str,
        sales_person_id: i64,
        customer_id: i64,
        product_id: i64,
        quantity: i64,
        total_price: f64,
        sales_date: NaiveDateTime,
    ) -> Result<Self> {
        if quantity <= 0 {
            return Err(StoreError::validation(
                ENTITY,
                "quantity",
                format!("must be greater than 0, got {}", quantity),
            ));
        }
        if !total_price.is_finite() || total_price < 0.0 {
            return Err(StoreError::validation(
                ENTITY,
                "total_price",
                format!("must not be negative, got {}", total_price),
            ));
        }

        Ok(Self {
            id: None,
            sales_person_id: require_id(ENTITY, "sales_person_id", sales_person_id)?,
            customer_id: require_id(ENTITY, "customer_id", customer_id)?,
            product_id: require_id(ENTITY, "product_id", product_id)?,
            quantity,
            discount: 0.0,
            total_price,
            sales_date,
            transaction_number: require_text(ENTITY, "transaction_number", transaction_number)?,
        })
    }

    /// Set the discount fraction, between 0 and 1 inclusive
    pub fn with_discount(mut self, discount: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&discount) {
            return Err(StoreError::validation(
                ENTITY,
                "discount",
                format!("must be between 0 and 1, got {}", discount),
            ));
        }
        self.discount = discount;
        Ok(self)
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn sales_person_id(&self) -> i64 {
        self.sales_person_id
    }

    pub fn customer_id(&self) -> i64 {
        self.customer_id
    }

    pub fn product_id(&self) -> i64 {
        self.product_id
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn discount(&self) -> f64 {
        self.discount
    }

    pub fn total_price(&self) -> f64 {
        self.total_price
    }

    pub fn sales_date(&self) -> NaiveDateTime {
        self.sales_date
    }

    pub fn transaction_number(&self) -> &str {
        &self.transaction_number
    }

    pub fn is_discounted(&self) -> bool {
        self.discount > 0.0
    }

    /// Discount applied, as a fraction of the charged total
    pub fn discount_amount(&self) -> f64 {
        self.total_price * self.discount
    }

    /// Whether the quantity reaches `threshold` units
    pub fn is_bulk(&self, threshold: i64) -> bool {
        self.quantity >= threshold
    }
}

impl std::fmt::Display for Sale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(
                f,
                "Sale #{} - {} - ${:.2}",
                id, self.transaction_number, self.total_price
            ),
            None => write!(f, "Sale - {} - ${:.2}", self.transaction_number, self.total_price),
        }
    }
}

/// Aggregate figures over a set of sales
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub total_sales: i64,
    pub total_revenue: f64,
    /// `None` when there are no sales
    pub avg_sale: Option<f64>,
    pub total_units_sold: i64,
    pub unique_customers: i64,
}

/// Record a sale, returning its id
///
/// Saving an already-saved sale is a no-op that returns the existing id.
pub async fn save<'e, E>(conn: E, sale: &mut Sale) -> Result<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    if let Some(id) = sale.id {
        return Ok(id);
    }

    let id = sqlx::query(
        "INSERT INTO sales (sales_person_id, customer_id, product_id, quantity, discount, \
         total_price, sales_date, transaction_number) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(sale.sales_person_id)
    .bind(sale.customer_id)
    .bind(sale.product_id)
    .bind(sale.quantity)
    .bind(sale.discount)
    .bind(sale.total_price)
    .bind(sale.sales_date.format(DATETIME_FORMAT).to_string())
    .bind(&sale.transaction_number)
    .execute(conn)
    .await?
    .last_insert_rowid();

    debug!(sale_id = id, transaction = %sale.transaction_number, "sale recorded");
    sale.id = Some(id);
    Ok(id)
}

/// Look up a sale by id
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Sale>> {
    let row = sqlx::query("SELECT * FROM sales WHERE sales_id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.as_ref().map(from_row).transpose()?)
}

/// All sales in chronological order
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Sale>> {
    let rows = sqlx::query("SELECT * FROM sales ORDER BY sales_date, sales_id")
        .fetch_all(pool)
        .await?;
    Ok(rows.iter().map(from_row).collect::<std::result::Result<_, _>>()?)
}

/// Sales between two timestamps, both inclusive, in chronological order
pub async fn get_by_date_range(
    pool: &SqlitePool,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<Vec<Sale>> {
    let rows = sqlx::query(
        "SELECT * FROM sales WHERE sales_date BETWEEN ? AND ? ORDER BY sales_date, sales_id",
    )
    .bind(start.format(DATETIME_FORMAT).to_string())
    .bind(end.format(DATETIME_FORMAT).to_string())
    .fetch_all(pool)
    .await?;
    Ok(rows.iter().map(from_row).collect::<std::result::Result<_, _>>()?)
}

/// Summarize all sales, or only those within an inclusive range
pub async fn summary(
    pool: &SqlitePool,
    range: Option<(NaiveDateTime, NaiveDateTime)>,
) -> Result<SalesSummary> {
    const SELECT: &str = "SELECT COUNT(*) AS total_sales, \
         COALESCE(SUM(total_price), 0.0) AS total_revenue, \
         AVG(total_price) AS avg_sale, \
         COALESCE(SUM(quantity), 0) AS total_units_sold, \
         COUNT(DISTINCT customer_id) AS unique_customers \
         FROM sales";

    let row = match range {
        Some((start, end)) => {
            sqlx::query(&format!("{} WHERE sales_date BETWEEN ? AND ?", SELECT))
                .bind(start.format(DATETIME_FORMAT).to_string())
                .bind(end.format(DATETIME_FORMAT).to_string())
                .fetch_one(pool)
                .await?
        }
        None => sqlx::query(SELECT).fetch_one(pool).await?,
    };

    Ok(SalesSummary {
        total_sales: row.try_get("total_sales")?,
        total_revenue: row.try_get("total_revenue")?,
        avg_sale: row.try_get("avg_sale")?,
        total_units_sold: row.try_get("total_units_sold")?,
        unique_customers: row.try_get("unique_customers")?,
    })
}

fn from_row(row: &SqliteRow) -> std::result::Result<Sale, sqlx::Error> {
    Ok(Sale {
        id: Some(row.try_get("sales_id")?),
        sales_person_id: row.try_get("sales_person_id")?,
        customer_id: row.try_get("customer_id")?,
        product_id: row.try_get("product_id")?,
        quantity: row.try_get("quantity")?,
        discount: row.try_get("discount")?,
        total_price: row.try_get("total_price")?,
        sales_date: row.try_get("sales_date")?,
        transaction_number: row.try_get("transaction_number")?,
    })
}

#[cfg(test)]
#[path = "sale_test.rs"]
mod sale_test;

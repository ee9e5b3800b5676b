//! Customers

use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::{Executor, Row, Sqlite};

use crate::error::{Result, StoreError, middle_initial, require_id, require_text};

const ENTITY: &str = "customer";

/// A customer, living in one city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    id: Option<i64>,
    first_name: String,
    middle_initial: Option<String>,
    last_name: String,
    city_id: i64,
    address: Option<String>,
}

impl Customer {
    /// Create a new, unsaved customer
    pub fn new(
        first_name: &str,
        middle: Option<&str>,
        last_name: &str,
        city_id: i64,
        address: Option<&str>,
    ) -> Result<Self> {
        Ok(Self {
            id: None,
            first_name: require_text(ENTITY, "first_name", first_name)?,
            middle_initial: middle_initial(ENTITY, middle)?,
            last_name: require_text(ENTITY, "last_name", last_name)?,
            city_id: require_id(ENTITY, "city_id", city_id)?,
            address: address
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(String::from),
        })
    }

    /// Primary key, once saved
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn middle_initial(&self) -> Option<&str> {
        self.middle_initial.as_deref()
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn city_id(&self) -> i64 {
        self.city_id
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// "First M. Last", or "First Last" without a middle initial
    pub fn full_name(&self) -> String {
        match &self.middle_initial {
            Some(m) => format!("{} {}. {}", self.first_name, m, self.last_name),
            None => format!("{} {}", self.first_name, self.last_name),
        }
    }

    /// Move the customer to another city
    pub fn set_city_id(&mut self, city_id: i64) -> Result<()> {
        self.city_id = require_id(ENTITY, "city_id", city_id)?;
        Ok(())
    }

    /// Replace the street address
    pub fn set_address(&mut self, address: Option<&str>) {
        self.address = address
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(String::from);
    }
}

impl std::fmt::Display for Customer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full_name())
    }
}

/// Insert a new customer or update an existing one, returning its id
pub async fn save<'e, E>(conn: E, customer: &mut Customer) -> Result<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    match customer.id {
        None => {
            let id = sqlx::query(
                "INSERT INTO customers (first_name, middle_initial, last_name, city_id, address) \
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(&customer.first_name)
            .bind(&customer.middle_initial)
            .bind(&customer.last_name)
            .bind(customer.city_id)
            .bind(&customer.address)
            .execute(conn)
            .await?
            .last_insert_rowid();
            customer.id = Some(id);
            Ok(id)
        }
        Some(id) => {
            let updated = sqlx::query(
                "UPDATE customers SET first_name = ?, middle_initial = ?, last_name = ?, \
                 city_id = ?, address = ? WHERE customer_id = ?",
            )
            .bind(&customer.first_name)
            .bind(&customer.middle_initial)
            .bind(&customer.last_name)
            .bind(customer.city_id)
            .bind(&customer.address)
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

/// Look up a customer by id
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Customer>> {
    let row = sqlx::query("SELECT * FROM customers WHERE customer_id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.as_ref().map(from_row).transpose()?)
}

/// All customers ordered by last then first name
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Customer>> {
    let rows = sqlx::query("SELECT * FROM customers ORDER BY last_name, first_name")
        .fetch_all(pool)
        .await?;
    Ok(rows.iter().map(from_row).collect::<std::result::Result<_, _>>()?)
}

/// Customers living in a given city
pub async fn get_by_city(pool: &SqlitePool, city_id: i64) -> Result<Vec<Customer>> {
    let rows = sqlx::query(
        "SELECT * FROM customers WHERE city_id = ? ORDER BY last_name, first_name",
    )
    .bind(city_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.iter().map(from_row).collect::<std::result::Result<_, _>>()?)
}

fn from_row(row: &SqliteRow) -> std::result::Result<Customer, sqlx::Error> {
    Ok(Customer {
        id: Some(row.try_get("customer_id")?),
        first_name: row.try_get("first_name")?,
        middle_initial: row.try_get("middle_initial")?,
        last_name: row.try_get("last_name")?,
        city_id: row.try_get("city_id")?,
        address: row.try_get("address")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{City, Country, Database, city, country};

    async fn two_cities(db: &Database) -> (i64, i64) {
        let pe = country::save(db.pool(), &mut Country::new("Peru", "PE").unwrap())
            .await
            .unwrap();
        let lima = city::save(db.pool(), &mut City::new("Lima", "15001", pe).unwrap())
            .await
            .unwrap();
        let cusco = city::save(db.pool(), &mut City::new("Cusco", "08000", pe).unwrap())
            .await
            .unwrap();
        (lima, cusco)
    }

    #[test]
    fn test_full_name() {
        let c = Customer::new("Ana", Some("m"), "Diaz", 1, None).unwrap();
        assert_eq!(c.full_name(), "Ana M. Diaz");
        assert_eq!(c.middle_initial(), Some("M"));

        let c = Customer::new("Ana", None, "Diaz", 1, Some("  ")).unwrap();
        assert_eq!(c.full_name(), "Ana Diaz");
        assert_eq!(c.address(), None);
    }

    #[test]
    fn test_new_validates() {
        assert!(Customer::new("", None, "Diaz", 1, None).is_err());
        assert!(Customer::new("Ana", Some("MX"), "Diaz", 1, None).is_err());
        assert!(Customer::new("Ana", None, "Diaz", -4, None).is_err());
    }

    #[tokio::test]
    async fn test_get_by_city() {
        let db = Database::in_memory().await.unwrap();
        let (lima, cusco) = two_cities(&db).await;

        for (first, last, city_id) in [("Ana", "Diaz", lima), ("Luis", "Abad", lima), ("Rosa", "Soto", cusco)] {
            save(db.pool(), &mut Customer::new(first, None, last, city_id, None).unwrap())
                .await
                .unwrap();
        }

        let in_lima: Vec<String> = get_by_city(db.pool(), lima)
            .await
            .unwrap()
            .iter()
            .map(Customer::full_name)
            .collect();
        assert_eq!(in_lima, vec!["Luis Abad", "Ana Diaz"]);
        assert_eq!(get_all(db.pool()).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_round_trip_optional_fields() {
        let db = Database::in_memory().await.unwrap();
        let (lima, _) = two_cities(&db).await;

        let mut c = Customer::new("Ana", Some("b"), "Diaz", lima, Some("Av. Sol 123")).unwrap();
        let id = save(db.pool(), &mut c).await.unwrap();

        let found = find_by_id(db.pool(), id).await.unwrap().unwrap();
        assert_eq!(found, c);
        assert!(find_by_id(db.pool(), id + 1).await.unwrap().is_none());
    }
}

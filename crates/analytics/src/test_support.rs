//! Shared fixtures for report tests

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use grocery_query::SqliteBackend;
use grocery_store::{
    Category, City, Country, Customer, Database, Employee, Product, Sale, category, city, country,
    customer, employee, product, sale,
};

use crate::timerange::TimeRange;

pub(crate) fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    at_hms(y, m, d, h, 0, 0)
}

pub(crate) fn at_hms(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, mi, s)
        .unwrap()
}

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub(crate) fn range(start: (i32, u32, u32), end: (i32, u32, u32)) -> TimeRange {
    TimeRange::new(date(start.0, start.1, start.2), date(end.0, end.1, end.2)).unwrap()
}

/// In-memory store with helpers that create dimensions on demand
pub(crate) struct Fixture {
    pub db: Database,
    countries: HashMap<String, i64>,
    cities: HashMap<String, i64>,
    categories: HashMap<String, i64>,
    next_transaction: usize,
}

impl Fixture {
    pub async fn new() -> Self {
        Self {
            db: Database::in_memory().await.unwrap(),
            countries: HashMap::new(),
            cities: HashMap::new(),
            categories: HashMap::new(),
            next_transaction: 1,
        }
    }

    pub fn backend(&self) -> SqliteBackend {
        SqliteBackend::new(self.db.pool().clone())
    }

    pub async fn country(&mut self, name: &str) -> i64 {
        if let Some(id) = self.countries.get(name) {
            return *id;
        }
        let code: String = name.chars().take(2).collect();
        let id = country::save(self.db.pool(), &mut Country::new(name, &code).unwrap())
            .await
            .unwrap();
        self.countries.insert(name.to_string(), id);
        id
    }

    pub async fn city(&mut self, name: &str, country_name: &str) -> i64 {
        if let Some(id) = self.cities.get(name) {
            return *id;
        }
        let country_id = self.country(country_name).await;
        let id = city::save(self.db.pool(), &mut City::new(name, "0000", country_id).unwrap())
            .await
            .unwrap();
        self.cities.insert(name.to_string(), id);
        id
    }

    pub async fn employee(&mut self, first: &str, last: &str) -> i64 {
        let city_id = self.city("Lima", "Peru").await;
        employee::save(
            self.db.pool(),
            &mut Employee::new(first, None, last, city_id).unwrap(),
        )
        .await
        .unwrap()
    }

    /// Customer in a city of Peru
    pub async fn customer(&mut self, first: &str, city_name: &str) -> i64 {
        self.customer_in(first, city_name, "Peru").await
    }

    pub async fn customer_in(&mut self, first: &str, city_name: &str, country_name: &str) -> i64 {
        let city_id = self.city(city_name, country_name).await;
        customer::save(
            self.db.pool(),
            &mut Customer::new(first, None, "Test", city_id, None).unwrap(),
        )
        .await
        .unwrap()
    }

    pub async fn product(&mut self, name: &str, price: f64) -> i64 {
        self.product_in(name, price, "General").await
    }

    pub async fn product_in(&mut self, name: &str, price: f64, category_name: &str) -> i64 {
        let category_id = match self.categories.get(category_name) {
            Some(id) => *id,
            None => {
                let id = category::save(
                    self.db.pool(),
                    &mut Category::new(category_name).unwrap(),
                )
                .await
                .unwrap();
                self.categories.insert(category_name.to_string(), id);
                id
            }
        };
        product::save(
            self.db.pool(),
            &mut Product::new(name, price, category_id).unwrap(),
        )
        .await
        .unwrap()
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn sale(
        &mut self,
        employee_id: i64,
        customer_id: i64,
        product_id: i64,
        quantity: i64,
        total_price: f64,
        discount: f64,
        when: NaiveDateTime,
    ) -> i64 {
        let transaction = format!("T-{:04}", self.next_transaction);
        self.next_transaction += 1;
        let mut s = Sale::new(
            &transaction,
            employee_id,
            customer_id,
            product_id,
            quantity,
            total_price,
            when,
        )
        .unwrap()
        .with_discount(discount)
        .unwrap();
        sale::save(self.db.pool(), &mut s).await.unwrap()
    }
}

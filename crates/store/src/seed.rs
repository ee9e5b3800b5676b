//! Demo dataset
//!
//! A small, deterministic set of dimensions and six months of sales, enough
//! for every report to produce non-trivial output.

use chrono::{Duration, NaiveDate};
use sqlx::sqlite::SqlitePool;
use sqlx::{Executor, Sqlite};
use tracing::info;

use crate::error::{Result, StoreError};
use crate::{
    Category, City, Country, Customer, Employee, Product, ProductClass, Sale, category, city,
    country, customer, employee, product, sale,
};

const COUNTRIES: &[(&str, &str)] = &[("Argentina", "AR"), ("Chile", "CL"), ("Peru", "PE")];

/// (name, zipcode, country index)
const CITIES: &[(&str, &str, usize)] = &[
    ("Buenos Aires", "C1000", 0),
    ("Cordoba", "X5000", 0),
    ("Santiago", "8320000", 1),
    ("Lima", "15001", 2),
];

const CATEGORIES: &[&str] = &["Bakery", "Dairy", "Produce", "Beverages"];

/// (first, middle, last, city index)
const CUSTOMERS: &[(&str, Option<&str>, &str, usize)] = &[
    ("Ana", Some("M"), "Diaz", 0),
    ("Luis", None, "Abad", 0),
    ("Rosa", Some("t"), "Soto", 1),
    ("Pedro", None, "Rojas", 2),
    ("Carla", Some("B"), "Vega", 2),
    ("Diego", None, "Flores", 3),
    ("Elena", None, "Ramos", 3),
];

/// (first, last, city index, gender, hired)
const EMPLOYEES: &[(&str, &str, usize, &str, (i32, u32, u32))] = &[
    ("Juan", "Perez", 0, "M", (2019, 3, 1)),
    ("Maria", "Lopez", 2, "F", (2020, 7, 15)),
    ("Sofia", "Castro", 3, "F", (2022, 1, 10)),
    ("Tomas", "Silva", 1, "M", (2023, 9, 4)),
];

/// (name, price, category index, class, vitality days)
const PRODUCTS: &[(&str, f64, usize, ProductClass, i64)] = &[
    ("Sourdough Loaf", 4.50, 0, ProductClass::Premium, 4),
    ("Croissant", 1.20, 0, ProductClass::Regular, 2),
    ("Whole Milk", 1.10, 1, ProductClass::Economy, 10),
    ("Aged Cheddar", 9.80, 1, ProductClass::Premium, 120),
    ("Bananas", 0.90, 2, ProductClass::Economy, 7),
    ("Avocados", 2.40, 2, ProductClass::Regular, 9),
    ("Orange Juice", 3.30, 3, ProductClass::Regular, 21),
    ("Sparkling Water", 0.80, 3, ProductClass::Economy, 365),
];

/// Discounts cycled through the generated sales; covers every report bucket
const DISCOUNTS: &[f64] = &[0.0, 0.0, 0.03, 0.05, 0.0, 0.08, 0.10, 0.12, 0.0, 0.18, 0.25];

const SALE_COUNT: usize = 90;

/// Row counts written by [`load_demo`]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub countries: usize,
    pub cities: usize,
    pub categories: usize,
    pub customers: usize,
    pub employees: usize,
    pub products: usize,
    pub sales: usize,
}

/// Whether any sales have already been recorded
pub async fn has_sales<'e, E>(conn: E) -> Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
        .fetch_one(conn)
        .await?;
    Ok(count > 0)
}

/// Load the demo dataset into an empty database
///
/// Runs in a single transaction: a failure part way leaves the database as
/// it was. One employee (the last) is left without sales so outer-join
/// reports have a zero row to show.
pub async fn load_demo(pool: &SqlitePool) -> Result<SeedSummary> {
    let mut tx = pool.begin().await?;
    if has_sales(&mut *tx).await? {
        return Err(StoreError::validation(
            "seed",
            "sales",
            "database already contains sales",
        ));
    }

    let mut summary = SeedSummary::default();

    let mut country_ids = Vec::with_capacity(COUNTRIES.len());
    for (name, code) in COUNTRIES {
        country_ids.push(country::save(&mut *tx, &mut Country::new(name, code)?).await?);
    }
    summary.countries = country_ids.len();

    let mut city_ids = Vec::with_capacity(CITIES.len());
    for (name, zipcode, country) in CITIES {
        let mut c = City::new(name, zipcode, country_ids[*country])?;
        city_ids.push(city::save(&mut *tx, &mut c).await?);
    }
    summary.cities = city_ids.len();

    let mut category_ids = Vec::with_capacity(CATEGORIES.len());
    for name in CATEGORIES {
        category_ids.push(category::save(&mut *tx, &mut Category::new(name)?).await?);
    }
    summary.categories = category_ids.len();

    let mut customer_ids = Vec::with_capacity(CUSTOMERS.len());
    for (i, (first, middle, last, city)) in CUSTOMERS.iter().enumerate() {
        let address = format!("Calle {} #{}", last, 100 + i * 17);
        let mut c = Customer::new(first, *middle, last, city_ids[*city], Some(&address))?;
        customer_ids.push(customer::save(&mut *tx, &mut c).await?);
    }
    summary.customers = customer_ids.len();

    let mut employee_ids = Vec::with_capacity(EMPLOYEES.len());
    for (first, last, city, gender, (y, m, d)) in EMPLOYEES {
        let mut e = Employee::new(first, None, last, city_ids[*city])?.with_gender(gender);
        if let Some(hired) = NaiveDate::from_ymd_opt(*y, *m, *d) {
            e = e.with_hire_date(hired);
        }
        employee_ids.push(employee::save(&mut *tx, &mut e).await?);
    }
    summary.employees = employee_ids.len();

    let modified = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
    let mut products = Vec::with_capacity(PRODUCTS.len());
    for (name, price, category, class, days) in PRODUCTS {
        let mut p = Product::new(name, *price, category_ids[*category])?
            .with_class(*class)
            .with_modify_date(modified)
            .with_vitality_days(*days);
        product::save(&mut *tx, &mut p).await?;
        products.push(p);
    }
    summary.products = products.len();

    let start = modified.and_hms_opt(9, 0, 0).unwrap_or_default();
    let selling = &employee_ids[..employee_ids.len() - 1];
    for i in 0..SALE_COUNT {
        // Last product is never sold
        let product = &products[(i * 3) % (products.len() - 1)];
        let Some(product_id) = product.id() else {
            continue;
        };
        let quantity = 1 + (i % 12) as i64;
        let discount = DISCOUNTS[i % DISCOUNTS.len()];
        let total = (product.price() * quantity as f64 * (1.0 - discount) * 100.0).round() / 100.0;
        let when = start + Duration::days((i * 2) as i64) + Duration::hours((i % 8) as i64);

        let mut s = Sale::new(
            &format!("TRX-{:05}", i + 1),
            selling[(i * 5 + i / 7) % selling.len()],
            customer_ids[(i * 7 + i / 3) % customer_ids.len()],
            product_id,
            quantity,
            total,
            when,
        )?
        .with_discount(discount)?;
        sale::save(&mut *tx, &mut s).await?;
        summary.sales += 1;
    }

    tx.commit().await?;
    info!(
        customers = summary.customers,
        products = summary.products,
        sales = summary.sales,
        "demo dataset loaded"
    );
    Ok(summary)
}

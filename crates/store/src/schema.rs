//! Relational schema
//!
//! Column names are the contract the analytics queries are written against.

/// DDL statements, in dependency order
pub(crate) const TABLES: &[(&str, &str)] = &[
    (
        "countries",
        r#"
        CREATE TABLE IF NOT EXISTS countries (
            country_id INTEGER PRIMARY KEY AUTOINCREMENT,
            country_name TEXT NOT NULL,
            country_code TEXT NOT NULL UNIQUE CHECK (length(country_code) = 2)
        )
        "#,
    ),
    (
        "cities",
        r#"
        CREATE TABLE IF NOT EXISTS cities (
            city_id INTEGER PRIMARY KEY AUTOINCREMENT,
            city_name TEXT NOT NULL,
            zipcode TEXT NOT NULL,
            country_id INTEGER NOT NULL REFERENCES countries(country_id)
        )
        "#,
    ),
    (
        "categories",
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            category_id INTEGER PRIMARY KEY AUTOINCREMENT,
            category_name TEXT NOT NULL
        )
        "#,
    ),
    (
        "customers",
        r#"
        CREATE TABLE IF NOT EXISTS customers (
            customer_id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            middle_initial TEXT,
            last_name TEXT NOT NULL,
            city_id INTEGER NOT NULL REFERENCES cities(city_id),
            address TEXT
        )
        "#,
    ),
    (
        "employees",
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            employee_id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            middle_initial TEXT,
            last_name TEXT NOT NULL,
            birth_date TEXT,
            gender TEXT,
            city_id INTEGER NOT NULL REFERENCES cities(city_id),
            hire_date TEXT
        )
        "#,
    ),
    (
        "products",
        r#"
        CREATE TABLE IF NOT EXISTS products (
            product_id INTEGER PRIMARY KEY AUTOINCREMENT,
            product_name TEXT NOT NULL,
            price REAL NOT NULL CHECK (price > 0),
            category_id INTEGER NOT NULL REFERENCES categories(category_id),
            class TEXT NOT NULL DEFAULT 'Regular',
            modify_date TEXT NOT NULL,
            resistant INTEGER NOT NULL DEFAULT 0,
            is_allergic INTEGER NOT NULL DEFAULT 0,
            vitality_days INTEGER NOT NULL DEFAULT 0
        )
        "#,
    ),
    (
        "sales",
        r#"
        CREATE TABLE IF NOT EXISTS sales (
            sales_id INTEGER PRIMARY KEY AUTOINCREMENT,
            sales_person_id INTEGER NOT NULL REFERENCES employees(employee_id),
            customer_id INTEGER NOT NULL REFERENCES customers(customer_id),
            product_id INTEGER NOT NULL REFERENCES products(product_id),
            quantity INTEGER NOT NULL CHECK (quantity > 0),
            discount REAL NOT NULL DEFAULT 0 CHECK (discount >= 0 AND discount <= 1),
            total_price REAL NOT NULL CHECK (total_price >= 0),
            sales_date TEXT NOT NULL,
            transaction_number TEXT NOT NULL
        )
        "#,
    ),
];

/// Indexes on the join and filter columns used by reports
pub(crate) const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_cities_country ON cities(country_id)",
    "CREATE INDEX IF NOT EXISTS idx_customers_city ON customers(city_id)",
    "CREATE INDEX IF NOT EXISTS idx_products_category ON products(category_id)",
    "CREATE INDEX IF NOT EXISTS idx_sales_person ON sales(sales_person_id)",
    "CREATE INDEX IF NOT EXISTS idx_sales_customer ON sales(customer_id)",
    "CREATE INDEX IF NOT EXISTS idx_sales_product ON sales(product_id)",
    "CREATE INDEX IF NOT EXISTS idx_sales_date ON sales(sales_date)",
];

//! Employees (sales people)

use chrono::NaiveDate;
use grocery_query::DATE_FORMAT;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::{Executor, Row, Sqlite};

use crate::error::{Result, StoreError, middle_initial, require_id, require_text};

const ENTITY: &str = "employee";

/// Recorded gender, `M` or `F` in the database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    /// Parse `M`/`F` (any case); anything else is treated as unrecorded
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "M" => Some(Self::Male),
            "F" => Some(Self::Female),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
        }
    }
}

/// An employee who makes sales
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    id: Option<i64>,
    first_name: String,
    middle_initial: Option<String>,
    last_name: String,
    birth_date: Option<NaiveDate>,
    gender: Option<Gender>,
    city_id: i64,
    hire_date: Option<NaiveDate>,
}

impl Employee {
    /// Create a new, unsaved employee
    pub fn new(first_name: &str, middle: Option<&str>, last_name: &str, city_id: i64) -> Result<Self> {
        Ok(Self {
            id: None,
            first_name: require_text(ENTITY, "first_name", first_name)?,
            middle_initial: middle_initial(ENTITY, middle)?,
            last_name: require_text(ENTITY, "last_name", last_name)?,
            birth_date: None,
            gender: None,
            city_id: require_id(ENTITY, "city_id", city_id)?,
            hire_date: None,
        })
    }

    /// Set the birth date
    pub fn with_birth_date(mut self, date: NaiveDate) -> Self {
        self.birth_date = Some(date);
        self
    }

    /// Set the hire date
    pub fn with_hire_date(mut self, date: NaiveDate) -> Self {
        self.hire_date = Some(date);
        self
    }

    /// Set the gender from its `M`/`F` code
    pub fn with_gender(mut self, code: &str) -> Self {
        self.gender = Gender::parse(code);
        self
    }

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

    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.birth_date
    }

    pub fn gender(&self) -> Option<Gender> {
        self.gender
    }

    pub fn city_id(&self) -> i64 {
        self.city_id
    }

    pub fn hire_date(&self) -> Option<NaiveDate> {
        self.hire_date
    }

    /// "First Last", the form used in reports
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl std::fmt::Display for Employee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full_name())
    }
}

fn date_text(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format(DATE_FORMAT).to_string())
}

/// Insert a new employee or update an existing one, returning its id
pub async fn save<'e, E>(conn: E, employee: &mut Employee) -> Result<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let gender = employee.gender.map(|g| g.as_str());
    match employee.id {
        None => {
            let id = sqlx::query(
                "INSERT INTO employees \
                 (first_name, middle_initial, last_name, birth_date, gender, city_id, hire_date) \
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&employee.first_name)
            .bind(&employee.middle_initial)
            .bind(&employee.last_name)
            .bind(date_text(employee.birth_date))
            .bind(gender)
            .bind(employee.city_id)
            .bind(date_text(employee.hire_date))
            .execute(conn)
            .await?
            .last_insert_rowid();
            employee.id = Some(id);
            Ok(id)
        }
        Some(id) => {
            let updated = sqlx::query(
                "UPDATE employees SET first_name = ?, middle_initial = ?, last_name = ?, \
                 birth_date = ?, gender = ?, city_id = ?, hire_date = ? WHERE employee_id = ?",
            )
            .bind(&employee.first_name)
            .bind(&employee.middle_initial)
            .bind(&employee.last_name)
            .bind(date_text(employee.birth_date))
            .bind(gender)
            .bind(employee.city_id)
            .bind(date_text(employee.hire_date))
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

/// Look up an employee by id
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Employee>> {
    let row = sqlx::query("SELECT * FROM employees WHERE employee_id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.as_ref().map(from_row).transpose()?)
}

/// All employees ordered by last name
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Employee>> {
    let rows = sqlx::query("SELECT * FROM employees ORDER BY last_name, first_name")
        .fetch_all(pool)
        .await?;
    Ok(rows.iter().map(from_row).collect::<std::result::Result<_, _>>()?)
}

fn from_row(row: &SqliteRow) -> std::result::Result<Employee, sqlx::Error> {
    let gender: Option<String> = row.try_get("gender")?;
    Ok(Employee {
        id: Some(row.try_get("employee_id")?),
        first_name: row.try_get("first_name")?,
        middle_initial: row.try_get("middle_initial")?,
        last_name: row.try_get("last_name")?,
        birth_date: row.try_get("birth_date")?,
        gender: gender.as_deref().and_then(Gender::parse),
        city_id: row.try_get("city_id")?,
        hire_date: row.try_get("hire_date")?,
    })
}

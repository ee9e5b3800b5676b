//! Query builder for report SQL
//!
//! Builds SQLite queries with support for:
//! - Inner and left joins, with bound values in the join condition
//! - Conditions (WHERE clauses) with positional parameters
//! - Grouping, ordering and limits
//!
//! Values never get interpolated into the SQL text; they are collected
//! in clause order and returned next to the SQL in a [`BuiltQuery`].

use grocery_query::QueryParam;

use crate::filter::Filter;
use crate::timerange::TimeRange;

/// SQL text plus its positional parameters
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub sql: String,
    pub params: Vec<QueryParam>,
}

/// Query builder for report SQL
pub struct QueryBuilder {
    table: String,
    select: Vec<String>,
    select_params: Vec<QueryParam>,
    joins: Vec<String>,
    join_params: Vec<QueryParam>,
    where_clauses: Vec<String>,
    where_params: Vec<QueryParam>,
    group_by: Vec<String>,
    order_by: Vec<String>,
    limit: Option<u32>,
}

impl QueryBuilder {
    /// Create a new query builder for a table (with optional alias, e.g. "sales s")
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            select: Vec::new(),
            select_params: Vec::new(),
            joins: Vec::new(),
            join_params: Vec::new(),
            where_clauses: Vec::new(),
            where_params: Vec::new(),
            group_by: Vec::new(),
            order_by: Vec::new(),
            limit: None,
        }
    }

    /// Add a SELECT column with alias
    pub fn select_as(mut self, expr: impl Into<String>, alias: impl Into<String>) -> Self {
        self.select.push(format!("{} AS {}", expr.into(), alias.into()));
        self
    }

    /// Add a SELECT expression containing `?` placeholders
    pub fn select_bound(
        mut self,
        expr: impl Into<String>,
        alias: impl Into<String>,
        params: impl IntoIterator<Item = QueryParam>,
    ) -> Self {
        self.select.push(format!("{} AS {}", expr.into(), alias.into()));
        self.select_params.extend(params);
        self
    }

    /// Add an inner JOIN
    pub fn join(mut self, table: impl Into<String>, on: impl Into<String>) -> Self {
        self.joins.push(format!("JOIN {} ON {}", table.into(), on.into()));
        self
    }

    /// Add a LEFT JOIN
    pub fn left_join(mut self, table: impl Into<String>, on: impl Into<String>) -> Self {
        self.joins.push(format!("LEFT JOIN {} ON {}", table.into(), on.into()));
        self
    }

    /// Add a LEFT JOIN whose condition contains `?` placeholders
    ///
    /// Restricting the joined side here, rather than in WHERE, keeps rows of
    /// the outer table that have no match.
    pub fn left_join_bound(
        mut self,
        table: impl Into<String>,
        on: impl Into<String>,
        params: impl IntoIterator<Item = QueryParam>,
    ) -> Self {
        self.joins.push(format!("LEFT JOIN {} ON {}", table.into(), on.into()));
        self.join_params.extend(params);
        self
    }

    /// Add a WHERE clause containing `?` placeholders
    pub fn where_bound(
        mut self,
        clause: impl Into<String>,
        params: impl IntoIterator<Item = QueryParam>,
    ) -> Self {
        self.where_clauses.push(clause.into());
        self.where_params.extend(params);
        self
    }

    /// Add a GROUP BY column
    pub fn group_by(mut self, column: impl Into<String>) -> Self {
        self.group_by.push(column.into());
        self
    }

    /// Add an ORDER BY column
    pub fn order_by(mut self, column: impl Into<String>) -> Self {
        self.order_by.push(column.into());
        self
    }

    /// Add ORDER BY with direction
    pub fn order_by_desc(mut self, column: impl Into<String>) -> Self {
        self.order_by.push(format!("{} DESC", column.into()));
        self
    }

    /// Set LIMIT
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Apply a filter: date range as a WHERE clause, plus the limit
    pub fn apply_filter(mut self, filter: &Filter, date_col: &str) -> Self {
        if let Some(range) = &filter.time_range {
            let (clause, params) = range_clause(date_col, range);
            self = self.where_bound(clause, params);
        }
        if let Some(limit) = filter.limit {
            self.limit = Some(limit);
        }
        self
    }

    /// Apply a filter's limit only
    pub fn apply_limit(mut self, filter: &Filter) -> Self {
        if let Some(limit) = filter.limit {
            self.limit = Some(limit);
        }
        self
    }

    /// Build the final SQL query
    pub fn build(self) -> BuiltQuery {
        let mut sql = String::new();

        // SELECT
        sql.push_str("SELECT ");
        if self.select.is_empty() {
            sql.push('*');
        } else {
            sql.push_str(&self.select.join(", "));
        }

        // FROM
        sql.push_str(" FROM ");
        sql.push_str(&self.table);

        for join in &self.joins {
            sql.push(' ');
            sql.push_str(join);
        }

        // WHERE
        if !self.where_clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.where_clauses.join(" AND "));
        }

        // GROUP BY
        if !self.group_by.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&self.group_by.join(", "));
        }

        // ORDER BY
        if !self.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order_by.join(", "));
        }

        // LIMIT
        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        // Placeholders appear in SELECT, JOIN, WHERE order
        let mut params = self.select_params;
        params.extend(self.join_params);
        params.extend(self.where_params);

        BuiltQuery { sql, params }
    }
}

/// `col BETWEEN ? AND ?` over the whole days of a range
pub fn range_clause(date_col: &str, range: &TimeRange) -> (String, [QueryParam; 2]) {
    (
        format!("{} BETWEEN ? AND ?", date_col),
        [
            QueryParam::from(range.start_datetime()),
            QueryParam::from(range.end_datetime()),
        ],
    )
}

/// Build a revenue leaderboard: one name per group, summed `total_price`
///
/// Inner joins only, so groups without sales never appear.
pub fn revenue_by_query(
    name_expr: &str,
    joins: &[(&str, &str)],
    group_by: &str,
    limit: Option<u32>,
) -> BuiltQuery {
    let mut builder = QueryBuilder::new("sales s")
        .select_as(name_expr, "name")
        .select_as("SUM(s.total_price)", "revenue");

    for (table, on) in joins {
        builder = builder.join(*table, *on);
    }

    builder = builder
        .group_by(group_by)
        .order_by_desc("revenue")
        .order_by("name");

    if let Some(limit) = limit {
        builder = builder.limit(limit);
    }

    builder.build()
}

//! SQL builder with parameterized query construction.
//!
//! All caller-supplied values go through DuckDB's parameter binding (`?` placeholders),
//! never through string interpolation. Only column names and keywords that have been
//! checked against a closed whitelist are ever written into the query text.
//! Builder methods return `&mut Self` for chaining.
//!
//! # Example
//!
//! ```rust
//! use ygo_catalog::SqlBuilder;
//! let (sql, params) = SqlBuilder::new("cards")
//!     .where_eq("archetype", "Blue-Eyes")
//!     .where_ilike("name", "%dragon%")
//!     .order_by(&["attack DESC NULLS LAST", "card_id ASC"])
//!     .limit(10)
//!     .build();
//! ```

use duckdb::types::{ToSqlOutput, Value};
use duckdb::ToSql;

use crate::filters::Predicate;

/// A value bound to a `?` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Text(String),
    Int(i64),
    Bool(bool),
    Null,
}

impl From<&str> for SqlParam {
    fn from(value: &str) -> Self {
        SqlParam::Text(value.to_string())
    }
}

impl From<String> for SqlParam {
    fn from(value: String) -> Self {
        SqlParam::Text(value)
    }
}

impl From<i64> for SqlParam {
    fn from(value: i64) -> Self {
        SqlParam::Int(value)
    }
}

impl From<bool> for SqlParam {
    fn from(value: bool) -> Self {
        SqlParam::Bool(value)
    }
}

impl<T: Into<SqlParam>> From<Option<T>> for SqlParam {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(SqlParam::Null)
    }
}

impl ToSql for SqlParam {
    fn to_sql(&self) -> duckdb::Result<ToSqlOutput<'_>> {
        let value = match self {
            SqlParam::Text(s) => Value::Text(s.clone()),
            SqlParam::Int(n) => Value::BigInt(*n),
            SqlParam::Bool(b) => Value::Boolean(*b),
            SqlParam::Null => Value::Null,
        };
        Ok(ToSqlOutput::Owned(value))
    }
}

/// Builds parameterized SQL queries safely.
pub struct SqlBuilder {
    select_cols: Vec<String>,
    from_table: String,
    where_clauses: Vec<String>,
    params: Vec<SqlParam>,
    order_by_cols: Vec<String>,
    limit_val: Option<usize>,
    offset_val: Option<usize>,
}

impl SqlBuilder {
    /// Create a builder targeting the given table or view.
    pub fn new(table: &str) -> Self {
        Self {
            select_cols: vec!["*".to_string()],
            from_table: table.to_string(),
            where_clauses: Vec::new(),
            params: Vec::new(),
            order_by_cols: Vec::new(),
            limit_val: None,
            offset_val: None,
        }
    }

    /// Set the columns to select (replaces the default `*`).
    pub fn select(&mut self, cols: &[&str]) -> &mut Self {
        self.select_cols = cols.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Add a WHERE condition with `?` placeholders for each param.
    pub fn where_clause(&mut self, condition: &str, params: Vec<SqlParam>) -> &mut Self {
        self.where_clauses.push(condition.to_string());
        self.params.extend(params);
        self
    }

    /// Add an equality condition: `{column} = ?`.
    pub fn where_eq(&mut self, column: &str, value: impl Into<SqlParam>) -> &mut Self {
        self.where_clauses.push(format!("{} = ?", column));
        self.params.push(value.into());
        self
    }

    /// Add a case-insensitive pattern condition: `{column} ILIKE ?`.
    pub fn where_ilike(&mut self, column: &str, pattern: &str) -> &mut Self {
        self.where_clauses.push(format!("{} ILIKE ?", column));
        self.params.push(SqlParam::from(pattern));
        self
    }

    /// Add an IN condition with parameterized values.
    ///
    /// Empty values list produces `FALSE`.
    pub fn where_in(&mut self, column: &str, values: &[SqlParam]) -> &mut Self {
        if values.is_empty() {
            self.where_clauses.push("FALSE".to_string());
            return self;
        }
        let placeholders: Vec<&str> = values.iter().map(|_| "?").collect();
        self.where_clauses
            .push(format!("{} IN ({})", column, placeholders.join(", ")));
        self.params.extend(values.iter().cloned());
        self
    }

    /// AND every condition of a validated predicate into the WHERE clause.
    pub fn where_predicate(&mut self, predicate: &Predicate) -> &mut Self {
        self.where_clauses
            .extend(predicate.conditions().iter().cloned());
        self.params.extend(predicate.params().iter().cloned());
        self
    }

    /// Add ORDER BY clauses (e.g. `"name ASC"`, `"RANDOM()"`).
    pub fn order_by(&mut self, clauses: &[&str]) -> &mut Self {
        self.order_by_cols
            .extend(clauses.iter().map(|c| c.to_string()));
        self
    }

    /// Set the maximum number of rows to return.
    pub fn limit(&mut self, n: usize) -> &mut Self {
        self.limit_val = Some(n);
        self
    }

    /// Set the number of rows to skip before returning results.
    pub fn offset(&mut self, n: usize) -> &mut Self {
        self.offset_val = Some(n);
        self
    }

    fn where_part(&self) -> Option<String> {
        if self.where_clauses.is_empty() {
            None
        } else {
            Some(format!("WHERE {}", self.where_clauses.join(" AND ")))
        }
    }

    /// Build the final SQL string and parameter list.
    ///
    /// `LIMIT`/`OFFSET` are typed integers and are rendered inline.
    pub fn build(&self) -> (String, Vec<SqlParam>) {
        let mut parts = vec![
            format!("SELECT {}", self.select_cols.join(", ")),
            format!("FROM {}", self.from_table),
        ];

        if let Some(w) = self.where_part() {
            parts.push(w);
        }

        if !self.order_by_cols.is_empty() {
            parts.push(format!("ORDER BY {}", self.order_by_cols.join(", ")));
        }

        if let Some(n) = self.limit_val {
            parts.push(format!("LIMIT {}", n));
        }

        if let Some(n) = self.offset_val {
            parts.push(format!("OFFSET {}", n));
        }

        (parts.join("\n"), self.params.clone())
    }

    /// Build a `COUNT(*) AS total` query over the same table and WHERE clause,
    /// ignoring selection, ordering and pagination.
    pub fn build_count(&self) -> (String, Vec<SqlParam>) {
        let mut parts = vec![
            "SELECT COUNT(*) AS total".to_string(),
            format!("FROM {}", self.from_table),
        ];
        if let Some(w) = self.where_part() {
            parts.push(w);
        }
        (parts.join("\n"), self.params.clone())
    }
}

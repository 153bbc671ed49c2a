//! DuckDB database handle and per-request connection wrapper.
//!
//! A [`Database`] owns the root DuckDB connection; every unit of work clones
//! its own [`Connection`] from it and drops it when done. Driver errors are
//! logged here, at the point of the call, and replaced by
//! [`CatalogError::Internal`] so no query text or driver detail leaks upward.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use duckdb::{types::ValueRef, Connection as DuckDbConnection};
use serde::de::DeserializeOwned;

use crate::error::{CatalogError, Result};
use crate::sql_builder::SqlParam;

/// One result row: column name to JSON value.
pub type Row = HashMap<String, serde_json::Value>;

fn store_failure(context: &str) -> impl FnOnce(duckdb::Error) -> CatalogError + '_ {
    move |e| {
        tracing::error!(error = %e, sql = context, "data store call failed");
        CatalogError::Internal
    }
}

// ---------------------------------------------------------------------------
// Database
// ---------------------------------------------------------------------------

/// Shared handle to a DuckDB database (file-backed or in-memory).
pub struct Database {
    root: Mutex<DuckDbConnection>,
}

impl Database {
    /// Open (or create) a database file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = DuckDbConnection::open(path).map_err(store_failure("open database"))?;
        tracing::info!(path = %path.display(), "opened catalog database");
        Ok(Self {
            root: Mutex::new(conn),
        })
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn =
            DuckDbConnection::open_in_memory().map_err(store_failure("open in-memory database"))?;
        Ok(Self {
            root: Mutex::new(conn),
        })
    }

    /// Acquire a fresh connection to the same database.
    ///
    /// The connection is released when the returned value is dropped.
    pub fn connect(&self) -> Result<Connection> {
        let root = self.root.lock().map_err(|_| {
            tracing::error!("database root connection lock poisoned");
            CatalogError::Internal
        })?;
        let conn = root.try_clone().map_err(store_failure("clone connection"))?;
        Ok(Connection { conn })
    }
}

// ---------------------------------------------------------------------------
// Connection
// ---------------------------------------------------------------------------

/// A scoped DuckDB connection with row conversion helpers.
pub struct Connection {
    conn: DuckDbConnection,
}

impl Connection {
    /// Execute SQL and return results as a `Vec` of `HashMap`s.
    pub fn execute(&self, sql: &str, params: &[SqlParam]) -> Result<Vec<Row>> {
        let mut stmt = self.conn.prepare(sql).map_err(store_failure(sql))?;

        let param_values: Vec<&dyn duckdb::ToSql> =
            params.iter().map(|p| p as &dyn duckdb::ToSql).collect();

        let mut rows_result = stmt
            .query(param_values.as_slice())
            .map_err(store_failure(sql))?;

        // Column metadata is only available once the statement has run.
        let statement = rows_result.as_ref().ok_or_else(|| {
            tracing::error!(sql, "statement metadata unavailable after query");
            CatalogError::Internal
        })?;
        let column_names: Vec<String> = statement
            .column_names()
            .into_iter()
            .map(|s| s.to_string())
            .collect();
        let column_count = statement.column_count();

        let mut out: Vec<Row> = Vec::new();

        while let Some(row) = rows_result.next().map_err(store_failure(sql))? {
            let mut map = HashMap::with_capacity(column_count);
            for (i, col_name) in column_names.iter().enumerate() {
                let value = convert_value_ref(row.get_ref(i).map_err(store_failure(sql))?);
                map.insert(col_name.clone(), value);
            }
            out.push(map);
        }

        Ok(out)
    }

    /// Execute SQL and deserialize each row into type `T`.
    pub fn execute_into<T: DeserializeOwned>(
        &self,
        sql: &str,
        params: &[SqlParam],
    ) -> Result<Vec<T>> {
        let rows = self.execute(sql, params)?;
        rows.into_iter().map(|row| row_into(row, sql)).collect()
    }

    /// Execute SQL and return the first column of the first row.
    ///
    /// Returns `None` if the result set is empty.
    pub fn execute_scalar(
        &self,
        sql: &str,
        params: &[SqlParam],
    ) -> Result<Option<serde_json::Value>> {
        let mut stmt = self.conn.prepare(sql).map_err(store_failure(sql))?;
        let param_values: Vec<&dyn duckdb::ToSql> =
            params.iter().map(|p| p as &dyn duckdb::ToSql).collect();

        let mut rows = stmt
            .query(param_values.as_slice())
            .map_err(store_failure(sql))?;

        if let Some(row) = rows.next().map_err(store_failure(sql))? {
            let value = convert_value_ref(row.get_ref(0).map_err(store_failure(sql))?);
            Ok(Some(value))
        } else {
            Ok(None)
        }
    }

    /// Execute a statement that returns no rows; yields the affected row count.
    pub fn execute_statement(&self, sql: &str, params: &[SqlParam]) -> Result<usize> {
        let mut stmt = self.conn.prepare(sql).map_err(store_failure(sql))?;
        let param_values: Vec<&dyn duckdb::ToSql> =
            params.iter().map(|p| p as &dyn duckdb::ToSql).collect();
        stmt.execute(param_values.as_slice())
            .map_err(store_failure(sql))
    }

    /// Prepare once and execute for every parameter row.
    pub fn execute_many(&self, sql: &str, rows: &[Vec<SqlParam>]) -> Result<usize> {
        let mut stmt = self.conn.prepare(sql).map_err(store_failure(sql))?;
        let mut affected = 0;
        for params in rows {
            let param_values: Vec<&dyn duckdb::ToSql> =
                params.iter().map(|p| p as &dyn duckdb::ToSql).collect();
            affected += stmt
                .execute(param_values.as_slice())
                .map_err(store_failure(sql))?;
        }
        Ok(affected)
    }

    /// Execute one or more `;`-separated statements without parameters.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.conn.execute_batch(sql).map_err(store_failure(sql))
    }

    /// Run `f` inside a transaction: committed on `Ok`, rolled back on `Err`.
    pub fn transaction<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        self.execute_batch("BEGIN TRANSACTION")?;
        match f(self) {
            Ok(value) => {
                self.execute_batch("COMMIT")?;
                Ok(value)
            }
            Err(e) => {
                if self.execute_batch("ROLLBACK").is_err() {
                    tracing::warn!("rollback failed after transaction error");
                }
                Err(e)
            }
        }
    }

    /// Count rows with a `SELECT COUNT(*) AS total ...` query.
    pub fn count(&self, sql: &str, params: &[SqlParam]) -> Result<usize> {
        let total = self
            .execute_scalar(sql, params)?
            .and_then(|v| v.as_u64())
            .unwrap_or(0);
        Ok(total as usize)
    }
}

fn row_into<T: DeserializeOwned>(row: Row, sql: &str) -> Result<T> {
    let value = serde_json::Value::Object(row.into_iter().collect());
    serde_json::from_value(value).map_err(|e| {
        tracing::error!(error = %e, sql, "row does not match the expected shape");
        CatalogError::Internal
    })
}

/// Convert a DuckDB `ValueRef` to a `serde_json::Value`.
fn convert_value_ref(val: ValueRef<'_>) -> serde_json::Value {
    match val {
        ValueRef::Null => serde_json::Value::Null,
        ValueRef::Boolean(b) => serde_json::Value::Bool(b),
        ValueRef::TinyInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::SmallInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::Int(n) => serde_json::Value::Number(n.into()),
        ValueRef::BigInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::UTinyInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::USmallInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::UInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::UBigInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::HugeInt(n) => {
            // SUM over INTEGER yields HUGEINT; fall back to a string if it overflows i64
            if let Ok(i) = i64::try_from(n) {
                serde_json::Value::Number(i.into())
            } else {
                serde_json::Value::String(n.to_string())
            }
        }
        ValueRef::Float(f) => serde_json::Number::from_f64(f as f64)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Double(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Text(bytes) => {
            serde_json::Value::String(String::from_utf8_lossy(bytes).to_string())
        }
        // Dates, lists and structs are cast to text or flattened in SQL before they get here.
        _ => serde_json::Value::Null,
    }
}

// Resource persistence operations

use crate::error::{Result, StorageError};
use crate::model::{NewResource, Resource, ResourceType};
use crate::schema::Storage;
use chrono::Utc;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, ErrorCode, Row};

/// Store handle for resource records.
///
/// Records are insert-only: there is no update or delete path.
pub trait ResourceStore: Send {
    /// All resources in insertion (id) order
    fn list_resources(&self) -> Result<Vec<Resource>>;

    /// Insert one resource and return the stored record
    fn insert_resource(&mut self, new: &NewResource) -> Result<Resource>;

    /// Number of stored resources
    fn count_resources(&self) -> Result<usize>;

    /// Insert several resources, returning the stored records in order.
    ///
    /// Stores override this to make the batch atomic; the default stops at
    /// the first failure and keeps earlier rows.
    fn insert_resources(&mut self, records: &[NewResource]) -> Result<Vec<Resource>> {
        records.iter().map(|r| self.insert_resource(r)).collect()
    }
}

impl ToSql for ResourceType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for ResourceType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let name = value.as_str()?;
        ResourceType::from_str_name(name)
            .ok_or_else(|| FromSqlError::Other(format!("unknown resource type '{}'", name).into()))
    }
}

const INSERT_SQL: &str = "INSERT INTO resources (name, resource_type, provider, instance_type, cpu_utilization, memory_utilization, storage_gb, monthly_cost, created_at)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";

const SELECT_SQL: &str = "SELECT id, name, resource_type, provider, instance_type, cpu_utilization, memory_utilization, storage_gb, monthly_cost, created_at
     FROM resources ORDER BY id";

fn row_to_resource(row: &Row<'_>) -> rusqlite::Result<Resource> {
    Ok(Resource {
        id: row.get(0)?,
        name: row.get(1)?,
        resource_type: row.get(2)?,
        provider: row.get(3)?,
        instance_type: row.get(4)?,
        cpu_utilization: row.get(5)?,
        memory_utilization: row.get(6)?,
        storage_gb: row.get(7)?,
        monthly_cost: row.get(8)?,
        created_at: row.get(9)?,
    })
}

/// Insert through any connection-like handle (plain connection or transaction).
fn insert_with(conn: &Connection, new: &NewResource) -> Result<Resource> {
    let created_at = Utc::now();
    conn.execute(
        INSERT_SQL,
        params![
            new.name,
            new.resource_type,
            new.provider,
            new.instance_type,
            new.cpu_utilization,
            new.memory_utilization,
            new.storage_gb,
            new.monthly_cost,
            created_at,
        ],
    )
    .map_err(|e| classify_insert_error(e, &new.name))?;

    Ok(new.clone().into_resource(conn.last_insert_rowid(), created_at))
}

fn classify_insert_error(error: rusqlite::Error, name: &str) -> StorageError {
    let unique_violation = matches!(
        &error,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation
                && failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    );

    if unique_violation {
        StorageError::DuplicateName(name.to_string())
    } else {
        StorageError::Database(error)
    }
}

fn classify_read_error(error: rusqlite::Error) -> StorageError {
    match error {
        rusqlite::Error::FromSqlConversionFailure(column, _, source) => {
            StorageError::InvalidRecord(format!("column {}: {}", column, source))
        }
        other => StorageError::Database(other),
    }
}

impl ResourceStore for Storage {
    fn list_resources(&self) -> Result<Vec<Resource>> {
        let mut stmt = self.conn().prepare(SELECT_SQL)?;

        let resources = stmt
            .query_map([], row_to_resource)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(classify_read_error)?;

        Ok(resources)
    }

    fn insert_resource(&mut self, new: &NewResource) -> Result<Resource> {
        insert_with(self.conn(), new)
    }

    fn count_resources(&self) -> Result<usize> {
        let count: i64 = self
            .conn()
            .query_row("SELECT COUNT(*) FROM resources", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn insert_resources(&mut self, records: &[NewResource]) -> Result<Vec<Resource>> {
        let tx = self.conn_mut().transaction()?;

        let mut stored = Vec::with_capacity(records.len());
        for record in records {
            stored.push(insert_with(&tx, record)?);
        }

        tx.commit()?;
        Ok(stored)
    }
}

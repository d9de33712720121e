//! Apply the entity model to the database: CREATE TABLE per entity, then
//! foreign keys once every table exists.

use crate::error::AppError;
use crate::model::{EntityDef, Model};
use sqlx::PgPool;

fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

fn create_table_ddl(entity: &EntityDef) -> String {
    let mut col_defs = vec![format!(
        "{} BIGSERIAL PRIMARY KEY",
        quoted(entity.pk_column)
    )];
    for col in &entity.columns {
        let mut def = format!("{} {}", quoted(col.name), col.kind.ddl_type());
        if col.required {
            def.push_str(" NOT NULL");
        }
        if col.unique {
            def.push_str(" UNIQUE");
        }
        col_defs.push(def);
    }
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n  {}\n)",
        quoted(entity.table),
        col_defs.join(",\n  ")
    )
}

fn foreign_key_ddl(entity: &EntityDef) -> Vec<String> {
    entity
        .columns
        .iter()
        .filter_map(|col| {
            col.references.as_ref().map(|fk| {
                format!(
                    "ALTER TABLE {} ADD CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
                    quoted(entity.table),
                    quoted(&format!("fk_{}_{}", entity.table, col.name)),
                    quoted(col.name),
                    quoted(fk.table),
                    quoted(fk.column)
                )
            })
        })
        .collect()
}

/// PostgreSQL duplicate_object: the constraint already exists.
const DUPLICATE_OBJECT: &str = "42710";

fn is_duplicate_object(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.code().as_deref() == Some(DUPLICATE_OBJECT),
        _ => false,
    }
}

/// Create all entity tables and foreign keys. Table creation is idempotent;
/// re-adding a foreign key on a later boot reports duplicate_object and is
/// skipped, but every other failure aborts startup — a server running
/// without its FK constraints would accept dangling references.
pub async fn apply_migrations(pool: &PgPool, model: &Model) -> Result<(), AppError> {
    for entity in &model.entities {
        let ddl = create_table_ddl(entity);
        tracing::debug!(table = entity.table, sql = %ddl, "ddl");
        sqlx::query(&ddl).execute(pool).await?;
    }
    for entity in &model.entities {
        for ddl in foreign_key_ddl(entity) {
            tracing::debug!(table = entity.table, sql = %ddl, "ddl");
            if let Err(err) = sqlx::query(&ddl).execute(pool).await {
                if is_duplicate_object(&err) {
                    tracing::debug!(table = entity.table, "foreign key already present");
                    continue;
                }
                return Err(err.into());
            }
        }
    }
    Ok(())
}

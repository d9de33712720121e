//! Model validation: referential integrity of the entity definitions.

use crate::error::ModelError;
use crate::model::types::{EntityDef, Model};
use std::collections::{HashMap, HashSet};

/// Check the definitions and build the runtime [`Model`]. Rejects duplicate
/// path segments, duplicate or PK-colliding columns, and foreign keys that do
/// not point at another entity's primary key.
pub fn validate(entities: Vec<EntityDef>) -> Result<Model, ModelError> {
    let pk_by_table: HashMap<&str, &str> = entities
        .iter()
        .map(|e| (e.table, e.pk_column))
        .collect();

    let mut path_segments = HashSet::new();
    for entity in &entities {
        if !path_segments.insert(entity.path_segment) {
            return Err(ModelError::DuplicatePathSegment(
                entity.path_segment.to_string(),
            ));
        }

        let mut column_names = HashSet::new();
        for col in &entity.columns {
            if !column_names.insert(col.name) {
                return Err(ModelError::DuplicateColumn {
                    table: entity.table.to_string(),
                    column: col.name.to_string(),
                });
            }
            if col.name == entity.pk_column {
                return Err(ModelError::PrimaryKeyCollision {
                    table: entity.table.to_string(),
                    column: col.name.to_string(),
                });
            }
            if let Some(fk) = &col.references {
                match pk_by_table.get(fk.table) {
                    None => {
                        return Err(ModelError::UnknownForeignTable {
                            table: entity.table.to_string(),
                            column: col.name.to_string(),
                            target: fk.table.to_string(),
                        });
                    }
                    Some(pk) if *pk != fk.column => {
                        return Err(ModelError::ForeignKeyNotPrimary {
                            table: entity.table.to_string(),
                            column: col.name.to_string(),
                            target: fk.table.to_string(),
                            target_column: fk.column.to_string(),
                        });
                    }
                    Some(_) => {}
                }
            }
        }
    }

    Ok(Model::from_validated(entities))
}

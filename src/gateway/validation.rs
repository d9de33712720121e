//! Payload validation against the entity definition.

use crate::error::AppError;
use crate::model::{ColumnDef, ColumnFormat, ColumnKind, EntityDef};
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;

fn email_re() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("static pattern"))
}

pub struct PayloadValidator;

impl PayloadValidator {
    /// A create payload must carry exactly the client-supplied columns:
    /// required ones present and non-null, nothing the entity does not
    /// declare, and no server-generated primary key.
    pub fn validate(
        entity: &EntityDef,
        payload: &HashMap<String, Value>,
    ) -> Result<(), AppError> {
        for key in payload.keys() {
            if key == entity.pk_column {
                return Err(AppError::Validation(format!(
                    "{} is server-generated and cannot be supplied",
                    key
                )));
            }
            if entity.column(key).is_none() {
                return Err(AppError::Validation(format!("unknown field: {}", key)));
            }
        }
        for col in &entity.columns {
            match payload.get(col.name) {
                None | Some(Value::Null) => {
                    if col.required {
                        return Err(AppError::Validation(format!("{} is required", col.name)));
                    }
                }
                Some(v) => validate_field(col, v)?,
            }
        }
        Ok(())
    }
}

fn validate_field(col: &ColumnDef, v: &Value) -> Result<(), AppError> {
    let kind_ok = match col.kind {
        ColumnKind::Integer => v.as_i64().is_some(),
        ColumnKind::Double => v.is_number(),
        ColumnKind::Text => v.is_string(),
    };
    if !kind_ok {
        return Err(AppError::Validation(format!(
            "{} must be {}",
            col.name,
            match col.kind {
                ColumnKind::Integer => "an integer",
                ColumnKind::Double => "a number",
                ColumnKind::Text => "a string",
            }
        )));
    }
    if let Some(ColumnFormat::Email) = col.format {
        if let Some(s) = v.as_str() {
            if !email_re().is_match(s) {
                return Err(AppError::Validation(format!(
                    "{} must be a valid email",
                    col.name
                )));
            }
        }
    }
    Ok(())
}

//! Declarative entity model: each entity is one table with a server-generated
//! primary key and a fixed, ordered list of client-supplied columns.

use std::collections::HashMap;

/// Scalar kind of a column. Drives payload checks, parameter binding, and DDL.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Double,
    Text,
}

impl ColumnKind {
    pub fn ddl_type(self) -> &'static str {
        match self {
            ColumnKind::Integer => "BIGINT",
            ColumnKind::Double => "DOUBLE PRECISION",
            ColumnKind::Text => "TEXT",
        }
    }
}

/// Operations an entity exposes over HTTP.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Create,
    List,
    BulkCreate,
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::List => "list",
            Operation::BulkCreate => "bulk_create",
        }
    }
}

/// Extra format checks beyond the scalar kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnFormat {
    Email,
}

/// Referential target of a foreign-key column.
#[derive(Clone, Debug)]
pub struct ForeignKey {
    pub table: &'static str,
    pub column: &'static str,
}

/// One client-supplied column.
#[derive(Clone, Debug)]
pub struct ColumnDef {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub required: bool,
    pub unique: bool,
    pub references: Option<ForeignKey>,
    pub format: Option<ColumnFormat>,
}

impl ColumnDef {
    pub fn new(name: &'static str, kind: ColumnKind) -> Self {
        ColumnDef {
            name,
            kind,
            required: true,
            unique: false,
            references: None,
            format: None,
        }
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn references(mut self, table: &'static str, column: &'static str) -> Self {
        self.references = Some(ForeignKey { table, column });
        self
    }

    pub fn format(mut self, format: ColumnFormat) -> Self {
        self.format = Some(format);
        self
    }
}

/// One entity: table name, URL path segment, primary key, client columns in
/// their fixed INSERT order, and the operation set it exposes.
#[derive(Clone, Debug)]
pub struct EntityDef {
    pub table: &'static str,
    pub path_segment: &'static str,
    pub pk_column: &'static str,
    pub columns: Vec<ColumnDef>,
    pub operations: Vec<Operation>,
}

impl EntityDef {
    pub fn allows(&self, op: Operation) -> bool {
        self.operations.contains(&op)
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// The full entity model, indexed by path segment. Built once at startup via
/// [`crate::model::validate`]; handlers only ever read it.
#[derive(Clone, Debug)]
pub struct Model {
    pub entities: Vec<EntityDef>,
    by_path: HashMap<&'static str, usize>,
}

impl Model {
    pub(crate) fn from_validated(entities: Vec<EntityDef>) -> Self {
        let by_path = entities
            .iter()
            .enumerate()
            .map(|(i, e)| (e.path_segment, i))
            .collect();
        Model { entities, by_path }
    }

    pub fn entity_by_path(&self, path_segment: &str) -> Option<&EntityDef> {
        self.by_path.get(path_segment).map(|&i| &self.entities[i])
    }
}

//! The built-in inventory model: users, products, orders, and the lookup
//! tables products reference.

use crate::error::ModelError;
use crate::model::types::{ColumnDef, ColumnFormat, ColumnKind, EntityDef, Model, Operation};
use crate::model::validator::validate;

fn lookup(
    table: &'static str,
    path_segment: &'static str,
    pk_column: &'static str,
    value_column: &'static str,
) -> EntityDef {
    EntityDef {
        table,
        path_segment,
        pk_column,
        columns: vec![ColumnDef::new(value_column, ColumnKind::Text)],
        operations: vec![Operation::Create, Operation::List, Operation::BulkCreate],
    }
}

/// Build and validate the full inventory model.
///
/// Table and column names follow the original MySQL schema (Spanish,
/// singular lookup tables, `id_<entidad>` primary keys).
pub fn inventory_model() -> Result<Model, ModelError> {
    let usuarios = EntityDef {
        table: "usuarios",
        path_segment: "usuarios",
        pk_column: "id_usuario",
        columns: vec![
            ColumnDef::new("nombre", ColumnKind::Text),
            ColumnDef::new("email", ColumnKind::Text)
                .unique()
                .format(ColumnFormat::Email),
        ],
        operations: vec![Operation::Create, Operation::List],
    };

    let productos = EntityDef {
        table: "productos",
        path_segment: "productos",
        pk_column: "id_producto",
        columns: vec![
            ColumnDef::new("nombre", ColumnKind::Text),
            ColumnDef::new("inventario", ColumnKind::Integer),
            ColumnDef::new("precio_venta", ColumnKind::Double),
            ColumnDef::new("costo", ColumnKind::Double),
            ColumnDef::new("codigo_id", ColumnKind::Integer).references("codigo", "id_codigo"),
            ColumnDef::new("tipo_id", ColumnKind::Integer).references("tipo", "id_tipo"),
            ColumnDef::new("bodega_id", ColumnKind::Integer).references("bodega", "id_bodega"),
            ColumnDef::new("categoria_id", ColumnKind::Integer)
                .references("categoria", "id_categoria"),
            ColumnDef::new("marca_id", ColumnKind::Integer).references("marca", "id_marca"),
            ColumnDef::new("unidad_medida_id", ColumnKind::Integer)
                .references("unidad_medida", "id_unidad_medida"),
        ],
        operations: vec![Operation::Create, Operation::List, Operation::BulkCreate],
    };

    let pedidos = EntityDef {
        table: "pedidos",
        path_segment: "pedidos",
        pk_column: "id_pedido",
        columns: vec![
            ColumnDef::new("id_usuario", ColumnKind::Integer).references("usuarios", "id_usuario"),
            ColumnDef::new("total", ColumnKind::Double),
        ],
        operations: vec![Operation::Create, Operation::List],
    };

    validate(vec![
        lookup("codigo", "codigos", "id_codigo", "codigo"),
        lookup("tipo", "tipos", "id_tipo", "tipo"),
        lookup("bodega", "bodegas", "id_bodega", "nombre"),
        lookup("categoria", "categorias", "id_categoria", "nombre"),
        lookup("marca", "marcas", "id_marca", "nombre"),
        lookup("unidad_medida", "unidades-medida", "id_unidad_medida", "nombre"),
        usuarios,
        productos,
        pedidos,
    ])
}

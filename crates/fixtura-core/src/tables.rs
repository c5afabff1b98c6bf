//! Column contracts of the destination tables.

/// Primary table holding one row per customer.
pub const CUSTOMERS_TABLE: &str = "clientes";

/// Dependent table holding one identity document per customer.
pub const DOCUMENTS_TABLE: &str = "documentos_identidad";

/// Insert column order for [`CUSTOMERS_TABLE`].
pub const CUSTOMER_COLUMNS: &[&str] = &[
    "cliente_id",
    "nombre",
    "apellido",
    "email",
    "telefono",
    "fecha_registro",
    "estado",
];

/// Insert column order for [`DOCUMENTS_TABLE`].
pub const DOCUMENT_COLUMNS: &[&str] = &[
    "cliente_id",
    "tipo_documento",
    "numero_documento",
    "fecha_emision",
    "fecha_vencimiento",
];

/// Column holding the unique document number.
pub const DOCUMENT_NUMBER_COLUMN: &str = "numero_documento";

/// Comma-separated column list for an INSERT statement.
pub fn column_list(columns: &[&str]) -> String {
    columns.join(", ")
}

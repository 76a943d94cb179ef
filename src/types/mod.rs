// Module for type identifiers and catalog lookups
pub mod pg_type;
pub mod catalog;

pub use pg_type::PgType;
pub use catalog::{BuiltinTypeCatalog, InMemoryTypeCatalog, TypeCatalog, TypeInfo};

/// Object identifier, as used for types, collations, functions and operators
pub type Oid = u32;

/// The "no object" OID
pub const INVALID_OID: Oid = 0;

/// Well-known collation OIDs
pub mod collation {
    use super::Oid;

    pub const DEFAULT_COLLATION_OID: Oid = 100;
    pub const C_COLLATION_OID: Oid = 950;
    pub const POSIX_COLLATION_OID: Oid = 951;
}

/// Well-known OIDs for types the resolver itself reports
pub const BOOL_OID: Oid = PgType::Bool as Oid;
pub const INT4_OID: Oid = PgType::Int4 as Oid;
pub const TEXT_OID: Oid = PgType::Text as Oid;
pub const XML_OID: Oid = PgType::Xml as Oid;
pub const RECORD_OID: Oid = PgType::Record as Oid;

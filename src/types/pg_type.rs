use serde::{Deserialize, Serialize};

use super::Oid;

/// Built-in PostgreSQL type OIDs known to the tree tooling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum PgType {
    Bool = 16,
    Bytea = 17,
    Char = 18,
    Name = 19,
    Int8 = 20,
    Int2 = 21,
    Int4 = 23,
    Text = 25,
    Oid = 26,
    Json = 114,
    Xml = 142,
    Float4 = 700,
    Float8 = 701,
    Unknown = 705,
    Money = 790,
    Bpchar = 1042,
    Varchar = 1043,
    Date = 1082,
    Time = 1083,
    Timestamp = 1114,
    Timestamptz = 1184,
    Interval = 1186,
    Timetz = 1266,
    Bit = 1560,
    Varbit = 1562,
    Numeric = 1700,
    Record = 2249,
    Void = 2278,
    Uuid = 2950,
    Jsonb = 3802,
    // Array types
    BoolArray = 1000,
    ByteaArray = 1001,
    CharArray = 1002,
    NameArray = 1003,
    Int2Array = 1005,
    Int4Array = 1007,
    TextArray = 1009,
    BpcharArray = 1014,
    VarcharArray = 1015,
    Int8Array = 1016,
    Float4Array = 1021,
    Float8Array = 1022,
    OidArray = 1028,
    JsonArray = 199,
    XmlArray = 143,
    MoneyArray = 791,
    TimestampArray = 1115,
    DateArray = 1182,
    TimeArray = 1183,
    TimestamptzArray = 1185,
    IntervalArray = 1187,
    NumericArray = 1231,
    TimetzArray = 1270,
    BitArray = 1561,
    VarbitArray = 1563,
    RecordArray = 2287,
    UuidArray = 2951,
    JsonbArray = 3807,
}

impl PgType {
    /// Every built-in type, scalars first
    pub const ALL: &'static [PgType] = &[
        PgType::Bool,
        PgType::Bytea,
        PgType::Char,
        PgType::Name,
        PgType::Int8,
        PgType::Int2,
        PgType::Int4,
        PgType::Text,
        PgType::Oid,
        PgType::Json,
        PgType::Xml,
        PgType::Float4,
        PgType::Float8,
        PgType::Unknown,
        PgType::Money,
        PgType::Bpchar,
        PgType::Varchar,
        PgType::Date,
        PgType::Time,
        PgType::Timestamp,
        PgType::Timestamptz,
        PgType::Interval,
        PgType::Timetz,
        PgType::Bit,
        PgType::Varbit,
        PgType::Numeric,
        PgType::Record,
        PgType::Void,
        PgType::Uuid,
        PgType::Jsonb,
        PgType::BoolArray,
        PgType::ByteaArray,
        PgType::CharArray,
        PgType::NameArray,
        PgType::Int2Array,
        PgType::Int4Array,
        PgType::TextArray,
        PgType::BpcharArray,
        PgType::VarcharArray,
        PgType::Int8Array,
        PgType::Float4Array,
        PgType::Float8Array,
        PgType::OidArray,
        PgType::JsonArray,
        PgType::XmlArray,
        PgType::MoneyArray,
        PgType::TimestampArray,
        PgType::DateArray,
        PgType::TimeArray,
        PgType::TimestamptzArray,
        PgType::IntervalArray,
        PgType::NumericArray,
        PgType::TimetzArray,
        PgType::BitArray,
        PgType::VarbitArray,
        PgType::RecordArray,
        PgType::UuidArray,
        PgType::JsonbArray,
    ];

    pub fn from_oid(oid: Oid) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.to_oid() == oid)
    }

    pub fn to_oid(&self) -> Oid {
        *self as Oid
    }

    pub fn name(&self) -> &'static str {
        match self {
            PgType::Bool => "bool",
            PgType::Bytea => "bytea",
            PgType::Char => "char",
            PgType::Name => "name",
            PgType::Int8 => "int8",
            PgType::Int2 => "int2",
            PgType::Int4 => "int4",
            PgType::Text => "text",
            PgType::Oid => "oid",
            PgType::Json => "json",
            PgType::Xml => "xml",
            PgType::Float4 => "float4",
            PgType::Float8 => "float8",
            PgType::Unknown => "unknown",
            PgType::Money => "money",
            PgType::Bpchar => "bpchar",
            PgType::Varchar => "varchar",
            PgType::Date => "date",
            PgType::Time => "time",
            PgType::Timestamp => "timestamp",
            PgType::Timestamptz => "timestamptz",
            PgType::Interval => "interval",
            PgType::Timetz => "timetz",
            PgType::Bit => "bit",
            PgType::Varbit => "varbit",
            PgType::Numeric => "numeric",
            PgType::Record => "record",
            PgType::Void => "void",
            PgType::Uuid => "uuid",
            PgType::Jsonb => "jsonb",
            PgType::BoolArray => "_bool",
            PgType::ByteaArray => "_bytea",
            PgType::CharArray => "_char",
            PgType::NameArray => "_name",
            PgType::Int2Array => "_int2",
            PgType::Int4Array => "_int4",
            PgType::TextArray => "_text",
            PgType::BpcharArray => "_bpchar",
            PgType::VarcharArray => "_varchar",
            PgType::Int8Array => "_int8",
            PgType::Float4Array => "_float4",
            PgType::Float8Array => "_float8",
            PgType::OidArray => "_oid",
            PgType::JsonArray => "_json",
            PgType::XmlArray => "_xml",
            PgType::MoneyArray => "_money",
            PgType::TimestampArray => "_timestamp",
            PgType::DateArray => "_date",
            PgType::TimeArray => "_time",
            PgType::TimestamptzArray => "_timestamptz",
            PgType::IntervalArray => "_interval",
            PgType::NumericArray => "_numeric",
            PgType::TimetzArray => "_timetz",
            PgType::BitArray => "_bit",
            PgType::VarbitArray => "_varbit",
            PgType::RecordArray => "_record",
            PgType::UuidArray => "_uuid",
            PgType::JsonbArray => "_jsonb",
        }
    }

    /// Array type whose elements are of this type
    pub fn array_type(&self) -> Option<PgType> {
        let array = match self {
            PgType::Bool => PgType::BoolArray,
            PgType::Bytea => PgType::ByteaArray,
            PgType::Char => PgType::CharArray,
            PgType::Name => PgType::NameArray,
            PgType::Int8 => PgType::Int8Array,
            PgType::Int2 => PgType::Int2Array,
            PgType::Int4 => PgType::Int4Array,
            PgType::Text => PgType::TextArray,
            PgType::Oid => PgType::OidArray,
            PgType::Json => PgType::JsonArray,
            PgType::Xml => PgType::XmlArray,
            PgType::Float4 => PgType::Float4Array,
            PgType::Float8 => PgType::Float8Array,
            PgType::Money => PgType::MoneyArray,
            PgType::Bpchar => PgType::BpcharArray,
            PgType::Varchar => PgType::VarcharArray,
            PgType::Date => PgType::DateArray,
            PgType::Time => PgType::TimeArray,
            PgType::Timestamp => PgType::TimestampArray,
            PgType::Timestamptz => PgType::TimestamptzArray,
            PgType::Interval => PgType::IntervalArray,
            PgType::Timetz => PgType::TimetzArray,
            PgType::Bit => PgType::BitArray,
            PgType::Varbit => PgType::VarbitArray,
            PgType::Numeric => PgType::NumericArray,
            PgType::Record => PgType::RecordArray,
            PgType::Uuid => PgType::UuidArray,
            PgType::Jsonb => PgType::JsonbArray,
            // unknown and void have no array type, arrays have no array of arrays
            _ => return None,
        };
        Some(array)
    }

    /// Element type if this is an array type
    pub fn element_type(&self) -> Option<PgType> {
        Self::ALL
            .iter()
            .copied()
            .find(|scalar| scalar.array_type() == Some(*self))
    }

    /// Whether values of this type carry a collation
    pub fn is_collatable(&self) -> bool {
        match self {
            PgType::Text | PgType::Varchar | PgType::Bpchar => true,
            PgType::TextArray | PgType::VarcharArray | PgType::BpcharArray => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oid_round_trip_for_all_types() {
        for ty in PgType::ALL {
            assert_eq!(PgType::from_oid(ty.to_oid()), Some(*ty), "{}", ty.name());
        }
        assert_eq!(PgType::from_oid(0), None);
    }

    #[test]
    fn test_array_and_element_types() {
        assert_eq!(PgType::Int4.array_type(), Some(PgType::Int4Array));
        assert_eq!(PgType::Int4Array.element_type(), Some(PgType::Int4));
        assert_eq!(PgType::Int4Array.array_type(), None);
        assert_eq!(PgType::Unknown.array_type(), None);
        assert_eq!(PgType::Text.element_type(), None);
    }

    #[test]
    fn test_collatable_types() {
        assert!(PgType::Text.is_collatable());
        assert!(PgType::VarcharArray.is_collatable());
        assert!(!PgType::Int4.is_collatable());
        assert!(!PgType::Xml.is_collatable());
    }
}

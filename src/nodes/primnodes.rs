//! Payloads of analyzed expression nodes.
//!
//! Every expression produced by parse analysis is one of these structs wrapped
//! in a [`Node`] variant. Children are held as [`Node`] values; the owning
//! variant boxes the payload, so nesting needs no extra indirection here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Location, Node};
use crate::types::Oid;

/// How a function call or coercion was written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoercionForm {
    /// Display as a function call
    ExplicitCall,
    /// Display as an explicit cast
    ExplicitCast,
    /// Inserted by analysis, display nothing
    ImplicitCast,
}

/// A constant value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Datum {
    Null,
    Bool(bool),
    Int2(i16),
    Int4(i32),
    Int8(i64),
    Float4(f32),
    Float8(f64),
    Numeric(Decimal),
    Text(String),
    Bytea(Vec<u8>),
    Oid(Oid),
}

impl Datum {
    pub fn is_null(&self) -> bool {
        matches!(self, Datum::Null)
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Datum::Int4(v) => Some(*v),
            _ => None,
        }
    }
}

/// Column reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Var {
    /// Index of the referenced range-table entry (1-based)
    pub rtindex: u32,
    /// Attribute number, 0 for whole-row references
    pub attno: i16,
    pub type_oid: Oid,
    pub typmod: i32,
    pub collation: Oid,
    /// Number of query levels up from the one containing this Var
    pub levels_up: u32,
    pub location: Location,
}

/// Constant value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Const {
    pub type_oid: Oid,
    pub typmod: i32,
    pub collation: Oid,
    /// Storage length of the type, -1 for varlena
    pub len: i32,
    pub by_val: bool,
    pub value: Datum,
    pub location: Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParamKind {
    /// `$n` supplied from outside
    Extern,
    /// Internal executor parameter
    Exec,
    /// Placeholder for a sublink's output column
    Sublink,
    /// Output column of a MULTIEXPR sublink
    Multiexpr,
}

/// Query parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub kind: ParamKind,
    pub id: i32,
    pub type_oid: Oid,
    pub typmod: i32,
    pub collation: Oid,
    pub location: Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggKind {
    Normal,
    OrderedSet,
    Hypothetical,
}

/// Aggregate call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggref {
    pub func_oid: Oid,
    pub result_type: Oid,
    pub collation: Oid,
    pub input_collation: Oid,
    /// Direct arguments of an ordered-set aggregate
    pub direct_args: Vec<Node>,
    /// Aggregated arguments, as target entries
    pub args: Vec<Node>,
    /// ORDER BY, as sort-group clauses
    pub order: Vec<Node>,
    /// DISTINCT, as sort-group clauses
    pub distinct: Vec<Node>,
    pub filter: Option<Node>,
    pub star: bool,
    pub variadic: bool,
    pub kind: AggKind,
    pub levels_up: u32,
    pub location: Location,
}

/// GROUPING(...) call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupingFunc {
    pub args: Vec<Node>,
    /// Sort-group references of the arguments
    pub refs: Vec<u32>,
    pub cols: Vec<i32>,
    pub levels_up: u32,
    pub location: Location,
}

/// Window function call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowFunc {
    pub func_oid: Oid,
    pub result_type: Oid,
    pub collation: Oid,
    pub input_collation: Oid,
    pub args: Vec<Node>,
    pub filter: Option<Node>,
    /// Index of the associated window clause
    pub winref: u32,
    pub star: bool,
    /// True if this is an aggregate used as a window function
    pub is_agg: bool,
    pub location: Location,
}

/// Array subscripting or slice, optionally with an assignment source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayRef {
    pub array_type: Oid,
    pub element_type: Oid,
    pub typmod: i32,
    pub collation: Oid,
    pub upper_index: Vec<Node>,
    /// Lower bounds; non-empty only for slices
    pub lower_index: Vec<Node>,
    pub expr: Node,
    pub assign_expr: Option<Node>,
}

impl ArrayRef {
    pub fn is_slice(&self) -> bool {
        !self.lower_index.is_empty()
    }
}

/// Function call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuncExpr {
    pub func_oid: Oid,
    pub result_type: Oid,
    pub returns_set: bool,
    pub variadic: bool,
    pub format: CoercionForm,
    pub collation: Oid,
    pub input_collation: Oid,
    pub args: Vec<Node>,
    pub location: Location,
}

/// Named argument in a function call, `name => arg`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedArgExpr {
    pub arg: Node,
    pub name: String,
    /// Argument's position in the function's signature
    pub arg_number: i32,
    pub location: Location,
}

/// Operator application. Also the payload of `IS DISTINCT FROM` and `NULLIF`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpExpr {
    pub op_oid: Oid,
    pub func_oid: Oid,
    pub result_type: Oid,
    pub returns_set: bool,
    pub collation: Oid,
    pub input_collation: Oid,
    pub args: Vec<Node>,
    pub location: Location,
}

/// `scalar op ANY/ALL (array)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarArrayOpExpr {
    pub op_oid: Oid,
    pub func_oid: Oid,
    /// True for ANY, false for ALL
    pub use_or: bool,
    pub input_collation: Oid,
    pub args: Vec<Node>,
    pub location: Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoolExprType {
    And,
    Or,
    Not,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoolExpr {
    pub op: BoolExprType,
    pub args: Vec<Node>,
    pub location: Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubLinkType {
    Exists,
    All,
    Any,
    RowCompare,
    Expr,
    MultiExpr,
    Array,
    Cte,
}

/// Subselect appearing in an expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubLink {
    pub link_type: SubLinkType,
    /// Id for MULTIEXPR sublinks, 0 otherwise
    pub link_id: i32,
    /// Combining expression for ALL/ANY/ROWCOMPARE
    pub test_expr: Option<Node>,
    pub oper_name: Vec<String>,
    /// The subselect; a `Node::Query` once analyzed
    pub subselect: Node,
    pub location: Location,
}

/// Extract one field from a composite value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSelect {
    pub arg: Node,
    pub field_number: i16,
    pub result_type: Oid,
    pub typmod: i32,
    pub collation: Oid,
}

/// Composite value with some fields replaced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldStore {
    pub arg: Node,
    pub new_values: Vec<Node>,
    pub field_numbers: Vec<i16>,
    pub result_type: Oid,
}

/// Binary-compatible relabeling to another type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelabelType {
    pub arg: Node,
    pub result_type: Oid,
    pub typmod: i32,
    pub collation: Oid,
    pub format: CoercionForm,
    pub location: Location,
}

/// Coercion through text output/input functions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoerceViaIO {
    pub arg: Node,
    pub result_type: Oid,
    pub collation: Oid,
    pub format: CoercionForm,
    pub location: Location,
}

/// Per-element coercion of an array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayCoerceExpr {
    pub arg: Node,
    /// Element coercion function, invalid when relabeling only
    pub elem_func_oid: Oid,
    pub result_type: Oid,
    pub typmod: i32,
    pub collation: Oid,
    pub is_explicit: bool,
    pub format: CoercionForm,
    pub location: Location,
}

/// Conversion between two composite row types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertRowtypeExpr {
    pub arg: Node,
    pub result_type: Oid,
    pub format: CoercionForm,
    pub location: Location,
}

/// `expr COLLATE collation`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollateExpr {
    pub arg: Node,
    pub collation: Oid,
    pub location: Location,
}

/// One `WHEN expr THEN result` arm of a CASE
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseWhen {
    pub expr: Node,
    pub result: Node,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseExpr {
    pub case_type: Oid,
    pub collation: Oid,
    /// Implicit comparison argument, for the simple CASE form
    pub arg: Option<Node>,
    pub whens: Vec<CaseWhen>,
    pub default: Option<Node>,
    pub location: Location,
}

/// Placeholder for the value of a simple CASE's test argument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseTestExpr {
    pub type_oid: Oid,
    pub typmod: i32,
    pub collation: Oid,
}

/// `ARRAY[...]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayExpr {
    pub array_type: Oid,
    pub collation: Oid,
    pub element_type: Oid,
    pub elements: Vec<Node>,
    /// True if elements are sub-arrays
    pub multidims: bool,
    pub location: Location,
}

/// `ROW(...)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowExpr {
    pub args: Vec<Node>,
    pub row_type: Oid,
    pub format: CoercionForm,
    pub colnames: Vec<String>,
    pub location: Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RowCompareType {
    Lt,
    Le,
    Eq,
    Ge,
    Gt,
    Ne,
}

/// Pairwise comparison of two rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowCompareExpr {
    pub compare: RowCompareType,
    pub op_oids: Vec<Oid>,
    pub op_families: Vec<Oid>,
    pub input_collations: Vec<Oid>,
    pub left_args: Vec<Node>,
    pub right_args: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoalesceExpr {
    pub coalesce_type: Oid,
    pub collation: Oid,
    pub args: Vec<Node>,
    pub location: Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MinMaxOp {
    Greatest,
    Least,
}

/// GREATEST / LEAST
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMaxExpr {
    pub minmax_type: Oid,
    pub collation: Oid,
    pub input_collation: Oid,
    pub op: MinMaxOp,
    pub args: Vec<Node>,
    pub location: Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum XmlExprOp {
    Concat,
    Element,
    Forest,
    Parse,
    Pi,
    Root,
    Serialize,
    IsDocument,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum XmlOptionType {
    Document,
    Content,
}

/// XML function application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XmlExpr {
    pub op: XmlExprOp,
    pub name: Option<String>,
    pub named_args: Vec<Node>,
    pub arg_names: Vec<String>,
    pub args: Vec<Node>,
    pub xml_option: XmlOptionType,
    /// Target type for XMLSERIALIZE
    pub type_oid: Oid,
    pub typmod: i32,
    pub location: Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NullTestType {
    IsNull,
    IsNotNull,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NullTest {
    pub arg: Node,
    pub test: NullTestType,
    /// True to apply row-wise null semantics
    pub arg_is_row: bool,
    pub location: Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoolTestType {
    IsTrue,
    IsNotTrue,
    IsFalse,
    IsNotFalse,
    IsUnknown,
    IsNotUnknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BooleanTest {
    pub arg: Node,
    pub test: BoolTestType,
    pub location: Location,
}

/// Coercion to a domain type, checking its constraints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoerceToDomain {
    pub arg: Node,
    pub result_type: Oid,
    pub typmod: i32,
    pub collation: Oid,
    pub format: CoercionForm,
    pub location: Location,
}

/// Placeholder for the value being checked inside a domain constraint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoerceToDomainValue {
    pub type_oid: Oid,
    pub typmod: i32,
    pub collation: Oid,
    pub location: Location,
}

/// `DEFAULT` in INSERT or UPDATE
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetToDefault {
    pub type_oid: Oid,
    pub typmod: i32,
    pub collation: Oid,
    pub location: Location,
}

/// `WHERE CURRENT OF cursor`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentOfExpr {
    pub rtindex: u32,
    pub cursor_name: Option<String>,
    pub cursor_param: i32,
}

/// Arbiter index element of `ON CONFLICT`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceElem {
    pub expr: Node,
    pub collation: Oid,
    pub opclass: Oid,
}

/// An entry of a target list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetEntry {
    pub expr: Node,
    /// Column position, 1-based
    pub resno: i16,
    pub name: Option<String>,
    /// Nonzero if referenced by a sort/group clause
    pub sort_group_ref: u32,
    pub orig_table: Oid,
    pub orig_column: i16,
    /// True for helper columns not part of the output
    pub junk: bool,
}

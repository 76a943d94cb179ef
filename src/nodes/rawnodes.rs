//! Payloads of raw parse-tree nodes.
//!
//! These are what the grammar produces before analysis: names are unresolved,
//! types are unknown and syntactic sugar is still present.

use serde::{Deserialize, Serialize};

use super::{
    BoolTestType, JoinType, Location, MinMaxOp, NullTestType, OnConflictAction, RawNode,
    SetOperation, SubLinkType, XmlExprOp, XmlOptionType,
};

/// Literal value as written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Integer(i64),
    /// Kept as text so no precision is lost
    Float(String),
    String(String),
    BitString(String),
    Null,
}

/// `$n`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamRef {
    pub number: i32,
    pub location: Location,
}

/// A literal constant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AConst {
    pub val: Value,
    pub location: Location,
}

/// `*` in a column reference or target list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AStar;

/// Relation name as written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeVar {
    pub catalog: Option<String>,
    pub schema: Option<String>,
    pub relname: String,
    /// False for `ONLY table`
    pub inh: bool,
    /// An Alias
    pub alias: Option<RawNode>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawGroupingFunc {
    pub args: Vec<RawNode>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSubLink {
    pub link_type: SubLinkType,
    pub test_expr: Option<RawNode>,
    pub oper_name: Vec<String>,
    /// A SelectStmt
    pub subselect: RawNode,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCaseWhen {
    pub expr: RawNode,
    pub result: RawNode,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCaseExpr {
    pub arg: Option<RawNode>,
    pub whens: Vec<RawCaseWhen>,
    pub default: Option<RawNode>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRowExpr {
    pub args: Vec<RawNode>,
    /// True when written with the ROW keyword
    pub explicit_row: bool,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCoalesceExpr {
    pub args: Vec<RawNode>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMinMaxExpr {
    pub op: MinMaxOp,
    pub args: Vec<RawNode>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawXmlExpr {
    pub op: XmlExprOp,
    pub name: Option<String>,
    /// ResTarget nodes
    pub named_args: Vec<RawNode>,
    pub args: Vec<RawNode>,
    pub xml_option: XmlOptionType,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawNullTest {
    pub arg: RawNode,
    pub test: NullTestType,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBooleanTest {
    pub arg: RawNode,
    pub test: BoolTestType,
    pub location: Location,
}

/// `larg JOIN rarg ON quals` as written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawJoinExpr {
    pub join_type: JoinType,
    pub is_natural: bool,
    pub larg: RawNode,
    pub rarg: RawNode,
    pub using: Vec<String>,
    pub quals: Option<RawNode>,
    pub alias: Option<RawNode>,
}

/// Target of `SELECT INTO` / `CREATE TABLE AS`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntoClause {
    /// A RangeVar
    pub rel: RawNode,
    pub col_names: Vec<String>,
    /// Only set for materialized views, and never by the grammar
    pub view_query: Option<RawNode>,
    pub skip_data: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertStmt {
    pub relation: RawNode,
    /// ResTarget nodes naming the target columns
    pub cols: Vec<RawNode>,
    pub select_stmt: Option<RawNode>,
    pub on_conflict: Option<RawNode>,
    pub returning_list: Vec<RawNode>,
    pub with_clause: Option<RawNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteStmt {
    pub relation: RawNode,
    pub using_clause: Vec<RawNode>,
    pub where_clause: Option<RawNode>,
    pub returning_list: Vec<RawNode>,
    pub with_clause: Option<RawNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStmt {
    pub relation: RawNode,
    pub target_list: Vec<RawNode>,
    pub where_clause: Option<RawNode>,
    pub from_clause: Vec<RawNode>,
    pub returning_list: Vec<RawNode>,
    pub with_clause: Option<RawNode>,
}

/// SELECT, VALUES or a set operation over two SelectStmts
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SelectStmt {
    pub distinct_clause: Vec<RawNode>,
    pub into_clause: Option<RawNode>,
    pub target_list: Vec<RawNode>,
    pub from_clause: Vec<RawNode>,
    pub where_clause: Option<RawNode>,
    pub group_clause: Vec<RawNode>,
    pub having_clause: Option<RawNode>,
    pub window_clause: Vec<RawNode>,
    /// One List per VALUES row
    pub values_lists: Vec<RawNode>,
    pub sort_clause: Vec<RawNode>,
    pub limit_offset: Option<RawNode>,
    pub limit_count: Option<RawNode>,
    pub locking_clause: Vec<RawNode>,
    pub with_clause: Option<RawNode>,
    pub op: Option<SetOperation>,
    pub all: bool,
    pub larg: Option<RawNode>,
    pub rarg: Option<RawNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AExprKind {
    Op,
    OpAny,
    OpAll,
    Distinct,
    NullIf,
    Of,
    In,
    Like,
    ILike,
    Similar,
    Between,
    NotBetween,
    BetweenSym,
    NotBetweenSym,
}

/// Infix, prefix or postfix operator expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AExpr {
    pub kind: AExprKind,
    pub name: Vec<String>,
    pub lexpr: Option<RawNode>,
    pub rexpr: Option<RawNode>,
    pub location: Location,
}

/// Possibly qualified column reference; fields are String values or AStar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRef {
    pub fields: Vec<RawNode>,
    pub location: Location,
}

/// Function call as written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuncCall {
    pub funcname: Vec<String>,
    pub args: Vec<RawNode>,
    pub agg_order: Vec<RawNode>,
    pub agg_filter: Option<RawNode>,
    pub agg_within_group: bool,
    pub agg_star: bool,
    pub agg_distinct: bool,
    pub func_variadic: bool,
    /// A WindowDef for `OVER (...)`
    pub over: Option<RawNode>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawNamedArgExpr {
    pub arg: RawNode,
    pub name: String,
    pub location: Location,
}

/// `[uidx]` or `[lidx:uidx]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AIndices {
    pub lidx: Option<RawNode>,
    pub uidx: Option<RawNode>,
}

/// Subscripts and field selections applied to an expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AIndirection {
    pub arg: RawNode,
    pub indirection: Vec<RawNode>,
}

/// `ARRAY[...]` or a nested `[...]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AArrayExpr {
    pub elements: Vec<RawNode>,
    pub location: Location,
}

/// Target list item, or assignment target in UPDATE/INSERT
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResTarget {
    pub name: Option<String>,
    pub indirection: Vec<RawNode>,
    pub val: Option<RawNode>,
    pub location: Location,
}

/// Element of `(a, b) = (subselect)` in UPDATE
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiAssignRef {
    pub source: RawNode,
    pub colno: i32,
    pub ncolumns: i32,
}

/// `arg::type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeCast {
    pub arg: RawNode,
    /// A TypeName
    pub type_name: RawNode,
    pub location: Location,
}

/// `arg COLLATE name`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollateClause {
    pub arg: Option<RawNode>,
    pub collname: Vec<String>,
    pub location: Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortByDir {
    Default,
    Asc,
    Desc,
    Using,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortByNulls {
    Default,
    First,
    Last,
}

/// ORDER BY item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortBy {
    pub node: RawNode,
    pub dir: SortByDir,
    pub nulls: SortByNulls,
    pub use_op: Vec<String>,
    pub location: Location,
}

/// `OVER (...)` or a WINDOW clause entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowDef {
    pub name: Option<String>,
    pub refname: Option<String>,
    pub partition_clause: Vec<RawNode>,
    pub order_clause: Vec<RawNode>,
    pub frame_options: i32,
    pub start_offset: Option<RawNode>,
    pub end_offset: Option<RawNode>,
    pub location: Location,
}

/// Subquery in FROM
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeSubselect {
    pub lateral: bool,
    pub subquery: RawNode,
    pub alias: Option<RawNode>,
}

/// Function call(s) in FROM
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeFunction {
    pub lateral: bool,
    pub ordinality: bool,
    pub is_rowsfrom: bool,
    /// One List per function: the call and its column definitions
    pub functions: Vec<RawNode>,
    pub alias: Option<RawNode>,
    /// ColumnDef nodes
    pub coldeflist: Vec<RawNode>,
}

/// `relation TABLESAMPLE method(args) [REPEATABLE (seed)]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeTableSample {
    pub relation: RawNode,
    pub method: Vec<String>,
    pub args: Vec<RawNode>,
    pub repeatable: Option<RawNode>,
    pub location: Location,
}

/// Type name as written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeName {
    pub names: Vec<String>,
    pub setof: bool,
    pub pct_type: bool,
    /// Modifier expressions, e.g. `(10, 2)`
    pub typmods: Vec<RawNode>,
    /// Array bounds as Integer values, -1 when unspecified
    pub array_bounds: Vec<RawNode>,
    pub location: Location,
}

/// Column definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub colname: String,
    pub type_name: Option<RawNode>,
    pub raw_default: Option<RawNode>,
    pub coll_clause: Option<RawNode>,
    pub is_not_null: bool,
    pub location: Location,
}

/// Index column or arbiter element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexElem {
    pub name: Option<String>,
    pub expr: Option<RawNode>,
    pub indexcolname: Option<String>,
    pub collation: Vec<String>,
    pub opclass: Vec<String>,
    pub ordering: SortByDir,
    pub nulls_ordering: SortByNulls,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupingSetKind {
    Empty,
    Simple,
    Rollup,
    Cube,
    Sets,
}

/// `ROLLUP`, `CUBE`, `GROUPING SETS` or `()`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupingSet {
    pub kind: GroupingSetKind,
    pub content: Vec<RawNode>,
    pub location: Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LockClauseStrength {
    KeyShare,
    Share,
    NoKeyUpdate,
    Update,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LockWaitPolicy {
    Block,
    Skip,
    Error,
}

/// `FOR UPDATE` and friends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockingClause {
    /// RangeVar nodes, empty for all tables
    pub locked_rels: Vec<RawNode>,
    pub strength: LockClauseStrength,
    pub wait_policy: LockWaitPolicy,
}

/// `XMLSERIALIZE(... expr AS type)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XmlSerialize {
    pub xml_option: XmlOptionType,
    pub expr: RawNode,
    pub type_name: RawNode,
    pub location: Location,
}

/// `WITH [RECURSIVE] ctes`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithClause {
    pub ctes: Vec<RawNode>,
    pub recursive: bool,
    pub location: Location,
}

/// Arbiter specification of `ON CONFLICT`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferClause {
    pub index_elems: Vec<RawNode>,
    pub where_clause: Option<RawNode>,
    pub conname: Option<String>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnConflictClause {
    pub action: OnConflictAction,
    pub infer: Option<RawNode>,
    pub target_list: Vec<RawNode>,
    pub where_clause: Option<RawNode>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCommonTableExpr {
    pub name: String,
    pub aliascolnames: Vec<String>,
    /// A SelectStmt, InsertStmt, UpdateStmt or DeleteStmt
    pub ctequery: RawNode,
    pub location: Location,
}

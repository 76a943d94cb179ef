//! Query-level structures: the analyzed statement, its range table and the
//! clause nodes hanging off it.

use serde::{Deserialize, Serialize};

use super::{Location, Node};
use crate::types::Oid;

/// Reference to a range-table entry inside a join tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeTblRef {
    pub rtindex: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum JoinType {
    #[default]
    Inner,
    Left,
    Full,
    Right,
    Semi,
    Anti,
}

/// An explicit join in the join tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinExpr {
    pub join_type: JoinType,
    pub is_natural: bool,
    pub left: Node,
    pub right: Node,
    pub using: Vec<String>,
    pub quals: Option<Node>,
    pub alias: Option<Alias>,
    /// Range-table index of the join's own entry, 0 if none
    pub rtindex: u32,
}

/// The FROM list plus WHERE qualification of a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FromExpr {
    pub from_list: Vec<Node>,
    pub quals: Option<Node>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OnConflictAction {
    None,
    Nothing,
    Update,
}

/// `INSERT ... ON CONFLICT` clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnConflictExpr {
    pub action: OnConflictAction,
    /// Unique index arbiter expressions
    pub arbiter_elems: Vec<Node>,
    pub arbiter_where: Option<Node>,
    /// Named constraint arbiter
    pub constraint: Oid,
    /// `DO UPDATE SET` target list
    pub set_list: Vec<Node>,
    pub where_clause: Option<Node>,
    pub excluded_rtindex: u32,
    pub excluded_tlist: Vec<Node>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetOperation {
    Union,
    Intersect,
    Except,
}

/// A node of the set-operation tree of a UNION/INTERSECT/EXCEPT query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetOperationStmt {
    pub op: SetOperation,
    pub all: bool,
    /// Children are RangeTblRef or nested SetOperationStmt
    pub left: Node,
    pub right: Node,
    pub col_types: Vec<Oid>,
    pub col_typmods: Vec<i32>,
    pub col_collations: Vec<Oid>,
    pub group_clauses: Vec<Node>,
}

/// One sort, group or distinct key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortGroupClause {
    /// Matches a target entry's `sort_group_ref`
    pub tle_sort_group_ref: u32,
    pub eq_op: Oid,
    pub sort_op: Oid,
    pub nulls_first: bool,
    pub hashable: bool,
}

/// A WINDOW clause entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowClause {
    pub name: Option<String>,
    pub ref_name: Option<String>,
    pub partition_clause: Vec<Node>,
    pub order_clause: Vec<Node>,
    pub frame_options: i32,
    pub start_offset: Option<Node>,
    pub end_offset: Option<Node>,
    pub winref: u32,
    pub copied_order: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WcoKind {
    ViewCheck,
    RlsInsertCheck,
    RlsUpdateCheck,
    RlsConflictCheck,
}

/// Constraint from a view's WITH CHECK OPTION or a row-level security policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithCheckOption {
    pub kind: WcoKind,
    pub relname: String,
    pub polname: Option<String>,
    pub qual: Node,
    pub cascaded: bool,
}

/// A WITH list element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommonTableExpr {
    pub name: String,
    pub alias_colnames: Vec<String>,
    /// The CTE's query; a `Node::Query` once analyzed
    pub query: Node,
    pub location: Location,
    pub recursive: bool,
    pub refcount: i32,
    pub colnames: Vec<String>,
    pub coltypes: Vec<Oid>,
    pub coltypmods: Vec<i32>,
    pub colcollations: Vec<Oid>,
}

/// One function of a function range-table entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeTblFunction {
    pub func_expr: Node,
    pub col_count: i32,
    /// Column definition list, only for functions returning RECORD
    pub colnames: Vec<String>,
    pub coltypes: Vec<Oid>,
    pub coltypmods: Vec<i32>,
    pub colcollations: Vec<Oid>,
}

/// `TABLESAMPLE method(args) [REPEATABLE (seed)]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSampleClause {
    pub handler: Oid,
    pub args: Vec<Node>,
    pub repeatable: Option<Node>,
}

/// Table or column alias
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Alias {
    pub name: String,
    pub colnames: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CmdType {
    #[default]
    Select,
    Insert,
    Update,
    Delete,
    Utility,
}

/// An analyzed statement.
///
/// `rtable` holds `Node::RangeTblEntry` values, `cte_list` holds
/// `Node::CommonTableExpr` values and `jointree` is a `Node::FromExpr`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Query {
    pub command_type: CmdType,
    pub can_set_tag: bool,
    /// Target relation index for INSERT/UPDATE/DELETE, 0 for SELECT
    pub result_relation: u32,
    pub has_aggs: bool,
    pub has_window_funcs: bool,
    pub has_sub_links: bool,
    pub has_distinct_on: bool,
    pub has_recursive: bool,
    pub has_modifying_cte: bool,
    pub has_for_update: bool,
    pub cte_list: Vec<Node>,
    pub rtable: Vec<Node>,
    pub jointree: Option<Node>,
    pub target_list: Vec<Node>,
    pub with_check_options: Vec<Node>,
    pub on_conflict: Option<Node>,
    pub returning_list: Vec<Node>,
    pub group_clause: Vec<Node>,
    pub having_qual: Option<Node>,
    pub window_clause: Vec<Node>,
    pub distinct_clause: Vec<Node>,
    pub sort_clause: Vec<Node>,
    pub limit_offset: Option<Node>,
    pub limit_count: Option<Node>,
    pub set_operations: Option<Node>,
}

/// What a range-table entry refers to, with the kind-specific payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RteKind {
    /// Ordinary table
    Relation {
        rel_id: Oid,
        /// `'r'` table, `'v'` view and so on
        rel_kind: char,
        tablesample: Option<Node>,
    },
    /// Subquery in FROM
    Subquery {
        /// A `Node::Query`
        subquery: Node,
        security_barrier: bool,
    },
    /// Join; its columns are aliases of the joined inputs' columns
    Join {
        join_type: JoinType,
        join_alias_vars: Vec<Node>,
    },
    /// Function(s) in FROM
    Function {
        /// `Node::RangeTblFunction` values
        functions: Vec<Node>,
        ordinality: bool,
    },
    /// VALUES list in FROM
    Values {
        /// One `Node::List` per row
        values_lists: Vec<Node>,
        collations: Vec<Oid>,
    },
    /// Reference to a WITH list entry
    Cte {
        name: String,
        levels_up: u32,
        self_reference: bool,
        coltypes: Vec<Oid>,
        coltypmods: Vec<i32>,
        colcollations: Vec<Oid>,
    },
}

impl RteKind {
    pub fn name(&self) -> &'static str {
        match self {
            RteKind::Relation { .. } => "relation",
            RteKind::Subquery { .. } => "subquery",
            RteKind::Join { .. } => "join",
            RteKind::Function { .. } => "function",
            RteKind::Values { .. } => "values",
            RteKind::Cte { .. } => "cte",
        }
    }
}

/// Range-table entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeTblEntry {
    pub kind: RteKind,
    pub alias: Option<Alias>,
    /// Effective names of the entry and its columns
    pub eref: Alias,
    pub lateral: bool,
    pub inh: bool,
    pub in_from_clause: bool,
    /// Row-level security barrier quals, applied before the entry's own
    pub security_quals: Vec<Node>,
}

impl RangeTblEntry {
    /// The subquery of a subquery entry
    pub fn subquery(&self) -> Option<&Query> {
        match &self.kind {
            RteKind::Subquery { subquery, .. } => subquery.as_query(),
            _ => None,
        }
    }
}

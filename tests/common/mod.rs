#![allow(dead_code)]

use pgtree::TreeError;
use pgtree::nodes::makefuncs::*;
use pgtree::nodes::*;
use pgtree::types::{BOOL_OID, INT4_OID, Oid};
use pgtree::walker::{TraversalFlags, WalkControl, walk_query};

pub const INT4PL_OP: Oid = 551;
pub const INT4PL_FUNC: Oid = 177;
pub const INT4GT_OP: Oid = 521;
pub const INT4GT_FUNC: Oid = 147;

/// Column `attno` of range-table entry `rtindex`, typed int4
pub fn int4_var(rtindex: u32, attno: i16) -> Node {
    make_var(rtindex, attno, INT4_OID, -1, 0, 0)
}

pub fn int4_plus(left: Node, right: Node) -> Node {
    make_op_expr(INT4PL_OP, INT4PL_FUNC, INT4_OID, left, right)
}

pub fn int4_gt(left: Node, right: Node) -> Node {
    make_op_expr(INT4GT_OP, INT4GT_FUNC, BOOL_OID, left, right)
}

pub fn relation_rte(name: &str, rel_id: Oid, columns: &[&str]) -> Node {
    RangeTblEntry {
        kind: RteKind::Relation {
            rel_id,
            rel_kind: 'r',
            tablesample: None,
        },
        alias: None,
        eref: make_alias(name, columns),
        lateral: false,
        inh: true,
        in_from_clause: true,
        security_quals: vec![],
    }
    .into()
}

pub fn subquery_rte(name: &str, subquery: Query) -> Node {
    RangeTblEntry {
        kind: RteKind::Subquery {
            subquery: subquery.into(),
            security_barrier: false,
        },
        alias: Some(make_alias(name, &[])),
        eref: make_alias(name, &["x"]),
        lateral: false,
        inh: false,
        in_from_clause: true,
        security_quals: vec![],
    }
    .into()
}

pub fn join_rte(join_alias_vars: Vec<Node>) -> Node {
    RangeTblEntry {
        kind: RteKind::Join {
            join_type: JoinType::Inner,
            join_alias_vars,
        },
        alias: None,
        eref: make_alias("unnamed_join", &["a", "b"]),
        lateral: false,
        inh: false,
        in_from_clause: true,
        security_quals: vec![],
    }
    .into()
}

pub fn function_rte(func_expr: Node) -> Node {
    RangeTblEntry {
        kind: RteKind::Function {
            functions: vec![
                RangeTblFunction {
                    func_expr,
                    col_count: 1,
                    colnames: vec![],
                    coltypes: vec![],
                    coltypmods: vec![],
                    colcollations: vec![],
                }
                .into(),
            ],
            ordinality: false,
        },
        alias: None,
        eref: make_alias("f", &["f"]),
        lateral: false,
        inh: false,
        in_from_clause: true,
        security_quals: vec![],
    }
    .into()
}

pub fn values_rte(rows: Vec<Vec<Node>>) -> Node {
    RangeTblEntry {
        kind: RteKind::Values {
            values_lists: rows.into_iter().map(Node::List).collect(),
            collations: vec![0],
        },
        alias: None,
        eref: make_alias("*VALUES*", &["column1"]),
        lateral: false,
        inh: false,
        in_from_clause: true,
        security_quals: vec![],
    }
    .into()
}

pub fn cte_rte(name: &str) -> Node {
    RangeTblEntry {
        kind: RteKind::Cte {
            name: name.to_string(),
            levels_up: 0,
            self_reference: false,
            coltypes: vec![INT4_OID],
            coltypmods: vec![-1],
            colcollations: vec![0],
        },
        alias: None,
        eref: make_alias(name, &["x"]),
        lateral: false,
        inh: false,
        in_from_clause: true,
        security_quals: vec![],
    }
    .into()
}

pub fn cte(name: &str, query: Query) -> Node {
    CommonTableExpr {
        name: name.to_string(),
        alias_colnames: vec![],
        query: query.into(),
        location: None,
        recursive: false,
        refcount: 1,
        colnames: vec!["x".into()],
        coltypes: vec![INT4_OID],
        coltypmods: vec![-1],
        colcollations: vec![0],
    }
    .into()
}

pub fn from_rtindexes(rtindexes: &[u32], quals: Option<Node>) -> Node {
    FromExpr {
        from_list: rtindexes
            .iter()
            .map(|&rtindex| RangeTblRef { rtindex }.into())
            .collect(),
        quals,
    }
    .into()
}

/// `SELECT <value>` with no FROM clause
pub fn select_value(value: i32) -> Query {
    Query {
        can_set_tag: true,
        target_list: vec![make_target_entry(make_int4_const(value), 1, Some("x"), false)],
        jointree: Some(from_rtindexes(&[], None)),
        ..Default::default()
    }
}

/// `SELECT a + 1 FROM t WHERE a > 0`
pub fn select_a_plus_one() -> Query {
    Query {
        can_set_tag: true,
        rtable: vec![relation_rte("t", 16384, &["a"])],
        jointree: Some(from_rtindexes(&[1], Some(int4_gt(int4_var(1, 1), make_int4_const(0))))),
        target_list: vec![make_target_entry(
            int4_plus(int4_var(1, 1), make_int4_const(1)),
            1,
            Some("?column?"),
            false,
        )],
        ..Default::default()
    }
}

/// `WITH w AS (SELECT 1) SELECT s.x FROM w, (SELECT 2) s`
pub fn select_from_cte_and_subquery() -> Query {
    Query {
        can_set_tag: true,
        cte_list: vec![cte("w", select_value(1))],
        rtable: vec![cte_rte("w"), subquery_rte("s", select_value(2))],
        jointree: Some(from_rtindexes(&[1, 2], None)),
        target_list: vec![make_target_entry(int4_var(2, 1), 1, Some("x"), false)],
        ..Default::default()
    }
}

/// Kinds of every node below `query`, in visiting order
pub fn visited_kinds(query: &Query, flags: TraversalFlags) -> Vec<NodeTag> {
    let mut kinds = Vec::new();
    walk_query(query, flags, |node| {
        kinds.push(node.tag());
        Ok::<_, TreeError>(WalkControl::Continue)
    })
    .unwrap();
    kinds
}

/// `NOT NOT ... true`, nested `depth` times
pub fn nested_not(depth: usize) -> Node {
    let mut node = make_bool_const(true);
    for _ in 0..depth {
        node = make_bool_expr(BoolExprType::Not, vec![node], None);
    }
    node
}

/// `((1 + 1) + 1) + ...`, nested `depth` times
pub fn left_deep_sum(depth: usize) -> Node {
    let mut node = make_int4_const(1);
    for _ in 0..depth {
        node = int4_plus(node, make_int4_const(1));
    }
    node
}

/// Run `f` on a thread with a 2 MiB stack
pub fn on_small_stack<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
    std::thread::Builder::new()
        .stack_size(2 << 20)
        .spawn(f)
        .unwrap()
        .join()
        .unwrap()
}

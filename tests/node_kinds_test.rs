mod common;

use std::collections::BTreeSet;

use common::*;
use pretty_assertions::assert_eq;

use pgtree::TreeError;
use pgtree::nodes::makefuncs::*;
use pgtree::nodes::*;
use pgtree::nodes::{NodeTag as T, RawNodeTag as R};
use pgtree::types::collation::C_COLLATION_OID;
use pgtree::types::{BOOL_OID, INT4_OID, Oid, PgType, RECORD_OID, TEXT_OID};
use pgtree::walker::{
    TraversalFlags, TreeMutator, TreeWalker, WalkControl, expression_tree_mutator, expression_tree_walker,
    mutate_query, mutate_tree, query_tree_mutator, query_tree_walker, walk_query, walk_raw_tree, walk_tree,
};

const INT4_ARRAY_OID: Oid = PgType::Int4Array as Oid;

const ALL_NODE_TAGS: [NodeTag; 52] = [
    T::Var,
    T::Const,
    T::Param,
    T::Aggref,
    T::GroupingFunc,
    T::WindowFunc,
    T::ArrayRef,
    T::FuncExpr,
    T::NamedArgExpr,
    T::OpExpr,
    T::DistinctExpr,
    T::NullIfExpr,
    T::ScalarArrayOpExpr,
    T::BoolExpr,
    T::SubLink,
    T::FieldSelect,
    T::FieldStore,
    T::RelabelType,
    T::CoerceViaIO,
    T::ArrayCoerceExpr,
    T::ConvertRowtypeExpr,
    T::CollateExpr,
    T::CaseExpr,
    T::CaseTestExpr,
    T::ArrayExpr,
    T::RowExpr,
    T::RowCompareExpr,
    T::CoalesceExpr,
    T::MinMaxExpr,
    T::XmlExpr,
    T::NullTest,
    T::BooleanTest,
    T::CoerceToDomain,
    T::CoerceToDomainValue,
    T::SetToDefault,
    T::CurrentOfExpr,
    T::InferenceElem,
    T::TargetEntry,
    T::RangeTblRef,
    T::JoinExpr,
    T::FromExpr,
    T::OnConflictExpr,
    T::SetOperationStmt,
    T::SortGroupClause,
    T::WindowClause,
    T::WithCheckOption,
    T::CommonTableExpr,
    T::RangeTblFunction,
    T::TableSampleClause,
    T::Query,
    T::RangeTblEntry,
    T::List,
];

const ALL_RAW_TAGS: [RawNodeTag; 50] = [
    R::Value,
    R::ParamRef,
    R::AConst,
    R::AStar,
    R::Alias,
    R::RangeVar,
    R::GroupingFunc,
    R::SubLink,
    R::CaseExpr,
    R::RowExpr,
    R::CoalesceExpr,
    R::MinMaxExpr,
    R::XmlExpr,
    R::NullTest,
    R::BooleanTest,
    R::JoinExpr,
    R::IntoClause,
    R::InsertStmt,
    R::DeleteStmt,
    R::UpdateStmt,
    R::SelectStmt,
    R::AExpr,
    R::ColumnRef,
    R::FuncCall,
    R::NamedArgExpr,
    R::AIndices,
    R::AIndirection,
    R::AArrayExpr,
    R::ResTarget,
    R::MultiAssignRef,
    R::TypeCast,
    R::CollateClause,
    R::SortBy,
    R::WindowDef,
    R::RangeSubselect,
    R::RangeFunction,
    R::RangeTableSample,
    R::TypeName,
    R::ColumnDef,
    R::IndexElem,
    R::GroupingSet,
    R::LockingClause,
    R::XmlSerialize,
    R::WithClause,
    R::InferClause,
    R::OnConflictClause,
    R::CommonTableExpr,
    R::SetToDefault,
    R::CurrentOfExpr,
    R::List,
];

fn c(value: i32) -> Node {
    make_int4_const(value)
}

fn var() -> Node {
    int4_var(1, 1)
}

fn tle(expr: Node) -> Node {
    make_target_entry(expr, 1, None, false)
}

fn rtref(rtindex: u32) -> Node {
    RangeTblRef { rtindex }.into()
}

fn sort_group(tle_sort_group_ref: u32) -> Node {
    SortGroupClause {
        tle_sort_group_ref,
        eq_op: 96,
        sort_op: 97,
        nulls_first: false,
        hashable: true,
    }
    .into()
}

fn int4_eq(args: Vec<Node>) -> OpExpr {
    OpExpr {
        op_oid: 96,
        func_oid: 65,
        result_type: BOOL_OID,
        returns_set: false,
        collation: 0,
        input_collation: 0,
        args,
        location: None,
    }
}

fn param(kind: ParamKind) -> Node {
    Param {
        kind,
        id: 1,
        type_oid: INT4_OID,
        typmod: -1,
        collation: 0,
        location: None,
    }
    .into()
}

/// One target entry per expression kind, in target-list order
fn expression_targets() -> Vec<Node> {
    let exprs: Vec<Node> = vec![
        param(ParamKind::Extern),
        Aggref {
            func_oid: 2147,
            result_type: INT4_OID,
            collation: 0,
            input_collation: 0,
            direct_args: vec![c(1)],
            args: vec![tle(var())],
            order: vec![sort_group(1)],
            distinct: vec![sort_group(1)],
            filter: Some(make_bool_const(true)),
            star: false,
            variadic: false,
            kind: AggKind::Normal,
            levels_up: 0,
            location: None,
        }
        .into(),
        GroupingFunc {
            args: vec![var()],
            refs: vec![1],
            cols: vec![1],
            levels_up: 0,
            location: None,
        }
        .into(),
        WindowFunc {
            func_oid: 3100,
            result_type: INT4_OID,
            collation: 0,
            input_collation: 0,
            args: vec![c(1)],
            filter: None,
            winref: 1,
            star: false,
            is_agg: false,
            location: None,
        }
        .into(),
        ArrayRef {
            array_type: INT4_ARRAY_OID,
            element_type: INT4_OID,
            typmod: -1,
            collation: 0,
            upper_index: vec![c(2)],
            lower_index: vec![c(1)],
            expr: make_var(1, 2, INT4_ARRAY_OID, -1, 0, 0),
            assign_expr: Some(c(3)),
        }
        .into(),
        make_func_expr(
            1,
            INT4_OID,
            vec![
                NamedArgExpr {
                    arg: c(1),
                    name: "x".into(),
                    arg_number: 0,
                    location: None,
                }
                .into(),
            ],
            0,
            0,
            CoercionForm::ExplicitCall,
        ),
        Node::DistinctExpr(Box::new(int4_eq(vec![var(), c(1)]))),
        Node::NullIfExpr(Box::new(int4_eq(vec![var(), c(1)]))),
        ScalarArrayOpExpr {
            op_oid: 96,
            func_oid: 65,
            use_or: true,
            input_collation: 0,
            args: vec![
                var(),
                ArrayExpr {
                    array_type: INT4_ARRAY_OID,
                    collation: 0,
                    element_type: INT4_OID,
                    elements: vec![c(1), c(2)],
                    multidims: false,
                    location: None,
                }
                .into(),
            ],
            location: None,
        }
        .into(),
        make_bool_expr(
            BoolExprType::And,
            vec![
                SubLink {
                    link_type: SubLinkType::Any,
                    link_id: 0,
                    test_expr: Some(int4_eq(vec![var(), param(ParamKind::Sublink)]).into()),
                    oper_name: vec!["=".into()],
                    subselect: select_value(5).into(),
                    location: None,
                }
                .into(),
                CurrentOfExpr {
                    rtindex: 1,
                    cursor_name: Some("c".into()),
                    cursor_param: 0,
                }
                .into(),
            ],
            None,
        ),
        FieldSelect {
            arg: var(),
            field_number: 1,
            result_type: INT4_OID,
            typmod: -1,
            collation: 0,
        }
        .into(),
        FieldStore {
            arg: var(),
            new_values: vec![c(1)],
            field_numbers: vec![1],
            result_type: RECORD_OID,
        }
        .into(),
        make_relabel_type(
            CoerceViaIO {
                arg: ArrayCoerceExpr {
                    arg: ConvertRowtypeExpr {
                        arg: var(),
                        result_type: RECORD_OID,
                        format: CoercionForm::ImplicitCast,
                        location: None,
                    }
                    .into(),
                    elem_func_oid: 0,
                    result_type: INT4_ARRAY_OID,
                    typmod: -1,
                    collation: 0,
                    is_explicit: false,
                    format: CoercionForm::ImplicitCast,
                    location: None,
                }
                .into(),
                result_type: TEXT_OID,
                collation: 100,
                format: CoercionForm::ImplicitCast,
                location: None,
            }
            .into(),
            TEXT_OID,
            -1,
            100,
            CoercionForm::ImplicitCast,
        ),
        CollateExpr {
            arg: CaseExpr {
                case_type: INT4_OID,
                collation: 0,
                arg: Some(var()),
                whens: vec![CaseWhen {
                    expr: int4_eq(vec![
                        CaseTestExpr {
                            type_oid: INT4_OID,
                            typmod: -1,
                            collation: 0,
                        }
                        .into(),
                        c(1),
                    ])
                    .into(),
                    result: c(2),
                    location: None,
                }],
                default: Some(c(3)),
                location: None,
            }
            .into(),
            collation: C_COLLATION_OID,
            location: None,
        }
        .into(),
        RowExpr {
            args: vec![c(1), var()],
            row_type: RECORD_OID,
            format: CoercionForm::ExplicitCall,
            colnames: vec![],
            location: None,
        }
        .into(),
        RowCompareExpr {
            compare: RowCompareType::Lt,
            op_oids: vec![97],
            op_families: vec![1976],
            input_collations: vec![0],
            left_args: vec![var()],
            right_args: vec![c(1)],
        }
        .into(),
        CoalesceExpr {
            coalesce_type: INT4_OID,
            collation: 0,
            args: vec![var(), c(1)],
            location: None,
        }
        .into(),
        MinMaxExpr {
            minmax_type: INT4_OID,
            collation: 0,
            input_collation: 0,
            op: MinMaxOp::Greatest,
            args: vec![c(1), c(2)],
            location: None,
        }
        .into(),
        XmlExpr {
            op: XmlExprOp::Forest,
            name: None,
            named_args: vec![c(1)],
            arg_names: vec!["a".into()],
            args: vec![c(2)],
            xml_option: XmlOptionType::Content,
            type_oid: 0,
            typmod: -1,
            location: None,
        }
        .into(),
        NullTest {
            arg: BooleanTest {
                arg: make_bool_const(true),
                test: BoolTestType::IsTrue,
                location: None,
            }
            .into(),
            test: NullTestType::IsNull,
            arg_is_row: false,
            location: None,
        }
        .into(),
        CoerceToDomain {
            arg: CoerceToDomainValue {
                type_oid: INT4_OID,
                typmod: -1,
                collation: 0,
                location: None,
            }
            .into(),
            result_type: 70000,
            typmod: -1,
            collation: 0,
            format: CoercionForm::ImplicitCast,
            location: None,
        }
        .into(),
        SetToDefault {
            type_oid: INT4_OID,
            typmod: -1,
            collation: 0,
            location: None,
        }
        .into(),
    ];
    exprs.into_iter().map(tle).collect()
}

fn sampled_relation_rte() -> Node {
    let mut entry = relation_rte("t", 16384, &["a"]);
    if let Node::RangeTblEntry(rte) = &mut entry {
        rte.kind = RteKind::Relation {
            rel_id: 16384,
            rel_kind: 'r',
            tablesample: Some(
                TableSampleClause {
                    handler: 3313,
                    args: vec![c(10)],
                    repeatable: Some(c(42)),
                }
                .into(),
            ),
        };
        rte.security_quals = vec![var()];
    }
    entry
}

/// A statement holding every clause the query walker visits
fn every_clause_query() -> Query {
    Query {
        command_type: CmdType::Insert,
        can_set_tag: true,
        result_relation: 1,
        cte_list: vec![cte("w", select_value(7))],
        rtable: vec![
            sampled_relation_rte(),
            subquery_rte("s", select_value(6)),
            join_rte(vec![var()]),
            function_rte(make_func_expr(1, INT4_OID, vec![c(1)], 0, 0, CoercionForm::ExplicitCall)),
            values_rte(vec![vec![c(1), c(2)]]),
            cte_rte("w"),
        ],
        jointree: Some(
            FromExpr {
                from_list: vec![
                    JoinExpr {
                        join_type: JoinType::Inner,
                        is_natural: false,
                        left: rtref(1),
                        right: rtref(2),
                        using: vec![],
                        quals: Some(c(1)),
                        alias: None,
                        rtindex: 3,
                    }
                    .into(),
                ],
                quals: Some(c(2)),
            }
            .into(),
        ),
        target_list: expression_targets(),
        with_check_options: vec![
            WithCheckOption {
                kind: WcoKind::ViewCheck,
                relname: "v".into(),
                polname: None,
                qual: var(),
                cascaded: false,
            }
            .into(),
        ],
        on_conflict: Some(
            OnConflictExpr {
                action: OnConflictAction::Update,
                arbiter_elems: vec![
                    InferenceElem {
                        expr: var(),
                        collation: 0,
                        opclass: 0,
                    }
                    .into(),
                ],
                arbiter_where: Some(c(1)),
                constraint: 0,
                set_list: vec![tle(c(2))],
                where_clause: Some(c(3)),
                excluded_rtindex: 2,
                excluded_tlist: vec![tle(var())],
            }
            .into(),
        ),
        returning_list: vec![tle(var())],
        having_qual: Some(c(4)),
        limit_offset: Some(c(5)),
        limit_count: Some(c(6)),
        set_operations: Some(
            SetOperationStmt {
                op: SetOperation::Union,
                all: false,
                left: rtref(1),
                right: rtref(2),
                col_types: vec![INT4_OID],
                col_typmods: vec![-1],
                col_collations: vec![0],
                group_clauses: vec![],
            }
            .into(),
        ),
        ..Default::default()
    }
}

fn window_clause() -> Node {
    WindowClause {
        name: Some("w".into()),
        ref_name: None,
        partition_clause: vec![var()],
        order_clause: vec![sort_group(1)],
        frame_options: 0,
        start_offset: Some(c(1)),
        end_offset: Some(c(2)),
        winref: 1,
        copied_order: false,
    }
    .into()
}

/// A tree with at least one node of every analyzed kind
fn every_kind_tree() -> Node {
    Node::List(vec![every_clause_query().into(), window_clause()])
}

fn expected_every_kind_visits() -> Vec<NodeTag> {
    [
        vec![T::List, T::Query],
        // target list
        vec![T::TargetEntry, T::Param],
        vec![
            T::TargetEntry,
            T::Aggref,
            T::Const,
            T::TargetEntry,
            T::Var,
            T::SortGroupClause,
            T::SortGroupClause,
            T::Const,
        ],
        vec![T::TargetEntry, T::GroupingFunc, T::Var],
        vec![T::TargetEntry, T::WindowFunc, T::Const],
        vec![T::TargetEntry, T::ArrayRef, T::Const, T::Const, T::Var, T::Const],
        vec![T::TargetEntry, T::FuncExpr, T::NamedArgExpr, T::Const],
        vec![T::TargetEntry, T::DistinctExpr, T::Var, T::Const],
        vec![T::TargetEntry, T::NullIfExpr, T::Var, T::Const],
        vec![T::TargetEntry, T::ScalarArrayOpExpr, T::Var, T::ArrayExpr, T::Const, T::Const],
        vec![
            T::TargetEntry,
            T::BoolExpr,
            T::SubLink,
            T::OpExpr,
            T::Var,
            T::Param,
            T::Query,
            T::TargetEntry,
            T::Const,
            T::FromExpr,
            T::CurrentOfExpr,
        ],
        vec![T::TargetEntry, T::FieldSelect, T::Var],
        vec![T::TargetEntry, T::FieldStore, T::Var, T::Const],
        vec![
            T::TargetEntry,
            T::RelabelType,
            T::CoerceViaIO,
            T::ArrayCoerceExpr,
            T::ConvertRowtypeExpr,
            T::Var,
        ],
        vec![
            T::TargetEntry,
            T::CollateExpr,
            T::CaseExpr,
            T::Var,
            T::OpExpr,
            T::CaseTestExpr,
            T::Const,
            T::Const,
            T::Const,
        ],
        vec![T::TargetEntry, T::RowExpr, T::Const, T::Var],
        vec![T::TargetEntry, T::RowCompareExpr, T::Var, T::Const],
        vec![T::TargetEntry, T::CoalesceExpr, T::Var, T::Const],
        vec![T::TargetEntry, T::MinMaxExpr, T::Const, T::Const],
        vec![T::TargetEntry, T::XmlExpr, T::Const, T::Const],
        vec![T::TargetEntry, T::NullTest, T::BooleanTest, T::Const],
        vec![T::TargetEntry, T::CoerceToDomain, T::CoerceToDomainValue],
        vec![T::TargetEntry, T::SetToDefault],
        // WITH CHECK options, ON CONFLICT, RETURNING
        vec![T::WithCheckOption, T::Var],
        vec![
            T::OnConflictExpr,
            T::InferenceElem,
            T::Var,
            T::Const,
            T::TargetEntry,
            T::Const,
            T::Const,
            T::TargetEntry,
            T::Var,
        ],
        vec![T::TargetEntry, T::Var],
        // join tree, set operations, HAVING, OFFSET, LIMIT
        vec![T::FromExpr, T::JoinExpr, T::RangeTblRef, T::RangeTblRef, T::Const, T::Const],
        vec![T::SetOperationStmt, T::RangeTblRef, T::RangeTblRef],
        vec![T::Const, T::Const, T::Const],
        // range table
        vec![T::RangeTblEntry, T::TableSampleClause, T::Const, T::Const, T::Var],
        vec![T::RangeTblEntry, T::Query, T::TargetEntry, T::Const, T::FromExpr],
        vec![T::RangeTblEntry, T::Var],
        vec![T::RangeTblEntry, T::RangeTblFunction, T::FuncExpr, T::Const],
        vec![T::RangeTblEntry, T::List, T::Const, T::Const],
        vec![T::RangeTblEntry],
        // WITH list
        vec![T::CommonTableExpr, T::Query, T::TargetEntry, T::Const, T::FromExpr],
        // the window clause next to the query
        vec![T::WindowClause, T::Var, T::SortGroupClause, T::Const, T::Const],
    ]
    .concat()
}

fn walk_every_node(tree: &Node) -> Vec<Node> {
    let mut nodes = Vec::new();
    walk_tree(tree, TraversalFlags::EXAMINE_RTES, |node| {
        nodes.push(node.clone());
        Ok::<_, TreeError>(WalkControl::Continue)
    })
    .unwrap();
    nodes
}

#[test]
fn test_every_kind_is_visited_in_order() {
    let visited: Vec<NodeTag> = walk_every_node(&every_kind_tree()).iter().map(Node::tag).collect();
    assert_eq!(visited, expected_every_kind_visits());

    let kinds: BTreeSet<NodeTag> = visited.into_iter().collect();
    assert_eq!(kinds, ALL_NODE_TAGS.into_iter().collect::<BTreeSet<_>>());
}

#[test]
fn test_identity_mutation_of_every_kind() {
    let tree = every_kind_tree();
    for flags in [TraversalFlags::empty(), TraversalFlags::EXAMINE_RTES] {
        let copy = mutate_tree(&tree, flags, |_| Ok::<_, TreeError>(None)).unwrap();
        assert_eq!(copy, tree);
    }

    let query = every_clause_query();
    assert_eq!(mutate_query(&query, TraversalFlags::empty(), |_| Ok::<_, TreeError>(None)).unwrap(), query);
}

/// Records the kinds of the immediate children it is shown, without descending
#[derive(Default)]
struct ChildKinds(Vec<NodeTag>);

impl TreeWalker for ChildKinds {
    type Error = TreeError;

    fn walk(&mut self, node: &Node) -> Result<WalkControl, TreeError> {
        self.0.push(node.tag());
        Ok(WalkControl::Continue)
    }
}

impl TreeMutator for ChildKinds {
    type Error = TreeError;

    fn mutate(&mut self, node: &Node) -> Result<Node, TreeError> {
        self.0.push(node.tag());
        Ok(node.clone())
    }
}

#[test]
fn test_walker_and_mutator_see_the_same_children() {
    let flags = TraversalFlags::EXAMINE_RTES;
    let mut checked = BTreeSet::new();

    for node in walk_every_node(&every_kind_tree()) {
        let mut walked = ChildKinds::default();
        let mut mutated = ChildKinds::default();

        match &node {
            Node::RangeTblEntry(_) => {
                assert!(expression_tree_walker(&node, &mut walked).is_err());
                assert!(expression_tree_mutator(&node, &mut mutated).is_err());
            }
            Node::Query(query) => {
                query_tree_walker(query, &mut walked, flags).unwrap();
                let rebuilt = query_tree_mutator(query, &mut mutated, flags).unwrap();
                assert_eq!(&rebuilt, query.as_ref());
            }
            _ => {
                expression_tree_walker(&node, &mut walked).unwrap();
                let rebuilt = expression_tree_mutator(&node, &mut mutated).unwrap();
                assert_eq!(rebuilt, node);
            }
        }

        assert_eq!(walked.0, mutated.0, "children of {}", node.tag());
        checked.insert(node.tag());
    }

    assert_eq!(checked.len(), ALL_NODE_TAGS.len());
}

/// `WITH w AS (SELECT 3) SELECT x FROM (SELECT 1) UNION (SELECT 2)`, with a
/// marker qualifier on the otherwise empty join tree
fn union_query() -> Query {
    Query {
        can_set_tag: true,
        cte_list: vec![cte("w", select_value(3))],
        rtable: vec![subquery_rte("l", select_value(1)), subquery_rte("r", select_value(2))],
        jointree: Some(from_rtindexes(&[], Some(make_bool_const(true)))),
        target_list: vec![tle(var())],
        set_operations: Some(
            SetOperationStmt {
                op: SetOperation::Union,
                all: false,
                left: rtref(1),
                right: rtref(2),
                col_types: vec![INT4_OID],
                col_typmods: vec![-1],
                col_collations: vec![0],
                group_clauses: vec![],
            }
            .into(),
        ),
        ..Default::default()
    }
}

#[test]
fn test_set_operation_query_order() {
    let query = union_query();
    assert_eq!(
        visited_kinds(&query, TraversalFlags::empty()),
        vec![
            // target list
            T::TargetEntry,
            T::Var,
            // qualifier
            T::FromExpr,
            T::Const,
            // set-operation tree
            T::SetOperationStmt,
            T::RangeTblRef,
            T::RangeTblRef,
            // range table
            T::Query,
            T::TargetEntry,
            T::Const,
            T::FromExpr,
            T::Query,
            T::TargetEntry,
            T::Const,
            T::FromExpr,
            // WITH list
            T::CommonTableExpr,
            T::Query,
            T::TargetEntry,
            T::Const,
            T::FromExpr,
        ]
    );

    let mut values = Vec::new();
    walk_query(&query, TraversalFlags::empty(), |node| {
        if let Node::Const(konst) = node
            && let Some(value) = konst.value.as_i32()
        {
            values.push(value);
        }
        Ok::<_, TreeError>(WalkControl::Continue)
    })
    .unwrap();
    assert_eq!(values, vec![1, 2, 3]);
}

#[test]
fn test_set_operation_tree_is_mutated() {
    let query = union_query();
    let renumbered = mutate_query(&query, TraversalFlags::empty(), |node| {
        Ok::<_, TreeError>(match node {
            Node::RangeTblRef(r) => Some(rtref(r.rtindex + 10)),
            _ => None,
        })
    })
    .unwrap();

    match renumbered.set_operations.as_ref() {
        Some(Node::SetOperationStmt(setop)) => {
            assert_eq!(setop.left, rtref(11));
            assert_eq!(setop.right, rtref(12));
            assert_eq!(setop.op, SetOperation::Union);
        }
        other => panic!("expected SetOperationStmt, got {:?}", other),
    }
    assert_eq!(renumbered.rtable, query.rtable);
}

// raw trees

fn a_const(value: i64) -> RawNode {
    AConst {
        val: Value::Integer(value),
        location: None,
    }
    .into()
}

fn column(name: &str) -> RawNode {
    ColumnRef {
        fields: vec![Value::String(name.into()).into()],
        location: None,
    }
    .into()
}

fn target(val: RawNode) -> RawNode {
    ResTarget {
        name: None,
        indirection: vec![],
        val: Some(val),
        location: None,
    }
    .into()
}

fn range_var(name: &str, alias: Option<&str>) -> RawNode {
    RangeVar {
        catalog: None,
        schema: None,
        relname: name.into(),
        inh: true,
        alias: alias.map(|alias| RawNode::from(make_alias(alias, &[]))),
        location: None,
    }
    .into()
}

fn type_name(name: &str, typmods: Vec<RawNode>, array_bounds: Vec<RawNode>) -> RawNode {
    TypeName {
        names: vec![name.into()],
        setof: false,
        pct_type: false,
        typmods,
        array_bounds,
        location: None,
    }
    .into()
}

fn sort_by(node: RawNode) -> RawNode {
    SortBy {
        node,
        dir: SortByDir::Default,
        nulls: SortByNulls::Default,
        use_op: vec![],
        location: None,
    }
    .into()
}

fn window_def(
    name: Option<&str>,
    partition_clause: Vec<RawNode>,
    order_clause: Vec<RawNode>,
    start_offset: Option<RawNode>,
) -> RawNode {
    WindowDef {
        name: name.map(str::to_string),
        refname: None,
        partition_clause,
        order_clause,
        frame_options: 0,
        start_offset,
        end_offset: None,
        location: None,
    }
    .into()
}

fn select_targets(target_list: Vec<RawNode>) -> RawNode {
    SelectStmt {
        target_list,
        ..Default::default()
    }
    .into()
}

/// INSERT ... VALUES (1, DEFAULT) ON CONFLICT (a) WHERE 1 DO UPDATE SET ... RETURNING *
fn raw_insert() -> RawNode {
    InsertStmt {
        relation: range_var("t", Some("x")),
        cols: vec![
            ResTarget {
                name: Some("a".into()),
                indirection: vec![],
                val: None,
                location: None,
            }
            .into(),
        ],
        select_stmt: Some(
            SelectStmt {
                values_lists: vec![RawNode::List(vec![
                    a_const(1),
                    SetToDefault {
                        type_oid: 0,
                        typmod: -1,
                        collation: 0,
                        location: None,
                    }
                    .into(),
                ])],
                ..Default::default()
            }
            .into(),
        ),
        on_conflict: Some(
            OnConflictClause {
                action: OnConflictAction::Update,
                infer: Some(
                    InferClause {
                        index_elems: vec![
                            IndexElem {
                                name: None,
                                expr: Some(column("a")),
                                indexcolname: None,
                                collation: vec![],
                                opclass: vec![],
                                ordering: SortByDir::Default,
                                nulls_ordering: SortByNulls::Default,
                            }
                            .into(),
                        ],
                        where_clause: Some(a_const(1)),
                        conname: None,
                        location: None,
                    }
                    .into(),
                ),
                target_list: vec![target(a_const(2))],
                where_clause: Some(
                    RawBooleanTest {
                        arg: column("b"),
                        test: BoolTestType::IsTrue,
                        location: None,
                    }
                    .into(),
                ),
                location: None,
            }
            .into(),
        ),
        returning_list: vec![target(
            ColumnRef {
                fields: vec![AStar.into()],
                location: None,
            }
            .into(),
        )],
        with_clause: Some(
            WithClause {
                ctes: vec![
                    RawCommonTableExpr {
                        name: "w".into(),
                        aliascolnames: vec![],
                        ctequery: select_targets(vec![target(a_const(3))]),
                        location: None,
                    }
                    .into(),
                ],
                recursive: false,
                location: None,
            }
            .into(),
        ),
    }
    .into()
}

/// DELETE FROM t USING (SELECT $1) s WHERE CURRENT OF c
fn raw_delete() -> RawNode {
    DeleteStmt {
        relation: range_var("t", None),
        using_clause: vec![
            RangeSubselect {
                lateral: false,
                subquery: select_targets(vec![target(
                    ParamRef {
                        number: 1,
                        location: None,
                    }
                    .into(),
                )]),
                alias: Some(make_alias("s", &[]).into()),
            }
            .into(),
        ],
        where_clause: Some(
            CurrentOfExpr {
                rtindex: 0,
                cursor_name: Some("c".into()),
                cursor_param: 0,
            }
            .into(),
        ),
        returning_list: vec![],
        with_clause: None,
    }
    .into()
}

/// UPDATE t SET a[1:2] = ROW(1) FROM f() AS (c int(4)[] DEFAULT 5 COLLATE "C")
/// WHERE b[3].* IS NULL RETURNING XMLSERIALIZE(CONTENT d AS text)
fn raw_update() -> RawNode {
    UpdateStmt {
        relation: range_var("t", None),
        target_list: vec![
            ResTarget {
                name: Some("a".into()),
                indirection: vec![
                    AIndices {
                        lidx: Some(a_const(1)),
                        uidx: Some(a_const(2)),
                    }
                    .into(),
                ],
                val: Some(
                    MultiAssignRef {
                        source: RawRowExpr {
                            args: vec![a_const(1)],
                            explicit_row: true,
                            location: None,
                        }
                        .into(),
                        colno: 1,
                        ncolumns: 1,
                    }
                    .into(),
                ),
                location: None,
            }
            .into(),
        ],
        where_clause: Some(
            RawNullTest {
                arg: AIndirection {
                    arg: column("b"),
                    indirection: vec![
                        AIndices {
                            lidx: None,
                            uidx: Some(a_const(3)),
                        }
                        .into(),
                        AStar.into(),
                    ],
                }
                .into(),
                test: NullTestType::IsNull,
                location: None,
            }
            .into(),
        ),
        from_clause: vec![
            RangeFunction {
                lateral: false,
                ordinality: false,
                is_rowsfrom: false,
                functions: vec![RawNode::List(vec![
                    FuncCall {
                        funcname: vec!["f".into()],
                        args: vec![a_const(4)],
                        agg_order: vec![],
                        agg_filter: None,
                        agg_within_group: false,
                        agg_star: false,
                        agg_distinct: false,
                        func_variadic: false,
                        over: None,
                        location: None,
                    }
                    .into(),
                    RawNode::List(vec![]),
                ])],
                alias: None,
                coldeflist: vec![
                    ColumnDef {
                        colname: "c".into(),
                        type_name: Some(type_name("int4", vec![a_const(4)], vec![Value::Integer(-1).into()])),
                        raw_default: Some(a_const(5)),
                        coll_clause: Some(
                            CollateClause {
                                arg: None,
                                collname: vec!["C".into()],
                                location: None,
                            }
                            .into(),
                        ),
                        is_not_null: false,
                        location: None,
                    }
                    .into(),
                ],
            }
            .into(),
        ],
        returning_list: vec![target(
            XmlSerialize {
                xml_option: XmlOptionType::Content,
                expr: column("d"),
                type_name: type_name("text", vec![], vec![]),
                location: None,
            }
            .into(),
        )],
        with_clause: None,
    }
    .into()
}

/// A SELECT using every clause of the statement
fn raw_select() -> RawNode {
    SelectStmt {
        into_clause: Some(
            IntoClause {
                rel: range_var("dest", None),
                col_names: vec![],
                view_query: None,
                skip_data: false,
            }
            .into(),
        ),
        target_list: vec![
            // sum(x => 1 ORDER BY a) FILTER (WHERE a > 1) OVER (PARTITION BY b ORDER BY c)
            target(
                FuncCall {
                    funcname: vec!["sum".into()],
                    args: vec![
                        RawNamedArgExpr {
                            arg: a_const(1),
                            name: "x".into(),
                            location: None,
                        }
                        .into(),
                    ],
                    agg_order: vec![sort_by(column("a"))],
                    agg_filter: Some(
                        AExpr {
                            kind: AExprKind::Op,
                            name: vec![">".into()],
                            lexpr: Some(column("a")),
                            rexpr: Some(a_const(1)),
                            location: None,
                        }
                        .into(),
                    ),
                    agg_within_group: false,
                    agg_star: false,
                    agg_distinct: false,
                    func_variadic: false,
                    over: Some(window_def(
                        None,
                        vec![column("b")],
                        vec![sort_by(column("c"))],
                        Some(a_const(1)),
                    )),
                    location: None,
                }
                .into(),
            ),
            target(
                RawCaseExpr {
                    arg: Some(column("a")),
                    whens: vec![RawCaseWhen {
                        expr: a_const(1),
                        result: a_const(2),
                        location: None,
                    }],
                    default: Some(a_const(3)),
                    location: None,
                }
                .into(),
            ),
            target(
                RawCoalesceExpr {
                    args: vec![column("a"), a_const(1)],
                    location: None,
                }
                .into(),
            ),
            target(
                RawMinMaxExpr {
                    op: MinMaxOp::Least,
                    args: vec![a_const(1)],
                    location: None,
                }
                .into(),
            ),
            target(
                RawXmlExpr {
                    op: XmlExprOp::Forest,
                    name: None,
                    named_args: vec![target(a_const(1))],
                    args: vec![a_const(2)],
                    xml_option: XmlOptionType::Content,
                    location: None,
                }
                .into(),
            ),
            target(
                TypeCast {
                    arg: AArrayExpr {
                        elements: vec![a_const(1)],
                        location: None,
                    }
                    .into(),
                    type_name: type_name("int4", vec![], vec![]),
                    location: None,
                }
                .into(),
            ),
            target(
                RawSubLink {
                    link_type: SubLinkType::Exists,
                    test_expr: None,
                    oper_name: vec![],
                    subselect: select_targets(vec![target(
                        RawGroupingFunc {
                            args: vec![column("a")],
                            location: None,
                        }
                        .into(),
                    )]),
                    location: None,
                }
                .into(),
            ),
        ],
        from_clause: vec![
            RawJoinExpr {
                join_type: JoinType::Inner,
                is_natural: false,
                larg: RangeTableSample {
                    relation: range_var("t", None),
                    method: vec!["bernoulli".into()],
                    args: vec![a_const(10)],
                    repeatable: Some(a_const(42)),
                    location: None,
                }
                .into(),
                rarg: range_var("u", None),
                using: vec![],
                quals: Some(a_const(1)),
                alias: Some(make_alias("j", &[]).into()),
            }
            .into(),
        ],
        where_clause: Some(a_const(1)),
        group_clause: vec![
            GroupingSet {
                kind: GroupingSetKind::Rollup,
                content: vec![column("a")],
                location: None,
            }
            .into(),
        ],
        having_clause: Some(a_const(1)),
        window_clause: vec![window_def(Some("w"), vec![], vec![], None)],
        sort_clause: vec![sort_by(a_const(1))],
        limit_offset: Some(a_const(1)),
        limit_count: Some(a_const(2)),
        locking_clause: vec![
            LockingClause {
                locked_rels: vec![range_var("t", None)],
                strength: LockClauseStrength::Update,
                wait_policy: LockWaitPolicy::Block,
            }
            .into(),
        ],
        ..Default::default()
    }
    .into()
}

/// SELECT 1 UNION SELECT 2
fn raw_union() -> RawNode {
    SelectStmt {
        op: Some(SetOperation::Union),
        larg: Some(select_targets(vec![target(a_const(1))])),
        rarg: Some(select_targets(vec![target(a_const(2))])),
        ..Default::default()
    }
    .into()
}

fn raw_visits(node: &RawNode) -> Vec<RawNodeTag> {
    let mut kinds = Vec::new();
    walk_raw_tree(node, |node| {
        kinds.push(node.tag());
        Ok::<_, TreeError>(WalkControl::Continue)
    })
    .unwrap();
    kinds
}

#[test]
fn test_raw_statements_visit_every_child() {
    assert_eq!(
        raw_visits(&raw_insert()),
        vec![
            R::InsertStmt,
            R::RangeVar,
            R::Alias,
            R::ResTarget,
            R::SelectStmt,
            R::List,
            R::AConst,
            R::SetToDefault,
            R::OnConflictClause,
            R::InferClause,
            R::IndexElem,
            R::ColumnRef,
            R::AConst,
            R::ResTarget,
            R::AConst,
            R::BooleanTest,
            R::ColumnRef,
            R::ResTarget,
            R::ColumnRef,
            R::WithClause,
            R::CommonTableExpr,
            R::SelectStmt,
            R::ResTarget,
            R::AConst,
        ]
    );

    assert_eq!(
        raw_visits(&raw_delete()),
        vec![
            R::DeleteStmt,
            R::RangeVar,
            R::RangeSubselect,
            R::SelectStmt,
            R::ResTarget,
            R::ParamRef,
            R::Alias,
            R::CurrentOfExpr,
        ]
    );

    assert_eq!(
        raw_visits(&raw_update()),
        vec![
            R::UpdateStmt,
            R::RangeVar,
            R::ResTarget,
            R::AIndices,
            R::AConst,
            R::AConst,
            R::MultiAssignRef,
            R::RowExpr,
            R::AConst,
            R::NullTest,
            R::AIndirection,
            R::ColumnRef,
            R::AIndices,
            R::AConst,
            R::AStar,
            R::RangeFunction,
            R::List,
            R::FuncCall,
            R::AConst,
            R::List,
            R::ColumnDef,
            R::TypeName,
            R::AConst,
            R::Value,
            R::AConst,
            R::CollateClause,
            R::ResTarget,
            R::XmlSerialize,
            R::ColumnRef,
            R::TypeName,
        ]
    );

    assert_eq!(
        raw_visits(&raw_select()),
        vec![
            R::SelectStmt,
            R::IntoClause,
            R::RangeVar,
            // aggregate with filter and window
            R::ResTarget,
            R::FuncCall,
            R::NamedArgExpr,
            R::AConst,
            R::SortBy,
            R::ColumnRef,
            R::AExpr,
            R::ColumnRef,
            R::AConst,
            R::WindowDef,
            R::ColumnRef,
            R::SortBy,
            R::ColumnRef,
            R::AConst,
            R::ResTarget,
            R::CaseExpr,
            R::ColumnRef,
            R::AConst,
            R::AConst,
            R::AConst,
            R::ResTarget,
            R::CoalesceExpr,
            R::ColumnRef,
            R::AConst,
            R::ResTarget,
            R::MinMaxExpr,
            R::AConst,
            R::ResTarget,
            R::XmlExpr,
            R::ResTarget,
            R::AConst,
            R::AConst,
            R::ResTarget,
            R::TypeCast,
            R::AArrayExpr,
            R::AConst,
            R::TypeName,
            R::ResTarget,
            R::SubLink,
            R::SelectStmt,
            R::ResTarget,
            R::GroupingFunc,
            R::ColumnRef,
            // FROM
            R::JoinExpr,
            R::RangeTableSample,
            R::RangeVar,
            R::AConst,
            R::AConst,
            R::RangeVar,
            R::AConst,
            R::Alias,
            // WHERE, GROUP BY, HAVING, WINDOW, ORDER BY, OFFSET, LIMIT, FOR UPDATE
            R::AConst,
            R::GroupingSet,
            R::ColumnRef,
            R::AConst,
            R::WindowDef,
            R::SortBy,
            R::AConst,
            R::AConst,
            R::AConst,
            R::LockingClause,
            R::RangeVar,
        ]
    );

    assert_eq!(
        raw_visits(&raw_union()),
        vec![
            R::SelectStmt,
            R::SelectStmt,
            R::ResTarget,
            R::AConst,
            R::SelectStmt,
            R::ResTarget,
            R::AConst,
        ]
    );
}

#[test]
fn test_raw_statements_cover_every_kind() {
    let statements = RawNode::List(vec![raw_insert(), raw_delete(), raw_update(), raw_select(), raw_union()]);
    let visits = raw_visits(&statements);
    assert_eq!(visits[0], R::List);

    let kinds: BTreeSet<RawNodeTag> = visits.into_iter().collect();
    assert_eq!(kinds, ALL_RAW_TAGS.into_iter().collect::<BTreeSet<_>>());
}

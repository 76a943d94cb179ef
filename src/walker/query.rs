//! Query-level traversal: the clauses of a `Query`, its range table and its
//! WITH list, scoped by [`TraversalFlags`].

use tracing::trace;

use super::stack_depth::{DepthGuard, guarded};
use super::{
    TraversalFlags, TreeMutator, TreeWalker, WalkControl, mutate_list, mutate_opt, try_walk,
    walk_list, walk_opt,
};
use crate::TreeError;
use crate::nodes::{Node, Query, RangeTblEntry, RteKind};

/// Show `walker` each top-level expression of `query`.
///
/// The query node itself is not shown. Clauses are visited in a fixed order:
/// target list, WITH CHECK options, ON CONFLICT, RETURNING, join tree, set
/// operations, HAVING, OFFSET, LIMIT, then the range table and WITH list
/// unless `flags` exclude them.
pub fn query_tree_walker<W>(
    query: &Query,
    walker: &mut W,
    flags: TraversalFlags,
) -> Result<WalkControl, W::Error>
where
    W: TreeWalker + ?Sized,
{
    guarded(|| walk_clauses(query, walker, flags))
}

fn walk_clauses<W>(query: &Query, walker: &mut W, flags: TraversalFlags) -> Result<WalkControl, W::Error>
where
    W: TreeWalker + ?Sized,
{
    trace!("query_tree_walker: {:?} flags={:?}", query.command_type, flags);

    try_walk!(walk_list(walker, &query.target_list)?);
    try_walk!(walk_list(walker, &query.with_check_options)?);
    try_walk!(walk_opt(walker, query.on_conflict.as_ref())?);
    try_walk!(walk_list(walker, &query.returning_list)?);
    try_walk!(walk_opt(walker, query.jointree.as_ref())?);
    try_walk!(walk_opt(walker, query.set_operations.as_ref())?);
    try_walk!(walk_opt(walker, query.having_qual.as_ref())?);
    try_walk!(walk_opt(walker, query.limit_offset.as_ref())?);
    try_walk!(walk_opt(walker, query.limit_count.as_ref())?);

    // group, window, distinct and sort clauses only hold SortGroupClauses
    // referring back into the target list, so there is nothing new to see

    if !flags.contains(TraversalFlags::IGNORE_RANGE_TABLE) {
        try_walk!(range_table_walker(&query.rtable, walker, flags)?);
    }
    if !flags.contains(TraversalFlags::IGNORE_CTE_SUBQUERIES) {
        try_walk!(walk_list(walker, &query.cte_list)?);
    }

    Ok(WalkControl::Continue)
}

/// Walk the expressions held by each range-table entry.
///
/// Join entries do not lead to their input entries: those are entries of the
/// same range table and get their own turn.
pub fn range_table_walker<W>(
    rtable: &[Node],
    walker: &mut W,
    flags: TraversalFlags,
) -> Result<WalkControl, W::Error>
where
    W: TreeWalker + ?Sized,
{
    for entry in rtable {
        let _guard = DepthGuard::enter()?;
        let rte = expect_rte(entry, "range_table_walker")?;

        if flags.contains(TraversalFlags::EXAMINE_RTES) {
            try_walk!(walker.walk(entry)?);
        }

        match &rte.kind {
            RteKind::Relation { tablesample, .. } => {
                try_walk!(walk_opt(walker, tablesample.as_ref())?);
            }
            RteKind::Cte { .. } => {
                // the definition is reached through the WITH list
            }
            RteKind::Subquery { subquery, .. } => {
                if !flags.contains(TraversalFlags::IGNORE_RT_SUBQUERIES) {
                    try_walk!(walker.walk(subquery)?);
                }
            }
            RteKind::Join { join_alias_vars, .. } => {
                if !flags.contains(TraversalFlags::IGNORE_JOINALIASES) {
                    try_walk!(walk_list(walker, join_alias_vars)?);
                }
            }
            RteKind::Function { functions, .. } => {
                try_walk!(walk_list(walker, functions)?);
            }
            RteKind::Values { values_lists, .. } => {
                try_walk!(walk_list(walker, values_lists)?);
            }
        }

        try_walk!(walk_list(walker, &rte.security_quals)?);
    }

    Ok(WalkControl::Continue)
}

/// Copy `query`, then replace each of its top-level expressions with the
/// mutator's result. Parts excluded by `flags` are carried over unchanged.
pub fn query_tree_mutator<M>(query: &Query, mutator: &mut M, flags: TraversalFlags) -> Result<Query, M::Error>
where
    M: TreeMutator + ?Sized,
{
    query_tree_mutator_owned(query.clone(), mutator, flags)
}

/// Like [`query_tree_mutator`], but rebuilds the caller's query in place
/// instead of copying it first.
pub fn query_tree_mutator_owned<M>(
    query: Query,
    mutator: &mut M,
    flags: TraversalFlags,
) -> Result<Query, M::Error>
where
    M: TreeMutator + ?Sized,
{
    guarded(|| mutate_clauses(query, mutator, flags))
}

fn mutate_clauses<M>(mut query: Query, mutator: &mut M, flags: TraversalFlags) -> Result<Query, M::Error>
where
    M: TreeMutator + ?Sized,
{
    trace!("query_tree_mutator: {:?} flags={:?}", query.command_type, flags);

    query.target_list = mutate_list(mutator, &query.target_list)?;
    query.with_check_options = mutate_list(mutator, &query.with_check_options)?;
    query.on_conflict = mutate_opt(mutator, query.on_conflict.as_ref())?;
    query.returning_list = mutate_list(mutator, &query.returning_list)?;
    query.jointree = mutate_opt(mutator, query.jointree.as_ref())?;
    query.set_operations = mutate_opt(mutator, query.set_operations.as_ref())?;
    query.having_qual = mutate_opt(mutator, query.having_qual.as_ref())?;
    query.limit_offset = mutate_opt(mutator, query.limit_offset.as_ref())?;
    query.limit_count = mutate_opt(mutator, query.limit_count.as_ref())?;

    if !flags.contains(TraversalFlags::IGNORE_RANGE_TABLE) {
        query.rtable = range_table_mutator(&query.rtable, mutator, flags)?;
    }
    if !flags.contains(TraversalFlags::IGNORE_CTE_SUBQUERIES) {
        query.cte_list = mutate_list(mutator, &query.cte_list)?;
    }

    Ok(query)
}

/// Rebuild every range-table entry with mutated expressions, keeping the
/// entries' order.
///
/// With `EXAMINE_RTES` each entry is first passed to the mutator, which must
/// hand back a range-table entry; its contents are then mutated as usual.
pub fn range_table_mutator<M>(
    rtable: &[Node],
    mutator: &mut M,
    flags: TraversalFlags,
) -> Result<Vec<Node>, M::Error>
where
    M: TreeMutator + ?Sized,
{
    let mut mutated = Vec::with_capacity(rtable.len());

    for entry in rtable {
        let _guard = DepthGuard::enter()?;
        let examined;
        let rte = if flags.contains(TraversalFlags::EXAMINE_RTES) {
            examined = mutator.mutate(entry)?;
            expect_rte(&examined, "range_table_mutator")?
        } else {
            expect_rte(entry, "range_table_mutator")?
        };

        let kind = match &rte.kind {
            RteKind::Relation {
                rel_id,
                rel_kind,
                tablesample,
            } => RteKind::Relation {
                rel_id: *rel_id,
                rel_kind: *rel_kind,
                tablesample: mutate_opt(mutator, tablesample.as_ref())?,
            },
            RteKind::Cte { .. } => rte.kind.clone(),
            RteKind::Subquery {
                subquery,
                security_barrier,
            } => RteKind::Subquery {
                subquery: if flags.contains(TraversalFlags::IGNORE_RT_SUBQUERIES) {
                    subquery.clone()
                } else {
                    mutator.mutate(subquery)?
                },
                security_barrier: *security_barrier,
            },
            RteKind::Join {
                join_type,
                join_alias_vars,
            } => RteKind::Join {
                join_type: *join_type,
                join_alias_vars: if flags.contains(TraversalFlags::IGNORE_JOINALIASES) {
                    join_alias_vars.clone()
                } else {
                    mutate_list(mutator, join_alias_vars)?
                },
            },
            RteKind::Function {
                functions,
                ordinality,
            } => RteKind::Function {
                functions: mutate_list(mutator, functions)?,
                ordinality: *ordinality,
            },
            RteKind::Values {
                values_lists,
                collations,
            } => RteKind::Values {
                values_lists: mutate_list(mutator, values_lists)?,
                collations: collations.clone(),
            },
        };

        mutated.push(
            RangeTblEntry {
                kind,
                alias: rte.alias.clone(),
                eref: rte.eref.clone(),
                lateral: rte.lateral,
                inh: rte.inh,
                in_from_clause: rte.in_from_clause,
                security_quals: mutate_list(mutator, &rte.security_quals)?,
            }
            .into(),
        );
    }

    Ok(mutated)
}

/// Walk a query with [`query_tree_walker`], or show any other node to the
/// walker directly.
pub fn query_or_expression_tree_walker<W>(
    node: &Node,
    walker: &mut W,
    flags: TraversalFlags,
) -> Result<WalkControl, W::Error>
where
    W: TreeWalker + ?Sized,
{
    match node {
        Node::Query(query) => query_tree_walker(query, walker, flags),
        _ => walker.walk(node),
    }
}

/// Mutate a query with [`query_tree_mutator`], or hand any other node to the
/// mutator directly.
pub fn query_or_expression_tree_mutator<M>(
    node: &Node,
    mutator: &mut M,
    flags: TraversalFlags,
) -> Result<Node, M::Error>
where
    M: TreeMutator + ?Sized,
{
    match node {
        Node::Query(query) => Ok(Node::Query(Box::new(query_tree_mutator(query, mutator, flags)?))),
        _ => mutator.mutate(node),
    }
}

fn expect_rte<'a>(entry: &'a Node, context: &'static str) -> Result<&'a RangeTblEntry, TreeError> {
    match entry {
        Node::RangeTblEntry(rte) => Ok(rte),
        other => Err(TreeError::unrecognized(other.tag(), context)),
    }
}

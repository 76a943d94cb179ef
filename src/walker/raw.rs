//! Walker over raw parse trees.
//!
//! Same protocol as the analyzed walker, over the node kinds the grammar
//! produces. Statements are walked like expressions: there is no separate
//! query-level pass because nothing has been split into range tables yet.

use super::stack_depth::guarded;
use super::{RawTreeWalker, WalkControl, try_walk};
use crate::nodes::RawNode;

fn walk_opt<W: RawTreeWalker + ?Sized>(walker: &mut W, node: Option<&RawNode>) -> Result<WalkControl, W::Error> {
    match node {
        Some(node) => walker.walk(node),
        None => Ok(WalkControl::Continue),
    }
}

fn walk_list<W: RawTreeWalker + ?Sized>(walker: &mut W, nodes: &[RawNode]) -> Result<WalkControl, W::Error> {
    for node in nodes {
        try_walk!(walker.walk(node)?);
    }
    Ok(WalkControl::Continue)
}

/// Show `walker` each immediate child of a raw `node`.
pub fn raw_expression_tree_walker<W>(node: &RawNode, walker: &mut W) -> Result<WalkControl, W::Error>
where
    W: RawTreeWalker + ?Sized,
{
    guarded(|| walk_children(node, walker))
}

fn walk_children<W>(node: &RawNode, walker: &mut W) -> Result<WalkControl, W::Error>
where
    W: RawTreeWalker + ?Sized,
{
    match node {
        RawNode::Value(_)
        | RawNode::ParamRef(_)
        | RawNode::AConst(_)
        | RawNode::AStar(_)
        | RawNode::Alias(_)
        | RawNode::SetToDefault(_)
        | RawNode::CurrentOfExpr(_) => {
            // primitive node types with no subnodes
        }
        RawNode::ColumnRef(_) => {
            // fields hold names and stars only
        }
        RawNode::RangeVar(rv) => {
            try_walk!(walk_opt(walker, rv.alias.as_ref())?);
        }
        RawNode::GroupingFunc(grouping) => {
            try_walk!(walk_list(walker, &grouping.args)?);
        }
        RawNode::SubLink(sublink) => {
            try_walk!(walk_opt(walker, sublink.test_expr.as_ref())?);
            try_walk!(walker.walk(&sublink.subselect)?);
        }
        RawNode::CaseExpr(case) => {
            try_walk!(walk_opt(walker, case.arg.as_ref())?);
            for when in &case.whens {
                try_walk!(walker.walk(&when.expr)?);
                try_walk!(walker.walk(&when.result)?);
            }
            try_walk!(walk_opt(walker, case.default.as_ref())?);
        }
        RawNode::RowExpr(row) => {
            try_walk!(walk_list(walker, &row.args)?);
        }
        RawNode::CoalesceExpr(coalesce) => {
            try_walk!(walk_list(walker, &coalesce.args)?);
        }
        RawNode::MinMaxExpr(minmax) => {
            try_walk!(walk_list(walker, &minmax.args)?);
        }
        RawNode::XmlExpr(xexpr) => {
            try_walk!(walk_list(walker, &xexpr.named_args)?);
            try_walk!(walk_list(walker, &xexpr.args)?);
        }
        RawNode::NullTest(test) => {
            try_walk!(walker.walk(&test.arg)?);
        }
        RawNode::BooleanTest(test) => {
            try_walk!(walker.walk(&test.arg)?);
        }
        RawNode::JoinExpr(join) => {
            try_walk!(walker.walk(&join.larg)?);
            try_walk!(walker.walk(&join.rarg)?);
            try_walk!(walk_opt(walker, join.quals.as_ref())?);
            try_walk!(walk_opt(walker, join.alias.as_ref())?);
        }
        RawNode::IntoClause(into) => {
            try_walk!(walker.walk(&into.rel)?);
            // col_names are plain names
            try_walk!(walk_opt(walker, into.view_query.as_ref())?);
        }
        RawNode::List(items) => {
            try_walk!(walk_list(walker, items)?);
        }
        RawNode::InsertStmt(stmt) => {
            try_walk!(walker.walk(&stmt.relation)?);
            try_walk!(walk_list(walker, &stmt.cols)?);
            try_walk!(walk_opt(walker, stmt.select_stmt.as_ref())?);
            try_walk!(walk_opt(walker, stmt.on_conflict.as_ref())?);
            try_walk!(walk_list(walker, &stmt.returning_list)?);
            try_walk!(walk_opt(walker, stmt.with_clause.as_ref())?);
        }
        RawNode::DeleteStmt(stmt) => {
            try_walk!(walker.walk(&stmt.relation)?);
            try_walk!(walk_list(walker, &stmt.using_clause)?);
            try_walk!(walk_opt(walker, stmt.where_clause.as_ref())?);
            try_walk!(walk_list(walker, &stmt.returning_list)?);
            try_walk!(walk_opt(walker, stmt.with_clause.as_ref())?);
        }
        RawNode::UpdateStmt(stmt) => {
            try_walk!(walker.walk(&stmt.relation)?);
            try_walk!(walk_list(walker, &stmt.target_list)?);
            try_walk!(walk_opt(walker, stmt.where_clause.as_ref())?);
            try_walk!(walk_list(walker, &stmt.from_clause)?);
            try_walk!(walk_list(walker, &stmt.returning_list)?);
            try_walk!(walk_opt(walker, stmt.with_clause.as_ref())?);
        }
        RawNode::SelectStmt(stmt) => {
            try_walk!(walk_list(walker, &stmt.distinct_clause)?);
            try_walk!(walk_opt(walker, stmt.into_clause.as_ref())?);
            try_walk!(walk_list(walker, &stmt.target_list)?);
            try_walk!(walk_list(walker, &stmt.from_clause)?);
            try_walk!(walk_opt(walker, stmt.where_clause.as_ref())?);
            try_walk!(walk_list(walker, &stmt.group_clause)?);
            try_walk!(walk_opt(walker, stmt.having_clause.as_ref())?);
            try_walk!(walk_list(walker, &stmt.window_clause)?);
            try_walk!(walk_list(walker, &stmt.values_lists)?);
            try_walk!(walk_list(walker, &stmt.sort_clause)?);
            try_walk!(walk_opt(walker, stmt.limit_offset.as_ref())?);
            try_walk!(walk_opt(walker, stmt.limit_count.as_ref())?);
            try_walk!(walk_list(walker, &stmt.locking_clause)?);
            try_walk!(walk_opt(walker, stmt.with_clause.as_ref())?);
            try_walk!(walk_opt(walker, stmt.larg.as_ref())?);
            try_walk!(walk_opt(walker, stmt.rarg.as_ref())?);
        }
        RawNode::AExpr(expr) => {
            try_walk!(walk_opt(walker, expr.lexpr.as_ref())?);
            try_walk!(walk_opt(walker, expr.rexpr.as_ref())?);
            // operator name is not a node
        }
        RawNode::FuncCall(call) => {
            try_walk!(walk_list(walker, &call.args)?);
            try_walk!(walk_list(walker, &call.agg_order)?);
            try_walk!(walk_opt(walker, call.agg_filter.as_ref())?);
            try_walk!(walk_opt(walker, call.over.as_ref())?);
        }
        RawNode::NamedArgExpr(named) => {
            try_walk!(walker.walk(&named.arg)?);
        }
        RawNode::AIndices(indices) => {
            try_walk!(walk_opt(walker, indices.lidx.as_ref())?);
            try_walk!(walk_opt(walker, indices.uidx.as_ref())?);
        }
        RawNode::AIndirection(indir) => {
            try_walk!(walker.walk(&indir.arg)?);
            try_walk!(walk_list(walker, &indir.indirection)?);
        }
        RawNode::AArrayExpr(array) => {
            try_walk!(walk_list(walker, &array.elements)?);
        }
        RawNode::ResTarget(target) => {
            try_walk!(walk_list(walker, &target.indirection)?);
            try_walk!(walk_opt(walker, target.val.as_ref())?);
        }
        RawNode::MultiAssignRef(assign) => {
            try_walk!(walker.walk(&assign.source)?);
        }
        RawNode::TypeCast(cast) => {
            try_walk!(walker.walk(&cast.arg)?);
            try_walk!(walker.walk(&cast.type_name)?);
        }
        RawNode::CollateClause(collate) => {
            try_walk!(walk_opt(walker, collate.arg.as_ref())?);
        }
        RawNode::SortBy(sort) => {
            try_walk!(walker.walk(&sort.node)?);
        }
        RawNode::WindowDef(wd) => {
            try_walk!(walk_list(walker, &wd.partition_clause)?);
            try_walk!(walk_list(walker, &wd.order_clause)?);
            try_walk!(walk_opt(walker, wd.start_offset.as_ref())?);
            try_walk!(walk_opt(walker, wd.end_offset.as_ref())?);
        }
        RawNode::RangeSubselect(rs) => {
            try_walk!(walker.walk(&rs.subquery)?);
            try_walk!(walk_opt(walker, rs.alias.as_ref())?);
        }
        RawNode::RangeFunction(rf) => {
            try_walk!(walk_list(walker, &rf.functions)?);
            try_walk!(walk_opt(walker, rf.alias.as_ref())?);
            try_walk!(walk_list(walker, &rf.coldeflist)?);
        }
        RawNode::RangeTableSample(rts) => {
            try_walk!(walker.walk(&rts.relation)?);
            // method name is not a node
            try_walk!(walk_list(walker, &rts.args)?);
            try_walk!(walk_opt(walker, rts.repeatable.as_ref())?);
        }
        RawNode::TypeName(tn) => {
            try_walk!(walk_list(walker, &tn.typmods)?);
            try_walk!(walk_list(walker, &tn.array_bounds)?);
            // names are plain strings
        }
        RawNode::ColumnDef(coldef) => {
            try_walk!(walk_opt(walker, coldef.type_name.as_ref())?);
            try_walk!(walk_opt(walker, coldef.raw_default.as_ref())?);
            try_walk!(walk_opt(walker, coldef.coll_clause.as_ref())?);
        }
        RawNode::IndexElem(elem) => {
            try_walk!(walk_opt(walker, elem.expr.as_ref())?);
        }
        RawNode::GroupingSet(set) => {
            try_walk!(walk_list(walker, &set.content)?);
        }
        RawNode::LockingClause(lock) => {
            try_walk!(walk_list(walker, &lock.locked_rels)?);
        }
        RawNode::XmlSerialize(xs) => {
            try_walk!(walker.walk(&xs.expr)?);
            try_walk!(walker.walk(&xs.type_name)?);
        }
        RawNode::WithClause(with) => {
            try_walk!(walk_list(walker, &with.ctes)?);
        }
        RawNode::InferClause(infer) => {
            try_walk!(walk_list(walker, &infer.index_elems)?);
            try_walk!(walk_opt(walker, infer.where_clause.as_ref())?);
        }
        RawNode::OnConflictClause(onconflict) => {
            try_walk!(walk_opt(walker, onconflict.infer.as_ref())?);
            try_walk!(walk_list(walker, &onconflict.target_list)?);
            try_walk!(walk_opt(walker, onconflict.where_clause.as_ref())?);
        }
        RawNode::CommonTableExpr(cte) => {
            try_walk!(walker.walk(&cte.ctequery)?);
        }
    }

    Ok(WalkControl::Continue)
}

//! Best-effort source positions for error reporting.
//!
//! A node's location is the leftmost position among its own token and the
//! children that can appear to its left in the source text. Kinds without
//! any position report `None`.

use crate::Result;
use crate::nodes::{Location, Node, RawNode};
use crate::walker::stack_depth::guarded;

/// The leftmost of two known locations
pub fn leftmost_loc(a: Location, b: Location) -> Location {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

fn list_location(nodes: &[Node]) -> Result<Location> {
    for node in nodes {
        if let Some(loc) = expr_location(node)? {
            return Ok(Some(loc));
        }
    }
    Ok(None)
}

fn opt_location(node: Option<&Node>) -> Result<Location> {
    node.map_or(Ok(None), expr_location)
}

/// Source location of an analyzed node
pub fn expr_location(node: &Node) -> Result<Location> {
    guarded(|| node_location(node))
}

fn node_location(node: &Node) -> Result<Location> {
    let loc = match node {
        Node::Var(var) => var.location,
        Node::Const(c) => c.location,
        Node::Param(param) => param.location,
        Node::Aggref(agg) => agg.location,
        Node::GroupingFunc(grouping) => grouping.location,
        Node::WindowFunc(func) => func.location,
        // the array argument comes first
        Node::ArrayRef(aref) => expr_location(&aref.expr)?,
        // the function name or the leftmost argument
        Node::FuncExpr(func) => leftmost_loc(func.location, list_location(&func.args)?),
        Node::NamedArgExpr(named) => leftmost_loc(named.location, expr_location(&named.arg)?),
        // the operator or the left operand
        Node::OpExpr(op) | Node::DistinctExpr(op) | Node::NullIfExpr(op) => {
            leftmost_loc(op.location, list_location(&op.args)?)
        }
        Node::ScalarArrayOpExpr(op) => leftmost_loc(op.location, list_location(&op.args)?),
        Node::BoolExpr(expr) => leftmost_loc(expr.location, list_location(&expr.args)?),
        Node::SubLink(sublink) => leftmost_loc(opt_location(sublink.test_expr.as_ref())?, sublink.location),
        Node::FieldSelect(fselect) => expr_location(&fselect.arg)?,
        Node::FieldStore(fstore) => expr_location(&fstore.arg)?,
        Node::RelabelType(relabel) => leftmost_loc(relabel.location, expr_location(&relabel.arg)?),
        Node::CoerceViaIO(coerce) => leftmost_loc(coerce.location, expr_location(&coerce.arg)?),
        Node::ArrayCoerceExpr(coerce) => leftmost_loc(coerce.location, expr_location(&coerce.arg)?),
        Node::ConvertRowtypeExpr(convert) => leftmost_loc(convert.location, expr_location(&convert.arg)?),
        Node::CollateExpr(collate) => expr_location(&collate.arg)?,
        Node::CaseExpr(case) => case.location,
        Node::ArrayExpr(array) => array.location,
        Node::RowExpr(row) => row.location,
        Node::RowCompareExpr(rcexpr) => list_location(&rcexpr.left_args)?,
        Node::CoalesceExpr(coalesce) => coalesce.location,
        Node::MinMaxExpr(minmax) => minmax.location,
        Node::XmlExpr(xexpr) => leftmost_loc(xexpr.location, list_location(&xexpr.args)?),
        Node::NullTest(test) => leftmost_loc(test.location, expr_location(&test.arg)?),
        Node::BooleanTest(test) => leftmost_loc(test.location, expr_location(&test.arg)?),
        Node::CoerceToDomain(coerce) => leftmost_loc(coerce.location, expr_location(&coerce.arg)?),
        Node::CoerceToDomainValue(value) => value.location,
        Node::SetToDefault(def) => def.location,
        Node::InferenceElem(elem) => expr_location(&elem.expr)?,
        Node::TargetEntry(tle) => expr_location(&tle.expr)?,
        Node::CommonTableExpr(cte) => cte.location,
        Node::List(items) => list_location(items)?,
        Node::CaseTestExpr(_)
        | Node::CurrentOfExpr(_)
        | Node::RangeTblRef(_)
        | Node::JoinExpr(_)
        | Node::FromExpr(_)
        | Node::OnConflictExpr(_)
        | Node::SetOperationStmt(_)
        | Node::SortGroupClause(_)
        | Node::WindowClause(_)
        | Node::WithCheckOption(_)
        | Node::RangeTblFunction(_)
        | Node::TableSampleClause(_)
        | Node::Query(_)
        | Node::RangeTblEntry(_) => None,
    };
    Ok(loc)
}

fn raw_list_location(nodes: &[RawNode]) -> Result<Location> {
    for node in nodes {
        if let Some(loc) = raw_expr_location(node)? {
            return Ok(Some(loc));
        }
    }
    Ok(None)
}

fn raw_opt_location(node: Option<&RawNode>) -> Result<Location> {
    node.map_or(Ok(None), raw_expr_location)
}

/// Source location of a raw parse-tree node
pub fn raw_expr_location(node: &RawNode) -> Result<Location> {
    guarded(|| raw_node_location(node))
}

fn raw_node_location(node: &RawNode) -> Result<Location> {
    let loc = match node {
        RawNode::ParamRef(param) => param.location,
        RawNode::AConst(c) => c.location,
        RawNode::RangeVar(rv) => rv.location,
        RawNode::GroupingFunc(grouping) => grouping.location,
        RawNode::SubLink(sublink) => leftmost_loc(raw_opt_location(sublink.test_expr.as_ref())?, sublink.location),
        RawNode::CaseExpr(case) => case.location,
        RawNode::RowExpr(row) => row.location,
        RawNode::CoalesceExpr(coalesce) => coalesce.location,
        RawNode::MinMaxExpr(minmax) => minmax.location,
        RawNode::XmlExpr(xexpr) => leftmost_loc(xexpr.location, raw_list_location(&xexpr.args)?),
        RawNode::NullTest(test) => leftmost_loc(test.location, raw_expr_location(&test.arg)?),
        RawNode::BooleanTest(test) => leftmost_loc(test.location, raw_expr_location(&test.arg)?),
        RawNode::IntoClause(into) => raw_expr_location(&into.rel)?,
        RawNode::List(items) => raw_list_location(items)?,
        // the right operand can't be left of the operator
        RawNode::AExpr(expr) => leftmost_loc(expr.location, raw_opt_location(expr.lexpr.as_ref())?),
        RawNode::ColumnRef(colref) => colref.location,
        RawNode::FuncCall(call) => leftmost_loc(call.location, raw_list_location(&call.args)?),
        RawNode::NamedArgExpr(named) => leftmost_loc(named.location, raw_expr_location(&named.arg)?),
        RawNode::AArrayExpr(array) => array.location,
        RawNode::ResTarget(target) => target.location,
        RawNode::MultiAssignRef(assign) => raw_expr_location(&assign.source)?,
        RawNode::TypeCast(cast) => {
            // CAST(), :: or a typed literal; any component may come first
            let loc = leftmost_loc(raw_expr_location(&cast.arg)?, raw_expr_location(&cast.type_name)?);
            leftmost_loc(loc, cast.location)
        }
        RawNode::CollateClause(collate) => raw_opt_location(collate.arg.as_ref())?,
        RawNode::SortBy(sort) => raw_expr_location(&sort.node)?,
        RawNode::WindowDef(wd) => wd.location,
        RawNode::RangeTableSample(rts) => rts.location,
        RawNode::TypeName(tn) => tn.location,
        RawNode::ColumnDef(coldef) => coldef.location,
        RawNode::GroupingSet(set) => set.location,
        RawNode::XmlSerialize(xs) => xs.location,
        RawNode::WithClause(with) => with.location,
        RawNode::InferClause(infer) => infer.location,
        RawNode::OnConflictClause(onconflict) => onconflict.location,
        RawNode::CommonTableExpr(cte) => cte.location,
        RawNode::SetToDefault(def) => def.location,
        RawNode::Value(_)
        | RawNode::AStar(_)
        | RawNode::Alias(_)
        | RawNode::JoinExpr(_)
        | RawNode::InsertStmt(_)
        | RawNode::DeleteStmt(_)
        | RawNode::UpdateStmt(_)
        | RawNode::SelectStmt(_)
        | RawNode::AIndices(_)
        | RawNode::AIndirection(_)
        | RawNode::RangeSubselect(_)
        | RawNode::RangeFunction(_)
        | RawNode::IndexElem(_)
        | RawNode::LockingClause(_)
        | RawNode::CurrentOfExpr(_) => None,
    };
    Ok(loc)
}

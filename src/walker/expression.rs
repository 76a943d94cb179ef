//! Per-kind recursion over expression trees.
//!
//! `expression_tree_walker` shows the walker every immediate child of a node;
//! `expression_tree_mutator` rebuilds a node of the same kind from its
//! mutated children, copying every other field. Neither calls the callback on
//! the node itself: the callback got to see it before handing it back here.
//!
//! A `Query` is a leaf here. Callbacks that want to look inside a subquery
//! (the subselect of a SubLink, a CTE's query) hand it to the query walker.

use super::stack_depth::guarded;
use super::{
    TreeMutator, TreeWalker, WalkControl, mutate_list, mutate_opt, try_walk, walk_list, walk_opt,
};
use crate::TreeError;
use crate::nodes::*;

/// Show `walker` each immediate child of `node`.
///
/// Returns `Stop` as soon as the walker asks to stop for any child.
pub fn expression_tree_walker<W>(node: &Node, walker: &mut W) -> Result<WalkControl, W::Error>
where
    W: TreeWalker + ?Sized,
{
    guarded(|| walk_children(node, walker))
}

fn walk_children<W>(node: &Node, walker: &mut W) -> Result<WalkControl, W::Error>
where
    W: TreeWalker + ?Sized,
{
    match node {
        Node::Var(_)
        | Node::Const(_)
        | Node::Param(_)
        | Node::CaseTestExpr(_)
        | Node::CoerceToDomainValue(_)
        | Node::SetToDefault(_)
        | Node::CurrentOfExpr(_)
        | Node::RangeTblRef(_)
        | Node::SortGroupClause(_)
        | Node::Query(_) => {
            // no expression children
        }
        Node::Aggref(agg) => {
            try_walk!(walk_list(walker, &agg.direct_args)?);
            try_walk!(walk_list(walker, &agg.args)?);
            try_walk!(walk_list(walker, &agg.order)?);
            try_walk!(walk_list(walker, &agg.distinct)?);
            try_walk!(walk_opt(walker, agg.filter.as_ref())?);
        }
        Node::GroupingFunc(grouping) => {
            try_walk!(walk_list(walker, &grouping.args)?);
        }
        Node::WindowFunc(func) => {
            try_walk!(walk_list(walker, &func.args)?);
            try_walk!(walk_opt(walker, func.filter.as_ref())?);
        }
        Node::ArrayRef(aref) => {
            try_walk!(walk_list(walker, &aref.upper_index)?);
            try_walk!(walk_list(walker, &aref.lower_index)?);
            try_walk!(walker.walk(&aref.expr)?);
            try_walk!(walk_opt(walker, aref.assign_expr.as_ref())?);
        }
        Node::FuncExpr(func) => {
            try_walk!(walk_list(walker, &func.args)?);
        }
        Node::NamedArgExpr(named) => {
            try_walk!(walker.walk(&named.arg)?);
        }
        Node::OpExpr(op) | Node::DistinctExpr(op) | Node::NullIfExpr(op) => {
            try_walk!(walk_list(walker, &op.args)?);
        }
        Node::ScalarArrayOpExpr(op) => {
            try_walk!(walk_list(walker, &op.args)?);
        }
        Node::BoolExpr(expr) => {
            try_walk!(walk_list(walker, &expr.args)?);
        }
        Node::SubLink(sublink) => {
            try_walk!(walk_opt(walker, sublink.test_expr.as_ref())?);
            // the walker decides whether to enter the subquery
            try_walk!(walker.walk(&sublink.subselect)?);
        }
        Node::FieldSelect(fselect) => {
            try_walk!(walker.walk(&fselect.arg)?);
        }
        Node::FieldStore(fstore) => {
            try_walk!(walker.walk(&fstore.arg)?);
            try_walk!(walk_list(walker, &fstore.new_values)?);
        }
        Node::RelabelType(relabel) => {
            try_walk!(walker.walk(&relabel.arg)?);
        }
        Node::CoerceViaIO(coerce) => {
            try_walk!(walker.walk(&coerce.arg)?);
        }
        Node::ArrayCoerceExpr(coerce) => {
            try_walk!(walker.walk(&coerce.arg)?);
        }
        Node::ConvertRowtypeExpr(convert) => {
            try_walk!(walker.walk(&convert.arg)?);
        }
        Node::CollateExpr(collate) => {
            try_walk!(walker.walk(&collate.arg)?);
        }
        Node::CaseExpr(case) => {
            try_walk!(walk_opt(walker, case.arg.as_ref())?);
            for when in &case.whens {
                try_walk!(walker.walk(&when.expr)?);
                try_walk!(walker.walk(&when.result)?);
            }
            try_walk!(walk_opt(walker, case.default.as_ref())?);
        }
        Node::ArrayExpr(array) => {
            try_walk!(walk_list(walker, &array.elements)?);
        }
        Node::RowExpr(row) => {
            // colnames are not expressions
            try_walk!(walk_list(walker, &row.args)?);
        }
        Node::RowCompareExpr(rcexpr) => {
            try_walk!(walk_list(walker, &rcexpr.left_args)?);
            try_walk!(walk_list(walker, &rcexpr.right_args)?);
        }
        Node::CoalesceExpr(coalesce) => {
            try_walk!(walk_list(walker, &coalesce.args)?);
        }
        Node::MinMaxExpr(minmax) => {
            try_walk!(walk_list(walker, &minmax.args)?);
        }
        Node::XmlExpr(xexpr) => {
            try_walk!(walk_list(walker, &xexpr.named_args)?);
            try_walk!(walk_list(walker, &xexpr.args)?);
        }
        Node::NullTest(test) => {
            try_walk!(walker.walk(&test.arg)?);
        }
        Node::BooleanTest(test) => {
            try_walk!(walker.walk(&test.arg)?);
        }
        Node::CoerceToDomain(coerce) => {
            try_walk!(walker.walk(&coerce.arg)?);
        }
        Node::InferenceElem(elem) => {
            try_walk!(walker.walk(&elem.expr)?);
        }
        Node::TargetEntry(tle) => {
            try_walk!(walker.walk(&tle.expr)?);
        }
        Node::WindowClause(wc) => {
            try_walk!(walk_list(walker, &wc.partition_clause)?);
            try_walk!(walk_list(walker, &wc.order_clause)?);
            try_walk!(walk_opt(walker, wc.start_offset.as_ref())?);
            try_walk!(walk_opt(walker, wc.end_offset.as_ref())?);
        }
        Node::CommonTableExpr(cte) => {
            try_walk!(walker.walk(&cte.query)?);
        }
        Node::List(items) => {
            try_walk!(walk_list(walker, items)?);
        }
        Node::FromExpr(from) => {
            try_walk!(walk_list(walker, &from.from_list)?);
            try_walk!(walk_opt(walker, from.quals.as_ref())?);
        }
        Node::OnConflictExpr(onconflict) => {
            try_walk!(walk_list(walker, &onconflict.arbiter_elems)?);
            try_walk!(walk_opt(walker, onconflict.arbiter_where.as_ref())?);
            try_walk!(walk_list(walker, &onconflict.set_list)?);
            try_walk!(walk_opt(walker, onconflict.where_clause.as_ref())?);
            try_walk!(walk_list(walker, &onconflict.excluded_tlist)?);
        }
        Node::JoinExpr(join) => {
            try_walk!(walker.walk(&join.left)?);
            try_walk!(walker.walk(&join.right)?);
            try_walk!(walk_opt(walker, join.quals.as_ref())?);
            // alias and using are not expressions
        }
        Node::SetOperationStmt(setop) => {
            try_walk!(walker.walk(&setop.left)?);
            try_walk!(walker.walk(&setop.right)?);
            // group_clauses are SortGroupClauses, nothing to walk
        }
        Node::WithCheckOption(wco) => {
            try_walk!(walker.walk(&wco.qual)?);
        }
        Node::RangeTblFunction(rtfunc) => {
            try_walk!(walker.walk(&rtfunc.func_expr)?);
        }
        Node::TableSampleClause(tsc) => {
            try_walk!(walk_list(walker, &tsc.args)?);
            try_walk!(walk_opt(walker, tsc.repeatable.as_ref())?);
        }
        Node::RangeTblEntry(_) => {
            // range-table entries are only reachable through the range table walker
            return Err(TreeError::unrecognized(node.tag(), "expression_tree_walker").into());
        }
    }

    Ok(WalkControl::Continue)
}

/// Build a copy of `node` whose immediate children are replaced by
/// `mutator`'s results. All non-child fields are copied verbatim.
pub fn expression_tree_mutator<M>(node: &Node, mutator: &mut M) -> Result<Node, M::Error>
where
    M: TreeMutator + ?Sized,
{
    guarded(|| mutate_children(node, mutator))
}

fn mutate_children<M>(node: &Node, mutator: &mut M) -> Result<Node, M::Error>
where
    M: TreeMutator + ?Sized,
{
    let mutated = match node {
        Node::Var(_)
        | Node::Const(_)
        | Node::Param(_)
        | Node::CaseTestExpr(_)
        | Node::CoerceToDomainValue(_)
        | Node::SetToDefault(_)
        | Node::CurrentOfExpr(_)
        | Node::RangeTblRef(_)
        | Node::SortGroupClause(_)
        | Node::Query(_) => node.clone(),
        Node::Aggref(agg) => Aggref {
            func_oid: agg.func_oid,
            result_type: agg.result_type,
            collation: agg.collation,
            input_collation: agg.input_collation,
            direct_args: mutate_list(mutator, &agg.direct_args)?,
            args: mutate_list(mutator, &agg.args)?,
            order: mutate_list(mutator, &agg.order)?,
            distinct: mutate_list(mutator, &agg.distinct)?,
            filter: mutate_opt(mutator, agg.filter.as_ref())?,
            star: agg.star,
            variadic: agg.variadic,
            kind: agg.kind,
            levels_up: agg.levels_up,
            location: agg.location,
        }
        .into(),
        Node::GroupingFunc(grouping) => GroupingFunc {
            args: mutate_list(mutator, &grouping.args)?,
            refs: grouping.refs.clone(),
            cols: grouping.cols.clone(),
            levels_up: grouping.levels_up,
            location: grouping.location,
        }
        .into(),
        Node::WindowFunc(func) => WindowFunc {
            func_oid: func.func_oid,
            result_type: func.result_type,
            collation: func.collation,
            input_collation: func.input_collation,
            args: mutate_list(mutator, &func.args)?,
            filter: mutate_opt(mutator, func.filter.as_ref())?,
            winref: func.winref,
            star: func.star,
            is_agg: func.is_agg,
            location: func.location,
        }
        .into(),
        Node::ArrayRef(aref) => ArrayRef {
            array_type: aref.array_type,
            element_type: aref.element_type,
            typmod: aref.typmod,
            collation: aref.collation,
            upper_index: mutate_list(mutator, &aref.upper_index)?,
            lower_index: mutate_list(mutator, &aref.lower_index)?,
            expr: mutator.mutate(&aref.expr)?,
            assign_expr: mutate_opt(mutator, aref.assign_expr.as_ref())?,
        }
        .into(),
        Node::FuncExpr(func) => FuncExpr {
            func_oid: func.func_oid,
            result_type: func.result_type,
            returns_set: func.returns_set,
            variadic: func.variadic,
            format: func.format,
            collation: func.collation,
            input_collation: func.input_collation,
            args: mutate_list(mutator, &func.args)?,
            location: func.location,
        }
        .into(),
        Node::NamedArgExpr(named) => NamedArgExpr {
            arg: mutator.mutate(&named.arg)?,
            name: named.name.clone(),
            arg_number: named.arg_number,
            location: named.location,
        }
        .into(),
        Node::OpExpr(op) => Node::OpExpr(Box::new(mutate_op_expr(op, mutator)?)),
        Node::DistinctExpr(op) => Node::DistinctExpr(Box::new(mutate_op_expr(op, mutator)?)),
        Node::NullIfExpr(op) => Node::NullIfExpr(Box::new(mutate_op_expr(op, mutator)?)),
        Node::ScalarArrayOpExpr(op) => ScalarArrayOpExpr {
            op_oid: op.op_oid,
            func_oid: op.func_oid,
            use_or: op.use_or,
            input_collation: op.input_collation,
            args: mutate_list(mutator, &op.args)?,
            location: op.location,
        }
        .into(),
        Node::BoolExpr(expr) => BoolExpr {
            op: expr.op,
            args: mutate_list(mutator, &expr.args)?,
            location: expr.location,
        }
        .into(),
        Node::SubLink(sublink) => SubLink {
            link_type: sublink.link_type,
            link_id: sublink.link_id,
            test_expr: mutate_opt(mutator, sublink.test_expr.as_ref())?,
            oper_name: sublink.oper_name.clone(),
            // the mutator decides whether to enter the subquery
            subselect: mutator.mutate(&sublink.subselect)?,
            location: sublink.location,
        }
        .into(),
        Node::FieldSelect(fselect) => FieldSelect {
            arg: mutator.mutate(&fselect.arg)?,
            field_number: fselect.field_number,
            result_type: fselect.result_type,
            typmod: fselect.typmod,
            collation: fselect.collation,
        }
        .into(),
        Node::FieldStore(fstore) => FieldStore {
            arg: mutator.mutate(&fstore.arg)?,
            new_values: mutate_list(mutator, &fstore.new_values)?,
            field_numbers: fstore.field_numbers.clone(),
            result_type: fstore.result_type,
        }
        .into(),
        Node::RelabelType(relabel) => RelabelType {
            arg: mutator.mutate(&relabel.arg)?,
            result_type: relabel.result_type,
            typmod: relabel.typmod,
            collation: relabel.collation,
            format: relabel.format,
            location: relabel.location,
        }
        .into(),
        Node::CoerceViaIO(coerce) => CoerceViaIO {
            arg: mutator.mutate(&coerce.arg)?,
            result_type: coerce.result_type,
            collation: coerce.collation,
            format: coerce.format,
            location: coerce.location,
        }
        .into(),
        Node::ArrayCoerceExpr(coerce) => ArrayCoerceExpr {
            arg: mutator.mutate(&coerce.arg)?,
            elem_func_oid: coerce.elem_func_oid,
            result_type: coerce.result_type,
            typmod: coerce.typmod,
            collation: coerce.collation,
            is_explicit: coerce.is_explicit,
            format: coerce.format,
            location: coerce.location,
        }
        .into(),
        Node::ConvertRowtypeExpr(convert) => ConvertRowtypeExpr {
            arg: mutator.mutate(&convert.arg)?,
            result_type: convert.result_type,
            format: convert.format,
            location: convert.location,
        }
        .into(),
        Node::CollateExpr(collate) => CollateExpr {
            arg: mutator.mutate(&collate.arg)?,
            collation: collate.collation,
            location: collate.location,
        }
        .into(),
        Node::CaseExpr(case) => {
            let arg = mutate_opt(mutator, case.arg.as_ref())?;
            let whens = case
                .whens
                .iter()
                .map(|when| -> Result<CaseWhen, M::Error> {
                    Ok(CaseWhen {
                        expr: mutator.mutate(&when.expr)?,
                        result: mutator.mutate(&when.result)?,
                        location: when.location,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            CaseExpr {
                case_type: case.case_type,
                collation: case.collation,
                arg,
                whens,
                default: mutate_opt(mutator, case.default.as_ref())?,
                location: case.location,
            }
            .into()
        }
        Node::ArrayExpr(array) => ArrayExpr {
            array_type: array.array_type,
            collation: array.collation,
            element_type: array.element_type,
            elements: mutate_list(mutator, &array.elements)?,
            multidims: array.multidims,
            location: array.location,
        }
        .into(),
        Node::RowExpr(row) => RowExpr {
            args: mutate_list(mutator, &row.args)?,
            row_type: row.row_type,
            format: row.format,
            colnames: row.colnames.clone(),
            location: row.location,
        }
        .into(),
        Node::RowCompareExpr(rcexpr) => RowCompareExpr {
            compare: rcexpr.compare,
            op_oids: rcexpr.op_oids.clone(),
            op_families: rcexpr.op_families.clone(),
            input_collations: rcexpr.input_collations.clone(),
            left_args: mutate_list(mutator, &rcexpr.left_args)?,
            right_args: mutate_list(mutator, &rcexpr.right_args)?,
        }
        .into(),
        Node::CoalesceExpr(coalesce) => CoalesceExpr {
            coalesce_type: coalesce.coalesce_type,
            collation: coalesce.collation,
            args: mutate_list(mutator, &coalesce.args)?,
            location: coalesce.location,
        }
        .into(),
        Node::MinMaxExpr(minmax) => MinMaxExpr {
            minmax_type: minmax.minmax_type,
            collation: minmax.collation,
            input_collation: minmax.input_collation,
            op: minmax.op,
            args: mutate_list(mutator, &minmax.args)?,
            location: minmax.location,
        }
        .into(),
        Node::XmlExpr(xexpr) => XmlExpr {
            op: xexpr.op,
            name: xexpr.name.clone(),
            named_args: mutate_list(mutator, &xexpr.named_args)?,
            arg_names: xexpr.arg_names.clone(),
            args: mutate_list(mutator, &xexpr.args)?,
            xml_option: xexpr.xml_option,
            type_oid: xexpr.type_oid,
            typmod: xexpr.typmod,
            location: xexpr.location,
        }
        .into(),
        Node::NullTest(test) => NullTest {
            arg: mutator.mutate(&test.arg)?,
            test: test.test,
            arg_is_row: test.arg_is_row,
            location: test.location,
        }
        .into(),
        Node::BooleanTest(test) => BooleanTest {
            arg: mutator.mutate(&test.arg)?,
            test: test.test,
            location: test.location,
        }
        .into(),
        Node::CoerceToDomain(coerce) => CoerceToDomain {
            arg: mutator.mutate(&coerce.arg)?,
            result_type: coerce.result_type,
            typmod: coerce.typmod,
            collation: coerce.collation,
            format: coerce.format,
            location: coerce.location,
        }
        .into(),
        Node::InferenceElem(elem) => InferenceElem {
            expr: mutator.mutate(&elem.expr)?,
            collation: elem.collation,
            opclass: elem.opclass,
        }
        .into(),
        Node::TargetEntry(tle) => TargetEntry {
            expr: mutator.mutate(&tle.expr)?,
            resno: tle.resno,
            name: tle.name.clone(),
            sort_group_ref: tle.sort_group_ref,
            orig_table: tle.orig_table,
            orig_column: tle.orig_column,
            junk: tle.junk,
        }
        .into(),
        Node::WindowClause(wc) => WindowClause {
            name: wc.name.clone(),
            ref_name: wc.ref_name.clone(),
            partition_clause: mutate_list(mutator, &wc.partition_clause)?,
            order_clause: mutate_list(mutator, &wc.order_clause)?,
            frame_options: wc.frame_options,
            start_offset: mutate_opt(mutator, wc.start_offset.as_ref())?,
            end_offset: mutate_opt(mutator, wc.end_offset.as_ref())?,
            winref: wc.winref,
            copied_order: wc.copied_order,
        }
        .into(),
        Node::CommonTableExpr(cte) => CommonTableExpr {
            name: cte.name.clone(),
            alias_colnames: cte.alias_colnames.clone(),
            query: mutator.mutate(&cte.query)?,
            location: cte.location,
            recursive: cte.recursive,
            refcount: cte.refcount,
            colnames: cte.colnames.clone(),
            coltypes: cte.coltypes.clone(),
            coltypmods: cte.coltypmods.clone(),
            colcollations: cte.colcollations.clone(),
        }
        .into(),
        Node::List(items) => Node::List(mutate_list(mutator, items)?),
        Node::FromExpr(from) => FromExpr {
            from_list: mutate_list(mutator, &from.from_list)?,
            quals: mutate_opt(mutator, from.quals.as_ref())?,
        }
        .into(),
        Node::OnConflictExpr(onconflict) => OnConflictExpr {
            action: onconflict.action,
            arbiter_elems: mutate_list(mutator, &onconflict.arbiter_elems)?,
            arbiter_where: mutate_opt(mutator, onconflict.arbiter_where.as_ref())?,
            constraint: onconflict.constraint,
            set_list: mutate_list(mutator, &onconflict.set_list)?,
            where_clause: mutate_opt(mutator, onconflict.where_clause.as_ref())?,
            excluded_rtindex: onconflict.excluded_rtindex,
            excluded_tlist: mutate_list(mutator, &onconflict.excluded_tlist)?,
        }
        .into(),
        Node::JoinExpr(join) => JoinExpr {
            join_type: join.join_type,
            is_natural: join.is_natural,
            left: mutator.mutate(&join.left)?,
            right: mutator.mutate(&join.right)?,
            using: join.using.clone(),
            quals: mutate_opt(mutator, join.quals.as_ref())?,
            alias: join.alias.clone(),
            rtindex: join.rtindex,
        }
        .into(),
        Node::SetOperationStmt(setop) => SetOperationStmt {
            op: setop.op,
            all: setop.all,
            left: mutator.mutate(&setop.left)?,
            right: mutator.mutate(&setop.right)?,
            col_types: setop.col_types.clone(),
            col_typmods: setop.col_typmods.clone(),
            col_collations: setop.col_collations.clone(),
            group_clauses: setop.group_clauses.clone(),
        }
        .into(),
        Node::WithCheckOption(wco) => WithCheckOption {
            kind: wco.kind,
            relname: wco.relname.clone(),
            polname: wco.polname.clone(),
            qual: mutator.mutate(&wco.qual)?,
            cascaded: wco.cascaded,
        }
        .into(),
        Node::RangeTblFunction(rtfunc) => RangeTblFunction {
            func_expr: mutator.mutate(&rtfunc.func_expr)?,
            col_count: rtfunc.col_count,
            colnames: rtfunc.colnames.clone(),
            coltypes: rtfunc.coltypes.clone(),
            coltypmods: rtfunc.coltypmods.clone(),
            colcollations: rtfunc.colcollations.clone(),
        }
        .into(),
        Node::TableSampleClause(tsc) => TableSampleClause {
            handler: tsc.handler,
            args: mutate_list(mutator, &tsc.args)?,
            repeatable: mutate_opt(mutator, tsc.repeatable.as_ref())?,
        }
        .into(),
        Node::RangeTblEntry(_) => {
            return Err(TreeError::unrecognized(node.tag(), "expression_tree_mutator").into());
        }
    };

    Ok(mutated)
}

fn mutate_op_expr<M>(op: &OpExpr, mutator: &mut M) -> Result<OpExpr, M::Error>
where
    M: TreeMutator + ?Sized,
{
    Ok(OpExpr {
        op_oid: op.op_oid,
        func_oid: op.func_oid,
        result_type: op.result_type,
        returns_set: op.returns_set,
        collation: op.collation,
        input_collation: op.input_collation,
        args: mutate_list(mutator, &op.args)?,
        location: op.location,
    })
}

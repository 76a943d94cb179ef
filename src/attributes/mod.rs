//! Attribute resolution for expression nodes: result type, type modifier,
//! collations and source location, without the caller matching on kinds.
//!
//! The values are read from fields filled in by parse analysis; nothing here
//! infers or checks types.

pub mod coercion;
pub mod location;
pub mod returns_set;

use tracing::debug;

use crate::nodes::{Node, SubLink, SubLinkType, TargetEntry, XmlExprOp};
use crate::types::collation::DEFAULT_COLLATION_OID;
use crate::types::{BOOL_OID, BuiltinTypeCatalog, INT4_OID, INVALID_OID, Oid, RECORD_OID, TEXT_OID, TypeCatalog, XML_OID};
use crate::walker::stack_depth::guarded;
use crate::{Result, TreeError};

pub use coercion::{expr_is_length_coercion, strip_implicit_coercions};
pub use location::{expr_location, leftmost_loc, raw_expr_location};
pub use returns_set::expression_returns_set;

static BUILTIN_CATALOG: BuiltinTypeCatalog = BuiltinTypeCatalog;

/// Answers attribute questions about expression nodes, consulting a type
/// catalog where the answer depends on type metadata
#[derive(Clone, Copy)]
pub struct AttributeResolver<'a> {
    catalog: &'a dyn TypeCatalog,
}

impl<'a> AttributeResolver<'a> {
    pub fn new(catalog: &'a dyn TypeCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'a dyn TypeCatalog {
        self.catalog
    }

    /// Type OID of the value the expression produces
    pub fn expr_type(&self, node: &Node) -> Result<Oid> {
        guarded(|| self.result_type(node))
    }

    fn result_type(&self, node: &Node) -> Result<Oid> {
        let type_oid = match node {
            Node::Var(var) => var.type_oid,
            Node::Const(c) => c.type_oid,
            Node::Param(param) => param.type_oid,
            Node::Aggref(agg) => agg.result_type,
            Node::GroupingFunc(_) => INT4_OID,
            Node::WindowFunc(func) => func.result_type,
            Node::ArrayRef(aref) => {
                // slices and assignments yield the whole array
                if aref.is_slice() || aref.assign_expr.is_some() {
                    aref.array_type
                } else {
                    aref.element_type
                }
            }
            Node::FuncExpr(func) => func.result_type,
            Node::NamedArgExpr(named) => self.expr_type(&named.arg)?,
            Node::OpExpr(op) | Node::DistinctExpr(op) | Node::NullIfExpr(op) => op.result_type,
            Node::ScalarArrayOpExpr(_) => BOOL_OID,
            Node::BoolExpr(_) => BOOL_OID,
            Node::SubLink(sublink) => match sublink.link_type {
                SubLinkType::Expr | SubLinkType::Array => {
                    let tle = sublink_first_target(sublink)?;
                    let elem_type = self.expr_type(&tle.expr)?;
                    if sublink.link_type == SubLinkType::Array {
                        self.catalog
                            .promoted_array_type(elem_type)
                            .ok_or(TreeError::MissingArrayType(elem_type))?
                    } else {
                        elem_type
                    }
                }
                SubLinkType::MultiExpr => RECORD_OID,
                SubLinkType::Exists
                | SubLinkType::All
                | SubLinkType::Any
                | SubLinkType::RowCompare
                | SubLinkType::Cte => BOOL_OID,
            },
            Node::FieldSelect(fselect) => fselect.result_type,
            Node::FieldStore(fstore) => fstore.result_type,
            Node::RelabelType(relabel) => relabel.result_type,
            Node::CoerceViaIO(coerce) => coerce.result_type,
            Node::ArrayCoerceExpr(coerce) => coerce.result_type,
            Node::ConvertRowtypeExpr(convert) => convert.result_type,
            Node::CollateExpr(collate) => self.expr_type(&collate.arg)?,
            Node::CaseExpr(case) => case.case_type,
            Node::CaseTestExpr(test) => test.type_oid,
            Node::ArrayExpr(array) => array.array_type,
            Node::RowExpr(row) => row.row_type,
            Node::RowCompareExpr(_) => BOOL_OID,
            Node::CoalesceExpr(coalesce) => coalesce.coalesce_type,
            Node::MinMaxExpr(minmax) => minmax.minmax_type,
            Node::XmlExpr(xexpr) => match xexpr.op {
                XmlExprOp::IsDocument => BOOL_OID,
                XmlExprOp::Serialize => TEXT_OID,
                _ => XML_OID,
            },
            Node::NullTest(_) => BOOL_OID,
            Node::BooleanTest(_) => BOOL_OID,
            Node::CoerceToDomain(coerce) => coerce.result_type,
            Node::CoerceToDomainValue(value) => value.type_oid,
            Node::SetToDefault(def) => def.type_oid,
            Node::CurrentOfExpr(_) => BOOL_OID,
            Node::InferenceElem(elem) => self.expr_type(&elem.expr)?,
            Node::TargetEntry(_)
            | Node::List(_)
            | Node::RangeTblRef(_)
            | Node::JoinExpr(_)
            | Node::FromExpr(_)
            | Node::OnConflictExpr(_)
            | Node::SetOperationStmt(_)
            | Node::SortGroupClause(_)
            | Node::WindowClause(_)
            | Node::WithCheckOption(_)
            | Node::CommonTableExpr(_)
            | Node::RangeTblFunction(_)
            | Node::TableSampleClause(_)
            | Node::Query(_)
            | Node::RangeTblEntry(_) => return Err(TreeError::unrecognized(node.tag(), "expr_type")),
        };
        Ok(type_oid)
    }

    /// Type modifier of the expression's result, -1 when not determinable
    pub fn expr_typmod(&self, node: &Node) -> Result<i32> {
        guarded(|| self.result_typmod(node))
    }

    fn result_typmod(&self, node: &Node) -> Result<i32> {
        let typmod = match node {
            Node::Var(var) => var.typmod,
            Node::Const(c) => c.typmod,
            Node::Param(param) => param.typmod,
            Node::ArrayRef(aref) => aref.typmod,
            Node::FuncExpr(_) => expr_is_length_coercion(node).unwrap_or(-1),
            Node::NamedArgExpr(named) => self.expr_typmod(&named.arg)?,
            Node::NullIfExpr(op) => {
                // the result is the first argument or NULL
                match op.args.first() {
                    Some(first) => self.expr_typmod(first)?,
                    None => -1,
                }
            }
            Node::SubLink(sublink) => match sublink.link_type {
                // an ARRAY sublink's typmod is its element's
                SubLinkType::Expr | SubLinkType::Array => {
                    self.expr_typmod(&sublink_first_target(sublink)?.expr)?
                }
                _ => -1,
            },
            Node::FieldSelect(fselect) => fselect.typmod,
            Node::RelabelType(relabel) => relabel.typmod,
            Node::ArrayCoerceExpr(coerce) => coerce.typmod,
            Node::CollateExpr(collate) => self.expr_typmod(&collate.arg)?,
            Node::CaseExpr(case) => {
                // every arm must share the CASE's type and one typmod
                let Some(default) = &case.default else {
                    return Ok(-1);
                };
                let arms = std::iter::once(default).chain(case.whens.iter().map(|when| &when.result));
                self.common_typmod(case.case_type, arms)?
            }
            Node::CaseTestExpr(test) => test.typmod,
            Node::ArrayExpr(array) => {
                let common_type = if array.multidims {
                    array.array_type
                } else {
                    array.element_type
                };
                self.common_typmod(common_type, array.elements.iter())?
            }
            Node::CoalesceExpr(coalesce) => self.common_typmod(coalesce.coalesce_type, coalesce.args.iter())?,
            Node::MinMaxExpr(minmax) => self.common_typmod(minmax.minmax_type, minmax.args.iter())?,
            Node::CoerceToDomain(coerce) => coerce.typmod,
            Node::CoerceToDomainValue(value) => value.typmod,
            Node::SetToDefault(def) => def.typmod,
            Node::Aggref(_)
            | Node::GroupingFunc(_)
            | Node::WindowFunc(_)
            | Node::OpExpr(_)
            | Node::DistinctExpr(_)
            | Node::ScalarArrayOpExpr(_)
            | Node::BoolExpr(_)
            | Node::FieldStore(_)
            | Node::CoerceViaIO(_)
            | Node::ConvertRowtypeExpr(_)
            | Node::RowExpr(_)
            | Node::RowCompareExpr(_)
            | Node::XmlExpr(_)
            | Node::NullTest(_)
            | Node::BooleanTest(_)
            | Node::CurrentOfExpr(_) => -1,
            Node::InferenceElem(elem) => self.expr_typmod(&elem.expr)?,
            Node::TargetEntry(_)
            | Node::List(_)
            | Node::RangeTblRef(_)
            | Node::JoinExpr(_)
            | Node::FromExpr(_)
            | Node::OnConflictExpr(_)
            | Node::SetOperationStmt(_)
            | Node::SortGroupClause(_)
            | Node::WindowClause(_)
            | Node::WithCheckOption(_)
            | Node::CommonTableExpr(_)
            | Node::RangeTblFunction(_)
            | Node::TableSampleClause(_)
            | Node::Query(_)
            | Node::RangeTblEntry(_) => return Err(TreeError::unrecognized(node.tag(), "expr_typmod")),
        };
        Ok(typmod)
    }

    /// Typmod shared by all `items` when each is of `common_type`; -1 when
    /// any disagrees or the first has none.
    fn common_typmod<'n>(&self, common_type: Oid, mut items: impl Iterator<Item = &'n Node>) -> Result<i32> {
        let Some(first) = items.next() else {
            return Ok(-1);
        };
        if self.expr_type(first)? != common_type {
            return Ok(-1);
        }
        let typmod = self.expr_typmod(first)?;
        if typmod < 0 {
            return Ok(-1);
        }
        for item in items {
            if self.expr_type(item)? != common_type || self.expr_typmod(item)? != typmod {
                return Ok(-1);
            }
        }
        Ok(typmod)
    }

    /// Collation of the expression's result, `INVALID_OID` for
    /// non-collatable results
    pub fn expr_collation(&self, node: &Node) -> Result<Oid> {
        guarded(|| self.result_collation(node))
    }

    fn result_collation(&self, node: &Node) -> Result<Oid> {
        let collation = match node {
            Node::Var(var) => var.collation,
            Node::Const(c) => c.collation,
            Node::Param(param) => param.collation,
            Node::Aggref(agg) => agg.collation,
            Node::GroupingFunc(_) => INVALID_OID,
            Node::WindowFunc(func) => func.collation,
            Node::ArrayRef(aref) => aref.collation,
            Node::FuncExpr(func) => func.collation,
            Node::NamedArgExpr(named) => self.expr_collation(&named.arg)?,
            Node::OpExpr(op) | Node::DistinctExpr(op) | Node::NullIfExpr(op) => op.collation,
            Node::ScalarArrayOpExpr(_) => INVALID_OID,
            Node::BoolExpr(_) => INVALID_OID,
            Node::SubLink(sublink) => match sublink.link_type {
                // collation doesn't change when the result is made an array
                SubLinkType::Expr | SubLinkType::Array => {
                    self.expr_collation(&sublink_first_target(sublink)?.expr)?
                }
                _ => INVALID_OID,
            },
            Node::FieldSelect(fselect) => fselect.collation,
            Node::FieldStore(_) => INVALID_OID,
            Node::RelabelType(relabel) => relabel.collation,
            Node::CoerceViaIO(coerce) => coerce.collation,
            Node::ArrayCoerceExpr(coerce) => coerce.collation,
            Node::ConvertRowtypeExpr(_) => INVALID_OID,
            Node::CollateExpr(collate) => collate.collation,
            Node::CaseExpr(case) => case.collation,
            Node::CaseTestExpr(test) => test.collation,
            Node::ArrayExpr(array) => array.collation,
            Node::RowExpr(_) => INVALID_OID,
            Node::RowCompareExpr(_) => INVALID_OID,
            Node::CoalesceExpr(coalesce) => coalesce.collation,
            Node::MinMaxExpr(minmax) => minmax.collation,
            Node::XmlExpr(xexpr) => {
                if xexpr.op == XmlExprOp::Serialize {
                    DEFAULT_COLLATION_OID
                } else {
                    INVALID_OID
                }
            }
            Node::NullTest(_) => INVALID_OID,
            Node::BooleanTest(_) => INVALID_OID,
            Node::CoerceToDomain(coerce) => coerce.collation,
            Node::CoerceToDomainValue(value) => value.collation,
            Node::SetToDefault(def) => def.collation,
            Node::CurrentOfExpr(_) => INVALID_OID,
            Node::InferenceElem(elem) => self.expr_collation(&elem.expr)?,
            Node::TargetEntry(_)
            | Node::List(_)
            | Node::RangeTblRef(_)
            | Node::JoinExpr(_)
            | Node::FromExpr(_)
            | Node::OnConflictExpr(_)
            | Node::SetOperationStmt(_)
            | Node::SortGroupClause(_)
            | Node::WindowClause(_)
            | Node::WithCheckOption(_)
            | Node::CommonTableExpr(_)
            | Node::RangeTblFunction(_)
            | Node::TableSampleClause(_)
            | Node::Query(_)
            | Node::RangeTblEntry(_) => return Err(TreeError::unrecognized(node.tag(), "expr_collation")),
        };
        Ok(collation)
    }
}

impl AttributeResolver<'_> {
    /// [`expr_set_collation`], checking in debug builds that a valid
    /// collation only lands on an expression of a collatable type
    pub fn set_collation(&self, node: &mut Node, collation: Oid) -> Result<()> {
        if cfg!(debug_assertions)
            && collation != INVALID_OID
            && node.is_expr()
            && let Ok(type_oid) = self.expr_type(node)
        {
            debug_assert!(
                self.catalog.is_collatable(type_oid),
                "collation {} assigned to {} of non-collatable type {}",
                collation,
                node.tag(),
                type_oid
            );
        }
        expr_set_collation(node, collation)
    }
}

impl Default for AttributeResolver<'static> {
    fn default() -> Self {
        Self::new(&BUILTIN_CATALOG)
    }
}

impl std::fmt::Debug for AttributeResolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttributeResolver").finish_non_exhaustive()
    }
}

/// First target entry of an analyzed sublink's subselect
fn sublink_first_target(sublink: &SubLink) -> Result<&TargetEntry> {
    let query = sublink.subselect.as_query().ok_or(TreeError::UntransformedSubLink)?;
    let first = query.target_list.first().ok_or(TreeError::UntransformedSubLink)?;
    first
        .as_target_entry()
        .ok_or_else(|| TreeError::unrecognized(first.tag(), "sublink target list"))
}

/// Collation the expression's own evaluation uses, `INVALID_OID` for kinds
/// that have none
pub fn expr_input_collation(node: &Node) -> Oid {
    match node {
        Node::Aggref(agg) => agg.input_collation,
        Node::WindowFunc(func) => func.input_collation,
        Node::FuncExpr(func) => func.input_collation,
        Node::OpExpr(op) | Node::DistinctExpr(op) | Node::NullIfExpr(op) => op.input_collation,
        Node::ScalarArrayOpExpr(op) => op.input_collation,
        Node::MinMaxExpr(minmax) => minmax.input_collation,
        _ => INVALID_OID,
    }
}

/// Install the result collation on an expression node.
///
/// Expression kinds that carry no result collation are left unchanged.
pub fn expr_set_collation(node: &mut Node, collation: Oid) -> Result<()> {
    let tag = node.tag();
    match node {
        Node::Var(var) => var.collation = collation,
        Node::Const(c) => c.collation = collation,
        Node::Param(param) => param.collation = collation,
        Node::Aggref(agg) => agg.collation = collation,
        Node::WindowFunc(func) => func.collation = collation,
        Node::ArrayRef(aref) => aref.collation = collation,
        Node::FuncExpr(func) => func.collation = collation,
        Node::OpExpr(op) | Node::DistinctExpr(op) | Node::NullIfExpr(op) => op.collation = collation,
        Node::FieldSelect(fselect) => fselect.collation = collation,
        Node::RelabelType(relabel) => relabel.collation = collation,
        Node::CoerceViaIO(coerce) => coerce.collation = collation,
        Node::ArrayCoerceExpr(coerce) => coerce.collation = collation,
        Node::CollateExpr(collate) => collate.collation = collation,
        Node::CaseExpr(case) => case.collation = collation,
        Node::CaseTestExpr(test) => test.collation = collation,
        Node::ArrayExpr(array) => array.collation = collation,
        Node::CoalesceExpr(coalesce) => coalesce.collation = collation,
        Node::MinMaxExpr(minmax) => minmax.collation = collation,
        Node::CoerceToDomain(coerce) => coerce.collation = collation,
        Node::CoerceToDomainValue(value) => value.collation = collation,
        Node::SetToDefault(def) => def.collation = collation,
        Node::GroupingFunc(_)
        | Node::NamedArgExpr(_)
        | Node::ScalarArrayOpExpr(_)
        | Node::BoolExpr(_)
        | Node::SubLink(_)
        | Node::FieldStore(_)
        | Node::ConvertRowtypeExpr(_)
        | Node::RowExpr(_)
        | Node::RowCompareExpr(_)
        | Node::XmlExpr(_)
        | Node::NullTest(_)
        | Node::BooleanTest(_)
        | Node::CurrentOfExpr(_)
        | Node::InferenceElem(_) => {
            debug!("{} has no collation slot, ignoring collation {}", tag, collation);
        }
        Node::TargetEntry(_)
        | Node::List(_)
        | Node::RangeTblRef(_)
        | Node::JoinExpr(_)
        | Node::FromExpr(_)
        | Node::OnConflictExpr(_)
        | Node::SetOperationStmt(_)
        | Node::SortGroupClause(_)
        | Node::WindowClause(_)
        | Node::WithCheckOption(_)
        | Node::CommonTableExpr(_)
        | Node::RangeTblFunction(_)
        | Node::TableSampleClause(_)
        | Node::Query(_)
        | Node::RangeTblEntry(_) => return Err(TreeError::unrecognized(tag, "expr_set_collation")),
    }
    Ok(())
}

/// Install the input collation on an expression node; a no-op for kinds
/// without one
pub fn expr_set_input_collation(node: &mut Node, input_collation: Oid) {
    match node {
        Node::Aggref(agg) => agg.input_collation = input_collation,
        Node::WindowFunc(func) => func.input_collation = input_collation,
        Node::FuncExpr(func) => func.input_collation = input_collation,
        Node::OpExpr(op) | Node::DistinctExpr(op) | Node::NullIfExpr(op) => op.input_collation = input_collation,
        Node::ScalarArrayOpExpr(op) => op.input_collation = input_collation,
        Node::MinMaxExpr(minmax) => minmax.input_collation = input_collation,
        _ => {}
    }
}

/// [`AttributeResolver::expr_type`] against the built-in catalog
pub fn expr_type(node: &Node) -> Result<Oid> {
    AttributeResolver::default().expr_type(node)
}

/// [`AttributeResolver::expr_typmod`] against the built-in catalog
pub fn expr_typmod(node: &Node) -> Result<i32> {
    AttributeResolver::default().expr_typmod(node)
}

/// [`AttributeResolver::expr_collation`] against the built-in catalog
pub fn expr_collation(node: &Node) -> Result<Oid> {
    AttributeResolver::default().expr_collation(node)
}

/// [`AttributeResolver::relabel_to_typmod`] against the built-in catalog
pub fn relabel_to_typmod(node: &Node, typmod: i32) -> Result<Node> {
    AttributeResolver::default().relabel_to_typmod(node, typmod)
}

use tracing::debug;

use super::AttributeResolver;
use crate::Result;
use crate::nodes::makefuncs::make_relabel_type;
use crate::nodes::{CoercionForm, Node};
use crate::types::INT4_OID;

/// If `node` only coerces its argument to a new type modifier, return that
/// modifier.
///
/// Recognized forms are a length-coercion function call (an explicit or
/// implicit cast taking the typmod as a non-null int4 constant second
/// argument) and an array coercion with a non-negative result typmod.
pub fn expr_is_length_coercion(node: &Node) -> Option<i32> {
    match node {
        Node::FuncExpr(func) => {
            if func.format != CoercionForm::ExplicitCast && func.format != CoercionForm::ImplicitCast {
                return None;
            }
            if func.args.len() < 2 || func.args.len() > 3 {
                return None;
            }
            match &func.args[1] {
                Node::Const(second) if second.type_oid == INT4_OID => second.value.as_i32(),
                _ => None,
            }
        }
        Node::ArrayCoerceExpr(coerce) if coerce.typmod >= 0 => Some(coerce.typmod),
        _ => None,
    }
}

/// Peel off coercions that analysis inserted implicitly and return the first
/// node the user actually wrote.
pub fn strip_implicit_coercions(node: &Node) -> &Node {
    let mut current = node;
    loop {
        let inner = match current {
            Node::FuncExpr(func) if func.format == CoercionForm::ImplicitCast => func.args.first(),
            Node::RelabelType(relabel) if relabel.format == CoercionForm::ImplicitCast => Some(&relabel.arg),
            Node::CoerceViaIO(coerce) if coerce.format == CoercionForm::ImplicitCast => Some(&coerce.arg),
            Node::ArrayCoerceExpr(coerce) if coerce.format == CoercionForm::ImplicitCast => Some(&coerce.arg),
            Node::ConvertRowtypeExpr(convert) if convert.format == CoercionForm::ImplicitCast => {
                Some(&convert.arg)
            }
            Node::CoerceToDomain(coerce) if coerce.format == CoercionForm::ImplicitCast => Some(&coerce.arg),
            _ => None,
        };
        match inner {
            Some(next) => {
                debug!("Stripping implicit {}", current.tag());
                current = next;
            }
            None => return current,
        }
    }
}

impl AttributeResolver<'_> {
    /// Relabel `node` to carry `typmod`, keeping its exposed type and
    /// collation. Existing RelabelType wrappers are removed first.
    pub fn relabel_to_typmod(&self, node: &Node, typmod: i32) -> Result<Node> {
        let type_oid = self.expr_type(node)?;
        let collation = self.expr_collation(node)?;

        let mut inner = node;
        while let Node::RelabelType(relabel) = inner {
            inner = &relabel.arg;
        }

        Ok(make_relabel_type(
            inner.clone(),
            type_oid,
            typmod,
            collation,
            CoercionForm::ExplicitCast,
        ))
    }
}

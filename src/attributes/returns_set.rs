use crate::nodes::Node;
use crate::walker::{TreeWalker, WalkControl, expression_tree_walker};
use crate::{Result, TreeError};

/// Stops at the first set-returning call
struct ReturnsSetWalker;

impl TreeWalker for ReturnsSetWalker {
    type Error = TreeError;

    fn walk(&mut self, node: &Node) -> Result<WalkControl> {
        match node {
            Node::FuncExpr(func) if func.returns_set => return Ok(WalkControl::Stop),
            Node::OpExpr(op) if op.returns_set => return Ok(WalkControl::Stop),
            // never return a set, whatever their arguments
            Node::Aggref(_)
            | Node::WindowFunc(_)
            | Node::DistinctExpr(_)
            | Node::NullIfExpr(_)
            | Node::ScalarArrayOpExpr(_)
            | Node::BoolExpr(_)
            | Node::SubLink(_)
            | Node::ArrayExpr(_)
            | Node::RowExpr(_)
            | Node::RowCompareExpr(_)
            | Node::CoalesceExpr(_)
            | Node::MinMaxExpr(_)
            | Node::XmlExpr(_) => return Ok(WalkControl::Continue),
            _ => {}
        }
        expression_tree_walker(node, self)
    }
}

/// Whether evaluating `node` can yield more than one row
pub fn expression_returns_set(node: &Node) -> Result<bool> {
    Ok(ReturnsSetWalker.walk(node)?.is_stop())
}

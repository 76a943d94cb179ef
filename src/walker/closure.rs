//! Closure front ends for the walkers and mutators.
//!
//! The closure is shown every node first, parents before children; when it
//! lets a node through, default recursion continues below it. Nested queries
//! are entered through the query walker with the caller's flags.

use super::expression::{expression_tree_mutator, expression_tree_walker};
use super::query::{query_tree_mutator, query_tree_walker};
use super::raw::raw_expression_tree_walker;
use super::{RawTreeWalker, TraversalFlags, TreeMutator, TreeWalker, WalkControl};
use crate::TreeError;
use crate::nodes::{Node, Query, RawNode};

struct ClosureWalker<F> {
    callback: F,
    flags: TraversalFlags,
}

impl<F, E> TreeWalker for ClosureWalker<F>
where
    F: FnMut(&Node) -> Result<WalkControl, E>,
    E: From<TreeError>,
{
    type Error = E;

    fn walk(&mut self, node: &Node) -> Result<WalkControl, E> {
        if (self.callback)(node)?.is_stop() {
            return Ok(WalkControl::Stop);
        }
        match node {
            Node::Query(query) => {
                let flags = self.flags;
                query_tree_walker(query, self, flags)
            }
            // contents are walked by the range table walker
            Node::RangeTblEntry(_) => Ok(WalkControl::Continue),
            _ => expression_tree_walker(node, self),
        }
    }
}

struct ClosureMutator<F> {
    callback: F,
    flags: TraversalFlags,
}

impl<F, E> TreeMutator for ClosureMutator<F>
where
    F: FnMut(&Node) -> Result<Option<Node>, E>,
    E: From<TreeError>,
{
    type Error = E;

    fn mutate(&mut self, node: &Node) -> Result<Node, E> {
        if let Some(replacement) = (self.callback)(node)? {
            return Ok(replacement);
        }
        match node {
            Node::Query(query) => {
                let flags = self.flags;
                Ok(Node::Query(Box::new(query_tree_mutator(query, self, flags)?)))
            }
            Node::RangeTblEntry(_) => Ok(node.clone()),
            _ => expression_tree_mutator(node, self),
        }
    }
}

struct ClosureRawWalker<F> {
    callback: F,
}

impl<F, E> RawTreeWalker for ClosureRawWalker<F>
where
    F: FnMut(&RawNode) -> Result<WalkControl, E>,
    E: From<TreeError>,
{
    type Error = E;

    fn walk(&mut self, node: &RawNode) -> Result<WalkControl, E> {
        if (self.callback)(node)?.is_stop() {
            return Ok(WalkControl::Stop);
        }
        raw_expression_tree_walker(node, self)
    }
}

/// Pre-order walk of `node` and everything below it, including subqueries
/// not excluded by `flags`.
///
/// ```
/// use pgtree::nodes::makefuncs::{make_int4_const, make_op_expr};
/// use pgtree::walker::{TraversalFlags, WalkControl, walk_tree};
///
/// let sum = make_op_expr(551, 177, 23, make_int4_const(1), make_int4_const(2));
/// let mut count = 0;
/// walk_tree(&sum, TraversalFlags::empty(), |_| {
///     count += 1;
///     Ok::<_, pgtree::TreeError>(WalkControl::Continue)
/// })
/// .unwrap();
/// assert_eq!(count, 3);
/// ```
pub fn walk_tree<F, E>(node: &Node, flags: TraversalFlags, callback: F) -> Result<WalkControl, E>
where
    F: FnMut(&Node) -> Result<WalkControl, E>,
    E: From<TreeError>,
{
    ClosureWalker { callback, flags }.walk(node)
}

/// Pre-order walk of everything below `query`, without showing the query
/// itself.
pub fn walk_query<F, E>(query: &Query, flags: TraversalFlags, callback: F) -> Result<WalkControl, E>
where
    F: FnMut(&Node) -> Result<WalkControl, E>,
    E: From<TreeError>,
{
    let mut walker = ClosureWalker { callback, flags };
    query_tree_walker(query, &mut walker, flags)
}

/// Rebuild `node` top-down. The callback returns `Some(replacement)` to
/// replace a node outright, or `None` to keep it and mutate its children.
pub fn mutate_tree<F, E>(node: &Node, flags: TraversalFlags, callback: F) -> Result<Node, E>
where
    F: FnMut(&Node) -> Result<Option<Node>, E>,
    E: From<TreeError>,
{
    ClosureMutator { callback, flags }.mutate(node)
}

/// Rebuild everything below `query` with [`mutate_tree`] semantics
pub fn mutate_query<F, E>(query: &Query, flags: TraversalFlags, callback: F) -> Result<Query, E>
where
    F: FnMut(&Node) -> Result<Option<Node>, E>,
    E: From<TreeError>,
{
    let mut mutator = ClosureMutator { callback, flags };
    query_tree_mutator(query, &mut mutator, flags)
}

/// Pre-order walk of a raw parse tree
pub fn walk_raw_tree<F, E>(node: &RawNode, callback: F) -> Result<WalkControl, E>
where
    F: FnMut(&RawNode) -> Result<WalkControl, E>,
    E: From<TreeError>,
{
    ClosureRawWalker { callback }.walk(node)
}

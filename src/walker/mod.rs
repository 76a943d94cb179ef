//! Generic traversal of analyzed and raw trees.
//!
//! All walkers follow the same protocol: the callback is shown a node first
//! and decides whether to look below it, usually by handing the node back to
//! the matching `*_tree_walker` function which then shows it each immediate
//! child. Mutators work the same way but return a rebuilt node.

pub mod closure;
pub mod expression;
pub mod query;
pub mod raw;
pub mod stack_depth;

use bitflags::bitflags;

use crate::TreeError;
use crate::nodes::{Node, RawNode};

pub use closure::{mutate_query, mutate_tree, walk_query, walk_raw_tree, walk_tree};
pub use expression::{expression_tree_mutator, expression_tree_walker};
pub use query::{
    query_or_expression_tree_mutator, query_or_expression_tree_walker, query_tree_mutator,
    query_tree_mutator_owned, query_tree_walker, range_table_mutator, range_table_walker,
};
pub use raw::raw_expression_tree_walker;
pub use stack_depth::{DEFAULT_MAX_EXPR_DEPTH, DepthGuard, guarded, max_expr_depth, set_max_expr_depth};

/// What a walker callback wants to happen next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WalkControl {
    Continue,
    /// Abandon the whole walk
    Stop,
}

impl WalkControl {
    pub fn is_stop(self) -> bool {
        self == WalkControl::Stop
    }
}

impl From<bool> for WalkControl {
    fn from(stop: bool) -> Self {
        if stop { WalkControl::Stop } else { WalkControl::Continue }
    }
}

bitflags! {
    /// Scope of a query-level traversal
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TraversalFlags: u32 {
        /// Don't descend into subqueries of range-table entries
        const IGNORE_RT_SUBQUERIES = 0x01;
        /// Don't descend into WITH list queries
        const IGNORE_CTE_SUBQUERIES = 0x02;
        /// Both of the above
        const IGNORE_RC_SUBQUERIES = 0x03;
        /// Skip join alias-variable lists
        const IGNORE_JOINALIASES = 0x04;
        /// Skip the range table entirely
        const IGNORE_RANGE_TABLE = 0x08;
        /// Show range-table entries to the callback before their contents
        const EXAMINE_RTES = 0x10;
    }
}

/// Callback of a read-only walk over an analyzed tree
pub trait TreeWalker {
    type Error: From<TreeError>;

    fn walk(&mut self, node: &Node) -> Result<WalkControl, Self::Error>;
}

/// Callback of a rewriting walk over an analyzed tree.
///
/// Returning a clone of the input means "no change here"; handing the input
/// to [`expression_tree_mutator`] rebuilds it with mutated children.
pub trait TreeMutator {
    type Error: From<TreeError>;

    fn mutate(&mut self, node: &Node) -> Result<Node, Self::Error>;
}

/// Callback of a read-only walk over a raw parse tree
pub trait RawTreeWalker {
    type Error: From<TreeError>;

    fn walk(&mut self, node: &RawNode) -> Result<WalkControl, Self::Error>;
}

impl<W: TreeWalker + ?Sized> TreeWalker for &mut W {
    type Error = W::Error;

    fn walk(&mut self, node: &Node) -> Result<WalkControl, Self::Error> {
        (**self).walk(node)
    }
}

impl<M: TreeMutator + ?Sized> TreeMutator for &mut M {
    type Error = M::Error;

    fn mutate(&mut self, node: &Node) -> Result<Node, Self::Error> {
        (**self).mutate(node)
    }
}

impl<W: RawTreeWalker + ?Sized> RawTreeWalker for &mut W {
    type Error = W::Error;

    fn walk(&mut self, node: &RawNode) -> Result<WalkControl, Self::Error> {
        (**self).walk(node)
    }
}

/// Return `Stop` from the enclosing function when a walk step stopped
macro_rules! try_walk {
    ($step:expr) => {
        if $step.is_stop() {
            return Ok($crate::walker::WalkControl::Stop);
        }
    };
}
pub(crate) use try_walk;

pub(crate) fn walk_opt<W: TreeWalker + ?Sized>(
    walker: &mut W,
    node: Option<&Node>,
) -> Result<WalkControl, W::Error> {
    match node {
        Some(node) => walker.walk(node),
        None => Ok(WalkControl::Continue),
    }
}

pub(crate) fn walk_list<W: TreeWalker + ?Sized>(
    walker: &mut W,
    nodes: &[Node],
) -> Result<WalkControl, W::Error> {
    for node in nodes {
        try_walk!(walker.walk(node)?);
    }
    Ok(WalkControl::Continue)
}

pub(crate) fn mutate_opt<M: TreeMutator + ?Sized>(
    mutator: &mut M,
    node: Option<&Node>,
) -> Result<Option<Node>, M::Error> {
    node.map(|node| mutator.mutate(node)).transpose()
}

pub(crate) fn mutate_list<M: TreeMutator + ?Sized>(
    mutator: &mut M,
    nodes: &[Node],
) -> Result<Vec<Node>, M::Error> {
    nodes.iter().map(|node| mutator.mutate(node)).collect()
}

use std::collections::BTreeMap;
use std::io::Read;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use pgtree::TreeError;
use pgtree::attributes::{
    AttributeResolver, expr_input_collation, expr_location, expression_returns_set, strip_implicit_coercions,
};
use pgtree::config::{Command, Config};
use pgtree::nodes::{Location, Node, RawNode};
use pgtree::types::Oid;
use pgtree::walker::{
    TraversalFlags, TreeMutator, TreeWalker, WalkControl, expression_tree_mutator, expression_tree_walker,
    query_or_expression_tree_mutator, query_or_expression_tree_walker, query_tree_mutator, query_tree_walker,
    set_max_expr_depth, walk_raw_tree, walk_tree,
};

fn main() -> Result<()> {
    let config = Config::load();

    // Initialize logging; stdout carries the command output
    tracing_subscriber::fmt()
        .with_env_filter(config.log_level.clone())
        .with_writer(std::io::stderr)
        .init();

    info!("pgtree v{}", env!("CARGO_PKG_VERSION"));

    set_max_expr_depth(config.max_expr_depth);
    let flags = config.traversal_flags();
    let input = read_input(config.input.as_deref())?;

    if config.raw {
        if config.command != Command::Kinds {
            anyhow::bail!("--raw only supports the kinds command");
        }
        let tree: RawNode = serde_json::from_str(&input).context("Failed to parse raw tree")?;
        return print_counts(count_raw_kinds(&tree)?);
    }

    let tree: Node = serde_json::from_str(&input).context("Failed to parse query tree")?;
    debug!("Loaded {} tree", tree.tag());

    match config.command {
        Command::Kinds => print_counts(count_kinds(&tree, flags)?),
        Command::Attrs => {
            let rows = collect_attributes(&tree, flags)?;
            println!("{}", serde_json::to_string_pretty(&rows)?);
            Ok(())
        }
        Command::Strip => {
            let stripped = query_or_expression_tree_mutator(&tree, &mut CoercionStripper { flags }, flags)?;
            println!("{}", serde_json::to_string_pretty(&stripped)?);
            Ok(())
        }
        Command::Check => check_returns_set(&tree),
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}")),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn print_counts(counts: BTreeMap<&'static str, usize>) -> Result<()> {
    for (kind, count) in counts {
        println!("{kind}\t{count}");
    }
    Ok(())
}

fn count_kinds(tree: &Node, flags: TraversalFlags) -> Result<BTreeMap<&'static str, usize>> {
    let mut counts = BTreeMap::new();
    walk_tree(tree, flags, |node| {
        *counts.entry(node.tag().name()).or_insert(0) += 1;
        Ok::<_, TreeError>(WalkControl::Continue)
    })?;
    Ok(counts)
}

fn count_raw_kinds(tree: &RawNode) -> Result<BTreeMap<&'static str, usize>> {
    let mut counts = BTreeMap::new();
    walk_raw_tree(tree, |node| {
        *counts.entry(node.tag().name()).or_insert(0) += 1;
        Ok::<_, TreeError>(WalkControl::Continue)
    })?;
    Ok(counts)
}

#[derive(Debug, Serialize)]
struct ExprAttributes {
    kind: &'static str,
    type_oid: Oid,
    type_name: Option<String>,
    typmod: i32,
    collation: Oid,
    input_collation: Oid,
    location: Location,
}

/// Records the attributes of every expression node it passes
struct AttributeCollector<'a> {
    resolver: AttributeResolver<'a>,
    flags: TraversalFlags,
    rows: Vec<ExprAttributes>,
}

impl TreeWalker for AttributeCollector<'_> {
    type Error = TreeError;

    fn walk(&mut self, node: &Node) -> Result<WalkControl, TreeError> {
        match node {
            Node::Query(query) => {
                let flags = self.flags;
                return query_tree_walker(query, self, flags);
            }
            Node::RangeTblEntry(_) => return Ok(WalkControl::Continue),
            _ => {}
        }

        if node.is_expr() {
            let type_oid = self.resolver.expr_type(node)?;
            self.rows.push(ExprAttributes {
                kind: node.tag().name(),
                type_oid,
                type_name: self.resolver.catalog().type_name(type_oid).map(str::to_string),
                typmod: self.resolver.expr_typmod(node)?,
                collation: self.resolver.expr_collation(node)?,
                input_collation: expr_input_collation(node),
                location: expr_location(node)?,
            });
        }
        expression_tree_walker(node, self)
    }
}

fn collect_attributes(tree: &Node, flags: TraversalFlags) -> Result<Vec<ExprAttributes>> {
    let mut collector = AttributeCollector {
        resolver: AttributeResolver::default(),
        flags,
        rows: Vec::new(),
    };
    query_or_expression_tree_walker(tree, &mut collector, flags)?;
    Ok(collector.rows)
}

/// Replaces every implicit coercion with the expression below it
struct CoercionStripper {
    flags: TraversalFlags,
}

impl TreeMutator for CoercionStripper {
    type Error = TreeError;

    fn mutate(&mut self, node: &Node) -> Result<Node, TreeError> {
        let node = strip_implicit_coercions(node);
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

fn check_returns_set(tree: &Node) -> Result<()> {
    match tree.as_query() {
        Some(query) => {
            for entry in &query.target_list {
                let Some(tle) = entry.as_target_entry() else {
                    anyhow::bail!("Unexpected {} in target list", entry.tag());
                };
                let name = tle.name.as_deref().unwrap_or("?column?");
                println!("{}\t{}\t{}", tle.resno, name, expression_returns_set(&tle.expr)?);
            }
        }
        None => println!("{}", expression_returns_set(tree)?),
    }
    Ok(())
}

use clap::{Parser, Subcommand};

use crate::walker::{DEFAULT_MAX_EXPR_DEPTH, TraversalFlags};

#[derive(Parser, Debug, Clone)]
#[command(name = "pgtree")]
#[command(about = "pgtree - inspect and rewrite PostgreSQL query trees serialized as JSON", long_about = None)]
pub struct Config {
    #[command(subcommand)]
    pub command: Command,

    /// JSON tree to read; stdin when omitted
    #[arg(short, long, global = true, env = "PGTREE_INPUT")]
    pub input: Option<String>,

    #[arg(long, global = true, env = "PGTREE_RAW", help = "Input is a raw parse tree rather than an analyzed one")]
    pub raw: bool,

    #[arg(long, global = true, default_value = "warn", env = "PGTREE_LOG_LEVEL")]
    pub log_level: String,

    // Traversal limits
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_EXPR_DEPTH, env = "PGTREE_MAX_EXPR_DEPTH", help = "Maximum nesting depth before a traversal fails")]
    pub max_expr_depth: usize,

    // Traversal scope
    #[arg(long, global = true, env = "PGTREE_IGNORE_RT_SUBQUERIES", help = "Don't descend into subqueries in FROM")]
    pub ignore_rt_subqueries: bool,

    #[arg(long, global = true, env = "PGTREE_IGNORE_CTE_SUBQUERIES", help = "Don't descend into WITH queries")]
    pub ignore_cte_subqueries: bool,

    #[arg(long, global = true, env = "PGTREE_IGNORE_JOIN_ALIASES", help = "Skip join alias variables")]
    pub ignore_join_aliases: bool,

    #[arg(long, global = true, env = "PGTREE_IGNORE_RANGE_TABLE", help = "Skip the range table entirely")]
    pub ignore_range_table: bool,

    #[arg(long, global = true, env = "PGTREE_EXAMINE_RTES", help = "Report range-table entries as nodes")]
    pub examine_rtes: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Count nodes per kind
    Kinds,
    /// Print type, typmod, collation and location of every expression
    Attrs,
    /// Remove implicit coercions and print the resulting tree
    Strip,
    /// Report whether the output columns return sets
    Check,
}

impl Config {
    /// Get a configuration instance with all values resolved from CLI args and environment variables
    pub fn load() -> Self {
        Config::parse()
    }

    /// Traversal flags selected by the scope switches
    pub fn traversal_flags(&self) -> TraversalFlags {
        let mut flags = TraversalFlags::empty();
        flags.set(TraversalFlags::IGNORE_RT_SUBQUERIES, self.ignore_rt_subqueries);
        flags.set(TraversalFlags::IGNORE_CTE_SUBQUERIES, self.ignore_cte_subqueries);
        flags.set(TraversalFlags::IGNORE_JOINALIASES, self.ignore_join_aliases);
        flags.set(TraversalFlags::IGNORE_RANGE_TABLE, self.ignore_range_table);
        flags.set(TraversalFlags::EXAMINE_RTES, self.examine_rtes);
        flags
    }
}

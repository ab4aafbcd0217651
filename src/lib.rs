//! Docopt-style command line argument parsing: the help text *is* the
//! grammar.
//!
//! A program's usage message is parsed into a pattern tree, the command
//! line is parsed into tokens, and a backtracking matcher reconciles the
//! two into a map from usage names to values:
//!
//! ```rust
//! use docarg::Docarg;
//!
//! const USAGE: &str = "
//! Naval Fate.
//!
//! Usage:
//!   naval_fate ship new <name>...
//!   naval_fate ship <name> move <x> <y> [--speed=<kn>]
//!   naval_fate mine (set|remove) <x> <y>
//!   naval_fate (-h | --help)
//!
//! Options:
//!   -h --help     Show this screen.
//!   --speed=<kn>  Speed in knots [default: 10].
//! ";
//!
//! let argv = ["naval_fate", "ship", "Guardian", "move", "10", "50"];
//! let args = Docarg::new(USAGE)
//!     .and_then(|d| d.argv(argv).parse())
//!     .unwrap_or_else(|e| e.exit());
//! // `<name>` can repeat in the first usage line, so it is list-valued
//! // in every alternative.
//! assert_eq!(args.get_vec("<name>"), vec!["Guardian"]);
//! assert_eq!(args.get_str("--speed"), "10");
//! ```
//!
//! Instead of spelling keys out, the result can be deserialized into a
//! struct with `flag_`, `arg_` and `cmd_` prefixed fields; see
//! [`ArgvMap::deserialize`]. [`generate_code`] writes such a struct for
//! you.

#[macro_use]
mod utils;

mod codegen;
mod dopt;
mod errors;
mod matcher;
mod parse;
mod pattern;
mod synonym;
#[cfg(test)]
mod test;

pub use crate::codegen::{generate_code, get_nodes, Node, NodeKind, ValueKind};
pub use crate::dopt::{ArgvMap, Deserializer, Docarg, Value};
pub use crate::errors::{Error, Result};

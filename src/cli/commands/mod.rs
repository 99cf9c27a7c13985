//! Command implementations, one module per subcommand.

pub mod history;
pub mod interactive;
pub mod search;
pub mod suggest;

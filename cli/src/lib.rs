pub mod commands;
pub mod context;
pub mod repl;
pub mod sim;

pub use context::CliContext;
pub use repl::readline;

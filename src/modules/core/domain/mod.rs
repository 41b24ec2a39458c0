//! Command model

mod command;
mod option;

pub use command::CommandNode;
pub use option::OptionSpec;

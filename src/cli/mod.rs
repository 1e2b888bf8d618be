//! Interactive command-line front end

pub mod chat_repl;

pub use chat_repl::handle_chat_command;

pub mod ast;
pub mod config;
pub mod error;
pub mod executor;
pub mod expander;
pub mod lexer;
pub mod parser;
pub mod repl;
pub mod shell;
pub mod state;

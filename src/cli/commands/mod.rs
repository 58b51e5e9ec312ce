//! One module per subcommand, each exposing an `execute` function.

pub mod completions;
pub mod decrypt;
pub mod encrypt;
pub mod encrypt_string;
pub mod rekey;
pub mod view;

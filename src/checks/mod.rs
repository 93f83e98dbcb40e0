// Check and utility subcommand handlers.
//
// Check handlers never return: every path ends in the exit reporter with a
// single protocol line. Utility handlers (`poll`, `run`, `completions`)
// return anyhow results that main turns into plain CLI errors.

pub mod cache;
pub mod check;
pub mod completions;
pub mod dns;
pub mod http;
pub mod poll;
#[cfg(unix)]
pub mod runlock;

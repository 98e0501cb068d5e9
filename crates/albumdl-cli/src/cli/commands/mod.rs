//! CLI command handlers, one per file.

mod fetch;
mod inspect;

pub use fetch::run_fetch;
pub use inspect::run_inspect;

#[cfg(test)]
pub(crate) use inspect::{action_label, write_inspect};

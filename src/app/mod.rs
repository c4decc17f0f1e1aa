pub mod dispatch;
pub mod repl;

pub use dispatch::{build_store, dispatch};

// Application layer: session state, the command language and text output.

pub mod command;
pub mod render;
pub mod repl;
pub mod session;

pub use session::{Action, Session};

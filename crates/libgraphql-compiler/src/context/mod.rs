mod compiler_context;
mod context_error;
mod filter_context_for_node;

pub use compiler_context::CompilerContext;
pub use context_error::ContextError;
pub use filter_context_for_node::filter_context_for_node;

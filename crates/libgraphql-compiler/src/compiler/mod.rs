mod compile_error;
mod compiler;

pub use compile_error::CompileError;
pub use compiler::Compiler;

#[cfg(test)]
mod tests;

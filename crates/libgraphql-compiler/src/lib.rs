pub mod ast;
pub mod ast_convert;
pub mod build;
pub mod codegen;
pub mod compiler;
pub mod context;
pub mod document;
pub mod file_reader;
pub mod ir;
pub mod loc;
pub mod schema;
pub mod transforms;
pub mod value;

#[cfg(test)]
mod test_utils;
#[cfg(test)]
mod tests;

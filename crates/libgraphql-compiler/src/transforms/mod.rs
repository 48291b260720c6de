//! Rewrites over a [`CompilerContext`](crate::context::CompilerContext).
//!
//! Each transform is a pure function from one context to another. The
//! [`CompilerTransforms`] value groups them into the pipelines a
//! [`Compiler`](crate::compiler::Compiler) derives its outputs from.

pub mod apply_fragment_arguments;
pub mod connection;
pub mod export;
pub mod field_handle;
pub mod filter_directives;
pub mod flatten;
pub mod generate_requisite_fields;
mod ir_rewriter;
mod ir_transform;
mod ir_validator;
pub mod known_fragment_spread;
mod pipeline;
pub mod relay_directive;
pub mod skip_client_fields;
pub mod skip_handle_fields;
pub mod skip_redundant;
pub mod skip_unreachable;
mod transform_error;
pub mod viewer_handle;

pub use flatten::FlattenOptions;
pub(crate) use ir_rewriter::IrRewriter;
pub use ir_transform::IrTransform;
pub use ir_validator::IrValidator;
pub use pipeline::CompilerTransforms;
pub use pipeline::Pipeline;
pub use transform_error::TransformError;

#[cfg(test)]
mod tests;

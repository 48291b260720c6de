//! The compiler's intermediate representation: schema-resolved definitions
//! and selections. IR values are never mutated once they are part of a
//! [`CompilerContext`](crate::context::CompilerContext); transforms build new
//! nodes instead.

mod argument;
mod definition;
mod directive;
mod operation_kind;
mod selection;

pub use argument::Argument;
pub use argument::ArgumentDefinition;
pub use definition::Definition;
pub use definition::Fragment;
pub use definition::Metadata;
pub use definition::Root;
pub use directive::Directive;
pub use directive::DirectiveKind;
pub use operation_kind::OperationKind;
pub use selection::Condition;
pub use selection::FragmentSpread;
pub use selection::InlineFragment;
pub use selection::LinkedField;
pub use selection::ScalarField;
pub use selection::Selection;

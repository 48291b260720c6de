//! Generated artifacts: the serializable node types the runtime consumes,
//! the generator producing them from IR, and the printer producing request
//! text.

pub mod code_generator;
mod concrete_node;
pub mod printer;

pub use concrete_node::ConcreteArgument;
pub use concrete_node::ConcreteArgumentDefinition;
pub use concrete_node::ConcreteBatch;
pub use concrete_node::ConcreteCondition;
pub use concrete_node::ConcreteFragment;
pub use concrete_node::ConcreteFragmentSpread;
pub use concrete_node::ConcreteHandle;
pub use concrete_node::ConcreteInlineFragment;
pub use concrete_node::ConcreteLinkedField;
pub use concrete_node::ConcreteRoot;
pub use concrete_node::ConcreteScalarField;
pub use concrete_node::ConcreteSelection;
pub use concrete_node::GeneratedNode;

#[cfg(test)]
mod tests;

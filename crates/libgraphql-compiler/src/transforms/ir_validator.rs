use crate::context::CompilerContext;
use crate::transforms::known_fragment_spread;

/// A check run once over the untransformed context. Validators collect
/// messages rather than failing on the first problem.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum IrValidator {
    KnownFragmentSpread,
}
impl IrValidator {
    pub fn name(&self) -> &'static str {
        match self {
            Self::KnownFragmentSpread => "known-fragment-spread",
        }
    }

    pub fn validate(&self, context: &CompilerContext) -> Vec<String> {
        match self {
            Self::KnownFragmentSpread => known_fragment_spread::validate(context),
        }
    }
}

/// The syntactic/semantic checks run over executable definitions before they
/// are lowered to IR.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ValidationRule {
    FieldsOnCorrectType,
    FragmentsOnCompositeTypes,
    KnownArgumentNames,
    KnownDirectives,
    KnownTypeNames,
    LoneAnonymousOperation,
    PossibleFragmentSpreads,
    ScalarLeafs,
    VariablesAreInputTypes,
}

/// Rules that only need a single definition (plus the schema) to be checked.
pub const LOCAL_RULES: &[ValidationRule] = &[
    ValidationRule::KnownTypeNames,
    ValidationRule::FragmentsOnCompositeTypes,
    ValidationRule::VariablesAreInputTypes,
    ValidationRule::ScalarLeafs,
    ValidationRule::FieldsOnCorrectType,
    ValidationRule::KnownArgumentNames,
    ValidationRule::KnownDirectives,
    ValidationRule::LoneAnonymousOperation,
    ValidationRule::PossibleFragmentSpreads,
];

use crate::context::CompilerContext;
use crate::schema::Schema;
use crate::transforms::apply_fragment_arguments;
use crate::transforms::connection;
use crate::transforms::export;
use crate::transforms::field_handle;
use crate::transforms::filter_directives;
use crate::transforms::flatten;
use crate::transforms::FlattenOptions;
use crate::transforms::generate_requisite_fields;
use crate::transforms::relay_directive;
use crate::transforms::skip_client_fields;
use crate::transforms::skip_handle_fields;
use crate::transforms::skip_redundant;
use crate::transforms::skip_unreachable;
use crate::transforms::TransformError;
use crate::transforms::viewer_handle;

type Result<T> = std::result::Result<T, TransformError>;

/// One pass over a [`CompilerContext`].
///
/// Passes that need to know what the server supports (rather than what the
/// client extended it with) consult the `schema` handed to
/// [`IrTransform::apply`]; all others use the context's own schema.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum IrTransform {
    ApplyFragmentArguments,
    Connection {
        generate_requisite_fields: bool,
    },
    Export,
    FieldHandle,
    FilterDirectives,
    Flatten(FlattenOptions),
    GenerateRequisiteFields,
    RelayDirective,
    SkipClientFields,
    SkipHandleFields,
    SkipRedundantNodes,
    SkipUnreachableNodes,
    ViewerHandle,
}
impl IrTransform {
    pub fn apply(&self, context: &CompilerContext, schema: &Schema) -> Result<CompilerContext> {
        log::debug!("Applying {} to {} definition(s)", self.name(), context.len());
        match self {
            Self::ApplyFragmentArguments => apply_fragment_arguments::transform(context),
            Self::Connection { generate_requisite_fields } =>
                connection::transform(context, *generate_requisite_fields),
            Self::Export => export::transform(context),
            Self::FieldHandle => field_handle::transform(context),
            Self::FilterDirectives => filter_directives::transform(context, schema),
            Self::Flatten(options) => flatten::transform(context, *options),
            Self::GenerateRequisiteFields => generate_requisite_fields::transform(context),
            Self::RelayDirective => relay_directive::transform(context),
            Self::SkipClientFields => skip_client_fields::transform(context, schema),
            Self::SkipHandleFields => skip_handle_fields::transform(context),
            Self::SkipRedundantNodes => skip_redundant::transform(context),
            Self::SkipUnreachableNodes => skip_unreachable::transform(context),
            Self::ViewerHandle => viewer_handle::transform(context, schema),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ApplyFragmentArguments => "apply-fragment-arguments",
            Self::Connection { .. } => "connection",
            Self::Export => "export",
            Self::FieldHandle => "field-handle",
            Self::FilterDirectives => "filter-directives",
            Self::Flatten(_) => "flatten",
            Self::GenerateRequisiteFields => "generate-requisite-fields",
            Self::RelayDirective => "relay-directive",
            Self::SkipClientFields => "skip-client-fields",
            Self::SkipHandleFields => "skip-handle-fields",
            Self::SkipRedundantNodes => "skip-redundant-nodes",
            Self::SkipUnreachableNodes => "skip-unreachable-nodes",
            Self::ViewerHandle => "viewer-handle",
        }
    }
}

use crate::context::CompilerContext;
use crate::schema::Schema;
use crate::transforms::FlattenOptions;
use crate::transforms::IrTransform;
use crate::transforms::IrValidator;
use crate::transforms::TransformError;

/// An ordered list of transforms, applied as a fold.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Pipeline(Vec<IrTransform>);
impl Pipeline {
    pub fn new(transforms: Vec<IrTransform>) -> Self {
        Self(transforms)
    }

    pub fn apply(
        &self,
        context: &CompilerContext,
        schema: &Schema,
    ) -> Result<CompilerContext, TransformError> {
        self.0.iter().try_fold(context.clone(), |context, transform| {
            transform.apply(&context, schema)
        })
    }

    pub fn transforms(&self) -> &[IrTransform] {
        self.0.as_slice()
    }
}

/// The pipelines and validators a
/// [`Compiler`](crate::compiler::Compiler) runs.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompilerTransforms {
    /// Produces the fully flattened tree used to generate response
    /// normalization code.
    pub codegen: Pipeline,

    /// Produces the selections client components read.
    pub fragment: Pipeline,

    /// Produces the text sent to the server.
    pub print: Pipeline,

    /// Produces the selections to fetch from the server.
    pub query: Pipeline,

    pub validators: Vec<IrValidator>,
}
impl Default for CompilerTransforms {
    fn default() -> Self {
        Self {
            codegen: Pipeline::new(vec![
                IrTransform::Flatten(FlattenOptions::abstract_types_and_spreads()),
                IrTransform::SkipRedundantNodes,
            ]),
            fragment: Pipeline::new(vec![
                IrTransform::Connection { generate_requisite_fields: false },
                IrTransform::ViewerHandle,
                IrTransform::RelayDirective,
                IrTransform::FieldHandle,
                IrTransform::Flatten(FlattenOptions::abstract_types()),
                IrTransform::SkipRedundantNodes,
            ]),
            print: Pipeline::new(vec![
                IrTransform::Flatten(FlattenOptions::default()),
                IrTransform::SkipHandleFields,
            ]),
            query: Pipeline::new(vec![
                IrTransform::Connection { generate_requisite_fields: true },
                IrTransform::ViewerHandle,
                IrTransform::ApplyFragmentArguments,
                IrTransform::SkipClientFields,
                IrTransform::SkipUnreachableNodes,
                IrTransform::Export,
                IrTransform::RelayDirective,
                IrTransform::GenerateRequisiteFields,
                IrTransform::FilterDirectives,
            ]),
            validators: vec![IrValidator::KnownFragmentSpread],
        }
    }
}

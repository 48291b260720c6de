use crate::document::Document;
use crate::schema::extend_ast_schema;
use crate::schema::transform_ast_schema;
use crate::schema::SchemaBuildError;
use crate::test_utils::base_schema;
use crate::test_utils::test_schema;
use std::sync::Arc;

type Result<T> = std::result::Result<T, SchemaBuildError>;

mod transform {
    use super::*;

    #[test]
    fn adds_compiler_directives() {
        let schema = transform_ast_schema(&base_schema());
        for name in ["arguments", "argumentDefinitions", "connection", "export", "relay"] {
            assert!(schema.directive(name).is_some(), "missing @{name}");
        }
        assert!(schema.directive("argumentDefinitions").unwrap().accepts_any_arguments());
    }

    #[test]
    fn is_idempotent() {
        let once = transform_ast_schema(&base_schema());
        let twice = transform_ast_schema(&once);
        assert!(Arc::ptr_eq(&once, &twice));
    }
}

mod extend {
    use super::*;

    #[test]
    fn without_schema_definitions_returns_same_schema() -> Result<()> {
        let schema = test_schema();
        let document = Document::parse("Query.graphql", "query Q { me { id } }").unwrap();

        let extended = extend_ast_schema(Arc::clone(&schema), &[&document])?;
        assert!(Arc::ptr_eq(&schema, &extended));

        let extended = extend_ast_schema(Arc::clone(&schema), &[])?;
        assert!(Arc::ptr_eq(&schema, &extended));
        Ok(())
    }

    #[test]
    fn client_extensions_are_marked_client_only() -> Result<()> {
        let schema = test_schema();
        let document = Document::parse("Local.graphql", concat!(
            "extend type User { isSelected: Boolean }\n",
            "type LocalSettings { theme: String }\n",
            "fragment F on User { isSelected }\n",
        )).unwrap();

        let extended = extend_ast_schema(Arc::clone(&schema), &[&document])?;
        assert!(!Arc::ptr_eq(&schema, &extended));
        assert!(extended.field("User", "isSelected").unwrap().is_client_only());
        assert!(!extended.field("User", "name").unwrap().is_client_only());
        assert!(extended.get_type("LocalSettings").unwrap().is_client_only());
        assert!(schema.field("User", "isSelected").is_none());
        Ok(())
    }

    #[test]
    fn redefining_a_server_type_fails() {
        let document = Document::parse("Bad.graphql", "type User { id: ID }").unwrap();
        let result = extend_ast_schema(test_schema(), &[&document]);
        assert!(matches!(result, Err(SchemaBuildError::DuplicateTypeDefinition { .. })));
    }
}

use crate::ir::Selection;
use crate::test_utils::build_context;
use crate::test_utils::field_keys;
use crate::test_utils::find_field;
use crate::transforms::connection;
use crate::transforms::TransformError;
use std::sync::Arc;

type Result<T> = std::result::Result<T, TransformError>;

const FRIENDS_QUERY: &str = concat!(
    "query Friends {\n",
    "  me {\n",
    "    friends(first: 10) @connection(handle: \"friends\") {\n",
    "      edges { node { name } }\n",
    "    }\n",
    "  }\n",
    "}",
);

mod validation {
    use super::*;

    #[test]
    fn connection_without_first_or_last_is_rejected() {
        let context = build_context(&[
            "query Q { me { friends @connection { edges { node { id } } } } }",
        ]);
        let result = connection::transform(&context, false);
        assert_eq!(result.err(), Some(TransformError::ConnectionMissingBound {
            definition_name: "Q".to_string(),
            field_name: "friends".to_string(),
            type_name: "FriendsConnection".to_string(),
        }));
    }

    #[test]
    fn connection_without_edges_selection_is_rejected() {
        let context = build_context(&[
            "query Q { me { friends(first: 10) @connection { pageInfo { hasNextPage } } } }",
        ]);
        let result = connection::transform(&context, false);
        assert_eq!(result.err(), Some(TransformError::ConnectionMissingEdges {
            definition_name: "Q".to_string(),
            field_name: "friends".to_string(),
            type_name: "FriendsConnection".to_string(),
        }));
    }

    #[test]
    fn connection_type_without_page_info_is_rejected() {
        let context = build_context(&[
            "query Q { me { pagelessFriends(first: 10) @connection { edges { cursor } } } }",
        ]);
        let result = connection::transform(&context, false);
        let Err(TransformError::InvalidConnectionType {
            field_name,
            reason,
            type_name,
            ..
        }) = result else {
            panic!("Expected an invalid connection type error");
        };
        assert_eq!(field_name, "pagelessFriends");
        assert_eq!(type_name, "PagelessConnection");
        assert_eq!(reason, "to have a `pageInfo` field that returns an object");
    }

    #[test]
    fn non_string_handle_is_rejected() {
        let context = build_context(&[
            "query Q { me { friends(first: 10) @connection(handle: 5) { edges { cursor } } } }",
        ]);
        let result = connection::transform(&context, false);
        assert_eq!(result.err(), Some(TransformError::InvalidConnectionHandle {
            definition_name: "Q".to_string(),
            field_name: "friends".to_string(),
        }));
    }
}

mod expansion {
    use super::*;

    #[test]
    fn handle_is_attached_and_directive_stripped() -> Result<()> {
        let context = connection::transform(&build_context(&[FRIENDS_QUERY]), false)?;
        let root = context.get_root("Friends")?;
        let me = find_field(&root.selections, "me");
        let Selection::LinkedField(friends) = find_field(me.selections().unwrap(), "friends") else {
            panic!("Expected `friends` to be a linked field");
        };

        assert_eq!(friends.handles, vec!["friends".to_string()]);
        assert!(friends.directives.is_empty());
        assert_eq!(field_keys(&friends.selections), vec!["edges"]);
        Ok(())
    }

    #[test]
    fn handle_defaults_to_connection() -> Result<()> {
        let context = connection::transform(&build_context(&[
            "query Q { me { friends(last: 5) @connection { edges { cursor } } } }",
        ]), false)?;
        let root = context.get_root("Q")?;
        let me = find_field(&root.selections, "me");
        let Selection::LinkedField(friends) = find_field(me.selections().unwrap(), "friends") else {
            panic!("Expected `friends` to be a linked field");
        };
        assert_eq!(friends.handles, vec![connection::CONNECTION_HANDLE.to_string()]);
        Ok(())
    }

    #[test]
    fn requisite_fields_are_added_in_query_mode() -> Result<()> {
        let context = connection::transform(&build_context(&[FRIENDS_QUERY]), true)?;
        let root = context.get_root("Friends")?;
        let me = find_field(&root.selections, "me");
        let Selection::LinkedField(friends) = find_field(me.selections().unwrap(), "friends") else {
            panic!("Expected `friends` to be a linked field");
        };

        let Some(Selection::InlineFragment(requisite)) = friends.selections.last() else {
            panic!("Expected the requisite selection to be appended");
        };
        assert_eq!(requisite.type_condition, "FriendsConnection");
        assert_eq!(field_keys(&requisite.selections), vec!["edges", "pageInfo"]);

        let edges = find_field(&requisite.selections, "edges");
        assert_eq!(field_keys(edges.selections().unwrap()), vec!["cursor", "node"]);
        let node = find_field(edges.selections().unwrap(), "node");
        assert_eq!(field_keys(node.selections().unwrap()), vec!["__typename"]);

        let page_info = find_field(&requisite.selections, "pageInfo");
        assert_eq!(
            field_keys(page_info.selections().unwrap()),
            vec!["endCursor", "hasNextPage", "hasPreviousPage", "startCursor"],
        );
        Ok(())
    }

    #[test]
    fn definitions_without_connections_are_shared() -> Result<()> {
        let context = build_context(&["query Q { me { id } }"]);
        let transformed = connection::transform(&context, true)?;
        assert!(Arc::ptr_eq(
            context.get("Q").unwrap(),
            transformed.get("Q").unwrap(),
        ));
        Ok(())
    }
}

//! Property-based tests for the portable record and scope normalization

use proptest::prelude::*;
use varsync::model::{
    decode_transfer_stream, decode_variable, encode_variable, normalize_base_url, normalize_scope,
    RawScope, Variable,
};

prop_compose! {
    fn variable_strategy()(
        key in "[A-Z][A-Z0-9_]{0,15}",
        value in any::<String>(),
        variable_type in proptest::option::of(prop_oneof![Just("env_var"), Just("file")]),
        protected in any::<bool>(),
        masked in any::<bool>(),
        environment_scope in proptest::option::of("[a-z*/]{1,12}"),
    ) -> Variable {
        Variable {
            key,
            value,
            variable_type: variable_type.map(str::to_string),
            protected,
            masked,
            environment_scope,
        }
    }
}

/// Encoding then decoding a record yields the same variable
#[test]
fn test_portable_record_round_trip_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&variable_strategy(), |variable| {
            let decoded = decode_variable(encode_variable(&variable)).unwrap();
            assert_eq!(decoded, variable);
            Ok(())
        })
        .unwrap();
}

/// A serialized listing decodes back to the same list, in order
#[test]
fn test_transfer_stream_round_trip_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&proptest::collection::vec(variable_strategy(), 0..8), |variables| {
            let stream = serde_json::to_vec_pretty(&variables).unwrap();
            let decoded = decode_transfer_stream(&stream).unwrap();
            assert_eq!(decoded, variables);
            Ok(())
        })
        .unwrap();
}

/// Base URL normalization strips trailing slashes and is idempotent
#[test]
fn test_base_url_normalization_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&("[a-z:/.]{0,24}", 0usize..5), |(url, slashes)| {
            let padded = format!("{}{}", url, "/".repeat(slashes));
            let once = normalize_base_url(&padded);
            assert!(!once.ends_with('/'));
            assert_eq!(normalize_base_url(&once), once);
            assert_eq!(once, normalize_base_url(&url));
            Ok(())
        })
        .unwrap();
}

/// A non-empty project always wins over the group when building the path
#[test]
fn test_project_precedence_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    let project_strategy = proptest::option::of("[a-z0-9]{1,10}/[a-z0-9]{1,10}");
    runner
        .run(&("[a-z0-9]{1,10}", project_strategy), |(group, project)| {
            let scope = normalize_scope(&RawScope {
                token: Some("t".to_string()),
                base_url: Some("https://gitlab.example.com/api/v4".to_string()),
                group: Some(group.clone()),
                project: project.clone(),
            })
            .unwrap();

            let path = scope.variables_path();
            match project {
                Some(project) => {
                    assert_eq!(path, format!("projects/{}/variables", project.replace('/', "%2F")));
                }
                None => assert_eq!(path, format!("groups/{}/variables", group)),
            }
            assert_eq!(path.matches('/').count(), 2);
            Ok(())
        })
        .unwrap();
}

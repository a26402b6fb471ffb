use proptest::prelude::*;
use swift_bulk::encoding::{encode_paths, escape_url_fragment};
use swift_bulk::response::{OutcomeStatus, interpret_delete};

#[cfg(test)]
mod encoder_property_tests {
    use super::*;

    proptest! {
        #[test]
        fn test_framing_round_trips(paths in prop::collection::vec(".*", 1..16)) {
            let body = encode_paths(&paths);
            let segments: Vec<&str> = body.split('\n').collect();

            // Property: one segment per path, in original order, each
            // the escaped form of its input.
            prop_assert_eq!(segments.len(), paths.len());
            for (segment, path) in segments.iter().zip(&paths) {
                prop_assert_eq!(*segment, escape_url_fragment(path));
            }
        }

        #[test]
        fn test_escaped_output_is_wire_safe(path in ".*") {
            let escaped = escape_url_fragment(&path);

            // Property: escaping leaves nothing that could corrupt
            // framing or the plain-text body.
            prop_assert!(escaped.is_ascii());
            prop_assert!(!escaped.contains('\n'));
            prop_assert!(!escaped.contains(' '));
            prop_assert!(!escaped.contains('&'));
            prop_assert!(!escaped.contains('#'));
            prop_assert!(escaped.bytes().all(|b| !b.is_ascii_control()));
        }

        #[test]
        fn test_safe_paths_pass_through_unchanged(
            path in "[A-Za-z0-9._~/:@-]{0,64}"
        ) {
            prop_assert_eq!(escape_url_fragment(&path), path);
        }

        #[test]
        fn test_no_trailing_newline(paths in prop::collection::vec(".+", 1..8)) {
            // Non-empty paths (the only kind the client sends) never
            // produce a leading or trailing separator.
            let body = encode_paths(&paths);
            prop_assert!(!body.starts_with('\n'));
            prop_assert!(!body.ends_with('\n'));
        }
    }

    #[test]
    fn test_empty_list_yields_empty_body() {
        assert_eq!(encode_paths(Vec::<String>::new()), "");
    }

    #[test]
    fn test_single_path_has_no_separator() {
        assert!(!encode_paths(["only one"]).contains('\n'));
    }
}

#[cfg(test)]
mod outcome_property_tests {
    use super::*;

    proptest! {
        #[test]
        fn test_status_derivation_invariants(
            processed in 0u64..1000,
            not_found in 0u64..1000,
            errors in prop::collection::vec(("[a-z0-9/]{1,20}", ".{1,30}"), 0..10),
        ) {
            let raw_errors: Vec<_> = errors
                .iter()
                .map(|(name, reason)| vec![name.clone(), reason.clone()])
                .collect();
            let body = serde_json::json!({
                "Number Deleted": processed,
                "Number Not Found": not_found,
                "Errors": raw_errors,
            })
            .to_string();

            let outcome = interpret_delete(200, &body).expect("well-formed body must parse");

            // Property: errors empty iff fully successful.
            prop_assert_eq!(outcome.errors.is_empty(), outcome.is_complete_success());

            // Property: status follows the count/error derivation.
            let expected = if errors.is_empty() {
                OutcomeStatus::Success
            } else if processed > 0 {
                OutcomeStatus::PartialFailure
            } else {
                OutcomeStatus::TotalFailure
            };
            prop_assert_eq!(outcome.status, expected);

            // Property: every pair survives, in order.
            prop_assert_eq!(outcome.errors.len(), errors.len());
            for (item, (name, reason)) in outcome.errors.iter().zip(&errors) {
                prop_assert_eq!(&item.name, name);
                prop_assert_eq!(&item.reason, reason);
            }

            prop_assert_eq!(outcome.processed, processed);
            prop_assert_eq!(outcome.not_found, not_found);
        }
    }
}

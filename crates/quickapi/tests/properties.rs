//! Property tests: every request yields exactly one well-formed response.

use bytes::Bytes;
use http::StatusCode;
use proptest::prelude::*;
use quickapi::prelude::*;
use serde_json::{json, Value};

fn block_on<F: std::future::Future>(fut: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(fut)
}

proptest! {
    #[test]
    fn arbitrary_body_without_schema_completes(body in proptest::collection::vec(any::<u8>(), 0..256)) {
        let endpoint = QuickApi::default()
            .endpoint(|_| async { Ok(json!({"ok": true})) })
            .build();
        let request = http::Request::post("/").body(Bytes::from(body)).unwrap();

        let response = block_on(endpoint.invoke(&request, &EndpointContext::new()));

        prop_assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn arbitrary_body_with_schema_never_escapes(body in "\\PC{0,64}") {
        let endpoint = QuickApi::default()
            .endpoint(|input: CallbackInput| async move {
                Ok(input.pointer("/body/id").cloned().unwrap_or_default())
            })
            .input(Schema::object([("body", Schema::object([("id", Schema::string())]))]))
            .build();
        let request = http::Request::post("/").body(Bytes::from(body)).unwrap();

        let response = block_on(endpoint.invoke(&request, &EndpointContext::new()));

        prop_assert!(
            response.status() == StatusCode::OK || response.status() == StatusCode::BAD_REQUEST
        );
        if response.status() == StatusCode::BAD_REQUEST {
            let issues: Value = serde_json::from_slice(response.body()).unwrap();
            prop_assert!(issues.as_array().is_some_and(|issues| !issues.is_empty()));
        }
    }

    #[test]
    fn string_ids_round_trip_through_body(id in "[a-zA-Z0-9_-]{1,24}") {
        let endpoint = QuickApi::default()
            .endpoint(|input: CallbackInput| async move {
                Ok(input.pointer("/body/id").cloned().unwrap_or_default())
            })
            .input(Schema::object([("body", Schema::object([("id", Schema::string())]))]))
            .output(Schema::string())
            .build();
        let body = serde_json::to_vec(&json!({"id": id})).unwrap();
        let request = http::Request::post("/").body(Bytes::from(body)).unwrap();

        let response = block_on(endpoint.invoke(&request, &EndpointContext::new()));

        prop_assert_eq!(response.status(), StatusCode::OK);
        let echoed: Value = serde_json::from_slice(response.body()).unwrap();
        prop_assert_eq!(echoed, json!(id));
    }
}

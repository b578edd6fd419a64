// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Request validation tests for EmbedRequest
//!
//! Empty and whitespace-only text must be rejected with a client error
//! before any model call; everything else passes through untouched.

use embedder_node::api::EmbedRequest;

#[test]
fn test_valid_request() {
    let request = EmbedRequest {
        text: "How tall is the Eiffel Tower?".to_string(),
    };

    assert!(request.validate().is_ok());
}

#[test]
fn test_empty_text_rejected() {
    let request = EmbedRequest {
        text: String::new(),
    };

    let err = request.validate().unwrap_err();
    assert_eq!(err.status_code(), 400, "Empty text must be a client error");
}

#[test]
fn test_whitespace_only_text_rejected() {
    for text in ["   ", "\t", "\n\n", " \t \n "] {
        let request = EmbedRequest {
            text: text.to_string(),
        };

        let err = request.validate().unwrap_err();
        assert_eq!(
            err.status_code(),
            400,
            "Whitespace-only text {:?} must be a client error",
            text
        );
    }
}

#[test]
fn test_unicode_text_accepted() {
    let request = EmbedRequest {
        text: "これはテストです".to_string(),
    };

    assert!(request.validate().is_ok());
}

#[test]
fn test_deserialization_requires_text_field() {
    let result = serde_json::from_str::<EmbedRequest>(r#"{}"#);
    assert!(result.is_err(), "Missing text field must fail to parse");

    let request: EmbedRequest = serde_json::from_str(r#"{"text": "ok"}"#).unwrap();
    assert_eq!(request.text, "ok");
}

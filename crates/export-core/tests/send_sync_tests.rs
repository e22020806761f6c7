//! Verifies that the public model is `Send + Sync`, so hosts may share a
//! registry snapshot across threads.

use client_export_core::cli::{ExitCode, OutputFormat};
use client_export_core::*;

const fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_model_types_are_send_sync() {
    assert_send_sync::<CandidateType>();
    assert_send_sync::<MethodDescriptor>();
    assert_send_sync::<ParameterDescriptor>();
    assert_send_sync::<TypeRegistry>();
    assert_send_sync::<Supertype>();
}

#[test]
fn test_attribute_types_are_send_sync() {
    assert_send_sync::<Attribute>();
    assert_send_sync::<AttributeSet>();
    assert_send_sync::<AttributeValue>();
    assert_send_sync::<PackageName>();
}

#[test]
fn test_config_and_cli_types_are_send_sync() {
    assert_send_sync::<ExportConfig>();
    assert_send_sync::<OutputFormat>();
    assert_send_sync::<ExitCode>();
}

#[test]
fn test_error_is_send_sync() {
    assert_send_sync::<Error>();
}

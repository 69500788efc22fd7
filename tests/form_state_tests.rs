//! Tests for the form state and submission workflow
//!
//! These tests verify:
//! - Field edits through the untyped and typed entry points
//! - The Loading flag across every settle path
//! - Exactly one save per successful submission, under the snapshot's name
//! - Error messages shown for server and unreadable failures
//! - The in-flight guard

use engine_template::error::Result;
use engine_template::{
    interpret_response, AppError, FieldId, FieldUpdate, FileSaver, FormState, Framework,
    InputKind, SubmitRejected, SubmitStatus, TemplateError, TemplateRequest, TemplateService,
    GENERIC_FAILURE_MESSAGE, SUCCESS_MESSAGE,
};
use reqwest::StatusCode;
use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::Mutex;

// =============================================================================
// Test doubles
// =============================================================================

/// Service that records every request body and replies with a fixed outcome
struct MockService {
    reply: fn() -> std::result::Result<Vec<u8>, TemplateError>,
    bodies: Mutex<Vec<Vec<u8>>>,
}

impl MockService {
    fn new(reply: fn() -> std::result::Result<Vec<u8>, TemplateError>) -> Self {
        Self {
            reply,
            bodies: Mutex::new(Vec::new()),
        }
    }

    fn bodies(&self) -> Vec<Vec<u8>> {
        self.bodies.lock().unwrap().clone()
    }
}

impl TemplateService for MockService {
    fn generate(&self, request: &TemplateRequest) -> std::result::Result<Vec<u8>, TemplateError> {
        self.bodies.lock().unwrap().push(request.to_body()?);
        (self.reply)()
    }
}

/// Saver that records calls instead of touching the filesystem
#[derive(Default)]
struct RecordingSaver {
    calls: RefCell<Vec<(Vec<u8>, String)>>,
    fail: bool,
}

impl FileSaver for RecordingSaver {
    fn save(&self, payload: &[u8], filename: &str) -> Result<PathBuf> {
        self.calls
            .borrow_mut()
            .push((payload.to_vec(), filename.to_string()));
        if self.fail {
            return Err(AppError::save(
                filename,
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            ));
        }
        Ok(PathBuf::from("/downloads").join(filename))
    }
}

const ARCHIVE: &[u8] = b"PK\x03\x04\x00\xff binary";

fn archive_reply() -> std::result::Result<Vec<u8>, TemplateError> {
    Ok(ARCHIVE.to_vec())
}

fn duplicate_name_reply() -> std::result::Result<Vec<u8>, TemplateError> {
    interpret_response(
        StatusCode::BAD_REQUEST,
        br#"{"detail":"Engine name already exists"}"#,
    )
}

fn html_reply() -> std::result::Result<Vec<u8>, TemplateError> {
    interpret_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        b"<html>Internal Server Error</html>",
    )
}

fn filled_state() -> FormState {
    let mut state = FormState::new();
    state.apply(FieldUpdate::EngineName("MyEngine".into()));
    state.apply(FieldUpdate::Version("1.0.0".into()));
    state.apply(FieldUpdate::Author("Ada".into()));
    state
}

// =============================================================================
// Field Edit Tests
// =============================================================================

#[test]
fn test_on_field_change_updates_only_target() {
    let mut state = filled_state();
    let before = state.request().clone();

    state
        .on_field_change("description", "A tiny engine", InputKind::Textarea)
        .unwrap();

    let after = state.request();
    assert_eq!(after.description, "A tiny engine");
    assert_eq!(after.engine_name, before.engine_name);
    assert_eq!(after.version, before.version);
    assert_eq!(after.author, before.author);
    assert_eq!(after.include_examples, before.include_examples);
    assert_eq!(after.framework, before.framework);
}

#[test]
fn test_checkbox_change_stores_boolean() {
    let mut state = FormState::new();
    assert!(state.request().include_examples);

    state
        .on_field_change("include_examples", "false", InputKind::Checkbox)
        .unwrap();
    assert!(!state.request().include_examples);

    state
        .on_field_change("include_examples", "on", InputKind::Checkbox)
        .unwrap();
    assert!(state.request().include_examples);
}

#[test]
fn test_select_change_stores_framework() {
    let mut state = FormState::new();
    state
        .on_field_change("framework", "unreal", InputKind::Select)
        .unwrap();
    assert_eq!(state.request().framework, Framework::Unreal);
}

#[test]
fn test_invalid_edits_leave_record_unchanged() {
    let mut state = filled_state();
    let before = state.request().clone();

    assert!(state.on_field_change("colour", "red", InputKind::Text).is_err());
    assert!(state
        .on_field_change("framework", "godot", InputKind::Select)
        .is_err());
    assert!(state
        .on_field_change("engine_name", "true", InputKind::Checkbox)
        .is_err());

    assert_eq!(state.request(), &before);
}

#[test]
fn test_edit_during_loading_is_accepted() {
    let mut state = filled_state();
    let snapshot = state.begin_submit().unwrap();
    state.apply(FieldUpdate::Author("Grace".into()));
    assert_eq!(state.request().author, "Grace");
    assert_eq!(snapshot.author, "Ada");
}

// =============================================================================
// Submission Success Tests
// =============================================================================

#[test]
fn test_success_saves_once_with_engine_filename() {
    let service = MockService::new(archive_reply);
    let saver = RecordingSaver::default();
    let mut state = filled_state();

    state.submit(&service, &saver).unwrap();

    let calls = saver.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, ARCHIVE);
    assert_eq!(calls[0].1, "MyEngine-game-engine.zip");
    assert_eq!(
        state.status(),
        &SubmitStatus::Success(SUCCESS_MESSAGE.to_string())
    );
    assert!(!state.is_loading());
    assert_eq!(
        state.last_saved,
        Some(PathBuf::from("/downloads/MyEngine-game-engine.zip"))
    );
}

#[test]
fn test_request_body_carries_every_field() {
    let service = MockService::new(archive_reply);
    let saver = RecordingSaver::default();
    let mut state = filled_state();
    state.apply(FieldUpdate::Framework(Framework::Unreal));
    state.apply(FieldUpdate::IncludeExamples(false));

    state.submit(&service, &saver).unwrap();

    let bodies = service.bodies();
    assert_eq!(bodies.len(), 1);
    let json: serde_json::Value = serde_json::from_slice(&bodies[0]).unwrap();
    assert_eq!(json["engine_name"], "MyEngine");
    assert_eq!(json["version"], "1.0.0");
    assert_eq!(json["author"], "Ada");
    assert_eq!(json["description"], "");
    assert_eq!(json["include_examples"], false);
    assert_eq!(json["framework"], "unreal");
}

#[test]
fn test_identical_submissions_send_identical_bodies() {
    let service = MockService::new(archive_reply);
    let saver = RecordingSaver::default();
    let mut state = filled_state();

    state.submit(&service, &saver).unwrap();
    state.submit(&service, &saver).unwrap();

    let bodies = service.bodies();
    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[0], bodies[1]);
    assert_eq!(saver.calls.borrow().len(), 2);
}

#[test]
fn test_filename_comes_from_snapshot() {
    let saver = RecordingSaver::default();
    let mut state = filled_state();

    let snapshot = state.begin_submit().unwrap();
    state.apply(FieldUpdate::EngineName("Renamed".into()));
    state
        .finish_submit(&snapshot, Ok(ARCHIVE.to_vec()), &saver)
        .unwrap();

    assert_eq!(saver.calls.borrow()[0].1, "MyEngine-game-engine.zip");
}

// =============================================================================
// Submission Failure Tests
// =============================================================================

#[test]
fn test_server_detail_shown_verbatim() {
    let service = MockService::new(duplicate_name_reply);
    let saver = RecordingSaver::default();
    let mut state = filled_state();

    state.submit(&service, &saver).unwrap();

    assert_eq!(
        state.status(),
        &SubmitStatus::Error("Engine name already exists".to_string())
    );
    assert!(saver.calls.borrow().is_empty());
    assert!(!state.is_loading());
}

#[test]
fn test_unreadable_error_body_uses_fallback() {
    let service = MockService::new(html_reply);
    let saver = RecordingSaver::default();
    let mut state = filled_state();

    state.submit(&service, &saver).unwrap();

    assert_eq!(
        state.status(),
        &SubmitStatus::Error(GENERIC_FAILURE_MESSAGE.to_string())
    );
    assert!(saver.calls.borrow().is_empty());
}

#[test]
fn test_save_failure_is_returned_and_clears_loading() {
    let service = MockService::new(archive_reply);
    let saver = RecordingSaver {
        fail: true,
        ..RecordingSaver::default()
    };
    let mut state = filled_state();

    let err = state.submit(&service, &saver).unwrap_err();
    assert!(matches!(err, AppError::Save { .. }));
    assert_eq!(state.status(), &SubmitStatus::Idle);
    assert!(state.last_saved.is_none());
}

#[test]
fn test_new_submit_clears_previous_message() {
    let service = MockService::new(duplicate_name_reply);
    let saver = RecordingSaver::default();
    let mut state = filled_state();
    state.submit(&service, &saver).unwrap();
    assert!(state.status().message().is_some());

    state.begin_submit().unwrap();
    assert_eq!(state.status(), &SubmitStatus::Loading);
    assert!(state.status().message().is_none());
}

// =============================================================================
// Guard Tests
// =============================================================================

#[test]
fn test_loading_true_only_between_begin_and_finish() {
    let saver = RecordingSaver::default();
    let mut state = filled_state();
    assert!(!state.is_loading());

    let snapshot = state.begin_submit().unwrap();
    assert!(state.is_loading());

    state
        .finish_submit(
            &snapshot,
            Err(TemplateError::UnparseableError {
                status: StatusCode::BAD_GATEWAY,
            }),
            &saver,
        )
        .unwrap();
    assert!(!state.is_loading());
}

#[test]
fn test_second_submit_while_loading_is_rejected() {
    let mut state = filled_state();
    state.begin_submit().unwrap();
    assert_eq!(state.begin_submit(), Err(SubmitRejected::InFlight));
    assert!(state.is_loading());
}

#[test]
fn test_missing_fields_block_request() {
    let service = MockService::new(archive_reply);
    let saver = RecordingSaver::default();
    let mut state = FormState::new();
    state.apply(FieldUpdate::EngineName("   ".into()));

    let err = state.submit(&service, &saver).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert!(service.bodies().is_empty());
    assert_eq!(state.status(), &SubmitStatus::Idle);
    assert_eq!(
        state.field_error(FieldId::EngineName),
        Some("Engine Name is required")
    );
}

//! Engine Template Library
//!
//! Core of the engine template generator: the request record and its form
//! state, the HTTP client for the template service, archive saving and the
//! terminal UI.

pub mod app;
pub mod cli;
pub mod client;
pub mod components;
pub mod download;
pub mod error;
pub mod input;
pub mod request;
pub mod theme;
pub mod types;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, FormFocus, FormState, SubmitRejected, SubmitStatus, SUCCESS_MESSAGE};
pub use client::{
    extract_detail, interpret_response, ClientConfig, TemplateClient, TemplateService,
    DEFAULT_BASE_URL,
};
pub use download::{DirectorySaver, FileSaver};
pub use error::{AppError, TemplateError, GENERIC_FAILURE_MESSAGE, TRANSPORT_FAILURE_MESSAGE};
pub use request::{FieldId, FieldUpdate, FieldValidation, TemplateRequest, DOWNLOAD_SUFFIX};
pub use types::{Framework, InputKind};

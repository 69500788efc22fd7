//! Form state and the submission state machine
//!
//! `FormState` owns the request record and the status shown to the user.
//! A submission moves `Idle`/settled → `Loading` → `Success` | `Error`;
//! nothing else writes the status.

use std::collections::HashMap;
use std::path::PathBuf;
use strum::{EnumIter, IntoEnumIterator};
use tracing::{debug, error, info};

use crate::client::TemplateService;
use crate::download::FileSaver;
use crate::error::{AppError, TemplateError};
use crate::request::{FieldId, FieldUpdate, FieldValidation, TemplateRequest};
use crate::types::InputKind;

/// Confirmation shown after the archive has been saved
pub const SUCCESS_MESSAGE: &str = "Engine template generated successfully!";

/// Status of the most recent submission
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// A request is in flight
    Loading,
    /// Last submission saved an archive
    Success(String),
    /// Last submission failed
    Error(String),
}

impl SubmitStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Text for the message region, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success(msg) | Self::Error(msg) => Some(msg),
            Self::Idle | Self::Loading => None,
        }
    }
}

/// Why a submit request did not start
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRejected {
    /// A previous submission has not settled
    InFlight,
    /// Required fields are empty
    MissingFields(Vec<FieldId>),
}

/// Focusable controls, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter)]
pub enum FormFocus {
    #[default]
    EngineName,
    Version,
    Author,
    Description,
    IncludeExamples,
    Framework,
    Submit,
}

impl FormFocus {
    /// Field edited by this control, `None` for the submit button
    pub fn field(&self) -> Option<FieldId> {
        match self {
            Self::EngineName => Some(FieldId::EngineName),
            Self::Version => Some(FieldId::Version),
            Self::Author => Some(FieldId::Author),
            Self::Description => Some(FieldId::Description),
            Self::IncludeExamples => Some(FieldId::IncludeExamples),
            Self::Framework => Some(FieldId::Framework),
            Self::Submit => None,
        }
    }

    pub fn next(&self) -> Self {
        let all: Vec<Self> = Self::iter().collect();
        let idx = all.iter().position(|f| f == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    pub fn previous(&self) -> Self {
        let all: Vec<Self> = Self::iter().collect();
        let idx = all.iter().position(|f| f == self).unwrap_or(0);
        all[(idx + all.len() - 1) % all.len()]
    }
}

/// Form State Holder
#[derive(Debug, Clone, Default)]
pub struct FormState {
    request: TemplateRequest,
    status: SubmitStatus,
    validation: HashMap<FieldId, FieldValidation>,
    /// Focused control
    pub focus: FormFocus,
    /// Whether the help overlay is visible
    pub help_visible: bool,
    /// Path of the last saved archive
    pub last_saved: Option<PathBuf>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing record, e.g. a prefill file
    pub fn with_request(request: TemplateRequest) -> Self {
        Self {
            request,
            ..Self::default()
        }
    }

    pub fn request(&self) -> &TemplateRequest {
        &self.request
    }

    pub fn status(&self) -> &SubmitStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    /// Validation message for a field, if it failed the last submit attempt
    pub fn field_error(&self, field: FieldId) -> Option<&str> {
        self.validation
            .get(&field)
            .filter(|v| !v.is_valid)
            .map(|v| v.message.as_str())
    }

    /// Handle an untyped input event; updates exactly one field.
    pub fn on_field_change(
        &mut self,
        field_name: &str,
        raw_value: &str,
        input_kind: InputKind,
    ) -> crate::error::Result<()> {
        let update = FieldUpdate::parse(field_name, raw_value, input_kind)?;
        self.apply(update);
        Ok(())
    }

    /// Apply a typed update
    pub fn apply(&mut self, update: FieldUpdate) {
        let field = update.field();
        self.request.apply(update);
        // A field that was flagged clears its hint once it becomes valid.
        if self.validation.contains_key(&field) {
            let result = self.request.validate_field(field);
            self.validation.insert(field, result);
        }
    }

    /// Steps 1-2 of a submission: guard, then enter `Loading`.
    ///
    /// Returns the snapshot to send. The live record may keep changing while
    /// the request is in flight; the snapshot does not.
    pub fn begin_submit(&mut self) -> Result<TemplateRequest, SubmitRejected> {
        if self.is_loading() {
            debug!("Submit ignored: request already in flight");
            return Err(SubmitRejected::InFlight);
        }

        self.validation = FieldId::required_text_fields()
            .map(|f| (f, self.request.validate_field(f)))
            .collect();
        let missing = self.request.missing_fields();
        if !missing.is_empty() {
            debug!("Submit blocked, missing fields: {:?}", missing);
            self.focus = focus_for(missing[0]);
            return Err(SubmitRejected::MissingFields(missing));
        }

        self.status = SubmitStatus::Loading;
        self.last_saved = None;
        info!(
            "Submitting template request for '{}' ({})",
            self.request.engine_name, self.request.framework
        );
        Ok(self.request.clone())
    }

    /// Steps 3-5 of a submission: save on success, then settle the status.
    ///
    /// A save failure is returned to the caller rather than shown as a status
    /// message. The loading flag is cleared on every path.
    pub fn finish_submit(
        &mut self,
        snapshot: &TemplateRequest,
        outcome: Result<Vec<u8>, TemplateError>,
        saver: &dyn FileSaver,
    ) -> crate::error::Result<()> {
        match outcome {
            Ok(payload) => {
                let filename = snapshot.download_filename();
                match saver.save(&payload, &filename) {
                    Ok(path) => {
                        self.last_saved = Some(path);
                        self.status = SubmitStatus::Success(SUCCESS_MESSAGE.to_string());
                        Ok(())
                    }
                    Err(e) => {
                        error!("Saving {} failed: {}", filename, e);
                        self.status = SubmitStatus::Idle;
                        Err(e)
                    }
                }
            }
            Err(e) => {
                error!("Template generation failed: {}", e);
                self.status = SubmitStatus::Error(e.user_message());
                Ok(())
            }
        }
    }

    /// Run the whole workflow synchronously.
    ///
    /// Service failures settle into `SubmitStatus::Error` and return `Ok`;
    /// only rejections and save failures are errors here.
    pub fn submit(
        &mut self,
        service: &dyn TemplateService,
        saver: &dyn FileSaver,
    ) -> crate::error::Result<()> {
        let snapshot = self.begin_submit()?;
        let outcome = service.generate(&snapshot);
        self.finish_submit(&snapshot, outcome, saver)
    }
}

fn focus_for(field: FieldId) -> FormFocus {
    FormFocus::iter()
        .find(|f| f.field() == Some(field))
        .unwrap_or_default()
}

impl From<SubmitRejected> for AppError {
    fn from(rejected: SubmitRejected) -> Self {
        match rejected {
            SubmitRejected::InFlight => AppError::validation("A submission is already in progress"),
            SubmitRejected::MissingFields(fields) => {
                let names: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
                AppError::validation(format!("Missing required fields: {}", names.join(", ")))
            }
        }
    }
}

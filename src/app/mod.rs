//! Application module
//!
//! Contains the main application loop and event handling.
//!
//! # Module Structure
//! - `state` - Form state and the submission state machine
//! - Main module - App struct, event loop and the background request worker

mod state;

pub use state::{FormFocus, FormState, SubmitRejected, SubmitStatus, SUCCESS_MESSAGE};

use crate::client::TemplateService;
use crate::download::FileSaver;
use crate::error::{Result, TemplateError};
use crate::input::{FormAction, InputHandler};
use crate::request::TemplateRequest;
use crate::ui::UiRenderer;
use crossterm::event::{Event, KeyEvent};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

/// Message sent from the request worker thread back to the UI thread
#[derive(Debug)]
pub struct SubmitMessage {
    /// Record that was sent
    pub request: TemplateRequest,
    /// What the service answered
    pub outcome: std::result::Result<Vec<u8>, TemplateError>,
}

/// Main application struct
pub struct App {
    state: FormState,
    ui_renderer: UiRenderer,
    input_handler: InputHandler,
    service: Arc<dyn TemplateService>,
    saver: Box<dyn FileSaver>,
    /// Channel sender for request results (cloned to worker threads)
    submit_tx: Sender<SubmitMessage>,
    /// Channel receiver for request results (polled in main loop)
    submit_rx: Receiver<SubmitMessage>,
}

impl App {
    pub fn new(
        state: FormState,
        service: Arc<dyn TemplateService>,
        saver: Box<dyn FileSaver>,
    ) -> Self {
        let (submit_tx, submit_rx) = mpsc::channel();
        Self {
            state,
            ui_renderer: UiRenderer::new(),
            input_handler: InputHandler::new(),
            service,
            saver,
            submit_tx,
            submit_rx,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Run the main application loop
    pub fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    ) -> Result<()> {
        info!("Starting main application loop");

        loop {
            // Settle any finished request before reading input
            self.poll_submit_messages()?;

            if crossterm::event::poll(Duration::from_millis(50))? {
                if let Event::Key(key_event) = crossterm::event::read()? {
                    if self.handle_key(key_event) {
                        break;
                    }
                }
            }

            terminal.draw(|f| {
                self.ui_renderer
                    .render(f, &self.state, self.input_handler.keybindings())
            })?;
        }

        info!("Main application loop finished");
        Ok(())
    }

    /// Handle a key event. Returns true when the user asked to quit.
    pub fn handle_key(&mut self, key_event: KeyEvent) -> bool {
        let action = self.input_handler.handle_key(&self.state, key_event);
        self.dispatch(action)
    }

    /// Apply an action to the form. Returns true on quit.
    pub fn dispatch(&mut self, action: FormAction) -> bool {
        match action {
            FormAction::None => {}
            FormAction::Focus(focus) => self.state.focus = focus,
            FormAction::Edit(update) => self.state.apply(update),
            FormAction::ToggleHelp => self.state.help_visible = !self.state.help_visible,
            FormAction::Submit => self.start_submit(),
            FormAction::Quit => {
                if self.state.is_loading() {
                    debug!("Quitting with a request still in flight");
                }
                return true;
            }
        }
        false
    }

    /// Start a submission on a worker thread.
    ///
    /// Rejected submits leave the form as `begin_submit` set it: field hints
    /// for missing values, nothing at all for a duplicate while loading.
    fn start_submit(&mut self) {
        let snapshot = match self.state.begin_submit() {
            Ok(snapshot) => snapshot,
            Err(rejected) => {
                debug!("Submit rejected: {:?}", rejected);
                return;
            }
        };

        let tx = self.submit_tx.clone();
        let service = Arc::clone(&self.service);
        thread::spawn(move || {
            let outcome = service.generate(&snapshot);
            let _ = tx.send(SubmitMessage {
                request: snapshot,
                outcome,
            });
        });
    }

    /// Write the request file, if one was asked for, then return the loop's
    /// result. The file is written even when the loop ended with an error.
    pub fn finish(
        &self,
        run_result: Result<()>,
        save_request: Option<&Path>,
    ) -> anyhow::Result<()> {
        let saved = save_request
            .map(|path| self.state.request().save_to_file(path))
            .transpose();
        if let Some(path) = save_request {
            if saved.is_ok() {
                info!("Request saved to {}", path.display());
            }
        }
        run_result?;
        saved?;
        Ok(())
    }

    /// Poll for request results from worker threads
    pub fn poll_submit_messages(&mut self) -> Result<()> {
        while let Ok(msg) = self.submit_rx.try_recv() {
            self.state
                .finish_submit(&msg.request, msg.outcome, self.saver.as_ref())?;
            if let Some(path) = &self.state.last_saved {
                info!("Archive written to {}", path.display());
            }
        }
        Ok(())
    }
}

//! Application state and logic for the TUI.
//!
//! [`App`] owns the active section, scroll position, focus, and the single
//! [`EditSession`]. Asynchronous work (file ingestion, generation) runs in
//! spawned tasks that report back through [`AppMessage`]; all state mutation
//! happens on the UI loop, one message at a time.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use crate::document::Document;
use crate::genai::{GenAiClient, GenerateError, GeneratedImage};
use crate::ingest::{self, IngestError};
use crate::models::{ContentBlock, DocumentSection, EncodedImage};
use crate::session::{CompletionDisposition, EditSession};

/// Which UI component has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Section list navigation
    #[default]
    Sections,
    /// Source path input in the image lab
    SourcePath,
    /// Instruction input in the image lab
    Instruction,
}

/// Messages sent back to the UI loop by spawned tasks.
#[derive(Debug)]
pub enum AppMessage {
    /// Image ingestion finished
    SourceEncoded(Result<EncodedImage, IngestError>),
    /// Generation call landed; `seq` ties it to the inputs it was issued under
    GenerationFinished {
        seq: u64,
        outcome: Result<GeneratedImage, GenerateError>,
    },
}

/// Top-level application state.
pub struct App {
    pub document: &'static Document,
    pub active_section: usize,
    pub scroll: u16,
    pub focus: Focus,
    pub session: EditSession,
    /// Source-path input contents
    pub path_input: String,
    /// A file/clipboard read is outstanding
    pub ingesting: bool,
    /// Last ingestion failure, shown under the path input
    pub source_error: Option<String>,
    pub should_quit: bool,
    client: Arc<GenAiClient>,
    tx: mpsc::UnboundedSender<AppMessage>,
}

impl App {
    pub fn new(
        document: &'static Document,
        client: Arc<GenAiClient>,
        tx: mpsc::UnboundedSender<AppMessage>,
    ) -> Self {
        Self {
            document,
            active_section: 0,
            scroll: 0,
            focus: Focus::Sections,
            session: EditSession::new(),
            path_input: String::new(),
            ingesting: false,
            source_error: None,
            should_quit: false,
            client,
            tx,
        }
    }

    pub fn active_section(&self) -> &DocumentSection {
        &self.document.sections[self.active_section]
    }

    /// Whether the active section embeds the image tool.
    pub fn active_section_has_tool(&self) -> bool {
        self.active_section()
            .blocks
            .iter()
            .any(|b| matches!(b, ContentBlock::ImageTool { .. }))
    }

    // ------------------------------------------------------------------
    // Input handling
    // ------------------------------------------------------------------

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.focus {
            Focus::Sections => self.handle_sections_key(key),
            Focus::SourcePath | Focus::Instruction => self.handle_editor_key(key),
        }
    }

    fn handle_sections_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.prev_section(),
            KeyCode::Down | KeyCode::Char('j') => self.next_section(),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(10),
            KeyCode::Tab | KeyCode::Enter => {
                if self.active_section_has_tool() {
                    self.focus = Focus::SourcePath;
                }
            }
            _ => {}
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        // Ctrl-chords first: generate and clipboard paste work from both fields.
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('g') => self.trigger_generate(),
                KeyCode::Char('v') => self.paste_clipboard(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.focus = Focus::Sections,
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::SourcePath => Focus::Instruction,
                    _ => Focus::Sections,
                };
            }
            KeyCode::Left => {
                let prev = self.session.aspect_ratio().prev();
                self.session.set_aspect_ratio(prev);
            }
            KeyCode::Right => {
                let next = self.session.aspect_ratio().next();
                self.session.set_aspect_ratio(next);
            }
            KeyCode::Char(c) => self.insert_char(c),
            KeyCode::Backspace => self.delete_char(),
            KeyCode::Enter => match self.focus {
                Focus::SourcePath => self.submit_path(),
                _ => self.trigger_generate(),
            },
            _ => {}
        }
    }

    fn insert_char(&mut self, c: char) {
        match self.focus {
            Focus::SourcePath => self.path_input.push(c),
            Focus::Instruction => {
                let mut instruction = self.session.instruction().to_string();
                instruction.push(c);
                self.session.set_instruction(instruction);
            }
            Focus::Sections => {}
        }
    }

    fn delete_char(&mut self) {
        match self.focus {
            Focus::SourcePath => {
                self.path_input.pop();
            }
            Focus::Instruction => {
                let mut instruction = self.session.instruction().to_string();
                instruction.pop();
                self.session.set_instruction(instruction);
            }
            Focus::Sections => {}
        }
    }

    pub fn next_section(&mut self) {
        if self.active_section + 1 < self.document.sections.len() {
            self.active_section += 1;
            self.scroll = 0;
        }
    }

    pub fn prev_section(&mut self) {
        if self.active_section > 0 {
            self.active_section -= 1;
            self.scroll = 0;
        }
    }

    // ------------------------------------------------------------------
    // Async work
    // ------------------------------------------------------------------

    /// Read the file named in the path input. Completion arrives as
    /// [`AppMessage::SourceEncoded`].
    pub fn submit_path(&mut self) {
        let path = self.path_input.trim().to_string();
        if path.is_empty() {
            return;
        }
        if !ingest::looks_like_image_path(&path) {
            tracing::debug!(path, "submitted path has no known image extension; trying anyway");
        }
        self.ingesting = true;
        self.source_error = None;

        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = ingest::read_image_file(&path).await;
            let _ = tx.send(AppMessage::SourceEncoded(result));
        });
    }

    /// Read an image from the clipboard.
    pub fn paste_clipboard(&mut self) {
        self.ingesting = true;
        self.source_error = None;

        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = tokio::task::spawn_blocking(ingest::read_clipboard_image)
                .await
                .unwrap_or_else(|e| Err(IngestError::Clipboard(e.to_string())));
            let _ = tx.send(AppMessage::SourceEncoded(result));
        });
    }

    /// Start a generation if the session accepts one.
    ///
    /// A rejected request (missing input, call already outstanding) is a
    /// no-op: no task is spawned and no state changes.
    pub fn trigger_generate(&mut self) {
        let Some(ticket) = self.session.begin_generation() else {
            tracing::debug!("generate request rejected: missing input or call in flight");
            return;
        };

        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = client
                .generate(&ticket.source, &ticket.instruction, ticket.aspect_ratio)
                .await;
            let _ = tx.send(AppMessage::GenerationFinished {
                seq: ticket.seq,
                outcome,
            });
        });
    }

    // ------------------------------------------------------------------
    // Message handling
    // ------------------------------------------------------------------

    pub fn handle_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::SourceEncoded(Ok(image)) => {
                self.ingesting = false;
                self.source_error = None;
                tracing::info!(
                    media_type = %image.media_type,
                    bytes = image.byte_size(),
                    "source image loaded"
                );
                self.session.set_source(image);
            }
            AppMessage::SourceEncoded(Err(err)) => {
                self.ingesting = false;
                tracing::warn!(error = %err, "image ingestion failed");
                self.source_error = Some(err.to_string());
            }
            AppMessage::GenerationFinished { seq, outcome } => {
                match self.session.complete_generation(seq, outcome) {
                    CompletionDisposition::Applied => {
                        tracing::info!(status = ?self.session.status(), "generation finished");
                    }
                    CompletionDisposition::Stale => {
                        tracing::debug!(seq, "stale generation result discarded");
                    }
                    CompletionDisposition::NotInFlight => {
                        tracing::debug!(seq, "completion arrived with no call outstanding");
                    }
                }
            }
        }
    }
}

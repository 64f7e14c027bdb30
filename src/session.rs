//! Edit session state machine.
//!
//! One [`EditSession`] governs one image-edit attempt: the current source
//! image, the instruction text, the target aspect ratio, and the lifecycle
//! of the single in-flight generation call. All mutation goes through the
//! transition methods here; the UI only reads.
//!
//! Staleness: every input mutation bumps a sequence number, and a generation
//! ticket carries the number it was issued under. A completion whose number
//! no longer matches is discarded instead of overwriting newer state. The
//! in-flight call itself is never cancelled.

use chrono::{DateTime, Utc};

use crate::genai::{GenerateError, GeneratedImage};
use crate::models::{AspectRatio, EncodedImage};

/// Lifecycle status of the session's remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// No source image selected yet
    #[default]
    Idle,
    /// Source image present, no call outstanding
    Ready,
    /// Exactly one generation call outstanding
    InFlight,
    /// Last call produced a result image
    Succeeded,
    /// Last call failed; error detail is set
    Failed,
}

/// A successful generation outcome held by the session.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    pub image: EncodedImage,
    pub width: u32,
    pub height: u32,
    /// Aspect ratio the result was requested with
    pub aspect_ratio: AspectRatio,
    pub completed_at: DateTime<Utc>,
}

/// Inputs captured at the moment a generation was started.
///
/// The ticket owns clones of the inputs so the remote call is unaffected by
/// later edits; `seq` ties the eventual completion back to the inputs it was
/// issued against.
#[derive(Debug, Clone)]
pub struct GenerationTicket {
    pub seq: u64,
    pub source: EncodedImage,
    pub instruction: String,
    pub aspect_ratio: AspectRatio,
}

/// What `complete_generation` did with a delivered outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionDisposition {
    /// Outcome applied to the session
    Applied,
    /// Inputs changed after the call was issued; outcome discarded
    Stale,
    /// No call was outstanding; outcome ignored
    NotInFlight,
}

/// The per-interaction edit session.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    source: Option<EncodedImage>,
    instruction: String,
    aspect_ratio: AspectRatio,
    status: SessionStatus,
    result: Option<GenerationResult>,
    error: Option<String>,
    /// Bumped on every input mutation; stamps generation tickets.
    seq: u64,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn source(&self) -> Option<&EncodedImage> {
        self.source.as_ref()
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn aspect_ratio(&self) -> AspectRatio {
        self.aspect_ratio
    }

    pub fn result(&self) -> Option<&GenerationResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a generate request would currently be accepted.
    pub fn can_generate(&self) -> bool {
        self.status != SessionStatus::InFlight
            && self.source.is_some()
            && !self.instruction.trim().is_empty()
    }

    /// Select a new source image.
    ///
    /// Always legal. Discards the previous source, any prior result and any
    /// prior error. While a call is outstanding the status stays `InFlight`
    /// (the call runs to completion and its result is discarded as stale);
    /// otherwise the session becomes `Ready`.
    pub fn set_source(&mut self, image: EncodedImage) {
        self.seq += 1;
        self.source = Some(image);
        self.result = None;
        self.error = None;
        if self.status != SessionStatus::InFlight {
            self.status = SessionStatus::Ready;
        }
    }

    /// Update the instruction text.
    ///
    /// `Succeeded`/`Failed` fall back to `Ready`; `Ready` stays `Ready`.
    /// With no source selected the session stays `Idle`.
    pub fn set_instruction(&mut self, instruction: impl Into<String>) {
        let instruction = instruction.into();
        if instruction == self.instruction {
            return;
        }
        self.seq += 1;
        self.instruction = instruction;
        self.settle_after_edit();
    }

    /// Update the target aspect ratio. Same status rules as instruction edits.
    pub fn set_aspect_ratio(&mut self, ratio: AspectRatio) {
        if ratio == self.aspect_ratio {
            return;
        }
        self.seq += 1;
        self.aspect_ratio = ratio;
        self.settle_after_edit();
    }

    /// Start a generation.
    ///
    /// Returns a ticket when the session is `Ready` with a source image and
    /// a non-empty instruction; otherwise `None` with no state change and no
    /// side effect. While `InFlight`, further requests are rejected, keeping
    /// the outstanding-call count at one.
    pub fn begin_generation(&mut self) -> Option<GenerationTicket> {
        if !self.can_generate() {
            return None;
        }
        let source = self.source.clone()?;
        self.status = SessionStatus::InFlight;
        self.error = None;
        Some(GenerationTicket {
            seq: self.seq,
            source,
            instruction: self.instruction.clone(),
            aspect_ratio: self.aspect_ratio,
        })
    }

    /// Deliver the outcome of a generation call.
    ///
    /// A stale outcome (issued under an older sequence number) is discarded
    /// and the session settles back on its current inputs. An applied
    /// success sets the result and clears the error; an applied failure sets
    /// the error and keeps the previous result visible.
    pub fn complete_generation(
        &mut self,
        seq: u64,
        outcome: Result<GeneratedImage, GenerateError>,
    ) -> CompletionDisposition {
        if self.status != SessionStatus::InFlight {
            return CompletionDisposition::NotInFlight;
        }
        if seq != self.seq {
            self.status = if self.source.is_some() {
                SessionStatus::Ready
            } else {
                SessionStatus::Idle
            };
            return CompletionDisposition::Stale;
        }

        match outcome {
            Ok(generated) => {
                self.result = Some(GenerationResult {
                    image: generated.image,
                    width: generated.width,
                    height: generated.height,
                    aspect_ratio: self.aspect_ratio,
                    completed_at: Utc::now(),
                });
                self.error = None;
                self.status = SessionStatus::Succeeded;
            }
            Err(err) => {
                self.error = Some(err.to_string());
                self.status = SessionStatus::Failed;
            }
        }
        CompletionDisposition::Applied
    }

    /// Settle status after an instruction or aspect-ratio edit.
    fn settle_after_edit(&mut self) {
        match self.status {
            SessionStatus::Succeeded | SessionStatus::Failed => {
                self.error = None;
                self.status = SessionStatus::Ready;
            }
            SessionStatus::Idle | SessionStatus::Ready | SessionStatus::InFlight => {}
        }
    }
}

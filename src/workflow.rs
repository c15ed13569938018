//! The Upload → Sign → Complete state machine as a pure reducer.
//!
//! `Workflow` is a plain value; `reduce` returns the next value or the
//! precondition that was violated. Side effects (preview files, the stamp
//! itself) live in the controller.

use serde::Serialize;

use crate::error::SignerError;
use crate::features::document::Document;
use crate::preview::PreviewHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Upload,
    Sign,
    Complete,
}

impl Stage {
    pub fn index(self) -> usize {
        match self {
            Stage::Upload => 0,
            Stage::Sign => 1,
            Stage::Complete => 2,
        }
    }
}

/// Identifies one stamp job. Never reused within a controller's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StampTicket(u64);

impl StampTicket {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// A document together with the preview that shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded {
    pub document: Document,
    pub preview: PreviewHandle,
}

#[derive(Debug)]
pub enum Event {
    DocumentSelected(Loaded),
    StampStarted,
    StampSucceeded { ticket: StampTicket, signed: Loaded },
    StampFailed { ticket: StampTicket },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workflow {
    stage: Stage,
    original: Option<Loaded>,
    signed: Option<Loaded>,
    in_flight: Option<StampTicket>,
    next_ticket: u64,
}

impl Workflow {
    pub const fn new() -> Self {
        Self {
            stage: Stage::Upload,
            original: None,
            signed: None,
            in_flight: None,
            next_ticket: 0,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn original(&self) -> Option<&Loaded> {
        self.original.as_ref()
    }

    pub fn signed(&self) -> Option<&Loaded> {
        self.signed.as_ref()
    }

    pub fn in_flight(&self) -> Option<StampTicket> {
        self.in_flight
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_current(&self, ticket: StampTicket) -> bool {
        self.in_flight == Some(ticket)
    }

    /// Preview handles referenced by this value.
    pub fn handles(&self) -> Vec<PreviewHandle> {
        self.original
            .iter()
            .chain(self.signed.iter())
            .map(|loaded| loaded.preview.clone())
            .collect()
    }

    pub fn reduce(&self, event: Event) -> Result<Workflow, SignerError> {
        match event {
            Event::DocumentSelected(loaded) => {
                if self.is_busy() {
                    return Err(SignerError::Precondition("stamp_in_flight"));
                }
                Ok(Workflow {
                    stage: Stage::Sign,
                    original: Some(loaded),
                    signed: None,
                    in_flight: None,
                    next_ticket: self.next_ticket,
                })
            }
            Event::StampStarted => match self.stage {
                Stage::Upload => Err(SignerError::Precondition("no_document")),
                Stage::Complete => Err(SignerError::Precondition("already_signed")),
                Stage::Sign if self.is_busy() => {
                    Err(SignerError::Precondition("stamp_in_flight"))
                }
                Stage::Sign => {
                    let ticket = self.next_ticket + 1;
                    Ok(Workflow {
                        in_flight: Some(StampTicket(ticket)),
                        next_ticket: ticket,
                        ..self.clone()
                    })
                }
            },
            Event::StampSucceeded { ticket, signed } => {
                if !self.is_current(ticket) {
                    return Err(SignerError::Precondition("stale_result"));
                }
                Ok(Workflow {
                    stage: Stage::Complete,
                    original: self.original.clone(),
                    signed: Some(signed),
                    in_flight: None,
                    next_ticket: self.next_ticket,
                })
            }
            Event::StampFailed { ticket } => {
                if !self.is_current(ticket) {
                    return Err(SignerError::Precondition("stale_result"));
                }
                Ok(Workflow {
                    in_flight: None,
                    ..self.clone()
                })
            }
        }
    }

    /// Back to Upload. Tickets keep counting so late results stay stale.
    pub fn reset(&self) -> Workflow {
        Workflow {
            next_ticket: self.next_ticket,
            ..Workflow::new()
        }
    }
}

impl Default for Workflow {
    fn default() -> Self {
        Self::new()
    }
}

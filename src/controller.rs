use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::SignerConfig;
use crate::error::{SignerError, TransformError};
use crate::features::document::{ensure_pdf_media_type, Document};
use crate::features::font::{FileFontSource, FontSource};
use crate::features::stamp::{apply_stamp, StampSpec};
use crate::preview::{PreviewHandle, PreviewRegistry};
use crate::workflow::{Event, Loaded, Stage, StampTicket, Workflow};

/// Everything the stamp needs, detached from the controller so it can run
/// on another thread.
pub struct StampJob {
    ticket: StampTicket,
    document: Document,
    font: Arc<dyn FontSource>,
    spec: StampSpec,
}

impl StampJob {
    /// Run the transform. A panic inside it is reported as a failed stamp so
    /// the in-flight slot is always released.
    pub fn run(self) -> StampOutcome {
        log::info!(
            "stamping {} bytes with font {}",
            self.document.len(),
            self.font.describe()
        );
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            self.font
                .fetch()
                .and_then(|font| apply_stamp(self.document.bytes(), font, &self.spec))
        }))
        .unwrap_or_else(|_| {
            log::error!("stamp {} panicked", self.ticket.value());
            Err(TransformError::Parse("panic".into()))
        })
        .map(|bytes| self.document.derive(bytes));
        StampOutcome {
            ticket: self.ticket,
            result,
        }
    }
}

#[derive(Debug)]
pub struct StampOutcome {
    pub ticket: StampTicket,
    pub result: Result<Document, TransformError>,
}

pub struct WorkflowController {
    workflow: Workflow,
    previews: PreviewRegistry,
    config: SignerConfig,
    font_override: Option<Arc<dyn FontSource>>,
}

impl WorkflowController {
    pub const fn new() -> Self {
        Self {
            workflow: Workflow::new(),
            previews: PreviewRegistry::new(),
            config: SignerConfig::new(),
            font_override: None,
        }
    }

    pub fn configure(&mut self, config: SignerConfig) {
        self.previews
            .set_dir(config.preview_dir.as_ref().map(PathBuf::from));
        self.config = config;
    }

    pub fn config(&self) -> &SignerConfig {
        &self.config
    }

    /// Replace the configured font file, e.g. with a bundled asset.
    pub fn set_font_source(&mut self, source: Option<Arc<dyn FontSource>>) {
        self.font_override = source;
    }

    pub fn workflow(&self) -> &Workflow {
        &self.workflow
    }

    pub fn stage(&self) -> Stage {
        self.workflow.stage()
    }

    pub fn is_busy(&self) -> bool {
        self.workflow.is_busy()
    }

    pub fn original_preview(&self) -> Option<&PreviewHandle> {
        self.workflow.original().map(|l| &l.preview)
    }

    pub fn signed_preview(&self) -> Option<&PreviewHandle> {
        self.workflow.signed().map(|l| &l.preview)
    }

    pub fn previews(&self) -> &PreviewRegistry {
        &self.previews
    }

    pub fn select_document(
        &mut self,
        bytes: impl Into<Arc<[u8]>>,
        declared_type: Option<&str>,
        name: Option<&str>,
    ) -> Result<(), SignerError> {
        ensure_pdf_media_type(declared_type)?;
        if self.workflow.is_busy() {
            return Err(SignerError::Precondition("stamp_in_flight"));
        }
        let document = Document::new(bytes, name);
        let preview = self.previews.create(&document)?;
        let event = Event::DocumentSelected(Loaded {
            document,
            preview: preview.clone(),
        });
        if let Err(err) = self.commit(event) {
            self.previews.revoke(&preview);
            return Err(err);
        }
        log::info!(
            "document selected ({} bytes), preview {}",
            self.workflow.original().map(|l| l.document.len()).unwrap_or(0),
            preview.uri()
        );
        Ok(())
    }

    /// Run the stamp inline and commit its result.
    pub fn apply_stamp(&mut self) -> Result<(), SignerError> {
        let job = self.begin_stamp()?;
        let outcome = job.run();
        self.finish_stamp(outcome)
    }

    /// Claim the in-flight slot and hand out the work to do.
    pub fn begin_stamp(&mut self) -> Result<StampJob, SignerError> {
        self.commit(Event::StampStarted)?;
        let ticket = self
            .workflow
            .in_flight()
            .ok_or(SignerError::Precondition("stamp_in_flight"))?;
        let document = self
            .workflow
            .original()
            .map(|l| l.document.clone())
            .ok_or(SignerError::Precondition("no_document"))?;
        Ok(StampJob {
            ticket,
            document,
            font: self.font_source(),
            spec: self.config.stamp.clone(),
        })
    }

    pub fn finish_stamp(&mut self, outcome: StampOutcome) -> Result<(), SignerError> {
        let StampOutcome { ticket, result } = outcome;
        let signed = match result {
            Ok(signed) => signed,
            Err(err) => {
                self.commit(Event::StampFailed { ticket })?;
                log::warn!("stamp {} failed: {err}", ticket.value());
                return Err(err.into());
            }
        };
        if !self.workflow.is_current(ticket) {
            log::info!("discarding stale stamp result {}", ticket.value());
            return Err(SignerError::Precondition("stale_result"));
        }

        let preview = match self.previews.create(&signed) {
            Ok(preview) => preview,
            Err(err) => {
                self.commit(Event::StampFailed { ticket })?;
                return Err(err);
            }
        };
        let event = Event::StampSucceeded {
            ticket,
            signed: Loaded {
                document: signed,
                preview: preview.clone(),
            },
        };
        if let Err(err) = self.commit(event) {
            self.previews.revoke(&preview);
            return Err(err);
        }
        log::info!("stamp {} committed, preview {}", ticket.value(), preview.uri());
        Ok(())
    }

    pub fn reset(&mut self) {
        self.workflow = self.workflow.reset();
        self.previews.revoke_all();
    }

    fn font_source(&self) -> Arc<dyn FontSource> {
        match &self.font_override {
            Some(source) => Arc::clone(source),
            None => Arc::new(FileFontSource::new(self.config.font_path())),
        }
    }

    /// Apply `event` and revoke every preview the new workflow no longer references.
    fn commit(&mut self, event: Event) -> Result<(), SignerError> {
        let next = self.workflow.reduce(event)?;
        let kept = next.handles();
        for handle in self.workflow.handles() {
            if !kept.contains(&handle) {
                self.previews.revoke(&handle);
            }
        }
        self.workflow = next;
        Ok(())
    }
}

impl Default for WorkflowController {
    fn default() -> Self {
        Self::new()
    }
}

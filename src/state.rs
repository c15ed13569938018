use crate::controller::WorkflowController;
use crate::error::SignerError;

/// Blocking message shown above the current screen until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertState {
    pub code: &'static str,
    pub detail: String,
}

impl From<&SignerError> for AlertState {
    fn from(err: &SignerError) -> Self {
        let detail = match err {
            SignerError::Precondition(reason) => (*reason).to_string(),
            other => other.to_string(),
        };
        Self {
            code: err.code(),
            detail,
        }
    }
}

pub struct AppState {
    pub signer: WorkflowController,
    pub locale: String,
    pub alert: Option<AlertState>,
    pub loading_message: Option<String>,
}

impl AppState {
    // const so it can be used in static initialization
    pub const fn new() -> Self {
        Self {
            signer: WorkflowController::new(),
            locale: String::new(),
            alert: None,
            loading_message: None,
        }
    }

    pub fn show_error(&mut self, err: &SignerError) {
        match err {
            SignerError::Transform(_) | SignerError::Preview(_) => log::error!("{err}"),
            _ => log::warn!("{err}"),
        }
        self.alert = Some(AlertState::from(err));
    }

    pub fn clear_alert(&mut self) {
        self.alert = None;
    }

    /// Drop documents, previews and transient UI state. Locale and config stay.
    pub fn reset_runtime(&mut self) {
        self.signer.reset();
        self.alert = None;
        self.loading_message = None;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

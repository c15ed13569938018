use std::fs::File;
use std::io::Read;
use std::os::unix::io::{FromRawFd, RawFd};

use rust_i18n::t;
use serde_json::Value;

use crate::error::SignerError;
use crate::features::document::PDF_MEDIA_TYPE;
use crate::features::render_stepper;
use crate::state::{AlertState, AppState};
use crate::ui::{
    Alert as UiAlert, Button as UiButton, Column as UiColumn, PdfPreview as UiPdfPreview,
    Progress as UiProgress, Text as UiText,
};
use crate::workflow::Stage;

const PREVIEW_HEIGHT: u32 = 380;

/// Read the picked file completely. Takes ownership of `fd`.
pub fn read_source(fd: Option<i32>, path: Option<&str>) -> Result<Vec<u8>, SignerError> {
    let mut buffer = Vec::new();
    if let Some(raw_fd) = fd {
        if raw_fd < 0 {
            return Err(SignerError::Host("invalid_fd".into()));
        }
        let mut file = unsafe { File::from_raw_fd(raw_fd as RawFd) };
        file.read_to_end(&mut buffer)
            .map_err(|e| SignerError::Host(format!("read_failed:{e}")))?;
    } else if let Some(p) = path {
        let mut file =
            File::open(p).map_err(|e| SignerError::Host(format!("open_failed:{e}")))?;
        file.read_to_end(&mut buffer)
            .map_err(|e| SignerError::Host(format!("read_failed:{e}")))?;
    } else {
        return Err(SignerError::Host("missing_source".into()));
    }
    Ok(buffer)
}

pub fn render_signer_screen(state: &AppState) -> Value {
    let title = t!("app_title");
    let subtitle = t!("app_subtitle");
    let stage = state.signer.stage();

    let mut children = vec![
        serde_json::to_value(UiText::new(&title).size(28.0)).unwrap(),
        serde_json::to_value(UiText::new(&subtitle).size(14.0)).unwrap(),
        render_stepper(stage),
    ];

    match stage {
        Stage::Upload => render_upload(&mut children),
        Stage::Sign => render_sign(state, &mut children),
        Stage::Complete => render_complete(state, &mut children),
    }

    if let Some(alert) = &state.alert {
        children.push(render_alert(alert));
    }

    serde_json::to_value(UiColumn::new(children).padding(24)).unwrap()
}

fn render_upload(children: &mut Vec<Value>) {
    let heading = t!("upload_title");
    let hint = t!("upload_hint");
    let choose = t!("upload_button");
    let choose_cd = t!("upload_button_description");
    children.push(serde_json::to_value(UiText::new(&heading).size(18.0)).unwrap());
    children.push(serde_json::to_value(UiText::new(&hint).size(14.0)).unwrap());
    children.push(
        serde_json::to_value(
            UiButton::new(&choose, "pdf_select")
                .requires_file_picker(true)
                .mime_filter(PDF_MEDIA_TYPE)
                .content_description(&choose_cd),
        )
        .unwrap(),
    );
}

fn render_sign(state: &AppState, children: &mut Vec<Value>) {
    let busy = state.signer.is_busy();
    push_document_heading(state, children);
    if let Some(preview) = state.signer.original_preview() {
        let label = t!("original_preview");
        children.push(
            serde_json::to_value(
                UiPdfPreview::new(preview.uri())
                    .title(&label)
                    .height(PREVIEW_HEIGHT),
            )
            .unwrap(),
        );
    }
    let sign = t!("sign_button");
    children.push(
        serde_json::to_value(UiButton::new(&sign, "pdf_sign").disabled(busy)).unwrap(),
    );
    if busy {
        let progress = state
            .loading_message
            .clone()
            .unwrap_or_else(|| t!("signing_progress").to_string());
        children.push(serde_json::to_value(UiProgress::new().text(&progress)).unwrap());
    }
}

fn render_complete(state: &AppState, children: &mut Vec<Value>) {
    push_document_heading(state, children);
    let done = t!("complete_title");
    children.push(serde_json::to_value(UiText::new(&done).size(16.0).color("#22c55e")).unwrap());
    if let Some(preview) = state.signer.signed_preview() {
        let label = t!("signed_preview");
        children.push(
            serde_json::to_value(
                UiPdfPreview::new(preview.uri())
                    .title(&label)
                    .height(PREVIEW_HEIGHT),
            )
            .unwrap(),
        );
    }
    let again = t!("start_over");
    children.push(
        serde_json::to_value(
            UiButton::new(&again, "pdf_select")
                .requires_file_picker(true)
                .mime_filter(PDF_MEDIA_TYPE),
        )
        .unwrap(),
    );
}

fn push_document_heading(state: &AppState, children: &mut Vec<Value>) {
    let fallback = t!("untitled_document");
    let name = state
        .signer
        .workflow()
        .original()
        .and_then(|l| l.document.name())
        .unwrap_or(&*fallback);
    children.push(serde_json::to_value(UiText::new(name).size(18.0)).unwrap());
}

fn render_alert(alert: &AlertState) -> Value {
    let title = t!("alert_title");
    let dismiss = t!("alert_dismiss");
    let message = alert_message(alert);
    serde_json::to_value(
        UiAlert::new(&title, &message, alert.code).dismiss_text(&dismiss),
    )
    .unwrap()
}

pub fn alert_message(alert: &AlertState) -> String {
    let message = match (alert.code, alert.detail.as_str()) {
        ("invalid_input", _) => t!("error_invalid_input"),
        ("pdf_parse_failed", _) => t!("error_pdf_parse_failed"),
        ("font_resource_failed", _) => t!("error_font_resource_failed"),
        ("pdf_write_failed", _) => t!("error_pdf_write_failed"),
        ("precondition_failed", "no_document") => t!("error_precondition_no_document"),
        ("precondition_failed", "already_signed") => t!("error_precondition_already_signed"),
        ("precondition_failed", "stamp_in_flight") => t!("error_precondition_stamp_in_flight"),
        ("precondition_failed", _) => t!("error_precondition_failed"),
        ("preview_unavailable", _) => t!("error_preview_unavailable"),
        _ => t!("error_host_input_failed"),
    };
    message.to_string()
}

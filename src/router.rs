use crate::config::SignerConfig;
use crate::controller::{StampJob, StampOutcome};
use crate::error::SignerError;
use crate::features::pdf::{read_source, render_signer_screen};
use crate::i18n::update_locale;
use crate::logging;
use crate::state::AppState;
use jni::objects::{JClass, JString};
use jni::sys::jstring;
use jni::JNIEnv;
use rust_i18n::t;
use serde::Deserialize;
use serde_json::{json, Value};
use std::{
    fs::File,
    os::unix::io::{FromRawFd, RawFd},
    path::Path,
    ptr,
    sync::{mpsc, Mutex, OnceLock},
    thread,
};

#[cfg(test)]
use std::{
    sync::atomic::{AtomicBool, AtomicU64, Ordering},
    sync::MutexGuard,
    time::Duration,
};

struct GlobalState {
    ui: Mutex<AppState>,
    worker: OnceLock<WorkerRuntime>,
    notifications: Mutex<Vec<WorkerResult>>,
}

impl GlobalState {
    const fn new() -> Self {
        Self {
            ui: Mutex::new(AppState::new()),
            worker: OnceLock::new(),
            notifications: Mutex::new(Vec::new()),
        }
    }

    #[cfg(test)]
    fn ui_lock(&self) -> MutexGuard<'_, AppState> {
        self.ui.lock().expect("ui mutex poisoned")
    }

    #[cfg(test)]
    fn ui_try_lock(&self) -> Option<MutexGuard<'_, AppState>> {
        self.ui.try_lock().ok()
    }

    fn worker(&self) -> &WorkerRuntime {
        self.worker.get_or_init(WorkerRuntime::new)
    }

    fn push_worker_result(&self, result: WorkerResult) {
        if let Ok(mut guard) = self.notifications.lock() {
            guard.push(result);
        }
    }

    fn drain_worker_results(&self) -> Vec<WorkerResult> {
        self.notifications
            .lock()
            .map(|mut q| q.drain(..).collect())
            .unwrap_or_default()
    }
}

struct WorkerRuntime {
    #[cfg_attr(test, allow(dead_code))]
    sender: mpsc::Sender<WorkerJob>,
}

impl WorkerRuntime {
    fn new() -> Self {
        let (tx, rx) = mpsc::channel::<WorkerJob>();
        thread::Builder::new()
            .name("pdf-signer-worker".into())
            .spawn(move || {
                while let Ok(job) = rx.recv() {
                    let result = run_worker_job(job);
                    STATE.push_worker_result(result);
                }
            })
            .expect("failed to spawn worker thread");

        Self { sender: tx }
    }

    #[cfg(not(test))]
    fn enqueue(&self, job: WorkerJob) {
        if let Err(mpsc::SendError(job)) = self.sender.send(job) {
            log::warn!("worker unavailable, running job inline");
            STATE.push_worker_result(run_worker_job(job));
        }
    }

    #[cfg(test)]
    fn enqueue(&self, job: WorkerJob) {
        if TEST_FORCE_ASYNC_WORKER.load(Ordering::SeqCst) {
            if let Err(mpsc::SendError(job)) = self.sender.send(job) {
                STATE.push_worker_result(run_worker_job(job));
            }
        } else {
            let result = run_worker_job(job);
            STATE.push_worker_result(result);
        }
    }
}

enum WorkerJob {
    Stamp(StampJob),
}

enum WorkerResult {
    Stamp(StampOutcome),
}

fn run_worker_job(job: WorkerJob) -> WorkerResult {
    match job {
        WorkerJob::Stamp(job) => {
            test_worker_delay();
            WorkerResult::Stamp(job.run())
        }
    }
}

static STATE: GlobalState = GlobalState::new();

#[cfg(test)]
static TEST_FORCE_ASYNC_WORKER: AtomicBool = AtomicBool::new(false);

#[cfg(test)]
static TEST_WORKER_DELAY_MS: AtomicU64 = AtomicU64::new(0);

#[cfg(test)]
fn test_worker_delay() {
    let delay = TEST_WORKER_DELAY_MS.load(Ordering::SeqCst);
    if delay > 0 {
        thread::sleep(Duration::from_millis(delay));
    }
}

#[cfg(not(test))]
fn test_worker_delay() {}

#[derive(Deserialize)]
struct Command {
    action: String,
    path: Option<String>,
    fd: Option<i32>,
    mime: Option<String>,
    name: Option<String>,
    error: Option<String>,
    locale: Option<String>,
    config: Option<SignerConfig>,
}

#[derive(Debug)]
enum Action {
    Init {
        config: Option<SignerConfig>,
        locale: Option<String>,
    },
    Reset,
    Poll,
    PdfSelect {
        fd: Option<i32>,
        path: Option<String>,
        mime: Option<String>,
        name: Option<String>,
        error: Option<String>,
    },
    PdfSign,
    DismissAlert,
    SetLocale {
        locale: String,
    },
}

/// Closes a host-provided descriptor unless it was handed on.
struct FdHandle(Option<i32>);

impl FdHandle {
    fn new(fd: Option<i32>) -> Self {
        Self(fd)
    }

    fn take(&mut self) -> Option<i32> {
        self.0.take()
    }
}

impl Drop for FdHandle {
    fn drop(&mut self) {
        if let Some(fd) = self.0.take() {
            if fd >= 0 {
                unsafe { File::from_raw_fd(fd as RawFd) };
            }
        }
    }
}

fn parse_action(command: Command) -> Result<Action, String> {
    let Command {
        action,
        path,
        fd,
        mime,
        name,
        error,
        locale,
        config,
    } = command;

    match action.as_str() {
        "init" => Ok(Action::Init { config, locale }),
        "reset" => Ok(Action::Reset),
        "poll" => Ok(Action::Poll),
        "pdf_select" => Ok(Action::PdfSelect {
            fd,
            path,
            mime,
            name,
            error,
        }),
        "pdf_sign" => Ok(Action::PdfSign),
        "dismiss_alert" => Ok(Action::DismissAlert),
        "set_locale" => locale
            .map(|locale| Action::SetLocale { locale })
            .ok_or_else(|| "missing_locale".to_string()),
        other => {
            // Descriptor would otherwise leak on an unknown action.
            drop(FdHandle::new(fd));
            Err(error.unwrap_or_else(|| format!("unknown_action:{other}")))
        }
    }
}

/// Entry point for hosts that link the crate directly.
pub fn dispatch_json(input: &str) -> String {
    let response = std::panic::catch_unwind(|| {
        let command: Command =
            serde_json::from_str(input).map_err(|e| format!("invalid_json:{e}"))?;
        handle_command(command)
    });

    let json_value = match response {
        Ok(Ok(value)) => value,
        Ok(Err(err)) => error_ui(&err),
        Err(_) => error_ui("panic"),
    };
    json_value.to_string()
}

#[no_mangle]
pub extern "system" fn Java_aeska_pdfsigner_MainActivity_dispatch(
    mut env: JNIEnv,
    _class: JClass,
    input: JString,
) -> jstring {
    let input_str: String = env
        .get_string(&input)
        .map(|s| s.into())
        .unwrap_or_else(|_| "{}".to_string());

    let output_string = dispatch_json(&input_str);
    match env.new_string(output_string) {
        Ok(java_str) => java_str.into_raw(),
        Err(_) => {
            let fallback = error_ui("jni_new_string_failed").to_string();
            env.new_string(fallback)
                .map(|s| s.into_raw())
                .unwrap_or(ptr::null_mut())
        }
    }
}

fn handle_command(command: Command) -> Result<Value, String> {
    let mut lock_poisoned = false;
    let mut state = match STATE.ui.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            lock_poisoned = true;
            poisoned.into_inner()
        }
    };

    apply_worker_results(&mut state);

    let action = match parse_action(command) {
        Ok(action) => action,
        Err(err) => {
            state.show_error(&SignerError::Host(err));
            return Ok(render_ui(&state));
        }
    };

    match action {
        Action::Init { config, locale } => {
            let config = config.unwrap_or_else(|| state.signer.config().clone());
            logging::init(config.log_level());
            state.signer.configure(config);
            match locale {
                Some(locale) => update_locale(&mut state, &locale),
                None if state.locale.is_empty() => update_locale(&mut state, "en"),
                None => {}
            }
            log::info!("initialised, locale {}", state.locale);
        }
        Action::Reset => state.reset_runtime(),
        Action::Poll => {}
        Action::DismissAlert => state.clear_alert(),
        Action::SetLocale { locale } => update_locale(&mut state, &locale),
        a @ Action::PdfSelect { .. } | a @ Action::PdfSign => {
            handle_pdf_actions(&mut state, a);
        }
    }

    if lock_poisoned && state.alert.is_none() {
        state.show_error(&SignerError::Host("state_poisoned".into()));
    }

    Ok(render_ui(&state))
}

fn handle_pdf_actions(state: &mut AppState, action: Action) {
    match action {
        Action::PdfSelect {
            fd,
            path,
            mime,
            name,
            error,
        } => {
            let mut fd = FdHandle::new(fd);
            if let Some(err) = error {
                state.show_error(&SignerError::Host(err));
                return;
            }
            let name = name.or_else(|| {
                path.as_deref()
                    .and_then(|p| Path::new(p).file_name())
                    .map(|n| n.to_string_lossy().into_owned())
            });
            let result = crate::features::document::ensure_pdf_media_type(mime.as_deref())
                .and_then(|_| read_source(fd.take(), path.as_deref()))
                .and_then(|bytes| {
                    state
                        .signer
                        .select_document(bytes, mime.as_deref(), name.as_deref())
                });
            match result {
                Ok(()) => state.clear_alert(),
                Err(err) => state.show_error(&err),
            }
        }
        Action::PdfSign => match state.signer.begin_stamp() {
            Ok(job) => {
                state.clear_alert();
                state.loading_message = Some(t!("signing_progress").to_string());
                STATE.worker().enqueue(WorkerJob::Stamp(job));
                #[cfg(test)]
                {
                    apply_worker_results(state);
                }
            }
            Err(err) => state.show_error(&err),
        },
        _ => {}
    }
}

fn apply_worker_results(state: &mut AppState) {
    let results = STATE.drain_worker_results();
    if results.is_empty() {
        return;
    }

    for result in results {
        match result {
            WorkerResult::Stamp(outcome) => match state.signer.finish_stamp(outcome) {
                Ok(()) => state.clear_alert(),
                Err(SignerError::Precondition("stale_result")) => {
                    log::debug!("late stamp result dropped");
                }
                Err(err) => state.show_error(&err),
            },
        }
    }

    if !state.signer.is_busy() {
        state.loading_message = None;
    }
}

fn error_ui(message: &str) -> Value {
    json!({
        "type": "Column",
        "padding": 24,
        "children": [
            { "type": "Text", "text": "Error", "size": 18.0 },
            { "type": "Text", "text": message }
        ]
    })
}

fn render_ui(state: &AppState) -> Value {
    render_signer_screen(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::font::StaticFontSource;
    use crate::fixtures;
    use crate::workflow::Stage;
    use serde_json::Value;
    use std::io::Write;
    use std::os::unix::io::IntoRawFd;
    use std::sync::{atomic::Ordering, Arc, Mutex};
    use std::time::{Duration, Instant};
    use tempfile::NamedTempFile;

    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    fn make_command(action: &str) -> Command {
        Command {
            action: action.into(),
            path: None,
            fd: None,
            mime: None,
            name: None,
            error: None,
            locale: None,
            config: None,
        }
    }

    fn reset_state() {
        TEST_FORCE_ASYNC_WORKER.store(false, Ordering::SeqCst);
        TEST_WORKER_DELAY_MS.store(0, Ordering::SeqCst);
        // Let any job still running from a previous test land before resetting.
        thread::sleep(Duration::from_millis(20));
        let mut init = make_command("init");
        init.config = Some(SignerConfig::new());
        init.locale = Some("en".into());
        handle_command(init).expect("init command should succeed");
        handle_command(make_command("reset")).expect("reset command should succeed");
        STATE
            .ui_lock()
            .signer
            .set_font_source(Some(Arc::new(StaticFontSource::new(
                "fixture",
                fixtures::sample_font(),
            ))));
    }

    fn pdf_file(pages: usize) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&fixtures::sample_pdf(pages)).unwrap();
        file.flush().unwrap();
        file
    }

    fn select_command(file: &NamedTempFile) -> Command {
        let mut command = make_command("pdf_select");
        command.path = Some(file.path().to_string_lossy().into_owned());
        command.mime = Some("application/pdf".into());
        command.name = Some("contract.pdf".into());
        command
    }

    fn extract_texts(ui: &Value) -> Vec<String> {
        fn walk(node: &Value, acc: &mut Vec<String>) {
            if let Some(text) = node.get("text").and_then(|t| t.as_str()) {
                acc.push(text.to_string());
            }
            if let Some(children) = node.get("children").and_then(|c| c.as_array()) {
                for child in children {
                    walk(child, acc);
                }
            }
        }

        let mut out = Vec::new();
        walk(ui, &mut out);
        out
    }

    fn assert_contains_text(ui: &Value, needle: &str) {
        let texts = extract_texts(ui);
        assert!(
            texts.iter().any(|t| t.contains(needle)),
            "expected UI to contain text with `{needle}`, found: {texts:?}"
        );
    }

    fn find_nodes<'a>(ui: &'a Value, kind: &str) -> Vec<&'a Value> {
        let mut out = Vec::new();
        if ui.get("type").and_then(|t| t.as_str()) == Some(kind) {
            out.push(ui);
        }
        if let Some(children) = ui.get("children").and_then(|c| c.as_array()) {
            for child in children {
                out.extend(find_nodes(child, kind));
            }
        }
        out
    }

    fn button<'a>(ui: &'a Value, action: &str) -> Option<&'a Value> {
        find_nodes(ui, "Button")
            .into_iter()
            .find(|b| b.get("action").and_then(|a| a.as_str()) == Some(action))
    }

    fn preview_uri(ui: &Value) -> Option<String> {
        find_nodes(ui, "PdfPreview")
            .first()
            .and_then(|p| p.get("source_uri"))
            .and_then(|u| u.as_str())
            .map(str::to_string)
    }

    fn current_step(ui: &Value) -> Option<u64> {
        find_nodes(ui, "Stepper")
            .first()
            .and_then(|s| s.get("current"))
            .and_then(|c| c.as_u64())
    }

    #[test]
    fn init_renders_upload_step() {
        let _guard = TEST_MUTEX.lock().unwrap();
        reset_state();

        let ui = handle_command(make_command("init")).unwrap();
        assert_contains_text(&ui, "PDF Signer");
        assert_contains_text(&ui, "Upload PDF Document");
        assert_contains_text(&ui, "Drag & drop or click to browse");
        assert_eq!(current_step(&ui), Some(0));
        let choose = button(&ui, "pdf_select").expect("file picker button");
        assert_eq!(choose["requires_file_picker"], true);
        assert_eq!(choose["mime_filter"], "application/pdf");
        assert!(find_nodes(&ui, "Alert").is_empty());
    }

    #[test]
    fn select_by_path_moves_to_sign_with_original_preview() {
        let _guard = TEST_MUTEX.lock().unwrap();
        reset_state();

        let file = pdf_file(1);
        let ui = handle_command(select_command(&file)).unwrap();
        assert_eq!(current_step(&ui), Some(1));
        assert_contains_text(&ui, "contract.pdf");
        let uri = preview_uri(&ui).expect("original preview");
        assert!(uri.starts_with("file://"));
        let sign = button(&ui, "pdf_sign").expect("sign button");
        assert_eq!(sign["disabled"], false);
        assert_eq!(STATE.ui_lock().signer.stage(), Stage::Sign);
    }

    #[test]
    fn select_by_fd_uses_path_name_fallback() {
        let _guard = TEST_MUTEX.lock().unwrap();
        reset_state();

        let file = pdf_file(2);
        let fd = File::open(file.path()).unwrap().into_raw_fd();
        let mut command = make_command("pdf_select");
        command.fd = Some(fd);
        command.mime = Some("application/pdf".into());
        command.path = Some("/storage/emulated/0/Download/lease.pdf".into());
        let ui = handle_command(command).unwrap();
        assert_eq!(current_step(&ui), Some(1));
        assert_contains_text(&ui, "lease.pdf");
    }

    #[test]
    fn non_pdf_upload_shows_alert_and_stays_on_upload() {
        let _guard = TEST_MUTEX.lock().unwrap();
        reset_state();

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"plain text").unwrap();
        let mut command = make_command("pdf_select");
        command.path = Some(file.path().to_string_lossy().into_owned());
        command.mime = Some("text/plain".into());
        let ui = handle_command(command).unwrap();

        assert_eq!(current_step(&ui), Some(0));
        let alerts = find_nodes(&ui, "Alert");
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0]["code"], "invalid_input");
        assert_contains_text(&ui, "Please upload a PDF file.");

        let dismissed = handle_command(make_command("dismiss_alert")).unwrap();
        assert!(find_nodes(&dismissed, "Alert").is_empty());
        assert_eq!(STATE.ui_lock().signer.stage(), Stage::Upload);
    }

    #[test]
    fn sign_reaches_complete_with_distinct_signed_preview() {
        let _guard = TEST_MUTEX.lock().unwrap();
        reset_state();

        let file = pdf_file(1);
        let selected = handle_command(select_command(&file)).unwrap();
        let original = preview_uri(&selected).unwrap();

        let ui = handle_command(make_command("pdf_sign")).unwrap();
        assert_eq!(current_step(&ui), Some(2));
        let signed = preview_uri(&ui).expect("signed preview");
        assert_ne!(signed, original);
        assert!(button(&ui, "pdf_sign").is_none());
        assert!(find_nodes(&ui, "Alert").is_empty());

        let state = STATE.ui_lock();
        assert_eq!(state.signer.stage(), Stage::Complete);
        assert!(!state.signer.is_busy());
        assert!(state.loading_message.is_none());
    }

    #[test]
    fn sign_without_document_is_rejected() {
        let _guard = TEST_MUTEX.lock().unwrap();
        reset_state();

        let ui = handle_command(make_command("pdf_sign")).unwrap();
        assert_eq!(current_step(&ui), Some(0));
        assert_contains_text(&ui, "Please upload a PDF file first.");
        assert_eq!(find_nodes(&ui, "Alert")[0]["code"], "precondition_failed");
    }

    #[test]
    fn missing_font_keeps_sign_step_and_reports_failure() {
        let _guard = TEST_MUTEX.lock().unwrap();
        reset_state();

        let mut init = make_command("init");
        init.config = Some(SignerConfig {
            font_path: Some("/definitely/not/here/OpenSans-Regular.ttf".into()),
            ..SignerConfig::new()
        });
        handle_command(init).unwrap();
        STATE.ui_lock().signer.set_font_source(None);

        let file = pdf_file(1);
        handle_command(select_command(&file)).unwrap();
        let ui = handle_command(make_command("pdf_sign")).unwrap();

        assert_eq!(current_step(&ui), Some(1));
        assert_contains_text(&ui, "Failed to sign PDF");
        assert_eq!(find_nodes(&ui, "Alert")[0]["code"], "font_resource_failed");
        let sign = button(&ui, "pdf_sign").expect("sign button stays available");
        assert_eq!(sign["disabled"], false);
        assert!(!STATE.ui_lock().signer.is_busy());
    }

    #[test]
    fn stamp_runs_on_worker_and_releases_mutex() {
        let _guard = TEST_MUTEX.lock().unwrap();
        reset_state();

        let file = pdf_file(1);
        handle_command(select_command(&file)).unwrap();

        TEST_FORCE_ASYNC_WORKER.store(true, Ordering::SeqCst);
        TEST_WORKER_DELAY_MS.store(200, Ordering::SeqCst);

        let start = Instant::now();
        let ui = handle_command(make_command("pdf_sign")).unwrap();
        assert!(
            start.elapsed() < Duration::from_millis(150),
            "dispatch held the UI mutex for too long"
        );
        assert_eq!(current_step(&ui), Some(1));
        assert_contains_text(&ui, "Signing PDF...");
        assert_eq!(button(&ui, "pdf_sign").unwrap()["disabled"], true);
        assert!(!find_nodes(&ui, "Progress").is_empty());
        assert!(
            STATE.ui_try_lock().is_some(),
            "state mutex should be free while worker runs"
        );

        let again = handle_command(make_command("pdf_sign")).unwrap();
        assert_contains_text(&again, "Signing is already in progress.");

        thread::sleep(Duration::from_millis(400));
        let refreshed = handle_command(make_command("poll")).unwrap();
        assert_eq!(current_step(&refreshed), Some(2));
        assert!(find_nodes(&refreshed, "Alert").is_empty());
        assert!(find_nodes(&refreshed, "Progress").is_empty());

        TEST_FORCE_ASYNC_WORKER.store(false, Ordering::SeqCst);
        TEST_WORKER_DELAY_MS.store(0, Ordering::SeqCst);
    }

    #[test]
    fn reset_during_stamp_discards_late_result() {
        let _guard = TEST_MUTEX.lock().unwrap();
        reset_state();

        let file = pdf_file(1);
        handle_command(select_command(&file)).unwrap();

        TEST_FORCE_ASYNC_WORKER.store(true, Ordering::SeqCst);
        TEST_WORKER_DELAY_MS.store(150, Ordering::SeqCst);
        handle_command(make_command("pdf_sign")).unwrap();
        let ui = handle_command(make_command("reset")).unwrap();
        assert_eq!(current_step(&ui), Some(0));

        thread::sleep(Duration::from_millis(350));
        let refreshed = handle_command(make_command("poll")).unwrap();
        assert_eq!(current_step(&refreshed), Some(0));
        assert!(find_nodes(&refreshed, "Alert").is_empty());
        let state = STATE.ui_lock();
        assert_eq!(state.signer.previews().live_count(), 0);
        drop(state);

        TEST_FORCE_ASYNC_WORKER.store(false, Ordering::SeqCst);
        TEST_WORKER_DELAY_MS.store(0, Ordering::SeqCst);
    }

    #[test]
    fn picker_error_is_surfaced() {
        let _guard = TEST_MUTEX.lock().unwrap();
        reset_state();

        let mut command = make_command("pdf_select");
        command.error = Some("picker_cancelled".into());
        let ui = handle_command(command).unwrap();
        assert_eq!(find_nodes(&ui, "Alert")[0]["code"], "host_input_failed");
        assert_eq!(current_step(&ui), Some(0));
    }

    #[test]
    fn unknown_action_renders_alert_on_current_screen() {
        let _guard = TEST_MUTEX.lock().unwrap();
        reset_state();

        let ui = handle_command(make_command("teleport")).unwrap();
        assert_eq!(current_step(&ui), Some(0));
        let state = STATE.ui_lock();
        let alert = state.alert.as_ref().unwrap();
        assert_eq!(alert.code, "host_input_failed");
        assert!(alert.detail.contains("unknown_action:teleport"));
    }

    #[test]
    fn dispatch_json_handles_commands_and_malformed_input() {
        let _guard = TEST_MUTEX.lock().unwrap();
        reset_state();

        let ok: Value = serde_json::from_str(&dispatch_json(r#"{"action":"poll"}"#)).unwrap();
        assert_contains_text(&ok, "PDF Signer");

        let bad: Value = serde_json::from_str(&dispatch_json("{not json")).unwrap();
        assert_contains_text(&bad, "Error");
        assert_contains_text(&bad, "invalid_json");
    }

    #[test]
    fn locale_switch_translates_screen() {
        let _guard = TEST_MUTEX.lock().unwrap();
        reset_state();

        let mut command = make_command("set_locale");
        command.locale = Some("is-IS".into());
        let ui = handle_command(command).unwrap();
        assert_contains_text(&ui, "Hlaða upp PDF skjali");
        assert_eq!(STATE.ui_lock().locale, "is");

        let mut back = make_command("set_locale");
        back.locale = Some("en".into());
        let ui = handle_command(back).unwrap();
        assert_contains_text(&ui, "Upload PDF Document");
    }

    #[test]
    fn reupload_after_complete_starts_over() {
        let _guard = TEST_MUTEX.lock().unwrap();
        reset_state();

        let first = pdf_file(1);
        handle_command(select_command(&first)).unwrap();
        let done = handle_command(make_command("pdf_sign")).unwrap();
        assert!(button(&done, "pdf_select").is_some());

        let second = pdf_file(3);
        let ui = handle_command(select_command(&second)).unwrap();
        assert_eq!(current_step(&ui), Some(1));
        assert_eq!(STATE.ui_lock().signer.previews().live_count(), 1);
    }
}

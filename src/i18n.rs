use crate::state::AppState;

pub fn update_locale(state: &mut AppState, locale_str: &str) {
    let normalized = normalize_locale(locale_str);
    state.locale = normalized.to_string();
    rust_i18n::set_locale(normalized);
}

fn normalize_locale(locale_str: &str) -> &'static str {
    let trimmed = locale_str.trim();
    if trimmed.is_empty() {
        return "en";
    }

    // Compiled locales are keyed by bare language ("en", "is"); reduce BCP-47 tags.
    let lower = trimmed.to_ascii_lowercase().replace('_', "-");
    match lower.split('-').next().unwrap_or("en") {
        "is" => "is",
        _ => "en",
    }
}

//! Editor bounds and fallback screen validation.

use crate::schema::GitClockConfig;

use super::helpers::{validate_range, validate_range_f64};

pub(crate) fn validate_editor(errors: &mut Vec<String>, config: &GitClockConfig) {
    let editor = &config.editor;
    validate_range_f64(errors, "editor.min_scale", editor.min_scale, 0.1, 1.0);
    validate_range_f64(errors, "editor.max_scale", editor.max_scale, 1.0, 10.0);
    validate_range(
        errors,
        "editor.poll_interval_ms",
        editor.poll_interval_ms,
        100,
        60_000,
    );
}

pub(crate) fn validate_screen(errors: &mut Vec<String>, config: &GitClockConfig) {
    validate_range(errors, "screen.width", u64::from(config.screen.width), 1, 16_384);
    validate_range(errors, "screen.height", u64::from(config.screen.height), 1, 16_384);
}

pub mod document;
pub mod font;
pub mod pdf;
pub mod stamp;

use crate::ui::{Stepper as UiStepper, StepperStep};
use crate::workflow::Stage;
use rust_i18n::t;
use serde_json::Value;

const STEP_ACTIVE: &str = "#0cbfd4";
const STEP_INACTIVE: &str = "#e7ecf2";
const STEP_COMPLETE: &str = "#22c55e";

fn step_appearance(step: usize, current: usize) -> (&'static str, &'static str) {
    if step < current {
        ("complete", STEP_COMPLETE)
    } else if step == current {
        ("active", STEP_ACTIVE)
    } else {
        ("inactive", STEP_INACTIVE)
    }
}

/// Upload / Sign / Complete indicator. Steps before the current one are done.
pub fn render_stepper(stage: Stage) -> Value {
    let labels = [t!("step_upload"), t!("step_sign"), t!("step_complete")];
    let description = t!("stepper_description");
    let current = stage.index();
    let steps = labels
        .iter()
        .enumerate()
        .map(|(idx, label)| {
            let (state, color) = step_appearance(idx, current);
            StepperStep {
                label: &**label,
                state,
                color,
            }
        })
        .collect();
    serde_json::to_value(UiStepper::new(steps, current).content_description(&description))
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_colors_follow_position() {
        assert_eq!(step_appearance(0, 1), ("complete", STEP_COMPLETE));
        assert_eq!(step_appearance(1, 1), ("active", STEP_ACTIVE));
        assert_eq!(step_appearance(2, 1), ("inactive", STEP_INACTIVE));
    }

    #[test]
    fn stepper_marks_current_stage() {
        let val = render_stepper(Stage::Sign);
        assert_eq!(val.get("current").and_then(|v| v.as_u64()), Some(1));
        let states: Vec<&str> = val["steps"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|s| s.get("state").and_then(|v| v.as_str()))
            .collect();
        assert_eq!(states, vec!["complete", "active", "inactive"]);

        let done = render_stepper(Stage::Complete);
        let colors: Vec<&str> = done["steps"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|s| s["color"].as_str())
            .collect();
        assert_eq!(colors, vec![STEP_COMPLETE, STEP_COMPLETE, STEP_ACTIVE]);
    }
}

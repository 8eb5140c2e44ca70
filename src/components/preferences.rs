use leptos::prelude::*;
use leptos::task::spawn_local;
use crate::analysis::{perform_analysis, PROGRESS_BAR_ID};
use crate::components::lock_toggle::LockToggle;
use crate::state::AppState;

const INPUT_LOCKED_BG: &str = "background-color: rgb(100, 100, 100)";
const INPUT_UNLOCKED_BG: &str = "background-color: rgb(50, 50, 50)";

#[component]
pub fn Preferences() -> impl IntoView {
    let state = expect_context::<AppState>();
    let lock = state.lock;

    let inputs_disabled = move || lock.get().inputs_disabled();
    let input_style = move || if inputs_disabled() { INPUT_LOCKED_BG } else { INPUT_UNLOCKED_BG };
    let button_disabled = move || !lock.get().analysis_enabled() || state.analysis_running.get();

    let on_analyze = move |_: web_sys::MouseEvent| {
        spawn_local(perform_analysis(state));
    };

    view! {
        <div class="preferences">
            <div class="preferences-header">
                <span>"Preferences"</span>
                <LockToggle />
            </div>
            <label>
                "BB size (mm)"
                <input
                    id="BB_size"
                    type="number"
                    prop:value=move || state.bb_size.get()
                    prop:disabled=inputs_disabled
                    style=input_style
                    on:input=move |ev| state.bb_size.set(event_target_value(&ev))
                />
            </label>
            <label>
                "Low density BB"
                <select
                    id="lowdensity"
                    prop:disabled=inputs_disabled
                    style=input_style
                    on:change=move |ev| state.low_density.set(event_target_value(&ev) == "true")
                >
                    <option value="false" prop:selected=move || !state.low_density.get()>"No"</option>
                    <option value="true" prop:selected=move || state.low_density.get()>"Yes"</option>
                </select>
            </label>
            <label>
                "Tolerance (mm)"
                <input
                    id="tolerance"
                    type="number"
                    prop:value=move || state.tolerance.get()
                    prop:disabled=inputs_disabled
                    style=input_style
                    on:input=move |ev| state.tolerance.set(event_target_value(&ev))
                />
            </label>
            <button
                id="perform-analysis-button"
                prop:disabled=button_disabled
                style=move || if button_disabled() { "background-color: grey" } else { "" }
                on:click=on_analyze
            >
                {move || if state.analysis_running.get() { "Analyzing..." } else { "Perform Analysis" }}
            </button>
            <div class="progress-bar-container">
                <div
                    id=PROGRESS_BAR_ID
                    class=move || if state.progress_animated.get() { "progress-bar" } else { "progress-bar no-transition" }
                    style=move || format!("width: {}%", state.analysis_progress.get())
                ></div>
            </div>
        </div>
    }
}

use leptos::prelude::*;
use crate::state::AppState;

#[component]
pub fn LockToggle() -> impl IntoView {
    let state = expect_context::<AppState>();
    let lock = state.lock;

    let on_toggle = move |_: web_sys::MouseEvent| {
        lock.update(|l| *l = l.toggled());
        log::debug!("Preferences {:?}", lock.get_untracked());
    };

    view! {
        <button
            id="lock-button"
            class=move || format!("lock-button {}", lock.get().css_class())
            title=move || if lock.get().is_locked() { "Unlock to edit preferences" } else { "Lock preferences" }
            on:click=on_toggle
        >
            <span id="lock-icon">{move || lock.get().icon()}</span>
        </button>
    }
}

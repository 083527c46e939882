use dioxus::prelude::*;

use crate::context::AppContext;

#[component]
pub fn SettingsView() -> Element {
    let ctx = use_context::<AppContext>();
    let bounds = ctx.quiz_loop().bounds();

    rsx! {
        div { class: "page settings-page",
            h2 { "Settings" }
            p { "Per-question time budget:" }
            ul {
                li { "Minimum: {bounds.min()}s" }
                li { "Starting: {bounds.start()}s" }
                li { "Maximum: {bounds.max()}s" }
            }
            p { "Budgets are fixed per session and adapt between questions." }
        }
    }
}

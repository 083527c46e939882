use dioxus::prelude::*;

#[component]
pub fn DashboardView() -> Element {
    rsx! {
        div { class: "page dashboard-page",
            h2 { "Dashboard" }
            p { "Finished quizzes are saved here as correct / wrong / timed-out counts." }
        }
    }
}

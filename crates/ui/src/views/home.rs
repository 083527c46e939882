use dioxus::prelude::*;

use crate::context::AppContext;
use crate::guard::GuardLink;
use crate::routes::Route;

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let filter = ctx.default_filter();

    rsx! {
        div { class: "page home-page",
            h2 { "Welcome back" }
            p {
                "Practicing {filter.source()} → {filter.target()}."
            }
            p { "Ready for a round? The timer adapts to how you answer." }
            GuardLink { to: Route::Quiz {}, "Start a quiz" }
        }
    }
}

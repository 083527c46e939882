use dioxus::prelude::*;
use dioxus_router::Router;

use crate::guard::provide_navigation_context;
use crate::routes::Route;

#[component]
pub fn App() -> Element {
    // Shared quiz/guard state sits above the router so every view and every
    // navigable control observes the same instance.
    provide_navigation_context();

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        // Stable OS/window title. Per-route headings render inside the pane.
        document::Title { "Phrases" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}

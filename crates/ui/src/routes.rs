use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable};

use crate::guard::{GuardLink, use_navigation_authority};
use crate::views::{DashboardView, HomeView, QuizView, SettingsView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/quiz", QuizView)] Quiz {},
        #[route("/dashboard", DashboardView)] Dashboard {},
        #[route("/settings", SettingsView)] Settings {},
}

#[component]
fn Layout() -> Element {
    let mut authority = use_navigation_authority();

    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                header { class: "content__bar",
                    button {
                        class: "content__back",
                        r#type: "button",
                        onclick: move |_| authority.back(),
                        "Back"
                    }
                }
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "Phrases" }
            ul {
                li { GuardLink { to: Route::Home {}, "Home" } }
                li { GuardLink { to: Route::Quiz {}, "Quiz" } }
                li { GuardLink { to: Route::Dashboard {}, "Dashboard" } }
                li { GuardLink { to: Route::Settings {}, "Settings" } }
            }
        }
    }
}

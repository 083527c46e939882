mod dashboard;
mod home;
mod quiz;
mod settings;
mod state;

pub use dashboard::DashboardView;
pub use home::HomeView;
pub use quiz::QuizView;
pub use settings::SettingsView;
pub use state::{ViewError, ViewState, view_state_from_resource};

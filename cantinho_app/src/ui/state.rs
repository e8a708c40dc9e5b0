//! State shared by every screen: the backend services and the navigation
//! shell (session, navigator, toasts).

use cantinho_client::{ApiClient, ApiError, Config, Navigator, Route, Session};
use tokio::runtime::Runtime;

use super::components::Toasts;

/// Long-lived collaborators injected into the screens
pub struct Services {
    pub api: ApiClient,
    pub runtime: Runtime,
    pub config: Config,
}

pub struct Shell {
    pub session: Session,
    pub navigator: Navigator,
    pub toasts: Toasts,
}

impl Shell {
    pub fn new(session: Session) -> Self {
        let navigator = Navigator::new(session.is_signed_in());
        Self {
            session,
            navigator,
            toasts: Toasts::default(),
        }
    }

    pub fn push(&mut self, route: Route) {
        self.navigator.push(route);
    }

    /// Logs a failed request and shows `message`. A rejected token tears the
    /// session down instead.
    pub fn report_error(&mut self, message: &str, error: &ApiError) {
        log::error!("{}: {}", message, error);
        if matches!(error, ApiError::Unauthorized) {
            if self.session.sync_with_storage() {
                self.toasts.error("Sessão expirada, entre novamente.");
            }
            return;
        }
        self.toasts.error(message);
    }

    /// Switches between the auth stack and the tab layout when the session
    /// changed. Called once per frame.
    pub fn sync_layout(&mut self) {
        self.navigator.sync_layout(self.session.is_signed_in());
    }
}

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::action::{Action, Effect};
use crate::fetch::FetchRequest;
use crate::source::ProfileSource;

/// Carries out effects requested by the app. Results come back as actions.
#[derive(Debug, Clone)]
pub struct Runtime {
    source: Arc<dyn ProfileSource>,
    action_tx: mpsc::UnboundedSender<Action>,
    browser: Option<String>,
}

impl Runtime {
    pub fn new(
        source: Arc<dyn ProfileSource>,
        action_tx: mpsc::UnboundedSender<Action>,
        browser: Option<String>,
    ) -> Self {
        Self {
            source,
            action_tx,
            browser,
        }
    }

    pub fn execute(&self, effect: Effect) {
        match effect {
            Effect::Fetch(request) => self.spawn_fetch(request),
            Effect::OpenUrl(url) => self.spawn_open(url),
        }
    }

    fn spawn_fetch(&self, request: FetchRequest) {
        let source = Arc::clone(&self.source);
        let tx = self.action_tx.clone();

        tokio::spawn(async move {
            let action = fetch_action(source.as_ref(), request).await;
            // The loop may already be gone on quit.
            tx.send(action).ok();
        });
    }

    fn spawn_open(&self, url: String) {
        let browser = self.browser.clone();

        tokio::task::spawn_blocking(move || {
            let result = match &browser {
                Some(app) => open::with(&url, app),
                None => open::that(&url),
            };
            if let Err(e) = result {
                debug!(url = %url, error = %e, "could not open browser");
            }
        });
    }
}

/// Runs one repository fetch and wraps the outcome as a completion action.
pub async fn fetch_action(source: &dyn ProfileSource, request: FetchRequest) -> Action {
    let FetchRequest {
        kind,
        login,
        generation,
    } = request;

    let result = match source.fetch_repositories(&login, kind).await {
        Ok(repos) => Ok(kind.normalize(repos)),
        Err(e) => {
            warn!(source = source.name(), %kind, error = %e, "fetch failed");
            Err(e.to_string())
        }
    };

    Action::ReposLoaded {
        kind,
        generation,
        result,
    }
}

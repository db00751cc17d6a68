use std::{sync::Arc, time::Duration};

use shared::protocol::ClientRequest;
use tokio::{sync::broadcast, task::JoinHandle};
use tracing::{debug, info, warn};

use crate::{
    error::Result,
    forms::{extract_request, FormSubmission},
    poller::{Poller, PollerHandle},
    render::render_todo_list,
    transport::TodoApi,
    view::ListContainer,
    ClientEvent,
};

/// Wires the todo server to the list container and the three forms.
///
/// Every failure is logged and published as a [`ClientEvent`]; none of them
/// reaches the rendered list or stops polling.
pub struct UiController {
    api: Arc<dyn TodoApi>,
    list: ListContainer,
    poller: Poller,
    events: broadcast::Sender<ClientEvent>,
}

impl UiController {
    pub fn new(api: Arc<dyn TodoApi>, poll_interval: Duration) -> Arc<Self> {
        Self::with_list(api, poll_interval, ListContainer::new())
    }

    pub fn with_list(
        api: Arc<dyn TodoApi>,
        poll_interval: Duration,
        list: ListContainer,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(256);
        Arc::new(Self {
            api,
            list,
            poller: Poller::new(poll_interval),
            events,
        })
    }

    pub fn list(&self) -> &ListContainer {
        &self.list
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }

    pub fn start_polling(self: &Arc<Self>) -> PollerHandle {
        info!(
            interval_ms = self.poller.period().as_millis() as u64,
            "poll: starting todo refresh"
        );
        let controller = Arc::clone(self);
        self.poller.start(move || {
            let controller = Arc::clone(&controller);
            async move { controller.refresh().await }
        })
    }

    /// One tick: fetch, render, replace. Errors are swallowed after logging.
    pub async fn refresh(&self) {
        if let Err(err) = self.try_refresh().await {
            warn!("poll: todo refresh failed: {err}");
            let _ = self.events.send(ClientEvent::RefreshFailed {
                reason: err.to_string(),
            });
        }
    }

    pub async fn try_refresh(&self) -> Result<usize> {
        let todos = self.api.list_todos().await?;
        let count = todos.len();
        let changed = self.list.replace(render_todo_list(&todos));
        debug!(count, changed, "poll: rendered todo list");
        let _ = self.events.send(ClientEvent::ListRendered { count });
        Ok(count)
    }

    /// Handles a form submission without waiting for the server.
    ///
    /// Returns the spawned request task, or `None` when the form could not be
    /// turned into a request.
    pub fn submit(self: &Arc<Self>, submission: FormSubmission) -> Option<JoinHandle<()>> {
        let request = match extract_request(&submission) {
            Ok(request) => request,
            Err(err) => {
                warn!(form = %submission.form, "form: submission rejected: {err}");
                let _ = self.events.send(ClientEvent::FormRejected {
                    form: submission.form,
                    reason: err.to_string(),
                });
                return None;
            }
        };

        let controller = Arc::clone(self);
        Some(tokio::spawn(async move {
            controller.dispatch(request).await;
        }))
    }

    pub async fn dispatch(&self, request: ClientRequest) {
        let path = request.path();
        let method = request.method().as_str();
        match self.api.send(&request).await {
            Ok(()) => {
                debug!(method, path = %path, "form: request accepted");
                let _ = self.events.send(ClientEvent::MutationSent { request });
            }
            Err(err) => {
                warn!(method, path = %path, "form: request failed: {err}");
                let _ = self.events.send(ClientEvent::MutationFailed {
                    request,
                    reason: err.to_string(),
                });
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;

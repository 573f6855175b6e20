//! Fetch-on-mount lifecycle of a forecast view.
//!
//! A view starts in [`ViewState::Loading`], issues exactly one read through its
//! [`ForecastSource`] and settles once into `Ready` or `Error`. Dropping the
//! view (unmount) does not cancel the read; a result that arrives afterwards
//! is discarded.

use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, info, warn};

use crate::{error::FetchError, payload::Payload, source::ForecastSource};

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Ready(T),
    Error,
}

impl<T> ViewState<T> {
    /// Collapse a fetch outcome into the user-facing state.
    pub fn from_outcome(outcome: Result<T, FetchError>) -> Self {
        match outcome {
            Ok(data) => ViewState::Ready(data),
            Err(err) => {
                warn!(kind = err.kind(), error = %err, "forecast unavailable");
                ViewState::Error
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ViewState::Ready(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ViewState::Error)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(data) => Some(data),
            _ => None,
        }
    }
}

/// A mounted forecast view.
#[derive(Debug)]
pub struct ForecastView<T> {
    state: watch::Receiver<ViewState<T>>,
    fetch: JoinHandle<bool>,
}

impl<T: Payload> ForecastView<T> {
    /// Mount a view and start its single fetch. Must be called inside a tokio runtime.
    pub fn mount(source: Box<dyn ForecastSource>) -> Self {
        let (tx, rx) = watch::channel(ViewState::Loading);

        let fetch = tokio::spawn(async move {
            let outcome = match source.fetch().await {
                Ok(body) => T::parse(&body),
                Err(err) => Err(err),
            };
            settle(&tx, outcome)
        });

        Self { state: rx, fetch }
    }
}

impl<T> ForecastView<T> {
    /// Current state without waiting.
    pub fn state(&self) -> ViewState<T>
    where
        T: Clone,
    {
        (*self.state.borrow()).clone()
    }

    /// Wait until the view leaves `Loading`.
    ///
    /// If the fetch task dies without settling, the view reports `Error`.
    pub async fn settled(&mut self) -> ViewState<T>
    where
        T: Clone,
    {
        match self.state.wait_for(|s| !s.is_loading()).await {
            Ok(state) => (*state).clone(),
            Err(_) => {
                warn!(kind = FetchError::Aborted.kind(), "{}", FetchError::Aborted);
                ViewState::Error
            }
        }
    }

    /// Tear the view down.
    ///
    /// The in-flight fetch keeps running; the returned handle resolves to
    /// whether its result was applied. A result that lands after unmount is
    /// discarded and resolves to `false`.
    pub fn unmount(self) -> JoinHandle<bool> {
        let Self { state, fetch } = self;
        drop(state);
        fetch
    }
}

/// Apply the fetch outcome exactly once, and only while the view is mounted.
fn settle<T>(tx: &watch::Sender<ViewState<T>>, outcome: Result<T, FetchError>) -> bool {
    tx.send_if_modified(|state| {
        if tx.is_closed() {
            debug!("view unmounted before the forecast arrived, discarding result");
            return false;
        }
        if !state.is_loading() {
            return false;
        }
        *state = ViewState::from_outcome(outcome);
        if state.is_ready() {
            info!("forecast ready");
        }
        true
    })
}

//! Pagination coordinator
//!
//! Main driver loop and the public [`Pager`] handle.
//!
//! # Overview
//!
//! A `Pager` owns one spawned driver task. The task is the single serialized
//! execution context for all pagination state: it selects over the command
//! channel (new queries and "load more" events) and the in-flight fetch, so
//! cursor updates, accumulation, and the loading flag can never race.
//!
//! Cancellation is structural: the in-flight fetch is a future owned by the
//! driver, and starting a new session drops it. A dropped fetch cannot
//! complete, so a superseded session can never emit a late value or loading
//! update.
//!
//! ```ignore
//! let pager = Pager::builder(source)
//!     .config(PagerConfig::new().with_clear_on_new_request(true))
//!     .concater(accumulate::dedup_concat)
//!     .spawn();
//!
//! let mut values = pager.values();
//! pager.query(params)?;
//! values.changed().await?;      // first page arrived
//! pager.load_more()?;           // fetch the next page via the stored cursor
//! ```

use crate::accumulate::{self, Concater};
use crate::config::PagerConfig;
use crate::error::{Error, Result};
use crate::session::{PageOutcome, Session};
use crate::source::{FetchRequest, Page, PageSource};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Input events delivered to the driver task
enum Command<P> {
    /// Start a new session with first-page params
    Query(P),
    /// Fetch the next page using the stored cursor, if any
    LoadMore,
}

type FetchResult<S> =
    std::result::Result<Page<<S as PageSource>::Cursor, <S as PageSource>::Value>, <S as PageSource>::Error>;

/// Handle to a running pagination coordinator.
///
/// Inputs go in through [`query`](Self::query) and
/// [`load_more`](Self::load_more); outputs come out as two watch streams,
/// the cumulative value list and the loading flag. Dropping the handle
/// aborts the driver task.
pub struct Pager<S: PageSource> {
    commands: mpsc::UnboundedSender<Command<S::Params>>,
    values: watch::Receiver<Vec<S::Value>>,
    loading: watch::Receiver<bool>,
    driver: JoinHandle<()>,
}

impl<S: PageSource> Pager<S> {
    /// Spawn a pager with default configuration.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(source: S) -> Self {
        Self::builder(source).spawn()
    }

    /// Start building a pager
    pub fn builder(source: S) -> PagerBuilder<S> {
        PagerBuilder::new(source)
    }

    /// Start a new session for `params`.
    ///
    /// Supersedes the previous session: any outstanding fetch is cancelled
    /// and its late completion discarded.
    pub fn query(&self, params: S::Params) -> Result<()> {
        self.commands
            .send(Command::Query(params))
            .map_err(|_| Error::Closed)
    }

    /// Request the next page of the current session.
    ///
    /// A no-op when no cursor has been observed yet, when a fetch is already
    /// outstanding, or when the session is exhausted.
    pub fn load_more(&self) -> Result<()> {
        self.commands
            .send(Command::LoadMore)
            .map_err(|_| Error::Closed)
    }

    /// Subscribe to the cumulative value list.
    ///
    /// Emits after each successful page; never emits the same list content
    /// twice in a row.
    pub fn values(&self) -> watch::Receiver<Vec<S::Value>> {
        self.values.clone()
    }

    /// Subscribe to the loading flag.
    ///
    /// True exactly while a fetch (including its pre-request delay) is
    /// outstanding, regardless of outcome.
    pub fn loading(&self) -> watch::Receiver<bool> {
        self.loading.clone()
    }
}

impl<S: PageSource> Drop for Pager<S> {
    fn drop(&mut self) {
        self.driver.abort();
    }
}

/// Builder for [`Pager`]
pub struct PagerBuilder<S: PageSource> {
    source: S,
    config: PagerConfig,
    concater: Arc<Concater<S::Value>>,
}

impl<S: PageSource> PagerBuilder<S> {
    fn new(source: S) -> Self {
        let concater: Arc<Concater<S::Value>> = Arc::new(accumulate::concat::<S::Value>);
        Self {
            source,
            config: PagerConfig::default(),
            concater,
        }
    }

    /// Set the pager configuration
    #[must_use]
    pub fn config(mut self, config: PagerConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the default concatenation merge function
    #[must_use]
    pub fn concater<F>(mut self, concater: F) -> Self
    where
        F: Fn(Vec<S::Value>, Vec<S::Value>) -> Vec<S::Value> + Send + Sync + 'static,
    {
        self.concater = Arc::new(concater);
        self
    }

    /// Spawn the driver task and return the handle.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(self) -> Pager<S> {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (values_tx, values_rx) = watch::channel(Vec::new());
        let (loading_tx, loading_rx) = watch::channel(false);

        let driver = Driver {
            source: Arc::new(self.source),
            config: self.config,
            concater: self.concater,
            commands: commands_rx,
            values: values_tx,
            loading: loading_tx,
            session: Session::new(),
            in_flight: None,
        };

        Pager {
            commands: commands_tx,
            values: values_rx,
            loading: loading_rx,
            driver: tokio::spawn(driver.run()),
        }
    }
}

/// The driver task: owns all pagination state for the active session.
struct Driver<S: PageSource> {
    source: Arc<S>,
    config: PagerConfig,
    concater: Arc<Concater<S::Value>>,
    commands: mpsc::UnboundedReceiver<Command<S::Params>>,
    values: watch::Sender<Vec<S::Value>>,
    loading: watch::Sender<bool>,
    session: Session<S::Cursor, S::Value>,
    in_flight: Option<BoxFuture<'static, FetchResult<S>>>,
}

enum Event<P, T> {
    Command(Option<Command<P>>),
    Settled(T),
}

impl<S: PageSource> Driver<S> {
    async fn run(mut self) {
        loop {
            let fetching = self.in_flight.is_some();
            let event = {
                let commands = &mut self.commands;
                let in_flight = &mut self.in_flight;
                tokio::select! {
                    // Commands first: a query arriving alongside a completed
                    // fetch must supersede it, not observe it.
                    biased;
                    command = commands.recv() => Event::Command(command),
                    outcome = async {
                        match in_flight.as_mut() {
                            Some(fetch) => fetch.await,
                            None => std::future::pending().await,
                        }
                    }, if fetching => Event::Settled(outcome),
                }
            };

            match event {
                Event::Command(Some(Command::Query(params))) => self.on_query(params),
                Event::Command(Some(Command::LoadMore)) => self.on_load_more(),
                Event::Command(None) => break,
                Event::Settled(outcome) => self.on_settled(outcome),
            }
        }
    }

    /// Begin a new session, superseding the previous one.
    fn on_query(&mut self, params: S::Params) {
        if self.in_flight.take().is_some() {
            debug!("superseding in-flight fetch");
        }
        self.session = Session::new();
        if self.config.clear_on_new_request {
            self.publish_values(Vec::new());
        }
        self.start_fetch(FetchRequest::First(params));
    }

    /// Sample the stored cursor and turn it into a next-page fetch.
    fn on_load_more(&mut self) {
        if self.in_flight.is_some() {
            debug!("load more ignored: fetch already in flight");
            return;
        }
        if !self.session.can_load_more() {
            debug!("load more ignored: no usable cursor");
            return;
        }
        if let Some(cursor) = self.session.cursor().cloned() {
            self.start_fetch(FetchRequest::Next(cursor));
        }
    }

    /// Issue a fetch and flip the loading flag on.
    fn start_fetch(&mut self, request: FetchRequest<S::Params, S::Cursor>) {
        let source = Arc::clone(&self.source);
        let delay = self.config.fetch_delay;
        self.in_flight = Some(
            async move {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                let envelope = match request {
                    FetchRequest::First(params) => source.fetch_first(params).await?,
                    FetchRequest::Next(cursor) => source.fetch_next(cursor).await?,
                };
                Ok(source.extract(&envelope))
            }
            .boxed(),
        );
        self.set_loading(true);
    }

    /// Apply a completed fetch and flip the loading flag off.
    ///
    /// Failures are absorbed here: the cumulative list is left unchanged and
    /// the error is only logged.
    fn on_settled(&mut self, outcome: FetchResult<S>) {
        self.in_flight = None;
        match outcome {
            Ok(page) => {
                debug!(values = page.values.len(), "page fetch completed");
                if self.session.apply_page(page, self.concater.as_ref())
                    == PageOutcome::Exhausted
                {
                    debug!("empty page: session exhausted");
                }
                // Publish even when exhausted: an empty first page must still
                // replace a previous session's visible list. The equality
                // check suppresses the unchanged cases.
                let snapshot = self.session.values().to_vec();
                self.publish_values(snapshot);
            }
            Err(error) => {
                warn!(%error, "page fetch failed");
            }
        }
        self.set_loading(false);
    }

    /// Emit the cumulative list, skipping emissions equal to the last one.
    fn publish_values(&self, next: Vec<S::Value>) {
        self.values.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }

    fn set_loading(&self, on: bool) {
        self.loading.send_if_modified(|current| {
            if *current == on {
                false
            } else {
                *current = on;
                true
            }
        });
    }
}

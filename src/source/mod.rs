//! Page source abstraction
//!
//! The boundary between the coordinator and whatever actually talks to the
//! remote API. A source knows how to issue a first-page request from caller
//! params, issue a next-page request from a cursor, and extract the value
//! list and continuation cursor out of a raw response envelope.
//!
//! # Overview
//!
//! - [`PageSource`] - the trait a concrete client implements
//! - [`FnSource`] - builds a source from four closures
//! - [`Page`] - the extracted form of one envelope
//! - [`FetchRequest`] - a request descriptor (params or cursor)

use async_trait::async_trait;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::future::Future;

/// One extracted page: the value list plus the cursor for the next page.
///
/// `cursor` is `None` when the envelope carries no continuation token,
/// i.e. this page is terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<C, V> {
    /// Values extracted from the envelope
    pub values: Vec<V>,
    /// Cursor for the next page, if any
    pub cursor: Option<C>,
}

impl<C, V> Page<C, V> {
    /// Create a page with values and a continuation cursor
    pub fn new(values: Vec<V>, cursor: Option<C>) -> Self {
        Self { values, cursor }
    }

    /// Create a terminal page (no continuation)
    pub fn terminal(values: Vec<V>) -> Self {
        Self {
            values,
            cursor: None,
        }
    }

    /// Check whether the page carried no values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A request descriptor: either first-page params or a continuation cursor.
#[derive(Debug, Clone)]
pub enum FetchRequest<P, C> {
    /// First page of a new session
    First(P),
    /// Subsequent page within the current session
    Next(C),
}

/// A paginated data source.
///
/// `fetch_first`/`fetch_next` are the transport boundary; `values`/`cursor`
/// are pure extractors over the raw envelope. The coordinator never inspects
/// `Params`, `Cursor`, `Envelope`, or `Value` beyond these four operations
/// and `Value` equality.
#[async_trait]
pub trait PageSource: Send + Sync + 'static {
    /// Opaque first-page query description (filters, sort, ...)
    type Params: Send + 'static;
    /// Opaque continuation token returned by a page
    type Cursor: Clone + Send + Sync + 'static;
    /// Raw page response
    type Envelope: Send + 'static;
    /// Unit of paginated data
    type Value: Clone + PartialEq + Send + Sync + 'static;
    /// Transport-defined fetch error
    type Error: std::fmt::Display + Send + 'static;

    /// Fetch the first page for a query
    async fn fetch_first(&self, params: Self::Params)
        -> Result<Self::Envelope, Self::Error>;

    /// Fetch the page that follows a cursor
    async fn fetch_next(&self, cursor: Self::Cursor)
        -> Result<Self::Envelope, Self::Error>;

    /// Extract the value list from an envelope
    fn values(&self, envelope: &Self::Envelope) -> Vec<Self::Value>;

    /// Extract the continuation cursor from an envelope, if present
    fn cursor(&self, envelope: &Self::Envelope) -> Option<Self::Cursor>;

    /// Extract an envelope into a [`Page`]
    fn extract(&self, envelope: &Self::Envelope) -> Page<Self::Cursor, Self::Value> {
        Page::new(self.values(envelope), self.cursor(envelope))
    }
}

type FetchFn<I, Env, Err> =
    Box<dyn Fn(I) -> BoxFuture<'static, Result<Env, Err>> + Send + Sync>;

/// A [`PageSource`] assembled from four closures.
///
/// Useful when the caller has no natural client type to hang the trait on:
/// supply the two request functions and the two extractors directly.
///
/// ```ignore
/// let source = FnSource::new(
///     |params: Query| client.search(params),
///     |cursor: String| client.search_after(cursor),
///     |env: &SearchResponse| env.hits.clone(),
///     |env: &SearchResponse| env.next.clone(),
/// );
/// ```
pub struct FnSource<P, C, Env, V, Err> {
    fetch_first: FetchFn<P, Env, Err>,
    fetch_next: FetchFn<C, Env, Err>,
    values: Box<dyn Fn(&Env) -> Vec<V> + Send + Sync>,
    cursor: Box<dyn Fn(&Env) -> Option<C> + Send + Sync>,
}

impl<P, C, Env, V, Err> FnSource<P, C, Env, V, Err> {
    /// Build a source from request and extractor functions
    pub fn new<F1, Fut1, F2, Fut2, FV, FC>(
        fetch_first: F1,
        fetch_next: F2,
        values: FV,
        cursor: FC,
    ) -> Self
    where
        F1: Fn(P) -> Fut1 + Send + Sync + 'static,
        Fut1: Future<Output = Result<Env, Err>> + Send + 'static,
        F2: Fn(C) -> Fut2 + Send + Sync + 'static,
        Fut2: Future<Output = Result<Env, Err>> + Send + 'static,
        FV: Fn(&Env) -> Vec<V> + Send + Sync + 'static,
        FC: Fn(&Env) -> Option<C> + Send + Sync + 'static,
    {
        Self {
            fetch_first: Box::new(move |params| fetch_first(params).boxed()),
            fetch_next: Box::new(move |cursor| fetch_next(cursor).boxed()),
            values: Box::new(values),
            cursor: Box::new(cursor),
        }
    }
}

#[async_trait]
impl<P, C, Env, V, Err> PageSource for FnSource<P, C, Env, V, Err>
where
    P: Send + 'static,
    C: Clone + Send + Sync + 'static,
    Env: Send + Sync + 'static,
    V: Clone + PartialEq + Send + Sync + 'static,
    Err: std::fmt::Display + Send + 'static,
{
    type Params = P;
    type Cursor = C;
    type Envelope = Env;
    type Value = V;
    type Error = Err;

    async fn fetch_first(&self, params: P) -> Result<Env, Err> {
        (self.fetch_first)(params).await
    }

    async fn fetch_next(&self, cursor: C) -> Result<Env, Err> {
        (self.fetch_next)(cursor).await
    }

    fn values(&self, envelope: &Env) -> Vec<V> {
        (self.values)(envelope)
    }

    fn cursor(&self, envelope: &Env) -> Option<C> {
        (self.cursor)(envelope)
    }
}

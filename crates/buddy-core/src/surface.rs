//! Dual-surface exposure of remote operations.
//!
//! Every operation returns a [`PendingCall`]. Callers either `.await` it
//! (future surface) or hand it a continuation with
//! [`PendingCall::on_complete`] (callback surface). Both paths drive the same
//! single future, so validation and the network call happen once.
//!
//! There is no cancellation: once spawned, a call runs to completion even if
//! the returned handle is dropped.

use std::future::{Future, IntoFuture};
use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::error::{BuddyError, BuddyResult};
use crate::transport::Dispatcher;

/// Status half of a callback invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct CallStatus<S> {
    /// Caller-supplied correlation value, handed back untouched.
    pub state: S,
    /// `None` on success.
    pub error: Option<BuddyError>,
}

impl<S> CallStatus<S> {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

enum Inner<T> {
    Rejected(BuddyError),
    Ready(BoxFuture<'static, BuddyResult<T>>),
}

/// A validated operation that has not been driven yet.
#[must_use = "a PendingCall does nothing until awaited or given a callback"]
pub struct PendingCall<T> {
    inner: Inner<T>,
}

impl<T: Send + 'static> PendingCall<T> {
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = BuddyResult<T>> + Send + 'static,
    {
        Self {
            inner: Inner::Ready(Box::pin(future)),
        }
    }

    /// A call that failed validation. It never touches the transport.
    pub fn rejected(error: BuddyError) -> Self {
        Self {
            inner: Inner::Rejected(error),
        }
    }

    /// Runs `prepare` immediately; a validation error becomes a rejected call.
    pub fn prepare<F>(prepare: F) -> Self
    where
        F: FnOnce() -> BuddyResult<PendingCall<T>>,
    {
        prepare().unwrap_or_else(Self::rejected)
    }

    /// An already-resolved success, for operations answerable without I/O.
    pub fn ready(value: T) -> Self {
        Self::new(futures::future::ready(Ok(value)))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self.inner, Inner::Rejected(_))
    }

    pub fn map<U, F>(self, f: F) -> PendingCall<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        match self.inner {
            Inner::Rejected(err) => PendingCall::rejected(err),
            Inner::Ready(future) => PendingCall::new(async move { future.await.map(f) }),
        }
    }

    /// Chains a dependent call. The second step is only issued after the
    /// first succeeds; a failure at either step fails the whole chain.
    pub fn and_then<U, F>(self, next: F) -> PendingCall<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> PendingCall<U> + Send + 'static,
    {
        match self.inner {
            Inner::Rejected(err) => PendingCall::rejected(err),
            Inner::Ready(future) => PendingCall::new(async move {
                let value = future.await?;
                next(value).await
            }),
        }
    }

    /// Callback surface. The continuation runs exactly once on whatever task
    /// completes the call.
    ///
    /// Validation faults are returned here as `Err` and the callback is never
    /// invoked.
    pub fn on_complete<S, F>(self, state: S, callback: F) -> BuddyResult<JoinHandle<()>>
    where
        S: Send + 'static,
        F: FnOnce(Option<T>, CallStatus<S>) + Send + 'static,
    {
        let future = match self.inner {
            Inner::Rejected(err) => return Err(err),
            Inner::Ready(future) => future,
        };
        let handle = Handle::try_current()
            .map_err(|_| BuddyError::config("callbacks need a running tokio runtime"))?;
        Ok(handle.spawn(async move {
            let (value, status) = split(future.await, state);
            callback(value, status);
        }))
    }

    /// Like [`on_complete`](Self::on_complete) but marshals the continuation
    /// through `dispatcher` (for callers that must finish on a UI thread).
    pub fn on_complete_via<S, F>(
        self,
        dispatcher: Arc<dyn Dispatcher>,
        state: S,
        callback: F,
    ) -> BuddyResult<JoinHandle<()>>
    where
        S: Send + 'static,
        F: FnOnce(Option<T>, CallStatus<S>) + Send + 'static,
    {
        self.on_complete(state, move |value, status| {
            dispatcher.dispatch(Box::new(move || callback(value, status)));
        })
    }
}

fn split<T, S>(result: BuddyResult<T>, state: S) -> (Option<T>, CallStatus<S>) {
    match result {
        Ok(value) => (Some(value), CallStatus { state, error: None }),
        Err(error) => (
            None,
            CallStatus {
                state,
                error: Some(error),
            },
        ),
    }
}

impl<T: Send + 'static> IntoFuture for PendingCall<T> {
    type Output = BuddyResult<T>;
    type IntoFuture = BoxFuture<'static, BuddyResult<T>>;

    fn into_future(self) -> Self::IntoFuture {
        match self.inner {
            Inner::Rejected(err) => Box::pin(futures::future::ready(Err(err))),
            Inner::Ready(future) => future,
        }
    }
}

impl<T: Send + 'static> From<BuddyResult<PendingCall<T>>> for PendingCall<T> {
    fn from(result: BuddyResult<PendingCall<T>>) -> Self {
        result.unwrap_or_else(Self::rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::oneshot;

    fn counted(counter: Arc<AtomicUsize>, value: u32) -> PendingCall<u32> {
        PendingCall::new(async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(value)
        })
    }

    #[tokio::test]
    async fn test_future_surface_resolves() {
        let counter = Arc::new(AtomicUsize::new(0));
        let value = counted(counter.clone(), 7).await.unwrap();
        assert_eq!(value, 7);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_callback_surface_fires_once_with_state() {
        let counter = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = oneshot::channel();
        let handle = counted(counter.clone(), 3)
            .on_complete("corr-1", move |value, status| {
                let _ = tx.send((value, status));
            })
            .unwrap();
        handle.await.unwrap();
        let (value, status) = rx.await.unwrap();
        assert_eq!(value, Some(3));
        assert!(status.is_ok());
        assert_eq!(status.state, "corr-1");
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_callback_receives_failure_pair() {
        let call: PendingCall<u32> =
            PendingCall::new(async { Err(BuddyError::transport("offline")) });
        let seen = Arc::new(Mutex::new(None));
        let sink = seen.clone();
        call.on_complete((), move |value, status| {
            *sink.lock().unwrap() = Some((value, status.error));
        })
        .unwrap()
        .await
        .unwrap();
        let (value, error) = seen.lock().unwrap().take().unwrap();
        assert!(value.is_none());
        assert!(error.unwrap().is_transport());
    }

    #[tokio::test]
    async fn test_rejected_call_is_synchronous_on_callback_surface() {
        let call: PendingCall<u32> =
            PendingCall::rejected(BuddyError::invalid_argument("key", "can't be null or empty"));
        assert!(call.is_rejected());
        let invoked = Arc::new(AtomicUsize::new(0));
        let flag = invoked.clone();
        let err = call
            .on_complete((), move |_, _| {
                flag.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap_err();
        assert!(err.is_validation());
        tokio::task::yield_now().await;
        assert_eq!(invoked.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_rejected_call_on_future_surface() {
        let call: PendingCall<u32> = PendingCall::prepare(|| {
            Err(BuddyError::invalid_argument("latitude", "out of range"))
        });
        assert!(call.await.unwrap_err().is_validation());
    }

    #[tokio::test]
    async fn test_and_then_stops_after_failure() {
        let second = Arc::new(AtomicUsize::new(0));
        let counter = second.clone();
        let first: PendingCall<u32> =
            PendingCall::new(async { Err(BuddyError::transport("step one failed")) });
        let result = first
            .and_then(move |value| counted(counter, value + 1))
            .await;
        assert!(result.is_err());
        assert_eq!(second.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_map_and_and_then_chain_values() {
        let counter = Arc::new(AtomicUsize::new(0));
        let next_counter = counter.clone();
        let result = counted(counter.clone(), 2)
            .map(|v| v * 10)
            .and_then(move |v| counted(next_counter, v + 1))
            .await
            .unwrap();
        assert_eq!(result, 21);
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_dispatcher_receives_continuation() {
        struct Recording(Mutex<usize>);
        impl Dispatcher for Recording {
            fn dispatch(&self, job: Box<dyn FnOnce() + Send + 'static>) {
                *self.0.lock().unwrap() += 1;
                job();
            }
        }

        let dispatcher = Arc::new(Recording(Mutex::new(0)));
        let (tx, rx) = oneshot::channel();
        PendingCall::ready(5u32)
            .on_complete_via(dispatcher.clone(), (), move |value, _| {
                let _ = tx.send(value);
            })
            .unwrap()
            .await
            .unwrap();
        assert_eq!(rx.await.unwrap(), Some(5));
        assert_eq!(*dispatcher.0.lock().unwrap(), 1);
    }

    #[test]
    fn test_callback_without_runtime_is_an_error() {
        let err = PendingCall::ready(1u32).on_complete((), |_, _| {}).unwrap_err();
        assert!(matches!(err, BuddyError::Config(_)));
    }
}

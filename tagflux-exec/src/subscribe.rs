// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_trait::async_trait;
use futures::stream::{Stream, StreamExt};
use std::fmt::Debug;
use std::future::Future;
use tagflux_core::Result;
use tokio_util::sync::CancellationToken;

/// Extension trait providing a sequential, cancellable subscription for streams.
#[async_trait]
pub trait SubscribeExt<T>: Stream<Item = T> + Sized {
    /// Subscribes to the stream with an async handler, processing items sequentially.
    ///
    /// Each item's handler runs to completion before the next item is pulled. Handler
    /// errors go to `on_error_callback` and processing continues.
    ///
    /// Processing stops when the stream ends or the cancellation token fires. The token
    /// is observed while waiting for the next item as well as before each handler call,
    /// so no handler starts after cancellation.
    ///
    /// # Examples
    ///
    /// ```
    /// use futures::stream;
    /// use std::sync::{Arc, Mutex};
    /// use tagflux_exec::SubscribeExt;
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let seen = Arc::new(Mutex::new(Vec::new()));
    /// let sink = seen.clone();
    ///
    /// stream::iter(vec![1, 2, 3])
    ///     .subscribe(
    ///         move |item, _token| {
    ///             let sink = sink.clone();
    ///             async move {
    ///                 sink.lock().unwrap().push(item);
    ///                 Ok::<(), std::io::Error>(())
    ///             }
    ///         },
    ///         |_error| {},
    ///         None,
    ///     )
    ///     .await
    ///     .unwrap();
    ///
    /// assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3]);
    /// # }
    /// ```
    async fn subscribe<F, Fut, E, OnError>(
        self,
        on_next_func: F,
        on_error_callback: OnError,
        cancellation_token: Option<CancellationToken>,
    ) -> Result<()>
    where
        F: Fn(T, CancellationToken) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<(), E>> + Send + 'static,
        OnError: Fn(E) + Send + Sync + 'static,
        T: Debug + Send + 'static,
        E: Send + 'static;
}

#[async_trait]
impl<S, T> SubscribeExt<T> for S
where
    S: Stream<Item = T> + Unpin + Send + 'static,
    T: Send + 'static,
{
    async fn subscribe<F, Fut, E, OnError>(
        mut self,
        on_next_func: F,
        on_error_callback: OnError,
        cancellation_token: Option<CancellationToken>,
    ) -> Result<()>
    where
        F: Fn(T, CancellationToken) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<(), E>> + Send + 'static,
        OnError: Fn(E) + Send + Sync + 'static,
        T: Debug + Send + 'static,
        E: Send + 'static,
    {
        let cancellation_token = cancellation_token.unwrap_or_default();

        loop {
            let item = tokio::select! {
                biased;
                () = cancellation_token.cancelled() => break,
                item = self.next() => match item {
                    Some(item) => item,
                    None => break,
                },
            };

            if cancellation_token.is_cancelled() {
                break;
            }

            if let Err(error) = on_next_func(item, cancellation_token.clone()).await {
                on_error_callback(error);
            }
        }

        Ok(())
    }
}

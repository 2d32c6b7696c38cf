// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Skip-items operator that drops the first n items of a stream.

use futures::stream::Skip;
use futures::{Stream, StreamExt};

/// Extension trait providing the `skip_items` operator for any stream.
pub trait SkipItemsExt<T>: Stream<Item = T> + Sized {
    /// Skips the first `n` items from the stream.
    ///
    /// If the stream has fewer than `n` items, nothing is emitted and the result ends
    /// when the source ends.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use futures::{stream, StreamExt};
    /// use tagflux_stream::SkipItemsExt;
    ///
    /// # async fn example() {
    /// let after_first: Vec<_> = stream::iter(vec![1, 2, 3]).skip_items(1).collect().await;
    /// assert_eq!(after_first, vec![2, 3]);
    /// # }
    /// ```
    fn skip_items(self, n: usize) -> Skip<Self>;
}

impl<S, T> SkipItemsExt<T> for S
where
    S: Stream<Item = T>,
{
    fn skip_items(self, n: usize) -> Skip<Self> {
        StreamExt::skip(self, n)
    }
}

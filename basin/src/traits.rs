/// Accepts items, one at a time, in arrival order.
///
/// A sink is the terminal end of a pipeline: items go in and are never
/// handed back. Implementations decide what "accepting" means: collecting
/// into a `Vec`, forwarding into a channel, calling a closure, or dropping.
pub trait Sink<T> {
    /// The error type returned by fallible operations.
    type Error;

    /// Accept one item.
    ///
    /// # Errors
    /// Returns an error if the item could not be accepted.
    fn send(&mut self, item: T) -> Result<(), Self::Error>;

    /// Accept every item from an iterator.
    ///
    /// The default implementation calls [`send`](Self::send) per item;
    /// implementations with a cheaper bulk path can override it.
    ///
    /// # Errors
    /// Returns the first error encountered; remaining items are not sent.
    #[inline]
    fn send_all(&mut self, items: impl Iterator<Item = T>) -> Result<(), Self::Error> {
        for item in items {
            self.send(item)?;
        }
        Ok(())
    }

    /// Flush any buffered state.
    ///
    /// # Errors
    /// Returns an error if the flush fails.
    #[inline]
    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

//! Selector resolver port (interface).

/// Strategy turning a user selector into a filter expression.
///
/// Resolution never fails: when a selector cannot be resolved it is
/// returned unchanged.
pub trait SelectorResolver: Send + Sync {
    /// Resolve `selector` into a regular expression source.
    fn resolve(&self, selector: &str) -> impl std::future::Future<Output = String> + Send;
}

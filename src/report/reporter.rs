//! Reporter trait.

use crate::resolver::ResolvedAddress;
use std::sync::Arc;

/// Receives every address the watcher resolves.
///
/// Called synchronously from the watcher's session task, once per
/// resolve-and-report cycle, in order. Implementations must tolerate
/// the same value arriving repeatedly.
///
/// `stop()` waits for a report in progress, so calling it from inside
/// `report` deadlocks. Status queries (`status`, `is_watching`) are fine.
pub trait Reporter: Send + Sync {
    /// Handles one resolution result.
    fn report(&self, address: &ResolvedAddress);
}

impl<R: Reporter + ?Sized> Reporter for Arc<R> {
    fn report(&self, address: &ResolvedAddress) {
        (**self).report(address);
    }
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn report(&self, address: &ResolvedAddress) {
        (**self).report(address);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Collect(Mutex<Vec<ResolvedAddress>>);

    impl Reporter for Collect {
        fn report(&self, address: &ResolvedAddress) {
            self.0.lock().unwrap().push(*address);
        }
    }

    #[test]
    fn arc_forwards_to_inner() {
        let inner = Arc::new(Collect::default());
        let shared: Arc<Collect> = Arc::clone(&inner);

        shared.report(&ResolvedAddress::Unavailable);

        assert_eq!(*inner.0.lock().unwrap(), vec![ResolvedAddress::Unavailable]);
    }

    #[test]
    fn boxed_trait_object_forwards() {
        let boxed: Box<dyn Reporter> = Box::new(Collect::default());
        boxed.report(&ResolvedAddress::Unavailable);
    }
}

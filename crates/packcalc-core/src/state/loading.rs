use parking_lot::RwLock;

/// State that exposes an `is_loading` flag backed by an in-flight counter.
pub(crate) trait TracksLoading {
    fn in_flight(&mut self) -> &mut usize;
    fn set_is_loading(&mut self, loading: bool);
}

/// Marks one operation in flight until dropped.
///
/// Dropping on every exit path (including a cancelled future) is what keeps
/// `is_loading` from getting stuck; overlapping operations keep it raised until
/// the last one finishes.
pub(crate) struct LoadingGuard<'a, S: TracksLoading> {
    state: &'a RwLock<S>,
}

impl<'a, S: TracksLoading> LoadingGuard<'a, S> {
    pub(crate) fn begin(state: &'a RwLock<S>) -> Self {
        let mut s = state.write();
        *s.in_flight() += 1;
        s.set_is_loading(true);
        drop(s);
        Self { state }
    }
}

impl<S: TracksLoading> Drop for LoadingGuard<'_, S> {
    fn drop(&mut self) {
        let mut s = self.state.write();
        let in_flight = s.in_flight();
        *in_flight = in_flight.saturating_sub(1);
        let active = *in_flight > 0;
        s.set_is_loading(active);
    }
}

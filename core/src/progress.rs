/// Progress reporting for long-running passes.
///
/// Passes call the callback at throttled intervals with any subset of the
/// fields below. A missing `bar` means "pulse": the pass is alive but cannot
/// estimate how far along it is. The callback is also the only point where a
/// host event loop gets to run, so implementations are expected to return
/// quickly.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ProgressUpdate<'a> {
    pub phase: Option<&'a str>,
    pub bar: Option<f32>,
    pub time: Option<&'a str>,
}

impl<'a> ProgressUpdate<'a> {
    pub fn pulse() -> Self {
        Self::default()
    }

    pub fn is_pulse(&self) -> bool {
        self.bar.is_none()
    }
}

pub trait ProgressCallback {
    fn on_progress(&self, update: &ProgressUpdate<'_>);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_progress(&self, _update: &ProgressUpdate<'_>) {}
}

impl<F> ProgressCallback for F
where
    F: Fn(&ProgressUpdate<'_>),
{
    fn on_progress(&self, update: &ProgressUpdate<'_>) {
        self(update)
    }
}

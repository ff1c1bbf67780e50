use std::sync::{Arc, Mutex};

use slurm_monitor::dashboard::{DashboardView, Presenter};

/// A presenter that records every view and whether `finish` was called.
#[derive(Clone, Default)]
pub struct RecordingPresenter {
    views: Arc<Mutex<Vec<DashboardView>>>,
    finished: Arc<Mutex<bool>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn views(&self) -> Vec<DashboardView> {
        self.views.lock().unwrap().clone()
    }

    pub fn finished(&self) -> bool {
        *self.finished.lock().unwrap()
    }
}

impl Presenter for RecordingPresenter {
    fn present(&mut self, view: &DashboardView) -> anyhow::Result<()> {
        self.views.lock().unwrap().push(view.clone());
        Ok(())
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        *self.finished.lock().unwrap() = true;
        Ok(())
    }
}

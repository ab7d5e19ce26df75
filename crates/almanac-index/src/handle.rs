//! Background loading.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use almanac_fetch::{Fetch, SourceLayout};
use crossbeam_channel::{Receiver, Sender};
use tracing::debug;

use crate::{Error, GameDatabase, LoadStage, Loader, Result};

/// Messages from a background load.
#[derive(Debug)]
pub enum LoadEvent {
    Progress {
        stage: LoadStage,
        current: usize,
        total: usize,
    },
    /// Sent exactly once, last.
    Finished(Result<Arc<GameDatabase>>),
}

/// A build running on its own thread.
///
/// Dropping the handle cancels the build; a cancelled build never publishes a
/// database.
#[derive(Debug)]
pub struct LoadHandle {
    events: Receiver<LoadEvent>,
    cancelled: Arc<AtomicBool>,
}

impl LoadHandle {
    /// Start loading in a background thread.
    pub fn spawn(fetcher: Arc<dyn Fetch>, layout: SourceLayout) -> Self {
        let (sender, events) = crossbeam_channel::unbounded();
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);

        std::thread::spawn(move || {
            let progress = |stage: LoadStage, current: usize, total: usize| {
                send_progress(&sender, stage, current, total);
            };
            let result = Loader::new(&*fetcher, &layout)
                .cancel_flag(&flag)
                .progress(&progress)
                .run()
                .map(Arc::new);

            if let Err(Error::Cancelled) = &result {
                debug!("background load cancelled");
            }
            sender.send(LoadEvent::Finished(result)).ok();
        });

        Self { events, cancelled }
    }

    /// The event stream, for polling from a UI loop.
    pub fn events(&self) -> &Receiver<LoadEvent> {
        &self.events
    }

    /// Ask the build to stop at its next checkpoint.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Block until the build finishes, skipping progress events.
    pub fn wait(self) -> Result<Arc<GameDatabase>> {
        self.wait_with(|_, _, _| {})
    }

    /// Block until the build finishes, forwarding progress to `on_progress`.
    pub fn wait_with(
        self,
        mut on_progress: impl FnMut(LoadStage, usize, usize),
    ) -> Result<Arc<GameDatabase>> {
        loop {
            match self.events.recv() {
                Ok(LoadEvent::Progress {
                    stage,
                    current,
                    total,
                }) => on_progress(stage, current, total),
                Ok(LoadEvent::Finished(result)) => return result,
                Err(_) => return Err(Error::Disconnected),
            }
        }
    }
}

impl Drop for LoadHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn send_progress(sender: &Sender<LoadEvent>, stage: LoadStage, current: usize, total: usize) {
    sender
        .send(LoadEvent::Progress {
            stage,
            current,
            total,
        })
        .ok();
}

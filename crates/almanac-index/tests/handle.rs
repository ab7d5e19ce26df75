mod common;

use std::sync::Arc;

use almanac_fetch::{Fetch, MemoryFetcher};
use almanac_index::{Error, LoadEvent, LoadHandle, LoadStage};
use crossbeam_channel::Receiver;

/// Blocks every fetch until the gate's sender is dropped.
struct GatedFetcher {
    inner: MemoryFetcher,
    gate: Receiver<()>,
}

impl Fetch for GatedFetcher {
    fn fetch(&self, path: &str) -> almanac_fetch::Result<Option<Vec<u8>>> {
        self.gate.recv().ok();
        self.inner.fetch(path)
    }
}

#[test]
fn test_background_load_reports_progress() {
    let handle = LoadHandle::spawn(Arc::new(common::fixture()), common::layout());

    let mut stages = Vec::new();
    let db = handle
        .wait_with(|stage, _, _| {
            if stages.last() != Some(&stage) {
                stages.push(stage);
            }
        })
        .unwrap();

    assert_eq!(stages, vec![LoadStage::Tables, LoadStage::Sources, LoadStage::Indexing]);
    assert_eq!(db.counts().quests, 1);
}

#[test]
fn test_events_end_with_finished() {
    let handle = LoadHandle::spawn(Arc::new(common::fixture()), common::layout());

    let mut last = None;
    for event in handle.events().iter() {
        let finished = matches!(event, LoadEvent::Finished(_));
        last = Some(event);
        if finished {
            break;
        }
    }

    assert!(matches!(last, Some(LoadEvent::Finished(Ok(_)))));
}

#[test]
fn test_cancelled_load_never_publishes() {
    let (open, gate) = crossbeam_channel::bounded::<()>(0);
    let fetcher = GatedFetcher {
        inner: common::fixture(),
        gate,
    };

    let handle = LoadHandle::spawn(Arc::new(fetcher), common::layout());
    handle.cancel();
    assert!(handle.is_cancelled());
    drop(open);

    assert!(matches!(handle.wait(), Err(Error::Cancelled)));
}

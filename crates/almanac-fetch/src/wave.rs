//! Concurrent fetch waves.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::debug;

use crate::{Fetch, Result};

/// One retrieved source.
#[derive(Debug)]
pub struct Fetched {
    pub path: String,
    pub result: Result<Option<Vec<u8>>>,
}

/// Fetch every path in parallel and wait for all of them.
///
/// Results come back in request order. `progress` receives `(completed,
/// total)` after each fetch settles. Once `cancelled` is set, paths not yet
/// started are skipped and settle as absent.
pub fn fetch_wave<F>(
    fetcher: &dyn Fetch,
    paths: Vec<String>,
    cancelled: Option<&AtomicBool>,
    progress: F,
) -> Vec<Fetched>
where
    F: Fn(usize, usize) + Sync,
{
    let total = paths.len();
    let completed = AtomicUsize::new(0);
    let skipped = AtomicUsize::new(0);

    let fetched: Vec<Fetched> = paths
        .into_par_iter()
        .map(|path| {
            let result = if cancelled.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                skipped.fetch_add(1, Ordering::Relaxed);
                Ok(None)
            } else {
                fetcher.fetch(&path)
            };
            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            progress(done, total);
            Fetched { path, result }
        })
        .collect();

    let present = fetched
        .iter()
        .filter(|f| matches!(f.result, Ok(Some(_))))
        .count();
    debug!(
        total,
        present,
        skipped = skipped.load(Ordering::Relaxed),
        origin = %fetcher.describe(),
        "fetch wave settled"
    );

    fetched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryFetcher;

    #[test]
    fn test_wave_keeps_request_order() {
        let fetcher = MemoryFetcher::new()
            .with("maps/00002.emf", vec![2])
            .with("maps/00004.emf", vec![4]);
        let paths: Vec<String> = (1..=5).map(|id| format!("maps/{id:05}.emf")).collect();

        let last = AtomicUsize::new(0);
        let fetched = fetch_wave(&fetcher, paths.clone(), None, |done, total| {
            assert_eq!(total, 5);
            last.fetch_max(done, Ordering::Relaxed);
        });

        assert_eq!(last.load(Ordering::Relaxed), 5);
        let got: Vec<&str> = fetched.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(got, paths.iter().map(String::as_str).collect::<Vec<_>>());

        let bytes: Vec<Option<Vec<u8>>> = fetched.into_iter().map(|f| f.result.unwrap()).collect();
        assert_eq!(bytes, vec![None, Some(vec![2]), None, Some(vec![4]), None]);
    }

    #[test]
    fn test_empty_wave() {
        let fetched = fetch_wave(&MemoryFetcher::new(), Vec::new(), None, |_, _| {});
        assert!(fetched.is_empty());
    }

    /// Raises the shared flag on its first fetch.
    struct Tripwire {
        calls: AtomicUsize,
        flag: AtomicBool,
    }

    impl Fetch for Tripwire {
        fn fetch(&self, _path: &str) -> Result<Option<Vec<u8>>> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            self.flag.store(true, Ordering::Relaxed);
            Ok(Some(Vec::new()))
        }
    }

    #[test]
    fn test_cancelled_wave_skips_remaining_paths() {
        let fetcher = Tripwire {
            calls: AtomicUsize::new(0),
            flag: AtomicBool::new(false),
        };
        let paths: Vec<String> = (1..=2_000).map(|id| format!("quests/{id:05}.eqf")).collect();

        let last = AtomicUsize::new(0);
        let fetched = fetch_wave(&fetcher, paths, Some(&fetcher.flag), |done, _| {
            last.fetch_max(done, Ordering::Relaxed);
        });

        let calls = fetcher.calls.load(Ordering::Relaxed);
        assert!(calls >= 1);
        assert!(calls < 2_000);
        assert_eq!(fetched.len(), 2_000);
        assert_eq!(last.load(Ordering::Relaxed), 2_000);

        let present = fetched.iter().filter(|f| matches!(f.result, Ok(Some(_)))).count();
        assert_eq!(present, calls);
    }

    #[test]
    fn test_wave_with_flag_already_set_fetches_nothing() {
        let fetcher = MemoryFetcher::new().with("data/drops.ini", "1 = 1,1,1,1");
        let flag = AtomicBool::new(true);

        let fetched = fetch_wave(&fetcher, vec!["data/drops.ini".into()], Some(&flag), |_, _| {});
        assert!(matches!(fetched[0].result, Ok(None)));
    }
}

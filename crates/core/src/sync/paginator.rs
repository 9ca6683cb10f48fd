//! Lazy pagination driver: date windows outside, continuation tokens inside.

use std::sync::Arc;

use shelfsync_domain::{DateWindow, Result};
use tracing::{debug, warn};

use super::ports::{SourcePage, WindowedSource};
use super::windows::split_windows;

/// One fetched page, annotated with its position in the window sequence.
#[derive(Debug, Clone)]
pub struct PageBatch<T> {
    pub window: DateWindow,
    /// Zero-based index of the window this page belongs to.
    pub window_index: usize,
    /// True on the last page of a window.
    pub window_complete: bool,
    pub records: Vec<T>,
}

/// Pull-based driver over a [`WindowedSource`].
///
/// Windows are walked chronologically; within a window, pages follow the
/// continuation token until the source signals the end. Where the endpoint
/// exposes an explicit `has_next` flag, `false` is authoritative even if a
/// token is still present; otherwise an absent or empty token ends the
/// window. A defensive page cap bounds runaway token chains.
///
/// The sequence is finite and not restartable: re-invocation re-executes
/// every network call.
pub struct Paginator<T> {
    source: Arc<dyn WindowedSource<Record = T>>,
    windows: Vec<DateWindow>,
    max_pages: u32,
    window_index: usize,
    next_token: Option<String>,
    pages_in_window: u32,
}

impl<T> Paginator<T> {
    pub fn new(
        source: Arc<dyn WindowedSource<Record = T>>,
        from: chrono::NaiveDate,
        to: chrono::NaiveDate,
        max_pages: u32,
    ) -> Result<Self> {
        let windows = split_windows(from, to, source.max_span_days())?;
        Ok(Self {
            source,
            windows,
            max_pages: max_pages.max(1),
            window_index: 0,
            next_token: None,
            pages_in_window: 0,
        })
    }

    /// Total number of sub-windows the requested range was split into.
    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    /// Fetch the next page, or `None` once every window is exhausted.
    pub async fn next_batch(&mut self) -> Result<Option<PageBatch<T>>> {
        let Some(&window) = self.windows.get(self.window_index) else {
            return Ok(None);
        };

        let page = self.source.fetch_page(&window, self.next_token.as_deref()).await?;
        self.pages_in_window += 1;

        let token = page.next_token.as_ref().filter(|t| !t.is_empty()).cloned();
        let window_complete = self.window_done(&page, token.as_deref());

        debug!(
            source = self.source.label(),
            window = %window,
            page = self.pages_in_window,
            records = page.records.len(),
            window_complete,
            "fetched page"
        );

        let batch = PageBatch {
            window,
            window_index: self.window_index,
            window_complete,
            records: page.records,
        };

        if window_complete {
            self.window_index += 1;
            self.next_token = None;
            self.pages_in_window = 0;
        } else {
            self.next_token = token;
        }

        Ok(Some(batch))
    }

    fn window_done(&self, page: &SourcePage<T>, token: Option<&str>) -> bool {
        if self.pages_in_window >= self.max_pages {
            warn!(
                source = self.source.label(),
                max_pages = self.max_pages,
                "page cap reached inside one window; stopping early"
            );
            return true;
        }

        match page.has_next {
            // Explicit flag is authoritative when present.
            Some(false) => true,
            Some(true) if token.is_none() => {
                warn!(
                    source = self.source.label(),
                    "server claims more pages but sent no token; treating window as done"
                );
                true
            }
            Some(true) => false,
            None => token.is_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use shelfsync_domain::ShelfsyncError;

    use super::*;

    /// Scripted source: each entry is one page returned in order, recording
    /// the tokens it was called with.
    struct ScriptedSource {
        pages: Mutex<std::collections::VecDeque<SourcePage<u32>>>,
        seen_tokens: Mutex<Vec<Option<String>>>,
        max_span_days: i64,
    }

    impl ScriptedSource {
        fn new(pages: Vec<SourcePage<u32>>, max_span_days: i64) -> Self {
            Self {
                pages: Mutex::new(pages.into()),
                seen_tokens: Mutex::new(Vec::new()),
                max_span_days,
            }
        }
    }

    #[async_trait]
    impl WindowedSource for ScriptedSource {
        type Record = u32;

        fn label(&self) -> &'static str {
            "scripted"
        }

        fn max_span_days(&self) -> i64 {
            self.max_span_days
        }

        async fn fetch_page(
            &self,
            _window: &DateWindow,
            token: Option<&str>,
        ) -> Result<SourcePage<u32>> {
            self.seen_tokens.lock().push(token.map(str::to_string));
            self.pages
                .lock()
                .pop_front()
                .ok_or_else(|| ShelfsyncError::Internal("script exhausted".into()))
        }
    }

    fn page(records: Vec<u32>, token: Option<&str>, has_next: Option<bool>) -> SourcePage<u32> {
        SourcePage { records, next_token: token.map(str::to_string), has_next }
    }

    fn date(s: &str) -> chrono::NaiveDate {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn follows_tokens_within_a_window() {
        let source = Arc::new(ScriptedSource::new(
            vec![
                page(vec![1, 2], Some("t1"), None),
                page(vec![3], Some("t2"), None),
                page(vec![4], None, None),
            ],
            31,
        ));
        let mut paginator =
            Paginator::new(source.clone(), date("2025-01-01"), date("2025-01-10"), 100).unwrap();

        let mut collected = Vec::new();
        while let Some(batch) = paginator.next_batch().await.unwrap() {
            collected.extend(batch.records);
        }

        assert_eq!(collected, vec![1, 2, 3, 4]);
        // First page without a token, then the two continuation tokens.
        assert_eq!(
            *source.seen_tokens.lock(),
            vec![None, Some("t1".to_string()), Some("t2".to_string())]
        );
    }

    #[tokio::test]
    async fn has_next_false_overrides_a_present_token() {
        let source = Arc::new(ScriptedSource::new(
            vec![page(vec![1], Some("stale-token"), Some(false))],
            31,
        ));
        let mut paginator =
            Paginator::new(source, date("2025-01-01"), date("2025-01-10"), 100).unwrap();

        let batch = paginator.next_batch().await.unwrap().unwrap();
        assert!(batch.window_complete);
        assert!(paginator.next_batch().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn empty_token_ends_the_window() {
        let source = Arc::new(ScriptedSource::new(vec![page(vec![1], Some(""), None)], 31));
        let mut paginator =
            Paginator::new(source, date("2025-01-01"), date("2025-01-10"), 100).unwrap();

        let batch = paginator.next_batch().await.unwrap().unwrap();
        assert!(batch.window_complete);
    }

    #[tokio::test]
    async fn walks_every_window_in_order() {
        // 40 days at a 31-day span: two windows, one page each.
        let source = Arc::new(ScriptedSource::new(
            vec![page(vec![1], None, None), page(vec![2], None, None)],
            31,
        ));
        let mut paginator =
            Paginator::new(source, date("2025-01-01"), date("2025-02-09"), 100).unwrap();
        assert_eq!(paginator.window_count(), 2);

        let first = paginator.next_batch().await.unwrap().unwrap();
        assert_eq!(first.window_index, 0);
        assert_eq!(first.window, DateWindow::new(date("2025-01-01"), date("2025-01-31")));

        let second = paginator.next_batch().await.unwrap().unwrap();
        assert_eq!(second.window_index, 1);
        assert_eq!(second.window, DateWindow::new(date("2025-02-01"), date("2025-02-09")));

        assert!(paginator.next_batch().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn page_cap_bounds_a_runaway_token_chain() {
        // Every page advertises another token; the cap must cut it off.
        let source = Arc::new(ScriptedSource::new(
            vec![
                page(vec![1], Some("t"), None),
                page(vec![2], Some("t"), None),
                page(vec![3], Some("t"), None),
            ],
            31,
        ));
        let mut paginator =
            Paginator::new(source, date("2025-01-01"), date("2025-01-10"), 3).unwrap();

        let mut batches = 0;
        while let Some(_batch) = paginator.next_batch().await.unwrap() {
            batches += 1;
        }
        assert_eq!(batches, 3);
    }

    #[tokio::test]
    async fn source_error_aborts_iteration() {
        let source = Arc::new(ScriptedSource::new(vec![], 31));
        let mut paginator =
            Paginator::new(source, date("2025-01-01"), date("2025-01-10"), 100).unwrap();

        assert!(paginator.next_batch().await.is_err());
    }
}

//! The poll loop.
//!
//! Cycles through fetch, report, sleep. The only state carried between
//! iterations is the previous extraction result, owned by the loop and
//! replaced every cycle, so interrupting the process at any point
//! leaves nothing to corrupt.

use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};
use url::Url;

use crate::error::Result;
use crate::extract::Query;
use crate::fetch::PageFetcher;
use crate::notify::{render_diff, Notifier};

/// Drives fetch, extract, report and alert cycles for one URL.
pub struct Watcher {
    fetcher: PageFetcher,
    query: Query,
    notifier: Notifier,
    url: Url,
    interval: Option<Duration>,
    until_change: bool,
}

impl Watcher {
    #[must_use]
    pub fn new(
        fetcher: PageFetcher,
        query: Query,
        notifier: Notifier,
        url: Url,
        interval: Option<Duration>,
        until_change: bool,
    ) -> Self {
        Self {
            fetcher,
            query,
            notifier,
            url,
            interval,
            until_change,
        }
    }

    /// Runs to completion.
    ///
    /// Without an interval this is a single query whose transport
    /// failures surface to the caller. With an interval, per-cycle
    /// failures are logged as warnings and count as no-match, and the
    /// loop keeps polling until interrupted, or until the first change
    /// in until-change mode.
    pub fn run(&self) -> Result<()> {
        let mut current = match self.interval {
            Some(_) => self.poll_cycle(),
            None => self.fetch_and_extract()?,
        };
        self.report(current.as_deref());

        let Some(interval) = self.interval else {
            return Ok(());
        };

        loop {
            debug!("going to sleep for {} seconds", interval.as_secs());
            thread::sleep(interval);

            let previous = current;
            current = self.poll_cycle();
            self.report(current.as_deref());

            if is_change(previous.as_deref(), current.as_deref()) {
                self.notifier.alert();
                if self.query.whole_body {
                    if let (Some(before), Some(after)) = (previous.as_deref(), current.as_deref())
                    {
                        if !before.is_empty() && !after.is_empty() {
                            info!("{}", render_diff(before, after));
                        }
                    }
                }
                if self.until_change {
                    return Ok(());
                }
            }
        }
    }

    fn fetch_and_extract(&self) -> Result<Option<String>> {
        Ok(self
            .fetcher
            .fetch(&self.url)?
            .and_then(|body| self.query.extract(&body)))
    }

    /// One polling-mode cycle: failures are warnings, not errors.
    fn poll_cycle(&self) -> Option<String> {
        match self.fetch_and_extract() {
            Ok(result) => result,
            Err(err) => {
                warn!("{err}");
                None
            }
        }
    }

    fn report(&self, result: Option<&str>) {
        match result {
            None => warn!("no matches"),
            // A whole-body watch in until-change mode would dump entire
            // documents every cycle; the byte count is enough there.
            Some(body) if self.until_change && self.query.whole_body => {
                info!("{} bytes", body.len());
            }
            Some(text) => info!("{text}"),
        }
    }
}

/// A change is any transition between consecutive poll results, where
/// "no match" is an ordinary comparable value.
fn is_change(previous: Option<&str>, current: Option<&str>) -> bool {
    previous != current
}

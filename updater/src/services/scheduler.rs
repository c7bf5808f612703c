//! Daily trigger computed in zone-local civil time.

use chrono::{DateTime, LocalResult, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::future::Future;
use tracing::{error, info};

/// Upper bound on how far a DST gap can push a trigger forward.
const MAX_GAP_MINUTES: i64 = 3 * 60;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fires once a day at `at` local time in `tz`.
#[derive(Debug, Clone, Copy)]
pub struct DailySchedule {
    at: NaiveTime,
    tz: Tz,
}

impl DailySchedule {
    pub fn new(at: NaiveTime, tz: Tz) -> Self {
        Self { at, tz }
    }

    /// First trigger strictly after `now`.
    ///
    /// A trigger inside a DST gap moves to the first local minute after the
    /// gap; one inside a DST fold uses the earlier of the two instants.
    pub fn next_after(&self, now: DateTime<Utc>) -> Option<DateTime<Tz>> {
        let today = now.with_timezone(&self.tz).date_naive();
        today
            .iter_days()
            .take(3)
            .filter_map(|date| self.resolve(date.and_time(self.at)))
            .find(|trigger| trigger.with_timezone(&Utc) > now)
    }

    fn resolve(&self, local: NaiveDateTime) -> Option<DateTime<Tz>> {
        match self.tz.from_local_datetime(&local) {
            LocalResult::Single(trigger) => Some(trigger),
            LocalResult::Ambiguous(earliest, _) => Some(earliest),
            LocalResult::None => (1..=MAX_GAP_MINUTES).find_map(|minutes| {
                self.tz
                    .from_local_datetime(&(local + chrono::Duration::minutes(minutes)))
                    .earliest()
            }),
        }
    }
}

pub struct Scheduler<C = SystemClock> {
    schedule: DailySchedule,
    clock: C,
}

impl Scheduler<SystemClock> {
    pub fn new(schedule: DailySchedule) -> Self {
        Self::with_clock(schedule, SystemClock)
    }
}

impl<C: Clock> Scheduler<C> {
    pub fn with_clock(schedule: DailySchedule, clock: C) -> Self {
        Self { schedule, clock }
    }

    /// Runs `task` at every trigger until `shutdown` completes.
    ///
    /// Tasks run one at a time; a trigger is never computed at or before the
    /// previous one, even if the clock lags behind the timer.
    pub async fn run<F, Fut, S>(&self, mut task: F, shutdown: S)
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ()>,
        S: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut last_trigger: Option<DateTime<Utc>> = None;

        loop {
            let now = self.clock.now();
            let from = match last_trigger {
                Some(last) if last > now => last,
                _ => now,
            };

            let Some(next) = self.schedule.next_after(from) else {
                error!("No trigger time could be computed after {}, stopping scheduler", from);
                return;
            };
            let next_utc = next.with_timezone(&Utc);
            let wait = (next_utc - now).to_std().unwrap_or_default();
            info!("⏰ Next rate update at {} (in {:?})", next, wait);

            tokio::select! {
                _ = &mut shutdown => {
                    info!("Scheduler stopped");
                    return;
                }
                _ = tokio::time::sleep(wait) => {}
            }

            info!("⏰ Scheduled rate update for {}", next);
            task().await;
            last_trigger = Some(next_utc);
        }
    }
}

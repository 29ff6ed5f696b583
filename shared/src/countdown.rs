use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const SECONDS_IN_MINUTE: i64 = 60;
const SECONDS_IN_HOUR: i64 = 60 * SECONDS_IN_MINUTE;
const SECONDS_IN_DAY: i64 = 24 * SECONDS_IN_HOUR;

/// Time left until an event starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Countdown {
    /// `None` once `target` has passed.
    pub fn between(now: DateTime<Utc>, target: DateTime<Utc>) -> Option<Self> {
        let diff = (target - now).num_seconds();
        if target < now {
            return None;
        }

        Some(Self {
            days: diff / SECONDS_IN_DAY,
            hours: diff % SECONDS_IN_DAY / SECONDS_IN_HOUR,
            minutes: diff % SECONDS_IN_HOUR / SECONDS_IN_MINUTE,
            seconds: diff % SECONDS_IN_MINUTE,
        })
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}d {:02}h {:02}m {:02}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "remaining", rename_all = "snake_case")]
pub enum Tick {
    Remaining(Countdown),
    Started,
}

#[cfg(feature = "client")]
pub use ticker::*;

#[cfg(feature = "client")]
mod ticker {
    use std::time::Duration;

    use chrono::{DateTime, Utc};
    use tokio::sync::{mpsc, oneshot};
    use tracing::debug;

    use super::{Countdown, Tick};

    /// Receiving end of a running countdown. Dropping it stops the task.
    pub struct CountdownHandle {
        ticks: mpsc::Receiver<Tick>,
        cancel: Option<oneshot::Sender<()>>,
    }

    impl CountdownHandle {
        pub async fn next(&mut self) -> Option<Tick> {
            self.ticks.recv().await
        }

        /// Stops the task; ticks already buffered can still be drained.
        pub fn cancel(&mut self) {
            if let Some(cancel) = self.cancel.take() {
                let _ = cancel.send(());
            }
        }
    }

    pub struct CountdownTicker;

    impl CountdownTicker {
        /// Emits a tick every `period` until `target`, then a final
        /// [`Tick::Started`].
        pub fn spawn(target: DateTime<Utc>, period: Duration) -> CountdownHandle {
            let (sender, ticks) = mpsc::channel(1);
            let (cancel, mut cancelled) = oneshot::channel::<()>();

            tokio::spawn(async move {
                let mut interval = tokio::time::interval(period);
                loop {
                    tokio::select! {
                        biased;
                        _ = &mut cancelled => {
                            debug!("Countdown to {target} cancelled");
                            break;
                        }
                        _ = interval.tick() => {
                            let tick = Countdown::between(Utc::now(), target)
                                .map_or(Tick::Started, Tick::Remaining);
                            if sender.send(tick).await.is_err() || tick == Tick::Started {
                                break;
                            }
                        }
                    }
                }
            });

            CountdownHandle {
                ticks,
                cancel: Some(cancel),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    #[test]
    fn breakdown() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let target = now + Duration::days(3) + Duration::hours(4) + Duration::seconds(65);
        let countdown = Countdown::between(now, target).unwrap();

        assert_eq!(
            countdown,
            Countdown {
                days: 3,
                hours: 4,
                minutes: 1,
                seconds: 5
            }
        );
        assert_eq!(countdown.to_string(), "03d 04h 01m 05s");
    }

    #[test]
    fn passed_target_has_no_countdown() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

        assert!(Countdown::between(now, now - Duration::seconds(1)).is_none());
        assert_eq!(
            Countdown::between(now, now),
            Some(Countdown {
                days: 0,
                hours: 0,
                minutes: 0,
                seconds: 0
            })
        );
    }

    #[test]
    fn tick_serialization() {
        assert_eq!(
            serde_json::to_string(&Tick::Started).unwrap(),
            r#"{"state":"started"}"#
        );
    }

    #[cfg(feature = "client")]
    #[tokio::test]
    async fn ticker_stops_after_start() {
        let target = Utc::now() + Duration::milliseconds(1500);
        let mut handle = CountdownTicker::spawn(target, std::time::Duration::from_millis(500));

        let mut ticks = Vec::new();
        while let Some(tick) = handle.next().await {
            ticks.push(tick);
        }

        assert!(matches!(ticks.first(), Some(Tick::Remaining(_))));
        assert_eq!(ticks.last(), Some(&Tick::Started));
        assert_eq!(ticks.iter().filter(|t| **t == Tick::Started).count(), 1);
    }

    #[cfg(feature = "client")]
    #[tokio::test]
    async fn past_target_starts_immediately() {
        let mut handle =
            CountdownTicker::spawn(Utc::now() - Duration::hours(1), std::time::Duration::from_secs(1));

        assert_eq!(handle.next().await, Some(Tick::Started));
        assert_eq!(handle.next().await, None);
    }

    #[cfg(feature = "client")]
    #[tokio::test]
    async fn cancel_stops_the_task() {
        let mut handle = CountdownTicker::spawn(
            Utc::now() + Duration::days(1),
            std::time::Duration::from_millis(10),
        );
        assert!(matches!(handle.next().await, Some(Tick::Remaining(_))));

        handle.cancel();
        while let Some(tick) = handle.next().await {
            assert!(matches!(tick, Tick::Remaining(_)));
        }
    }
}

//! Periodic countdown timer abstraction driving the transmit cadence, plus
//! an `embassy-time` software rendition for soft-timer targets.
use futures_util::Future;

/// Contract for the periodic tick source.
///
/// `arm` loads the reload value and starts the countdown; expiry reloads
/// automatically, so the timer fires forever once armed. No stop operation
/// is exposed: shutdown only happens through external reset. Before `arm`
/// has run, `tick` must never resolve.
pub trait TickTimer {
    /// Start (or restart) the countdown with `reload_ticks` timer clocks
    /// per period. Re-arming with the same value must yield the same
    /// steady-state cadence.
    fn arm(&mut self, reload_ticks: u32);

    /// Wait for the next expiration.
    fn tick(&mut self) -> impl Future<Output = ()> + '_;
}

//==================================================================================SOFT_TICK_TIMER
/// [`TickTimer`] backed by [`embassy_time::Ticker`].
///
/// Software rendition of the hardware countdown: the reload value is
/// converted to wall-clock time through the configured core frequency.
/// Suitable for targets without a spare hardware timer and for hosted runs.
pub struct SoftTickTimer {
    cpu_hz: u32,
    ticker: Option<embassy_time::Ticker>,
}

impl SoftTickTimer {
    /// Adapter for a core running at `cpu_hz`.
    pub const fn new(cpu_hz: u32) -> Self {
        Self { cpu_hz, ticker: None }
    }

    fn period(&self, reload_ticks: u32) -> embassy_time::Duration {
        // Integer microseconds; the degenerate reload of one clock lands on
        // the shortest period the time driver can represent.
        let micros = (reload_ticks as u64).saturating_mul(1_000_000) / self.cpu_hz.max(1) as u64;
        embassy_time::Duration::from_micros(micros.max(1))
    }
}

impl TickTimer for SoftTickTimer {
    fn arm(&mut self, reload_ticks: u32) {
        self.ticker = Some(embassy_time::Ticker::every(self.period(reload_ticks)));
    }

    fn tick(&mut self) -> impl Future<Output = ()> + '_ {
        async move {
            match self.ticker.as_mut() {
                Some(ticker) => ticker.next().await,
                // Unarmed: never fires.
                None => core::future::pending::<()>().await,
            }
        }
    }
}

use chrono::{DateTime, Local};

/// Represents an entity responsible for providing the current local time. Checks ask it for
/// "now" so that date boundaries can be tested without touching the system clock.
pub trait Clock: Sync + Send + 'static {
    fn time(&self) -> DateTime<Local>;
}

pub struct DefaultClock;

impl Clock for DefaultClock {
    fn time(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock frozen at a single moment.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn time(&self) -> DateTime<Local> {
        self.0
    }
}

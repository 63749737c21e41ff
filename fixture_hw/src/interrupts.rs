use crate::MAINTENANCE_INTERVAL;
use serde::Serialize;
use strum_macros::{Display, EnumIter};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumIter, Serialize)]
pub enum Interrupt {
    Timer,
    IoComplete,
    Error,
}

/// Timer bookkeeping and interrupt counters. Port-level interrupts are kept
/// on the ports themselves.
#[derive(Clone, Debug, Default)]
pub struct InterruptController {
    timer_pending: bool,
    timer_ticks: u32,
    system_time: u32,
    watchdog_resets: u32,
    maintenance_runs: u32,
    serviced: [u64; 3],
}

impl InterruptController {
    pub fn raise_timer(&mut self) {
        self.timer_pending = true;
    }

    /// Clears and returns the pending timer interrupt.
    pub fn take_timer(&mut self) -> bool {
        std::mem::take(&mut self.timer_pending)
    }

    /// Counts one timer interrupt. Returns `true` when maintenance is due.
    pub fn tick_timer(&mut self) -> bool {
        self.timer_ticks += 1;
        let due = self.timer_ticks % MAINTENANCE_INTERVAL == 0;
        if due {
            self.maintenance_runs += 1;
        }
        due
    }

    /// Advances system time. Returns `true` when the watchdog must be fed.
    pub fn tick_system_time(&mut self, watchdog_timeout: u32) -> bool {
        self.system_time += 1;
        let due = watchdog_timeout != 0 && self.system_time % watchdog_timeout == 0;
        if due {
            self.watchdog_resets += 1;
        }
        due
    }

    pub fn record(&mut self, irq: Interrupt) {
        self.serviced[irq as usize] += 1;
    }

    pub fn serviced(&self, irq: Interrupt) -> u64 {
        self.serviced[irq as usize]
    }

    pub fn timer_ticks(&self) -> u32 {
        self.timer_ticks
    }

    pub fn system_time(&self) -> u32 {
        self.system_time
    }

    pub fn watchdog_resets(&self) -> u32 {
        self.watchdog_resets
    }

    pub fn maintenance_runs(&self) -> u32 {
        self.maintenance_runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maintenance_every_interval() {
        let mut irq = InterruptController::default();
        let due = (0..250).filter(|_| irq.tick_timer()).count();
        assert_eq!(due, 2);
        assert_eq!(irq.maintenance_runs(), 2);
    }

    #[test]
    fn test_watchdog() {
        let mut irq = InterruptController::default();
        assert_eq!((0..30).filter(|_| irq.tick_system_time(10)).count(), 3);
        // A zero timeout disables the watchdog.
        assert!(!(0..30).any(|_| irq.tick_system_time(0)));
        assert_eq!(irq.system_time(), 60);
    }

    #[test]
    fn test_timer_pending_is_taken_once() {
        let mut irq = InterruptController::default();
        assert!(!irq.take_timer());
        irq.raise_timer();
        assert!(irq.take_timer());
        assert!(!irq.take_timer());
    }
}

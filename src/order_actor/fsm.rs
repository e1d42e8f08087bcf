//! The delivery state machine.
//!
//! ```text
//! SearchingCaptain --5s--> CaptainAssigned --3s--> EnRoute --10s--> Arrived --4s--> Fuelling --6s--> Completed
//!        \___________________________ Cancel (any non-terminal state) ___________________________/--> Cancelled
//! ```
//!
//! [`step`] is pure: it says where an order goes next, what must happen on the way
//! ([`Effect`]) and which timer to arm afterwards ([`Scheduled`]). The actor does the rest.

use crate::model::OrderStatus;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderEvent {
    /// The current status has lasted its full dwell time.
    DwellElapsed,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Fabricate the delivery captain and the one-time handover code.
    AssignCaptain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled {
    pub after: Duration,
    pub event: OrderEvent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: OrderStatus,
    pub to: OrderStatus,
    pub effect: Option<Effect>,
    pub schedule: Option<Scheduled>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{event:?} is not allowed once an order is {status}")]
pub struct FsmError {
    pub status: OrderStatus,
    pub event: OrderEvent,
}

/// How long an order stays in `status` before moving on by itself.
pub fn dwell(status: OrderStatus) -> Option<Duration> {
    let secs = match status {
        OrderStatus::SearchingCaptain => 5,
        OrderStatus::CaptainAssigned => 3,
        OrderStatus::EnRoute => 10,
        OrderStatus::Arrived => 4,
        OrderStatus::Fuelling => 6,
        OrderStatus::Completed | OrderStatus::Cancelled => return None,
    };
    Some(Duration::from_secs(secs))
}

fn successor(status: OrderStatus) -> Option<OrderStatus> {
    match status {
        OrderStatus::SearchingCaptain => Some(OrderStatus::CaptainAssigned),
        OrderStatus::CaptainAssigned => Some(OrderStatus::EnRoute),
        OrderStatus::EnRoute => Some(OrderStatus::Arrived),
        OrderStatus::Arrived => Some(OrderStatus::Fuelling),
        OrderStatus::Fuelling => Some(OrderStatus::Completed),
        OrderStatus::Completed | OrderStatus::Cancelled => None,
    }
}

/// The timer to arm when an order in `status` starts being tracked.
pub fn entry_schedule(status: OrderStatus) -> Option<Scheduled> {
    dwell(status).map(|after| Scheduled {
        after,
        event: OrderEvent::DwellElapsed,
    })
}

pub fn step(status: OrderStatus, event: OrderEvent) -> Result<Transition, FsmError> {
    let rejected = FsmError { status, event };
    let to = match event {
        OrderEvent::DwellElapsed => successor(status).ok_or(rejected)?,
        OrderEvent::Cancel if status.is_terminal() => return Err(rejected),
        OrderEvent::Cancel => OrderStatus::Cancelled,
    };
    Ok(Transition {
        from: status,
        to,
        effect: (to == OrderStatus::CaptainAssigned).then_some(Effect::AssignCaptain),
        schedule: entry_schedule(to),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dwell_chain_reaches_completed_in_28_seconds() {
        let mut status = OrderStatus::SearchingCaptain;
        let mut elapsed = Duration::ZERO;
        let mut path = vec![status];

        while let Some(next) = entry_schedule(status) {
            elapsed += next.after;
            status = step(status, next.event).unwrap().to;
            path.push(status);
        }

        assert_eq!(
            path,
            vec![
                OrderStatus::SearchingCaptain,
                OrderStatus::CaptainAssigned,
                OrderStatus::EnRoute,
                OrderStatus::Arrived,
                OrderStatus::Fuelling,
                OrderStatus::Completed,
            ]
        );
        assert_eq!(elapsed, Duration::from_secs(28));
    }

    #[test]
    fn only_captain_assignment_has_an_effect() {
        let t = step(OrderStatus::SearchingCaptain, OrderEvent::DwellElapsed).unwrap();
        assert_eq!(t.effect, Some(Effect::AssignCaptain));
        assert_eq!(
            t.schedule,
            Some(Scheduled {
                after: Duration::from_secs(3),
                event: OrderEvent::DwellElapsed
            })
        );

        let t = step(OrderStatus::Arrived, OrderEvent::DwellElapsed).unwrap();
        assert_eq!(t.to, OrderStatus::Fuelling);
        assert_eq!(t.effect, None);
    }

    #[test]
    fn cancel_is_terminal_and_unschedules() {
        let t = step(OrderStatus::EnRoute, OrderEvent::Cancel).unwrap();
        assert_eq!(t.to, OrderStatus::Cancelled);
        assert_eq!(t.schedule, None);
    }

    #[test]
    fn terminal_statuses_reject_every_event() {
        for status in [OrderStatus::Completed, OrderStatus::Cancelled] {
            for event in [OrderEvent::DwellElapsed, OrderEvent::Cancel] {
                assert_eq!(step(status, event), Err(FsmError { status, event }));
            }
            assert_eq!(entry_schedule(status), None);
        }
    }
}

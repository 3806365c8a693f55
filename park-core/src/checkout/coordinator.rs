use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use super::gateway::CheckoutGateway;
use super::outcome::CheckoutOutcome;
use crate::models::BookingId;

/// Runs checkouts through a gateway, at most one per booking at a time.
///
/// A repeated checkout of a booking whose request is still unresolved
/// returns [`CheckoutOutcome::AlreadyInFlight`] and sends nothing. The
/// booking becomes available again as soon as the first attempt finishes,
/// however it finishes.
pub struct CheckoutCoordinator {
    gateway: Box<dyn CheckoutGateway>,
    in_flight: Mutex<HashSet<BookingId>>,
}

impl CheckoutCoordinator {
    pub fn new(gateway: Box<dyn CheckoutGateway>) -> Self {
        Self {
            gateway,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    pub fn is_in_flight(
        &self,
        booking_id: BookingId,
    ) -> bool {
        self.lock().contains(&booking_id)
    }

    pub async fn end_booking(
        &self,
        booking_id: BookingId,
    ) -> CheckoutOutcome {
        let Some(_guard) = self.claim(booking_id) else {
            info!(%booking_id, "checkout already in progress, ignoring");
            return CheckoutOutcome::AlreadyInFlight;
        };

        debug!(%booking_id, "ending booking");
        CheckoutOutcome::from_result(self.gateway.end_booking(booking_id).await)
    }

    fn claim(
        &self,
        booking_id: BookingId,
    ) -> Option<InFlightGuard<'_>> {
        let claimed = self.lock().insert(booking_id);
        claimed.then(|| InFlightGuard {
            set: &self.in_flight,
            booking_id,
        })
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<BookingId>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Releases a booking id when the checkout holding it completes or is dropped.
struct InFlightGuard<'a> {
    set: &'a Mutex<HashSet<BookingId>>,
    booking_id: BookingId,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.set
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.booking_id);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tokio::sync::Notify;

    use super::*;
    use crate::checkout::CheckoutError;
    use crate::models::CheckoutResponse;

    /// Gateway that counts requests and holds each one until released.
    struct HeldGateway {
        calls: Arc<AtomicUsize>,
        release: Arc<Notify>,
    }

    #[async_trait]
    impl CheckoutGateway for HeldGateway {
        async fn end_booking(
            &self,
            _booking_id: BookingId,
        ) -> Result<CheckoutResponse, CheckoutError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.release.notified().await;
            Ok(CheckoutResponse {
                status: "success".to_string(),
                total_cost: Some(dec!(40)),
            })
        }
    }

    struct FailingGateway;

    #[async_trait]
    impl CheckoutGateway for FailingGateway {
        async fn end_booking(
            &self,
            _booking_id: BookingId,
        ) -> Result<CheckoutResponse, CheckoutError> {
            Err(CheckoutError::Transport("connection refused".to_string()))
        }
    }

    fn held() -> (CheckoutCoordinator, Arc<AtomicUsize>, Arc<Notify>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let release = Arc::new(Notify::new());
        let coordinator = CheckoutCoordinator::new(Box::new(HeldGateway {
            calls: calls.clone(),
            release: release.clone(),
        }));
        (coordinator, calls, release)
    }

    #[tokio::test]
    async fn second_click_while_pending_sends_nothing() {
        let (coordinator, calls, release) = held();
        let id = BookingId(7);

        let (first, second) = tokio::join!(coordinator.end_booking(id), async {
            while calls.load(Ordering::SeqCst) == 0 {
                tokio::task::yield_now().await;
            }
            let second = coordinator.end_booking(id).await;
            assert!(coordinator.is_in_flight(id), "rejected click must not release the claim");
            release.notify_one();
            second
        });

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(first, CheckoutOutcome::Completed { total_cost: Some(dec!(40)) });
        assert_eq!(second, CheckoutOutcome::AlreadyInFlight);
    }

    #[tokio::test]
    async fn booking_is_released_after_completion() {
        let (coordinator, calls, release) = held();
        let id = BookingId(3);

        release.notify_one();
        coordinator.end_booking(id).await;
        assert!(!coordinator.is_in_flight(id));

        release.notify_one();
        let again = coordinator.end_booking(id).await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(again.is_success());
    }

    #[tokio::test]
    async fn different_bookings_do_not_block_each_other() {
        let (coordinator, calls, release) = held();

        let (a, b) = tokio::join!(coordinator.end_booking(BookingId(1)), async {
            let b = coordinator.end_booking(BookingId(2));
            tokio::pin!(b);
            // Both requests must be in the gateway before either is released.
            loop {
                tokio::select! {
                    out = &mut b => break out,
                    _ = tokio::task::yield_now() => {
                        if calls.load(Ordering::SeqCst) == 2 {
                            release.notify_waiters();
                        }
                    }
                }
            }
        });

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(a.is_success());
        assert!(b.is_success());
    }

    #[tokio::test]
    async fn failed_checkout_releases_booking() {
        let coordinator = CheckoutCoordinator::new(Box::new(FailingGateway));
        let id = BookingId(9);

        let outcome = coordinator.end_booking(id).await;

        assert_eq!(
            outcome,
            CheckoutOutcome::Failed(CheckoutError::Transport("connection refused".to_string()))
        );
        assert!(!coordinator.is_in_flight(id));
    }

    #[tokio::test]
    async fn dropped_checkout_releases_booking() {
        let (coordinator, _calls, _release) = held();
        let id = BookingId(5);

        {
            let pending = coordinator.end_booking(id);
            tokio::pin!(pending);
            let polled = tokio::time::timeout(std::time::Duration::from_millis(10), &mut pending).await;
            assert!(polled.is_err());
            assert!(coordinator.is_in_flight(id));
        }

        assert!(!coordinator.is_in_flight(id));
    }
}

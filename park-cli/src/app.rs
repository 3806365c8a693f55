//! Command handlers behind the `parkwise` binary.
//!
//! Handlers take their inputs and output sinks as parameters so they can be
//! driven from tests without a terminal or a live server.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use chrono::{DateTime, Utc};
use park_core::calculations::{COUNTER_TICK, CountUp, estimate_range, recommend_best_slot, scored_slots};
use park_core::checkout::{CHECKOUT_CONFIRM_PROMPT, CheckoutCoordinator, CheckoutOutcome, GatewayRegistry};
use park_core::notify::ToastSlot;
use park_core::{Booking, BookingId, ParkingSlot, Rate, SlotSummary, TimeRange};
use park_http::HttpGatewayFactory;
use tracing::info;

use crate::form::EstimateView;
use crate::toast;

const HISTORY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Registry with every checkout backend this binary ships.
pub fn build_registry() -> GatewayRegistry {
    let mut registry = GatewayRegistry::new();
    registry.register(Box::new(HttpGatewayFactory));
    registry
}

/// Asks `prompt` and reads one answer line; only `y`/`yes` confirm.
/// End of input counts as no.
pub fn confirm<R: BufRead, W: Write>(
    prompt: &str,
    input: &mut R,
    output: &mut W,
) -> io::Result<bool> {
    write!(output, "{prompt} [y/N] ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

/// Confirms and runs one checkout, showing the resulting toast.
///
/// Returns `None` when the user declined and nothing was sent.
pub async fn run_checkout<R: BufRead, W: Write>(
    coordinator: &CheckoutCoordinator,
    booking_id: BookingId,
    currency_symbol: &str,
    skip_confirm: bool,
    input: &mut R,
    output: &mut W,
    ansi: bool,
) -> io::Result<Option<CheckoutOutcome>> {
    if !skip_confirm && !confirm(CHECKOUT_CONFIRM_PROMPT, input, output)? {
        info!(%booking_id, "checkout cancelled by user");
        return Ok(None);
    }

    let outcome = coordinator.end_booking(booking_id).await;
    let mut slot = ToastSlot::new();
    toast::show(&mut slot, outcome.notification(currency_symbol), output, ansi)?;

    if let Some(delay) = outcome.refresh_after() {
        info!(delay_ms = delay.as_millis() as u64, "view refresh scheduled");
    }
    toast::linger(&mut slot, output, ansi).await?;
    Ok(Some(outcome))
}

/// Process exit status for a checkout run: `1` when a confirmed checkout
/// did not complete, `0` otherwise (including a declined prompt).
pub fn checkout_exit_status(outcome: Option<&CheckoutOutcome>) -> u8 {
    match outcome {
        Some(o) if !o.is_success() => 1,
        _ => 0,
    }
}

/// The three dashboard stat counters, animated together.
#[derive(Debug, Clone)]
pub struct DashboardCounters {
    counters: Vec<(&'static str, CountUp)>,
}

impl DashboardCounters {
    pub fn new(summary: &SlotSummary) -> Self {
        let target = |n: usize| i64::try_from(n).unwrap_or(i64::MAX);
        Self {
            counters: vec![
                ("Total", CountUp::new(target(summary.total))),
                ("Occupied", CountUp::new(target(summary.occupied))),
                ("Available", CountUp::new(target(summary.available))),
            ],
        }
    }

    fn line(&self) -> String {
        self.counters
            .iter()
            .map(|(label, c)| format!("{label}: {}", c.current()))
            .collect::<Vec<_>>()
            .join("  ")
    }

    /// Advances every running counter one tick; `None` once all are done.
    pub fn tick(&mut self) -> Option<String> {
        let mut advanced = false;
        for (_, counter) in &mut self.counters {
            advanced |= counter.tick().is_some();
        }
        advanced.then(|| self.line())
    }

    /// Line with every counter at its target.
    pub fn final_line(&self) -> String {
        self.counters
            .iter()
            .map(|(label, c)| format!("{label}: {}", c.target()))
            .collect::<Vec<_>>()
            .join("  ")
    }
}

/// Writes the dashboard counters. With `animate`, every frame is drawn over
/// the previous one, `tick` apart; otherwise only the final values.
pub async fn render_dashboard<W: Write>(
    summary: &SlotSummary,
    animate: bool,
    tick: Duration,
    out: &mut W,
) -> io::Result<()> {
    let mut counters = DashboardCounters::new(summary);
    if !animate {
        return writeln!(out, "{}", counters.final_line());
    }

    while let Some(frame) = counters.tick() {
        write!(out, "\r{frame}")?;
        out.flush()?;
        tokio::time::sleep(tick).await;
    }
    writeln!(out)
}

/// Animates one counter whose raw target came from page text.
pub async fn render_counter<W: Write>(
    target: i64,
    animate: bool,
    out: &mut W,
) -> io::Result<()> {
    if !animate {
        return writeln!(out, "{target}");
    }
    for value in CountUp::new(target) {
        write!(out, "\r{value}")?;
        out.flush()?;
        tokio::time::sleep(COUNTER_TICK).await;
    }
    writeln!(out)
}

/// Slot recommendation as display lines: every slot with its score when
/// `all` is set, then the best slot.
pub fn recommendation_lines(
    slots: &[ParkingSlot],
    now: DateTime<Utc>,
    all: bool,
) -> Vec<String> {
    let mut lines: Vec<String> = if all {
        scored_slots(slots, now)
            .into_iter()
            .map(|(s, score)| {
                let state = if s.is_occupied { "occupied" } else { "free" };
                format!("{} zone {} {state} score {score}", s.slot_number, s.zone)
            })
            .collect()
    } else {
        Vec::new()
    };

    lines.push(match recommend_best_slot(slots, now) {
        Some(best) => format!("Recommended: {} (zone {})", best.slot_number, best.zone),
        None => "No slots to recommend.".to_string(),
    });
    lines
}

/// One display line per booking: who, where, when, and what it costs at
/// `rate`. Active bookings have no end and no estimate yet.
pub fn history_lines(
    bookings: &[Booking],
    rate: Rate,
    currency_symbol: &str,
) -> Vec<String> {
    bookings
        .iter()
        .map(|b| {
            let start = b.start_time.format(HISTORY_TIME_FORMAT);
            let Some(end_time) = b.end_time else {
                return format!(
                    "#{} {} slot {} {} → active",
                    b.id, b.user_name, b.slot_id, start
                );
            };
            let estimate = TimeRange::new(b.start_time, end_time).and_then(|r| estimate_range(&r, rate));
            let view = EstimateView::from_estimate(estimate.as_ref(), currency_symbol);
            format!(
                "#{} {} slot {} {} → {} {} {}",
                b.id,
                b.user_name,
                b.slot_id,
                start,
                end_time.format(HISTORY_TIME_FORMAT),
                view.price,
                view.duration
            )
            .trim_end()
            .to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use park_core::checkout::CheckoutGateway;
    use park_core::{CheckoutError, CheckoutResponse, parse_instant};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    struct FixedGateway(Result<CheckoutResponse, CheckoutError>);

    #[async_trait]
    impl CheckoutGateway for FixedGateway {
        async fn end_booking(
            &self,
            _booking_id: BookingId,
        ) -> Result<CheckoutResponse, CheckoutError> {
            self.0.clone()
        }
    }

    fn coordinator(result: Result<CheckoutResponse, CheckoutError>) -> CheckoutCoordinator {
        CheckoutCoordinator::new(Box::new(FixedGateway(result)))
    }

    fn success(total: rust_decimal::Decimal) -> Result<CheckoutResponse, CheckoutError> {
        Ok(CheckoutResponse {
            status: "success".to_string(),
            total_cost: Some(total),
        })
    }

    // =========================================================================
    // confirm
    // =========================================================================

    #[test]
    fn confirm_accepts_yes() {
        let mut out = Vec::new();

        assert!(confirm("Go?", &mut "y\n".as_bytes(), &mut out).unwrap());
        assert!(confirm("Go?", &mut " YES \n".as_bytes(), &mut out).unwrap());
    }

    #[test]
    fn confirm_defaults_to_no() {
        let mut out = Vec::new();

        assert!(!confirm("Go?", &mut "\n".as_bytes(), &mut out).unwrap());
        assert!(!confirm("Go?", &mut "".as_bytes(), &mut out).unwrap());
        assert!(!confirm("Go?", &mut "nope\n".as_bytes(), &mut out).unwrap());
    }

    #[test]
    fn confirm_writes_prompt() {
        let mut out = Vec::new();

        confirm(CHECKOUT_CONFIRM_PROMPT, &mut "n\n".as_bytes(), &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Check out now and end this parking session? [y/N] "
        );
    }

    // =========================================================================
    // run_checkout
    // =========================================================================

    #[tokio::test]
    async fn declined_checkout_sends_nothing() {
        let coordinator = coordinator(Err(CheckoutError::Transport("unused".to_string())));
        let mut out = Vec::new();

        let outcome = run_checkout(
            &coordinator,
            BookingId(1),
            "₹",
            false,
            &mut "n\n".as_bytes(),
            &mut out,
            false,
        )
        .await
        .unwrap();

        assert_eq!(outcome, None);
    }

    #[tokio::test]
    async fn confirmed_checkout_prints_total() {
        let coordinator = coordinator(success(dec!(120.50)));
        let mut out = Vec::new();

        let outcome = run_checkout(
            &coordinator,
            BookingId(12),
            "₹",
            true,
            &mut "".as_bytes(),
            &mut out,
            false,
        )
        .await
        .unwrap();

        assert!(outcome.is_some_and(|o| o.is_success()));
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[success] ✅ Checked out! Total: ₹120.50\n"
        );
    }

    #[tokio::test]
    async fn failed_checkout_prints_network_error() {
        let coordinator = coordinator(Err(CheckoutError::Transport("refused".to_string())));
        let mut out = Vec::new();

        run_checkout(
            &coordinator,
            BookingId(2),
            "₹",
            true,
            &mut "".as_bytes(),
            &mut out,
            false,
        )
        .await
        .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "[error] ❌ Network error.\n");
    }

    #[test]
    fn exit_status_fails_only_when_confirmed_checkout_does_not_complete() {
        let rejected = CheckoutOutcome::Rejected {
            status: "error".to_string(),
        };
        let failed = CheckoutOutcome::Failed(CheckoutError::Transport("refused".to_string()));
        let completed = CheckoutOutcome::Completed { total_cost: None };

        assert_eq!(checkout_exit_status(None), 0);
        assert_eq!(checkout_exit_status(Some(&completed)), 0);
        assert_eq!(checkout_exit_status(Some(&rejected)), 1);
        assert_eq!(checkout_exit_status(Some(&failed)), 1);
        assert_eq!(checkout_exit_status(Some(&CheckoutOutcome::AlreadyInFlight)), 1);
    }

    // =========================================================================
    // recommend
    // =========================================================================

    fn parking_slot(
        id: i64,
        zone: &str,
        occupied_since: Option<&str>,
    ) -> ParkingSlot {
        ParkingSlot {
            id,
            slot_number: format!("{zone}-0{id}"),
            zone: zone.to_string(),
            is_occupied: occupied_since.is_some(),
            last_occupied_time: occupied_since.and_then(parse_instant),
        }
    }

    #[test]
    fn recommendation_lists_scores_then_best() {
        let now = parse_instant("2024-01-01T12:00").unwrap();
        let slots = vec![
            parking_slot(1, "A", Some("2024-01-01T11:50")),
            parking_slot(2, "B", None),
            parking_slot(3, "A", Some("2024-01-01T11:00")),
        ];

        let lines = recommendation_lines(&slots, now, true);

        assert_eq!(
            lines,
            vec![
                "A-01 zone A occupied score 100".to_string(),
                "B-02 zone B free score 120".to_string(),
                "A-03 zone A occupied score 130".to_string(),
                "Recommended: A-03 (zone A)".to_string(),
            ]
        );
    }

    #[test]
    fn recommendation_without_slots() {
        let now = parse_instant("2024-01-01T12:00").unwrap();

        assert_eq!(
            recommendation_lines(&[], now, false),
            vec!["No slots to recommend.".to_string()]
        );
    }

    // =========================================================================
    // dashboard
    // =========================================================================

    #[test]
    fn dashboard_counters_finish_together_at_targets() {
        let summary = SlotSummary {
            total: 60,
            occupied: 45,
            available: 15,
        };
        let mut counters = DashboardCounters::new(&summary);

        let frames: Vec<String> = std::iter::from_fn(|| counters.tick()).collect();

        assert_eq!(frames.first().unwrap(), "Total: 2  Occupied: 2  Available: 1");
        assert_eq!(frames.last().unwrap(), "Total: 60  Occupied: 45  Available: 15");
        assert_eq!(frames.len(), 30);
    }

    #[tokio::test]
    async fn dashboard_without_animation_prints_final_values() {
        let summary = SlotSummary {
            total: 8,
            occupied: 3,
            available: 5,
        };
        let mut out = Vec::new();

        render_dashboard(&summary, false, Duration::ZERO, &mut out)
            .await
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Total: 8  Occupied: 3  Available: 5\n"
        );
    }

    #[tokio::test]
    async fn animated_dashboard_ends_on_final_frame() {
        let summary = SlotSummary {
            total: 2,
            occupied: 1,
            available: 1,
        };
        let mut out = Vec::new();

        render_dashboard(&summary, true, Duration::ZERO, &mut out)
            .await
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\rTotal: 1  Occupied: 1  Available: 1\rTotal: 2  Occupied: 1  Available: 1\n"
        );
    }

    // =========================================================================
    // history
    // =========================================================================

    fn booking(
        id: i64,
        start: &str,
        end: Option<&str>,
    ) -> Booking {
        Booking {
            id: BookingId(id),
            slot_id: 4,
            user_name: "asha".to_string(),
            start_time: parse_instant(start).unwrap(),
            end_time: end.and_then(parse_instant),
        }
    }

    #[test]
    fn history_shows_estimate_for_finished_bookings() {
        let bookings = vec![
            booking(1, "2024-01-01T10:00", Some("2024-01-01T12:30")),
            booking(2, "2024-01-02T08:00", None),
        ];

        let lines = history_lines(&bookings, Rate::new(dec!(20)), "₹");

        assert_eq!(
            lines,
            vec![
                "#1 asha slot 4 2024-01-01 10:00 → 2024-01-01 12:30 ₹50.00 2h 30m".to_string(),
                "#2 asha slot 4 2024-01-02 08:00 → active".to_string(),
            ]
        );
    }

    #[test]
    fn history_shows_placeholder_for_reversed_range() {
        let bookings = vec![booking(3, "2024-01-01T12:00", Some("2024-01-01T10:00"))];

        let lines = history_lines(&bookings, Rate::new(dec!(20)), "₹");

        assert_eq!(
            lines,
            vec!["#3 asha slot 4 2024-01-01 12:00 → 2024-01-01 10:00 —".to_string()]
        );
    }
}

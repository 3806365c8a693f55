//! Booking form adapter.
//!
//! Holds the raw field values exactly as typed and turns them into the two
//! strings the page shows. All arithmetic lives in `park_core`.

use park_core::calculations::{PLACEHOLDER, estimate, format_currency};
use park_core::{Estimate, Rate};

/// Raw values of the booking form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingForm {
    pub start_time: String,
    pub end_time: String,
    /// Raw `data-rate` value; see [`Rate::parse`].
    pub rate: Option<String>,
}

/// What the estimate area of the form displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimateView {
    /// Formatted cost, or the placeholder when there is no estimate.
    pub price: String,
    /// Duration label, or empty when there is no estimate.
    pub duration: String,
}

impl EstimateView {
    pub fn empty() -> Self {
        Self {
            price: PLACEHOLDER.to_string(),
            duration: String::new(),
        }
    }

    pub fn from_estimate(
        estimate: Option<&Estimate>,
        currency_symbol: &str,
    ) -> Self {
        match estimate {
            Some(e) => Self {
                price: format_currency(currency_symbol, e.cost),
                duration: e.duration_label.clone(),
            },
            None => Self::empty(),
        }
    }
}

impl BookingForm {
    pub fn new(
        start_time: impl Into<String>,
        end_time: impl Into<String>,
        rate: Option<String>,
    ) -> Self {
        Self {
            start_time: start_time.into(),
            end_time: end_time.into(),
            rate,
        }
    }

    pub fn rate(&self) -> Rate {
        Rate::parse(self.rate.as_deref())
    }

    pub fn estimate(&self) -> Option<Estimate> {
        estimate(&self.start_time, &self.end_time, self.rate())
    }

    /// Re-evaluates the form after a field change.
    pub fn view(
        &self,
        currency_symbol: &str,
    ) -> EstimateView {
        EstimateView::from_estimate(self.estimate().as_ref(), currency_symbol)
    }
}

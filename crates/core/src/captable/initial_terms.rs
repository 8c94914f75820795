//! Founders-round pricing triangle.
//!
//! Shares, valuation, and price per share are tied by
//! `valuation = shares * price_per_share`. Each edit sets exactly one of the
//! three; [`resolve_initial_terms`] derives the others.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::constants::PRICE_DECIMAL_PRECISION;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct InitialTerms {
    pub shares: Decimal,
    pub valuation: Decimal,
    pub price_per_share: Decimal,
}

/// The single value explicitly set by an edit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum InitialTermsEdit {
    Shares(Decimal),
    Valuation(Decimal),
    PricePerShare(Decimal),
}

/// Applies one edit to the triangle and derives the dependent values.
///
/// Shares and valuation are whole numbers; price per share keeps
/// [`PRICE_DECIMAL_PRECISION`] places. Negative inputs clamp to zero. A
/// dependent value is only re-derived when its baseline is positive, so
/// clearing shares never wipes out a price the user already entered.
pub fn resolve_initial_terms(current: InitialTerms, edit: InitialTermsEdit) -> InitialTerms {
    match edit {
        InitialTermsEdit::Shares(shares) => {
            let shares = whole(shares);
            let valuation = if current.price_per_share > Decimal::ZERO {
                whole(shares.saturating_mul(current.price_per_share))
            } else {
                current.valuation
            };
            InitialTerms {
                shares,
                valuation,
                price_per_share: current.price_per_share,
            }
        }
        InitialTermsEdit::Valuation(valuation) => {
            let valuation = whole(valuation);
            let price_per_share = match valuation.checked_div(current.shares) {
                Some(ratio) if current.shares > Decimal::ZERO => price(ratio),
                _ => current.price_per_share,
            };
            InitialTerms {
                shares: current.shares,
                valuation,
                price_per_share,
            }
        }
        InitialTermsEdit::PricePerShare(price_per_share) => {
            let price_per_share = price(price_per_share);
            let valuation = if current.shares > Decimal::ZERO {
                whole(current.shares.saturating_mul(price_per_share))
            } else {
                current.valuation
            };
            InitialTerms {
                shares: current.shares,
                valuation,
                price_per_share,
            }
        }
    }
}

fn whole(value: Decimal) -> Decimal {
    value
        .max(Decimal::ZERO)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

fn price(value: Decimal) -> Decimal {
    value
        .max(Decimal::ZERO)
        .round_dp_with_strategy(PRICE_DECIMAL_PRECISION, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}

use crate::captable::{
    CalculatedCapTable, CalculatedRound, CapTableEntry, CapTableState, FundingRound, RoundPricing,
};
use crate::constants::{
    INITIAL_ROUND_ID, INITIAL_ROUND_NAME, LEGACY_FOUNDERS_ID, LEGACY_FOUNDERS_NAME,
    SHARE_DISCREPANCY_TOLERANCE,
};

use log::{debug, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Tunables for the cap table calculator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorConfig {
    /// Gap between a round's running share total and its entry sum that is
    /// reported as a discrepancy.
    pub share_discrepancy_tolerance: Decimal,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            share_discrepancy_tolerance: SHARE_DISCREPANCY_TOLERANCE,
        }
    }
}

/// Price, issuance, and valuation produced by one funding round.
#[derive(Debug, Clone, Copy, PartialEq)]
struct RoundIssuance {
    price_per_share: Decimal,
    new_shares: Decimal,
    post_money_valuation: Decimal,
}

/// Calculates the cap table with the default [`CalculatorConfig`].
pub fn calculate_cap_table(state: &CapTableState) -> CalculatedCapTable {
    calculate_cap_table_with(state, &CalculatorConfig::default())
}

/// Walks the funding rounds in order and produces one ownership snapshot per
/// round, preceded by the founders round.
///
/// This never fails. Zero valuations, zero prior shares, zero issuance and
/// zero investment all yield zero-filled prices and shares, logged as warnings.
/// The input is never mutated; every call builds a fresh table.
///
/// Each round reports two share counts. `total_shares` is the running total
/// that valuation math is based on; `allocated_shares` is the sum of the
/// round's entries and is the denominator for ownership percentages, so the
/// percentages always add up to 100 against what is actually listed.
pub fn calculate_cap_table_with(
    state: &CapTableState,
    config: &CalculatorConfig,
) -> CalculatedCapTable {
    let founders_shares = state.founders_shares();
    let mut rounds = Vec::with_capacity(state.funding_rounds.len() + 1);
    rounds.push(build_initial_round(state, founders_shares));

    let mut current_total_shares = founders_shares;

    for round in &state.funding_rounds {
        let previous_round = &rounds[rounds.len() - 1];
        let previous_total_shares = current_total_shares;

        debug!(
            "Calculating round '{}' ({}): method={}, previous total shares={}, investors={}",
            round.name,
            round.id,
            round.pricing.method_name(),
            previous_total_shares,
            round.investors.len()
        );

        let issuance = price_round(
            round,
            previous_total_shares,
            previous_round.post_money_valuation,
        );
        current_total_shares = current_total_shares.saturating_add(issuance.new_shares);

        let mut entries = carry_forward_entries(&previous_round.entries, &round.id);
        entries.extend(issue_investor_entries(round, issuance.price_per_share));
        let allocated_shares = apply_ownership_percentages(&mut entries);

        let calculated = CalculatedRound {
            round_id: round.id.clone(),
            round_name: round.name.clone(),
            post_money_valuation: issuance.post_money_valuation,
            price_per_share: issuance.price_per_share,
            total_shares: current_total_shares,
            allocated_shares,
            entries,
        };

        if calculated.has_share_discrepancy(config.share_discrepancy_tolerance) {
            warn!(
                "Round '{}': running total shares ({}) differs from the sum of entry shares ({}). Ownership percentages use the entry sum.",
                round.name, current_total_shares, allocated_shares
            );
        }

        debug!(
            "Round '{}' priced at {} per share: {} new shares, post-money {}",
            round.name,
            issuance.price_per_share,
            issuance.new_shares,
            issuance.post_money_valuation
        );

        rounds.push(calculated);
    }

    CalculatedCapTable { rounds }
}

/// Builds round 0 from the founder list, or from the aggregate share count
/// when no individual founders exist.
fn build_initial_round(state: &CapTableState, founders_shares: Decimal) -> CalculatedRound {
    let price_per_share = if state.initial_valuation > Decimal::ZERO {
        checked_ratio(state.initial_valuation, founders_shares).unwrap_or_default()
    } else {
        Decimal::ZERO
    };

    let entries: Vec<CapTableEntry> = if !state.founders.is_empty() {
        state
            .founders
            .iter()
            .map(|founder| CapTableEntry {
                shareholder_id: founder.id.clone(),
                shareholder_name: founder.name.clone(),
                round_id: INITIAL_ROUND_ID.to_string(),
                shares: founder.shares,
                ownership_percentage: percentage_of(founder.shares, founders_shares),
            })
            .collect()
    } else if founders_shares > Decimal::ZERO {
        vec![CapTableEntry {
            shareholder_id: LEGACY_FOUNDERS_ID.to_string(),
            shareholder_name: LEGACY_FOUNDERS_NAME.to_string(),
            round_id: INITIAL_ROUND_ID.to_string(),
            shares: founders_shares,
            ownership_percentage: dec!(100),
        }]
    } else {
        Vec::new()
    };

    let allocated_shares = sum_shares(&entries);

    CalculatedRound {
        round_id: INITIAL_ROUND_ID.to_string(),
        round_name: INITIAL_ROUND_NAME.to_string(),
        post_money_valuation: state.initial_valuation,
        price_per_share,
        total_shares: founders_shares,
        allocated_shares,
        entries,
    }
}

/// Applies the round's calculation method. Price and issuance are clamped to
/// non-negative values.
fn price_round(
    round: &FundingRound,
    previous_total_shares: Decimal,
    previous_post_money: Decimal,
) -> RoundIssuance {
    let total_investment = round.total_investment();

    let issuance = match &round.pricing {
        RoundPricing::ByValuation {
            pre_money_valuation,
        } => {
            let pre_money = *pre_money_valuation;
            let post_money_valuation = pre_money.saturating_add(total_investment);

            if pre_money <= Decimal::ZERO || previous_total_shares <= Decimal::ZERO {
                warn!(
                    "Round '{}': cannot calculate price per share with zero pre-money valuation or zero previous shares.",
                    round.name
                );
                RoundIssuance {
                    price_per_share: Decimal::ZERO,
                    new_shares: Decimal::ZERO,
                    post_money_valuation,
                }
            } else {
                let price_per_share =
                    checked_ratio(pre_money, previous_total_shares).unwrap_or_default();
                let new_shares = match checked_ratio(total_investment, price_per_share) {
                    Some(shares) => shares,
                    None => {
                        warn!(
                            "Round '{}': calculated price per share is zero. Cannot determine new shares.",
                            round.name
                        );
                        Decimal::ZERO
                    }
                };
                RoundIssuance {
                    price_per_share,
                    new_shares,
                    post_money_valuation,
                }
            }
        }
        RoundPricing::ByFixedShares { new_shares_issued } => {
            let new_shares = new_shares_issued.unwrap_or(Decimal::ZERO);

            if new_shares > Decimal::ZERO {
                let price_per_share =
                    checked_ratio(total_investment, new_shares).unwrap_or_default();
                let implied_pre_money = price_per_share.saturating_mul(previous_total_shares);
                RoundIssuance {
                    price_per_share,
                    new_shares,
                    post_money_valuation: implied_pre_money.saturating_add(total_investment),
                }
            } else {
                warn!(
                    "Round '{}': fixed shares set to zero. Cannot calculate price per share.",
                    round.name
                );
                RoundIssuance {
                    price_per_share: Decimal::ZERO,
                    new_shares,
                    post_money_valuation: previous_post_money,
                }
            }
        }
    };

    RoundIssuance {
        price_per_share: issuance.price_per_share.max(Decimal::ZERO),
        new_shares: issuance.new_shares.max(Decimal::ZERO),
        post_money_valuation: issuance.post_money_valuation,
    }
}

/// Copies the previous snapshot into this round. Share counts are untouched;
/// only the round tag changes, percentages are recomputed afterwards.
fn carry_forward_entries(previous_entries: &[CapTableEntry], round_id: &str) -> Vec<CapTableEntry> {
    previous_entries
        .iter()
        .map(|entry| CapTableEntry {
            round_id: round_id.to_string(),
            ..entry.clone()
        })
        .collect()
}

fn issue_investor_entries(round: &FundingRound, price_per_share: Decimal) -> Vec<CapTableEntry> {
    round
        .investors
        .iter()
        .map(|investor| {
            let shares = match checked_ratio(investor.amount_invested, price_per_share) {
                Some(shares) => shares.max(Decimal::ZERO),
                None => {
                    warn!(
                        "Round '{}', investor '{}': price per share is zero, assigned 0 shares.",
                        round.name, investor.name
                    );
                    Decimal::ZERO
                }
            };
            CapTableEntry {
                shareholder_id: investor.id.clone(),
                shareholder_name: investor.name.clone(),
                round_id: round.id.clone(),
                shares,
                ownership_percentage: Decimal::ZERO,
            }
        })
        .collect()
}

/// Sets every entry's percentage against the actual entry sum and returns that sum.
fn apply_ownership_percentages(entries: &mut [CapTableEntry]) -> Decimal {
    let allocated_shares = sum_shares(entries);
    for entry in entries.iter_mut() {
        entry.ownership_percentage = percentage_of(entry.shares, allocated_shares);
    }
    allocated_shares
}

fn sum_shares(entries: &[CapTableEntry]) -> Decimal {
    entries
        .iter()
        .fold(Decimal::ZERO, |total, e| total.saturating_add(e.shares))
}

/// Zero when `whole` is not positive or the result leaves the decimal range.
fn percentage_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    match part
        .checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
    {
        Some(percentage) => percentage,
        None => {
            warn!(
                "Ownership percentage of {} shares out of {} is out of range, using 0.",
                part, whole
            );
            Decimal::ZERO
        }
    }
}

/// `None` for a non-positive divisor or a quotient outside the decimal range.
fn checked_ratio(numerator: Decimal, denominator: Decimal) -> Option<Decimal> {
    if denominator <= Decimal::ZERO {
        return None;
    }
    numerator.checked_div(denominator)
}

//! Cap table domain models: the editable input state and the calculated output.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::InitialTerms;
use crate::constants::INITIAL_ROUND_ID;

/// A founder holding shares from company formation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Founder {
    pub id: String,
    pub name: String,
    pub shares: Decimal,
}

/// An investor participating in exactly one funding round.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Investor {
    pub id: String,
    pub name: String,
    /// Missing amounts are read as zero
    #[serde(default)]
    pub amount_invested: Decimal,
}

/// How a round determines its price per share and new issuance.
///
/// Each method carries only its own parameter, so a round can never hold both
/// a pre-money valuation and a fixed share count at the same time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "calculationMethod", rename_all = "snake_case")]
pub enum RoundPricing {
    /// Price is pre-money valuation over prior shares; issuance follows from investment.
    #[serde(rename_all = "camelCase")]
    ByValuation {
        #[serde(default)]
        pre_money_valuation: Decimal,
    },
    /// Issuance is fixed; price and implied valuation follow from investment.
    #[serde(rename_all = "camelCase")]
    ByFixedShares {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        new_shares_issued: Option<Decimal>,
    },
}

impl RoundPricing {
    pub fn by_valuation(pre_money_valuation: Decimal) -> Self {
        RoundPricing::ByValuation {
            pre_money_valuation,
        }
    }

    pub fn by_fixed_shares(new_shares_issued: Decimal) -> Self {
        RoundPricing::ByFixedShares {
            new_shares_issued: Some(new_shares_issued),
        }
    }

    /// Wire tag of the method (`by_valuation` / `by_fixed_shares`).
    pub fn method_name(&self) -> &'static str {
        match self {
            RoundPricing::ByValuation { .. } => "by_valuation",
            RoundPricing::ByFixedShares { .. } => "by_fixed_shares",
        }
    }
}

/// A single financing event. Position in [`CapTableState::funding_rounds`] is significant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FundingRound {
    pub id: String,
    /// e.g. "Seed", "Series A"
    pub name: String,
    #[serde(flatten)]
    pub pricing: RoundPricing,
    #[serde(default)]
    pub investors: Vec<Investor>,
}

impl FundingRound {
    /// Sum of all investor amounts in this round.
    pub fn total_investment(&self) -> Decimal {
        self.investors
            .iter()
            .fold(Decimal::ZERO, |total, i| total.saturating_add(i.amount_invested))
    }

    pub fn investor(&self, investor_id: &str) -> Option<&Investor> {
        self.investors.iter().find(|i| i.id == investor_id)
    }
}

/// The editable capitalization state handed to the calculator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CapTableState {
    /// Aggregate founder shares for states without individual founders.
    /// Ignored whenever `founders` is non-empty.
    #[serde(
        rename = "foundersShares",
        default,
        skip_serializing_if = "Decimal::is_zero"
    )]
    pub legacy_founders_shares: Decimal,
    #[serde(default)]
    pub initial_valuation: Decimal,
    #[serde(default)]
    pub initial_price_per_share: Decimal,
    #[serde(default)]
    pub founders: Vec<Founder>,
    #[serde(default)]
    pub funding_rounds: Vec<FundingRound>,
}

impl CapTableState {
    /// Total founder shares, derived from the founder list when one exists.
    pub fn founders_shares(&self) -> Decimal {
        if self.uses_legacy_founders() {
            self.legacy_founders_shares
        } else {
            self.founders
                .iter()
                .fold(Decimal::ZERO, |total, f| total.saturating_add(f.shares))
        }
    }

    /// True when the state only knows an aggregate founder share count.
    pub fn uses_legacy_founders(&self) -> bool {
        self.founders.is_empty()
    }

    /// The shares/valuation/price triangle of the founders round.
    pub fn initial_terms(&self) -> InitialTerms {
        InitialTerms {
            shares: self.founders_shares(),
            valuation: self.initial_valuation,
            price_per_share: self.initial_price_per_share,
        }
    }

    pub fn founder(&self, founder_id: &str) -> Option<&Founder> {
        self.founders.iter().find(|f| f.id == founder_id)
    }

    pub fn round(&self, round_id: &str) -> Option<&FundingRound> {
        self.funding_rounds.iter().find(|r| r.id == round_id)
    }
}

/// One shareholder's position at one point in the round history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CapTableEntry {
    /// Founder id, investor id, or `founders` on the legacy path
    pub shareholder_id: String,
    pub shareholder_name: String,
    pub round_id: String,
    pub shares: Decimal,
    /// Ownership at this snapshot (0-100)
    pub ownership_percentage: Decimal,
}

/// A calculated snapshot of the table after one round.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedRound {
    pub round_id: String,
    pub round_name: String,
    pub post_money_valuation: Decimal,
    pub price_per_share: Decimal,
    /// Running share total used for valuation math
    pub total_shares: Decimal,
    /// Sum of entry shares, the denominator behind `ownership_percentage`
    pub allocated_shares: Decimal,
    pub entries: Vec<CapTableEntry>,
}

impl CalculatedRound {
    /// Shares counted in the running total but held by no entry.
    ///
    /// Non-zero only in degenerate rounds, e.g. a fixed issuance whose
    /// investors put in nothing.
    pub fn unallocated_shares(&self) -> Decimal {
        self.total_shares.saturating_sub(self.allocated_shares)
    }

    /// True when entries hold shares and their sum strays from the running
    /// total by more than `tolerance`. A round where nobody holds anything has
    /// no percentages to be skewed and is never reported.
    pub fn has_share_discrepancy(&self, tolerance: Decimal) -> bool {
        self.allocated_shares > Decimal::ZERO && self.unallocated_shares().abs() > tolerance
    }

    /// Value of an entry's holding at this round's price per share.
    pub fn holding_value(&self, entry: &CapTableEntry) -> Decimal {
        entry.shares.saturating_mul(self.price_per_share)
    }

    pub fn holdings_value_total(&self) -> Decimal {
        self.entries
            .iter()
            .fold(Decimal::ZERO, |total, e| total.saturating_add(self.holding_value(e)))
    }

    pub fn ownership_total(&self) -> Decimal {
        self.entries
            .iter()
            .fold(Decimal::ZERO, |total, e| total.saturating_add(e.ownership_percentage))
    }

    pub fn entry(&self, shareholder_id: &str) -> Option<&CapTableEntry> {
        self.entries.iter().find(|e| e.shareholder_id == shareholder_id)
    }
}

/// The full calculated history: the founders round followed by one round per funding round.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedCapTable {
    pub rounds: Vec<CalculatedRound>,
}

impl CalculatedCapTable {
    /// Looks up a calculated round by the id of its input round.
    pub fn round(&self, round_id: &str) -> Option<&CalculatedRound> {
        self.rounds.iter().find(|r| r.round_id == round_id)
    }

    pub fn initial_round(&self) -> Option<&CalculatedRound> {
        self.round(INITIAL_ROUND_ID)
    }

    pub fn latest_round(&self) -> Option<&CalculatedRound> {
        self.rounds.last()
    }
}

/// A single edit to a [`CapTableState`], as issued by the input forms.
///
/// Optional fields on the update variants leave the current value untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum CapTableEdit {
    AddFounder {
        name: String,
        shares: Decimal,
    },
    UpdateFounder {
        founder_id: String,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        shares: Option<Decimal>,
    },
    RemoveFounder {
        founder_id: String,
    },
    /// Sets the aggregate share count; only valid while no individual founders exist.
    SetFoundersShares {
        shares: Decimal,
    },
    SetInitialValuation {
        valuation: Decimal,
    },
    SetInitialPricePerShare {
        price_per_share: Decimal,
    },
    AddRound {
        name: String,
        #[serde(default)]
        pre_money_valuation: Decimal,
    },
    UpdateRound {
        round_id: String,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        pricing: Option<RoundPricing>,
    },
    RemoveRound {
        round_id: String,
    },
    AddInvestor {
        round_id: String,
        name: String,
        amount_invested: Decimal,
    },
    UpdateInvestor {
        round_id: String,
        investor_id: String,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        amount_invested: Option<Decimal>,
    },
    RemoveInvestor {
        round_id: String,
        investor_id: String,
    },
}

use log::debug;
use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

use super::{
    calculate_cap_table_with, resolve_initial_terms, CalculatedCapTable, CalculatorConfig,
    CapTableEdit, CapTableServiceTrait, CapTableState, Founder, FundingRound, InitialTerms,
    InitialTermsEdit, Investor, RoundPricing,
};
use crate::errors::{Error, Result};

/// Service for calculating and editing cap tables.
///
/// Holds only configuration. States are passed in by value or reference and
/// edits return new states, so one service can serve any number of callers.
#[derive(Debug, Clone, Default)]
pub struct CapTableService {
    config: CalculatorConfig,
}

impl CapTableService {
    pub fn new(config: CalculatorConfig) -> Self {
        Self { config }
    }
}

impl CapTableServiceTrait for CapTableService {
    fn new_state(&self) -> CapTableState {
        CapTableState::default()
    }

    fn calculate(&self, state: &CapTableState) -> CalculatedCapTable {
        calculate_cap_table_with(state, &self.config)
    }

    fn apply_edit(&self, state: &CapTableState, edit: CapTableEdit) -> Result<CapTableState> {
        debug!("Applying cap table edit: {:?}", edit);
        let mut next = state.clone();

        match edit {
            CapTableEdit::AddFounder { name, shares } => {
                let founder = Founder {
                    id: new_id(),
                    name: validate_name("Founder", &name)?,
                    shares: whole_shares(validate_non_negative("Founder shares", shares)?),
                };
                if next.founders.is_empty() {
                    // The first individual founder replaces the aggregate count.
                    next.legacy_founders_shares = Decimal::ZERO;
                }
                next.founders.push(founder);
                sync_founder_terms(&mut next);
            }
            CapTableEdit::UpdateFounder {
                founder_id,
                name,
                shares,
            } => {
                let name = name.map(|n| validate_name("Founder", &n)).transpose()?;
                let shares = shares
                    .map(|s| validate_non_negative("Founder shares", s).map(whole_shares))
                    .transpose()?;
                let founder = next
                    .founders
                    .iter_mut()
                    .find(|f| f.id == founder_id)
                    .ok_or_else(|| Error::not_found("Founder", &founder_id))?;
                if let Some(name) = name {
                    founder.name = name;
                }
                if let Some(shares) = shares {
                    founder.shares = shares;
                }
                sync_founder_terms(&mut next);
            }
            CapTableEdit::RemoveFounder { founder_id } => {
                let before = next.founders.len();
                next.founders.retain(|f| f.id != founder_id);
                if next.founders.len() == before {
                    return Err(Error::not_found("Founder", &founder_id));
                }
                sync_founder_terms(&mut next);
            }
            CapTableEdit::SetFoundersShares { shares } => {
                if !next.uses_legacy_founders() {
                    return Err(Error::invalid_input(
                        "Founder shares are derived from the founder list; edit individual founders instead",
                    ));
                }
                let shares = validate_non_negative("Founder shares", shares)?;
                let terms =
                    resolve_initial_terms(next.initial_terms(), InitialTermsEdit::Shares(shares));
                next.legacy_founders_shares = terms.shares;
                apply_terms(&mut next, terms);
            }
            CapTableEdit::SetInitialValuation { valuation } => {
                let valuation = validate_non_negative("Initial valuation", valuation)?;
                let terms = resolve_initial_terms(
                    next.initial_terms(),
                    InitialTermsEdit::Valuation(valuation),
                );
                apply_terms(&mut next, terms);
            }
            CapTableEdit::SetInitialPricePerShare { price_per_share } => {
                let price_per_share =
                    validate_non_negative("Initial price per share", price_per_share)?;
                let terms = resolve_initial_terms(
                    next.initial_terms(),
                    InitialTermsEdit::PricePerShare(price_per_share),
                );
                apply_terms(&mut next, terms);
            }
            CapTableEdit::AddRound {
                name,
                pre_money_valuation,
            } => {
                let round = FundingRound {
                    id: new_id(),
                    name: validate_name("Round", &name)?,
                    pricing: RoundPricing::by_valuation(validate_non_negative(
                        "Pre-money valuation",
                        pre_money_valuation,
                    )?),
                    investors: Vec::new(),
                };
                next.funding_rounds.push(round);
            }
            CapTableEdit::UpdateRound {
                round_id,
                name,
                pricing,
            } => {
                let name = name.map(|n| validate_name("Round", &n)).transpose()?;
                if let Some(pricing) = &pricing {
                    validate_pricing(pricing)?;
                }
                let round = find_round_mut(&mut next, &round_id)?;
                if let Some(name) = name {
                    round.name = name;
                }
                if let Some(pricing) = pricing {
                    round.pricing = pricing;
                }
            }
            CapTableEdit::RemoveRound { round_id } => {
                let before = next.funding_rounds.len();
                next.funding_rounds.retain(|r| r.id != round_id);
                if next.funding_rounds.len() == before {
                    return Err(Error::not_found("Funding round", &round_id));
                }
            }
            CapTableEdit::AddInvestor {
                round_id,
                name,
                amount_invested,
            } => {
                let investor = Investor {
                    id: new_id(),
                    name: validate_name("Investor", &name)?,
                    amount_invested: validate_non_negative("Amount invested", amount_invested)?,
                };
                find_round_mut(&mut next, &round_id)?.investors.push(investor);
            }
            CapTableEdit::UpdateInvestor {
                round_id,
                investor_id,
                name,
                amount_invested,
            } => {
                let name = name.map(|n| validate_name("Investor", &n)).transpose()?;
                let amount_invested = amount_invested
                    .map(|a| validate_non_negative("Amount invested", a))
                    .transpose()?;
                let investor = find_round_mut(&mut next, &round_id)?
                    .investors
                    .iter_mut()
                    .find(|i| i.id == investor_id)
                    .ok_or_else(|| Error::not_found("Investor", &investor_id))?;
                if let Some(name) = name {
                    investor.name = name;
                }
                if let Some(amount_invested) = amount_invested {
                    investor.amount_invested = amount_invested;
                }
            }
            CapTableEdit::RemoveInvestor {
                round_id,
                investor_id,
            } => {
                let round = find_round_mut(&mut next, &round_id)?;
                let before = round.investors.len();
                round.investors.retain(|i| i.id != investor_id);
                if round.investors.len() == before {
                    return Err(Error::not_found("Investor", &investor_id));
                }
            }
        }

        Ok(next)
    }

    fn resolve_initial_terms(&self, terms: InitialTerms, edit: InitialTermsEdit) -> InitialTerms {
        resolve_initial_terms(terms, edit)
    }

    fn config(&self) -> &CalculatorConfig {
        &self.config
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Re-derives valuation after the founder share total changed.
fn sync_founder_terms(state: &mut CapTableState) {
    let terms = resolve_initial_terms(
        state.initial_terms(),
        InitialTermsEdit::Shares(state.founders_shares()),
    );
    apply_terms(state, terms);
}

fn apply_terms(state: &mut CapTableState, terms: InitialTerms) {
    state.initial_valuation = terms.valuation;
    state.initial_price_per_share = terms.price_per_share;
}

fn find_round_mut<'a>(state: &'a mut CapTableState, round_id: &str) -> Result<&'a mut FundingRound> {
    state
        .funding_rounds
        .iter_mut()
        .find(|r| r.id == round_id)
        .ok_or_else(|| Error::not_found("Funding round", round_id))
}

fn validate_name(entity: &str, name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid_input(format!("{} name cannot be empty", entity)));
    }
    Ok(trimmed.to_string())
}

fn validate_non_negative(field: &str, value: Decimal) -> Result<Decimal> {
    if value < Decimal::ZERO {
        return Err(Error::invalid_input(format!(
            "{} cannot be negative: {}",
            field, value
        )));
    }
    Ok(value)
}

fn validate_pricing(pricing: &RoundPricing) -> Result<()> {
    match pricing {
        RoundPricing::ByValuation {
            pre_money_valuation,
        } => validate_non_negative("Pre-money valuation", *pre_money_valuation).map(|_| ()),
        RoundPricing::ByFixedShares {
            new_shares_issued: Some(new_shares),
        } => validate_non_negative("New shares issued", *new_shares).map(|_| ()),
        RoundPricing::ByFixedShares {
            new_shares_issued: None,
        } => Ok(()),
    }
}

fn whole_shares(shares: Decimal) -> Decimal {
    shares.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

//! Cap table module - models, calculator, initial terms, and the editing service.

mod captable_calculator;
mod captable_model;
mod captable_service;
mod captable_traits;
mod initial_terms;

#[cfg(test)]
mod initial_terms_tests;

pub use captable_calculator::{calculate_cap_table, calculate_cap_table_with, CalculatorConfig};
pub use captable_model::*;
pub use captable_service::CapTableService;
pub use captable_traits::CapTableServiceTrait;
pub use initial_terms::{resolve_initial_terms, InitialTerms, InitialTermsEdit};

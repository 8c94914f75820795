use super::{
    CalculatedCapTable, CapTableEdit, CapTableState, CalculatorConfig, InitialTerms,
    InitialTermsEdit,
};
use crate::errors::Result;

/// Trait for the cap table service.
///
/// Every operation is a pure transform over the values passed in; nothing is
/// retained between calls.
pub trait CapTableServiceTrait: Send + Sync {
    /// Returns the empty starting state.
    fn new_state(&self) -> CapTableState;

    /// Calculates the per-round ownership table for a state.
    fn calculate(&self, state: &CapTableState) -> CalculatedCapTable;

    /// Validates an edit and returns the edited copy of the state.
    fn apply_edit(&self, state: &CapTableState, edit: CapTableEdit) -> Result<CapTableState>;

    /// Resolves the founders-round pricing triangle for one edit.
    fn resolve_initial_terms(&self, terms: InitialTerms, edit: InitialTermsEdit) -> InitialTerms;

    fn config(&self) -> &CalculatorConfig;
}

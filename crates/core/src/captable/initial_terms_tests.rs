#[cfg(test)]
mod tests {
    use crate::captable::{resolve_initial_terms, InitialTerms, InitialTermsEdit};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn terms(shares: Decimal, valuation: Decimal, price_per_share: Decimal) -> InitialTerms {
        InitialTerms {
            shares,
            valuation,
            price_per_share,
        }
    }

    #[test]
    fn test_shares_edit_rederives_valuation_from_price() {
        let current = terms(dec!(1000000), dec!(1000000), dec!(1));
        let next = resolve_initial_terms(current, InitialTermsEdit::Shares(dec!(2500000)));
        assert_eq!(next, terms(dec!(2500000), dec!(2500000), dec!(1)));
    }

    #[test]
    fn test_shares_edit_without_price_keeps_valuation() {
        let current = terms(dec!(1000000), dec!(750000), Decimal::ZERO);
        let next = resolve_initial_terms(current, InitialTermsEdit::Shares(dec!(2000000)));
        assert_eq!(next.valuation, dec!(750000));
        assert_eq!(next.price_per_share, Decimal::ZERO);
    }

    #[test]
    fn test_shares_are_rounded_to_whole_numbers() {
        let current = terms(Decimal::ZERO, Decimal::ZERO, dec!(0.5));
        let next = resolve_initial_terms(current, InitialTermsEdit::Shares(dec!(1000.5)));
        assert_eq!(next.shares, dec!(1001));
        // 1001 * 0.5 = 500.5 rounds away from zero
        assert_eq!(next.valuation, dec!(501));
    }

    #[test]
    fn test_valuation_edit_rederives_price() {
        let current = terms(dec!(3000000), dec!(3000000), dec!(1));
        let next = resolve_initial_terms(current, InitialTermsEdit::Valuation(dec!(10000000)));
        assert_eq!(next.shares, dec!(3000000));
        assert_eq!(next.valuation, dec!(10000000));
        assert_eq!(next.price_per_share, dec!(3.333333));
    }

    #[test]
    fn test_valuation_edit_without_shares_keeps_price() {
        let current = terms(Decimal::ZERO, Decimal::ZERO, dec!(2.5));
        let next = resolve_initial_terms(current, InitialTermsEdit::Valuation(dec!(100)));
        assert_eq!(next.valuation, dec!(100));
        assert_eq!(next.price_per_share, dec!(2.5));
    }

    #[test]
    fn test_price_edit_rederives_valuation() {
        let current = terms(dec!(4000000), Decimal::ZERO, Decimal::ZERO);
        let next = resolve_initial_terms(current, InitialTermsEdit::PricePerShare(dec!(0.25)));
        assert_eq!(next.price_per_share, dec!(0.25));
        assert_eq!(next.valuation, dec!(1000000));
    }

    #[test]
    fn test_price_is_limited_to_six_places() {
        let current = terms(dec!(1000), Decimal::ZERO, Decimal::ZERO);
        let next =
            resolve_initial_terms(current, InitialTermsEdit::PricePerShare(dec!(1.23456789)));
        assert_eq!(next.price_per_share, dec!(1.234568));
        assert_eq!(next.valuation, dec!(1235));
    }

    #[test]
    fn test_negative_inputs_clamp_to_zero() {
        let current = terms(dec!(1000), dec!(1000), dec!(1));

        let shares = resolve_initial_terms(current, InitialTermsEdit::Shares(dec!(-10)));
        assert_eq!(shares.shares, Decimal::ZERO);
        assert_eq!(shares.valuation, Decimal::ZERO);

        let valuation = resolve_initial_terms(current, InitialTermsEdit::Valuation(dec!(-10)));
        assert_eq!(valuation.valuation, Decimal::ZERO);
        assert_eq!(valuation.price_per_share, Decimal::ZERO);

        let price = resolve_initial_terms(current, InitialTermsEdit::PricePerShare(dec!(-1)));
        assert_eq!(price.price_per_share, Decimal::ZERO);
        assert_eq!(price.valuation, Decimal::ZERO);
    }

    #[test]
    fn test_clearing_shares_keeps_entered_price() {
        let current = terms(dec!(1000), dec!(2000), dec!(2));
        let next = resolve_initial_terms(current, InitialTermsEdit::Shares(Decimal::ZERO));
        assert_eq!(next.shares, Decimal::ZERO);
        assert_eq!(next.price_per_share, dec!(2));
        assert_eq!(next.valuation, Decimal::ZERO);
    }

    #[test]
    fn test_edit_deserializes_from_field_value_pair() {
        let edit: InitialTermsEdit =
            serde_json::from_str(r#"{"field":"pricePerShare","value":1.5}"#).unwrap();
        assert_eq!(edit, InitialTermsEdit::PricePerShare(dec!(1.5)));

        let edit: InitialTermsEdit =
            serde_json::from_str(r#"{"field":"shares","value":1000}"#).unwrap();
        assert_eq!(edit, InitialTermsEdit::Shares(dec!(1000)));
    }
}

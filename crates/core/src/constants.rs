use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Round id of the synthetic founders round that opens every calculated table
pub const INITIAL_ROUND_ID: &str = "initial";

/// Display name of the synthetic founders round
pub const INITIAL_ROUND_NAME: &str = "Founders";

/// Shareholder id used when only an aggregate founder share count is known
pub const LEGACY_FOUNDERS_ID: &str = "founders";

/// Shareholder name used when only an aggregate founder share count is known
pub const LEGACY_FOUNDERS_NAME: &str = "Founders";

/// Decimal precision for derived prices per share
pub const PRICE_DECIMAL_PRECISION: u32 = 6;

/// Entry-sum vs running-total gap above which a round is reported as inconsistent
pub const SHARE_DISCREPANCY_TOLERANCE: Decimal = dec!(0.001);

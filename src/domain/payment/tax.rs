//! VAT rate labels accepted by invoice cart lines.

use rust_decimal::Decimal;

/// Maps a host tax rate to the gateway's VAT label.
///
/// Compound codes `10100` and `18118` are the host's encoding of the
/// tax-inclusive rates `10/110` and `18/118`. Unknown rates have no label and
/// the cart line is sent without a tax mode.
pub fn vat_rate_label(rate: Decimal) -> Option<&'static str> {
    let rate = rate.normalize();
    if rate.scale() != 0 {
        return None;
    }

    match rate.mantissa() {
        0 => Some("0%"),
        10 => Some("10%"),
        18 => Some("18%"),
        10100 => Some("10/110"),
        18118 => Some("18/118"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_rates_map_to_labels() {
        assert_eq!(vat_rate_label(Decimal::from(0)), Some("0%"));
        assert_eq!(vat_rate_label(Decimal::from(10)), Some("10%"));
        assert_eq!(vat_rate_label(Decimal::from(18)), Some("18%"));
        assert_eq!(vat_rate_label(Decimal::from(10100)), Some("10/110"));
        assert_eq!(vat_rate_label(Decimal::from(18118)), Some("18/118"));
    }

    #[test]
    fn trailing_zero_scale_is_ignored() {
        assert_eq!(vat_rate_label(Decimal::new(1800, 2)), Some("18%"));
    }

    #[test]
    fn unknown_rates_have_no_label() {
        assert_eq!(vat_rate_label(Decimal::from(20)), None);
        assert_eq!(vat_rate_label(Decimal::new(105, 1)), None);
        assert_eq!(vat_rate_label(Decimal::from(-10)), None);
    }
}

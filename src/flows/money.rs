// src/flows/money.rs

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::common::error::AppError;

/// Tolerância das comparações de alocação (0.001).
pub const ALLOCATION_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 3);

/// Converte a entrada do usuário em valor. Aceita vírgula como separador
/// decimal ("12,5"). Vazio vale zero; negativo ou lixo é erro.
pub fn parse_amount(raw: &str) -> Result<Decimal, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }

    let normalized = trimmed.replace(',', ".");
    let value = Decimal::from_str(&normalized)
        .map_err(|_| AppError::InvalidAmount(raw.to_string()))?;

    if value.is_sign_negative() && !value.is_zero() {
        return Err(AppError::InvalidAmount(raw.to_string()));
    }
    Ok(value)
}

/// Igual a `parse_amount`, mas entrada inválida conta como zero
/// (usado no total corrente, recalculado a cada tecla).
pub fn parse_amount_lenient(raw: &str) -> Decimal {
    parse_amount(raw).unwrap_or(Decimal::ZERO)
}

/// `a > b + 0.001`
pub fn exceeds(a: Decimal, b: Decimal) -> bool {
    a > b + ALLOCATION_EPSILON
}

pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn comma_is_accepted_as_decimal_separator() {
        assert_eq!(parse_amount("12,5").unwrap(), d("12.5"));
        assert_eq!(parse_amount(" 7.25 ").unwrap(), d("7.25"));
        assert_eq!(parse_amount("").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn negative_and_garbage_are_rejected() {
        assert!(matches!(parse_amount("-3"), Err(AppError::InvalidAmount(_))));
        assert!(matches!(parse_amount("abc"), Err(AppError::InvalidAmount(_))));
        assert!(matches!(parse_amount("1.234,56"), Err(AppError::InvalidAmount(_))));
        assert_eq!(parse_amount_lenient("abc"), Decimal::ZERO);
    }

    #[test]
    fn epsilon_tolerates_rounding_noise() {
        assert_eq!(ALLOCATION_EPSILON, d("0.001"));
        assert!(!exceeds(d("100.001"), d("100")));
        assert!(exceeds(d("100.0011"), d("100")));
    }
}

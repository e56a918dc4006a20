// src/flows/currency.rs

use rust_decimal::Decimal;

use crate::{flows::money::round_money, models::common::Currency};

pub const RATE_UNAVAILABLE_LABEL: &str = "Tasa no disponible";

/// Formato es-VE: milhar com ponto, decimal com vírgula, sempre 2 casas.
/// Ex: `Bs. 1.234,56`, `$1.234,56`.
pub fn format_money(amount: Decimal, currency: Currency) -> String {
    let rounded = round_money(amount);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());

    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let symbol = match currency {
        Currency::Ves => "Bs. ",
        Currency::Usd => "$",
        Currency::Eur => "€",
    };
    let sign = if negative { "-" } else { "" };
    format!("{}{}{},{}", sign, symbol, grouped, frac_part)
}

/// VES -> USD usando a taxa (VES por 1 USD). Sem taxa válida -> `None`.
pub fn ves_to_usd(amount_ves: Decimal, usd_rate: Option<Decimal>) -> Option<Decimal> {
    match usd_rate {
        Some(rate) if rate > Decimal::ZERO => Some(amount_ves / rate),
        _ => None,
    }
}

/// Valor exibido num card/tabela com alternância VES/USD.
/// O valor canônico é sempre o VES; a exibição é derivada dele a cada vez,
/// então alternar duas vezes devolve exatamente o texto original.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyDisplay {
    amount_ves: Decimal,
    usd_rate: Option<Decimal>,
    currency: Currency,
}

impl CurrencyDisplay {
    pub fn new(amount_ves: Decimal, usd_rate: Option<Decimal>) -> Self {
        Self {
            amount_ves,
            usd_rate,
            currency: Currency::Ves,
        }
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn toggle(&mut self) -> Currency {
        self.currency = match self.currency {
            Currency::Ves => Currency::Usd,
            _ => Currency::Ves,
        };
        tracing::debug!("Moneda de visualización: {}", self.currency);
        self.currency
    }

    /// Valor numérico na moeda atual; `None` em USD sem taxa.
    pub fn value(&self) -> Option<Decimal> {
        match self.currency {
            Currency::Ves => Some(self.amount_ves),
            _ => ves_to_usd(self.amount_ves, self.usd_rate),
        }
    }

    pub fn display(&self) -> String {
        match self.value() {
            Some(v) => format_money(v, self.currency),
            None => RATE_UNAVAILABLE_LABEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn formats_with_venezuelan_separators() {
        assert_eq!(format_money(d("1234.5"), Currency::Ves), "Bs. 1.234,50");
        assert_eq!(format_money(d("1234567.891"), Currency::Usd), "$1.234.567,89");
        assert_eq!(format_money(d("0"), Currency::Ves), "Bs. 0,00");
        assert_eq!(format_money(d("-15.005"), Currency::Ves), "-Bs. 15,01");
        assert_eq!(format_money(d("999"), Currency::Eur), "€999,00");
    }

    #[test]
    fn toggling_twice_restores_the_original_text() {
        let mut display = CurrencyDisplay::new(d("1000.37"), Some(d("36.5")));
        let original = display.display();

        display.toggle();
        assert_eq!(display.currency(), Currency::Usd);
        assert_eq!(display.display(), "$27,41");

        display.toggle();
        assert_eq!(display.display(), original);
        assert_eq!(original, "Bs. 1.000,37");
    }

    #[test]
    fn usd_without_rate_shows_unavailable() {
        let mut display = CurrencyDisplay::new(d("50"), None);
        display.toggle();
        assert_eq!(display.value(), None);
        assert_eq!(display.display(), RATE_UNAVAILABLE_LABEL);
        assert_eq!(ves_to_usd(d("10"), Some(Decimal::ZERO)), None);
    }
}

// ============================================================================
// Card - Contenu textuel d'une carte
// ============================================================================
// Transforme un Stock en lignes prêtes à afficher. Aucune dépendance à
// ratatui ici : le formatage se teste sans terminal.
// ============================================================================

use std::fmt::Display;

use chrono::{DateTime, Local, Locale, TimeZone, Utc};

use crate::models::Stock;

/// Affiché à la place d'une valeur absente
pub const PLACEHOLDER: &str = "-";

/// Couleur sémantique d'une valeur
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Variation >= 0
    Positive,
    /// Variation < 0
    Negative,
    /// Valeur absente
    Neutral,
}

/// Contenu d'une carte
#[derive(Debug, Clone, PartialEq)]
pub struct StockCard {
    pub ticker: String,
    pub company_name: String,
    pub sector: String,
    pub price: String,
    pub change: String,
    pub change_tone: Tone,
    pub updated: String,
}

impl StockCard {
    /// Construit la carte, horodatage dans le fuseau local
    pub fn from_stock(stock: &Stock, locale: Locale) -> Self {
        Self::from_stock_in(stock, &Local, locale)
    }

    /// Construit la carte avec un fuseau explicite
    pub fn from_stock_in<Tz>(stock: &Stock, tz: &Tz, locale: Locale) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let (change, change_tone) = format_change(stock.change_percent);

        Self {
            ticker: stock.ticker.clone(),
            company_name: stock.company_name.clone(),
            sector: stock.sector.clone(),
            price: format_price(stock.current_price),
            change,
            change_tone,
            updated: format_timestamp(&stock.last_updated, tz, locale),
        }
    }
}

/// "$150.50", ou "-" si absent
pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(price) => format!("${:.2}", price),
        None => PLACEHOLDER.to_string(),
    }
}

/// "1.23%" / "-2.50%" avec sa couleur, ou "-" neutre si absent
pub fn format_change(change: Option<f64>) -> (String, Tone) {
    match change {
        Some(change) if change >= 0.0 => (format!("{:.2}%", change), Tone::Positive),
        Some(change) => (format!("{:.2}%", change), Tone::Negative),
        None => (PLACEHOLDER.to_string(), Tone::Neutral),
    }
}

/// Date et heure au format de la locale (%x %X), dans le fuseau `tz`
pub fn format_timestamp<Tz>(timestamp: &DateTime<Utc>, tz: &Tz, locale: Locale) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp
        .with_timezone(tz)
        .format_localized("%x %X", locale)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stock(price: Option<f64>, change: Option<f64>) -> Stock {
        Stock {
            ticker: "AAPL".to_string(),
            company_name: "Apple Inc.".to_string(),
            sector: "Technology".to_string(),
            current_price: price,
            change_percent: change,
            last_updated: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(Some(150.5)), "$150.50");
        assert_eq!(format_price(Some(0.0)), "$0.00");
        assert_eq!(format_price(Some(1234.567)), "$1234.57");
        assert_eq!(format_price(None), "-");
    }

    #[test]
    fn test_format_change() {
        assert_eq!(format_change(Some(1.23)), ("1.23%".to_string(), Tone::Positive));
        assert_eq!(format_change(Some(0.0)), ("0.00%".to_string(), Tone::Positive));
        assert_eq!(format_change(Some(-2.5)), ("-2.50%".to_string(), Tone::Negative));
        assert_eq!(format_change(None), ("-".to_string(), Tone::Neutral));
    }

    #[test]
    fn test_format_timestamp_follows_locale() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        assert_eq!(format_timestamp(&ts, &Utc, Locale::fr_FR), "01/01/2024 00:00:00");
        assert!(format_timestamp(&ts, &Utc, Locale::en_US).contains("2024"));
    }

    #[test]
    fn test_card_from_stock() {
        let card = StockCard::from_stock_in(&stock(Some(150.5), Some(1.23)), &Utc, Locale::fr_FR);

        assert_eq!(card.ticker, "AAPL");
        assert_eq!(card.company_name, "Apple Inc.");
        assert_eq!(card.sector, "Technology");
        assert_eq!(card.price, "$150.50");
        assert_eq!(card.change, "1.23%");
        assert_eq!(card.change_tone, Tone::Positive);
        assert_eq!(card.updated, "01/01/2024 00:00:00");
    }

    #[test]
    fn test_card_placeholders() {
        let card = StockCard::from_stock_in(&stock(None, None), &Utc, Locale::en_US);

        assert_eq!(card.price, "-");
        assert_eq!(card.change, "-");
        assert_eq!(card.change_tone, Tone::Neutral);
    }
}

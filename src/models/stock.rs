// ============================================================================
// Structure : Stock
// ============================================================================
// Un titre coté tel que renvoyé par GET /api/stocks/
//
// CONCEPTS RUST :
// 1. Option<f64> : l'absence de prix (null) est distincte de 0.0
// 2. deserialize_with : parser l'horodatage à la frontière, pas au rendu
// ============================================================================

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Titre coté (ticker, nom, secteur, prix, variation, horodatage)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    /// Symbole (ex: "AAPL"), unique dans une réponse
    pub ticker: String,

    /// Nom de la société (ex: "Apple Inc.")
    pub company_name: String,

    /// Secteur (ex: "Technology")
    pub sector: String,

    /// Prix actuel, None si le backend renvoie null
    pub current_price: Option<f64>,

    /// Variation en points de pourcentage, signée
    pub change_percent: Option<f64>,

    /// Dernière mise à jour côté backend
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub last_updated: DateTime<Utc>,
}

impl Stock {
    /// Vérifie les contraintes que serde ne peut pas exprimer
    ///
    /// Retourne une description lisible de la première violation.
    pub fn validate(&self) -> Result<(), String> {
        if self.ticker.trim().is_empty() {
            return Err("empty ticker".to_string());
        }

        if let Some(price) = self.current_price {
            if !price.is_finite() || price < 0.0 {
                return Err(format!("{}: invalid current_price {}", self.ticker, price));
            }
        }

        if let Some(change) = self.change_percent {
            if !change.is_finite() {
                return Err(format!("{}: invalid change_percent {}", self.ticker, change));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Désérialisation de l'horodatage
// ============================================================================
// Le backend renvoie soit du RFC 3339 ("2024-01-01T00:00:00Z",
// "2024-01-01T09:30:00.123456+02:00"), soit une date naïve sans offset
// quand les fuseaux sont désactivés côté serveur. La forme naïve est une
// heure murale : elle est lue dans le fuseau local, comme le ferait un
// navigateur, et s'affiche donc telle quelle.
// ============================================================================

/// Parse un horodatage backend en DateTime<Utc> (forme naïve = heure locale)
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    parse_timestamp_in(raw, &Local)
}

/// Parse un horodatage, la forme naïve étant interprétée dans `tz`
///
/// Une heure locale ambiguë (changement d'heure) prend la plus tôt ; une
/// heure inexistante est rejetée.
pub fn parse_timestamp_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid last_updated timestamp {:?}", raw)))
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    use crate::ui::card::StockCard;

    const AAPL: &str = r#"{"ticker":"AAPL","company_name":"Apple Inc.","sector":"Technology","current_price":150.5,"change_percent":1.23,"last_updated":"2024-01-01T00:00:00Z"}"#;

    #[test]
    fn test_deserialize_stock() {
        let stock: Stock = serde_json::from_str(AAPL).unwrap();

        assert_eq!(stock.ticker, "AAPL");
        assert_eq!(stock.company_name, "Apple Inc.");
        assert_eq!(stock.current_price, Some(150.5));
        assert_eq!(stock.change_percent, Some(1.23));
        assert_eq!(stock.last_updated, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert!(stock.validate().is_ok());
    }

    #[test]
    fn test_null_fields_are_none_not_zero() {
        let json = r#"{"id":7,"ticker":"XYZ","company_name":"X","sector":"S","current_price":null,"change_percent":null,"last_updated":"2024-01-01T00:00:00Z"}"#;
        let stock: Stock = serde_json::from_str(json).unwrap();

        assert_eq!(stock.current_price, None);
        assert_eq!(stock.change_percent, None);
    }

    #[test]
    fn test_zero_price_is_kept() {
        let json = r#"{"ticker":"Z","company_name":"Z","sector":"S","current_price":0,"change_percent":0,"last_updated":"2024-01-01T00:00:00Z"}"#;
        let stock: Stock = serde_json::from_str(json).unwrap();

        assert_eq!(stock.current_price, Some(0.0));
        assert_eq!(stock.change_percent, Some(0.0));
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap();

        assert_eq!(parse_timestamp("2024-03-05T14:30:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-05T16:30:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp_in("2024-03-05T14:30:00", &Utc), Some(expected));
        assert!(parse_timestamp("2024-03-05T14:30:00.123456").is_some());
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_naive_timestamp_keeps_wall_clock() {
        // New York en hiver : UTC-5
        let new_york = FixedOffset::west_opt(5 * 3600).unwrap();

        let parsed = parse_timestamp_in("2024-01-01T09:30:00", &new_york).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 1, 14, 30, 0).unwrap());

        // Un horodatage avec offset explicite n'est pas réinterprété
        let explicit = parse_timestamp_in("2024-01-01T09:30:00Z", &new_york).unwrap();
        assert_eq!(explicit, Utc.with_ymd_and_hms(2024, 1, 1, 9, 30, 0).unwrap());

        let mut stock: Stock = serde_json::from_str(AAPL).unwrap();
        stock.last_updated = parsed;
        let card = StockCard::from_stock_in(&stock, &new_york, chrono::Locale::fr_FR);
        assert_eq!(card.updated, "01/01/2024 09:30:00");
    }

    #[test]
    fn test_bad_timestamp_is_a_decode_error() {
        let json = r#"{"ticker":"A","company_name":"A","sector":"S","current_price":1,"change_percent":1,"last_updated":"not a date"}"#;
        let result: Result<Stock, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_negative_price() {
        let mut stock: Stock = serde_json::from_str(AAPL).unwrap();
        stock.current_price = Some(-1.0);
        assert!(stock.validate().unwrap_err().contains("current_price"));

        stock.current_price = None;
        stock.ticker = "  ".to_string();
        assert_eq!(stock.validate().unwrap_err(), "empty ticker");
    }
}

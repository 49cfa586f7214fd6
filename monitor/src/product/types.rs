use serde::{Deserialize, Deserializer, Serialize};

use crate::product::errors::FetchError;

/// Request body for the product-details endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery<'a> {
    pub content_id: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ProductEnvelope {
    pub data: ProductData,
}

#[derive(Debug, Deserialize)]
pub struct ProductData {
    pub name: Option<String>,
    pub pricing: Pricing,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    #[serde(deserialize_with = "de_amount")]
    pub discount_percentage: f64,

    #[serde(deserialize_with = "de_amount")]
    pub selling_price: f64,

    /// Listed (pre-discount) price.
    #[serde(deserialize_with = "de_amount")]
    pub mrp: f64,
}

/// Pricing of one product as observed during a single run.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSnapshot {
    pub product_name: String,
    pub current_price: f64,
    pub original_price: f64,
    pub discount_percentage: f64,
}

impl ProductSnapshot {
    /// Validates the wire payload. `fallback_name` is used when the
    /// provider omits (or blanks) the product name.
    pub fn from_envelope(
        envelope: ProductEnvelope,
        fallback_name: &str,
    ) -> Result<Self, FetchError> {
        let ProductData { name, pricing } = envelope.data;

        for (field, value) in [
            ("discountPercentage", pricing.discount_percentage),
            ("sellingPrice", pricing.selling_price),
            ("mrp", pricing.mrp),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(FetchError::InvalidResponse(format!(
                    "{field} must be a non-negative number, got {value}"
                )));
            }
        }

        let product_name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| fallback_name.to_string());

        Ok(Self {
            product_name,
            current_price: pricing.selling_price,
            original_price: pricing.mrp,
            discount_percentage: pricing.discount_percentage,
        })
    }

    pub fn savings(&self) -> f64 {
        (self.original_price - self.current_price).max(0.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
}

/// Money and percentages arrive either as JSON numbers or as strings such
/// as `"9,800.00"`.
fn de_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawAmount::deserialize(deserializer)? {
        RawAmount::Number(n) => Ok(n),
        RawAmount::Text(s) => {
            let cleaned: String = s
                .trim()
                .trim_end_matches('%')
                .chars()
                .filter(|c| *c != ',')
                .collect();
            cleaned
                .parse::<f64>()
                .map_err(|_| serde::de::Error::custom(format!("'{s}' is not a number")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<ProductSnapshot, FetchError> {
        let envelope: ProductEnvelope = serde_json::from_str(body)?;
        ProductSnapshot::from_envelope(envelope, "Fallback Voucher")
    }

    #[test]
    fn parses_numeric_fields() {
        let snap = parse(
            r#"{"data":{"name":"Gift Card","pricing":{"discountPercentage":2.5,"sellingPrice":9750,"mrp":10000}}}"#,
        )
        .unwrap();

        assert_eq!(snap.product_name, "Gift Card");
        assert_eq!(snap.discount_percentage, 2.5);
        assert_eq!(snap.current_price, 9750.0);
        assert_eq!(snap.original_price, 10000.0);
        assert_eq!(snap.savings(), 250.0);
    }

    #[test]
    fn accepts_stringified_amounts() {
        let snap = parse(
            r#"{"data":{"pricing":{"discountPercentage":"2%","sellingPrice":"9,800.00","mrp":"10,000"}}}"#,
        )
        .unwrap();

        assert_eq!(snap.discount_percentage, 2.0);
        assert_eq!(snap.current_price, 9800.0);
        assert_eq!(snap.original_price, 10000.0);
    }

    #[test]
    fn missing_name_uses_fallback() {
        let snap = parse(
            r#"{"data":{"name":"  ","pricing":{"discountPercentage":1,"sellingPrice":9900,"mrp":10000}}}"#,
        )
        .unwrap();

        assert_eq!(snap.product_name, "Fallback Voucher");
    }

    #[test]
    fn missing_discount_is_a_decode_error() {
        let err = parse(r#"{"data":{"pricing":{"sellingPrice":9900,"mrp":10000}}}"#).unwrap_err();

        assert!(matches!(err, FetchError::Decode(_)));
        assert!(err.to_string().contains("discountPercentage"));
    }

    #[test]
    fn non_numeric_string_is_a_decode_error() {
        let err = parse(
            r#"{"data":{"pricing":{"discountPercentage":"soon","sellingPrice":9900,"mrp":10000}}}"#,
        )
        .unwrap_err();

        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn negative_price_is_rejected() {
        let err = parse(
            r#"{"data":{"pricing":{"discountPercentage":2,"sellingPrice":-1,"mrp":10000}}}"#,
        )
        .unwrap_err();

        assert!(matches!(err, FetchError::InvalidResponse(_)));
    }

    #[test]
    fn query_serializes_camel_case() {
        let body = serde_json::to_string(&ProductQuery { content_id: "abc" }).unwrap();
        assert_eq!(body, r#"{"contentId":"abc"}"#);
    }
}

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};

/// Currency sent on every outbound charge.
pub const CHARGE_CURRENCY: &str = "usd";

/// Test card token sent in place of real card data.
pub const TEST_SOURCE_TOKEN: &str = "tok_visa";

/// Status reported by the processor for a captured charge.
pub const CHARGE_SUCCEEDED: &str = "succeeded";

/// Inbound payment authorization request from the orders service.
///
/// Only `amount` is interpreted. The remaining fields are carried as opaque
/// JSON so new upstream fields never break decoding.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorizationRequest {
    #[serde(default, deserialize_with = "null_as_zero")]
    pub amount: f64,
    #[serde(default)]
    pub address: serde_json::Value,
    #[serde(default)]
    pub card: serde_json::Value,
    #[serde(default)]
    pub customer: serde_json::Value,
}

/// Authorization decision returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationDecision {
    pub authorised: bool,
    pub message: String,
}

impl AuthorizationDecision {
    pub fn authorised(message: impl Into<String>) -> Self {
        Self {
            authorised: true,
            message: message.into(),
        }
    }

    pub fn declined(message: impl Into<String>) -> Self {
        Self {
            authorised: false,
            message: message.into(),
        }
    }
}

/// Form body of `POST <endpoint>/v1/charges`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChargeRequest {
    /// Amount in minor units (cents).
    pub amount: i64,
    pub currency: &'static str,
    pub source: &'static str,
}

impl ChargeRequest {
    pub fn for_amount(amount: f64) -> Self {
        Self {
            amount: to_minor_units(amount),
            currency: CHARGE_CURRENCY,
            source: TEST_SOURCE_TOKEN,
        }
    }
}

/// Subset of the processor's charge object that decides authorization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChargeResult {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub paid: bool,
    #[serde(default)]
    pub status: String,
}

impl ChargeResult {
    pub fn is_captured(&self) -> bool {
        self.paid && self.status == CHARGE_SUCCEEDED
    }
}

/// One entry of the `GET /health` array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub service: String,
    pub status: String,
    pub time: String,
}

/// Decode `body` as `T`, accepting only a JSON object at the top level.
///
/// Derived struct impls also accept a positional array, which would let
/// `[50]` through as `amount = 50`.
pub fn from_json_object<T: DeserializeOwned>(body: &[u8]) -> Result<T, serde_json::Error> {
    match serde_json::from_slice(body)? {
        value @ serde_json::Value::Object(_) => serde_json::from_value(value),
        _ => Err(serde_json::Error::custom("expected a JSON object")),
    }
}

fn null_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

/// Converts major units to minor units by multiplying by 100 and truncating.
///
/// No rounding is applied, so binary float error can land one cent low
/// (`19.99` becomes `1998`). Callers depend on this exact conversion.
pub fn to_minor_units(amount: f64) -> i64 {
    (amount * 100.0) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_passes_opaque_fields_through() {
        let req: AuthorizationRequest = serde_json::from_str(
            r#"{"amount": 12.5, "card": {"number": "4111"}, "customer": "c-1", "extra": [1]}"#,
        )
        .unwrap();
        assert_eq!(req.amount, 12.5);
        assert_eq!(req.card["number"], "4111");
        assert_eq!(req.customer, "c-1");
        assert!(req.address.is_null());
    }

    #[test]
    fn test_request_missing_amount_defaults_to_zero() {
        let req: AuthorizationRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.amount, 0.0);
    }

    #[test]
    fn test_request_null_amount_is_zero() {
        let req: AuthorizationRequest = from_json_object(br#"{"amount": null}"#).unwrap();
        assert_eq!(req.amount, 0.0);
    }

    #[test]
    fn test_object_decoding_rejects_arrays() {
        assert!(from_json_object::<AuthorizationRequest>(b"[50]").is_err());
        assert!(from_json_object::<ChargeResult>(br#"["ch_1", true, "succeeded"]"#).is_err());
        assert!(from_json_object::<AuthorizationRequest>(b"{\"amount\": 5}").is_ok());
    }

    #[test]
    fn test_request_rejects_non_numeric_amount() {
        assert!(serde_json::from_str::<AuthorizationRequest>(r#"{"amount": "10"}"#).is_err());
    }

    #[test]
    fn test_minor_units_truncate() {
        assert_eq!(to_minor_units(10.0), 1000);
        assert_eq!(to_minor_units(0.5), 50);
        assert_eq!(to_minor_units(12.345), 1234);
        // float representation of 19.99 is slightly below it
        assert_eq!(to_minor_units(19.99), 1998);
        assert_eq!(to_minor_units(-1.5), -150);
    }

    #[test]
    fn test_charge_request_is_fixed_test_charge() {
        let charge = ChargeRequest::for_amount(42.0);
        assert_eq!(charge.amount, 4200);
        assert_eq!(charge.currency, "usd");
        assert_eq!(charge.source, "tok_visa");
    }

    #[test]
    fn test_charge_result_capture_requires_paid_and_succeeded() {
        let captured = ChargeResult {
            id: "ch_1".into(),
            paid: true,
            status: "succeeded".into(),
        };
        assert!(captured.is_captured());

        let pending = ChargeResult {
            status: "pending".into(),
            ..captured.clone()
        };
        assert!(!pending.is_captured());

        let unpaid = ChargeResult {
            paid: false,
            ..captured
        };
        assert!(!unpaid.is_captured());
    }
}

use crate::domain::errors::{CheckoutError, CheckoutResult};
use crate::domain::{Cart, Order};
use crate::infrastructure::config::FirestoreConfig;
use crate::ports::OrderStorePort;
use async_trait::async_trait;
use chrono::SecondsFormat;
use reqwest::{Client, StatusCode};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::{debug, error};

/// Firestore adapter for carts and orders.
///
/// Carts live under `users/{userId}/carts/{cartId}`, orders under
/// `orders/{transactionId}`. The commit endpoint applies the order create
/// and the cart delete as one store transaction; Firestore guarantees no
/// reader observes a partial batch.
#[derive(Clone)]
pub struct FirestoreStore {
    config: Arc<FirestoreConfig>,
    client: Client,
}

impl FirestoreStore {
    pub fn new(config: Arc<FirestoreConfig>) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn cart_name(&self, user_id: &str, cart_id: &str) -> String {
        format!(
            "{}/users/{}/carts/{}",
            self.config.documents_root(),
            user_id,
            cart_id
        )
    }

    fn order_name(&self, transaction_id: &str) -> String {
        format!("{}/orders/{}", self.config.documents_root(), transaction_id)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl OrderStorePort for FirestoreStore {
    async fn get_cart(&self, user_id: &str, cart_id: &str) -> CheckoutResult<Option<Cart>> {
        let url = format!(
            "{}/{}",
            self.config.base_url,
            self.cart_name(user_id, cart_id)
        );

        let response = self
            .authorized(self.client.get(&url))
            .send()
            .await
            .map_err(|e| CheckoutError::CommitFailed(format!("Cart read failed: {}", e)))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status();
            error!("Cart read error for {}/{}: {}", user_id, cart_id, status);
            return Err(CheckoutError::CommitFailed(format!(
                "Store returned {} reading cart",
                status
            )));
        }

        let document: Value = response
            .json()
            .await
            .map_err(|e| CheckoutError::CommitFailed(format!("Cart document unreadable: {}", e)))?;

        let products = document["fields"]["products"]["arrayValue"]["values"]
            .as_array()
            .map(|values| values.iter().map(from_firestore_value).collect())
            .unwrap_or_default();

        Ok(Some(Cart {
            user_id: user_id.to_string(),
            cart_id: cart_id.to_string(),
            products,
        }))
    }

    async fn commit_order(&self, order: &Order) -> CheckoutResult<()> {
        let url = format!(
            "{}/{}:commit",
            self.config.base_url,
            self.config.documents_root()
        );

        // One batch: create the order (must not already exist) and delete
        // the consumed cart. Firestore applies both or neither.
        let body = json!({
            "writes": [
                {
                    "update": {
                        "name": self.order_name(&order.transaction_id),
                        "fields": order_fields(order),
                    },
                    "currentDocument": { "exists": false },
                },
                {
                    "delete": self.cart_name(&order.user_id, &order.cart_id),
                },
            ]
        });

        debug!("Committing order {}", order.transaction_id);

        let response = self
            .authorized(self.client.post(&url))
            .json(&body)
            .send()
            .await
            .map_err(|e| CheckoutError::CommitFailed(format!("Commit request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!(
                "Commit rejected for order {}: {} - {}",
                order.transaction_id, status, error_text
            );
            return Err(CheckoutError::CommitFailed(format!(
                "Store returned {} committing order {}",
                status, order.transaction_id
            )));
        }

        debug!("Order {} committed", order.transaction_id);
        Ok(())
    }
}

/// Order document fields in Firestore's typed-value encoding
fn order_fields(order: &Order) -> Value {
    let mut fields = Map::new();

    fields.insert(
        "transactionId".to_string(),
        json!({ "stringValue": order.transaction_id }),
    );
    fields.insert("userId".to_string(), json!({ "stringValue": order.user_id }));
    fields.insert("cartId".to_string(), json!({ "stringValue": order.cart_id }));
    fields.insert("amount".to_string(), json!({ "stringValue": order.amount }));
    fields.insert(
        "products".to_string(),
        json!({
            "arrayValue": {
                "values": order.products.iter().map(to_firestore_value).collect::<Vec<_>>()
            }
        }),
    );
    fields.insert(
        "createdAt".to_string(),
        json!({
            "timestampValue": order.created_at.to_rfc3339_opts(SecondsFormat::Micros, true)
        }),
    );
    fields.insert(
        "status".to_string(),
        json!({ "stringValue": order.status.to_string() }),
    );
    fields.insert(
        "paymentMethod".to_string(),
        json!({ "stringValue": order.payment_method }),
    );

    if let Some(session_id) = &order.session_id {
        fields.insert("sessionId".to_string(), json!({ "stringValue": session_id }));
    }
    if let Some(email) = &order.customer_email {
        fields.insert(
            "customerEmail".to_string(),
            json!({ "stringValue": email }),
        );
    }
    if let Some(address) = &order.shipping_address {
        fields.insert("shippingAddress".to_string(), to_firestore_value(address));
    }

    Value::Object(fields)
}

/// Encode an opaque JSON value into Firestore's typed-value form
fn to_firestore_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                // Firestore carries integers as strings
                json!({ "integerValue": i.to_string() })
            } else {
                json!({ "doubleValue": n.as_f64() })
            }
        }
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => json!({
            "arrayValue": {
                "values": items.iter().map(to_firestore_value).collect::<Vec<_>>()
            }
        }),
        Value::Object(map) => {
            let fields: Map<String, Value> = map
                .iter()
                .map(|(k, v)| (k.clone(), to_firestore_value(v)))
                .collect();
            json!({ "mapValue": { "fields": fields } })
        }
    }
}

/// Decode a Firestore typed value back into plain JSON
fn from_firestore_value(value: &Value) -> Value {
    let Some(map) = value.as_object() else {
        return Value::Null;
    };

    if let Some((kind, inner)) = map.iter().next() {
        match kind.as_str() {
            "nullValue" => Value::Null,
            "booleanValue" | "doubleValue" | "stringValue" | "timestampValue" => inner.clone(),
            "integerValue" => inner
                .as_str()
                .and_then(|s| s.parse::<i64>().ok())
                .map(Value::from)
                .unwrap_or_else(|| inner.clone()),
            "arrayValue" => inner["values"]
                .as_array()
                .map(|items| Value::Array(items.iter().map(from_firestore_value).collect()))
                .unwrap_or_else(|| Value::Array(Vec::new())),
            "mapValue" => inner["fields"]
                .as_object()
                .map(|fields| {
                    Value::Object(
                        fields
                            .iter()
                            .map(|(k, v)| (k.clone(), from_firestore_value(v)))
                            .collect(),
                    )
                })
                .unwrap_or_else(|| Value::Object(Map::new())),
            _ => Value::Null,
        }
    } else {
        Value::Null
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_item_encoding() {
        let item = json!({"sku": "A", "qty": 1, "gift": false});
        let encoded = to_firestore_value(&item);

        assert_eq!(
            encoded["mapValue"]["fields"]["sku"],
            json!({ "stringValue": "A" })
        );
        assert_eq!(
            encoded["mapValue"]["fields"]["qty"],
            json!({ "integerValue": "1" })
        );
        assert_eq!(from_firestore_value(&encoded), item);
    }

    #[test]
    fn test_nested_array_decoding() {
        let encoded = json!({
            "arrayValue": {
                "values": [
                    { "stringValue": "A" },
                    { "integerValue": "2" },
                    { "doubleValue": 1.5 },
                ]
            }
        });

        assert_eq!(from_firestore_value(&encoded), json!(["A", 2, 1.5]));
    }

    #[test]
    fn test_order_fields_skip_absent_optionals() {
        let order = Order::new(
            "TX1".to_string(),
            "25.00".to_string(),
            Cart {
                user_id: "U1".to_string(),
                cart_id: "C1".to_string(),
                products: vec![json!({"sku": "A", "qty": 1})],
            },
            None,
            None,
            None,
        )
        .unwrap();

        let fields = order_fields(&order);
        assert_eq!(fields["transactionId"], json!({ "stringValue": "TX1" }));
        assert_eq!(fields["status"], json!({ "stringValue": "Completed" }));
        assert_eq!(fields["paymentMethod"], json!({ "stringValue": "Braintree" }));
        assert!(fields.get("sessionId").is_none());
        assert!(fields.get("customerEmail").is_none());
        assert!(fields.get("shippingAddress").is_none());
    }
}

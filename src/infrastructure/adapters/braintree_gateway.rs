use crate::domain::errors::{CheckoutError, CheckoutResult};
use crate::infrastructure::config::BraintreeConfig;
use crate::ports::payment_gateway_port::*;
use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, error};

const BRAINTREE_API_VERSION: &str = "2019-01-01";

/// Sale statuses that mean the charge went through. With immediate
/// settlement requested, a fresh sale lands in submitted_for_settlement.
const SUCCESSFUL_SALE_STATUSES: &[&str] = &["submitted_for_settlement", "settling", "settled"];

/// Braintree gateway adapter over the GraphQL API
#[derive(Clone)]
pub struct BraintreeGateway {
    config: Arc<BraintreeConfig>,
    client: Client,
}

impl BraintreeGateway {
    pub fn new(config: Arc<BraintreeConfig>) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Basic auth from the keypair, as the GraphQL API expects
    fn authorization(&self) -> String {
        let credentials = format!("{}:{}", self.config.public_key, self.config.private_key);
        format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(credentials)
        )
    }

    /// Execute one GraphQL request. Transport failures and non-2xx
    /// responses are gateway faults; GraphQL-level errors are left in the
    /// body for the caller, since for sales they are business outcomes.
    async fn graphql(&self, query: &str, variables: Value) -> CheckoutResult<Value> {
        let body = json!({ "query": query, "variables": variables });
        debug!("Gateway request: {}", body);

        let response = self
            .client
            .post(&self.config.base_url)
            .header("Authorization", self.authorization())
            .header("Braintree-Version", BRAINTREE_API_VERSION)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                CheckoutError::GatewayUnavailable(format!("Gateway request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Gateway API error: {} - {}", status, error_text);
            return Err(CheckoutError::GatewayUnavailable(format!(
                "Gateway returned {}",
                status
            )));
        }

        response.json().await.map_err(|e| {
            CheckoutError::GatewayUnavailable(format!("Gateway response unreadable: {}", e))
        })
    }
}

/// First GraphQL error message, if the response carries any
fn first_error_message(body: &Value) -> Option<String> {
    body["errors"][0]["message"].as_str().map(str::to_string)
}

/// Braintree reports statuses as SCREAMING_SNAKE enums; the rest of the
/// system speaks the lower-case form
fn normalize_status(status: &str) -> String {
    status.to_lowercase()
}

#[async_trait]
impl PaymentGatewayPort for BraintreeGateway {
    async fn generate_token(&self, merchant_account_id: Option<&str>) -> CheckoutResult<String> {
        let query = r#"
            mutation CreateClientToken($input: CreateClientTokenInput!) {
                createClientToken(input: $input) {
                    clientToken
                }
            }
        "#;

        let mut client_token = serde_json::Map::new();
        if let Some(account) = merchant_account_id {
            client_token.insert("merchantAccountId".to_string(), json!(account));
        }
        let variables = json!({ "input": { "clientToken": client_token } });

        let body = self.graphql(query, variables).await?;

        if let Some(message) = first_error_message(&body) {
            error!("Client token generation rejected: {}", message);
            return Err(CheckoutError::GatewayUnavailable(message));
        }

        body["data"]["createClientToken"]["clientToken"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                CheckoutError::GatewayUnavailable("Gateway returned no client token".to_string())
            })
    }

    async fn submit_sale(&self, request: SaleRequest) -> CheckoutResult<SaleResult> {
        let query = r#"
            mutation ChargePaymentMethod($input: ChargePaymentMethodInput!) {
                chargePaymentMethod(input: $input) {
                    transaction {
                        id
                        status
                        amount { value }
                        paymentMethodSnapshot {
                            ... on PayPalTransactionDetails {
                                payer { email }
                                shippingAddress {
                                    fullName
                                    addressLine1
                                    adminArea1
                                    adminArea2
                                    postalCode
                                    countryCode
                                }
                            }
                        }
                    }
                }
            }
        "#;

        let variables = json!({
            "input": {
                "paymentMethodId": request.payment_method_nonce,
                "transaction": {
                    "amount": request.amount,
                    "vaultPaymentMethodAfterTransacting": {
                        "when": "ON_SUCCESSFUL_TRANSACTION"
                    }
                }
            }
        });

        let body = self.graphql(query, variables).await?;

        // A GraphQL-level rejection of a sale is a decline, not a fault
        if let Some(message) = first_error_message(&body) {
            debug!("Sale rejected by gateway: {}", message);
            return Ok(SaleResult {
                success: false,
                message: Some(message),
                ..SaleResult::default()
            });
        }

        let transaction = &body["data"]["chargePaymentMethod"]["transaction"];
        let status = normalize_status(transaction["status"].as_str().unwrap_or_default());
        let success = SUCCESSFUL_SALE_STATUSES.contains(&status.as_str());

        let snapshot = &transaction["paymentMethodSnapshot"];
        let shipping_address = match &snapshot["shippingAddress"] {
            Value::Null => None,
            address => Some(address.clone()),
        };

        Ok(SaleResult {
            success,
            transaction_id: transaction["id"].as_str().map(str::to_string),
            amount: transaction["amount"]["value"].as_str().map(str::to_string),
            customer_email: snapshot["payer"]["email"].as_str().map(str::to_string),
            shipping_address,
            message: if success {
                None
            } else {
                Some(format!("Transaction {}", status))
            },
        })
    }

    async fn find_transaction(&self, transaction_id: &str) -> CheckoutResult<TransactionStatus> {
        let query = r#"
            query TransactionStatus($id: ID!) {
                node(id: $id) {
                    ... on Transaction {
                        id
                        status
                        amount { value }
                    }
                }
            }
        "#;

        let body = self
            .graphql(query, json!({ "id": transaction_id }))
            .await?;

        let node = &body["data"]["node"];
        if node.is_null() || node["status"].is_null() {
            return Err(CheckoutError::NotFound(format!(
                "Transaction {} not found",
                transaction_id
            )));
        }

        Ok(TransactionStatus {
            status: normalize_status(node["status"].as_str().unwrap_or_default()),
            amount: node["amount"]["value"].as_str().map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_normalization() {
        assert_eq!(
            normalize_status("SUBMITTED_FOR_SETTLEMENT"),
            "submitted_for_settlement"
        );
        assert_eq!(normalize_status("SETTLED"), "settled");
        assert_eq!(normalize_status("PROCESSOR_DECLINED"), "processor_declined");
    }

    #[test]
    fn test_successful_sale_statuses() {
        assert!(SUCCESSFUL_SALE_STATUSES.contains(&"submitted_for_settlement"));
        assert!(!SUCCESSFUL_SALE_STATUSES.contains(&"processor_declined"));
        assert!(!SUCCESSFUL_SALE_STATUSES.contains(&"authorization_expired"));
    }

    #[test]
    fn test_first_error_message_extraction() {
        let body = json!({ "errors": [{ "message": "Amount is invalid" }] });
        assert_eq!(
            first_error_message(&body).as_deref(),
            Some("Amount is invalid")
        );
        assert_eq!(first_error_message(&json!({ "data": {} })), None);
    }
}

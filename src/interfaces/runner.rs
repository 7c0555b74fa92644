use crate::application::gateway::{ProfileStatus, StripeGateway};
use crate::application::response_mapper::{ProfileCreationOutcome, ResponseMapper};
use crate::domain::card::CreditCard;
use crate::domain::money::MinorUnits;
use crate::domain::options::GatewayOptions;
use crate::domain::order::Order;
use crate::domain::payment::Payment;
use crate::domain::response::ProviderResponse;
use crate::error::{GatewayError, Result};
use crate::interfaces::csv::operation_reader::{Operation, OperationKind};
use crate::interfaces::csv::result_writer::OperationResult;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::collections::BTreeMap;

/// Plays the host's part for the binary: keeps orders and payments, looks up the
/// payment's card for charges, calls the gateway and records what came back.
pub struct OperationRunner {
    gateway: StripeGateway,
    orders: BTreeMap<u64, Order>,
    payments: BTreeMap<u64, Payment>,
}

impl OperationRunner {
    pub fn new(gateway: StripeGateway, orders: Vec<Order>, payments: Vec<Payment>) -> Self {
        Self {
            gateway,
            orders: orders.into_iter().map(|o| (o.id, o)).collect(),
            payments: payments.into_iter().map(|p| (p.id, p)).collect(),
        }
    }

    pub fn payment(&self, payment_id: u64) -> Option<&Payment> {
        self.payments.get(&payment_id)
    }

    pub async fn run(&mut self, operation: &Operation) -> Result<OperationResult> {
        let mut payment = self
            .payments
            .get(&operation.payment)
            .cloned()
            .ok_or_else(|| unknown("payment", operation.payment))?;
        let order = self
            .orders
            .get(&payment.order_id)
            .cloned()
            .ok_or_else(|| unknown("order", payment.order_id))?;
        let options = GatewayOptions::new().with("order_id", order.number.clone());

        let result = match operation.op {
            OperationKind::Purchase | OperationKind::Authorize => {
                let card = self.card_for(&payment).await?;
                let amount = operation.amount.unwrap_or(payment.amount);
                let response = if operation.op == OperationKind::Purchase {
                    self.gateway.purchase(amount, &card, &options).await?
                } else {
                    self.gateway.authorize(amount, &card, &options).await?
                };
                if let Some(reference) = ResponseMapper::transaction_reference(&response) {
                    payment.response_code = Some(reference.to_string());
                }
                charge_result(operation, response)
            }
            OperationKind::Capture => {
                let response = self.gateway.capture(&payment, None, &options).await?;
                charge_result(operation, response)
            }
            OperationKind::Credit => {
                let amount = match operation.amount {
                    Some(amount) => minor_units(amount)?,
                    None => MinorUnits::from_decimal(payment.amount)?,
                };
                let reference = transaction_reference(&payment)?;
                let response = self
                    .gateway
                    .credit(amount, None, &reference, &options)
                    .await?;
                charge_result(operation, response)
            }
            OperationKind::Void => {
                let reference = transaction_reference(&payment)?;
                let response = self.gateway.void(&reference, None, &options).await?;
                charge_result(operation, response)
            }
            OperationKind::CreateProfile => {
                let status = self.gateway.create_profile(&mut payment, &order).await?;
                profile_result(operation, status)
            }
        };

        self.payments.insert(payment.id, payment);
        Ok(result)
    }

    async fn card_for(&self, payment: &Payment) -> Result<CreditCard> {
        self.gateway
            .cards()
            .get(payment.source_id)
            .await?
            .ok_or(GatewayError::CardNotFound(payment.source_id))
    }
}

fn unknown(kind: &str, id: u64) -> GatewayError {
    GatewayError::StorageError(format!("unknown {kind} {id}"))
}

fn transaction_reference(payment: &Payment) -> Result<String> {
    payment
        .response_code
        .clone()
        .ok_or(GatewayError::MissingTransactionReference(payment.id))
}

fn minor_units(amount: Decimal) -> Result<MinorUnits> {
    if !amount.fract().is_zero() {
        return Err(GatewayError::InvalidAmount(format!(
            "{amount} is not a whole number of minor units"
        )));
    }
    amount
        .to_i64()
        .map(MinorUnits)
        .ok_or_else(|| GatewayError::InvalidAmount(format!("{amount} overflows")))
}

fn charge_result(operation: &Operation, response: ProviderResponse) -> OperationResult {
    OperationResult {
        op: operation.op.to_string(),
        payment: operation.payment,
        success: response.success,
        reference: ResponseMapper::transaction_reference(&response).map(str::to_string),
        message: response.message,
    }
}

fn profile_result(operation: &Operation, status: ProfileStatus) -> OperationResult {
    let (success, reference, message) = match status {
        ProfileStatus::AlreadyProfiled => (true, None, "card already has a profile".to_string()),
        ProfileStatus::Created(outcome) => {
            let message = match outcome {
                ProfileCreationOutcome::NewCustomer { .. } => "new customer",
                ProfileCreationOutcome::AttachedCard { .. } => "card attached to customer",
            };
            let reference = match outcome.card_id() {
                Some(card_id) => format!("{}:{card_id}", outcome.customer_id()),
                None => outcome.customer_id().to_string(),
            };
            (true, Some(reference), message.to_string())
        }
        ProfileStatus::Rejected(message) => (false, None, message),
    };
    OperationResult {
        op: operation.op.to_string(),
        payment: operation.payment,
        success,
        reference,
        message,
    }
}

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;

/// How the order will be paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    Cash,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Cash => "cash",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "Card online",
            PaymentMethod::Cash => "Cash on delivery",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "card" => Some(PaymentMethod::Card),
            "cash" => Some(PaymentMethod::Cash),
            _ => None,
        }
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Card
    }
}

/// Contact and delivery details collected at checkout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckoutForm {
    pub email: String,
    pub phone: String,
    pub address: String,
    pub payment_method: PaymentMethod,
}

impl CheckoutForm {
    pub fn new(
        email: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
        payment_method: PaymentMethod,
    ) -> Self {
        Self {
            email: email.into(),
            phone: phone.into(),
            address: address.into(),
            payment_method,
        }
    }

    /// Checks all fields, reporting the first problem found.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(CommerceError::Validation("email is required".to_string()));
        }
        if !is_plausible_email(email) {
            return Err(CommerceError::Validation(
                "email address is malformed".to_string(),
            ));
        }

        let digits = self.phone.chars().filter(|c| c.is_ascii_digit()).count();
        if digits < 10 {
            return Err(CommerceError::Validation(
                "phone number must contain at least 10 digits".to_string(),
            ));
        }

        if self.address.trim().is_empty() {
            return Err(CommerceError::Validation(
                "delivery address is required".to_string(),
            ));
        }

        Ok(())
    }
}

// Local-part, "@", and a domain with a dot. Anything stricter belongs
// to the mail provider.
fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}

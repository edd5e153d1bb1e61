use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;

use crate::error::AppError;

/// First value `NUMERIC(10, 2)` cannot hold.
fn price_limit() -> Decimal {
    Decimal::new(100_000_000, 0)
}

/// Request body for creating a product. `price` accepts a JSON number or string.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: Decimal,
}

impl CreateProductRequest {
    pub fn validate(mut self) -> Result<Self, AppError> {
        self.name = self.name.trim().to_string();
        if self.name.is_empty() {
            return Err(AppError::BadRequest("name must not be empty".into()));
        }
        if self.name.contains('\0') {
            return Err(AppError::BadRequest(
                "name must not contain NUL characters".into(),
            ));
        }
        if self.name.chars().count() > 255 {
            return Err(AppError::BadRequest(
                "name must be at most 255 characters".into(),
            ));
        }

        // Half away from zero to two places, matching NUMERIC(10, 2).
        let mut price = self
            .price
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        price.rescale(2);
        if price.is_sign_negative() {
            return Err(AppError::BadRequest("price must not be negative".into()));
        }
        if price >= price_limit() {
            return Err(AppError::BadRequest("price is too large".into()));
        }
        self.price = price;
        Ok(self)
    }
}

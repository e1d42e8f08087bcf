//! Order pricing.
//!
//! A quote is fuel cost (litres × price per litre) plus a flat convenience fee plus GST
//! charged on the fee only. Customers order either by litres or by a rupee amount; in the
//! latter case the litres are derived from the amount. Quantities and money are rounded to
//! two decimals.

use crate::model::{FuelType, OrderDraft};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    #[error("Quantity must be a positive number, got {0}")]
    InvalidQuantity(f64),
}

/// What the customer asked for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuantityRequest {
    Litres(f64),
    Rupees(f64),
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Tariff {
    pub petrol_per_litre: f64,
    pub diesel_per_litre: f64,
    pub convenience_fee: f64,
    pub gst_rate_on_fee: f64,
}

impl Default for Tariff {
    fn default() -> Self {
        Self {
            petrol_per_litre: 105.45,
            diesel_per_litre: 95.50,
            convenience_fee: 30.00,
            gst_rate_on_fee: 0.18,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub fuel_type: FuelType,
    pub litres: f64,
    pub rupees: f64,
    pub price_per_litre: f64,
    pub fuel_cost: f64,
    pub convenience_fee: f64,
    pub gst_on_fee: f64,
    pub total_amount: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl Tariff {
    pub fn price_per_litre(&self, fuel: FuelType) -> f64 {
        match fuel {
            FuelType::Petrol => self.petrol_per_litre,
            FuelType::Diesel => self.diesel_per_litre,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        for (name, price) in [
            ("petrol_per_litre", self.petrol_per_litre),
            ("diesel_per_litre", self.diesel_per_litre),
        ] {
            if !(price.is_finite() && price > 0.0) {
                return Err(format!("pricing.{name} must be positive, got {price}"));
            }
        }
        if !(self.convenience_fee.is_finite() && self.convenience_fee >= 0.0) {
            return Err(format!(
                "pricing.convenience_fee must not be negative, got {}",
                self.convenience_fee
            ));
        }
        if !(0.0..=1.0).contains(&self.gst_rate_on_fee) {
            return Err(format!(
                "pricing.gst_rate_on_fee must be within 0..=1, got {}",
                self.gst_rate_on_fee
            ));
        }
        Ok(())
    }

    pub fn quote(&self, fuel: FuelType, request: QuantityRequest) -> Result<Quote, PricingError> {
        let price = self.price_per_litre(fuel);
        let (litres, rupees) = match request {
            QuantityRequest::Litres(litres) => {
                ensure_positive(litres)?;
                (litres, round2(litres * price))
            }
            QuantityRequest::Rupees(rupees) => {
                ensure_positive(rupees)?;
                let litres = round2(rupees / price);
                // A tiny amount can round down to zero litres.
                ensure_positive(litres)?;
                (litres, rupees)
            }
        };
        let fuel_cost = round2(litres * price);
        let gst_on_fee = round2(self.convenience_fee * self.gst_rate_on_fee);
        Ok(Quote {
            fuel_type: fuel,
            litres,
            rupees,
            price_per_litre: price,
            fuel_cost,
            convenience_fee: self.convenience_fee,
            gst_on_fee,
            total_amount: round2(fuel_cost + self.convenience_fee + gst_on_fee),
        })
    }
}

fn ensure_positive(quantity: f64) -> Result<(), PricingError> {
    if quantity.is_finite() && quantity > 0.0 {
        Ok(())
    } else {
        Err(PricingError::InvalidQuantity(quantity))
    }
}

impl Quote {
    /// The draft fields this quote fills in.
    pub fn to_draft(&self) -> OrderDraft {
        OrderDraft {
            fuel_type: Some(self.fuel_type),
            quantity_liters: Some(self.litres),
            quantity_rupees: Some(self.rupees),
            price_per_litre: Some(self.price_per_litre),
            fuel_cost: Some(self.fuel_cost),
            convenience_fee: Some(self.convenience_fee),
            gst_on_fee: Some(self.gst_on_fee),
            total_amount: Some(self.total_amount),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_by_litres() {
        let quote = Tariff::default()
            .quote(FuelType::Petrol, QuantityRequest::Litres(5.0))
            .unwrap();

        assert_eq!(quote.price_per_litre, 105.45);
        assert_eq!(quote.fuel_cost, 527.25);
        assert_eq!(quote.rupees, 527.25);
        assert_eq!(quote.gst_on_fee, 5.4);
        assert_eq!(quote.total_amount, 562.65);
    }

    #[test]
    fn quote_by_rupees_derives_litres() {
        let quote = Tariff::default()
            .quote(FuelType::Diesel, QuantityRequest::Rupees(500.0))
            .unwrap();

        assert_eq!(quote.litres, 5.24);
        assert_eq!(quote.fuel_cost, 500.42);
        assert_eq!(quote.total_amount, 535.82);
    }

    #[test]
    fn rejects_non_positive_quantities() {
        let tariff = Tariff::default();
        for request in [
            QuantityRequest::Litres(0.0),
            QuantityRequest::Litres(-2.0),
            QuantityRequest::Rupees(f64::NAN),
        ] {
            assert!(matches!(
                tariff.quote(FuelType::Petrol, request),
                Err(PricingError::InvalidQuantity(_))
            ));
        }
    }

    #[test]
    fn rejects_amounts_that_buy_no_fuel() {
        assert_eq!(
            Tariff::default().quote(FuelType::Petrol, QuantityRequest::Rupees(0.04)),
            Err(PricingError::InvalidQuantity(0.0))
        );
        let smallest = Tariff::default()
            .quote(FuelType::Petrol, QuantityRequest::Rupees(1.0))
            .unwrap();
        assert_eq!(smallest.litres, 0.01);
    }
}

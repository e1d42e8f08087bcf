//! Simulated captain dispatch.

use crate::model::{DeliveryCaptain, GeoPoint};
use rand::Rng;

/// Degrees the captain starts away from the delivery location, on both axes.
const START_OFFSET: f64 = 0.01;

/// The captain every order gets.
pub fn assign(delivery_location: GeoPoint, photo_url: &str) -> DeliveryCaptain {
    DeliveryCaptain {
        id: "capt001".to_string(),
        name: "Ramesh Kumar".to_string(),
        rating: 4.8,
        vehicle_number: "MH 01 DR 1234".to_string(),
        photo_url: photo_url.to_string(),
        current_location: Some(delivery_location.offset(START_OFFSET, START_OFFSET)),
    }
}

/// Four-digit code the customer reads out to the captain at handover.
pub fn one_time_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    rng.gen_range(1000..=9999).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn captain_starts_near_the_delivery_location() {
        let captain = assign(GeoPoint::new(19.0760, 72.8777), "https://example.test/c.png");
        let start = captain.current_location.unwrap();
        assert!((start.lat - 19.0860).abs() < 1e-9);
        assert!((start.lng - 72.8877).abs() < 1e-9);
        assert_eq!(captain.photo_url, "https://example.test/c.png");
    }

    #[test]
    fn codes_are_four_digits() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let code = one_time_code(&mut rng);
            assert_eq!(code.len(), 4);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }
}

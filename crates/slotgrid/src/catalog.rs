//! Service catalog configuration.
//!
//! Businesses configure the services they offer; a booking references one
//! or more service ids and its requested duration is the sum of their
//! durations. The catalog is explicit engine input rather than a built-in
//! list, so one engine build serves any business.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// One bookable service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub duration_minutes: i64,
}

/// The set of services a business offers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceCatalog {
    services: Vec<Service>,
}

impl ServiceCatalog {
    pub fn new(services: Vec<Service>) -> Self {
        Self { services }
    }

    /// Stock four-service mobile-wash catalog, for businesses that have not
    /// configured their own yet.
    pub fn standard() -> Self {
        let service = |id: &str, name: &str, description: &str, price_cents, duration_minutes| {
            Service {
                id: id.to_string(),
                name: name.to_string(),
                description: description.to_string(),
                price_cents,
                duration_minutes,
            }
        };
        Self::new(vec![
            service(
                "basic",
                "Basic Wash",
                "Exterior wash & dry, tire shine",
                3000,
                30,
            ),
            service(
                "full",
                "Full Detail",
                "Deep clean inside & out, clay bar, sealant",
                12000,
                120,
            ),
            service(
                "wax",
                "Waxing",
                "Premium carnauba wax application",
                5000,
                45,
            ),
            service(
                "interior",
                "Interior Cleaning",
                "Vacuum, shampoo mats, dashboard wipe",
                8000,
                60,
            ),
        ])
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn get(&self, id: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }

    /// Total duration of a multi-service booking.
    ///
    /// # Errors
    /// Returns `EngineError::UnknownService` for any id not in the catalog.
    pub fn total_duration_minutes(&self, ids: &[&str]) -> Result<i64> {
        ids.iter().try_fold(0i64, |total, id| {
            self.get(id)
                .map(|s| total + s.duration_minutes)
                .ok_or_else(|| EngineError::UnknownService((*id).to_string()))
        })
    }
}

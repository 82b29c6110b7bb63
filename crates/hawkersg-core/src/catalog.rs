//! Normalized catalog records shared by the normalizer, the store and the CLI.
//!
//! Field names serialize in camelCase (`hawkerId`, `stallCount`, `isOpen`)
//! because that is the shape the directory front end consumes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cuisine::Cuisine;
use crate::hours::WeeklySchedule;

/// Image shown for hawker centres whose record carries none.
pub const PLACEHOLDER_HAWKER_IMAGE: &str = "/placeholder-hawker.jpg";

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance in kilometres (haversine).
    #[must_use]
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();
        let a = (d_lat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos() * other.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }
}

/// A hawker centre after defaulting. `stall_count` is the number of stalls
/// the normalizer linked to this centre, not the backend's figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HawkerCenter {
    pub id: String,
    pub name: String,
    pub address: String,
    pub description: String,
    pub image: String,
    pub rating: f64,
    pub stall_count: u32,
    pub coordinates: Coordinates,
}

/// One dish on a stall's menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    /// `None` when the backend sent a price that does not parse as a decimal.
    pub price: Option<Decimal>,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stall {
    pub id: String,
    /// Id of the linked [`HawkerCenter`], or the backend's raw hawker-centre
    /// text when no centre could be matched.
    pub hawker_id: String,
    pub name: String,
    /// Kept snake_case; the front end reads `license_number`.
    #[serde(rename = "license_number")]
    pub license_number: String,
    pub description: String,
    pub cuisine: Cuisine,
    pub location: String,
    pub images: Vec<String>,
    pub rating: f64,
    pub review_count: u32,
    pub price_range: String,
    pub is_open: bool,
    pub menu: Vec<MenuItem>,
    pub operating_hours: WeeklySchedule,
}

impl Stall {
    /// Parsed menu prices, skipping items without a usable price.
    pub fn prices(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.menu.iter().filter_map(|item| item.price)
    }

    #[must_use]
    pub fn min_price(&self) -> Option<Decimal> {
        self.prices().min()
    }

    #[must_use]
    pub fn max_price(&self) -> Option<Decimal> {
        self.prices().max()
    }

    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

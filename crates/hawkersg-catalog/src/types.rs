//! Raw backend record types for the `/hawkers`, `/stalls` and menu-item
//! endpoints, plus the lenient parsing step that produces them.
//!
//! ## Observed shape of the backend payloads
//!
//! ### Hawker centres (`GET /hawkers`)
//! The identifier arrives under `id`, `hawker_id` or `slug` depending on how
//! the row was imported, and sometimes not at all. Ids may be numbers.
//! The display name is `name` on newer rows and `hawker_name` on older ones.
//! Coordinates are either nested (`{"coordinates": {"lat": .., "lng": ..}}`)
//! or flat (`latitude` / `longitude`), occasionally as numeric strings.
//! The stall count is `stallCount` or `stall_count`; it is unreliable and is
//! recomputed during normalization anyway.
//!
//! ### Stalls (`GET /stalls`)
//! `hawker_centre` is free text copied from the licensing registry, not a
//! foreign key. The licensee is `licensee_name`, or `license_name` on some
//! rows, and for informally registered stalls is an email address.
//! `stall_name` may be `null`, blank, a placeholder like `"NO SIGNBOARD"`, or
//! just the licensee's name. `is_open` is a boolean when present.
//!
//! ### Menu items (`GET /business/{license}/menu-items`)
//! `{id, name, description, price, photo}`; `price` is a decimal string such
//! as `"3.50"`. Items embedded in a stall record use `image` instead of
//! `photo`.
//!
//! Every field is optional here. Defaulting happens in one place per entity
//! in `normalize.rs`.

use serde_json::{Map, Value};

use hawkersg_core::MenuItem;

use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::parse;

/// Nested `coordinates` object as sent by the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawCoordinates {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawHawkerRecord {
    pub id: Option<String>,
    pub hawker_id: Option<String>,
    pub slug: Option<String>,
    pub name: Option<String>,
    /// Display name on older rows; used only when `name` is absent.
    pub hawker_name: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub rating: Option<f64>,
    /// `stallCount`, falling back to `stall_count`.
    pub stall_count: Option<u32>,
    pub coordinates: Option<RawCoordinates>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl RawHawkerRecord {
    #[must_use]
    pub fn from_json(obj: &Map<String, Value>) -> Self {
        let coordinates = obj
            .get("coordinates")
            .and_then(Value::as_object)
            .map(|c| RawCoordinates {
                lat: parse::number(c.get("lat")),
                lng: parse::number(c.get("lng")),
            });

        Self {
            id: parse::text(obj.get("id")),
            hawker_id: parse::text(obj.get("hawker_id")),
            slug: parse::text(obj.get("slug")),
            name: parse::text(obj.get("name")),
            hawker_name: parse::text(obj.get("hawker_name")),
            address: parse::text(obj.get("address")),
            description: parse::text(obj.get("description")),
            image: parse::text(obj.get("image")),
            rating: parse::number(obj.get("rating")),
            stall_count: parse::count(parse::first_present(obj, &["stallCount", "stall_count"])),
            coordinates,
            latitude: parse::number(obj.get("latitude")),
            longitude: parse::number(obj.get("longitude")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawStallRecord {
    pub id: Option<String>,
    pub stall_name: Option<String>,
    /// `licensee_name`, falling back to `license_name`.
    pub licensee_name: Option<String>,
    pub license_number: Option<String>,
    pub description: Option<String>,
    pub establishment_address: Option<String>,
    pub hawker_centre: Option<String>,
    pub photo: Option<String>,
    /// `true` only when the backend sent a JSON boolean `true`.
    pub is_open: bool,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    /// `None` when the record carries no `menu` array.
    pub menu: Option<Vec<RawMenuItem>>,
}

impl RawStallRecord {
    #[must_use]
    pub fn from_json(obj: &Map<String, Value>) -> Self {
        let menu = obj.get("menu").and_then(Value::as_array).map(|items| {
            items
                .iter()
                .filter_map(Value::as_object)
                .map(RawMenuItem::from_json)
                .collect()
        });

        Self {
            id: parse::text(obj.get("id")),
            stall_name: parse::text(obj.get("stall_name")),
            licensee_name: parse::text(parse::first_present(
                obj,
                &["licensee_name", "license_name"],
            )),
            license_number: parse::text(obj.get("license_number")),
            description: parse::text(obj.get("description")),
            establishment_address: parse::text(obj.get("establishment_address")),
            hawker_centre: parse::text(obj.get("hawker_centre")),
            photo: parse::text(obj.get("photo")),
            is_open: parse::strict_true(obj.get("is_open")),
            rating: parse::number(obj.get("rating")),
            review_count: parse::count(obj.get("review_count")),
            menu,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawMenuItem {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<rust_decimal::Decimal>,
    /// `photo`, falling back to `image`.
    pub photo: Option<String>,
}

impl RawMenuItem {
    #[must_use]
    pub fn from_json(obj: &Map<String, Value>) -> Self {
        Self {
            id: parse::text(obj.get("id")),
            name: parse::text(obj.get("name")),
            description: parse::text(obj.get("description")),
            price: parse::price(obj.get("price")),
            photo: parse::text(parse::first_present(obj, &["photo", "image"])),
        }
    }

    #[must_use]
    pub fn into_menu_item(self) -> MenuItem {
        MenuItem {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            price: self.price,
            image: self.photo.unwrap_or_default(),
        }
    }
}

/// Parses the `/hawkers` array. Non-object elements become all-absent
/// records so the output stays index-aligned with the input.
#[must_use]
pub fn parse_hawker_records(values: &[Value]) -> (Vec<RawHawkerRecord>, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();
    let records = values
        .iter()
        .enumerate()
        .map(|(index, value)| match value.as_object() {
            Some(obj) => RawHawkerRecord::from_json(obj),
            None => {
                diagnostics.push(Diagnostic::hawker(index, "", DiagnosticKind::MalformedRecord));
                RawHawkerRecord::default()
            }
        })
        .collect();
    (records, diagnostics)
}

/// Parses the `/stalls` array. Non-object elements become all-absent
/// records, which the stall filter later drops as unnamed.
#[must_use]
pub fn parse_stall_records(values: &[Value]) -> (Vec<RawStallRecord>, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();
    let records = values
        .iter()
        .enumerate()
        .map(|(index, value)| match value.as_object() {
            Some(obj) => RawStallRecord::from_json(obj),
            None => {
                diagnostics.push(Diagnostic::stall(index, "", DiagnosticKind::MalformedRecord));
                RawStallRecord::default()
            }
        })
        .collect();
    (records, diagnostics)
}

/// Parses a menu-items response body into normalized menu items.
#[must_use]
pub fn parse_menu_items(values: &[Value]) -> Vec<MenuItem> {
    values
        .iter()
        .filter_map(Value::as_object)
        .map(|obj| RawMenuItem::from_json(obj).into_menu_item())
        .collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::*;

    #[test]
    fn hawker_reads_nested_and_flat_coordinates() {
        let nested = json!({"id": "h1", "coordinates": {"lat": 1.3, "lng": "103.8"}});
        let rec = RawHawkerRecord::from_json(nested.as_object().unwrap());
        assert_eq!(
            rec.coordinates,
            Some(RawCoordinates {
                lat: Some(1.3),
                lng: Some(103.8)
            })
        );

        let flat = json!({"id": "h2", "latitude": 1.28, "longitude": 103.82});
        let rec = RawHawkerRecord::from_json(flat.as_object().unwrap());
        assert_eq!(rec.coordinates, None);
        assert_eq!(rec.latitude, Some(1.28));
        assert_eq!(rec.longitude, Some(103.82));
    }

    #[test]
    fn hawker_name_and_count_aliases() {
        let raw = json!({"hawker_id": 7, "hawker_name": "Old Airport Road", "stall_count": "12"});
        let rec = RawHawkerRecord::from_json(raw.as_object().unwrap());
        assert_eq!(rec.id, None);
        assert_eq!(rec.hawker_id.as_deref(), Some("7"));
        assert_eq!(rec.name, None);
        assert_eq!(rec.hawker_name.as_deref(), Some("Old Airport Road"));
        assert_eq!(rec.stall_count, Some(12));
    }

    #[test]
    fn stall_licensee_alias_and_strict_open_flag() {
        let raw = json!({
            "id": 5,
            "stall_name": "Hill Street Char Kway Teow",
            "license_name": "LIM AH SENG",
            "is_open": "true",
            "rating": "4.5"
        });
        let rec = RawStallRecord::from_json(raw.as_object().unwrap());
        assert_eq!(rec.id.as_deref(), Some("5"));
        assert_eq!(rec.licensee_name.as_deref(), Some("LIM AH SENG"));
        assert!(!rec.is_open);
        assert_eq!(rec.rating, Some(4.5));
        assert_eq!(rec.menu, None);
    }

    #[test]
    fn stall_embedded_menu_skips_non_objects() {
        let raw = json!({
            "stall_name": "Ah Seng Noodles",
            "menu": [{"id": 1, "name": "Lor Mee", "price": "4.00", "image": "lor.jpg"}, "junk"]
        });
        let rec = RawStallRecord::from_json(raw.as_object().unwrap());
        let menu = rec.menu.unwrap();
        assert_eq!(menu.len(), 1);
        assert_eq!(menu[0].photo.as_deref(), Some("lor.jpg"));
        assert_eq!(menu[0].price, Some(Decimal::new(400, 2)));
    }

    #[test]
    fn non_object_elements_are_flagged_malformed() {
        let values = vec![json!({"id": "h1"}), json!("oops"), json!(null)];
        let (records, diagnostics) = parse_hawker_records(&values);
        assert_eq!(records.len(), 3);
        assert_eq!(records[1], RawHawkerRecord::default());
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].record.index, 1);
        assert_eq!(diagnostics[1].kind, DiagnosticKind::MalformedRecord);
    }

    #[test]
    fn menu_items_from_endpoint_body() {
        let values = vec![json!({
            "id": 11,
            "name": "Chicken Rice",
            "description": "Steamed",
            "price": "3.50",
            "photo": "cr.jpg"
        })];
        let items = parse_menu_items(&values);
        assert_eq!(items[0].id, "11");
        assert_eq!(items[0].price, Some(Decimal::new(350, 2)));
        assert_eq!(items[0].image, "cr.jpg");
    }
}

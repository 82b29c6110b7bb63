use hawkersg_core::{MenuItem, WeeklySchedule};

use super::*;
use crate::normalize::NormalizedCatalog;

fn hawker(id: &str, name: &str, address: &str, lat: f64, lng: f64, rating: f64) -> HawkerCenter {
    HawkerCenter {
        id: id.to_owned(),
        name: name.to_owned(),
        address: address.to_owned(),
        description: String::new(),
        image: String::new(),
        rating,
        stall_count: 0,
        coordinates: Coordinates::new(lat, lng),
    }
}

fn stall(id: &str, hawker_id: &str, name: &str, cuisine: Cuisine, rating: f64) -> Stall {
    Stall {
        id: id.to_owned(),
        hawker_id: hawker_id.to_owned(),
        name: name.to_owned(),
        license_number: format!("L-{id}"),
        description: String::new(),
        cuisine,
        location: String::new(),
        images: vec![],
        rating,
        review_count: 0,
        price_range: "$".to_owned(),
        is_open: false,
        menu: vec![],
        operating_hours: WeeklySchedule::default(),
    }
}

fn priced(prices: &[&str]) -> Vec<MenuItem> {
    prices
        .iter()
        .enumerate()
        .map(|(i, p)| MenuItem {
            id: i.to_string(),
            name: format!("Dish {i}"),
            description: String::new(),
            price: p.parse().ok(),
            image: String::new(),
        })
        .collect()
}

/// Tiong Bahru and Maxwell are about 1.3 km apart; Changi Village is ~20 km east.
fn snapshot() -> CatalogSnapshot {
    let hawkers = vec![
        hawker("tb", "Tiong Bahru Market", "30 Seng Poh Rd", 1.2850, 103.8325, 4.1),
        hawker("mx", "Maxwell Food Centre", "1 Kadayanallur St", 1.2803, 103.8448, 4.5),
        hawker("cv", "Changi Village Hawker Centre", "2 Changi Village Rd", 1.3891, 103.9876, 3.9),
    ];

    let mut chicken_rice = stall("s1", "mx", "Tian Tian Chicken Rice", Cuisine::Chinese, 4.6);
    chicken_rice.is_open = true;
    chicken_rice.menu = priced(&["5.00", "6.50"]);

    let mut dessert = stall("s2", "tb", "Ah Chew Dessert", Cuisine::Dessert, 3.8);
    dessert.menu = priced(&["2.50", "3.00"]);
    dessert.description = "Mango sago and chendol".to_owned();

    let mut nasi_lemak = stall("s3", "cv", "International Muslim Food", Cuisine::Malay, 4.3);
    nasi_lemak.is_open = true;
    nasi_lemak.menu = priced(&["18.00"]);

    let unlinked = stall("s4", "Somewhere Else", "Mystery Stall", Cuisine::Others, 2.2);

    CatalogSnapshot::new(NormalizedCatalog {
        hawkers,
        stalls: vec![chicken_rice, dessert, nasi_lemak, unlinked],
        diagnostics: vec![],
    })
}

const ORIGIN_TIONG_BAHRU: Coordinates = Coordinates {
    lat: 1.2850,
    lng: 103.8325,
};

// -----------------------------------------------------------------------
// lookups
// -----------------------------------------------------------------------

#[test]
fn lookups_by_id_and_license() {
    let snap = snapshot();
    assert_eq!(snap.hawker("mx").unwrap().name, "Maxwell Food Centre");
    assert_eq!(snap.stall("s2").unwrap().name, "Ah Chew Dessert");
    assert_eq!(snap.stall_by_license_number("L-s3").unwrap().id, "s3");
    assert!(snap.stall("nope").is_none());
}

#[test]
fn stalls_by_hawker_filters_on_link() {
    let snap = snapshot();
    let ids: Vec<&str> = snap.stalls_by_hawker("mx").iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["s1"]);
    assert!(snap.stalls_by_hawker("unknown").is_empty());
}

// -----------------------------------------------------------------------
// search
// -----------------------------------------------------------------------

#[test]
fn search_hawkers_matches_name_or_address() {
    let snap = snapshot();
    assert_eq!(snap.search_hawkers("maxwell").len(), 1);
    assert_eq!(snap.search_hawkers("SENG POH")[0].id, "tb");
    assert_eq!(snap.search_hawkers("").len(), 3);
}

#[test]
fn text_search_covers_cuisine_label_and_description() {
    let snap = snapshot();
    let by_cuisine = snap.search_stalls(&StallQuery {
        text: Some("malay".to_owned()),
        ..StallQuery::default()
    });
    assert_eq!(by_cuisine.len(), 1);
    assert_eq!(by_cuisine[0].id, "s3");

    let by_description = snap.search_stalls(&StallQuery {
        text: Some("chendol".to_owned()),
        ..StallQuery::default()
    });
    assert_eq!(by_description[0].id, "s2");
}

#[test]
fn filters_combine() {
    let snap = snapshot();
    let query = StallQuery {
        min_rating: Some(4.0),
        open_only: true,
        ..StallQuery::default()
    };
    let ids: Vec<&str> = snap.search_stalls(&query).iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["s1", "s3"]);

    let query = StallQuery {
        cuisine: Some(Cuisine::Chinese),
        open_only: true,
        ..StallQuery::default()
    };
    assert_eq!(snap.search_stalls(&query).len(), 1);
}

#[test]
fn price_bands_apply_only_to_priced_stalls() {
    let snap = snapshot();
    let ids = |band: PriceBand| -> Vec<String> {
        snap.search_stalls(&StallQuery {
            price: Some(band),
            ..StallQuery::default()
        })
        .iter()
        .map(|s| s.id.clone())
        .collect()
    };
    // s4 has no menu and passes every band.
    assert_eq!(ids(PriceBand::Under3), vec!["s2", "s4"]);
    assert_eq!(ids(PriceBand::From3To5), vec!["s1", "s2", "s4"]);
    assert_eq!(ids(PriceBand::From6To10), vec!["s1", "s4"]);
    assert_eq!(ids(PriceBand::From11To15), vec!["s4"]);
    assert_eq!(ids(PriceBand::Over15), vec!["s3", "s4"]);
}

#[test]
fn unparseable_prices_match_no_band() {
    let mut s = stall("x", "tb", "Cash Only", Cuisine::Others, 3.0);
    s.menu = priced(&["ask"]);
    assert!(!PriceBand::Under3.matches(&s));
    assert!(!PriceBand::Over15.matches(&s));
}

#[test]
fn price_band_parses_labels_and_compact_forms() {
    assert_eq!("$3 - $5".parse::<PriceBand>().unwrap(), PriceBand::From3To5);
    assert_eq!("< $3".parse::<PriceBand>().unwrap(), PriceBand::Under3);
    assert_eq!("15+".parse::<PriceBand>().unwrap(), PriceBand::Over15);
    assert!("cheap".parse::<PriceBand>().is_err());
}

// -----------------------------------------------------------------------
// nearby
// -----------------------------------------------------------------------

#[test]
fn nearby_hawkers_within_radius_sorted_by_distance() {
    let snap = snapshot();
    let nearby = snap.nearby_hawkers(ORIGIN_TIONG_BAHRU, 5.0, NearbySort::Distance);
    let ids: Vec<&str> = nearby.iter().map(|n| n.hawker.id.as_str()).collect();
    assert_eq!(ids, vec!["tb", "mx"]);
    assert!(nearby[0].distance_km < 0.001);
    assert!(nearby[1].distance_km > 1.0 && nearby[1].distance_km < 2.0);
}

#[test]
fn nearby_hawkers_sorted_by_rating() {
    let snap = snapshot();
    let nearby = snap.nearby_hawkers(ORIGIN_TIONG_BAHRU, 50.0, NearbySort::Rating);
    let ids: Vec<&str> = nearby.iter().map(|n| n.hawker.id.as_str()).collect();
    assert_eq!(ids, vec!["mx", "tb", "cv"]);
}

#[test]
fn nearby_radius_is_inclusive() {
    let snap = snapshot();
    assert_eq!(snap.nearby_hawkers(ORIGIN_TIONG_BAHRU, 0.0, NearbySort::Distance).len(), 1);
}

#[test]
fn nearby_stalls_carry_centre_distance() {
    let snap = snapshot();
    let nearby = snap.nearby_stalls(ORIGIN_TIONG_BAHRU, 5.0, NearbySort::Distance);
    let ids: Vec<&str> = nearby.iter().map(|n| n.stall.id.as_str()).collect();
    assert_eq!(ids, vec!["s2", "s1"]);

    let by_rating = snap.nearby_stalls(ORIGIN_TIONG_BAHRU, 5.0, NearbySort::Rating);
    assert_eq!(by_rating[0].stall.id, "s1");
}

#[test]
fn nearby_sort_parses() {
    assert_eq!("Rating".parse::<NearbySort>().unwrap(), NearbySort::Rating);
    assert!("price".parse::<NearbySort>().is_err());
}

// -----------------------------------------------------------------------
// search history
// -----------------------------------------------------------------------

#[test]
fn history_records_newest_first_without_duplicates() {
    let mut history = SearchHistory::default();
    for q in ["laksa", "chicken rice", " laksa ", "", "satay"] {
        history.record(q);
    }
    assert_eq!(history.entries(), ["satay", "laksa", "chicken rice"]);
}

#[test]
fn history_is_capped() {
    let mut history = SearchHistory::default();
    for q in ["a", "b", "c", "d", "e", "f"] {
        history.record(q);
    }
    assert_eq!(history.entries(), ["f", "e", "d", "c", "b"]);
}

#[test]
fn history_round_trips_backend_string() {
    let history = SearchHistory::parse(" laksa | |satay|laksa");
    assert_eq!(history.entries(), ["laksa", "satay"]);
    assert_eq!(history.to_backend_string(), "laksa|satay");
}

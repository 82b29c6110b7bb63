//! Catalog command handlers for the CLI.
//!
//! Commands that need the catalog fetch and normalize it fresh on every run;
//! there is no local cache. Backend failures surface as errors and the
//! process exits non-zero.

use std::path::Path;

use anyhow::Context;
use hawkersg_catalog::{
    classify_text, normalize_catalog_json, CatalogSnapshot, CatalogStore, HawkerApiClient,
    NearbySort, StallQuery,
};
use hawkersg_core::Coordinates;

/// Fetch, normalize and summarize the catalog.
///
/// With `json`, prints the normalized hawker centres and stalls instead.
///
/// # Errors
///
/// Returns an error if either backend fetch fails.
pub(crate) async fn run_load(client: &HawkerApiClient, json: bool) -> anyhow::Result<()> {
    let snapshot = load_snapshot(client).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(snapshot.catalog())?);
        return Ok(());
    }

    println!(
        "{:<12}{:<40}{:<8}{:<8}ADDRESS",
        "ID", "NAME", "STALLS", "RATING"
    );
    for hawker in snapshot.hawkers() {
        println!(
            "{:<12}{:<40}{:<8}{:<8.1}{}",
            truncate(&hawker.id, 10),
            truncate(&hawker.name, 38),
            hawker.stall_count,
            hawker.rating,
            hawker.address
        );
    }

    let summary = snapshot.catalog().summary();
    println!();
    println!(
        "{} hawker centres, {} stalls ({} excluded, {} unresolved, {} ratings synthesized)",
        snapshot.hawkers().len(),
        snapshot.stalls().len(),
        summary.excluded,
        summary.unresolved,
        summary.ratings_synthesized
    );
    println!("fingerprint: {}", snapshot.fingerprint()?);
    Ok(())
}

/// Normalize raw JSON dumps from disk and print the result as JSON.
///
/// # Errors
///
/// Returns an error if either file cannot be read or is not a JSON array.
pub(crate) fn run_normalize(
    hawkers_path: &Path,
    stalls_path: &Path,
    with_diagnostics: bool,
) -> anyhow::Result<()> {
    let hawkers = read_json_array(hawkers_path)?;
    let stalls = read_json_array(stalls_path)?;
    let catalog = normalize_catalog_json(&hawkers, &stalls);

    let output = if with_diagnostics {
        serde_json::json!({
            "hawkers": catalog.hawkers,
            "stalls": catalog.stalls,
            "diagnostics": catalog.diagnostics,
        })
    } else {
        serde_json::to_value(&catalog)?
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub(crate) fn run_classify(words: &[String]) {
    println!("{}", classify_text(&words.join(" ")));
}

/// Search stalls and print the matches as a table.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
pub(crate) async fn run_search(client: &HawkerApiClient, query: &StallQuery) -> anyhow::Result<()> {
    let snapshot = load_snapshot(client).await?;
    let stalls = snapshot.search_stalls(query);

    if stalls.is_empty() {
        println!("no stalls match");
        return Ok(());
    }

    println!(
        "{:<12}{:<36}{:<14}{:<8}{:<6}HAWKER CENTRE",
        "ID", "NAME", "CUISINE", "RATING", "OPEN"
    );
    for stall in &stalls {
        let centre = snapshot
            .hawker(&stall.hawker_id)
            .map_or(stall.hawker_id.as_str(), |h| h.name.as_str());
        println!(
            "{:<12}{:<36}{:<14}{:<8.1}{:<6}{}",
            truncate(&stall.id, 10),
            truncate(&stall.name, 34),
            stall.cuisine.label(),
            stall.rating,
            if stall.is_open { "yes" } else { "no" },
            centre
        );
    }
    println!();
    println!("{} stalls", stalls.len());
    Ok(())
}

/// List hawker centres within `radius_km` of a point.
///
/// # Errors
///
/// Returns an error if the radius is negative or the catalog cannot be loaded.
pub(crate) async fn run_nearby(
    client: &HawkerApiClient,
    lat: f64,
    lng: f64,
    radius_km: f64,
    sort: NearbySort,
) -> anyhow::Result<()> {
    if radius_km.is_nan() || radius_km < 0.0 {
        anyhow::bail!("radius must be zero or positive, got {radius_km}");
    }
    let snapshot = load_snapshot(client).await?;
    let nearby = snapshot.nearby_hawkers(Coordinates::new(lat, lng), radius_km, sort);

    if nearby.is_empty() {
        println!("no hawker centres within {radius_km} km");
        return Ok(());
    }

    println!("{:<10}{:<8}{:<8}NAME", "KM", "RATING", "STALLS");
    for n in &nearby {
        println!(
            "{:<10.2}{:<8.1}{:<8}{}",
            n.distance_km, n.hawker.rating, n.hawker.stall_count, n.hawker.name
        );
    }
    Ok(())
}

/// Print a stall's menu, fetched directly by license number.
///
/// # Errors
///
/// Returns an error if the menu fetch fails.
pub(crate) async fn run_menu(client: &HawkerApiClient, license_number: &str) -> anyhow::Result<()> {
    let menu = client
        .fetch_menu(license_number)
        .await
        .with_context(|| format!("failed to fetch menu for license {license_number}"))?;

    if menu.is_empty() {
        println!("no menu items for license {license_number}");
        return Ok(());
    }

    println!("{:<44}{:>10}", "ITEM", "PRICE");
    for item in &menu {
        let price = item
            .price
            .map_or_else(|| "\u{2014}".to_string(), |p| format!("${p:.2}"));
        println!("{:<44}{:>10}", truncate(&item.name, 42), price);
    }
    Ok(())
}

async fn load_snapshot(
    client: &HawkerApiClient,
) -> anyhow::Result<std::sync::Arc<CatalogSnapshot>> {
    CatalogStore::new()
        .load(client)
        .await
        .context("failed to load catalog from backend")
}

fn read_json_array(path: &Path) -> anyhow::Result<Vec<serde_json::Value>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not a JSON array", path.display()))
}

/// Shorten `s` to at most `max` characters, marking the cut with `...`.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

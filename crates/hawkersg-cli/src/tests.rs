use super::*;
use crate::hours::{apply_preset, parse_hhmm, set_day, HoursPreset};
use hawkersg_core::Weekday;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["hawkersg"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_load_json_flag() {
    let cli = Cli::try_parse_from(["hawkersg", "load", "--json"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Load { json: true })));
}

#[test]
fn normalize_requires_both_files() {
    assert!(Cli::try_parse_from(["hawkersg", "normalize", "--hawkers", "h.json"]).is_err());

    let cli = Cli::try_parse_from([
        "hawkersg",
        "normalize",
        "--hawkers",
        "h.json",
        "--stalls",
        "s.json",
        "--diagnostics",
    ])
    .expect("expected valid cli args");
    match cli.command {
        Some(Commands::Normalize {
            hawkers,
            stalls,
            diagnostics,
        }) => {
            assert_eq!(hawkers, PathBuf::from("h.json"));
            assert_eq!(stalls, PathBuf::from("s.json"));
            assert!(diagnostics);
        }
        other => panic!("expected normalize, got {other:?}"),
    }
}

#[test]
fn classify_collects_words_and_requires_text() {
    let cli = Cli::try_parse_from(["hawkersg", "classify", "nasi", "lemak"]).unwrap();
    match cli.command {
        Some(Commands::Classify { text }) => assert_eq!(text, vec!["nasi", "lemak"]),
        other => panic!("expected classify, got {other:?}"),
    }
    assert!(Cli::try_parse_from(["hawkersg", "classify"]).is_err());
}

#[test]
fn search_parses_typed_filters() {
    let cli = Cli::try_parse_from([
        "hawkersg",
        "search",
        "laksa",
        "--cuisine",
        "malay",
        "--price",
        "3-5",
        "--min-rating",
        "4",
        "--open-only",
    ])
    .unwrap();
    match cli.command {
        Some(Commands::Search {
            query,
            cuisine,
            price,
            min_rating,
            open_only,
        }) => {
            assert_eq!(query.as_deref(), Some("laksa"));
            assert_eq!(cuisine, Some(Cuisine::Malay));
            assert_eq!(price, Some(PriceBand::From3To5));
            assert_eq!(min_rating, Some(4.0));
            assert!(open_only);
        }
        other => panic!("expected search, got {other:?}"),
    }
}

#[test]
fn search_rejects_unknown_price_band() {
    assert!(Cli::try_parse_from(["hawkersg", "search", "--price", "cheap"]).is_err());
}

#[test]
fn nearby_defaults_radius_and_sort() {
    let cli = Cli::try_parse_from(["hawkersg", "nearby", "--lat", "1.285", "--lng", "103.83"])
        .unwrap();
    match cli.command {
        Some(Commands::Nearby {
            radius, sort, lat, ..
        }) => {
            assert!((lat - 1.285).abs() < f64::EPSILON);
            assert!((radius - 5.0).abs() < f64::EPSILON);
            assert_eq!(sort, NearbySort::Distance);
        }
        other => panic!("expected nearby, got {other:?}"),
    }
}

#[test]
fn nearby_accepts_negative_coordinates_and_rating_sort() {
    let cli = Cli::try_parse_from([
        "hawkersg", "nearby", "--lat", "-1.5", "--lng", "-0.2", "--sort", "rating",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Nearby {
            sort: NearbySort::Rating,
            ..
        })
    ));
}

#[test]
fn parses_hours_subcommands() {
    let cli = Cli::try_parse_from([
        "hawkersg",
        "hours",
        "status",
        "--day",
        "sun",
        "--time",
        "09:30",
        "--emergency-closed",
    ])
    .unwrap();
    match cli.command {
        Some(Commands::Hours {
            command:
                HoursCommands::Status {
                    day,
                    time,
                    emergency_closed,
                },
        }) => {
            assert_eq!(day, Some(Weekday::Sunday));
            assert_eq!(time, parse_hhmm("09:30").ok());
            assert!(emergency_closed);
        }
        other => panic!("expected hours status, got {other:?}"),
    }

    let cli = Cli::try_parse_from(["hawkersg", "hours", "preset", "copy-to-all", "--from", "monday"])
        .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Hours {
            command: HoursCommands::Preset {
                preset: HoursPreset::CopyToAll,
                from: Some(Weekday::Monday),
            }
        })
    ));

    assert!(Cli::try_parse_from(["hawkersg", "hours", "set", "monday", "25:00", "20:00"]).is_err());
}

#[test]
fn parses_menu_license() {
    let cli = Cli::try_parse_from(["hawkersg", "menu", "Y510131002"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Menu { license }) if license == "Y510131002"
    ));
}

// ---------------------------------------------------------------------------
// hours draft handlers
// ---------------------------------------------------------------------------

#[test]
fn preset_starts_from_standard_and_saves_draft() {
    let dir = tempfile::tempdir().unwrap();
    let draft = DraftHoursStore::new(dir.path().join("draft.json"));

    let saved = apply_preset(&draft, HoursPreset::CloseSundays, None).unwrap();
    assert!(saved.day(Weekday::Sunday).unwrap().closed);
    assert_eq!(saved.day(Weekday::Monday).unwrap().open, "10:00");
    assert_eq!(draft.load(), Some(saved));
}

#[test]
fn presets_stack_on_existing_draft() {
    let dir = tempfile::tempdir().unwrap();
    let draft = DraftHoursStore::new(dir.path().join("draft.json"));

    apply_preset(&draft, HoursPreset::CloseSundays, None).unwrap();
    let saved = apply_preset(&draft, HoursPreset::WeekendExtended, None).unwrap();
    assert!(saved.day(Weekday::Sunday).unwrap().closed);
    assert_eq!(saved.day(Weekday::Saturday).unwrap().close, "22:00");
}

#[test]
fn copy_to_all_needs_source_day() {
    let dir = tempfile::tempdir().unwrap();
    let draft = DraftHoursStore::new(dir.path().join("draft.json"));

    assert!(apply_preset(&draft, HoursPreset::CopyToAll, None).is_err());
    assert!(draft.load().is_none());

    set_day(
        &draft,
        Weekday::Monday,
        parse_hhmm("07:00").unwrap(),
        parse_hhmm("15:00").unwrap(),
        false,
    )
    .unwrap();
    let saved = apply_preset(&draft, HoursPreset::CopyToAll, Some(Weekday::Monday)).unwrap();
    for day in Weekday::ALL {
        assert_eq!(saved.day(day).unwrap().open, "07:00");
        assert_eq!(saved.day(day).unwrap().close, "15:00");
    }
}

#[test]
fn set_day_closed_keeps_times() {
    let dir = tempfile::tempdir().unwrap();
    let draft = DraftHoursStore::new(dir.path().join("draft.json"));

    let saved = set_day(
        &draft,
        Weekday::Wednesday,
        parse_hhmm("9:05").unwrap(),
        parse_hhmm("18:00").unwrap(),
        true,
    )
    .unwrap();
    let wednesday = saved.day(Weekday::Wednesday).unwrap();
    assert!(wednesday.closed);
    assert_eq!(wednesday.open, "09:05");
}

#[test]
fn truncate_marks_cut() {
    assert_eq!(catalog::truncate("Tiong Bahru", 20), "Tiong Bahru");
    assert_eq!(catalog::truncate("Tiong Bahru Market", 10), "Tiong B...");
}

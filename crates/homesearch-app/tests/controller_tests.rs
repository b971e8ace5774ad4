// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use homesearch_app::{PortalState, PropertyId, SeedData, TabKind};

fn seed_with_saved_flags(flags: &[bool]) -> SeedData {
    let mut seed = SeedData::fixed();
    let template = seed.properties[0].clone();
    seed.properties = flags
        .iter()
        .enumerate()
        .map(|(index, saved)| {
            let mut record = template.clone();
            record.id = PropertyId::new(format!("p{index}"));
            record.address = format!("{} Test Lane", index + 1);
            record.saved = *saved;
            record
        })
        .collect();
    seed
}

#[test]
fn initialize_starts_on_properties_with_seed_intact() {
    let state = PortalState::initialize();
    let seed = SeedData::fixed();

    assert_eq!(state.active_tab, TabKind::Properties);
    assert_eq!(state.properties(), seed.properties.as_slice());
    assert_eq!(state.messages(), seed.messages.as_slice());
    assert_eq!(state.documents(), seed.documents.as_slice());
    assert_eq!(state.client_name(), "John");
    assert_eq!(state.status_line, None);
}

#[test]
fn from_seed_preserves_order_and_fields() -> Result<()> {
    let mut seed = SeedData::fixed();
    seed.properties.reverse();
    let state = PortalState::from_seed(seed.clone())?;

    assert_eq!(state.active_tab, TabKind::Properties);
    assert_eq!(state.properties(), seed.properties.as_slice());
    Ok(())
}

#[test]
fn double_toggle_restores_every_property() {
    let original = PortalState::initialize();
    for record in original.properties() {
        let mut state = original.clone();

        let first = state.toggle_saved(&record.id);
        assert_eq!(first, Some(!record.saved));
        for (index, other) in state.properties().iter().enumerate() {
            if other.id == record.id {
                let mut expected = record.clone();
                expected.saved = !record.saved;
                assert_eq!(other, &expected);
            } else {
                assert_eq!(other, &original.properties()[index]);
            }
        }

        let second = state.toggle_saved(&record.id);
        assert_eq!(second, Some(record.saved));
        assert_eq!(state.properties(), original.properties());
    }
}

#[test]
fn toggle_unknown_id_is_a_no_op() {
    let mut state = PortalState::initialize();
    let before = state.properties().to_vec();

    assert_eq!(state.toggle_saved(&PropertyId::new("missing")), None);
    assert_eq!(state.toggle_saved(&PropertyId::new("")), None);
    assert_eq!(state.properties(), before.as_slice());
}

#[test]
fn saved_count_tracks_toggles() -> Result<()> {
    let mut state = PortalState::from_seed(seed_with_saved_flags(&[true, false, true]))?;
    assert_eq!(state.saved_count(), 2);

    state.toggle_saved(&PropertyId::new("p1"));
    assert_eq!(state.saved_count(), 3);

    state.toggle_saved(&PropertyId::new("p0"));
    state.toggle_saved(&PropertyId::new("p2"));
    assert_eq!(state.saved_count(), 1);
    Ok(())
}

#[test]
fn active_tab_is_last_write_wins() {
    let mut state = PortalState::initialize();
    state.set_active_tab(TabKind::Messages);
    state.set_active_tab(TabKind::Documents);
    assert_eq!(state.active_tab, TabKind::Documents);

    state.set_active_tab(TabKind::Documents);
    assert_eq!(state.active_tab, TabKind::Documents);
}

#[test]
fn unread_count_is_unaffected_by_tab_and_property_changes() {
    let mut state = PortalState::initialize();
    assert_eq!(state.unread_message_count(), 1);

    for tab in TabKind::ALL {
        state.set_active_tab(tab);
        assert_eq!(state.unread_message_count(), 1);
    }
    let ids = state
        .properties()
        .iter()
        .map(|record| record.id.clone())
        .collect::<Vec<_>>();
    for id in ids {
        state.toggle_saved(&id);
        assert_eq!(state.unread_message_count(), 1);
    }
}

#[test]
fn seed_round_trips_through_json() -> Result<()> {
    let seed = SeedData::fixed();
    let json = serde_json::to_string_pretty(&seed)?;
    let parsed: SeedData = serde_json::from_str(&json)?;
    assert_eq!(parsed, seed);
    Ok(())
}

#[test]
fn seed_json_optional_sections_default_to_empty() -> Result<()> {
    let json = r#"{
        "client_name": "Dana",
        "properties": [
            {
                "id": "a",
                "address": "1 Harbor Rd",
                "price": 275000,
                "bedrooms": 0,
                "bathrooms": 1,
                "sqft": 640,
                "saved": false,
                "status": "viewed"
            }
        ]
    }"#;
    let seed: SeedData = serde_json::from_str(json)?;
    let state = PortalState::from_seed(seed)?;

    assert_eq!(state.client_name(), "Dana");
    assert!(state.messages().is_empty());
    assert!(state.documents().is_empty());
    assert_eq!(state.unread_message_count(), 0);
    assert_eq!(state.stats().new_matches, 0);
    Ok(())
}

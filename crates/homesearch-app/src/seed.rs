// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use time::macros::date;

use crate::{
    DocumentId, DocumentRecord, MessageId, MessageRecord, PropertyId, PropertyRecord,
    PropertyStatus, SearchSummary,
};

const AGENT: &str = "Your Agent";

/// Initial records for one portal session. The built-in set stands in for a
/// search backend; `--seed` swaps in a JSON file with the same shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedData {
    pub client_name: String,
    #[serde(default)]
    pub summary: SearchSummary,
    pub properties: Vec<PropertyRecord>,
    #[serde(default)]
    pub messages: Vec<MessageRecord>,
    #[serde(default)]
    pub documents: Vec<DocumentRecord>,
}

impl SeedData {
    pub fn fixed() -> Self {
        Self {
            client_name: "John".to_owned(),
            summary: SearchSummary {
                new_matches: 5,
                upcoming_showings: 2,
            },
            properties: vec![
                property(
                    "1",
                    "123 Ocean Drive, Fort Myers FL",
                    450_000,
                    (3, 2, 2_100),
                    PropertyStatus::Saved,
                ),
                property(
                    "2",
                    "456 Palm Ave, Cape Coral FL",
                    325_000,
                    (2, 2, 1_500),
                    PropertyStatus::Recommended,
                ),
                property(
                    "3",
                    "789 Beach Blvd, Fort Myers Beach FL",
                    550_000,
                    (4, 3, 2_800),
                    PropertyStatus::Saved,
                ),
            ],
            messages: vec![
                MessageRecord {
                    id: MessageId::new("1"),
                    from: AGENT.to_owned(),
                    text: "New properties match your search criteria".to_owned(),
                    time: "2h ago".to_owned(),
                    unread: true,
                },
                MessageRecord {
                    id: MessageId::new("2"),
                    from: AGENT.to_owned(),
                    text: "Showing scheduled for tomorrow at 2 PM".to_owned(),
                    time: "1d ago".to_owned(),
                    unread: false,
                },
            ],
            documents: vec![
                DocumentRecord {
                    id: DocumentId::new("1"),
                    name: "Pre-Approval Letter.pdf".to_owned(),
                    date: date!(2024 - 11 - 15),
                    size: "245 KB".to_owned(),
                },
                DocumentRecord {
                    id: DocumentId::new("2"),
                    name: "Offer Contract - 123 Ocean Dr.pdf".to_owned(),
                    date: date!(2024 - 11 - 18),
                    size: "512 KB".to_owned(),
                },
            ],
        }
    }

    pub fn validate(&self) -> Result<()> {
        let mut property_ids = BTreeSet::new();
        for record in &self.properties {
            if record.id.as_str().trim().is_empty() {
                bail!(
                    "property {:?} has an empty id; every property needs a unique id",
                    record.address
                );
            }
            if !property_ids.insert(&record.id) {
                bail!("duplicate property id {:?}; ids must be unique", record.id.as_str());
            }
            if record.address.trim().is_empty() {
                bail!("property {:?} has an empty address", record.id.as_str());
            }
            if record.price == 0 {
                bail!("property {:?} price must be positive", record.id.as_str());
            }
            if record.sqft == 0 {
                bail!("property {:?} sqft must be positive", record.id.as_str());
            }
        }

        let mut message_ids = BTreeSet::new();
        for message in &self.messages {
            if message.id.as_str().trim().is_empty() {
                bail!("message from {:?} has an empty id", message.from);
            }
            if !message_ids.insert(&message.id) {
                bail!("duplicate message id {:?}; ids must be unique", message.id.as_str());
            }
        }

        let mut document_ids = BTreeSet::new();
        for document in &self.documents {
            if document.id.as_str().trim().is_empty() {
                bail!("document {:?} has an empty id", document.name);
            }
            if !document_ids.insert(&document.id) {
                bail!("duplicate document id {:?}; ids must be unique", document.id.as_str());
            }
            if document.name.trim().is_empty() {
                bail!("document {:?} has an empty name", document.id.as_str());
            }
        }

        Ok(())
    }
}

fn property(
    id: &str,
    address: &str,
    price: u64,
    (bedrooms, bathrooms, sqft): (u32, u32, u32),
    status: PropertyStatus,
) -> PropertyRecord {
    PropertyRecord {
        id: PropertyId::new(id),
        address: address.to_owned(),
        price,
        bedrooms,
        bathrooms,
        sqft,
        saved: status == PropertyStatus::Saved,
        status,
    }
}

// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use time::Date;

use crate::ids::*;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyStatus {
    Recommended,
    Saved,
    Viewed,
}

impl PropertyStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Recommended => "recommended",
            Self::Saved => "saved",
            Self::Viewed => "viewed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabKind {
    Properties,
    Messages,
    Documents,
}

impl TabKind {
    pub const ALL: [Self; 3] = [Self::Properties, Self::Messages, Self::Documents];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Properties => "properties",
            Self::Messages => "messages",
            Self::Documents => "documents",
        }
    }

    /// Digit key that jumps straight to this tab.
    pub const fn hotkey(self) -> char {
        match self {
            Self::Properties => '1',
            Self::Messages => '2',
            Self::Documents => '3',
        }
    }

    pub fn from_hotkey(key: char) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.hotkey() == key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub id: PropertyId,
    pub address: String,
    pub price: u64,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub sqft: u32,
    pub saved: bool,
    pub status: PropertyStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub id: MessageId,
    pub from: String,
    pub text: String,
    /// Relative display time such as `2h ago`; never parsed.
    pub time: String,
    pub unread: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: DocumentId,
    pub name: String,
    #[serde(with = "iso_date")]
    pub date: Date,
    pub size: String,
}

/// Dashboard figures supplied by the data source rather than derived locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SearchSummary {
    pub new_matches: usize,
    pub upcoming_showings: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PortalStats {
    pub saved_properties: usize,
    pub new_matches: usize,
    pub unread_messages: usize,
    pub upcoming_showings: usize,
}

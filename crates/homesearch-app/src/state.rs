// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;

use crate::{
    DocumentRecord, MessageRecord, PortalStats, PropertyId, PropertyRecord, SearchSummary,
    SeedData, TabKind,
};

/// Session state for the client portal.
///
/// The property collection is fixed at construction; only `saved` flags
/// change afterwards. Messages and documents are read-only. Counts are
/// recomputed on every read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalState {
    pub active_tab: TabKind,
    pub status_line: Option<String>,
    properties: Vec<PropertyRecord>,
    messages: Vec<MessageRecord>,
    documents: Vec<DocumentRecord>,
    summary: SearchSummary,
    client_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortalCommand {
    SetTab(TabKind),
    NextTab,
    PrevTab,
    ToggleSaved(PropertyId),
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortalEvent {
    TabChanged(TabKind),
    SavedToggled { id: PropertyId, saved: bool },
    StatusUpdated(String),
    StatusCleared,
}

impl Default for PortalState {
    fn default() -> Self {
        Self::initialize()
    }
}

impl PortalState {
    /// Loads the built-in seed.
    pub fn initialize() -> Self {
        Self::with_seed(SeedData::fixed())
    }

    pub fn from_seed(seed: SeedData) -> Result<Self> {
        seed.validate()?;
        Ok(Self::with_seed(seed))
    }

    fn with_seed(seed: SeedData) -> Self {
        Self {
            active_tab: TabKind::Properties,
            status_line: None,
            properties: seed.properties,
            messages: seed.messages,
            documents: seed.documents,
            summary: seed.summary,
            client_name: seed.client_name,
        }
    }

    pub fn properties(&self) -> &[PropertyRecord] {
        &self.properties
    }

    pub fn messages(&self) -> &[MessageRecord] {
        &self.messages
    }

    pub fn documents(&self) -> &[DocumentRecord] {
        &self.documents
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    pub fn set_client_name(&mut self, name: impl Into<String>) {
        self.client_name = name.into();
    }

    pub fn property(&self, id: &PropertyId) -> Option<&PropertyRecord> {
        self.properties.iter().find(|record| &record.id == id)
    }

    pub fn property_at(&self, index: usize) -> Option<&PropertyRecord> {
        self.properties.get(index)
    }

    pub fn saved_count(&self) -> usize {
        self.properties.iter().filter(|record| record.saved).count()
    }

    pub fn unread_message_count(&self) -> usize {
        self.messages.iter().filter(|message| message.unread).count()
    }

    pub fn stats(&self) -> PortalStats {
        PortalStats {
            saved_properties: self.saved_count(),
            new_matches: self.summary.new_matches,
            unread_messages: self.unread_message_count(),
            upcoming_showings: self.summary.upcoming_showings,
        }
    }

    pub fn set_active_tab(&mut self, tab: TabKind) {
        tracing::debug!(tab = tab.label(), "active tab changed");
        self.active_tab = tab;
    }

    /// Flips `saved` on the matching property and returns the new value.
    /// Unknown ids leave the collection untouched. `status` is not updated.
    pub fn toggle_saved(&mut self, id: &PropertyId) -> Option<bool> {
        let Some(record) = self.properties.iter_mut().find(|record| &record.id == id) else {
            tracing::debug!(property_id = %id, "toggle ignored; no matching property");
            return None;
        };
        record.saved = !record.saved;
        tracing::debug!(property_id = %id, saved = record.saved, "saved flag toggled");
        Some(record.saved)
    }

    pub fn next_tab(&mut self) {
        self.rotate_tab(1);
    }

    pub fn prev_tab(&mut self) {
        self.rotate_tab(-1);
    }

    pub fn dispatch(&mut self, command: PortalCommand) -> Vec<PortalEvent> {
        match command {
            PortalCommand::SetTab(tab) => {
                self.set_active_tab(tab);
                vec![PortalEvent::TabChanged(self.active_tab)]
            }
            PortalCommand::NextTab => {
                self.next_tab();
                vec![PortalEvent::TabChanged(self.active_tab)]
            }
            PortalCommand::PrevTab => {
                self.prev_tab();
                vec![PortalEvent::TabChanged(self.active_tab)]
            }
            PortalCommand::ToggleSaved(id) => {
                let Some(saved) = self.toggle_saved(&id) else {
                    return Vec::new();
                };
                let address = self
                    .property(&id)
                    .map(|record| record.address.clone())
                    .unwrap_or_default();
                let label = if saved { "saved" } else { "unsaved" };
                vec![
                    PortalEvent::SavedToggled { id, saved },
                    self.set_status(&format!("{label} {address}")),
                ]
            }
            PortalCommand::SetStatus(message) => vec![self.set_status(&message)],
            PortalCommand::ClearStatus => {
                self.status_line = None;
                vec![PortalEvent::StatusCleared]
            }
        }
    }

    fn rotate_tab(&mut self, delta: isize) {
        let tabs = TabKind::ALL;
        let current = tabs
            .iter()
            .position(|tab| *tab == self.active_tab)
            .unwrap_or(0) as isize;
        let len = tabs.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.set_active_tab(tabs[next]);
    }

    fn set_status(&mut self, message: &str) -> PortalEvent {
        self.status_line = Some(message.to_owned());
        PortalEvent::StatusUpdated(message.to_owned())
    }
}

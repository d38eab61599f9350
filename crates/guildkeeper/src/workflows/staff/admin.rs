use std::collections::BTreeMap;

use serde::Serialize;
use tracing::info;

use super::domain::StaffApplication;
use super::positions::PositionRegistry;
use super::repository::ApplicationStore;
use super::service::{StaffApplicationError, StaffApplicationService};
use crate::gateway::CommunityGateway;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionCount {
    pub key: String,
    pub label: String,
    pub count: usize,
}

/// Pending applications grouped by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationStats {
    pub total: usize,
    pub by_position: Vec<PositionCount>,
}

impl ApplicationStats {
    /// Known positions come in registry order, unknown keys afterwards by name.
    pub fn collect(records: &[StaffApplication], positions: &PositionRegistry) -> Self {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for record in records {
            *counts.entry(record.position.as_str()).or_default() += 1;
        }

        let mut by_position: Vec<PositionCount> = counts
            .into_iter()
            .map(|(key, count)| PositionCount {
                key: key.to_string(),
                label: positions.label_for(key).to_string(),
                count,
            })
            .collect();
        by_position.sort_by_key(|entry| {
            (
                positions.position_of(&entry.key).unwrap_or(usize::MAX),
                entry.key.clone(),
            )
        });

        Self {
            total: records.len(),
            by_position,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// One line per position, e.g. `👥 Хелпер: **2**`.
    pub fn breakdown(&self) -> String {
        self.by_position
            .iter()
            .map(|entry| format!("{}: **{}**", entry.label, entry.count))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<S, G> StaffApplicationService<S, G>
where
    S: ApplicationStore + 'static,
    G: CommunityGateway + 'static,
{
    pub fn stats(&self) -> Result<ApplicationStats, StaffApplicationError> {
        let records = self.store.list()?;
        Ok(ApplicationStats::collect(&records, &self.positions))
    }

    /// Irreversibly drops every pending application.
    pub fn clear(&self) -> Result<usize, StaffApplicationError> {
        let removed = self.store.clear()?;
        info!(removed, "pending applications cleared");
        Ok(removed)
    }
}

//! In-memory store
//!
//! Mirrors the PostgreSQL queries over plain vectors so handlers can be
//! exercised without a database. Also counts queries, which lets tests
//! assert that a request never touched the store.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use super::filter::{ComplaintFilter, Scope};
use super::{DbError, Session, Store};
use crate::models::{
    Address, AddressListing, Agency, AppUser, Complaint, ComplaintSummary, ComplaintType,
    DefaultHandler, DefaultHandlerLink, EntityLookup, Neighborhood, ResolutionStats, Status,
    TrackedBy, TrackedComplaint, TypeCount,
};

/// Every table the application reads, as rows
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub agencies: Vec<Agency>,
    pub neighborhoods: Vec<Neighborhood>,
    pub addresses: Vec<Address>,
    pub complaint_types: Vec<ComplaintType>,
    pub statuses: Vec<Status>,
    pub complaints: Vec<Complaint>,
    pub users: Vec<AppUser>,
    pub tracked: Vec<TrackedBy>,
    pub default_handlers: Vec<DefaultHandlerLink>,
    pub demo_names: Vec<String>,
}

impl Dataset {
    fn in_scope(&self, complaint: &Complaint, filter: &ComplaintFilter) -> bool {
        let scoped = match filter.scope {
            Scope::Neighborhood(id) => self
                .addresses
                .iter()
                .any(|a| a.address_id == complaint.address_id && a.neighborhood_id == Some(id)),
            Scope::Agency(id) => complaint.agency_id == id,
            Scope::Citywide => true,
        };
        scoped
            && filter
                .complaint_type_id
                .map_or(true, |t| complaint.complaint_type_id == t)
    }

    fn topic(&self, complaint_type_id: i32) -> Option<&str> {
        self.complaint_types
            .iter()
            .find(|t| t.complaint_type_id == complaint_type_id)
            .map(|t| t.complaint_topic.as_str())
    }

    fn agency_name(&self, agency_id: i32) -> Option<&str> {
        self.agencies
            .iter()
            .find(|a| a.agency_id == agency_id)
            .map(|a| a.agency_name.as_str())
    }

    fn status_name(&self, status_id: i32) -> Option<&str> {
        self.statuses
            .iter()
            .find(|s| s.status_id == status_id)
            .map(|s| s.name.as_str())
    }

    /// Complaint joined to type, agency and status; `None` if any join misses.
    fn summarize(&self, c: &Complaint) -> Option<ComplaintSummary> {
        Some(ComplaintSummary {
            complaint_id: c.complaint_id,
            description: c.description.clone(),
            complaint_topic: self.topic(c.complaint_type_id)?.to_owned(),
            agency_name: self.agency_name(c.agency_id)?.to_owned(),
            status_name: self.status_name(c.status_id)?.to_owned(),
            created_at: c.created_at,
        })
    }
}

/// Store over a shared [`Dataset`]
#[derive(Clone)]
pub struct MemoryStore {
    data: Arc<Mutex<Dataset>>,
    queries: Arc<AtomicUsize>,
    available: bool,
}

impl MemoryStore {
    pub fn new(data: Dataset) -> Self {
        Self {
            data: Arc::new(Mutex::new(data)),
            queries: Arc::new(AtomicUsize::new(0)),
            available: true,
        }
    }

    /// A store whose every acquisition fails.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new(Dataset::default())
        }
    }

    /// Snapshot of the current rows.
    pub fn snapshot(&self) -> Dataset {
        lock(&self.data).clone()
    }

    /// Number of queries run so far, across all sessions.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

fn lock(data: &Mutex<Dataset>) -> MutexGuard<'_, Dataset> {
    // A panicked test thread must not wedge the others.
    data.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl Store for MemoryStore {
    async fn acquire(&self) -> Result<Box<dyn Session>, DbError> {
        if !self.available {
            return Err(DbError::Unavailable("in-memory store is offline".to_owned()));
        }
        Ok(Box::new(MemorySession {
            data: Arc::clone(&self.data),
            queries: Arc::clone(&self.queries),
        }))
    }
}

/// One request's view of a [`MemoryStore`]
pub struct MemorySession {
    data: Arc<Mutex<Dataset>>,
    queries: Arc<AtomicUsize>,
}

impl MemorySession {
    fn data(&self) -> MutexGuard<'_, Dataset> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        lock(&self.data)
    }
}

#[async_trait]
impl Session for MemorySession {
    async fn demo_names(&mut self) -> Result<Vec<String>, DbError> {
        Ok(self.data().demo_names.clone())
    }

    async fn insert_demo_name(&mut self, name: &str) -> Result<(), DbError> {
        self.data().demo_names.push(name.to_owned());
        Ok(())
    }

    async fn addresses(&mut self) -> Result<Vec<AddressListing>, DbError> {
        let data = self.data();
        let mut rows: Vec<AddressListing> = data
            .addresses
            .iter()
            .map(|a| AddressListing {
                address_id: a.address_id,
                street_line_1: a.street_line_1.clone(),
                street_line_2: a.street_line_2.clone(),
                postal_code: a.postal_code.clone(),
                neighborhood_name: a.neighborhood_id.and_then(|id| {
                    data.neighborhoods
                        .iter()
                        .find(|n| n.neighborhood_id == id)
                        .map(|n| n.name.clone())
                }),
            })
            .collect();
        rows.sort_by(|a, b| {
            // NULLS LAST
            let key =
                |r: &AddressListing| (r.neighborhood_name.is_none(), r.neighborhood_name.clone());
            key(a)
                .cmp(&key(b))
                .then_with(|| a.street_line_1.cmp(&b.street_line_1))
        });
        Ok(rows)
    }

    async fn default_handlers(&mut self) -> Result<Vec<DefaultHandler>, DbError> {
        let data = self.data();
        let mut rows: Vec<DefaultHandler> = data
            .default_handlers
            .iter()
            .filter_map(|link| {
                Some(DefaultHandler {
                    complaint_topic: data.topic(link.complaint_type_id)?.to_owned(),
                    agency_name: data.agency_name(link.agency_id)?.to_owned(),
                })
            })
            .collect();
        rows.sort_by(|a, b| a.complaint_topic.cmp(&b.complaint_topic));
        Ok(rows)
    }

    async fn neighborhoods(&mut self) -> Result<Vec<Neighborhood>, DbError> {
        let mut rows = self.data().neighborhoods.clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn agencies(&mut self) -> Result<Vec<Agency>, DbError> {
        let mut rows = self.data().agencies.clone();
        rows.sort_by(|a, b| a.agency_name.cmp(&b.agency_name));
        Ok(rows)
    }

    async fn complaint_types(&mut self) -> Result<Vec<ComplaintType>, DbError> {
        let mut rows = self.data().complaint_types.clone();
        rows.sort_by(|a, b| a.complaint_topic.cmp(&b.complaint_topic));
        Ok(rows)
    }

    async fn find_neighborhood(
        &mut self,
        lookup: &EntityLookup,
    ) -> Result<Option<Neighborhood>, DbError> {
        let data = self.data();
        let found = data
            .neighborhoods
            .iter()
            .filter(|n| match lookup {
                EntityLookup::Id(id) => n.neighborhood_id == *id,
                EntityLookup::Name(term) => n.name.to_uppercase() == term.display().to_uppercase(),
            })
            .min_by_key(|n| n.neighborhood_id)
            .cloned();
        Ok(found)
    }

    async fn find_agency(&mut self, lookup: &EntityLookup) -> Result<Option<Agency>, DbError> {
        let data = self.data();
        let found = data
            .agencies
            .iter()
            .filter(|a| match lookup {
                EntityLookup::Id(id) => a.agency_id == *id,
                EntityLookup::Name(term) => a
                    .agency_name
                    .to_uppercase()
                    .contains(&term.display().to_uppercase()),
            })
            .min_by_key(|a| a.agency_id)
            .cloned();
        Ok(found)
    }

    async fn resolution_stats(
        &mut self,
        filter: &ComplaintFilter,
    ) -> Result<ResolutionStats, DbError> {
        let data = self.data();
        let days: Vec<f64> = data
            .complaints
            .iter()
            .filter(|c| data.in_scope(c, filter))
            .filter_map(Complaint::resolution_days)
            .collect();
        let resolved = days.len() as i64;
        let avg_days = (resolved > 0).then(|| days.iter().sum::<f64>() / days.len() as f64);
        Ok(ResolutionStats { avg_days, resolved })
    }

    async fn counts_by_type(
        &mut self,
        filter: &ComplaintFilter,
    ) -> Result<Vec<TypeCount>, DbError> {
        let data = self.data();
        let mut counts: HashMap<&str, i64> = HashMap::new();
        for complaint in data.complaints.iter().filter(|c| data.in_scope(c, filter)) {
            if let Some(topic) = data.topic(complaint.complaint_type_id) {
                *counts.entry(topic).or_default() += 1;
            }
        }
        let mut rows: Vec<TypeCount> = counts
            .into_iter()
            .map(|(topic, count)| TypeCount {
                topic: topic.to_owned(),
                count,
            })
            .collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.topic.cmp(&b.topic)));
        Ok(rows)
    }

    async fn users(&mut self) -> Result<Vec<AppUser>, DbError> {
        let mut rows = self.data().users.clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn user(&mut self, user_id: i32) -> Result<Option<AppUser>, DbError> {
        Ok(self.data().users.iter().find(|u| u.user_id == user_id).cloned())
    }

    async fn tracked_complaints(
        &mut self,
        user_id: i32,
    ) -> Result<Vec<TrackedComplaint>, DbError> {
        let data = self.data();
        let mut rows: Vec<TrackedComplaint> = data
            .tracked
            .iter()
            .filter(|t| t.user_id == user_id)
            .filter_map(|t| {
                let complaint = data.complaints.iter().find(|c| c.complaint_id == t.complaint_id)?;
                let summary = data.summarize(complaint)?;
                Some(TrackedComplaint {
                    complaint_id: complaint.complaint_id,
                    description: summary.description,
                    created_at: complaint.created_at,
                    closed_at: complaint.closed_at,
                    complaint_topic: summary.complaint_topic,
                    agency_name: summary.agency_name,
                    status_name: summary.status_name,
                    added_at: t.added_at,
                    note: t.note.clone(),
                })
            })
            .collect();
        rows.sort_by_key(|r| Reverse(r.added_at));
        Ok(rows)
    }

    async fn search_complaints(
        &mut self,
        query: &str,
        limit: i64,
    ) -> Result<Vec<ComplaintSummary>, DbError> {
        let needle = query.to_uppercase();
        let data = self.data();
        let mut rows: Vec<ComplaintSummary> = data
            .complaints
            .iter()
            .filter_map(|c| data.summarize(c))
            .filter(|s| {
                s.description
                    .as_deref()
                    .is_some_and(|d| d.to_uppercase().contains(&needle))
                    || s.complaint_topic.to_uppercase().contains(&needle)
            })
            .collect();
        // DESC NULLS LAST
        rows.sort_by_key(|s| (s.created_at.is_none(), Reverse(s.created_at)));
        rows.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(rows)
    }

    async fn track(
        &mut self,
        user_id: i32,
        complaint_id: i32,
        note: Option<&str>,
    ) -> Result<bool, DbError> {
        let mut data = self.data();
        if data
            .tracked
            .iter()
            .any(|t| t.user_id == user_id && t.complaint_id == complaint_id)
        {
            return Ok(false);
        }
        data.tracked.push(TrackedBy {
            user_id,
            complaint_id,
            added_at: Utc::now().naive_utc(),
            note: note.map(str::to_owned),
        });
        Ok(true)
    }

    async fn untrack(&mut self, user_id: i32, complaint_id: i32) -> Result<bool, DbError> {
        let mut data = self.data();
        let before = data.tracked.len();
        data.tracked
            .retain(|t| !(t.user_id == user_id && t.complaint_id == complaint_id));
        Ok(data.tracked.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SearchTerm;

    fn store() -> MemoryStore {
        MemoryStore::new(Dataset {
            agencies: vec![
                Agency { agency_id: 2, agency_name: "NYC DOT".into() },
                Agency { agency_id: 1, agency_name: "Dept of Transportation (DOT)".into() },
            ],
            ..Dataset::default()
        })
    }

    #[tokio::test]
    async fn agency_lookup_prefers_lowest_id() {
        let mut session = store().acquire().await.unwrap();
        let term = SearchTerm::new("dot").unwrap();
        let agency = session
            .find_agency(&EntityLookup::Name(term))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(agency.agency_id, 1);
    }

    #[tokio::test]
    async fn unavailable_store_refuses_sessions() {
        assert!(MemoryStore::unavailable().acquire().await.is_err());
    }

    #[tokio::test]
    async fn queries_are_counted() {
        let store = store();
        let mut session = store.acquire().await.unwrap();
        assert_eq!(store.query_count(), 0);
        session.agencies().await.unwrap();
        session.users().await.unwrap();
        assert_eq!(store.query_count(), 2);
    }
}

use super::model::{ActiveJob, ActivePhase, JobId, JobLookup, ResolvedJob};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Process-wide registry of synthesis jobs.
///
/// Jobs live in one of two partitions: *active* (queued or processing) and
/// *resolved* (completed or failed). Both partitions sit behind a single lock,
/// so a job moving between them is never observed in both or in neither.
/// Nothing is persisted; a restart forgets every job.
#[derive(Debug, Default)]
pub struct JobTable {
    partitions: RwLock<Partitions>,
}

#[derive(Debug, Default)]
struct Partitions {
    active: HashMap<JobId, ActiveJob>,
    resolved: HashMap<JobId, ResolvedEntry>,
}

#[derive(Debug)]
struct ResolvedEntry {
    job: ResolvedJob,
    expiry_armed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JobCounts {
    pub active: usize,
    pub resolved: usize,
}

impl JobTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an active record.
    ///
    /// Returns false without writing if the job has already resolved.
    pub fn put(&self, job: ActiveJob) -> bool {
        let mut partitions = self.partitions.write();
        if partitions.resolved.contains_key(&job.id) {
            return false;
        }
        partitions.active.insert(job.id.clone(), job);
        true
    }

    pub fn get_active(&self, id: &JobId) -> Option<ActiveJob> {
        self.partitions.read().active.get(id).cloned()
    }

    /// Move a queued job to processing and hand back its record.
    ///
    /// Returns None when no queued record exists for `id`.
    pub fn begin_processing(&self, id: &JobId) -> Option<ActiveJob> {
        let mut partitions = self.partitions.write();
        let job = partitions.active.get_mut(id)?;
        if job.phase != ActivePhase::Queued {
            return None;
        }
        job.phase = ActivePhase::Processing;
        Some(job.clone())
    }

    /// Remove the job from the active partition and store its terminal record.
    ///
    /// Returns whether an active record was removed. A job that already
    /// resolved keeps its first terminal record.
    pub fn move_to_resolved(&self, resolved: ResolvedJob) -> bool {
        let mut partitions = self.partitions.write();
        let was_active = partitions.active.remove(&resolved.id).is_some();
        partitions
            .resolved
            .entry(resolved.id.clone())
            .or_insert(ResolvedEntry {
                job: resolved,
                expiry_armed: false,
            });
        was_active
    }

    pub fn get_resolved(&self, id: &JobId) -> Option<ResolvedJob> {
        self.partitions
            .read()
            .resolved
            .get(id)
            .map(|entry| entry.job.clone())
    }

    /// Resolved partition first, then active, under one read lock
    pub fn lookup(&self, id: &JobId) -> JobLookup {
        let partitions = self.partitions.read();
        if let Some(entry) = partitions.resolved.get(id) {
            return JobLookup::Resolved(entry.job.clone());
        }
        match partitions.active.get(id) {
            Some(job) => JobLookup::Active(job.clone()),
            None => JobLookup::NotFound,
        }
    }

    /// Purge a resolved job once `delay` has elapsed.
    ///
    /// Only the first call per job arms a timer; later calls return false.
    /// The timer holds a weak reference, so it never keeps the table alive,
    /// and removing an entry that is already gone is a no-op.
    pub fn schedule_expiry(self: &Arc<Self>, id: &JobId, delay: Duration) -> bool {
        {
            let mut partitions = self.partitions.write();
            match partitions.resolved.get_mut(id) {
                Some(entry) if !entry.expiry_armed => entry.expiry_armed = true,
                _ => return false,
            }
        }

        let table = Arc::downgrade(self);
        let id = id.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(table) = table.upgrade() {
                table.expire(&id);
            }
        });

        true
    }

    fn expire(&self, id: &JobId) {
        if self.partitions.write().resolved.remove(id).is_some() {
            tracing::debug!(request_id = %id, "Resolved job expired");
        }
    }

    pub fn counts(&self) -> JobCounts {
        let partitions = self.partitions.read();
        JobCounts {
            active: partitions.active.len(),
            resolved: partitions.resolved.len(),
        }
    }
}

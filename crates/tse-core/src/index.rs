use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::entity::{Entity, EntityId};

/// Ids of one template in first-seen order, plus a revision stamp that
/// changes whenever the membership or a member's contents change.
#[derive(Debug, Clone, Default)]
struct Bucket {
    ids: Vec<EntityId>,
    revision: u64,
}

/// What an [`EntityIndex::upsert`] did to the buckets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// Template unchanged; the entity was replaced in its bucket slot.
    Replaced {
        /// The bucket the entity stays in.
        template: String,
    },
    /// The entity is new or changed template and was appended to a bucket.
    Moved {
        /// The bucket it left, if it was indexed before.
        from: Option<String>,
        /// The bucket it joined.
        to: String,
    },
    /// The entity's template is outside the allow-list. It is stored so it
    /// is written back, but it sits in no bucket.
    Unindexed {
        /// The bucket it left, if it was indexed before.
        from: Option<String>,
    },
}

/// Entities of a save grouped by template.
///
/// Only templates on the allow-list get buckets. Every bucketed id is in
/// exactly one bucket, the one matching its stored template.
#[derive(Debug, Clone)]
pub struct EntityIndex {
    allowed: Arc<BTreeSet<String>>,
    by_id: HashMap<EntityId, Arc<Entity>>,
    by_template: HashMap<String, Bucket>,
    lineage: u64,
}

static NEXT_LINEAGE: AtomicU64 = AtomicU64::new(1);

/// Shared by every index: a revision names exactly one bucket state.
static NEXT_REVISION: AtomicU64 = AtomicU64::new(1);

impl EntityIndex {
    /// Create an empty index for the given allow-list.
    pub fn new(allowed: BTreeSet<String>) -> Self {
        Self {
            allowed: Arc::new(allowed),
            by_id: HashMap::new(),
            by_template: HashMap::new(),
            lineage: NEXT_LINEAGE.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Index `entities` in input order, skipping templates outside
    /// `allowed`. Bucket order is first-seen order.
    pub fn build<I>(entities: I, allowed: &BTreeSet<String>) -> Self
    where
        I: IntoIterator<Item = Entity>,
    {
        let mut index = Self::new(allowed.clone());
        let mut skipped = 0usize;
        for entity in entities {
            if index.allows(&entity.template_name) {
                index.upsert(entity);
            } else {
                skipped += 1;
            }
        }
        tracing::debug!(
            indexed = index.by_id.len(),
            skipped,
            buckets = index.by_template.len(),
            "built entity index"
        );
        index
    }

    /// Returns `true` if the template is on the allow-list.
    pub fn allows(&self, template: &str) -> bool {
        self.allowed.contains(template)
    }

    /// Look up an entity by id.
    pub fn get(&self, id: &EntityId) -> Option<&Entity> {
        self.by_id.get(id).map(Arc::as_ref)
    }

    /// Returns `true` if the index holds the id.
    pub fn contains(&self, id: &EntityId) -> bool {
        self.by_id.contains_key(id)
    }

    /// Insert or replace an entity, keeping the buckets consistent.
    ///
    /// Only the old and new buckets are touched, so the cost is bounded by
    /// their sizes. A same-template replacement keeps the bucket slot.
    pub fn upsert(&mut self, entity: Entity) -> UpsertOutcome {
        let revision = NEXT_REVISION.fetch_add(1, Ordering::Relaxed);
        let id = entity.id.clone();
        let to = entity.template_name.clone();
        let from = self
            .by_id
            .get(&id)
            .map(|old| old.template_name.clone())
            .filter(|t| self.by_template.contains_key(t));

        let outcome = if from.as_deref() == Some(to.as_str()) {
            if let Some(bucket) = self.by_template.get_mut(&to) {
                bucket.revision = revision;
            }
            UpsertOutcome::Replaced { template: to }
        } else {
            if let Some(bucket) = from.as_deref().and_then(|old| self.by_template.get_mut(old)) {
                bucket.ids.retain(|existing| *existing != id);
                bucket.revision = revision;
            }
            if self.allows(&to) {
                let bucket = self.by_template.entry(to.clone()).or_default();
                bucket.ids.push(id.clone());
                bucket.revision = revision;
                UpsertOutcome::Moved { from, to }
            } else {
                UpsertOutcome::Unindexed { from }
            }
        };

        tracing::debug!(%id, ?outcome, "upserted entity");
        self.by_id.insert(id, Arc::new(entity));
        outcome
    }

    /// Entities of the given templates: each bucket in the order given, each
    /// bucket in its own order. Unknown templates contribute nothing.
    pub fn get_by_templates<S: AsRef<str>>(&self, templates: &[S]) -> Vec<&Entity> {
        templates
            .iter()
            .filter_map(|t| self.by_template.get(t.as_ref()))
            .flat_map(|bucket| bucket.ids.iter())
            .filter_map(|id| self.get(id))
            .collect()
    }

    /// Ids in a template's bucket. Empty for unknown templates.
    pub fn bucket(&self, template: &str) -> &[EntityId] {
        self.by_template
            .get(template)
            .map(|b| b.ids.as_slice())
            .unwrap_or_default()
    }

    /// Identifies the index this one was built or cloned from.
    pub fn lineage(&self) -> u64 {
        self.lineage
    }

    /// Revision stamp of a bucket; `0` for templates never indexed. Stamps
    /// are unique across every index in the process.
    pub fn bucket_revision(&self, template: &str) -> u64 {
        self.by_template.get(template).map_or(0, |b| b.revision)
    }

    /// Templates that currently have a bucket, sorted.
    pub fn templates(&self) -> Vec<&str> {
        let mut templates: Vec<&str> = self.by_template.keys().map(String::as_str).collect();
        templates.sort_unstable();
        templates
    }

    /// Every stored entity, bucketed or not, in no particular order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.by_id.values().map(Arc::as_ref)
    }

    /// Number of stored entities.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Bucket sizes keyed by template.
    pub fn counts_by_template(&self) -> HashMap<&str, usize> {
        self.by_template
            .iter()
            .map(|(t, b)| (t.as_str(), b.ids.len()))
            .collect()
    }
}

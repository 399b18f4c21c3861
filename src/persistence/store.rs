//! Tag group store
//!
//! Saves tag groups as one record each and rebuilds them on their node.
//!
//! Save:
//! - never saved: insert a new record under a fresh store key
//! - saved at an older version: one atomic update of `current_version` and
//!   the latest snapshot
//! - saved at the current version: nothing to do
//!
//! Load trusts a store key only after the record's node id and tag group id
//! match the request. Keys are random and assumed unique, not guaranteed.

use crate::entity::EntityState;
use crate::node::{Node, NodeId};
use crate::observability::{log_event_with_fields, Event, MetricsRegistry};
use crate::snapshot::{BuiltSnapshot, SnapshotBuilder, VersionKey};
use crate::store::{Criteria, Document, DocumentStore, DocumentStoreError, StoreKey, UpdateOp};
use crate::tag::TagId;
use crate::taggroup::{format_checksum, TagGroup, TagGroupId};

use super::config::StoreConfig;
use super::errors::{PersistenceError, PersistenceResult};
use super::record::{self, CURRENT_VERSION, STORE_KEY};
use super::report::{LoadReport, LoadedTagGroup, SaveOutcome};

/// Persists tag groups into one namespace of a document store
#[derive(Debug)]
pub struct TagGroupStore<'s, S: DocumentStore + ?Sized> {
    store: &'s S,
    config: StoreConfig,
    namespace: String,
    metrics: MetricsRegistry,
}

impl<'s, S: DocumentStore + ?Sized> TagGroupStore<'s, S> {
    pub fn new(store: &'s S, config: StoreConfig) -> Self {
        let namespace = config.namespace();
        Self {
            store,
            config,
            namespace,
            metrics: MetricsRegistry::new(),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }

    /// Saves `tag_group` of node `node_id` if it changed since the last save.
    ///
    /// On success `saved_version` equals `version`. On failure the tag group
    /// is left as it was, so the same call can simply be repeated.
    pub fn save(&self, node_id: NodeId, tag_group: &mut TagGroup) -> PersistenceResult<SaveOutcome> {
        let previous_crc32 = tag_group.crc32();
        let result = match tag_group.saved_version() {
            None => self.insert(node_id, tag_group),
            Some(saved) if saved < tag_group.version() => self.update(node_id, tag_group),
            Some(_) => {
                self.metrics.increment_unchanged_saves();
                self.log(
                    Event::TagGroupUnchanged,
                    node_id,
                    tag_group.id(),
                    &[("version", tag_group.version().to_string().as_str())],
                );
                return Ok(SaveOutcome::Unchanged);
            }
        };

        match result {
            Ok(outcome) => {
                tag_group.mark_saved();
                Ok(outcome)
            }
            Err(e) => {
                tag_group.set_crc32(previous_crc32);
                self.metrics.increment_save_failures();
                self.log(
                    Event::TagGroupSaveFailed,
                    node_id,
                    tag_group.id(),
                    &[("error", e.to_string().as_str())],
                );
                Err(e)
            }
        }
    }

    fn insert(&self, node_id: NodeId, tag_group: &mut TagGroup) -> PersistenceResult<SaveOutcome> {
        tag_group.refresh_crc32();
        let store_key = StoreKey::generate();
        let snapshots = self.build_snapshots(node_id, tag_group);
        let document = record::new_record(&store_key, node_id, tag_group, snapshots);

        self.store
            .insert(&self.namespace, document)
            .map_err(|e| self.store_error(node_id, tag_group.id(), e))?;

        tag_group.assign_store_key(store_key);
        self.metrics.increment_inserts();
        self.log(
            Event::TagGroupInserted,
            node_id,
            tag_group.id(),
            &[
                ("store_key", store_key.to_string().as_str()),
                ("version", tag_group.version().to_string().as_str()),
            ],
        );
        Ok(SaveOutcome::Inserted)
    }

    fn update(&self, node_id: NodeId, tag_group: &mut TagGroup) -> PersistenceResult<SaveOutcome> {
        let store_key = match tag_group.store_key() {
            Some(key) => *key,
            None => {
                return Err(PersistenceError::MissingStoreKey {
                    taggroup_id: tag_group.id(),
                    namespace: self.namespace.clone(),
                })
            }
        };

        tag_group.refresh_crc32();
        let mut ops = vec![UpdateOp::set(CURRENT_VERSION, tag_group.version())];
        for snapshot in self.build_snapshots(node_id, tag_group) {
            ops.push(UpdateOp::set(record::version_path(&snapshot.key), snapshot.document));
        }

        let criteria = record::identity_criteria(&store_key, node_id, tag_group.id());
        let result = self
            .store
            .update(&self.namespace, &criteria, &ops)
            .map_err(|e| self.store_error(node_id, tag_group.id(), e))?;

        if result.matched == 0 {
            return Err(PersistenceError::StoreWriteFailed {
                taggroup_id: tag_group.id(),
                node_id,
                namespace: self.namespace.clone(),
                reason: format!("no record matched store key {}", store_key),
            });
        }

        self.metrics.increment_updates();
        self.log(
            Event::TagGroupUpdated,
            node_id,
            tag_group.id(),
            &[
                ("store_key", store_key.to_string().as_str()),
                ("version", tag_group.version().to_string().as_str()),
            ],
        );
        Ok(SaveOutcome::Updated)
    }

    /// Latest snapshot, plus the numbered one when history is kept.
    fn build_snapshots(&self, node_id: NodeId, tag_group: &TagGroup) -> Vec<BuiltSnapshot> {
        let mut snapshots = vec![SnapshotBuilder::save(tag_group, VersionKey::Latest)];
        if self.config.keep_version_history {
            snapshots.push(SnapshotBuilder::save(
                tag_group,
                VersionKey::specific(tag_group.version()),
            ));
        }

        self.log_unsupported(node_id, tag_group.id(), &snapshots[0].unsupported_tags);
        snapshots
    }

    /// Rebuilds tag group `taggroup_id` on `node` from the record under
    /// `store_key`, using the snapshot named by `version`.
    ///
    /// `Ok(None)` when no record matches the node and tag group, the record
    /// is incomplete, or the node refuses to create the tag group. A record
    /// without the requested snapshot still yields a tag group, with no tags
    /// and at version 0.
    pub fn load<'n, N: Node + ?Sized>(
        &self,
        store_key: &StoreKey,
        node: &'n mut N,
        taggroup_id: TagGroupId,
        version: VersionKey,
    ) -> PersistenceResult<Option<LoadedTagGroup<'n>>> {
        let node_id = node.id();

        let document = match self.find_record(store_key, node_id, taggroup_id) {
            Ok(Some(document)) => document,
            Ok(None) => return Ok(self.miss(node_id, taggroup_id, "no matching record")),
            Err(e) => {
                self.metrics.increment_load_failures();
                self.log(
                    Event::TagGroupLoadFailed,
                    node_id,
                    taggroup_id,
                    &[("error", e.to_string().as_str())],
                );
                return Err(e);
            }
        };

        let Some(header) = record::read_header(&document) else {
            return Ok(self.miss(node_id, taggroup_id, "incomplete record"));
        };

        let Some(tag_group) = node.create_tag_group(taggroup_id, header.custom_type) else {
            return Ok(self.miss(node_id, taggroup_id, "node refused tag group"));
        };
        tag_group.set_state(EntityState::Created);
        tag_group.assign_store_key(*store_key);

        let mut report = LoadReport::default();
        if let Some(snapshot) = record::snapshot(&document, version) {
            tag_group.restore_versions(header.current_version);
            let loaded = SnapshotBuilder::load(snapshot, tag_group);

            report.snapshot_found = true;
            report.loaded_tags = loaded.loaded_tags;
            report.skipped_tags = loaded.skipped_tags;
            report.unsupported_tags = loaded.unsupported_tags;

            let computed = tag_group.compute_crc32();
            match loaded.stored_crc32 {
                Some(stored) => {
                    tag_group.set_crc32(stored);
                    report.checksum_verified = Some(stored == computed);
                    if stored != computed {
                        self.log(
                            Event::ChecksumMismatch,
                            node_id,
                            taggroup_id,
                            &[
                                ("computed", format_checksum(computed).as_str()),
                                ("stored", format_checksum(stored).as_str()),
                            ],
                        );
                    }
                }
                None => tag_group.set_crc32(computed),
            }
        }

        self.report_degraded(node_id, taggroup_id, &report);
        self.metrics.increment_loads();
        self.log(
            Event::TagGroupLoaded,
            node_id,
            taggroup_id,
            &[
                ("snapshot", version.to_string().as_str()),
                ("snapshot_found", if report.snapshot_found { "true" } else { "false" }),
                ("tags", report.loaded_tags.to_string().as_str()),
                ("version", tag_group.version().to_string().as_str()),
            ],
        );

        Ok(Some(LoadedTagGroup { tag_group, report }))
    }

    /// First record under `store_key` that belongs to this node and tag group.
    fn find_record(
        &self,
        store_key: &StoreKey,
        node_id: NodeId,
        taggroup_id: TagGroupId,
    ) -> PersistenceResult<Option<Document>> {
        let criteria = Criteria::new().eq(STORE_KEY, store_key.to_value());
        let cursor = self
            .store
            .query(&self.namespace, &criteria)
            .map_err(|e| self.unavailable(taggroup_id, e))?;

        for document in cursor {
            let document = document.map_err(|e| self.unavailable(taggroup_id, e))?;
            if record::identity_matches(&document, node_id, taggroup_id) {
                return Ok(Some(document));
            }
        }

        Ok(None)
    }

    fn miss<T>(&self, node_id: NodeId, taggroup_id: TagGroupId, reason: &str) -> Option<T> {
        self.metrics.increment_load_misses();
        self.log(Event::TagGroupNotFound, node_id, taggroup_id, &[("reason", reason)]);
        None
    }

    fn report_degraded(&self, node_id: NodeId, taggroup_id: TagGroupId, report: &LoadReport) {
        if !report.skipped_tags.is_empty() {
            self.metrics.add_skipped_tags(report.skipped_tags.len() as u64);
            for key in &report.skipped_tags {
                self.log(Event::TagSkipped, node_id, taggroup_id, &[("tag", key.as_str())]);
            }
        }
        self.log_unsupported(node_id, taggroup_id, &report.unsupported_tags);
    }

    fn log_unsupported(&self, node_id: NodeId, taggroup_id: TagGroupId, tags: &[TagId]) {
        for tag_id in tags {
            self.log(
                Event::UnsupportedValueType,
                node_id,
                taggroup_id,
                &[("tag", tag_id.to_string().as_str())],
            );
        }
    }

    fn store_error(&self, node_id: NodeId, taggroup_id: TagGroupId, e: DocumentStoreError) -> PersistenceError {
        if e.is_unavailable() {
            self.unavailable(taggroup_id, e)
        } else {
            PersistenceError::StoreWriteFailed {
                taggroup_id,
                node_id,
                namespace: self.namespace.clone(),
                reason: e.to_string(),
            }
        }
    }

    fn unavailable(&self, taggroup_id: TagGroupId, source: DocumentStoreError) -> PersistenceError {
        PersistenceError::StoreUnavailable {
            taggroup_id,
            namespace: self.namespace.clone(),
            source,
        }
    }

    fn log(&self, event: Event, node_id: NodeId, taggroup_id: TagGroupId, extra: &[(&str, &str)]) {
        let node = node_id.to_string();
        let taggroup = taggroup_id.to_string();
        let mut fields = vec![
            ("namespace", self.namespace.as_str()),
            ("node_id", node.as_str()),
            ("taggroup_id", taggroup.as_str()),
        ];
        fields.extend_from_slice(extra);
        log_event_with_fields(event, &fields);
    }
}

//! Persistence capability for the session layer
//!
//! Sessions only need to know whether a save went through and which tag
//! group a load produced. Failures are logged by the store and collapse to
//! `false` / `None` here.

use crate::node::Node;
use crate::observability::{log_event_with_fields, Event};
use crate::snapshot::VersionKey;
use crate::store::{DocumentStore, StoreKey};
use crate::taggroup::{TagGroup, TagGroupId};

use super::errors::PersistenceError;
use super::store::TagGroupStore;

pub trait TagGroupPersistence {
    /// Saves tag group `taggroup_id` of `node`. `true` on success or when
    /// nothing changed.
    fn save_tag_group<N: Node + ?Sized>(&self, node: &mut N, taggroup_id: TagGroupId) -> bool;

    /// Loads the tag group stored under `store_key` into `node`.
    fn load_tag_group<'n, N: Node + ?Sized>(
        &self,
        store_key: &StoreKey,
        node: &'n mut N,
        taggroup_id: TagGroupId,
        version: VersionKey,
    ) -> Option<&'n mut TagGroup>;
}

impl<'s, S: DocumentStore + ?Sized> TagGroupPersistence for TagGroupStore<'s, S> {
    fn save_tag_group<N: Node + ?Sized>(&self, node: &mut N, taggroup_id: TagGroupId) -> bool {
        let node_id = node.id();
        match node.tag_group_mut(taggroup_id) {
            Some(tag_group) => self.save(node_id, tag_group).is_ok(),
            None => {
                self.metrics().increment_save_failures();
                let error = PersistenceError::TagGroupNotFound {
                    node_id,
                    taggroup_id,
                };
                log_event_with_fields(
                    Event::TagGroupSaveFailed,
                    &[
                        ("error", error.to_string().as_str()),
                        ("namespace", self.namespace()),
                        ("node_id", node_id.to_string().as_str()),
                        ("taggroup_id", taggroup_id.to_string().as_str()),
                    ],
                );
                false
            }
        }
    }

    fn load_tag_group<'n, N: Node + ?Sized>(
        &self,
        store_key: &StoreKey,
        node: &'n mut N,
        taggroup_id: TagGroupId,
        version: VersionKey,
    ) -> Option<&'n mut TagGroup> {
        match self.load(store_key, node, taggroup_id, version) {
            Ok(loaded) => loaded.map(|l| l.tag_group),
            Err(_) => None,
        }
    }
}

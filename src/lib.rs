//! tagvault - versioned tag group persistence for a shared scene-graph server
//!
//! Tag groups are typed attribute collections attached to graph nodes. This
//! crate stores them in a document store, one record per tag group, with a
//! snapshot per persisted version, and loads them back into the owning node.
//!
//! Layers, leaf first:
//!
//! - `value`: typed value buffers to and from JSON document values
//! - `tag`: in-memory tags and the per-tag document serializer
//! - `taggroup`: in-memory tag groups (ordered tag arena, versions, CRC32)
//! - `snapshot`: one version snapshot of a tag group
//! - `persistence`: insert/update decisions and identity-verified loads
//!
//! The document store (`store`) and the owning node (`node`) are consumed as
//! capabilities and passed in explicitly.

pub mod cli;
pub mod entity;
pub mod node;
pub mod observability;
pub mod persistence;
pub mod snapshot;
pub mod store;
pub mod tag;
pub mod taggroup;
pub mod value;

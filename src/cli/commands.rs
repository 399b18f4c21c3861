//! CLI command implementations
//!
//! Every command loads the store configuration, opens the file store it
//! names and does one thing. `run_command_to` prints its one JSON response.

use std::fmt::Display;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

use serde_json::{json, Value};

use crate::node::{MemoryNode, Node, NodeId};
use crate::persistence::{record, LoadReport, StoreConfig, TagGroupStore};
use crate::snapshot::VersionKey;
use crate::store::{Criteria, DocumentStore, FileDocumentStore, StoreKey};
use crate::tag::TagId;
use crate::taggroup::{format_checksum, TagGroup, TagGroupId};
use crate::value::{self, TagValue, ValueType};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_response_to};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    if let Err(e) = run_command(cli.command) {
        write_error(e.code_str(), e.message())?;
        return Err(e);
    }
    Ok(())
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    run_command_to(cmd, &mut io::stdout().lock())
}

/// Run a command and write its response to `out`
pub fn run_command_to<W: Write>(cmd: Command, out: &mut W) -> CliResult<()> {
    let data = match cmd {
        Command::List { config } => list(config.as_deref()),
        Command::Show {
            store_key,
            node,
            taggroup,
            version,
            config,
        } => show(config.as_deref(), &store_key, node, taggroup, version),
        Command::Put {
            node,
            taggroup,
            custom_type,
            store_key,
            tags,
            config,
        } => {
            let specs = tags
                .iter()
                .map(|t| TagSpec::from_str(t))
                .collect::<CliResult<Vec<_>>>()?;
            put(config.as_deref(), node, taggroup, custom_type, store_key.as_ref(), &specs)
        }
    }?;
    write_response_to(out, data)
}

/// Configuration from `path`, or the defaults when none is given
pub fn load_config(path: Option<&Path>) -> CliResult<StoreConfig> {
    match path {
        Some(path) => Ok(StoreConfig::load(path)?),
        None => Ok(StoreConfig::default()),
    }
}

/// List stored tag group records
pub fn list(config_path: Option<&Path>) -> CliResult<Value> {
    let config = load_config(config_path)?;
    let store = FileDocumentStore::new(&config.store_path);
    list_records(&store, &config.namespace())
}

/// Load one tag group and print it
pub fn show(
    config_path: Option<&Path>,
    store_key: &StoreKey,
    node_id: NodeId,
    taggroup_id: TagGroupId,
    version: VersionKey,
) -> CliResult<Value> {
    let config = load_config(config_path)?;
    let store = FileDocumentStore::new(&config.store_path);
    show_tag_group(&store, config, store_key, node_id, taggroup_id, version)
}

/// Create or update a tag group and save it
pub fn put(
    config_path: Option<&Path>,
    node_id: NodeId,
    taggroup_id: TagGroupId,
    custom_type: i32,
    store_key: Option<&StoreKey>,
    tags: &[TagSpec],
) -> CliResult<Value> {
    let config = load_config(config_path)?;
    let store = FileDocumentStore::new(&config.store_path);
    put_tag_group(
        &store,
        config,
        node_id,
        taggroup_id,
        custom_type,
        store_key,
        tags,
    )
}

/// Summaries of every record in `namespace`
pub fn list_records<S: DocumentStore + ?Sized>(store: &S, namespace: &str) -> CliResult<Value> {
    let mut records = Vec::new();
    for document in store.query(namespace, &Criteria::new())? {
        let document = document?;
        let versions: Vec<String> = record::stored_versions(&document)
            .iter()
            .map(VersionKey::to_string)
            .collect();
        records.push(json!({
            "store_key": field(&document, record::STORE_KEY),
            "node_id": field(&document, record::NODE_ID),
            "taggroup_id": field(&document, record::TAGGROUP_ID),
            "custom_type": field(&document, record::CUSTOM_TYPE),
            "current_version": field(&document, record::CURRENT_VERSION),
            "versions": versions,
        }));
    }
    Ok(Value::Array(records))
}

fn field(document: &Value, name: &str) -> Value {
    document.get(name).cloned().unwrap_or(Value::Null)
}

pub fn show_tag_group<S: DocumentStore + ?Sized>(
    store: &S,
    config: StoreConfig,
    store_key: &StoreKey,
    node_id: NodeId,
    taggroup_id: TagGroupId,
    version: VersionKey,
) -> CliResult<Value> {
    let vault = TagGroupStore::new(store, config);
    let mut node = MemoryNode::new(node_id);

    let loaded = vault
        .load(store_key, &mut node, taggroup_id, version)?
        .ok_or_else(|| not_found(store_key, node_id, taggroup_id))?;

    Ok(describe(node_id, loaded.tag_group, Some(&loaded.report)))
}

pub fn put_tag_group<S: DocumentStore + ?Sized>(
    store: &S,
    config: StoreConfig,
    node_id: NodeId,
    taggroup_id: TagGroupId,
    custom_type: i32,
    store_key: Option<&StoreKey>,
    tags: &[TagSpec],
) -> CliResult<Value> {
    let vault = TagGroupStore::new(store, config);
    let mut node = MemoryNode::new(node_id);

    let tag_group = match store_key {
        Some(key) => {
            let loaded = vault
                .load(key, &mut node, taggroup_id, VersionKey::Latest)?
                .ok_or_else(|| not_found(key, node_id, taggroup_id))?;
            apply_tags(loaded.tag_group, tags)?;
            loaded
                .tag_group
                .increment_version()
                .map_err(|e| CliError::invalid_argument(e.to_string()))?;
            loaded.tag_group
        }
        None => {
            let tag_group = node
                .create_tag_group(taggroup_id, custom_type)
                .ok_or_else(|| CliError::invalid_argument("tag group already exists"))?;
            apply_tags(tag_group, tags)?;
            tag_group
        }
    };

    let outcome = vault.save(node_id, tag_group)?;

    let mut response = describe(node_id, tag_group, None);
    response["outcome"] = json!(outcome.as_str());
    Ok(response)
}

/// Replaces the tags named in `specs`; other tags are kept.
fn apply_tags(tag_group: &mut TagGroup, specs: &[TagSpec]) -> CliResult<()> {
    for spec in specs {
        tag_group.remove_tag(spec.id);
        let count = spec.value.len() as u32;
        tag_group
            .create_tag(spec.id, spec.value.value_type(), count, spec.custom_type)
            .and_then(|tag| tag.set_values(0, &spec.value))
            .map_err(|e| CliError::invalid_argument(e.to_string()))?;
    }
    Ok(())
}

fn describe(node_id: NodeId, tag_group: &TagGroup, report: Option<&LoadReport>) -> Value {
    let tags: Vec<Value> = tag_group
        .tags()
        .map(|tag| {
            json!({
                "id": tag.id(),
                "type": tag.value_type().name(),
                "count": tag.count(),
                "custom_type": tag.custom_type(),
                "values": value::encode(tag.value(), tag.count()).into_document(),
            })
        })
        .collect();

    let mut description = json!({
        "store_key": tag_group.store_key().map(StoreKey::to_string),
        "node_id": node_id,
        "taggroup_id": tag_group.id(),
        "custom_type": tag_group.custom_type(),
        "version": tag_group.version(),
        "saved_version": tag_group.saved_version(),
        "crc32": format_checksum(tag_group.crc32()),
        "tags": tags,
    });

    if let Some(report) = report {
        description["snapshot_found"] = json!(report.snapshot_found);
        description["checksum_verified"] = json!(report.checksum_verified);
        description["skipped_tags"] = json!(report.skipped_tags);
        description["unsupported_tags"] = json!(report.unsupported_tags);
    }

    description
}

fn not_found(store_key: &StoreKey, node_id: NodeId, taggroup_id: TagGroupId) -> CliError {
    CliError::not_found(format!(
        "No tag group {} of node {} under store key {}",
        taggroup_id, node_id, store_key
    ))
}

/// A tag given on the command line as `id:type:custom_type:values`
#[derive(Debug, Clone, PartialEq)]
pub struct TagSpec {
    pub id: TagId,
    pub custom_type: i32,
    pub value: TagValue,
}

impl FromStr for TagSpec {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| CliError::invalid_argument(format!("tag '{}': {}", s, reason));

        let mut parts = s.splitn(4, ':');
        let (Some(id), Some(type_name), Some(custom_type), Some(values)) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid("expected id:type:custom_type:values".to_string()));
        };

        let id = id
            .trim()
            .parse::<TagId>()
            .map_err(|e| invalid(format!("id: {}", e)))?;
        let value_type = ValueType::from_name(type_name.trim())
            .ok_or_else(|| invalid(format!("unknown type '{}'", type_name)))?;
        let custom_type = custom_type
            .trim()
            .parse::<i32>()
            .map_err(|e| invalid(format!("custom_type: {}", e)))?;
        let value = parse_values(value_type, values).map_err(invalid)?;

        Ok(TagSpec {
            id,
            custom_type,
            value,
        })
    }
}

fn parse_values(value_type: ValueType, raw: &str) -> Result<TagValue, String> {
    fn list<T>(raw: &str) -> Result<Vec<T>, String>
    where
        T: FromStr,
        T::Err: Display,
    {
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        raw.split(',')
            .map(|v| v.trim().parse::<T>().map_err(|e| format!("value '{}': {}", v, e)))
            .collect()
    }

    Ok(match value_type {
        ValueType::UInt8 => TagValue::UInt8(list(raw)?),
        ValueType::UInt16 => TagValue::UInt16(list(raw)?),
        ValueType::UInt32 => TagValue::UInt32(list(raw)?),
        ValueType::UInt64 => TagValue::UInt64(list(raw)?),
        // raw half-float bit patterns
        ValueType::Real16 => TagValue::Real16(list(raw)?),
        ValueType::Real32 => TagValue::Real32(list(raw)?),
        ValueType::Real64 => TagValue::Real64(list(raw)?),
        ValueType::String8 => TagValue::String8(raw.to_string()),
    })
}

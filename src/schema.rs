//! The opaque, read-only compiled schema the evaluator consumes.
//!
//! Nodes live in a flat arena owned by `RootData` and are addressed by
//! `NodeId` rather than linked with `Rc`/`Arc` pointers between each other -
//! a node that needs to reach another (an `allOf` branch, a `$ref` target)
//! looks it up by id instead of holding a strong reference to it. This keeps
//! `RootData` acyclic even though nodes conceptually point "up" to the root
//! (via `ref_map`) and "down" to their children: the arena is the only owner,
//! everything else is a plain index.
use crate::{dialect::Dialect, primitive_type::PrimitiveType};
use regex::Regex;
use serde_json::Value;
use std::{collections::HashMap, sync::Arc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(pub(crate) usize);

#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) path: String,
    pub(crate) schema_bool: Option<bool>,
    pub(crate) reference: Option<String>,

    pub(crate) type_list: Option<Vec<PrimitiveType>>,

    pub(crate) has_const: bool,
    pub(crate) const_value: Value,
    pub(crate) enum_values: Option<Vec<Value>>,

    pub(crate) maximum: Option<f64>,
    pub(crate) minimum: Option<f64>,
    /// draft-04 shape: boolean flag paired with `maximum`/`minimum`.
    pub(crate) exclusive_maximum_flag: Option<bool>,
    pub(crate) exclusive_minimum_flag: Option<bool>,
    /// draft-06 shape: a standalone number, replacing `maximum`/`minimum`.
    pub(crate) exclusive_maximum_value: Option<f64>,
    pub(crate) exclusive_minimum_value: Option<f64>,
    pub(crate) multiple_of: Option<f64>,

    pub(crate) min_length: Option<u64>,
    pub(crate) max_length: Option<u64>,
    pub(crate) pattern: Option<Regex>,

    pub(crate) items_single: Option<NodeId>,
    pub(crate) items_list: Option<Vec<NodeId>>,
    pub(crate) additional_items_schema: Option<NodeId>,
    pub(crate) additional_items_bool: Option<bool>,
    pub(crate) min_items: Option<u64>,
    pub(crate) max_items: Option<u64>,
    pub(crate) unique_items: bool,
    pub(crate) contains: Option<NodeId>,

    pub(crate) properties: Option<Vec<(String, NodeId)>>,
    pub(crate) pattern_properties: Option<Vec<(Regex, NodeId)>>,
    pub(crate) additional_properties_schema: Option<NodeId>,
    pub(crate) additional_properties_bool: Option<bool>,
    pub(crate) property_names_schema: Option<NodeId>,
    pub(crate) min_properties: u64,
    pub(crate) max_properties: Option<u64>,
    pub(crate) required_properties: Option<Vec<String>>,
    pub(crate) property_dependencies: Option<Vec<(String, Vec<String>)>>,
    pub(crate) schema_dependencies: Option<Vec<(String, NodeId)>>,

    pub(crate) all_of: Option<Vec<NodeId>>,
    pub(crate) any_of: Option<Vec<NodeId>>,
    pub(crate) one_of: Option<Vec<NodeId>>,
    pub(crate) not_schema: Option<NodeId>,

    pub(crate) format: Option<String>,
    pub(crate) format_minimum: Option<String>,
    pub(crate) format_maximum: Option<String>,
    pub(crate) format_exclusive_minimum: Option<String>,
    pub(crate) format_exclusive_maximum: Option<String>,
}

impl Node {
    pub(crate) fn empty(path: String) -> Self {
        Node {
            path,
            schema_bool: None,
            reference: None,
            type_list: None,
            has_const: false,
            const_value: Value::Null,
            enum_values: None,
            maximum: None,
            minimum: None,
            exclusive_maximum_flag: None,
            exclusive_minimum_flag: None,
            exclusive_maximum_value: None,
            exclusive_minimum_value: None,
            multiple_of: None,
            min_length: None,
            max_length: None,
            pattern: None,
            items_single: None,
            items_list: None,
            additional_items_schema: None,
            additional_items_bool: None,
            min_items: None,
            max_items: None,
            unique_items: false,
            contains: None,
            properties: None,
            pattern_properties: None,
            additional_properties_schema: None,
            additional_properties_bool: None,
            property_names_schema: None,
            min_properties: 0,
            max_properties: None,
            required_properties: None,
            property_dependencies: None,
            schema_dependencies: None,
            all_of: None,
            any_of: None,
            one_of: None,
            not_schema: None,
            format: None,
            format_minimum: None,
            format_maximum: None,
            format_exclusive_minimum: None,
            format_exclusive_maximum: None,
        }
    }
}

#[derive(Debug)]
pub(crate) struct RootData {
    pub(crate) arena: Vec<Node>,
    pub(crate) ref_map: HashMap<String, NodeId>,
    pub(crate) version: Dialect,
}

/// A compiled schema node. Cheap to clone (an `Arc` bump and a `usize` copy);
/// every accessor here corresponds 1:1 to an accessor enumerated in the
/// specification's data model.
#[derive(Debug, Clone)]
pub struct Schema {
    pub(crate) root: Arc<RootData>,
    pub(crate) id: NodeId,
}

impl Schema {
    pub(crate) fn at(root: Arc<RootData>, id: NodeId) -> Self {
        Schema { root, id }
    }

    fn node(&self) -> &Node {
        &self.root.arena[self.id.0]
    }

    fn child(&self, id: NodeId) -> Schema {
        Schema::at(Arc::clone(&self.root), id)
    }

    fn children(&self, ids: &[NodeId]) -> Vec<Schema> {
        ids.iter().map(|id| self.child(*id)).collect()
    }

    #[must_use]
    pub fn schema_bool(&self) -> Option<bool> {
        self.node().schema_bool
    }

    #[must_use]
    pub fn reference(&self) -> Option<&str> {
        self.node().reference.as_deref()
    }

    /// The root schema of the document this node belongs to.
    #[must_use]
    pub fn root(&self) -> Schema {
        Schema::at(Arc::clone(&self.root), NodeId(0))
    }

    /// Resolve a `$ref` string to its canonical key in `ref_map`: strip a
    /// leading `#` and use the remainder as a JSON Pointer path.
    #[must_use]
    pub fn end_path(&self, reference: &str) -> String {
        reference.trim_start_matches('#').to_string()
    }

    /// Look up a previously resolved reference target by its `end_path` key.
    #[must_use]
    pub fn resolve(&self, end_path: &str) -> Option<Schema> {
        self.root
            .ref_map
            .get(end_path)
            .map(|id| self.child(*id))
    }

    #[must_use]
    pub fn version(&self) -> Dialect {
        self.root.version
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.node().path
    }

    #[must_use]
    pub fn type_list(&self) -> Option<&[PrimitiveType]> {
        self.node().type_list.as_deref()
    }

    #[must_use]
    pub fn has_const(&self) -> bool {
        self.node().has_const
    }

    #[must_use]
    pub fn const_value(&self) -> &Value {
        &self.node().const_value
    }

    #[must_use]
    pub fn enum_values(&self) -> Option<&[Value]> {
        self.node().enum_values.as_deref()
    }

    #[must_use]
    pub fn maximum(&self) -> Option<f64> {
        self.node().maximum
    }
    #[must_use]
    pub fn minimum(&self) -> Option<f64> {
        self.node().minimum
    }
    #[must_use]
    pub fn exclusive_maximum_flag(&self) -> Option<bool> {
        self.node().exclusive_maximum_flag
    }
    #[must_use]
    pub fn exclusive_minimum_flag(&self) -> Option<bool> {
        self.node().exclusive_minimum_flag
    }
    #[must_use]
    pub fn exclusive_maximum_value(&self) -> Option<f64> {
        self.node().exclusive_maximum_value
    }
    #[must_use]
    pub fn exclusive_minimum_value(&self) -> Option<f64> {
        self.node().exclusive_minimum_value
    }
    #[must_use]
    pub fn multiple_of(&self) -> Option<f64> {
        self.node().multiple_of
    }

    #[must_use]
    pub fn min_length(&self) -> Option<u64> {
        self.node().min_length
    }
    #[must_use]
    pub fn max_length(&self) -> Option<u64> {
        self.node().max_length
    }
    #[must_use]
    pub fn pattern(&self) -> Option<&Regex> {
        self.node().pattern.as_ref()
    }

    #[must_use]
    pub fn items(&self) -> Option<Schema> {
        self.node().items_single.map(|id| self.child(id))
    }
    #[must_use]
    pub fn items_list(&self) -> Option<Vec<Schema>> {
        self.node().items_list.as_ref().map(|ids| self.children(ids))
    }
    #[must_use]
    pub fn additional_items_schema(&self) -> Option<Schema> {
        self.node().additional_items_schema.map(|id| self.child(id))
    }
    #[must_use]
    pub fn additional_items_bool(&self) -> Option<bool> {
        self.node().additional_items_bool
    }
    #[must_use]
    pub fn min_items(&self) -> Option<u64> {
        self.node().min_items
    }
    #[must_use]
    pub fn max_items(&self) -> Option<u64> {
        self.node().max_items
    }
    #[must_use]
    pub fn unique_items(&self) -> bool {
        self.node().unique_items
    }
    #[must_use]
    pub fn contains(&self) -> Option<Schema> {
        self.node().contains.map(|id| self.child(id))
    }

    #[must_use]
    pub fn properties(&self) -> Option<Vec<(&str, Schema)>> {
        self.node()
            .properties
            .as_ref()
            .map(|props| props.iter().map(|(k, id)| (k.as_str(), self.child(*id))).collect())
    }
    #[must_use]
    pub fn pattern_properties(&self) -> Option<Vec<(&Regex, Schema)>> {
        self.node()
            .pattern_properties
            .as_ref()
            .map(|props| props.iter().map(|(re, id)| (re, self.child(*id))).collect())
    }
    #[must_use]
    pub fn additional_properties_schema(&self) -> Option<Schema> {
        self.node().additional_properties_schema.map(|id| self.child(id))
    }
    #[must_use]
    pub fn additional_properties_bool(&self) -> Option<bool> {
        self.node().additional_properties_bool
    }
    #[must_use]
    pub fn property_names_schema(&self) -> Option<Schema> {
        self.node().property_names_schema.map(|id| self.child(id))
    }
    #[must_use]
    pub fn min_properties(&self) -> u64 {
        self.node().min_properties
    }
    #[must_use]
    pub fn max_properties(&self) -> Option<u64> {
        self.node().max_properties
    }
    #[must_use]
    pub fn required_properties(&self) -> Option<&[String]> {
        self.node().required_properties.as_deref()
    }
    #[must_use]
    pub fn property_dependencies(&self) -> Option<&[(String, Vec<String>)]> {
        self.node().property_dependencies.as_deref()
    }
    #[must_use]
    pub fn schema_dependencies(&self) -> Option<Vec<(&str, Schema)>> {
        self.node().schema_dependencies.as_ref().map(|deps| {
            deps.iter()
                .map(|(k, id)| (k.as_str(), self.child(*id)))
                .collect()
        })
    }

    #[must_use]
    pub fn all_of(&self) -> Option<Vec<Schema>> {
        self.node().all_of.as_ref().map(|ids| self.children(ids))
    }
    #[must_use]
    pub fn any_of(&self) -> Option<Vec<Schema>> {
        self.node().any_of.as_ref().map(|ids| self.children(ids))
    }
    #[must_use]
    pub fn one_of(&self) -> Option<Vec<Schema>> {
        self.node().one_of.as_ref().map(|ids| self.children(ids))
    }
    #[must_use]
    pub fn not_schema(&self) -> Option<Schema> {
        self.node().not_schema.map(|id| self.child(id))
    }

    #[must_use]
    pub fn format(&self) -> Option<&str> {
        self.node().format.as_deref()
    }
    #[must_use]
    pub fn format_minimum(&self) -> Option<&str> {
        self.node().format_minimum.as_deref()
    }
    #[must_use]
    pub fn format_maximum(&self) -> Option<&str> {
        self.node().format_maximum.as_deref()
    }
    #[must_use]
    pub fn format_exclusive_minimum(&self) -> Option<&str> {
        self.node().format_exclusive_minimum.as_deref()
    }
    #[must_use]
    pub fn format_exclusive_maximum(&self) -> Option<&str> {
        self.node().format_exclusive_maximum.as_deref()
    }
}

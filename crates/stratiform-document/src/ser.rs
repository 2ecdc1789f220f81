//! Order-preserving `Serialize` impls for the output document.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, SerializeTuple, Serializer};

use crate::document::{OutputDocument, Parameter, PropertyValue, Resource, Section};
use crate::identifier::LogicalId;
use crate::value::Value;

impl Serialize for LogicalId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Literal(text) => serializer.serialize_str(text),
            Value::Reference(logical_id) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Ref", logical_id)?;
                map.end()
            }
            Value::Join { delimiter, parts } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Fn::Join", &JoinArguments { delimiter, parts })?;
                map.end()
            }
        }
    }
}

/// The `[delimiter, [parts...]]` argument array of `Fn::Join`.
struct JoinArguments<'a> {
    delimiter: &'a str,
    parts: &'a [Value],
}

impl Serialize for JoinArguments<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(self.delimiter)?;
        tuple.serialize_element(&Parts(self.parts))?;
        tuple.end()
    }
}

struct Parts<'a>(&'a [Value]);

impl Serialize for Parts<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for part in self.0 {
            seq.serialize_element(part)?;
        }
        seq.end()
    }
}

impl Serialize for Parameter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.constraint.is_some() { 4 } else { 2 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("Type", self.parameter_type.as_str())?;
        map.serialize_entry("Default", &self.default)?;
        if let Some(constraint) = &self.constraint {
            map.serialize_entry("AllowedPattern", &constraint.allowed_pattern)?;
            map.serialize_entry("ConstraintDescription", &constraint.constraint_description)?;
        }
        map.end()
    }
}

impl Serialize for PropertyValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PropertyValue::Value(value) => value.serialize(serializer),
            PropertyValue::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("Type", self.resource_type.as_str())?;
        map.serialize_entry("Properties", &Entries(&self.properties))?;
        map.end()
    }
}

/// Any ordered map, serialized in iteration order.
struct Entries<'a, K, V>(&'a indexmap::IndexMap<K, V>);

impl<K: Serialize, V: Serialize> Serialize for Entries<'_, K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Serialize for OutputDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for (key, section) in &self.sections {
            match section {
                Section::FormatVersion(version) => map.serialize_entry(key.as_str(), version)?,
                Section::Description(value) => map.serialize_entry(key.as_str(), value)?,
                Section::Parameters(parameters) => {
                    map.serialize_entry(key.as_str(), &Entries(parameters))?
                }
                Section::Resources(resources) => {
                    map.serialize_entry(key.as_str(), &Entries(resources))?
                }
            }
        }
        map.end()
    }
}

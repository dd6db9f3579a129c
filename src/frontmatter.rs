//! Frontmatter codec for MDX article documents.
//!
//! On disk a document is a `---` line, a YAML metadata block, another `---`
//! line and the markdown/MDX body:
//!
//! ```text
//! ---
//! title: "Aprire una SRL in Italia"
//! excerpt: Guida breve
//! leadMagnet:
//!   title: Guida Completa
//!   downloadUrl: /downloads/guide.pdf
//! ---
//! # Aprire una SRL
//! ...
//! ```
//!
//! Known fields are typed; every other key lands in an ordered `extra` bag
//! and is written back untouched. Unknown entries with a YAML tag
//! (`status: !draft yes`) or a non-string key are kept too, after the
//! plain ones.

use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::{Mapping, Value};
use thiserror::Error;

const DELIMITER: &str = "---";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("malformed document: {0}")]
    Malformed(String),

    #[error("document has no content")]
    EmptyBody,

    #[error("failed to serialize metadata: {0}")]
    Serialize(String),
}

/// Typed article metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frontmatter {
    #[serde(default, deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,

    #[serde(default, deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,

    #[serde(default, deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,

    #[serde(default, deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,

    #[serde(default, deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default, deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    #[serde(default, deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,

    #[serde(default, deserialize_with = "keyword_list", skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_magnet: Option<LeadMagnet>,

    /// Shared by every translation of the same logical article.
    #[serde(default, deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub translation_group_id: Option<String>,

    /// Every key this schema does not know about, in document order.
    #[serde(flatten)]
    pub extra: Mapping,
}

/// Downloadable offer attached to an article.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadMagnet {
    #[serde(default, deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// `downloadUrl`, `buttonText` and anything else authors add.
    #[serde(flatten)]
    pub extra: Mapping,
}

impl Frontmatter {
    /// `metaTitle` when set, otherwise `title`.
    pub fn page_title(&self) -> Option<&str> {
        non_blank(self.meta_title.as_deref()).or_else(|| non_blank(self.title.as_deref()))
    }

    /// `metaDescription`, then `description`, then `excerpt`.
    pub fn page_description(&self) -> Option<&str> {
        non_blank(self.meta_description.as_deref())
            .or_else(|| non_blank(self.description.as_deref()))
            .or_else(|| non_blank(self.excerpt.as_deref()))
    }

    /// Editorial fields a published article should carry but does not.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if non_blank(self.title.as_deref()).is_none() {
            missing.push("title");
        }
        if non_blank(self.description.as_deref()).is_none()
            && non_blank(self.excerpt.as_deref()).is_none()
        {
            missing.push("description/excerpt");
        }
        if non_blank(self.cover_image.as_deref()).is_none() {
            missing.push("coverImage");
        }
        missing
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// A decoded article: metadata plus raw body text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub metadata: Frontmatter,
    pub body: String,
}

impl Document {
    pub fn new(metadata: Frontmatter, body: impl Into<String>) -> Self {
        Self {
            metadata,
            body: body.into(),
        }
    }

    pub fn encode(&self) -> Result<String, CodecError> {
        encode(&self.body, &self.metadata)
    }

    /// The body, or `EmptyBody` when there is nothing but whitespace.
    pub fn require_body(&self) -> Result<&str, CodecError> {
        if self.body.trim().is_empty() {
            return Err(CodecError::EmptyBody);
        }
        Ok(&self.body)
    }
}

/// Split a raw document into metadata and body.
///
/// The first line must be `---` (a leading BOM is ignored); the block ends at
/// the next line consisting of `---`. The body is everything after that line,
/// byte for byte.
pub fn decode(raw: &str) -> Result<Document, CodecError> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let mut lines = raw.split_inclusive('\n');
    let opening = lines
        .next()
        .ok_or_else(|| CodecError::Malformed("document is empty".to_string()))?;
    if opening.trim_end() != DELIMITER {
        return Err(CodecError::Malformed(
            "missing opening metadata delimiter".to_string(),
        ));
    }

    let yaml_start = opening.len();
    let mut offset = yaml_start;
    for line in lines {
        let line_end = offset + line.len();
        if line.trim_end() == DELIMITER {
            let metadata = parse_metadata(&raw[yaml_start..offset])?;
            return Ok(Document {
                metadata,
                body: raw[line_end..].to_string(),
            });
        }
        offset = line_end;
    }

    Err(CodecError::Malformed(
        "missing closing metadata delimiter".to_string(),
    ))
}

/// Serialize metadata and body back into a document.
///
/// Output is deterministic: the same input always produces the same bytes.
pub fn encode(body: &str, metadata: &Frontmatter) -> Result<String, CodecError> {
    let yaml = if *metadata == Frontmatter::default() {
        String::new()
    } else {
        let mut yaml =
            serde_yaml::to_string(metadata).map_err(|e| CodecError::Serialize(e.to_string()))?;
        if !yaml.ends_with('\n') {
            yaml.push('\n');
        }
        yaml
    };

    Ok(format!("{DELIMITER}\n{yaml}{DELIMITER}\n{body}"))
}

const KNOWN_KEYS: [&str; 14] = [
    "title",
    "description",
    "excerpt",
    "metaTitle",
    "metaDescription",
    "coverImage",
    "date",
    "author",
    "category",
    "slug",
    "lang",
    "keywords",
    "leadMagnet",
    "translationGroupId",
];
const LEAD_MAGNET_KEYS: [&str; 2] = ["title", "description"];

fn parse_metadata(yaml: &str) -> Result<Frontmatter, CodecError> {
    if yaml.trim().is_empty() {
        return Ok(Frontmatter::default());
    }
    let malformed = |e: serde_yaml::Error| CodecError::Malformed(format!("invalid metadata: {e}"));

    let mut mapping = match serde_yaml::from_str::<Value>(yaml).map_err(malformed)? {
        Value::Mapping(mapping) => mapping,
        Value::Null => return Ok(Frontmatter::default()),
        other => {
            return Err(CodecError::Malformed(format!(
                "metadata must be a mapping, found {}",
                value_kind(&other)
            )))
        }
    };

    // Flattened extras cannot carry tagged values or non-string keys; those
    // entries bypass serde and are appended to the bags afterwards.
    let held = take_opaque(&mut mapping, &KNOWN_KEYS);
    let held_lead_magnet = match mapping.get_mut("leadMagnet") {
        Some(Value::Mapping(lead_magnet)) => take_opaque(lead_magnet, &LEAD_MAGNET_KEYS),
        _ => Mapping::new(),
    };

    let mut metadata: Frontmatter =
        serde_yaml::from_value(Value::Mapping(mapping)).map_err(malformed)?;
    metadata.extra.extend(held);
    if let Some(lead_magnet) = metadata.lead_magnet.as_mut() {
        lead_magnet.extra.extend(held_lead_magnet);
    }
    Ok(metadata)
}

/// Remove unknown entries whose key is not a string or whose value
/// contains a YAML tag.
fn take_opaque(mapping: &mut Mapping, known: &[&str]) -> Mapping {
    let mut kept = Mapping::new();
    let mut taken = Mapping::new();
    for (key, value) in std::mem::take(mapping) {
        let opaque = match &key {
            Value::String(name) => !known.contains(&name.as_str()) && has_tag(&value),
            _ => true,
        };
        if opaque {
            taken.insert(key, value);
        } else {
            kept.insert(key, value);
        }
    }
    *mapping = kept;
    taken
}

fn has_tag(value: &Value) -> bool {
    match value {
        Value::Tagged(_) => true,
        Value::Sequence(items) => items.iter().any(has_tag),
        Value::Mapping(mapping) => mapping
            .iter()
            .any(|(key, value)| has_tag(key) || has_tag(value)),
        _ => false,
    }
}

/// Accept any YAML scalar for a text field: authors write `date: 2024-05-20`
/// unquoted and occasionally numeric titles.
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a text value, found {}",
            value_kind(&other)
        ))),
    }
}

/// `keywords` is normally a list; a single comma separated string is split.
fn keyword_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(
            s.split(',')
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .collect(),
        )),
        Some(Value::Sequence(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                Value::Number(n) => Ok(n.to_string()),
                Value::Bool(b) => Ok(b.to_string()),
                other => Err(serde::de::Error::custom(format!(
                    "keywords must be text, found {}",
                    value_kind(&other)
                ))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        Some(other) => Err(serde::de::Error::custom(format!(
            "keywords must be a list, found {}",
            value_kind(&other)
        ))),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

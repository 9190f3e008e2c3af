use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Speaker label used for turns typed by the local user
pub const USER_SPEAKER: &str = "You";

/// One message in the conversation, attributed to a speaker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    speaker: String,
    text: String,
}

impl ChatTurn {
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(USER_SPEAKER, text)
    }

    pub fn speaker(&self) -> &str {
        &self.speaker
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_user(&self) -> bool {
        self.speaker == USER_SPEAKER
    }
}

/// How the backend packs the `data` field of a chat reply
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ResponseShape {
    /// `data` is an array of records
    #[default]
    List,
    /// `data` is a single record object
    Single,
}

impl ResponseShape {
    pub fn as_str(self) -> &'static str {
        match self {
            ResponseShape::List => "list",
            ResponseShape::Single => "single",
        }
    }
}

/// A client profile row as returned by the backend.
///
/// Every field is kept as an opaque string; numeric columns such as
/// `age` and `net_worth` are stringified on decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRecord {
    #[serde(default, deserialize_with = "opaque")]
    pub name: String,
    #[serde(default, deserialize_with = "opaque")]
    pub age: String,
    #[serde(default, deserialize_with = "opaque")]
    pub gender: String,
    #[serde(rename = "person_2", default, deserialize_with = "opaque")]
    pub second_person: String,
    #[serde(default, deserialize_with = "opaque")]
    pub relationship: String,
    #[serde(default, deserialize_with = "opaque")]
    pub net_worth: String,
    #[serde(default, deserialize_with = "opaque")]
    pub postal_code: String,
    #[serde(default, deserialize_with = "opaque")]
    pub city: String,
    #[serde(default, deserialize_with = "opaque")]
    pub province: String,
    #[serde(default, deserialize_with = "opaque")]
    pub street: String,
    #[serde(
        default,
        deserialize_with = "opaque_optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub company_name: Option<String>,
}

impl ClientRecord {
    /// Fixed table columns, in display order
    pub const COLUMNS: [&'static str; 10] = [
        "name",
        "age",
        "gender",
        "secondPerson",
        "relationship",
        "netWorth",
        "postalCode",
        "city",
        "province",
        "street",
    ];

    /// Optional trailing column shown when company data is enabled
    pub const COMPANY_COLUMN: &'static str = "companyName";

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Column headers for a table, with or without the company column
    pub fn headers(show_company: bool) -> Vec<&'static str> {
        let mut headers = Self::COLUMNS.to_vec();
        if show_company {
            headers.push(Self::COMPANY_COLUMN);
        }
        headers
    }

    /// Cell values matching [`ClientRecord::headers`]
    pub fn cells(&self, show_company: bool) -> Vec<&str> {
        let mut cells = vec![
            self.name.as_str(),
            self.age.as_str(),
            self.gender.as_str(),
            self.second_person.as_str(),
            self.relationship.as_str(),
            self.net_worth.as_str(),
            self.postal_code.as_str(),
            self.city.as_str(),
            self.province.as_str(),
            self.street.as_str(),
        ];
        if show_company {
            cells.push(self.company_name.as_deref().unwrap_or(""));
        }
        cells
    }
}

/// The records currently shown in the table.
///
/// Replaced wholesale on every successful exchange; an empty set means
/// the backend found nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet(Vec<ClientRecord>);

impl ResultSet {
    pub fn new(records: Vec<ClientRecord>) -> Self {
        Self(records)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn records(&self) -> &[ClientRecord] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&ClientRecord> {
        self.0.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClientRecord> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<ClientRecord> {
        self.0
    }
}

impl From<Vec<ClientRecord>> for ResultSet {
    fn from(records: Vec<ClientRecord>) -> Self {
        Self(records)
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a ClientRecord;
    type IntoIter = std::slice::Iter<'a, ClientRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn opaque<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opaque_optional(deserializer)?.unwrap_or_default())
}

fn opaque_optional<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    })
}

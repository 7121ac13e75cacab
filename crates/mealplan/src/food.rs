use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Grams used when an AI payload or a bare legacy string carries no amount.
pub const DEFAULT_BASE_GRAMS: f64 = 100.0;

/// Unscaled reference amount typed by the template author.
///
/// The editor keeps an untouched input row as `Blank` (serialized as `""`)
/// rather than inventing a number for it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum BaseGrams {
    #[default]
    Blank,
    Grams(f64),
}

impl BaseGrams {
    /// Tolerant read of an author-entered amount. Numbers and numeric strings
    /// are kept, anything else (missing, negative, text) becomes `Blank`.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value.and_then(number_of) {
            Some(n) if n.is_finite() && n >= 0.0 => BaseGrams::Grams(n),
            _ => BaseGrams::Blank,
        }
    }

    /// AI payloads always get an integer amount, 100 when they omit it.
    pub fn from_ai_value(value: Option<&Value>) -> Self {
        match value.and_then(number_of) {
            Some(n) if n.is_finite() && n >= 0.0 => BaseGrams::Grams(n.round()),
            _ => BaseGrams::Grams(DEFAULT_BASE_GRAMS),
        }
    }

    /// Blank counts as zero.
    pub fn as_number(&self) -> f64 {
        match self {
            BaseGrams::Blank => 0.0,
            BaseGrams::Grams(n) => *n,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, BaseGrams::Blank)
    }

    pub fn is_positive(&self) -> bool {
        self.as_number() > 0.0
    }
}

fn number_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if !s.trim().is_empty() => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

impl From<f64> for BaseGrams {
    fn from(value: f64) -> Self {
        if value.is_finite() && value >= 0.0 {
            BaseGrams::Grams(value)
        } else {
            BaseGrams::Blank
        }
    }
}

impl fmt::Display for BaseGrams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaseGrams::Blank => Ok(()),
            BaseGrams::Grams(n) => write!(f, "{n}"),
        }
    }
}

impl Serialize for BaseGrams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            BaseGrams::Blank => serializer.serialize_str(""),
            BaseGrams::Grams(n) if n.fract() == 0.0 && *n <= u64::MAX as f64 => {
                serializer.serialize_u64(*n as u64)
            }
            BaseGrams::Grams(n) => serializer.serialize_f64(*n),
        }
    }
}

impl<'de> Deserialize<'de> for BaseGrams {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(BaseGrams::from_value(Some(&value)))
    }
}

/// One row of a category. `grams` is only present on portion-projected
/// values and is never read back as ground truth.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub base_grams: BaseGrams,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grams: Option<u32>,
}

impl FoodItem {
    pub fn new(name: impl Into<String>, base_grams: f64) -> Self {
        Self {
            name: name.into(),
            base_grams: base_grams.into(),
            grams: None,
        }
    }

    /// Named item whose amount has not been typed yet.
    pub fn blank(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Empty input row.
    pub fn placeholder() -> Self {
        Self::default()
    }

    /// Reads an item out of stored data. Bare strings are legacy items that
    /// only carried a name; they get `bare_grams` as their amount.
    pub fn from_raw(value: &Value, bare_grams: BaseGrams) -> Self {
        match value {
            Value::String(name) => Self {
                name: name.to_owned(),
                base_grams: bare_grams,
                grams: None,
            },
            Value::Object(map) => Self {
                name: name_of(map.get("name")),
                base_grams: BaseGrams::from_value(map.get("baseGrams")),
                grams: None,
            },
            _ => Self::placeholder(),
        }
    }

    /// Reads an item out of an AI payload.
    pub fn from_ai(value: &Value) -> Self {
        match value {
            Value::String(name) => Self::new(name.to_owned(), DEFAULT_BASE_GRAMS),
            Value::Object(map) => Self {
                name: name_of(map.get("name")),
                base_grams: BaseGrams::from_ai_value(
                    map.get("baseGrams").or_else(|| map.get("grams")),
                ),
                grams: None,
            },
            _ => Self::placeholder(),
        }
    }

    /// An item is submittable once it has a name and a positive amount.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && self.base_grams.is_positive()
    }

    /// `round(baseGrams * scale)`, blank amounts count as zero.
    pub fn scaled_grams(&self, scale: f64) -> u32 {
        let grams = (self.base_grams.as_number() * scale).round();
        if grams <= 0.0 {
            0
        } else if grams >= u32::MAX as f64 {
            u32::MAX
        } else {
            grams as u32
        }
    }
}

fn name_of(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.to_owned(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

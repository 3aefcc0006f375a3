use crate::utils::error::CatalogError;
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// Subject label that disables subject filtering.
pub const ALL_SUBJECTS: &str = "All";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub number: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subject: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub credits: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,
    /// AND of OR-groups of course numbers.
    #[serde(default, deserialize_with = "null_as_default")]
    pub requisites: Vec<Vec<String>>,
    #[serde(default, deserialize_with = "sequence_or_map")]
    pub sections: Vec<Section>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
}

impl Course {
    /// `(A OR B) AND (C)`, or `None` without requisites.
    pub fn requisites_summary(&self) -> String {
        if self.requisites.is_empty() {
            return "None".to_string();
        }
        self.requisites
            .iter()
            .map(|group| format!("({})", group.join(" OR ")))
            .collect::<Vec<_>>()
            .join(" AND ")
    }

    pub fn keywords_summary(&self) -> String {
        self.keywords.join(", ")
    }

    pub fn credits_label(&self) -> String {
        format!("{} Credits", format_credits(self.credits))
    }
}

pub fn format_credits(credits: f64) -> String {
    if credits.fract() == 0.0 {
        format!("{}", credits as i64)
    } else {
        format!("{}", credits)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default, deserialize_with = "string_or_number")]
    pub number: String,
    #[serde(default)]
    pub instructor: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub time: Schedule,
    #[serde(default, deserialize_with = "sequence_or_map")]
    pub subsections: Vec<Subsection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subsection {
    #[serde(default, deserialize_with = "string_or_number")]
    pub number: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub time: Schedule,
}

/// Meeting times keyed by day, in the order the API lists them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schedule(pub Vec<(String, String)>);

impl Schedule {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn summary(&self) -> String {
        self.0
            .iter()
            .map(|(day, hours)| format!("{} {}", day, hours))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Serialize for Schedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (day, hours) in &self.0 {
            map.serialize_entry(day, hours)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Schedule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ScheduleVisitor;

        impl<'de> Visitor<'de> for ScheduleVisitor {
            type Value = Schedule;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of day to meeting time")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Schedule, A::Error> {
                let mut entries = Vec::new();
                while let Some((day, hours)) = access.next_entry::<String, Option<String>>()? {
                    if let Some(hours) = hours {
                        entries.push((day, hours));
                    }
                }
                Ok(Schedule(entries))
            }

            // Anything other than a map carries no usable meeting times.
            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Schedule, A::Error> {
                while seq.next_element::<de::IgnoredAny>()?.is_some() {}
                Ok(Schedule::default())
            }

            fn visit_str<E: de::Error>(self, _: &str) -> Result<Schedule, E> {
                Ok(Schedule::default())
            }

            fn visit_bool<E: de::Error>(self, _: bool) -> Result<Schedule, E> {
                Ok(Schedule::default())
            }

            fn visit_i64<E: de::Error>(self, _: i64) -> Result<Schedule, E> {
                Ok(Schedule::default())
            }

            fn visit_u64<E: de::Error>(self, _: u64) -> Result<Schedule, E> {
                Ok(Schedule::default())
            }

            fn visit_f64<E: de::Error>(self, _: f64) -> Result<Schedule, E> {
                Ok(Schedule::default())
            }

            fn visit_unit<E: de::Error>(self) -> Result<Schedule, E> {
                Ok(Schedule::default())
            }

            fn visit_none<E: de::Error>(self) -> Result<Schedule, E> {
                Ok(Schedule::default())
            }
        }

        deserializer.deserialize_any(ScheduleVisitor)
    }
}

/// Star rating of a completed course, 1 through 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> Result<Self, CatalogError> {
        Self::try_from(value)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn stars(self) -> String {
        let filled = usize::from(self.0);
        let empty = usize::from(Self::MAX) - filled;
        format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
    }
}

impl TryFrom<i64> for Rating {
    type Error = CatalogError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value < i64::from(Self::MIN) || value > i64::from(Self::MAX) {
            return Err(CatalogError::InvalidRating { value });
        }
        Ok(Rating(value as u8))
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> u8 {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

/// Entries of a keyed collection. When the API sends an object keyed by
/// number, the key fills in a missing `number` on the entry.
trait Numbered {
    fn number_mut(&mut self) -> &mut String;
}

impl Numbered for Section {
    fn number_mut(&mut self) -> &mut String {
        &mut self.number
    }
}

impl Numbered for Subsection {
    fn number_mut(&mut self) -> &mut String {
        &mut self.number
    }
}

fn sequence_or_map<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Numbered,
{
    struct KeyedVisitor<T>(PhantomData<T>);

    impl<'de, T: Deserialize<'de> + Numbered> Visitor<'de> for KeyedVisitor<T> {
        type Value = Vec<T>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a list or a map keyed by number")
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Vec<T>, A::Error> {
            let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(item) = seq.next_element()? {
                items.push(item);
            }
            Ok(items)
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Vec<T>, A::Error> {
            let mut items = Vec::new();
            while let Some((key, mut item)) = access.next_entry::<String, T>()? {
                let number = item.number_mut();
                if number.is_empty() {
                    *number = key;
                }
                items.push(item);
            }
            Ok(items)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Vec<T>, E> {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(KeyedVisitor(PhantomData))
}

/// A null number is left empty so a keyed collection can fill it from the key.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(s)) => s,
        Some(Raw::Int(n)) => n.to_string(),
        Some(Raw::Float(n)) => n.to_string(),
        None => String::new(),
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

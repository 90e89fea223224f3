use std::fmt;

use serde::{
    Deserializer, Serializer,
    de::{MapAccess, Visitor},
    ser::SerializeMap,
};

/// Serde adapter for `action -> probability` maps that keeps entries in written order.
///
/// A label repeated within one map keeps its first position and its last value.
pub(crate) fn serialize<S>(actions: &[(String, f64)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(actions.len()))?;
    for (label, probability) in actions {
        map.serialize_entry(label, probability)?;
    }
    map.end()
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Vec<(String, f64)>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_map(ActionMapVisitor)
}

struct ActionMapVisitor;

impl<'de> Visitor<'de> for ActionMapVisitor {
    type Value = Vec<(String, f64)>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map from action label to probability")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut actions: Vec<(String, f64)> = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((label, probability)) = access.next_entry::<String, f64>()? {
            match actions.iter_mut().find(|(existing, _)| *existing == label) {
                Some(entry) => entry.1 = probability,
                None => actions.push((label, probability)),
            }
        }
        Ok(actions)
    }
}

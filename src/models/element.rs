use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::constants::{
    ELEMENT_MAX_TEMP, ELEMENT_MIN_TEMP, ELEMENT_TEMP, ELEMENT_VALUE_KEY, ELEMENT_WEATHER,
    MISSING_VALUE, PARAMETER_KEY, PARAMETER_NAME_KEY, VALUE_KEY,
};

/// Output field a weather element feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Description, // Wx
    MinTemp,     // MinT, T
    MaxTemp,     // MaxT
}

impl ElementKind {
    /// General forecasts carry `MinT`; agricultural forecasts only carry `T`.
    pub fn from_element_name(name: &str) -> Option<Self> {
        match name {
            ELEMENT_WEATHER => Some(ElementKind::Description),
            ELEMENT_MIN_TEMP | ELEMENT_TEMP => Some(ElementKind::MinTemp),
            ELEMENT_MAX_TEMP => Some(ElementKind::MaxTemp),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ElementKind::Description => "Description",
            ElementKind::MinTemp => "Min temperature",
            ElementKind::MaxTemp => "Max temperature",
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// The encodings a time slot has used for its value across dataset versions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElementValue<'a> {
    /// `{"parameter": {"parameterName": "22"}}`
    Parameter(&'a Value),
    /// `{"elementValue": [{"value": "22"}, ...]}`
    ValueList(&'a [Value]),
    /// `{"elementValue": {"value": "22"}}`
    ValueMap(&'a Map<String, Value>),
}

impl<'a> ElementValue<'a> {
    /// Classify a time slot. `parameter` takes priority over `elementValue`.
    pub fn classify(slot: &'a Value) -> Option<Self> {
        let slot = slot.as_object()?;

        if let Some(parameter) = slot.get(PARAMETER_KEY) {
            return Some(ElementValue::Parameter(parameter));
        }

        match slot.get(ELEMENT_VALUE_KEY)? {
            Value::Array(items) => Some(ElementValue::ValueList(items)),
            Value::Object(map) => Some(ElementValue::ValueMap(map)),
            _ => None,
        }
    }

    /// Scalar text of the value, `None` when the chosen encoding lacks it.
    pub fn value(&self) -> Option<String> {
        match self {
            ElementValue::Parameter(parameter) => {
                parameter.get(PARAMETER_NAME_KEY).and_then(scalar_text)
            }
            ElementValue::ValueList(items) => items
                .first()
                .and_then(|item| item.get(VALUE_KEY))
                .and_then(scalar_text),
            ElementValue::ValueMap(map) => map.get(VALUE_KEY).and_then(scalar_text),
        }
    }

    pub fn resolve(&self) -> String {
        self.value().unwrap_or_else(|| MISSING_VALUE.to_string())
    }

    /// Resolve a time slot straight to text, falling back to the sentinel.
    pub fn resolve_slot(slot: &'a Value) -> String {
        Self::classify(slot)
            .map(|value| value.resolve())
            .unwrap_or_else(|| MISSING_VALUE.to_string())
    }
}

/// Render a JSON scalar as text. Temperatures stay strings; no numeric coercion.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_element_kind_from_name() {
        assert_eq!(
            ElementKind::from_element_name("Wx"),
            Some(ElementKind::Description)
        );
        assert_eq!(
            ElementKind::from_element_name("MinT"),
            Some(ElementKind::MinTemp)
        );
        assert_eq!(ElementKind::from_element_name("T"), Some(ElementKind::MinTemp));
        assert_eq!(
            ElementKind::from_element_name("MaxT"),
            Some(ElementKind::MaxTemp)
        );
        assert_eq!(ElementKind::from_element_name("PoP"), None);
        assert_eq!(ElementKind::from_element_name("mint"), None);
    }

    #[test]
    fn test_classify_each_encoding() {
        let parameter = json!({"parameter": {"parameterName": "22"}});
        let list = json!({"elementValue": [{"value": "22"}]});
        let map = json!({"elementValue": {"value": "22"}});

        assert!(matches!(
            ElementValue::classify(&parameter),
            Some(ElementValue::Parameter(_))
        ));
        assert!(matches!(
            ElementValue::classify(&list),
            Some(ElementValue::ValueList(_))
        ));
        assert!(matches!(
            ElementValue::classify(&map),
            Some(ElementValue::ValueMap(_))
        ));

        for slot in [&parameter, &list, &map] {
            assert_eq!(ElementValue::resolve_slot(slot), "22");
        }
    }

    #[test]
    fn test_parameter_wins_over_element_value() {
        let slot = json!({
            "elementValue": {"value": "from-element-value"},
            "parameter": {"parameterName": "from-parameter"}
        });
        assert_eq!(ElementValue::resolve_slot(&slot), "from-parameter");
    }

    #[test]
    fn test_parameter_without_name_does_not_fall_through() {
        let slot = json!({
            "parameter": {"parameterUnit": "C"},
            "elementValue": {"value": "22"}
        });
        assert_eq!(ElementValue::resolve_slot(&slot), MISSING_VALUE);
    }

    #[test]
    fn test_unresolvable_slots_use_sentinel() {
        let cases = [
            json!({}),
            json!({"elementValue": []}),
            json!({"elementValue": [{"measures": "C"}]}),
            json!({"elementValue": "22"}),
            json!({"elementValue": {"value": null}}),
            json!("not a slot"),
        ];

        for slot in &cases {
            assert_eq!(ElementValue::resolve_slot(slot), MISSING_VALUE, "{slot}");
        }
    }

    #[test]
    fn test_numeric_values_rendered_as_text() {
        let slot = json!({"elementValue": [{"value": 22}, {"value": 30}]});
        assert_eq!(ElementValue::resolve_slot(&slot), "22");

        let slot = json!({"parameter": {"parameterName": 18.5}});
        assert_eq!(ElementValue::resolve_slot(&slot), "18.5");
    }
}

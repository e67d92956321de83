use serde_json::{Map, Value};

use crate::models::element::{scalar_text, ElementKind, ElementValue};
use crate::utils::constants::{
    ELEMENT_NAME_KEY, LOCATION_NAME_KEY, TIME_KEY, WEATHER_ELEMENT_KEY,
};

/// Borrowed view over one location record of the feed.
#[derive(Debug, Clone, Copy)]
pub struct LocationNode<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> LocationNode<'a> {
    pub fn new(fields: &'a Map<String, Value>) -> Self {
        Self { fields }
    }

    /// `None` when the value is not a JSON object.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        value.as_object().map(Self::new)
    }

    pub fn location_name(&self) -> Option<String> {
        self.name_by(LOCATION_NAME_KEY)
    }

    /// Name read from `key` instead of `locationName`.
    pub fn name_by(&self, key: &str) -> Option<String> {
        self.fields.get(key).and_then(scalar_text)
    }

    /// Element entries that are objects; anything else in the list is ignored.
    pub fn weather_elements(&self) -> impl Iterator<Item = ElementNode<'a>> + 'a {
        let fields: &'a Map<String, Value> = self.fields;
        fields
            .get(WEATHER_ELEMENT_KEY)
            .and_then(Value::as_array)
            .map(|elements| elements.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(ElementNode::from_value)
    }
}

/// Borrowed view over one `weatherElement` entry.
#[derive(Debug, Clone, Copy)]
pub struct ElementNode<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> ElementNode<'a> {
    pub fn from_value(value: &'a Value) -> Option<Self> {
        value.as_object().map(|fields| Self { fields })
    }

    pub fn element_name(&self) -> Option<&'a str> {
        self.fields.get(ELEMENT_NAME_KEY).and_then(Value::as_str)
    }

    pub fn kind(&self) -> Option<ElementKind> {
        self.element_name().and_then(ElementKind::from_element_name)
    }

    /// First entry of `time`, trusted as the nearest-term forecast slot.
    pub fn first_time_slot(&self) -> Option<&'a Value> {
        self.fields
            .get(TIME_KEY)
            .and_then(Value::as_array)
            .and_then(|slots| slots.first())
    }

    /// Resolved text of the first slot; `None` when there is no slot at all.
    pub fn first_value(&self) -> Option<String> {
        self.first_time_slot().map(ElementValue::resolve_slot)
    }
}

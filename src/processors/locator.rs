use serde_json::Value;

use crate::error::{ForecastError, Result};
use crate::utils::constants::LOCATION_NAME_KEY;

/// A qualifying list and the JSON Pointer (RFC 6901) it was found at.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedList<'a> {
    pub pointer: String,
    pub records: &'a [Value],
}

impl LocatedList<'_> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Finds the per-location record list by shape rather than by path.
///
/// A list qualifies when its first element is an object carrying the marker
/// key. The document is walked depth-first, objects in key insertion order and
/// lists in index order; the first qualifying list wins. Container key names
/// are never consulted, so the search survives upstream re-nesting of the
/// dataset (`cwaopendata.dataset.location`, `records.locations[0].location`,
/// `resources.resource.data...` and so on).
///
/// When a document carries several qualifying lists there is no scoring: the
/// first in traversal order is returned. [`LocationLocator::candidates`] lists
/// them all for diagnostics.
#[derive(Debug, Clone)]
pub struct LocationLocator {
    marker_key: String,
}

impl LocationLocator {
    pub fn new() -> Self {
        Self {
            marker_key: LOCATION_NAME_KEY.to_string(),
        }
    }

    pub fn with_marker_key(marker_key: &str) -> Self {
        Self {
            marker_key: marker_key.to_string(),
        }
    }

    pub fn marker_key(&self) -> &str {
        &self.marker_key
    }

    /// Locate the first qualifying list, borrowing it from the document.
    pub fn locate<'a>(&self, doc: &'a Value) -> Option<&'a [Value]> {
        match doc {
            Value::Array(items) => {
                if self.is_location_list(items) {
                    return Some(items);
                }
                items.iter().find_map(|item| self.locate(item))
            }
            Value::Object(map) => map.values().find_map(|value| self.locate(value)),
            _ => None,
        }
    }

    /// Like [`locate`](Self::locate) but reports absence as an error value.
    pub fn find_location_list<'a>(&self, doc: &'a Value) -> Result<&'a [Value]> {
        self.locate(doc)
            .ok_or_else(|| ForecastError::LocationListNotFound {
                marker: self.marker_key.clone(),
            })
    }

    /// Locate the first qualifying list together with its pointer.
    pub fn locate_with_path<'a>(&self, doc: &'a Value) -> Option<LocatedList<'a>> {
        let mut path = Vec::new();
        self.search(doc, &mut path)
    }

    /// Every qualifying list in traversal order. An accepted list is not
    /// descended into.
    pub fn candidates<'a>(&self, doc: &'a Value) -> Vec<LocatedList<'a>> {
        let mut path = Vec::new();
        let mut found = Vec::new();
        self.collect(doc, &mut path, &mut found);
        found
    }

    fn is_location_list(&self, items: &[Value]) -> bool {
        items
            .first()
            .and_then(Value::as_object)
            .is_some_and(|first| first.contains_key(&self.marker_key))
    }

    fn search<'a>(&self, node: &'a Value, path: &mut Vec<String>) -> Option<LocatedList<'a>> {
        match node {
            Value::Array(items) => {
                if self.is_location_list(items) {
                    return Some(LocatedList {
                        pointer: to_pointer(path),
                        records: items,
                    });
                }
                for (index, item) in items.iter().enumerate() {
                    path.push(index.to_string());
                    let found = self.search(item, path);
                    path.pop();
                    if found.is_some() {
                        return found;
                    }
                }
                None
            }
            Value::Object(map) => {
                for (key, value) in map {
                    path.push(key.clone());
                    let found = self.search(value, path);
                    path.pop();
                    if found.is_some() {
                        return found;
                    }
                }
                None
            }
            _ => None,
        }
    }

    fn collect<'a>(&self, node: &'a Value, path: &mut Vec<String>, out: &mut Vec<LocatedList<'a>>) {
        match node {
            Value::Array(items) => {
                if self.is_location_list(items) {
                    out.push(LocatedList {
                        pointer: to_pointer(path),
                        records: items,
                    });
                    return;
                }
                for (index, item) in items.iter().enumerate() {
                    path.push(index.to_string());
                    self.collect(item, path, out);
                    path.pop();
                }
            }
            Value::Object(map) => {
                for (key, value) in map {
                    path.push(key.clone());
                    self.collect(value, path, out);
                    path.pop();
                }
            }
            _ => {}
        }
    }
}

impl Default for LocationLocator {
    fn default() -> Self {
        Self::new()
    }
}

fn to_pointer(path: &[String]) -> String {
    path.iter()
        .map(|segment| format!("/{}", segment.replace('~', "~0").replace('/', "~1")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_locate_nested_in_object() {
        let doc = json!({
            "cwaopendata": {
                "dataset": {
                    "datasetInfo": {"issueTime": "2024-01-01T06:00:00+08:00"},
                    "location": [
                        {"locationName": "臺北市", "weatherElement": []},
                        {"locationName": "新北市", "weatherElement": []}
                    ]
                }
            }
        });

        let locator = LocationLocator::new();
        let found = locator.locate(&doc).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0]["locationName"], "臺北市");
    }

    #[test]
    fn test_locate_root_list() {
        let doc = json!([{"locationName": "Taichung"}]);
        let located = LocationLocator::new().locate_with_path(&doc).unwrap();
        assert_eq!(located.pointer, "");
        assert_eq!(located.len(), 1);
    }

    #[test]
    fn test_locate_inside_list_of_wrappers() {
        let doc = json!({
            "records": {
                "locations": [
                    {
                        "datasetDescription": "forecast",
                        "location": [{"locationName": "Tainan"}]
                    }
                ]
            }
        });

        let locator = LocationLocator::new();
        let located = locator.locate_with_path(&doc).unwrap();
        assert_eq!(located.pointer, "/records/locations/0/location");
        assert_eq!(doc.pointer(&located.pointer).unwrap(), &json!([{"locationName": "Tainan"}]));
    }

    #[test]
    fn test_first_element_decides() {
        // Marker only on the second element: the list does not qualify.
        let doc = json!({
            "items": [{"name": "header"}, {"locationName": "Yilan"}]
        });
        assert!(LocationLocator::new().locate(&doc).is_none());
    }

    #[test]
    fn test_not_found_cases() {
        let locator = LocationLocator::new();
        for doc in [
            json!({}),
            json!([]),
            json!({"a": 1, "b": "two", "c": null, "d": true}),
            json!({"a": {"b": []}}),
            json!("locationName"),
            json!(42),
            json!({"locationName": "not inside a list"}),
        ] {
            assert!(locator.locate(&doc).is_none(), "unexpected match in {doc}");
        }
    }

    #[test]
    fn test_find_location_list_error() {
        let err = LocationLocator::new()
            .find_location_list(&json!({"success": "true"}))
            .unwrap_err();
        assert!(matches!(
            err,
            ForecastError::LocationListNotFound { ref marker } if marker == "locationName"
        ));
    }

    #[test]
    fn test_first_found_wins_in_insertion_order() {
        let doc = json!({
            "zeta": [{"locationName": "first"}],
            "alpha": [{"locationName": "second"}]
        });

        let locator = LocationLocator::new();
        let found = locator.locate(&doc).unwrap();
        assert_eq!(found[0]["locationName"], "first");

        let candidates = locator.candidates(&doc);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].pointer, "/zeta");
        assert_eq!(candidates[1].pointer, "/alpha");
        assert_eq!(Some(&candidates[0]), locator.locate_with_path(&doc).as_ref());
    }

    #[test]
    fn test_accepted_list_is_not_descended() {
        let doc = json!({
            "location": [
                {"locationName": "outer", "nested": [{"locationName": "inner"}]}
            ]
        });
        let candidates = LocationLocator::new().candidates(&doc);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].pointer, "/location");
    }

    #[test]
    fn test_custom_marker_key() {
        let doc = json!({"data": [{"stationName": "Alishan"}]});
        assert!(LocationLocator::new().locate(&doc).is_none());

        let locator = LocationLocator::with_marker_key("stationName");
        assert_eq!(locator.locate(&doc).unwrap().len(), 1);
    }

    #[test]
    fn test_pointer_escaping() {
        let doc = json!({"a/b": {"c~d": [{"locationName": "x"}]}});
        let located = LocationLocator::new().locate_with_path(&doc).unwrap();
        assert_eq!(located.pointer, "/a~1b/c~0d");
        assert!(doc.pointer(&located.pointer).is_some());
    }
}

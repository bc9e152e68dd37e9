//! Deep merge of JSON values used to apply override entries
//!
//! Rules, applied recursively:
//! - objects merge key by key, with `patch` taking precedence
//! - a `null` in `patch` removes the key from `base`
//! - a non-empty list of named objects (`env`, `endpoints`, `volumeMounts`)
//!   merges into a named base list element by element, matching on `name`
//! - anything else in `patch` replaces the base value

use serde_json::{Map, Value};

/// Apply `patch` onto `base` in place
pub fn merge_patch(base: &mut Value, patch: &Value) {
    match (base, patch) {
        (Value::Object(base_map), Value::Object(patch_map)) => {
            merge_objects(base_map, patch_map);
        }
        (Value::Array(base_items), Value::Array(patch_items))
            if !patch_items.is_empty()
                && is_named_list(base_items)
                && is_named_list(patch_items) =>
        {
            for patch_item in patch_items {
                let name = item_name(patch_item);
                match base_items.iter_mut().find(|b| item_name(b) == name) {
                    Some(existing) => merge_patch(existing, patch_item),
                    None => base_items.push(strip_nulls(patch_item)),
                }
            }
        }
        (base, patch) => {
            *base = strip_nulls(patch);
        }
    }
}

fn merge_objects(base: &mut Map<String, Value>, patch: &Map<String, Value>) {
    for (key, patch_val) in patch {
        if patch_val.is_null() {
            base.remove(key);
        } else if let Some(base_val) = base.get_mut(key) {
            merge_patch(base_val, patch_val);
        } else {
            base.insert(key.clone(), strip_nulls(patch_val));
        }
    }
}

/// Drop one member of a tagged union from `base` when `patch` selects another.
///
/// `members` lists the union's wire keys (e.g. `container`, `volume`).
pub fn replace_union_member(base: &mut Value, patch: &Value, members: &[&str]) {
    let (Value::Object(base_map), Value::Object(patch_map)) = (base, patch) else {
        return;
    };
    let Some(selected) = members
        .iter()
        .find(|m| patch_map.get(**m).is_some_and(|v| !v.is_null()))
    else {
        return;
    };
    for member in members {
        if member != selected {
            base_map.remove(*member);
        }
    }
}

fn is_named_list(items: &[Value]) -> bool {
    items.iter().all(|item| item_name(item).is_some())
}

fn item_name(item: &Value) -> Option<&str> {
    item.as_object()?.get("name")?.as_str()
}

/// Inserted values never carry `null` deletion markers
fn strip_nulls(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.clone(), strip_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(strip_nulls).collect()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn objects_merge_recursively() {
        let mut base = json!({"container": {"image": "a", "memoryLimit": "1Gi"}});
        merge_patch(&mut base, &json!({"container": {"memoryLimit": "2Gi"}}));
        assert_eq!(
            base,
            json!({"container": {"image": "a", "memoryLimit": "2Gi"}})
        );
    }

    #[test]
    fn null_removes_key() {
        let mut base = json!({"container": {"image": "a", "mountSources": true}});
        merge_patch(&mut base, &json!({"container": {"mountSources": null}}));
        assert_eq!(base, json!({"container": {"image": "a"}}));
    }

    #[test]
    fn named_lists_merge_by_name() {
        let mut base = json!({"env": [{"name": "A", "value": "1"}, {"name": "B", "value": "2"}]});
        merge_patch(
            &mut base,
            &json!({"env": [{"name": "B", "value": "20"}, {"name": "C", "value": "3"}]}),
        );
        assert_eq!(
            base,
            json!({"env": [
                {"name": "A", "value": "1"},
                {"name": "B", "value": "20"},
                {"name": "C", "value": "3"}
            ]})
        );
    }

    #[test]
    fn plain_lists_are_replaced() {
        let mut base = json!({"args": ["a", "b"]});
        merge_patch(&mut base, &json!({"args": ["c"]}));
        assert_eq!(base, json!({"args": ["c"]}));
    }

    #[test]
    fn empty_list_clears_named_list() {
        let mut base = json!({"env": [{"name": "A", "value": "1"}]});
        merge_patch(&mut base, &json!({"env": []}));
        assert_eq!(base, json!({"env": []}));
    }

    #[test]
    fn union_member_is_swapped() {
        let mut base = json!({"name": "x", "container": {"image": "a"}});
        let patch = json!({"name": "x", "volume": {"size": "1Gi"}});
        replace_union_member(&mut base, &patch, &["container", "volume"]);
        merge_patch(&mut base, &patch);
        assert_eq!(base, json!({"name": "x", "volume": {"size": "1Gi"}}));
    }

    #[test]
    fn union_untouched_when_patch_keeps_member() {
        let mut base = json!({"name": "x", "container": {"image": "a"}});
        let patch = json!({"name": "x", "attributes": {"k": "v"}});
        replace_union_member(&mut base, &patch, &["container", "volume"]);
        assert_eq!(base, json!({"name": "x", "container": {"image": "a"}}));
    }
}

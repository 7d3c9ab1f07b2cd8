//! Canonical signatures and overload renaming
//!
//! Overloaded functions share a declared name that most binding targets
//! cannot express, so each colliding group is renamed with ordinal suffixes.
//! Renaming is a whole-batch operation: it has to see every sibling at once
//! to know which names collide.

use std::collections::BTreeMap;

use crate::abi::{Method, Param};

/// Canonical type of one parameter, tuples expanded
///
/// Tuple descriptors say nothing on their own; the canonical form replaces
/// the `tuple` prefix with the parenthesized component list, recursively,
/// keeping any array suffixes.
fn canonical_type(param: &Param) -> String {
    if let Some(suffix) = param.type_name.strip_prefix("tuple") {
        if suffix.is_empty() || suffix.starts_with('[') {
            let components = param.components.as_deref().unwrap_or(&[]);
            let inner: Vec<String> = components.iter().map(canonical_type).collect();
            return format!("({}){}", inner.join(","), suffix);
        }
    }
    param.type_name.clone()
}

/// Canonical function signature, e.g. `transfer(address,uint256)`
pub fn function_signature(method: &Method) -> String {
    let parameter_types: Vec<String> = method.inputs.iter().map(canonical_type).collect();
    format!("{}({})", method.name, parameter_types.join(","))
}

/// Assign binding-safe names to a batch of methods
///
/// Returns one name per method, aligned by position. Methods whose declared
/// name is unique pass through unchanged; each colliding group is renamed
/// `name1`, `name2`, ... with ordinals assigned in signature order so the
/// numbering does not depend on declaration order.
pub fn disambiguate_names(methods: &[Method]) -> Vec<String> {
    let mut names: Vec<String> = methods.iter().map(|m| m.name.clone()).collect();

    let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (position, method) in methods.iter().enumerate() {
        groups.entry(method.name.as_str()).or_default().push(position);
    }

    for (_, mut positions) in groups {
        if positions.len() < 2 {
            continue;
        }
        positions.sort_by_key(|&position| function_signature(&methods[position]));
        for (ordinal, &position) in positions.iter().enumerate() {
            names[position] = format!("{}{}", methods[position].name, ordinal + 1);
        }
    }

    names
}

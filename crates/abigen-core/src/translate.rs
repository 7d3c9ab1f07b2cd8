//! Type translation from ABI descriptors to host type expressions
//!
//! This module implements the recursive descent over the ABI type grammar
//! that maps each descriptor to a TypeScript type expression. Scalars are
//! matched against an ordered rule list; trailing array markers peel one
//! layer per recursive call; `tuple` descriptors recurse into their
//! component lists.
//!
//! The rule lists are assembled up front as pure data, one list per
//! (direction, backend) combination, so matching never mutates shared
//! state. Overrides sit ahead of the base rules and win on first match.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::abi::{Backend, Param, ParamKind};
use crate::error::Error;

/// Host type for integers that fit safely in a plain number on input
///
/// Both backends accept plain numbers for small-width integer parameters.
/// The array-wrap logic compares element translations against this exact
/// constant, so the rule below must produce it verbatim.
pub const SMALL_INT_UNION: &str = "BigNumber | number";

/// Matches one trailing `[]` or `[N]` array marker
static TRAILING_ARRAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\d*\]$").expect("valid array marker pattern"));

/// One scalar translation rule: first pattern match wins
struct Rule {
    pattern: Regex,
    host_type: &'static str,
}

/// Base scalar rules, in priority order
///
/// Width suffixes are optional and matched literally when present, so a
/// width-less `int`/`uint` takes the same path as an explicit width.
const BASE_RULES: &[(&str, &str)] = &[
    ("^string$", "string"),
    ("^address$", "string"),
    ("^bool$", "boolean"),
    (r"^u?int\d*$", "BigNumber"),
    (r"^bytes\d*$", "string"),
];

fn compile_rules(overrides: &'static [(&'static str, &'static str)]) -> Vec<Rule> {
    overrides
        .iter()
        .chain(BASE_RULES)
        .map(|&(pattern, host_type)| Rule {
            pattern: Regex::new(pattern).expect("valid scalar rule pattern"),
            host_type,
        })
        .collect()
}

static INPUT_RULES: Lazy<Vec<Rule>> =
    Lazy::new(|| compile_rules(&[(r"^u?int(8|16|32)?$", SMALL_INT_UNION)]));

static NARROWED_OUTPUT_RULES: Lazy<Vec<Rule>> =
    Lazy::new(|| compile_rules(&[(r"^u?int(8|16|32|48)?$", "number")]));

static OUTPUT_RULES: Lazy<Vec<Rule>> = Lazy::new(|| compile_rules(&[]));

/// Select the prebuilt rule list for a (direction, backend) combination
///
/// Input parameters take the plain-number widening on either backend;
/// ethers additionally narrows small integers it returns, since the library
/// converts them to plain numbers itself.
fn rules(kind: ParamKind, backend: Backend) -> &'static [Rule] {
    match (kind, backend) {
        (ParamKind::Input, _) => INPUT_RULES.as_slice(),
        (ParamKind::Output, Backend::Ethers) => NARROWED_OUTPUT_RULES.as_slice(),
        (ParamKind::Output, Backend::Web3) => OUTPUT_RULES.as_slice(),
    }
}

fn is_union_type(host_type: &str) -> bool {
    host_type == SMALL_INT_UNION
}

fn is_record_type(host_type: &str) -> bool {
    host_type.starts_with('{') && host_type.ends_with('}')
}

/// Translate an ABI type descriptor to a host type expression
///
/// Pure over its inputs: the same descriptor, direction, and backend always
/// produce the same expression. `components` is required (and non-empty)
/// only for tuple descriptors; an array of tuples carries the same component
/// list through every array layer.
///
/// # Errors
///
/// - [`Error::UnknownType`] when the descriptor matches no rule and is not
///   a tuple
/// - [`Error::MalformedTuple`] when a tuple descriptor has no usable
///   component list
pub fn translate(
    kind: ParamKind,
    backend: Backend,
    descriptor: &str,
    components: Option<&[Param]>,
) -> Result<String, Error> {
    // Array case: strip exactly the last marker and wrap the element type.
    // Bracket-suffixing a union or record type would change its meaning, so
    // those take the generic form instead.
    if TRAILING_ARRAY.is_match(descriptor) {
        let element = TRAILING_ARRAY.replace(descriptor, "");
        let element_type = translate(kind, backend, &element, components)?;
        let array_type = if is_union_type(&element_type) || is_record_type(&element_type) {
            format!("Array<{}>", element_type)
        } else {
            format!("{}[]", element_type)
        };
        return Ok(array_type);
    }

    for rule in rules(kind, backend) {
        if rule.pattern.is_match(descriptor) {
            return Ok(rule.host_type.to_string());
        }
    }

    if descriptor == "tuple" {
        let components = components
            .filter(|list| !list.is_empty())
            .ok_or_else(|| Error::MalformedTuple(descriptor.to_string()))?;
        let fields = components
            .iter()
            .map(|component| {
                let value_type = translate(
                    kind,
                    backend,
                    &component.type_name,
                    component.components.as_deref(),
                )?;
                Ok(format!("{}: {}", component.name, value_type))
            })
            .collect::<Result<Vec<_>, Error>>()?;
        return Ok(format!("{{{}}}", fields.join(", ")));
    }

    Err(Error::UnknownType(descriptor.to_string()))
}

//! ABI normalization into a rendering context
//!
//! A contract starts as one parsed JSON document in one of three shapes: a
//! bare member array, a Truffle-style artifact with an `abi` field, or a
//! compiler artifact with a nested `compilerOutput.abi` field. This module
//! extracts the member list, then builds the enriched, deterministic model
//! the template layer renders from.

use serde_json::Value;

use crate::abi::{Constructor, EnrichedMethod, Event, Method, RenderingContext};
use crate::error::Error;
use crate::overloads::{disambiguate_names, function_signature};

/// One contract interface document, extracted but not yet enriched
///
/// Holds the raw member list so the embedded ABI string stays faithful to
/// the source document; typed views are produced on demand by [`context`].
///
/// [`context`]: Contract::context
#[derive(Debug, Clone)]
pub struct Contract {
    name: String,
    members: Vec<Value>,
}

/// Locate the member list in any of the accepted document shapes
///
/// Tried in order; the first structurally valid match wins.
fn extract_members(document: &Value) -> Option<&Vec<Value>> {
    if let Some(members) = document.as_array() {
        return Some(members);
    }
    if let Some(members) = document.get("abi").and_then(Value::as_array) {
        return Some(members);
    }
    document
        .get("compilerOutput")
        .and_then(|output| output.get("abi"))
        .and_then(Value::as_array)
}

fn member_tag(member: &Value) -> Option<&str> {
    member.get("type").and_then(Value::as_str)
}

impl Contract {
    /// Extract a contract from a parsed interface document
    ///
    /// `name` is the display name (by convention the source file stem, not
    /// anything taken from the document). Returns [`Error::MissingAbi`]
    /// when no shape yields a non-empty member list.
    pub fn from_document(name: impl Into<String>, document: &Value) -> Result<Self, Error> {
        let name = name.into();
        let members = match extract_members(document) {
            Some(members) if !members.is_empty() => members.clone(),
            _ => return Err(Error::MissingAbi(name)),
        };
        Ok(Contract { name, members })
    }

    /// Contract display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Build the rendering context for this contract
    ///
    /// The embedded ABI string is serialized from the raw member list before
    /// any enrichment, so synthetic parameter names and renamed overloads
    /// never leak into it.
    pub fn context(&self) -> Result<RenderingContext, Error> {
        let abi = serde_json::to_string(&self.members)?;

        Ok(RenderingContext {
            contract_name: self.name.clone(),
            constructor: self.constructor()?,
            methods: self.methods()?,
            events: self.events()?,
            abi,
        })
    }

    fn constructor(&self) -> Result<Constructor, Error> {
        match self
            .members
            .iter()
            .find(|member| member_tag(member) == Some("constructor"))
        {
            Some(member) => Ok(serde_json::from_value(member.clone())?),
            None => Ok(Constructor::empty()),
        }
    }

    fn methods(&self) -> Result<Vec<EnrichedMethod>, Error> {
        let mut methods = self
            .members
            .iter()
            .filter(|member| member_tag(member) == Some("function"))
            .map(|member| serde_json::from_value::<Method>(member.clone()).map_err(Error::from))
            .collect::<Result<Vec<_>, _>>()?;

        // Auto-generated getters come through without parameter names
        for method in &mut methods {
            for (position, input) in method.inputs.iter_mut().enumerate() {
                if input.name.is_empty() {
                    input.name = format!("index_{}", position);
                }
            }
        }

        let binding_names = disambiguate_names(&methods);

        Ok(methods
            .into_iter()
            .zip(binding_names)
            .map(|(method, binding_name)| {
                let signature = function_signature(&method);
                let single_return_value = method.outputs.len() == 1;
                let has_return_value = !method.outputs.is_empty();
                EnrichedMethod {
                    abi: method,
                    binding_name,
                    signature,
                    single_return_value,
                    has_return_value,
                }
            })
            .collect())
    }

    fn events(&self) -> Result<Vec<Event>, Error> {
        self.members
            .iter()
            .filter(|member| member_tag(member) == Some("event"))
            .map(|member| serde_json::from_value(member.clone()).map_err(Error::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn members() -> Value {
        json!([
            {
                "type": "constructor",
                "stateMutability": "nonpayable",
                "inputs": [{"name": "initialSupply", "type": "uint256"}]
            },
            {
                "type": "function",
                "name": "balanceOf",
                "stateMutability": "view",
                "inputs": [{"name": "", "type": "address"}],
                "outputs": [{"name": "", "type": "uint256"}]
            },
            {
                "type": "event",
                "name": "Transfer",
                "anonymous": false,
                "inputs": [
                    {"name": "from", "type": "address", "indexed": true},
                    {"name": "to", "type": "address", "indexed": true},
                    {"name": "value", "type": "uint256", "indexed": false}
                ]
            }
        ])
    }

    #[test]
    fn test_bare_array_document() {
        let contract = Contract::from_document("Token", &members()).unwrap();
        let context = contract.context().unwrap();

        assert_eq!(context.contract_name, "Token");
        assert_eq!(context.constructor.inputs.len(), 1);
        assert_eq!(context.methods.len(), 1);
        assert_eq!(context.events.len(), 1);
    }

    #[test]
    fn test_artifact_document_shapes() {
        let bare = Contract::from_document("Token", &members()).unwrap();
        let truffle = Contract::from_document("Token", &json!({"abi": members()})).unwrap();
        let artifact =
            Contract::from_document("Token", &json!({"compilerOutput": {"abi": members()}}))
                .unwrap();

        let expected = bare.context().unwrap();
        assert_eq!(truffle.context().unwrap(), expected);
        assert_eq!(artifact.context().unwrap(), expected);
    }

    #[test]
    fn test_missing_abi() {
        for document in [
            json!({}),
            json!([]),
            json!({"abi": []}),
            json!({"bytecode": "0x"}),
            json!({"compilerOutput": {}}),
        ] {
            let err = Contract::from_document("Broken", &document).unwrap_err();
            match err {
                Error::MissingAbi(name) => assert_eq!(name, "Broken"),
                other => panic!("expected MissingAbi, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_synthetic_constructor_when_absent() {
        let document = json!([
            {"type": "function", "name": "ping", "inputs": [], "outputs": []}
        ]);
        let context = Contract::from_document("NoCtor", &document)
            .unwrap()
            .context()
            .unwrap();

        assert!(context.constructor.inputs.is_empty());
        assert_eq!(context.constructor.state_mutability, "nonpayable");
        assert!(!context.constructor.payable);
    }

    #[test]
    fn test_unnamed_parameters_get_positional_names() {
        let document = json!([
            {
                "type": "function",
                "name": "getPrice",
                "inputs": [
                    {"name": "pair", "type": "address"},
                    {"name": "", "type": "uint256"}
                ],
                "outputs": []
            }
        ]);
        let context = Contract::from_document("Oracle", &document)
            .unwrap()
            .context()
            .unwrap();

        let inputs = &context.methods[0].abi.inputs;
        assert_eq!(inputs[0].name, "pair");
        assert_eq!(inputs[1].name, "index_1");
    }

    #[test]
    fn test_return_value_flags() {
        let document = json!([
            {"type": "function", "name": "a", "inputs": [], "outputs": []},
            {"type": "function", "name": "b", "inputs": [],
             "outputs": [{"name": "", "type": "bool"}]},
            {"type": "function", "name": "c", "inputs": [],
             "outputs": [{"name": "", "type": "bool"}, {"name": "", "type": "uint256"}]}
        ]);
        let context = Contract::from_document("Flags", &document)
            .unwrap()
            .context()
            .unwrap();

        assert!(!context.methods[0].has_return_value);
        assert!(!context.methods[0].single_return_value);
        assert!(context.methods[1].has_return_value);
        assert!(context.methods[1].single_return_value);
        assert!(context.methods[2].has_return_value);
        assert!(!context.methods[2].single_return_value);
    }

    #[test]
    fn test_embedded_abi_is_pre_enrichment() {
        let document = json!([
            {
                "type": "function",
                "name": "balanceOf",
                "inputs": [{"name": "", "type": "address"}],
                "outputs": [{"name": "", "type": "uint256"}]
            }
        ]);
        let context = Contract::from_document("Token", &document)
            .unwrap()
            .context()
            .unwrap();

        // Synthetic names reach the enriched model but not the embedded ABI
        assert_eq!(context.methods[0].abi.inputs[0].name, "index_0");
        assert!(!context.abi.contains("index_0"));

        let round_trip: Value = serde_json::from_str(&context.abi).unwrap();
        assert_eq!(round_trip, document);
    }

    #[test]
    fn test_non_member_tags_are_ignored() {
        let document = json!([
            {"type": "fallback", "stateMutability": "payable"},
            {"type": "receive", "stateMutability": "payable"},
            {"type": "function", "name": "ping", "inputs": [], "outputs": []}
        ]);
        let context = Contract::from_document("Mixed", &document)
            .unwrap()
            .context()
            .unwrap();

        assert_eq!(context.methods.len(), 1);
        assert!(context.events.is_empty());
        // The embedded ABI still carries everything
        assert!(context.abi.contains("fallback"));
    }
}

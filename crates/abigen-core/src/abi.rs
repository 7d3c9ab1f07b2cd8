//! ABI model types
//!
//! This module contains the data structures for representing contract ABI
//! members in a form the translation and rendering layers can consume. Wire
//! names follow the ABI JSON convention (camelCase), so the same structs
//! round-trip through compiler artifacts and the rendering context.
//!
//! All of these are immutable value types: they are read and recursively
//! decomposed, never mutated after construction.

use serde::{Deserialize, Serialize};

/// Direction of data flow for a translated type
///
/// Some ambiguous-width integer types translate differently depending on
/// whether they are a parameter (`Input`) or a return value (`Output`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Parameter passed into a contract call
    Input,
    /// Value returned from a contract call
    Output,
}

/// Target contract library the generated bindings must match
///
/// Selects additional translation rules layered onto the base rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// web3.js conventions
    Web3,
    /// ethers.js conventions; narrows small integers to plain numbers on output
    #[default]
    Ethers,
}

/// A single typed parameter, output, or tuple component
///
/// `type_name` holds the raw descriptor from the ABI grammar (a scalar name,
/// optionally suffixed with `[]`/`[N]` array markers). When the base name is
/// `tuple`, `components` carries the ordered field list the descriptor text
/// alone cannot express.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Param {
    /// Parameter name; empty when the compiler omitted it
    #[serde(default)]
    pub name: String,
    /// Type descriptor, e.g. `uint256`, `address[]`, `tuple`
    #[serde(rename = "type")]
    pub type_name: String,
    /// Ordered component list for tuple descriptors
    #[serde(default)]
    pub components: Option<Vec<Param>>,
    /// Event parameters only: whether the parameter is indexed
    #[serde(default)]
    pub indexed: Option<bool>,
}

/// Constructor ABI member
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Constructor {
    /// Constructor parameters
    #[serde(default)]
    pub inputs: Vec<Param>,
    /// Mutability tag, e.g. `nonpayable` or `payable`
    #[serde(default = "nonpayable")]
    pub state_mutability: String,
    /// Legacy pre-mutability payable flag
    #[serde(default)]
    pub payable: bool,
}

fn nonpayable() -> String {
    "nonpayable".to_string()
}

impl Constructor {
    /// The synthetic constructor substituted when a document declares none
    ///
    /// Downstream consumers always see a constructor value, never an absent
    /// one: no inputs, non-payable.
    pub fn empty() -> Self {
        Constructor {
            inputs: Vec::new(),
            state_mutability: nonpayable(),
            payable: false,
        }
    }
}

impl Default for Constructor {
    fn default() -> Self {
        Constructor::empty()
    }
}

/// Function ABI member
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Method {
    /// Declared function name (overloads share it)
    pub name: String,
    /// Ordered parameter list
    #[serde(default)]
    pub inputs: Vec<Param>,
    /// Ordered return value list
    #[serde(default)]
    pub outputs: Vec<Param>,
    /// Mutability tag when the compiler emitted one
    #[serde(default)]
    pub state_mutability: Option<String>,
    /// Legacy constant flag
    #[serde(default)]
    pub constant: Option<bool>,
    /// Legacy payable flag
    #[serde(default)]
    pub payable: Option<bool>,
}

/// Event ABI member; carried through to rendering without enrichment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Event {
    /// Event name
    pub name: String,
    /// Ordered event parameter list
    #[serde(default)]
    pub inputs: Vec<Param>,
    /// Whether the event is anonymous
    #[serde(default)]
    pub anonymous: bool,
}

/// A function member plus fields derived once at normalization time
///
/// The derived fields are computed exactly once over the whole method batch
/// (overload renaming needs the full sibling set) and cached here; they are
/// never recomputed afterwards.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedMethod {
    /// The underlying function member, with synthetic parameter names applied
    #[serde(flatten)]
    pub abi: Method,
    /// Binding-safe name; differs from `abi.name` only for overloads
    pub binding_name: String,
    /// Canonical signature, e.g. `transfer(address,uint256)`
    pub signature: String,
    /// Whether the function returns exactly one value
    pub single_return_value: bool,
    /// Whether the function returns any value at all
    pub has_return_value: bool,
}

/// Everything the template layer needs to render one contract
///
/// Built once per interface document, immutable after construction, and
/// consumed exactly once by the template layer.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RenderingContext {
    /// Contract display name, taken from the source file stem
    pub contract_name: String,
    /// Declared constructor, or the synthetic empty one
    pub constructor: Constructor,
    /// Enriched function members, in document order
    pub methods: Vec<EnrichedMethod>,
    /// Event members, in document order
    pub events: Vec<Event>,
    /// The original member list serialized for embedding in the output
    pub abi: String,
}

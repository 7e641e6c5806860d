//! Type definitions for Solidity contract ABI.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Solidity types that can appear in a contract ABI
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EvmType {
    /// Signed integer of `bits` width
    Integer { bits: u16 },
    /// Unsigned integer of `bits` width
    UnsignedInteger { bits: u16 },
    Address,
    /// No value; only meaningful as a return type
    Void,
    /// Fixed-size `bytesN` when `size` is set, dynamic `bytes` otherwise
    Bytes { size: Option<u16> },
    Boolean,
    String,
    /// Fixed-length `T[N]` when `size` is set, dynamic `T[]` otherwise
    Array {
        item: Box<EvmType>,
        size: Option<usize>,
    },
    Tuple { components: Vec<TupleComponent> },
}

impl EvmType {
    pub fn array(item: EvmType) -> Self {
        EvmType::Array {
            item: Box::new(item),
            size: None,
        }
    }

    pub fn uint256() -> Self {
        EvmType::UnsignedInteger { bits: 256 }
    }
}

/// Renders the canonical Solidity signature, e.g. `tuple(address,uint256)[]`.
impl fmt::Display for EvmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvmType::Integer { bits } => write!(f, "int{}", bits),
            EvmType::UnsignedInteger { bits } => write!(f, "uint{}", bits),
            EvmType::Address => write!(f, "address"),
            EvmType::Void => write!(f, "void"),
            EvmType::Bytes { size: Some(n) } => write!(f, "bytes{}", n),
            EvmType::Bytes { size: None } => write!(f, "bytes"),
            EvmType::Boolean => write!(f, "bool"),
            EvmType::String => write!(f, "string"),
            EvmType::Array { item, size: Some(n) } => write!(f, "{}[{}]", item, n),
            EvmType::Array { item, size: None } => write!(f, "{}[]", item),
            EvmType::Tuple { components } => {
                let inner: Vec<String> = components.iter().map(|c| c.ty.to_string()).collect();
                write!(f, "tuple({})", inner.join(","))
            }
        }
    }
}

/// Named member of a tuple (Solidity struct)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TupleComponent {
    pub name: String,
    pub ty: EvmType,
}

impl TupleComponent {
    pub fn new(name: impl Into<String>, ty: EvmType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Function input or output. Unnamed parameters carry `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiParameter {
    pub name: Option<String>,
    pub ty: EvmType,
}

impl AbiParameter {
    pub fn named(name: impl Into<String>, ty: EvmType) -> Self {
        Self {
            name: Some(name.into()),
            ty,
        }
    }

    pub fn unnamed(ty: EvmType) -> Self {
        Self { name: None, ty }
    }
}

/// State-mutating function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    pub name: String,
    pub inputs: Vec<AbiParameter>,
    pub outputs: Vec<AbiParameter>,
    pub payable: bool,
}

/// `view`/`pure` function that takes arguments or returns several values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantFunctionDeclaration {
    pub name: String,
    pub inputs: Vec<AbiParameter>,
    pub outputs: Vec<AbiParameter>,
}

/// Zero-argument, single-output view function, usually a public state variable getter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantDeclaration {
    pub name: String,
    pub output: AbiParameter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventArgument {
    pub name: Option<String>,
    pub ty: EvmType,
    pub is_indexed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDeclaration {
    pub name: String,
    pub inputs: Vec<EventArgument>,
    pub anonymous: bool,
}

impl EventDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inputs: Vec::new(),
            anonymous: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    pub name: String,
    pub functions: Vec<FunctionDeclaration>,
    pub constant_functions: Vec<ConstantFunctionDeclaration>,
    pub constants: Vec<ConstantDeclaration>,
    pub events: Vec<EventDeclaration>,
}

impl Contract {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            functions: Vec::new(),
            constant_functions: Vec::new(),
            constants: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Number of entries rendered under `methods`
    pub fn method_count(&self) -> usize {
        self.constant_functions.len() + self.functions.len() + self.constants.len()
    }
}

//! Parse Solidity contract ABI JSON into a typed contract description.

pub mod naming;
pub mod parser;
pub mod type_parser;
pub mod types;

pub use naming::{normalize_contract_name, RESERVED_CLASS_NAMES};
pub use parser::{
    extract_abi, parse_abi_json, parse_contract, ParseError, RawAbiDefinition, RawAbiParameter,
};
pub use type_parser::parse_evm_type;
pub use types::*;

//! ABI parser for Solidity contracts.

use crate::type_parser::parse_evm_type;
use crate::types::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// One entry of a Solidity ABI JSON array
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawAbiDefinition {
    #[serde(rename = "type", default = "default_entry_type")]
    pub entry_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<RawAbiParameter>,
    #[serde(default)]
    pub outputs: Vec<RawAbiParameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constant: Option<bool>,
    #[serde(rename = "stateMutability", skip_serializing_if = "Option::is_none")]
    pub state_mutability: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anonymous: Option<bool>,
}

fn default_entry_type() -> String {
    "function".to_string()
}

impl RawAbiDefinition {
    /// Old compilers set `constant`, newer ones `stateMutability`.
    pub fn is_constant(&self) -> bool {
        self.constant.unwrap_or(false)
            || matches!(self.state_mutability.as_deref(), Some("view") | Some("pure"))
    }

    pub fn is_payable(&self) -> bool {
        self.payable.unwrap_or(false) || self.state_mutability.as_deref() == Some("payable")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawAbiParameter {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<RawAbiParameter>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexed: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unknown type: {0}")]
    UnknownType(String),
    #[error("Invalid size in '{raw}': {reason}")]
    InvalidSize { raw: String, reason: String },
    #[error("Tuple type '{0}' has no components")]
    MissingComponents(String),
    #[error("Failed to parse JSON: {0}")]
    InvalidJson(String),
    #[error("Artifact does not contain an 'abi' array")]
    MissingAbi,
    #[error("{entry}: {source}")]
    Entry {
        entry: String,
        #[source]
        source: Box<ParseError>,
    },
}

impl ParseError {
    fn in_entry(entry: &str, source: ParseError) -> Self {
        ParseError::Entry {
            entry: entry.to_string(),
            source: Box::new(source),
        }
    }
}

/// Accepts a bare ABI array or a compiler artifact object with an `abi` field.
pub fn extract_abi(json: &str) -> Result<Vec<RawAbiDefinition>, ParseError> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| ParseError::InvalidJson(e.to_string()))?;

    let abi = match value {
        Value::Array(_) => value,
        Value::Object(mut artifact) => artifact.remove("abi").ok_or(ParseError::MissingAbi)?,
        _ => return Err(ParseError::MissingAbi),
    };
    if !abi.is_array() {
        return Err(ParseError::MissingAbi);
    }

    serde_json::from_value(abi).map_err(|e| ParseError::InvalidJson(e.to_string()))
}

pub fn parse_contract(
    defs: &[RawAbiDefinition],
    contract_name: &str,
) -> Result<Contract, ParseError> {
    let mut contract = Contract::new(contract_name);

    for def in defs {
        match def.entry_type.as_str() {
            "function" => {
                let inputs =
                    parse_params(&def.inputs).map_err(|e| ParseError::in_entry(&def.name, e))?;
                let mut outputs =
                    parse_params(&def.outputs).map_err(|e| ParseError::in_entry(&def.name, e))?;

                if def.is_constant() {
                    if inputs.is_empty() && outputs.len() == 1 {
                        if let Some(output) = outputs.pop() {
                            contract.constants.push(ConstantDeclaration {
                                name: def.name.clone(),
                                output,
                            });
                        }
                    } else {
                        contract.constant_functions.push(ConstantFunctionDeclaration {
                            name: def.name.clone(),
                            inputs,
                            outputs,
                        });
                    }
                } else {
                    contract.functions.push(FunctionDeclaration {
                        name: def.name.clone(),
                        inputs,
                        outputs,
                        payable: def.is_payable(),
                    });
                }
            }
            "event" => {
                let inputs = def
                    .inputs
                    .iter()
                    .map(|p| {
                        Ok(EventArgument {
                            name: non_empty(&p.name),
                            ty: parse_evm_type(&p.type_name, p.components.as_deref())?,
                            is_indexed: p.indexed.unwrap_or(false),
                        })
                    })
                    .collect::<Result<Vec<_>, ParseError>>()
                    .map_err(|e| ParseError::in_entry(&def.name, e))?;
                contract.events.push(EventDeclaration {
                    name: def.name.clone(),
                    inputs,
                    anonymous: def.anonymous.unwrap_or(false),
                });
            }
            other => {
                debug!(contract = contract_name, entry_type = other, "skipping ABI entry");
            }
        }
    }

    debug!(
        contract = contract_name,
        functions = contract.functions.len(),
        constant_functions = contract.constant_functions.len(),
        constants = contract.constants.len(),
        events = contract.events.len(),
        "parsed contract ABI"
    );

    Ok(contract)
}

fn parse_params(params: &[RawAbiParameter]) -> Result<Vec<AbiParameter>, ParseError> {
    params
        .iter()
        .map(|p| {
            Ok(AbiParameter {
                name: non_empty(&p.name),
                ty: parse_evm_type(&p.type_name, p.components.as_deref())?,
            })
        })
        .collect()
}

fn non_empty(name: &str) -> Option<String> {
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

pub fn parse_abi_json(json: &str, contract_name: &str) -> Result<Contract, ParseError> {
    let defs = extract_abi(json)?;
    parse_contract(&defs, contract_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn erc20_abi() -> String {
        json!([
            {
                "constant": true,
                "inputs": [],
                "name": "totalSupply",
                "outputs": [{"name": "", "type": "uint256"}],
                "type": "function"
            },
            {
                "inputs": [{"name": "who", "type": "address"}],
                "name": "balanceOf",
                "outputs": [{"name": "", "type": "uint256"}],
                "stateMutability": "view",
                "type": "function"
            },
            {
                "inputs": [
                    {"name": "to", "type": "address"},
                    {"name": "value", "type": "uint256"}
                ],
                "name": "transfer",
                "outputs": [{"name": "", "type": "bool"}],
                "stateMutability": "nonpayable",
                "type": "function"
            },
            {
                "inputs": [],
                "name": "deposit",
                "outputs": [],
                "payable": true,
                "type": "function"
            },
            {
                "inputs": [{"name": "supply", "type": "uint256"}],
                "stateMutability": "nonpayable",
                "type": "constructor"
            },
            {"payable": true, "type": "fallback"},
            {
                "anonymous": false,
                "inputs": [
                    {"indexed": true, "name": "from", "type": "address"},
                    {"indexed": true, "name": "to", "type": "address"},
                    {"indexed": false, "name": "value", "type": "uint256"}
                ],
                "name": "Transfer",
                "type": "event"
            }
        ])
        .to_string()
    }

    #[test]
    fn test_classifies_entries() {
        let contract = parse_abi_json(&erc20_abi(), "Token").unwrap();

        assert_eq!(contract.name, "Token");
        assert_eq!(contract.constants.len(), 1);
        assert_eq!(contract.constants[0].name, "totalSupply");
        assert_eq!(contract.constants[0].output.name, None);

        assert_eq!(contract.constant_functions.len(), 1);
        assert_eq!(contract.constant_functions[0].name, "balanceOf");
        assert_eq!(
            contract.constant_functions[0].inputs,
            vec![AbiParameter::named("who", EvmType::Address)]
        );

        let names: Vec<_> = contract.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["transfer", "deposit"]);
        assert!(!contract.functions[0].payable);
        assert!(contract.functions[1].payable);

        assert_eq!(contract.events.len(), 1);
        let transfer = &contract.events[0];
        assert_eq!(transfer.name, "Transfer");
        assert!(transfer.inputs[0].is_indexed);
        assert!(!transfer.inputs[2].is_indexed);
    }

    #[test]
    fn test_extract_from_artifact() {
        let artifact = json!({
            "contractName": "Token",
            "abi": [{"type": "event", "name": "Ping", "inputs": []}],
            "bytecode": "0x"
        })
        .to_string();
        let defs = extract_abi(&artifact).unwrap();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].entry_type, "event");
    }

    #[test]
    fn test_extract_rejects_non_abi() {
        assert_eq!(
            extract_abi(&json!({"bytecode": "0x"}).to_string()).unwrap_err(),
            ParseError::MissingAbi
        );
        assert_eq!(extract_abi("42").unwrap_err(), ParseError::MissingAbi);
        assert!(matches!(
            extract_abi("not json").unwrap_err(),
            ParseError::InvalidJson(_)
        ));
    }

    #[test]
    fn test_missing_type_defaults_to_function() {
        let abi = json!([{"name": "ping", "inputs": [], "outputs": []}]).to_string();
        let contract = parse_abi_json(&abi, "Pinger").unwrap();
        assert_eq!(contract.functions.len(), 1);
        assert_eq!(contract.functions[0].name, "ping");
    }

    #[test]
    fn test_unknown_type_names_entry() {
        let abi = json!([{
            "name": "callback",
            "inputs": [{"name": "f", "type": "function"}],
            "outputs": [],
            "type": "function"
        }])
        .to_string();
        let err = parse_abi_json(&abi, "Bad").unwrap_err();
        assert_eq!(err.to_string(), "callback: Unknown type: function");
    }

    #[test]
    fn test_tuple_parameters() {
        let abi = json!([{
            "name": "getOrder",
            "inputs": [{"name": "id", "type": "uint256"}],
            "outputs": [{
                "name": "order",
                "type": "tuple",
                "components": [
                    {"name": "maker", "type": "address"},
                    {"name": "amount", "type": "uint128"}
                ]
            }],
            "stateMutability": "view",
            "type": "function"
        }])
        .to_string();
        let contract = parse_abi_json(&abi, "Book").unwrap();
        let output = &contract.constant_functions[0].outputs[0];
        assert_eq!(output.name.as_deref(), Some("order"));
        assert_eq!(output.ty.to_string(), "tuple(address,uint128)");
    }
}

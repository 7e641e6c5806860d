//! Solidity → TypeScript type mapping.
//!
//! Integers are typed `number | string` on the way in and `string` on the
//! way out, because web3.js decodes every returned integer to a decimal
//! string. The same holds inside arrays and tuples.

use contract_abi::{EvmType, TupleComponent};

use crate::error::{Result, TypegenError};

/// TypeScript type accepted for a caller-supplied argument.
pub fn input_type(evm_type: &EvmType) -> Result<String> {
    match evm_type {
        EvmType::Integer { .. } | EvmType::UnsignedInteger { .. } => {
            Ok("number | string".to_string())
        }
        EvmType::Address => Ok("string".to_string()),
        EvmType::Bytes { .. } => Ok("string | number[]".to_string()),
        EvmType::Array { item, .. } => Ok(format!("({})[]", input_type(item)?)),
        EvmType::Boolean => Ok("boolean".to_string()),
        EvmType::String => Ok("string".to_string()),
        EvmType::Tuple { components } => tuple_type(components, input_type),
        EvmType::Void => Err(TypegenError::UnrecognizedType(evm_type.clone())),
    }
}

/// TypeScript type of a value returned from a call.
pub fn output_type(evm_type: &EvmType) -> Result<String> {
    match evm_type {
        EvmType::Integer { .. } | EvmType::UnsignedInteger { .. } => Ok("string".to_string()),
        EvmType::Address => Ok("string".to_string()),
        EvmType::Void => Ok("void".to_string()),
        EvmType::Bytes { .. } => Ok("string".to_string()),
        EvmType::Array { item, .. } => Ok(format!("({})[]", output_type(item)?)),
        EvmType::Boolean => Ok("boolean".to_string()),
        EvmType::String => Ok("string".to_string()),
        EvmType::Tuple { components } => tuple_type(components, output_type),
    }
}

// Unnamed components fall back to their index, which is a valid property key.
fn tuple_type(
    components: &[TupleComponent],
    map: fn(&EvmType) -> Result<String>,
) -> Result<String> {
    let fields = components
        .iter()
        .enumerate()
        .map(|(index, component)| {
            let key = if component.name.is_empty() {
                index.to_string()
            } else {
                component.name.clone()
            };
            Ok(format!("{}: {}", key, map(&component.ty)?))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(format!("{{{}}}", fields.join(", ")))
}

//! Parser for raw Solidity type signatures such as `uint256[]` or `tuple`.

use crate::parser::{ParseError, RawAbiParameter};
use crate::types::{EvmType, TupleComponent};

/// Parse a raw ABI type string. `components` is required for `tuple` types
/// (and arrays of tuples) and ignored otherwise.
pub fn parse_evm_type(
    raw: &str,
    components: Option<&[RawAbiParameter]>,
) -> Result<EvmType, ParseError> {
    let raw = raw.trim();

    if raw.ends_with(']') {
        let open = raw
            .rfind('[')
            .ok_or_else(|| ParseError::UnknownType(raw.to_string()))?;
        let size_str = &raw[open + 1..raw.len() - 1];
        let size = if size_str.is_empty() {
            None
        } else {
            let n = parse_decimal::<usize>(size_str).ok_or_else(|| ParseError::InvalidSize {
                raw: raw.to_string(),
                reason: format!("array length '{}' is not a number", size_str),
            })?;
            if n == 0 {
                return Err(ParseError::InvalidSize {
                    raw: raw.to_string(),
                    reason: "fixed array length must be positive".to_string(),
                });
            }
            Some(n)
        };
        let item = parse_evm_type(&raw[..open], components)?;
        return Ok(EvmType::Array {
            item: Box::new(item),
            size,
        });
    }

    match raw {
        "bool" => return Ok(EvmType::Boolean),
        "address" => return Ok(EvmType::Address),
        "string" => return Ok(EvmType::String),
        "byte" => return Ok(EvmType::Bytes { size: Some(1) }),
        "bytes" => return Ok(EvmType::Bytes { size: None }),
        "tuple" => return parse_tuple(raw, components),
        _ => {}
    }

    if let Some(width) = raw.strip_prefix("uint") {
        let bits = parse_integer_width(raw, width)?;
        return Ok(EvmType::UnsignedInteger { bits });
    }
    if let Some(width) = raw.strip_prefix("int") {
        let bits = parse_integer_width(raw, width)?;
        return Ok(EvmType::Integer { bits });
    }
    if let Some(size) = raw.strip_prefix("bytes") {
        return parse_fixed_bytes(raw, size);
    }

    Err(ParseError::UnknownType(raw.to_string()))
}

fn parse_tuple(raw: &str, components: Option<&[RawAbiParameter]>) -> Result<EvmType, ParseError> {
    let components = components.ok_or_else(|| ParseError::MissingComponents(raw.to_string()))?;
    let components = components
        .iter()
        .map(|c| {
            let ty = parse_evm_type(&c.type_name, c.components.as_deref())?;
            Ok(TupleComponent::new(c.name.clone(), ty))
        })
        .collect::<Result<Vec<_>, ParseError>>()?;
    Ok(EvmType::Tuple { components })
}

fn parse_integer_width(raw: &str, width: &str) -> Result<u16, ParseError> {
    if width.is_empty() {
        return Ok(256);
    }
    let bits = parse_decimal::<u16>(width)
        .ok_or_else(|| ParseError::UnknownType(raw.to_string()))?;
    if bits == 0 || bits > 256 || bits % 8 != 0 {
        return Err(ParseError::InvalidSize {
            raw: raw.to_string(),
            reason: "integer width must be a multiple of 8 between 8 and 256".to_string(),
        });
    }
    Ok(bits)
}

fn parse_fixed_bytes(raw: &str, size: &str) -> Result<EvmType, ParseError> {
    let n = parse_decimal::<u16>(size).ok_or_else(|| ParseError::UnknownType(raw.to_string()))?;
    if !(1..=32).contains(&n) {
        return Err(ParseError::InvalidSize {
            raw: raw.to_string(),
            reason: "fixed bytes size must be between 1 and 32".to_string(),
        });
    }
    Ok(EvmType::Bytes { size: Some(n) })
}

/// Plain decimal digits only: no sign, no leading zero. `"0"` itself parses
/// so the range checks can report it.
fn parse_decimal<T: std::str::FromStr>(digits: &str) -> Option<T> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    digits.parse().ok()
}

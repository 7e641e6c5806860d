/// Identifiers the web3 declaration preamble imports or declares. A class
/// with one of these names would shadow it.
pub const RESERVED_CLASS_NAMES: &[&str] = &[
    "Contract",
    "ContractOptions",
    "Transaction",
    "EventLog",
    "PromiEvent",
    "Block",
    "EventEmitter",
    "Callback",
    "TransactionObject",
];

/// Derive a TypeScript class name from an ABI file stem.
///
/// Whitespace and non-word characters are dropped and the first letter is
/// capitalised. Names that would start with a digit or collide with
/// [`RESERVED_CLASS_NAMES`] get a leading `_`.
pub fn normalize_contract_name(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect();

    let mut chars = cleaned.chars();
    let name = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::from("Contract"),
    };

    if name.starts_with(|c: char| c.is_ascii_digit())
        || RESERVED_CLASS_NAMES.contains(&name.as_str())
    {
        format!("_{}", name)
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_contract_name() {
        assert_eq!(normalize_contract_name("dumbContract"), "DumbContract");
        assert_eq!(normalize_contract_name("ERC20"), "ERC20");
        assert_eq!(normalize_contract_name("my token.abi"), "Mytokenabi");
        assert_eq!(normalize_contract_name("multi-sig_wallet"), "Multisig_wallet");
        assert_eq!(normalize_contract_name("0xProtocol"), "_0xProtocol");
    }

    #[test]
    fn test_reserved_names_are_prefixed() {
        assert_eq!(normalize_contract_name("contract"), "_Contract");
        assert_eq!(normalize_contract_name("--"), "_Contract");
        assert_eq!(normalize_contract_name("block"), "_Block");
        assert_eq!(normalize_contract_name("transactionObject"), "_TransactionObject");
        assert_eq!(normalize_contract_name("Contracts"), "Contracts");
    }
}

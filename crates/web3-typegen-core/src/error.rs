use contract_abi::EvmType;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypegenError {
    #[error("Unrecognized type {0}")]
    UnrecognizedType(EvmType),
}

pub type Result<T> = std::result::Result<T, TypegenError>;

//! web3.js declaration template.
//!
//! Renders a [`Contract`] into a `.d.ts` module exporting one class that
//! extends web3's `Contract`. Member order is fixed: constant functions,
//! functions and constants under `methods`, then declared events and
//! `allEvents` under `events`, then `clone`.

use contract_abi::{AbiParameter, Contract};
use tracing::debug;

use crate::error::Result;
use crate::mapper::{input_type, output_type};

const PREAMBLE: &str = r#"import { Contract, ContractOptions } from "web3-eth-contract";
import { Transaction, EventLog, PromiEvent } from "web3-core";
import { Block } from "web3-eth";
import { EventEmitter } from "events";

export type Callback<T> = (error: Error, result: T) => void;

interface TransactionObject<T> {
  arguments: any[];
  call(tx?: Transaction): Promise<T>;
  send(tx?: Transaction): PromiEvent<T>;
  estimateGas(tx?: Transaction): Promise<number>;
  encodeABI(): string;
}
"#;

const MEMBER_INDENT: &str = "    ";

/// Render the full declaration for one contract.
///
/// Fails on the first parameter whose type cannot be mapped; no partial
/// output is returned.
pub fn codegen(contract: &Contract) -> Result<String> {
    let mut out = String::with_capacity(PREAMBLE.len() + 256 * (contract.method_count() + 1));
    out.push_str(PREAMBLE);
    out.push('\n');

    out.push_str(&format!("export class {} extends Contract {{\n", contract.name));

    out.push_str("  methods: {\n");
    for func in &contract.constant_functions {
        out.push_str(&generate_function(&func.name, &func.inputs, &func.outputs)?);
    }
    for func in &contract.functions {
        out.push_str(&generate_function(&func.name, &func.inputs, &func.outputs)?);
    }
    for constant in &contract.constants {
        out.push_str(&format!(
            "{}{}(): TransactionObject<{}>;\n",
            MEMBER_INDENT,
            constant.name,
            output_type(&constant.output.ty)?
        ));
    }
    out.push_str("  };\n");

    out.push_str("  events: {\n");
    for event in &contract.events {
        out.push_str(&generate_event(&event.name));
    }
    out.push_str(&generate_event("allEvents"));
    out.push_str("  };\n");

    out.push_str(&format!("  clone(): {};\n", contract.name));
    out.push_str("}\n");

    debug!(
        contract = %contract.name,
        methods = contract.method_count(),
        events = contract.events.len(),
        bytes = out.len(),
        "rendered contract declaration"
    );

    Ok(out)
}

fn generate_function(
    name: &str,
    inputs: &[AbiParameter],
    outputs: &[AbiParameter],
) -> Result<String> {
    let line = format!(
        "{}{}({}): TransactionObject<{}>;\n",
        MEMBER_INDENT,
        name,
        generate_input_types(inputs)?,
        generate_output_types(outputs)?
    );
    debug!(
        method = name,
        inputs = inputs.len(),
        outputs = outputs.len(),
        "rendered method"
    );
    Ok(line)
}

/// Parameter list; unnamed inputs become `arg<index>`.
fn generate_input_types(inputs: &[AbiParameter]) -> Result<String> {
    let params = inputs
        .iter()
        .enumerate()
        .map(|(index, input)| {
            let name = match input.name.as_deref() {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => format!("arg{}", index),
            };
            Ok(format!("{}: {}", name, input_type(&input.ty)?))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(params.join(", "))
}

/// Several outputs render as a record with named fields first, then one
/// positional field per output.
fn generate_output_types(outputs: &[AbiParameter]) -> Result<String> {
    match outputs {
        [] => Ok("void".to_string()),
        [single] => output_type(&single.ty),
        _ => {
            let mut fields = Vec::with_capacity(outputs.len() * 2);
            for output in outputs {
                if let Some(name) = output.name.as_deref().filter(|n| !n.is_empty()) {
                    fields.push(format!("{}: {}", name, output_type(&output.ty)?));
                }
            }
            for (index, output) in outputs.iter().enumerate() {
                fields.push(format!("{}: {}", index, output_type(&output.ty)?));
            }
            Ok(format!("{{{}}}", fields.join(", ")))
        }
    }
}

fn generate_event(name: &str) -> String {
    format!(
        "{indent}{name}(\n\
         {indent}  options?: {{\n\
         {indent}    filter?: object;\n\
         {indent}    fromBlock?: Block;\n\
         {indent}    topics?: (null | string)[];\n\
         {indent}  }},\n\
         {indent}  cb?: Callback<EventLog>\n\
         {indent}): EventEmitter;\n",
        indent = MEMBER_INDENT,
        name = name
    )
}

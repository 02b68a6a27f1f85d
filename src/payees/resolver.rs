use tracing::{debug, info};

use crate::descriptor::DeploymentDescriptor;

use super::error::ProposeResult;
use super::types::{OperatorAssignment, PayeeInput};

/// 输入来源：命令行显式提供，或从部署描述中按聚合器地址推导。
pub enum InputSource<'a> {
    Explicit(PayeeInput),
    Descriptor {
        descriptor: &'a DeploymentDescriptor,
        state: &'a str,
    },
}

/// 显式输入原样透传，校验留给构建器。
pub fn resolve_input(source: InputSource<'_>) -> ProposeResult<PayeeInput> {
    match source {
        InputSource::Explicit(input) => {
            debug!(
                target: "payees::resolver",
                operators = input.operators.len(),
                "使用显式提供的 payee 输入"
            );
            Ok(input)
        }
        InputSource::Descriptor { descriptor, state } => derive_from_descriptor(descriptor, state),
    }
}

fn derive_from_descriptor(
    descriptor: &DeploymentDescriptor,
    state: &str,
) -> ProposeResult<PayeeInput> {
    let aggregator = descriptor.aggregator(state)?;
    let mut operators = Vec::with_capacity(aggregator.oracles.len());
    for oracle in &aggregator.oracles {
        let record = descriptor.operator(state, &oracle.operator)?;
        operators.push(OperatorAssignment::new(
            record.transmitter(&oracle.operator)?,
            record.admin_address.clone(),
        ));
    }

    info!(
        target: "payees::resolver",
        state,
        operators = operators.len(),
        "已从部署描述推导 payee 输入"
    );

    Ok(PayeeInput {
        operators,
        allow_unfunded_payee: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::DescriptorError;
    use crate::payees::ProposeError;

    fn descriptor() -> DeploymentDescriptor {
        DeploymentDescriptor::from_json(
            r#"{
                "contracts": {
                    "STATE": { "oracles": [ { "operator": "A" } ] },
                    "BROKEN": { "oracles": [ { "operator": "A" }, { "operator": "GHOST" } ] }
                },
                "operators": {
                    "A": { "ocrNodeAddress": ["T1"], "adminAddress": "P1" }
                }
            }"#,
        )
        .expect("parse rdd")
    }

    #[test]
    fn explicit_input_passes_through_unchanged() {
        let input = PayeeInput {
            operators: vec![
                OperatorAssignment::new("T1", "P1"),
                OperatorAssignment::new("T1", "not even a key"),
            ],
            allow_unfunded_payee: false,
        };
        let resolved = resolve_input(InputSource::Explicit(input.clone())).expect("resolve");
        assert_eq!(resolved, input);
    }

    #[test]
    fn descriptor_path_maps_operator_records() {
        let rdd = descriptor();
        let resolved = resolve_input(InputSource::Descriptor {
            descriptor: &rdd,
            state: "STATE",
        })
        .expect("resolve");
        assert_eq!(resolved.operators, vec![OperatorAssignment::new("T1", "P1")]);
        assert!(resolved.allow_unfunded_payee);
    }

    #[test]
    fn unknown_aggregator_is_a_resolution_error() {
        let rdd = descriptor();
        let err = resolve_input(InputSource::Descriptor {
            descriptor: &rdd,
            state: "MISSING",
        })
        .expect_err("unknown aggregator");
        assert!(matches!(
            err,
            ProposeError::Resolution(DescriptorError::UnknownAggregator(_))
        ));
    }

    #[test]
    fn unknown_operator_is_a_resolution_error() {
        let rdd = descriptor();
        let err = resolve_input(InputSource::Descriptor {
            descriptor: &rdd,
            state: "BROKEN",
        })
        .expect_err("unknown operator");
        assert!(matches!(
            err,
            ProposeError::Resolution(DescriptorError::UnknownOperator { operator, .. })
                if operator == "GHOST"
        ));
    }
}

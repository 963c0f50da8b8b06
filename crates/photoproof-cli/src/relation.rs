//! # Relation Subcommand
//!
//! Compiles the compliance predicate and prints its identity: the relation
//! digest that proving and verifying keys are bound to, plus its size.
//!
//! ```bash
//! photoproof relation
//! photoproof relation --constraints
//! ```

use anyhow::{Context, Result};
use clap::Args;
use photoproof_zkp::{CompiledRelation, CompliancePredicate, MockProofSystem, ProvingBackend};
use serde::Serialize;

/// Arguments for the relation subcommand.
#[derive(Args, Debug)]
pub struct RelationArgs {
    /// Also list every constraint label in synthesis order.
    #[arg(long)]
    pub constraints: bool,
}

/// JSON report printed by `photoproof relation`.
#[derive(Debug, Serialize)]
pub struct RelationReport {
    pub name: String,
    pub digest: String,
    pub constraint_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Vec<String>>,
}

impl RelationReport {
    fn from_relation(relation: &CompiledRelation, with_constraints: bool) -> Self {
        let name = relation
            .circuit()
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        Self {
            name,
            digest: relation.digest().to_hex(),
            constraint_count: relation.constraint_count(),
            constraints: with_constraints.then(|| relation.constraints().to_vec()),
        }
    }
}

/// Build the report without printing it.
pub fn relation_report(args: &RelationArgs) -> Result<RelationReport> {
    let relation = MockProofSystem
        .compile(&CompliancePredicate)
        .context("compliance predicate failed to compile")?;
    tracing::debug!(
        digest = %relation.digest(),
        constraints = relation.constraint_count(),
        "compiled compliance predicate"
    );
    Ok(RelationReport::from_relation(&relation, args.constraints))
}

/// Execute the relation subcommand.
pub fn run_relation(args: &RelationArgs) -> Result<u8> {
    let report = relation_report(args)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(0)
}

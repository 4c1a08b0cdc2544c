// crates/infratest-terraform/src/options.rs
// ============================================================================
// Module: Terraform Options Encoding
// Description: Variable mapping to `-var` command arguments.
// Purpose: Encode deployment parameters exactly as the CLI expects them.
// Dependencies: infratest-core, serde_json
// ============================================================================

//! ## Overview
//! Terraform receives variables as repeated `-var name=value` arguments.
//! Plain strings pass through unquoted (arguments bypass any shell), and
//! lists are encoded as JSON array literals, which Terraform accepts as HCL
//! list expressions. Encoding is deterministic: variables are emitted in
//! sorted key order.
//! Invariants:
//! - Every variable in the mapping is emitted, empty-string sentinels
//!   included.
//! - List values round-trip through JSON without loss.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use infratest_core::ParamValue;

// ============================================================================
// SECTION: Variable Encoding
// ============================================================================

/// Encodes a variable mapping as `-var` command arguments.
#[must_use]
pub fn var_arguments(vars: &BTreeMap<String, ParamValue>) -> Vec<String> {
    let mut args = Vec::with_capacity(vars.len() * 2);
    for (name, value) in vars {
        args.push("-var".to_owned());
        args.push(format!("{name}={}", encode_value(value)));
    }
    args
}

/// Encodes one variable value as its argument literal.
fn encode_value(value: &ParamValue) -> String {
    match value {
        ParamValue::Text(text) => text.clone(),
        ParamValue::List(items) => encode_list(items),
    }
}

/// Encodes a string list as a JSON array literal.
fn encode_list(items: &[String]) -> String {
    // Serializing a slice of strings cannot fail.
    serde_json::to_string(items).unwrap_or_default()
}

//! Explain plan output
//!
//! Produces deterministic, human-readable explain output.

use std::fmt;

use super::ast::FilterOp;
use super::errors::PlannerError;
use super::planner::{ExecutionPlan, PlanKind};

/// One field group as shown in explain output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplainGroup {
    /// Field name
    pub field: String,
    /// Collapsed range
    pub range: String,
    /// Source predicates, in query order
    pub predicates: Vec<String>,
}

/// Explain plan output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplainPlan {
    /// Whether planning succeeded
    pub accepted: bool,
    /// Plan kind (if accepted)
    pub kind: Option<String>,
    /// Field groups in execution order
    pub groups: Vec<ExplainGroup>,
    /// Field that made the plan trivially empty
    pub empty_field: Option<String>,
    /// Rejection reason (if rejected)
    pub rejection_reason: Option<String>,
    /// Rejection error code (if rejected)
    pub rejection_code: Option<String>,
}

impl ExplainPlan {
    /// Creates an explain plan from a successful plan
    pub fn from_plan(plan: &ExecutionPlan) -> Self {
        let groups = plan
            .groups()
            .iter()
            .map(|g| ExplainGroup {
                field: g.field().to_string(),
                range: g.range().to_string(),
                predicates: g.predicates().iter().map(|p| describe(&p.op)).collect(),
            })
            .collect();

        let empty_field = match plan.kind() {
            PlanKind::TriviallyEmpty { field } => Some(field.clone()),
            _ => None,
        };

        Self {
            accepted: true,
            kind: Some(plan.kind().as_str().to_string()),
            groups,
            empty_field,
            rejection_reason: None,
            rejection_code: None,
        }
    }

    /// Creates an explain plan from a planning error
    pub fn from_error(err: &PlannerError) -> Self {
        Self {
            accepted: false,
            kind: None,
            groups: Vec::new(),
            empty_field: None,
            rejection_reason: Some(err.message().to_string()),
            rejection_code: Some(err.code().code().to_string()),
        }
    }
}

fn describe(op: &FilterOp) -> String {
    match op {
        FilterOp::In(values) => format!("in {}", serde_json::Value::from(values.clone())),
        FilterOp::Matches(pattern) => format!("matches {:?}", pattern),
        other => match other.value() {
            Some(v) => format!("{} {}", other.op_name(), v),
            None => other.op_name().to_string(),
        },
    }
}

impl fmt::Display for ExplainPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== EXPLAIN PLAN ===")?;

        if self.accepted {
            writeln!(f, "Status: ACCEPTED")?;
            if let Some(kind) = &self.kind {
                writeln!(f, "Plan: {}", kind)?;
            }
            if let Some(field) = &self.empty_field {
                writeln!(f, "Empty Range: {}", field)?;
            }
            for (i, group) in self.groups.iter().enumerate() {
                writeln!(f, "Scan {}: {} in {}", i + 1, group.field, group.range)?;
                for pred in &group.predicates {
                    writeln!(f, "  - {}", pred)?;
                }
            }
        } else {
            writeln!(f, "Status: REJECTED")?;
            if let Some(code) = &self.rejection_code {
                writeln!(f, "Error Code: {}", code)?;
            }
            if let Some(reason) = &self.rejection_reason {
                writeln!(f, "Reason: {}", reason)?;
            }
        }

        Ok(())
    }
}

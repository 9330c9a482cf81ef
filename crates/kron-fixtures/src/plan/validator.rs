use crate::error::{Severity, Violation};
use crate::generate::MAX_SIZE_EXPONENT;
use crate::matrix::Matrix;
use crate::plan::types::{BatchSection, Plan, SingleSection};
use crate::template::{DEFAULT_BLOCKING, is_c_identifier};

/// Batch sizes above this still work but produce very large sources.
const LARGE_SIZE_WARNING: u32 = 10;

/// Validate a parsed plan.
///
/// Returns a list of violations. If any violation has
/// [`Severity::Error`], the plan must not be executed.
pub fn validate_plan(plan: &Plan) -> Vec<Violation> {
    let mut violations = Vec::new();

    if plan.single.is_none() && plan.batch.is_none() {
        violations.push(Violation::new(
            Severity::Error,
            "PLAN-001",
            "plan must contain a `single` or `batch` section".to_string(),
            "plan",
        ));
    }

    validate_kernel(plan, &mut violations);
    if let Some(ref single) = plan.single {
        validate_single(single, &mut violations);
    }
    if let Some(ref batch) = plan.batch {
        validate_batch(batch, &mut violations);
    }

    if plan.seed.is_none() {
        violations.push(Violation::new(
            Severity::Info,
            "PLAN-011",
            "no seed given; generated fixtures will not be reproducible".to_string(),
            "seed",
        ));
    }

    violations
}

fn validate_kernel(plan: &Plan, violations: &mut Vec<Violation>) {
    let blocking = plan.kernel.blocking;
    if blocking == 0 {
        violations.push(Violation::new(
            Severity::Error,
            "PLAN-002",
            "kernel.blocking must be at least 1".to_string(),
            "kernel.blocking",
        ));
    } else if blocking != DEFAULT_BLOCKING {
        violations.push(Violation::new(
            Severity::Info,
            "PLAN-003",
            format!("kernel.blocking is {blocking}, reference fixtures use {DEFAULT_BLOCKING}"),
            "kernel.blocking",
        ));
    }
}

fn validate_single(single: &SingleSection, violations: &mut Vec<Violation>) {
    if single.rows == 0 || single.cols == 0 {
        violations.push(Violation::new(
            Severity::Error,
            "PLAN-004",
            format!(
                "single operands must be at least 1x1, got {}x{}",
                single.rows, single.cols
            ),
            "single",
        ));
    }

    match (&single.a, &single.b) {
        (Some(a), Some(b)) => {
            check_operand("a", a, violations);
            check_operand("b", b, violations);
        }
        (Some(_), None) | (None, Some(_)) => {
            violations.push(Violation::new(
                Severity::Error,
                "PLAN-005",
                "single.a and single.b must be given together".to_string(),
                "single",
            ));
        }
        (None, None) => {}
    }

    if !is_c_identifier(&single.function) {
        violations.push(Violation::new(
            Severity::Error,
            "PLAN-007",
            format!("single.function {:?} is not a C identifier", single.function),
            "single.function",
        ));
    }
}

fn check_operand(name: &str, rows: &[Vec<f64>], violations: &mut Vec<Violation>) {
    if let Err(e) = Matrix::from_rows(rows) {
        violations.push(Violation::new(
            Severity::Error,
            "PLAN-006",
            format!("single.{name}: {e}"),
            &format!("single.{name}"),
        ));
    }
}

fn validate_batch(batch: &BatchSection, violations: &mut Vec<Violation>) {
    if batch.min_size > batch.max_size {
        violations.push(Violation::new(
            Severity::Error,
            "PLAN-008",
            format!(
                "batch.min_size ({}) exceeds batch.max_size ({})",
                batch.min_size, batch.max_size
            ),
            "batch",
        ));
    }

    if batch.num_tests == 0 {
        violations.push(Violation::new(
            Severity::Warning,
            "PLAN-009",
            "batch.num_tests is 0; no fixtures will be written".to_string(),
            "batch.num_tests",
        ));
    }

    if batch.max_size > MAX_SIZE_EXPONENT {
        violations.push(Violation::new(
            Severity::Error,
            "PLAN-010",
            format!(
                "batch.max_size {} exceeds the limit of {MAX_SIZE_EXPONENT}",
                batch.max_size
            ),
            "batch.max_size",
        ));
    } else if batch.max_size > LARGE_SIZE_WARNING {
        violations.push(Violation::new(
            Severity::Warning,
            "PLAN-010",
            format!(
                "batch.max_size {} yields references with up to 2^{} rows",
                batch.max_size,
                2 * batch.max_size
            ),
            "batch.max_size",
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::error_count;
    use crate::plan::parse_plan_str;

    fn rules(yaml: &str) -> Vec<(Severity, String)> {
        let plan = parse_plan_str(yaml).unwrap();
        validate_plan(&plan)
            .into_iter()
            .map(|v| (v.severity, v.rule))
            .collect()
    }

    fn has(found: &[(Severity, String)], severity: Severity, rule: &str) -> bool {
        found.iter().any(|(s, r)| *s == severity && r == rule)
    }

    #[test]
    fn complete_plan_is_clean() {
        let plan = parse_plan_str("seed: 1\nsingle: {}\nbatch: {}\n").unwrap();
        assert!(validate_plan(&plan).is_empty());
    }

    #[test]
    fn empty_plan_needs_a_section() {
        let found = rules("seed: 1\n");
        assert!(has(&found, Severity::Error, "PLAN-001"));
    }

    #[test]
    fn blocking_rules() {
        assert!(has(&rules("seed: 1\nkernel: {blocking: 0}\nbatch: {}\n"), Severity::Error, "PLAN-002"));
        assert!(has(&rules("seed: 1\nkernel: {blocking: 3}\nbatch: {}\n"), Severity::Info, "PLAN-003"));
    }

    #[test]
    fn single_zero_shape() {
        assert!(has(&rules("seed: 1\nsingle: {rows: 0}\n"), Severity::Error, "PLAN-004"));
    }

    #[test]
    fn operands_must_pair() {
        assert!(has(&rules("seed: 1\nsingle: {a: [[1]]}\n"), Severity::Error, "PLAN-005"));
    }

    #[test]
    fn ragged_operand() {
        let found = rules("seed: 1\nsingle:\n  a: [[1, 2], [3]]\n  b: [[1]]\n");
        assert!(has(&found, Severity::Error, "PLAN-006"));
        let plan = parse_plan_str("seed: 1\nsingle:\n  a: [[1, 2], [3]]\n  b: [[1]]\n").unwrap();
        let v = validate_plan(&plan);
        assert!(v.iter().any(|v| v.location.as_deref() == Some("single.a")));
    }

    #[test]
    fn empty_operand() {
        assert!(has(&rules("seed: 1\nsingle:\n  a: []\n  b: [[1]]\n"), Severity::Error, "PLAN-006"));
    }

    #[test]
    fn bad_function_name() {
        assert!(has(&rules("seed: 1\nsingle: {function: \"2fast\"}\n"), Severity::Error, "PLAN-007"));
    }

    #[test]
    fn batch_rules() {
        assert!(has(&rules("seed: 1\nbatch: {min_size: 5, max_size: 2}\n"), Severity::Error, "PLAN-008"));
        assert!(has(&rules("seed: 1\nbatch: {num_tests: 0}\n"), Severity::Warning, "PLAN-009"));
        assert!(has(&rules("seed: 1\nbatch: {max_size: 11}\n"), Severity::Warning, "PLAN-010"));
        assert!(has(&rules("seed: 1\nbatch: {max_size: 30}\n"), Severity::Error, "PLAN-010"));
        assert!(has(&rules("seed: 1\nbatch: {max_size: 24}\n"), Severity::Error, "PLAN-010"));
        assert!(!has(&rules("seed: 1\nbatch: {max_size: 10}\n"), Severity::Warning, "PLAN-010"));
    }

    #[test]
    fn missing_seed_is_info_only() {
        let plan = parse_plan_str("batch: {}\n").unwrap();
        let v = validate_plan(&plan);
        assert_eq!(error_count(&v), 0);
        assert!(v.iter().any(|v| v.rule == "PLAN-011" && v.severity == Severity::Info));
    }
}

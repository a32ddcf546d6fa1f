use std::fmt;

use flatcheck_state::State;

use crate::check::CheckFn;

/// Result of a single named check.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    /// Name the caller gave the check.
    pub name: String,
    /// Whether the check returned `Ok(())`.
    pub passed: bool,
    /// Error message if the check failed.
    pub message: Option<String>,
}

impl CheckOutcome {
    fn pass(name: &str) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            message: None,
        }
    }

    fn fail(name: &str, msg: String) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            message: Some(msg),
        }
    }
}

/// Aggregated report from [`run_checks`].
#[derive(Debug, Clone)]
pub struct CheckReport {
    /// One outcome per check, in the order the checks were given.
    pub results: Vec<CheckOutcome>,
    /// Number of checks that passed.
    pub passed: usize,
    /// Number of checks that failed.
    pub failed: usize,
    /// Number of checks run.
    pub total: usize,
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Checks: {}/{} passed ({} failed)",
            self.passed, self.total, self.failed
        )?;
        for r in &self.results {
            if !r.passed {
                writeln!(
                    f,
                    "  FAIL [{}]: {}",
                    r.name,
                    r.message.as_deref().unwrap_or("(no message)")
                )?;
            }
        }
        Ok(())
    }
}

/// Run every named check against `state` and collect the outcomes.
///
/// All checks run; a failure does not stop the ones after it.
pub fn run_checks(state: &State, checks: &[(&str, CheckFn)]) -> CheckReport {
    let results: Vec<CheckOutcome> = checks
        .iter()
        .map(|(name, check)| match check(state) {
            Ok(()) => CheckOutcome::pass(name),
            Err(e) => {
                tracing::debug!(check = %name, error = %e, "check failed");
                CheckOutcome::fail(name, e.to_string())
            }
        })
        .collect();

    let passed = results.iter().filter(|r| r.passed).count();
    let total = results.len();

    CheckReport {
        results,
        passed,
        failed: total - passed,
        total,
    }
}

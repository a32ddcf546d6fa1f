use flatcheck_state::State;

use crate::check::CheckFn;
use crate::error::CheckError;

/// Run `checks` in order and stop at the first failure.
///
/// The failure is wrapped in [`CheckError::Step`] with its 1-based position.
pub fn compose(checks: Vec<CheckFn>) -> CheckFn {
    Box::new(move |state: &State| {
        let total = checks.len();
        for (i, check) in checks.iter().enumerate() {
            check(state).map_err(|e| CheckError::Step {
                index: i + 1,
                total,
                source: Box::new(e),
            })?;
        }
        Ok(())
    })
}

/// Run every check and report all failures together.
pub fn compose_aggregate(checks: Vec<CheckFn>) -> CheckFn {
    Box::new(move |state: &State| {
        let errors: Vec<CheckError> = checks
            .iter()
            .filter_map(|check| check(state).err())
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(CheckError::Aggregate(errors))
        }
    })
}

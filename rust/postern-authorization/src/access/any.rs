use async_trait::async_trait;

use crate::{AccessChecker, AccessCheckerInput, AuthorizationError, BoxedAccessChecker};

/// The disjunction of several [AccessChecker]s.
///
/// A rule applies when any member checker says it does. Members that
/// decline an input are skipped; real failures propagate.
pub struct AnyAccessChecker {
    checkers: Vec<BoxedAccessChecker>,
}

impl AnyAccessChecker {
    /// Combines the given checkers.
    pub fn new(checkers: Vec<BoxedAccessChecker>) -> Self {
        Self { checkers }
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl AccessChecker for AnyAccessChecker {
    async fn handle(&self, input: &AccessCheckerInput<'_>) -> Result<bool, AuthorizationError> {
        for checker in &self.checkers {
            match checker.can_handle(input).await {
                Ok(()) => {
                    if checker.handle(input).await? {
                        return Ok(true);
                    }
                }
                Err(AuthorizationError::NotSupported(_)) => continue,
                Err(error) => return Err(error),
            }
        }

        Ok(false)
    }
}

//! Local sink used by `import --dry-run`.

use crate::error::TransferError;
use crate::model::{Scope, Variable};
use crate::remote::VariableSink;
use async_trait::async_trait;
use tracing::info;

/// Accepts every variable and logs what would have been applied.
///
/// Values are never logged.
#[derive(Debug, Default)]
pub struct DryRunSink;

#[async_trait]
impl VariableSink for DryRunSink {
    async fn apply_variable(
        &self,
        scope: &Scope,
        variable: &Variable,
    ) -> Result<(), TransferError> {
        info!(
            target_scope = %scope.display_name(),
            key = %variable.key,
            environment_scope = %variable.effective_environment_scope(),
            protected = variable.protected,
            masked = variable.masked,
            "Dry run: variable would be applied"
        );
        Ok(())
    }

    fn sink_name(&self) -> &str {
        "dry-run"
    }
}

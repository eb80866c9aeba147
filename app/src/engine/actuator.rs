use chrono::Utc;
use sprout_core::{reconstruct_state, ActionLogEntry, ActionScope, ActuatorKind, ToggleCommand};
use tracing::{info, warn};

use super::GrowObserver;

fn actuator_id(scope: &ActionScope, kind: ActuatorKind) -> String {
    format!("{}:{}", scope.id(), kind.as_str())
}

impl GrowObserver {
    /// Reconstructs the current on/off state from the recent intent log.
    pub async fn actuator_state(&self, scope: &ActionScope, kind: ActuatorKind) -> bool {
        let entries = self
            .fetch(
                "recent actions",
                self.action_log
                    .recent_actions(scope, self.settings.action_scan_depth),
            )
            .await
            .unwrap_or_default();
        reconstruct_state(kind, &entries)
    }

    /// Flips an actuator by appending exactly one opposite-action entry.
    ///
    /// Concurrent togglers race on read-then-append; the last write wins,
    /// which is acceptable for a manually operated dashboard.
    pub async fn toggle_actuator(
        &self,
        scope: &ActionScope,
        kind: ActuatorKind,
        triggered_by: &str,
    ) -> ToggleCommand {
        let current = self.actuator_state(scope, kind).await;
        let mut command = ToggleCommand::new(kind, current);

        let entry = ActionLogEntry {
            action: command.action().to_owned(),
            actuator_id: actuator_id(scope, kind),
            plant_id: match scope {
                ActionScope::Plant(id) => Some(id.clone()),
                ActionScope::Zone(_) => None,
            },
            zone: match scope {
                ActionScope::Zone(id) => Some(id.clone()),
                ActionScope::Plant(_) => None,
            },
            trigger: "manual".to_owned(),
            trigger_by: triggered_by.to_owned(),
            timestamp: Utc::now(),
        };

        match self
            .fetch("action append", self.action_log.append_action(&entry))
            .await
        {
            Some(()) => {
                info!(
                    "Actuator {} set to {} by {}",
                    entry.actuator_id, entry.action, triggered_by
                );
                command.confirm();
            }
            None => {
                warn!("Toggling {} failed, state stays {}", entry.actuator_id, current);
                command.fail();
            }
        }
        command
    }
}

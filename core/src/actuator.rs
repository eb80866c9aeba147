use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Physical actuator types and their closed on/off action vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ActuatorKind {
    Pump,
    Lights,
    Fan,
}

impl ActuatorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActuatorKind::Pump => "pump",
            ActuatorKind::Lights => "lights",
            ActuatorKind::Fan => "fan",
        }
    }

    pub fn on_action(&self) -> &'static str {
        match self {
            ActuatorKind::Pump => "water_on",
            ActuatorKind::Lights => "light_on",
            ActuatorKind::Fan => "fan_on",
        }
    }

    pub fn off_action(&self) -> &'static str {
        match self {
            ActuatorKind::Pump => "water_off",
            ActuatorKind::Lights => "light_off",
            ActuatorKind::Fan => "fan_off",
        }
    }

    /// `Some(true)` for this kind's on action, `Some(false)` for its off
    /// action, `None` for anything else (including other kinds' actions).
    pub fn match_action(&self, action: &str) -> Option<bool> {
        if action == self.on_action() {
            Some(true)
        } else if action == self.off_action() {
            Some(false)
        } else {
            None
        }
    }
}

impl std::str::FromStr for ActuatorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pump" => Ok(ActuatorKind::Pump),
            "lights" => Ok(ActuatorKind::Lights),
            "fan" => Ok(ActuatorKind::Fan),
            other => Err(format!("unknown actuator kind: {}", other)),
        }
    }
}

/// The unit an action applies to: one plant, or a whole zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionScope {
    Plant(String),
    Zone(String),
}

impl ActionScope {
    pub fn id(&self) -> &str {
        match self {
            ActionScope::Plant(id) | ActionScope::Zone(id) => id,
        }
    }
}

/// One record of the append-only actuator intent log. Entries are never
/// mutated or deleted; ordering by timestamp is the sole source of truth
/// for "current" actuator state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionLogEntry {
    pub action: String,
    pub actuator_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    pub trigger: String,
    pub trigger_by: String,
    pub timestamp: DateTime<Utc>,
}

/// Derives an actuator's current on/off state from its recent log entries.
///
/// The accessor claims descending timestamp order, but that is treated as a
/// hint: entries are re-sorted here before scanning. The first entry whose
/// action belongs to `kind` decides the state; no matching entry means off -
/// there is no separate unknown state.
pub fn reconstruct_state(kind: ActuatorKind, entries: &[ActionLogEntry]) -> bool {
    let mut ordered: Vec<&ActionLogEntry> = entries.iter().collect();
    ordered.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    ordered
        .iter()
        .find_map(|entry| kind.match_action(&entry.action))
        .unwrap_or(false)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CommandState {
    Pending,
    Confirmed,
    Failed,
}

/// A toggle intent with an explicit lifecycle.
///
/// The requested state only sticks while the command is pending or
/// confirmed; a failed append falls back to the last reconstructed state
/// instead of leaving an optimistic flip in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleCommand {
    pub kind: ActuatorKind,
    pub requested: bool,
    fallback: bool,
    pub state: CommandState,
}

impl ToggleCommand {
    /// Builds the command flipping `current`, the reconstructed state at the
    /// time the toggle was issued.
    pub fn new(kind: ActuatorKind, current: bool) -> Self {
        ToggleCommand {
            kind,
            requested: !current,
            fallback: current,
            state: CommandState::Pending,
        }
    }

    /// The log action realizing this command.
    pub fn action(&self) -> &'static str {
        if self.requested {
            self.kind.on_action()
        } else {
            self.kind.off_action()
        }
    }

    pub fn confirm(&mut self) {
        self.state = CommandState::Confirmed;
    }

    pub fn fail(&mut self) {
        self.state = CommandState::Failed;
    }

    /// The state a caller should display right now.
    pub fn effective_state(&self) -> bool {
        match self.state {
            CommandState::Pending | CommandState::Confirmed => self.requested,
            CommandState::Failed => self.fallback,
        }
    }
}

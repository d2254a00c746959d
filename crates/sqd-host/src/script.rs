//! Replay scripts for the `sqd run --script` mode.
//!
//! A script is a list of frames. Each frame optionally overwrites parts of
//! the live readings, then delivers its events and commands in order, then
//! waits `wait_ms` before the next frame. Fields a frame omits keep their
//! previous value.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use sqd_model::{Attributes, BonusAttributes, MissionId, Race, SquadronMember, SquadronState};
use sqd_reconcile::ReconcileEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    Io { path: String, message: String },
    Parse { message: String },
    /// The dispatcher stopped accepting messages mid-script.
    DispatcherClosed,
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, message } => write!(f, "script read failed: {path}: {message}"),
            Self::Parse { message } => write!(f, "script parse failed: {message}"),
            Self::DispatcherClosed => write!(f, "dispatcher closed before script finished"),
        }
    }
}

impl std::error::Error for ScriptError {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    #[serde(default)]
    pub frames: Vec<Frame>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Frame {
    pub squadron: Option<ScriptSquadron>,
    /// Selected mission id; `0` clears the selection.
    pub selected: Option<MissionId>,
    /// Whether the mission surface is on screen.
    pub visible: Option<bool>,
    pub requirements: Option<RequirementText>,
    pub events: Vec<ScriptEvent>,
    pub commands: Vec<String>,
    pub wait_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptEvent {
    MemberListUpdated,
    CatalogSurfaceOpened,
    Tick,
    SessionReset,
}

impl From<ScriptEvent> for ReconcileEvent {
    fn from(e: ScriptEvent) -> Self {
        match e {
            ScriptEvent::MemberListUpdated => ReconcileEvent::MemberListUpdated,
            ScriptEvent::CatalogSurfaceOpened => ReconcileEvent::CatalogSurfaceOpened,
            ScriptEvent::Tick => ReconcileEvent::Tick,
            ScriptEvent::SessionReset => ReconcileEvent::SessionReset,
        }
    }
}

fn default_loaded() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptSquadron {
    /// `false` makes squadron sampling report "not loaded".
    #[serde(default = "default_loaded")]
    pub loaded: bool,
    #[serde(default)]
    pub members: Vec<ScriptMember>,
    #[serde(default)]
    pub bonus: Attributes,
    #[serde(default)]
    pub bonus_cap: u32,
    #[serde(default)]
    pub current_training: usize,
}

impl ScriptSquadron {
    pub fn to_state(&self) -> SquadronState {
        SquadronState::new(
            self.members.iter().map(ScriptMember::to_member).collect(),
            BonusAttributes {
                attributes: self.bonus,
                cap: self.bonus_cap,
            },
            self.current_training,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptMember {
    pub name: String,
    #[serde(default)]
    pub level: u8,
    #[serde(default)]
    pub job: u8,
    /// Raw race id as the external source reports it.
    #[serde(default)]
    pub race: u8,
    #[serde(default)]
    pub experience: u32,
    pub attributes: Attributes,
}

impl ScriptMember {
    pub fn to_member(&self) -> SquadronMember {
        SquadronMember::new(
            self.name.clone(),
            self.level,
            self.job,
            Race::from_raw(self.race),
            self.experience,
            self.attributes,
        )
    }
}

/// Raw on-screen text of each requirement component. A missing component
/// has no subtree on the surface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RequirementText {
    pub physical: Option<String>,
    pub mental: Option<String>,
    pub tactical: Option<String>,
}

pub fn parse_script(raw: &str) -> Result<Script, ScriptError> {
    serde_yaml::from_str(raw).map_err(|e| ScriptError::Parse {
        message: e.to_string(),
    })
}

pub fn load_script(path: &Path) -> Result<Script, ScriptError> {
    let raw = fs::read_to_string(path).map_err(|e| ScriptError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_script(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_frame() {
        let script = parse_script(
            r#"
frames:
  - squadron:
      members:
        - name: Aleisa
          level: 40
          race: 4
          attributes: { physical: 90, mental: 60, tactical: 40 }
      bonus: { physical: 20, mental: 20, tactical: 20 }
      bonus_cap: 400
    selected: 15
    visible: true
    requirements:
      physical: "215"
      mental: "Mental 195"
      tactical: "160"
    events: [member_list_updated, catalog_surface_opened, tick]
    commands: ["/squad"]
    wait_ms: 10
  - selected: 0
"#,
        )
        .unwrap();

        assert_eq!(script.frames.len(), 2);
        let f = &script.frames[0];
        let state = f.squadron.as_ref().unwrap().to_state();
        assert_eq!(state.members()[0].race, Race::Miqote);
        assert_eq!(state.bonus.cap, 400);
        assert_eq!(f.events[2], ScriptEvent::Tick);
        assert_eq!(f.requirements.as_ref().unwrap().mental.as_deref(), Some("Mental 195"));
        assert_eq!(script.frames[1].selected, Some(0));
        assert!(script.frames[1].events.is_empty());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = parse_script("frames:\n  - selcted: 3\n").unwrap_err();
        assert!(matches!(err, ScriptError::Parse { .. }));
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("replay.yaml");
        std::fs::write(&path, "frames:\n  - events: [tick, session_reset]\n    wait_ms: 5\n").unwrap();

        let script = load_script(&path).unwrap();
        assert_eq!(
            script.frames[0].events,
            vec![ScriptEvent::Tick, ScriptEvent::SessionReset]
        );
        assert_eq!(script.frames[0].wait_ms, 5);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_script(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, ScriptError::Io { .. }));
    }
}

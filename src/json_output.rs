//! JSON Output for Simulator Commands
//!
//! Structured one-line-per-event output for REPORT and HELP, selected with
//! the `json` output format so the simulator can be driven by other tools.

use serde::{Deserialize, Serialize};
use std::io::Write;
use crate::{robot::{Orientation, Pose}, Result};

/// Robot position event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEvent {
    /// Event type for JSON parsing
    #[serde(rename = "type")]
    pub event_type: String,
    pub x: i32,
    pub y: i32,
    pub facing: Orientation,
}

/// One entry of the command listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandUsage {
    pub name: String,
    pub usage: String,
}

/// Command listing event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HelpEvent {
    /// Event type for JSON parsing
    #[serde(rename = "type")]
    pub event_type: String,
    pub commands: Vec<CommandUsage>,
}

impl ReportEvent {
    pub fn new(pose: Pose) -> Self {
        Self {
            event_type: "report".to_string(),
            x: pose.x,
            y: pose.y,
            facing: pose.facing,
        }
    }
}

impl HelpEvent {
    pub fn new(commands: Vec<CommandUsage>) -> Self {
        Self {
            event_type: "help".to_string(),
            commands,
        }
    }
}

/// Write a JSON event as a single line
pub fn output_event<T: Serialize>(out: &mut dyn Write, event: &T) -> Result<()> {
    let json = serde_json::to_string(event)?;
    writeln!(out, "{}", json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_event_shape() {
        let mut out = Vec::new();
        let pose = Pose { x: 0, y: 1, facing: Orientation::North };
        output_event(&mut out, &ReportEvent::new(pose)).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"type\":\"report\",\"x\":0,\"y\":1,\"facing\":\"NORTH\"}\n"
        );
    }

    #[test]
    fn test_help_event_shape() {
        let mut out = Vec::new();
        let event = HelpEvent::new(vec![CommandUsage {
            name: "MOVE".to_string(),
            usage: String::new(),
        }]);
        output_event(&mut out, &event).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["type"], "help");
        assert_eq!(value["commands"][0]["name"], "MOVE");
        assert_eq!(value["commands"][0]["usage"], "");
    }
}

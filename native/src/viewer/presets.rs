use super::CommandContext;
use crate::config::BridgeConfig;
use crate::dde::{self, DdeApi, Status, WideText};
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PresetError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Unknown viewer preset: {0}")]
    UnknownPreset(String),
    #[error("Viewer preset '{preset}' has no {action} command")]
    MissingCommand {
        preset: String,
        action: ViewerAction,
    },
}

/// Which of a viewer's commands to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerAction {
    View,
    Close,
}

impl std::fmt::Display for ViewerAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewerAction::View => write!(f, "view"),
            ViewerAction::Close => write!(f, "close"),
        }
    }
}

/// A DDE server/topic pair and the command template sent to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DdeTarget {
    pub server: String,
    pub topic: String,
    pub command: String,
}

impl DdeTarget {
    pub fn new(server: &str, topic: &str, command: &str) -> Self {
        Self {
            server: server.to_string(),
            topic: topic.to_string(),
            command: command.to_string(),
        }
    }

    /// Expand the command template and send it through the platform DDEML.
    pub fn send(&self, ctx: &CommandContext) -> Status {
        self.send_with(&dde::platform(), ctx)
    }

    pub fn send_with<A: DdeApi>(&self, api: &A, ctx: &CommandContext) -> Status {
        let command = ctx.expand(&self.command);
        debug!(
            "[VIEWER] Sending '{}' to {}|{}",
            command, self.server, self.topic
        );

        let status = dde::execute_with(
            api,
            &WideText::new(&self.server),
            &WideText::new(&self.topic),
            &WideText::new(&command),
        );

        if !status.is_success() {
            error!(
                "DDE command {} failed! (server: {}, topic: {})",
                command, self.server, self.topic
            );
        }
        status
    }
}

/// DDE commands understood by one document viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerPreset {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<DdeTarget>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close: Option<DdeTarget>,
}

impl ViewerPreset {
    pub fn target(&self, action: ViewerAction) -> Option<&DdeTarget> {
        match action {
            ViewerAction::View => self.view.as_ref(),
            ViewerAction::Close => self.close.as_ref(),
        }
    }
}

/// Presets shipped with the bridge.
pub fn builtin_presets() -> Vec<ViewerPreset> {
    vec![
        ViewerPreset {
            name: "sumatra".to_string(),
            view: Some(DdeTarget::new(
                "SUMATRA",
                "control",
                "[ForwardSearch(\"%file\",\"%texfile\",%line,0)]",
            )),
            close: None,
        },
        ViewerPreset {
            name: "acrobat".to_string(),
            view: Some(DdeTarget::new(
                "acroview",
                "control",
                "[DocOpen(\"%fullfile\")][FileOpen(\"%fullfile\")]",
            )),
            // Acrobat only closes documents that were opened over DDE.
            close: Some(DdeTarget::new(
                "acroview",
                "control",
                "[DocClose(\"%fullfile\")]",
            )),
        },
    ]
}

/// Built-in presets, optionally overridden by a user JSON file.
#[derive(Debug, Clone)]
pub struct PresetRegistry {
    presets: Vec<ViewerPreset>,
}

impl Default for PresetRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PresetRegistry {
    pub fn builtin() -> Self {
        Self {
            presets: builtin_presets(),
        }
    }

    /// Built-ins plus the presets file named by the config, if any.
    pub fn from_config(config: &BridgeConfig) -> Result<Self, PresetError> {
        let mut registry = Self::builtin();
        if let Some(path) = &config.presets_path {
            registry.load_file(path)?;
        }
        Ok(registry)
    }

    /// Merge a JSON array of presets. Returns how many were read.
    pub fn load_file(&mut self, path: &Path) -> Result<usize, PresetError> {
        let content = fs::read_to_string(path)?;
        let presets: Vec<ViewerPreset> = serde_json::from_str(&content)?;
        let count = presets.len();
        self.merge(presets);

        info!("[VIEWER] Loaded {} preset(s) from {:?}", count, path);
        Ok(count)
    }

    /// Add presets, replacing any existing one with the same name (case-insensitive).
    pub fn merge(&mut self, presets: Vec<ViewerPreset>) {
        for preset in presets {
            match self
                .presets
                .iter_mut()
                .find(|p| p.name.eq_ignore_ascii_case(&preset.name))
            {
                Some(existing) => *existing = preset,
                None => self.presets.push(preset),
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&ViewerPreset> {
        self.presets
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn target(&self, name: &str, action: ViewerAction) -> Result<&DdeTarget, PresetError> {
        let preset = self
            .get(name)
            .ok_or_else(|| PresetError::UnknownPreset(name.to_string()))?;

        preset
            .target(action)
            .ok_or_else(|| PresetError::MissingCommand {
                preset: preset.name.clone(),
                action,
            })
    }

    pub fn presets(&self) -> &[ViewerPreset] {
        &self.presets
    }
}

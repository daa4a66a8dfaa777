// DDE targets of document viewers driven by the editor plugin.

pub mod patterns;
pub mod presets;

pub use patterns::CommandContext;
pub use presets::{
    builtin_presets, DdeTarget, PresetError, PresetRegistry, ViewerAction, ViewerPreset,
};

use serde::{Deserialize, Serialize};

use crate::constants;

/// Values substituted for optional attributes missing from the XML description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionDefaults {
    pub module_name: String,
    pub generic_type: String,
    pub generic_default: String,
    pub signal_type: String,
    pub width: u32,
    pub field_default: String,
    pub process_name: String,
    pub process_sensitivity: String,
}

impl Default for ExtractionDefaults {
    fn default() -> Self {
        Self {
            module_name: constants::DEFAULT_MODULE_NAME.to_string(),
            generic_type: constants::DEFAULT_GENERIC_TYPE.to_string(),
            generic_default: constants::DEFAULT_GENERIC_VALUE.to_string(),
            signal_type: constants::DEFAULT_SIGNAL_TYPE.to_string(),
            width: constants::DEFAULT_WIDTH,
            field_default: constants::DEFAULT_FIELD_VALUE.to_string(),
            process_name: constants::DEFAULT_PROCESS_NAME.to_string(),
            process_sensitivity: constants::DEFAULT_SENSITIVITY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub indent: String,
    /// Columns added after the longest generic/port name before the `:`.
    pub name_padding: usize,
    pub architecture_name: String,
    pub banner: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            indent: constants::DEFAULT_INDENT.to_string(),
            name_padding: constants::NAME_PADDING,
            architecture_name: constants::ARCHITECTURE_NAME.to_string(),
            banner: constants::BANNER.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub defaults: ExtractionDefaults,
    pub output: OutputConfig,
}

// Element tags
pub const TAG_GENERIC: &str = "generic";
pub const TAG_PORT: &str = "port";
pub const TAG_SIGNAL: &str = "signal";
pub const TAG_REGISTER: &str = "register";
pub const TAG_FIELD: &str = "field";
pub const TAG_COMPONENT: &str = "component";
pub const TAG_PROCESS: &str = "process";
pub const TAG_ASSIGNMENT: &str = "assignment";

// Attribute keys
pub const ATTR_NAME: &str = "name";
pub const ATTR_TYPE: &str = "type";
pub const ATTR_DEFAULT: &str = "default";
pub const ATTR_COMMENT: &str = "comment";
pub const ATTR_DIRECTION: &str = "direction";
pub const ATTR_WIDTH: &str = "width";
pub const ATTR_BITS: &str = "bits";
pub const ATTR_SENSITIVITY: &str = "sensitivity";
pub const ATTR_TARGET: &str = "target";
pub const ATTR_EXPRESSION: &str = "expression";

// Extraction defaults
pub const DEFAULT_MODULE_NAME: &str = "module";
pub const DEFAULT_GENERIC_TYPE: &str = "integer";
pub const DEFAULT_GENERIC_VALUE: &str = "0";
pub const DEFAULT_SIGNAL_TYPE: &str = "std_logic";
pub const DEFAULT_WIDTH: u32 = 1;
pub const DEFAULT_FIELD_VALUE: &str = "0";
pub const DEFAULT_PROCESS_NAME: &str = "proc";
pub const DEFAULT_SENSITIVITY: &str = "clk";

// Output formatting
pub const DEFAULT_INDENT: &str = "    ";
pub const NAME_PADDING: usize = 4;
pub const ARCHITECTURE_NAME: &str = "Behavioral";
pub const BANNER: &str = "Auto-generated VHDL from XML";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// Command line defaults
pub const DEFAULT_INPUT_PATH: &str = "hardware_config.xml";
pub const DEFAULT_OUTPUT_PATH: &str = "generated_module.vhdl";

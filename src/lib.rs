pub mod config;
pub mod constants;
pub mod convert;
pub mod error;
pub mod ir;
pub mod parser;

// Re-export commonly used types
pub use config::{Config, ExtractionDefaults, OutputConfig};
pub use convert::{xml_to_vhdl, Converter};
pub use error::ConversionError;
pub use ir::{Module, VhdlGenerator};
pub use parser::XmlModuleParser;

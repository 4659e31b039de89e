use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::NaiveDateTime;

use crate::config::Config;
use crate::error::{ConversionError, Result};
use crate::ir::{Module, VhdlGenerator};
use crate::parser::XmlModuleParser;

/// Converts an XML hardware description file into a VHDL source file.
pub struct Converter {
    config: Config,
}

impl Converter {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Parse `input`, render it, and write the result to `output`.
    ///
    /// The output file is only created once the whole document has been
    /// rendered, so a failing conversion never leaves a file behind.
    pub fn convert(&self, input: &Path, output: &Path) -> Result<Module> {
        let module = self.extract(input)?;
        let vhdl = self.generator(&module).generate(&module)?;
        self.write(output, &vhdl)?;
        Ok(module)
    }

    /// Same as [`Converter::convert`] with a fixed generation timestamp.
    pub fn convert_at(
        &self,
        input: &Path,
        output: &Path,
        timestamp: NaiveDateTime,
    ) -> Result<Module> {
        let module = self.extract(input)?;
        let vhdl = self.generator(&module).generate_at(&module, timestamp)?;
        self.write(output, &vhdl)?;
        Ok(module)
    }

    fn extract(&self, input: &Path) -> Result<Module> {
        tracing::info!("Parsing XML file: {}", input.display());
        XmlModuleParser::from_file(input, self.config.defaults.clone())?.parse_module()
    }

    fn generator(&self, module: &Module) -> VhdlGenerator {
        tracing::info!("Generating VHDL for module: {}", module.name);
        VhdlGenerator::with_config(self.config.output.clone())
    }

    fn write(&self, output: &Path, vhdl: &str) -> Result<()> {
        write_output(output, vhdl)?;
        tracing::info!("Wrote {} bytes to {}", vhdl.len(), output.display());
        Ok(())
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert with the default configuration.
pub fn xml_to_vhdl(input: &Path, output: &Path) -> Result<Module> {
    Converter::new().convert(input, output)
}

fn write_output(path: &Path, contents: &str) -> Result<()> {
    let io_error = |source| ConversionError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(contents.as_bytes()).map_err(io_error)?;
    writer.flush().map_err(io_error)?;

    Ok(())
}

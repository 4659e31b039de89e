use chrono::{Local, NaiveDateTime};

use crate::config::OutputConfig;
use crate::constants;
use crate::error::{ConversionError, Result};
use crate::ir::{Assignment, ComponentInstance, Generic, Module, Port, Process, Register, Signal};

/// Column at which the `:` of an aligned declaration list starts, relative to the
/// first character of the name: longest name plus `padding`.
///
/// Errors with [`ConversionError::EmptyList`] when there are no names; section
/// renderers return early on empty lists so this never reaches a user.
pub fn name_column<'a, I>(names: I, padding: usize, what: &'static str) -> Result<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    let max_length = names
        .into_iter()
        .map(|name| name.chars().count())
        .max()
        .ok_or(ConversionError::EmptyList { what })?;

    tracing::debug!("Aligning {} names at column {}", what, max_length + padding);
    Ok(max_length + padding)
}

fn comment_suffix(comment: &str) -> String {
    if comment.is_empty() {
        String::new()
    } else {
        format!("  -- {}", comment)
    }
}

/// Renders a [`Module`] into a VHDL entity/architecture pair.
pub struct VhdlGenerator {
    config: OutputConfig,
}

impl VhdlGenerator {
    pub fn new() -> Self {
        Self::with_config(OutputConfig::default())
    }

    pub fn with_config(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Generate the complete document stamped with the current local time.
    pub fn generate(&self, module: &Module) -> Result<String> {
        self.generate_at(module, Local::now().naive_local())
    }

    /// Generate the complete document with a fixed generation timestamp.
    pub fn generate_at(&self, module: &Module, timestamp: NaiveDateTime) -> Result<String> {
        let arch = &self.config.architecture_name;
        let mut output = String::new();

        // Header and entity
        output.push_str(&self.generate_header(timestamp));
        output.push_str(&format!("entity {} is\n", module.name));
        output.push_str(&self.generate_generics(&module.generics)?);
        output.push_str(&self.generate_ports(&module.ports)?);
        output.push_str(&format!("end {};\n\n", module.name));

        // Architecture declarative part
        output.push_str(&format!("architecture {} of {} is\n\n", arch, module.name));
        let declarations = [
            self.generate_signals(&module.signals),
            self.generate_registers(&module.registers),
            self.generate_components(&module.components),
        ];
        push_sections(&mut output, &declarations);

        // Architecture body
        output.push_str("begin\n\n");
        let statements = [
            self.generate_assignments(&module.assignments),
            self.generate_processes(&module.processes),
        ];
        push_sections(&mut output, &statements);

        output.push_str(&format!("end {};\n", arch));

        Ok(output)
    }

    pub fn generate_header(&self, timestamp: NaiveDateTime) -> String {
        format!(
            "-- {}\n\
             -- Generated on {}\n\
             library IEEE;\n\
             use IEEE.STD_LOGIC_1164.ALL;\n\
             use IEEE.NUMERIC_STD.ALL;\n\n",
            self.config.banner,
            timestamp.format(constants::TIMESTAMP_FORMAT)
        )
    }

    pub fn generate_generics(&self, generics: &[Generic]) -> Result<String> {
        if generics.is_empty() {
            return Ok(String::new());
        }

        let column = name_column(
            generics.iter().map(|g| g.name.as_str()),
            self.config.name_padding,
            "generic",
        )?;
        let item_indent = self.config.indent.repeat(2);

        let mut output = format!("{}generic (\n", self.config.indent);
        for generic in generics {
            output.push_str(&format!(
                "{}{:<column$}: {} := {};{}\n",
                item_indent,
                generic.name,
                generic.generic_type,
                generic.default_value,
                comment_suffix(&generic.comment),
            ));
        }
        output.push_str(&format!("{});\n", self.config.indent));

        Ok(output)
    }

    pub fn generate_ports(&self, ports: &[Port]) -> Result<String> {
        if ports.is_empty() {
            return Ok(String::new());
        }

        let column = name_column(
            ports.iter().map(|p| p.name.as_str()),
            self.config.name_padding,
            "port",
        )?;
        let item_indent = self.config.indent.repeat(2);

        let mut output = format!("{}port (\n", self.config.indent);
        for port in ports {
            output.push_str(&format!(
                "{}{:<column$}: {} {};{}\n",
                item_indent,
                port.name,
                port.direction,
                port.vhdl_type().to_vhdl(),
                comment_suffix(&port.comment),
            ));
        }
        output.push_str(&format!("{});\n", self.config.indent));

        Ok(output)
    }

    pub fn generate_signals(&self, signals: &[Signal]) -> String {
        if signals.is_empty() {
            return String::new();
        }

        let indent = &self.config.indent;
        let mut output = format!("{}-- Internal signals\n", indent);
        for signal in signals {
            let initializer = signal
                .default_value
                .as_ref()
                .map(|value| format!(" := {}", value))
                .unwrap_or_default();
            output.push_str(&format!(
                "{}signal {} : {}{};{}\n",
                indent,
                signal.name,
                signal.vhdl_type().to_vhdl(),
                initializer,
                comment_suffix(&signal.comment),
            ));
        }

        output
    }

    pub fn generate_registers(&self, registers: &[Register]) -> String {
        if registers.is_empty() {
            return String::new();
        }

        let indent = &self.config.indent;
        let mut output = format!("{}-- Registers\n", indent);
        for register in registers {
            output.push_str(&format!(
                "{}signal {} : {};\n",
                indent,
                register.name,
                register.vhdl_type().to_vhdl(),
            ));
            // Fields are documentation only
            for field in &register.fields {
                output.push_str(&format!(
                    "{}-- {} : bits {} (default: {})\n",
                    indent, field.name, field.bits, field.default_value,
                ));
            }
        }

        output
    }

    pub fn generate_components(&self, components: &[ComponentInstance]) -> String {
        if components.is_empty() {
            return String::new();
        }

        let indent = &self.config.indent;
        let inner = indent.repeat(2);
        let mut output = format!("{}-- Components\n", indent);
        for component in components {
            output.push_str(&format!(
                "{}-- {} : {}\n",
                indent, component.name, component.component_type
            ));
            output.push_str(&format!("{}component {}\n", indent, component.component_type));
            output.push_str(&format!("{}port (\n", inner));
            output.push_str(&format!("{}-- Port declarations\n", inner));
            output.push_str(&format!("{});\n", inner));
            output.push_str(&format!("{}end component;\n", indent));
        }

        output
    }

    pub fn generate_assignments(&self, assignments: &[Assignment]) -> String {
        if assignments.is_empty() {
            return String::new();
        }

        let indent = &self.config.indent;
        let mut output = format!("{}-- Concurrent assignments\n", indent);
        for assignment in assignments {
            output.push_str(&format!(
                "{}{} <= {};{}\n",
                indent,
                assignment.target,
                assignment.expression,
                comment_suffix(&assignment.comment),
            ));
        }

        output
    }

    pub fn generate_processes(&self, processes: &[Process]) -> String {
        if processes.is_empty() {
            return String::new();
        }

        let indent = &self.config.indent;
        let body_indent = indent.repeat(2);
        let mut output = format!("{}-- Processes\n", indent);
        for process in processes {
            output.push_str(&format!(
                "{}{}_process : process({})\n",
                indent, process.name, process.sensitivity
            ));
            output.push_str(&format!("{}begin\n", indent));
            if !process.body.is_empty() {
                for line in process.body.lines() {
                    let line = line.trim();
                    if line.is_empty() {
                        output.push('\n');
                    } else {
                        output.push_str(&body_indent);
                        output.push_str(line);
                        output.push('\n');
                    }
                }
            }
            output.push_str(&format!("{}end process;\n", indent));
        }

        output
    }
}

impl Default for VhdlGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Append each non-empty section followed by a blank line.
fn push_sections(output: &mut String, sections: &[String]) {
    for section in sections.iter().filter(|s| !s.is_empty()) {
        output.push_str(section);
        output.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::RegisterField;
    use chrono::NaiveDate;

    fn port(name: &str, direction: &str, width: u32, comment: &str) -> Port {
        Port {
            name: name.to_string(),
            direction: direction.to_string(),
            port_type: "std_logic".to_string(),
            width,
            comment: comment.to_string(),
        }
    }

    fn signal(name: &str, width: u32, default_value: Option<&str>) -> Signal {
        Signal {
            name: name.to_string(),
            signal_type: "std_logic".to_string(),
            width,
            default_value: default_value.map(str::to_string),
            comment: String::new(),
        }
    }

    fn fixed_timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn colon_columns(block: &str) -> Vec<usize> {
        block
            .lines()
            .filter(|line| line.contains(':'))
            .map(|line| line.find(':').unwrap())
            .collect()
    }

    #[test]
    fn test_name_column() {
        assert_eq!(name_column(["clk", "reset", "q"], 4, "port").unwrap(), 9);
        assert_eq!(name_column(["q"], 4, "port").unwrap(), 5);
    }

    #[test]
    fn test_name_column_empty_list() {
        let err = name_column(std::iter::empty(), 4, "generic").unwrap_err();
        assert!(matches!(err, ConversionError::EmptyList { what: "generic" }));
    }

    #[test]
    fn test_ports_aligned() {
        let generator = VhdlGenerator::new();
        let ports = vec![
            port("clk", "in", 1, ""),
            port("data_valid", "in", 1, "strobe"),
            port("q", "out", 8, ""),
        ];
        let block = generator.generate_ports(&ports).unwrap();

        println!("Generated ports:\n{}", block);

        let columns = colon_columns(&block);
        assert_eq!(columns.len(), 3);
        assert!(columns.iter().all(|&c| c == columns[0]));
        assert_eq!(columns[0], 8 + "data_valid".len() + 4);

        assert!(block.starts_with("    port (\n"));
        assert!(block.contains("q             : out std_logic_vector(7 downto 0);\n"));
        assert!(block.contains(": in std_logic;  -- strobe\n"));
        assert!(block.ends_with("    );\n"));
    }

    #[test]
    fn test_generics_last_item_terminated() {
        let generator = VhdlGenerator::new();
        let generics = vec![
            Generic {
                name: "WIDTH".to_string(),
                generic_type: "integer".to_string(),
                default_value: "8".to_string(),
                comment: "data width".to_string(),
            },
            Generic {
                name: "DEPTH".to_string(),
                generic_type: "natural".to_string(),
                default_value: "16".to_string(),
                comment: String::new(),
            },
        ];
        let block = generator.generate_generics(&generics).unwrap();

        assert_eq!(
            block,
            "    generic (\n\
             \x20       WIDTH    : integer := 8;  -- data width\n\
             \x20       DEPTH    : natural := 16;\n\
             \x20   );\n"
        );
    }

    #[test]
    fn test_single_port_block() {
        let generator = VhdlGenerator::new();
        let block = generator.generate_ports(&[port("rst", "in", 1, "")]).unwrap();
        assert_eq!(block, "    port (\n        rst    : in std_logic;\n    );\n");
    }

    #[test]
    fn test_empty_sections_render_nothing() {
        let generator = VhdlGenerator::new();
        assert_eq!(generator.generate_generics(&[]).unwrap(), "");
        assert_eq!(generator.generate_ports(&[]).unwrap(), "");
        assert_eq!(generator.generate_signals(&[]), "");
        assert_eq!(generator.generate_registers(&[]), "");
        assert_eq!(generator.generate_components(&[]), "");
        assert_eq!(generator.generate_assignments(&[]), "");
        assert_eq!(generator.generate_processes(&[]), "");
    }

    #[test]
    fn test_signal_initializer_only_when_present() {
        let generator = VhdlGenerator::new();
        let block = generator.generate_signals(&[
            signal("busy", 1, None),
            signal("state", 1, Some("'0'")),
            signal("count", 4, Some("(others => '0')")),
        ]);

        assert!(block.starts_with("    -- Internal signals\n"));
        assert!(block.contains("    signal busy : std_logic;\n"));
        assert!(block.contains("    signal state : std_logic := '0';\n"));
        assert!(block.contains("    signal count : std_logic_vector(3 downto 0) := (others => '0');\n"));
        assert!(!block.lines().nth(1).unwrap().contains(":="));
    }

    #[test]
    fn test_registers_with_field_comments() {
        let generator = VhdlGenerator::new();
        let registers = vec![Register {
            name: "ctrl_reg".to_string(),
            width: 32,
            fields: vec![
                RegisterField {
                    name: "enable".to_string(),
                    bits: "0".to_string(),
                    default_value: "1".to_string(),
                },
                RegisterField {
                    name: "mode".to_string(),
                    bits: "3:1".to_string(),
                    default_value: "0".to_string(),
                },
            ],
        }];
        let block = generator.generate_registers(&registers);

        assert_eq!(
            block,
            "    -- Registers\n\
             \x20   signal ctrl_reg : std_logic_vector(31 downto 0);\n\
             \x20   -- enable : bits 0 (default: 1)\n\
             \x20   -- mode : bits 3:1 (default: 0)\n"
        );
    }

    #[test]
    fn test_component_stub() {
        let generator = VhdlGenerator::new();
        let block = generator.generate_components(&[ComponentInstance {
            name: "u_fifo".to_string(),
            component_type: "sync_fifo".to_string(),
        }]);

        assert!(block.contains("    -- u_fifo : sync_fifo\n"));
        assert!(block.contains("    component sync_fifo\n"));
        assert!(block.contains("        -- Port declarations\n"));
        assert!(block.ends_with("    end component;\n"));
    }

    #[test]
    fn test_assignments_pass_expression_through() {
        let generator = VhdlGenerator::new();
        let block = generator.generate_assignments(&[
            Assignment {
                target: "done".to_string(),
                expression: "'1' when count = x\"FF\" else '0'".to_string(),
                comment: "terminal count".to_string(),
            },
            Assignment {
                target: "q".to_string(),
                expression: "count_reg".to_string(),
                comment: String::new(),
            },
        ]);

        assert!(block.contains("    done <= '1' when count = x\"FF\" else '0';  -- terminal count\n"));
        assert!(block.contains("    q <= count_reg;\n"));
    }

    #[test]
    fn test_process_body_reindented() {
        let generator = VhdlGenerator::new();
        let block = generator.generate_processes(&[Process {
            name: "counter".to_string(),
            sensitivity: "clk, rst".to_string(),
            body: "if rst = '1' then\n          count <= 0;\n\n   end if;".to_string(),
        }]);

        assert_eq!(
            block,
            "    -- Processes\n\
             \x20   counter_process : process(clk, rst)\n\
             \x20   begin\n\
             \x20       if rst = '1' then\n\
             \x20       count <= 0;\n\
             \n\
             \x20       end if;\n\
             \x20   end process;\n"
        );
    }

    #[test]
    fn test_empty_process_body() {
        let generator = VhdlGenerator::new();
        let block = generator.generate_processes(&[Process {
            name: "proc".to_string(),
            sensitivity: "clk".to_string(),
            body: String::new(),
        }]);
        assert!(block.contains("    begin\n    end process;\n"));
    }

    #[test]
    fn test_generate_minimal_module() {
        let mut module = Module::new("counter".to_string());
        module.ports.push(port("clk", "in", 1, ""));
        module.ports.push(port("q", "out", 8, ""));

        let generator = VhdlGenerator::new();
        let vhdl = generator.generate_at(&module, fixed_timestamp()).unwrap();

        println!("Generated VHDL:\n{}", vhdl);

        let expected = "\
-- Auto-generated VHDL from XML
-- Generated on 2024-03-01 09:30:00
library IEEE;
use IEEE.STD_LOGIC_1164.ALL;
use IEEE.NUMERIC_STD.ALL;

entity counter is
    port (
        clk    : in std_logic;
        q      : out std_logic_vector(7 downto 0);
    );
end counter;

architecture Behavioral of counter is

begin

end Behavioral;
";
        assert_eq!(vhdl, expected);
    }

    #[test]
    fn test_section_order() {
        let mut module = Module::new("top".to_string());
        module.signals.push(signal("s", 1, None));
        module.registers.push(Register {
            name: "r".to_string(),
            width: 8,
            fields: Vec::new(),
        });
        module.components.push(ComponentInstance {
            name: "u0".to_string(),
            component_type: "child".to_string(),
        });
        module.assignments.push(Assignment {
            target: "s".to_string(),
            expression: "'1'".to_string(),
            comment: String::new(),
        });
        module.processes.push(Process {
            name: "main".to_string(),
            sensitivity: "clk".to_string(),
            body: "null;".to_string(),
        });

        let vhdl = VhdlGenerator::new()
            .generate_at(&module, fixed_timestamp())
            .unwrap();

        let order = [
            "entity top is",
            "end top;",
            "architecture Behavioral of top is",
            "-- Internal signals",
            "-- Registers",
            "-- Components",
            "\nbegin\n",
            "-- Concurrent assignments",
            "-- Processes",
            "end Behavioral;",
        ];
        let positions: Vec<usize> = order.iter().map(|s| vhdl.find(s).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(vhdl.contains("    end component;\n\nbegin\n\n"));
        assert!(vhdl.ends_with("    end process;\n\nend Behavioral;\n"));
    }

    #[test]
    fn test_custom_output_config() {
        let config = OutputConfig {
            indent: "  ".to_string(),
            architecture_name: "rtl".to_string(),
            ..OutputConfig::default()
        };
        let mut module = Module::new("m".to_string());
        module.ports.push(port("a", "in", 1, ""));

        let vhdl = VhdlGenerator::with_config(config)
            .generate_at(&module, fixed_timestamp())
            .unwrap();

        assert!(vhdl.contains("  port (\n    a    : in std_logic;\n  );\n"));
        assert!(vhdl.contains("architecture rtl of m is"));
        assert!(vhdl.ends_with("end rtl;\n"));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let mut module = Module::new("m".to_string());
        module.signals.push(signal("s", 2, Some("\"00\"")));
        let generator = VhdlGenerator::new();
        let first = generator.generate_at(&module, fixed_timestamp()).unwrap();
        let second = generator.generate_at(&module, fixed_timestamp()).unwrap();
        assert_eq!(first, second);
    }
}

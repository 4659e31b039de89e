use std::io::ErrorKind;
use std::path::Path;

use roxmltree::{Document, Node};

use crate::config::ExtractionDefaults;
use crate::constants::*;
use crate::error::{ConversionError, Result};
use crate::ir::{
    Assignment, ComponentInstance, Generic, Module, Port, Process, Register, RegisterField, Signal,
};

/// Builds a [`Module`] from an XML hardware description.
///
/// The root element's tag is not checked; only its `name` attribute and its
/// direct element children matter. Children with unknown tags are skipped.
pub struct XmlModuleParser {
    content: String,
    defaults: ExtractionDefaults,
}

impl XmlModuleParser {
    pub fn new(content: String) -> Self {
        Self::with_defaults(content, ExtractionDefaults::default())
    }

    pub fn with_defaults(content: String, defaults: ExtractionDefaults) -> Self {
        Self { content, defaults }
    }

    pub fn from_file(path: &Path, defaults: ExtractionDefaults) -> Result<Self> {
        let content = read_input(path)?;
        Ok(Self::with_defaults(content, defaults))
    }

    pub fn parse_module(&self) -> Result<Module> {
        let doc = Document::parse(&self.content)?;
        let root = doc.root_element();

        let name = root
            .attribute(ATTR_NAME)
            .unwrap_or(self.defaults.module_name.as_str())
            .to_string();
        let mut module = Module::new(name);

        for child in root.children().filter(|n| n.is_element()) {
            match child.tag_name().name() {
                TAG_GENERIC => module.generics.push(self.parse_generic(child)?),
                TAG_PORT => module.ports.push(self.parse_port(child)?),
                TAG_SIGNAL => module.signals.push(self.parse_signal(child)?),
                TAG_REGISTER => module.registers.push(self.parse_register(child)?),
                TAG_COMPONENT => module.components.push(parse_component(child)?),
                TAG_PROCESS => module.processes.push(self.parse_process(child)),
                TAG_ASSIGNMENT => module.assignments.push(parse_assignment(child)?),
                other => {
                    tracing::debug!("Ignoring unknown element <{}>", other);
                }
            }
        }

        tracing::debug!(
            "Extracted module '{}': {} generics, {} ports, {} signals, {} registers, {} components, {} assignments, {} processes",
            module.name,
            module.generics.len(),
            module.ports.len(),
            module.signals.len(),
            module.registers.len(),
            module.components.len(),
            module.assignments.len(),
            module.processes.len(),
        );
        tracing::debug!("Module: {}", serde_json::to_string(&module).unwrap_or_default());

        Ok(module)
    }

    fn parse_generic(&self, node: Node) -> Result<Generic> {
        let generic = Generic {
            name: required(node, ATTR_NAME)?.to_string(),
            generic_type: optional(node, ATTR_TYPE, &self.defaults.generic_type),
            default_value: optional(node, ATTR_DEFAULT, &self.defaults.generic_default),
            comment: optional(node, ATTR_COMMENT, ""),
        };
        tracing::debug!(
            "Generic: {} : {} := {}",
            generic.name,
            generic.generic_type,
            generic.default_value
        );
        Ok(generic)
    }

    fn parse_port(&self, node: Node) -> Result<Port> {
        let port = Port {
            name: required(node, ATTR_NAME)?.to_string(),
            direction: required(node, ATTR_DIRECTION)?.to_string(),
            port_type: optional(node, ATTR_TYPE, &self.defaults.signal_type),
            width: self.optional_width(node)?,
            comment: optional(node, ATTR_COMMENT, ""),
        };
        tracing::debug!("Port: {} ({}, width {})", port.name, port.direction, port.width);
        Ok(port)
    }

    fn parse_signal(&self, node: Node) -> Result<Signal> {
        let signal = Signal {
            name: required(node, ATTR_NAME)?.to_string(),
            signal_type: optional(node, ATTR_TYPE, &self.defaults.signal_type),
            width: self.optional_width(node)?,
            default_value: node.attribute(ATTR_DEFAULT).map(str::to_string),
            comment: optional(node, ATTR_COMMENT, ""),
        };
        tracing::debug!(
            "Signal: {} (width {}, default {:?})",
            signal.name,
            signal.width,
            signal.default_value
        );
        Ok(signal)
    }

    fn parse_register(&self, node: Node) -> Result<Register> {
        let name = required(node, ATTR_NAME)?.to_string();
        let width = parse_width(node, required(node, ATTR_WIDTH)?)?;

        let fields = node
            .children()
            .filter(|c| c.is_element() && c.has_tag_name(TAG_FIELD))
            .map(|field| -> Result<RegisterField> {
                Ok(RegisterField {
                    name: required(field, ATTR_NAME)?.to_string(),
                    bits: required(field, ATTR_BITS)?.to_string(),
                    default_value: optional(field, ATTR_DEFAULT, &self.defaults.field_default),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!("Register: {} (width {}, {} fields)", name, width, fields.len());
        Ok(Register {
            name,
            width,
            fields,
        })
    }

    fn parse_process(&self, node: Node) -> Process {
        let process = Process {
            name: optional(node, ATTR_NAME, &self.defaults.process_name),
            sensitivity: optional(node, ATTR_SENSITIVITY, &self.defaults.process_sensitivity),
            body: leading_text(node).trim().to_string(),
        };
        tracing::debug!("Process: {} ({} body lines)", process.name, process.body.lines().count());
        process
    }

    fn optional_width(&self, node: Node) -> Result<u32> {
        match node.attribute(ATTR_WIDTH) {
            Some(value) => parse_width(node, value),
            None => Ok(self.defaults.width),
        }
    }
}

fn parse_component(node: Node) -> Result<ComponentInstance> {
    let component = ComponentInstance {
        name: required(node, ATTR_NAME)?.to_string(),
        component_type: required(node, ATTR_TYPE)?.to_string(),
    };
    tracing::debug!("Component: {} : {}", component.name, component.component_type);
    Ok(component)
}

fn parse_assignment(node: Node) -> Result<Assignment> {
    let assignment = Assignment {
        target: required(node, ATTR_TARGET)?.to_string(),
        expression: required(node, ATTR_EXPRESSION)?.to_string(),
        comment: optional(node, ATTR_COMMENT, ""),
    };
    tracing::debug!("Assignment: {} <= {}", assignment.target, assignment.expression);
    Ok(assignment)
}

/// Text content before the first child element. Comments and processing
/// instructions are skipped, so the text on either side of them is joined.
fn leading_text(node: Node) -> String {
    node.children()
        .take_while(|c| !c.is_element())
        .filter(|c| c.is_text())
        .filter_map(|c| c.text())
        .collect()
}

fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ConversionError::FileNotFound {
            path: path.to_path_buf(),
        },
        ErrorKind::InvalidData => ConversionError::Encoding {
            path: path.to_path_buf(),
        },
        _ => ConversionError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

fn required<'a>(node: Node<'a, '_>, attribute: &str) -> Result<&'a str> {
    node.attribute(attribute)
        .ok_or_else(|| ConversionError::missing_attribute(node.tag_name().name(), attribute))
}

fn optional(node: Node, attribute: &str, default: &str) -> String {
    node.attribute(attribute).unwrap_or(default).to_string()
}

/// Widths are positive integers; zero would render an inverted range.
fn parse_width(node: Node, value: &str) -> Result<u32> {
    match value.trim().parse::<u32>() {
        Ok(width) if width >= 1 => Ok(width),
        _ => Err(ConversionError::InvalidFormat {
            tag: node.tag_name().name().to_string(),
            attribute: ATTR_WIDTH.to_string(),
            value: value.to_string(),
        }),
    }
}

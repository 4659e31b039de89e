use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRange {
    pub left: u32,
    pub right: u32,
}

impl VectorRange {
    /// `[width-1 downto 0]`. Callers guarantee `width >= 1`.
    pub fn for_width(width: u32) -> Self {
        Self {
            left: width.saturating_sub(1),
            right: 0,
        }
    }

    pub fn to_vhdl(&self) -> String {
        format!("({} downto {})", self.left, self.right)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VHDLType {
    StdLogic,
    StdLogicVector(VectorRange),
}

impl VHDLType {
    /// Width 1 is a scalar bit, anything wider a vector.
    pub fn from_width(width: u32) -> Self {
        if width > 1 {
            VHDLType::StdLogicVector(VectorRange::for_width(width))
        } else {
            VHDLType::StdLogic
        }
    }

    pub fn to_vhdl(&self) -> String {
        match self {
            VHDLType::StdLogic => "std_logic".to_string(),
            VHDLType::StdLogicVector(range) => format!("std_logic_vector{}", range.to_vhdl()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Generic {
    pub name: String,
    pub generic_type: String,
    pub default_value: String,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    pub name: String,
    /// Passed through verbatim ("in", "out", "inout", ...).
    pub direction: String,
    pub port_type: String,
    pub width: u32,
    pub comment: String,
}

impl Port {
    pub fn vhdl_type(&self) -> VHDLType {
        VHDLType::from_width(self.width)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub name: String,
    pub signal_type: String,
    pub width: u32,
    pub default_value: Option<String>,
    pub comment: String,
}

impl Signal {
    pub fn vhdl_type(&self) -> VHDLType {
        VHDLType::from_width(self.width)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterField {
    pub name: String,
    /// Free-form bit range text such as "7:4".
    pub bits: String,
    pub default_value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Register {
    pub name: String,
    pub width: u32,
    pub fields: Vec<RegisterField>,
}

impl Register {
    /// Registers are declared as vectors even when one bit wide.
    pub fn vhdl_type(&self) -> VHDLType {
        VHDLType::StdLogicVector(VectorRange::for_width(self.width))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentInstance {
    pub name: String,
    pub component_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub target: String,
    pub expression: String,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    pub name: String,
    pub sensitivity: String,
    pub body: String, // Raw text, re-indented on output
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    pub generics: Vec<Generic>,
    pub ports: Vec<Port>,
    pub signals: Vec<Signal>,
    pub registers: Vec<Register>,
    pub components: Vec<ComponentInstance>,
    pub processes: Vec<Process>,
    pub assignments: Vec<Assignment>,
}

impl Module {
    pub fn new(name: String) -> Self {
        Self {
            name,
            generics: Vec::new(),
            ports: Vec::new(),
            signals: Vec::new(),
            registers: Vec::new(),
            components: Vec::new(),
            processes: Vec::new(),
            assignments: Vec::new(),
        }
    }
}

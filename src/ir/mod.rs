pub mod model;
pub mod vhdl_gen;

pub use model::{
    Assignment, ComponentInstance, Generic, Module, Port, Process, Register, RegisterField,
    Signal, VHDLType, VectorRange,
};
pub use vhdl_gen::{name_column, VhdlGenerator};

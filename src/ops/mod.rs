pub mod lut;
pub mod lut_exec;
pub mod tanh;
pub mod x8lut;

pub use lut::{LookupTable, LUT_SIZE};
pub use lut_exec::{execute_lut, BufferBinding};
pub use tanh::{create_tanh_nc_q8, OperatorState, TanhOperator};

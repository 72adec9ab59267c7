//! Modules bundled with the runtime.

mod flow_tick;
mod gate;

pub use flow_tick::FlowTickModule;
pub use gate::{GateHandle, GateModule};

//! Common types shared by the remap metrics tools.
//!
//! Every categorical parameter of the remapping study (method, grid pairing,
//! resolution, variable, metric) is an enum or a validated index, so lookups
//! into the fixed tables cannot go out of range once a value exists.

pub mod error;
pub mod grid;
pub mod mesh;
pub mod method;
pub mod metric;
pub mod variable;

pub use error::{RemapError, RemapResult};
pub use grid::{GridFamily, GridPairing, RrmRes, UniformRes};
pub use mesh::{Mesh, MeshMode};
pub use method::{EsmfScheme, Method, Variant};
pub use metric::{Metric, MetricScale, REMAP_ITERATIONS, REMAP_ITERATION_COUNT};
pub use variable::Variable;

//! Accelerator backend for batched mean shift.
//!
//! Evaluates kernel weights for a whole point buffer in one dispatch using
//! [krnl](https://docs.rs/krnl) compute kernels. Points are stored as three
//! `f32` coordinate buffers (x, y, z) so that each invocation reads one item
//! from each. When the selected device is the host, the same kernel functions
//! run directly over host slices.
//!
//! - [`Device`] — [`Accelerator`](modal_meanshift::Accelerator) for 3-D points and RGB colours
//! - [`Resident`] — Point buffer uploaded to a device
mod device;
mod shaders;

pub use device::*;

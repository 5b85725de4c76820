use krnl::buffer::Slice;
use krnl::buffer::SliceMut;
use krnl::macros::module;

#[module]
pub mod kernels {
    #[cfg(not(target_arch = "spirv"))]
    use krnl::krnl_core;
    #[cfg(target_arch = "spirv")]
    use krnl_core::spirv_std::num_traits::Float;
    use krnl_core::macros::kernel;

    pub fn distance_impl(cx: f32, cy: f32, cz: f32, x: f32, y: f32, z: f32) -> f32 {
        let dx = x - cx;
        let dy = y - cy;
        let dz = z - cz;
        dx * dx + dy * dy + dz * dz
    }

    // edge test in f32, see Device for how this compares to the host
    pub fn flat_impl(bandwidth: f32, d2: f32) -> f32 {
        if d2 <= bandwidth * bandwidth { 1. } else { 0. }
    }

    pub fn gaussian_impl(bandwidth: f32, d2: f32) -> f32 {
        (-d2 / (2. * bandwidth * bandwidth)).exp()
    }

    #[kernel]
    pub fn flat(
        cx: f32,
        cy: f32,
        cz: f32,
        bandwidth: f32,
        #[item] x: f32,
        #[item] y: f32,
        #[item] z: f32,
        #[item] w: &mut f32,
    ) {
        *w = flat_impl(bandwidth, distance_impl(cx, cy, cz, x, y, z));
    }

    #[kernel]
    pub fn gaussian(
        cx: f32,
        cy: f32,
        cz: f32,
        bandwidth: f32,
        #[item] x: f32,
        #[item] y: f32,
        #[item] z: f32,
        #[item] w: &mut f32,
    ) {
        *w = gaussian_impl(bandwidth, distance_impl(cx, cy, cz, x, y, z));
    }
}

/// Kernel shapes with a device implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    Flat,
    Gaussian,
}

/// Writes one weight per point into `w`.
pub fn weigh(
    window: Window,
    [cx, cy, cz]: [f32; 3],
    bandwidth: f32,
    x: Slice<f32>,
    y: Slice<f32>,
    z: Slice<f32>,
    mut w: SliceMut<f32>,
) -> krnl::anyhow::Result<()> {
    if let Some((((x, y), z), w)) = x
        .as_host_slice()
        .zip(y.as_host_slice())
        .zip(z.as_host_slice())
        .zip(w.as_host_slice_mut())
    {
        let weight = match window {
            Window::Flat => kernels::flat_impl,
            Window::Gaussian => kernels::gaussian_impl,
        };
        x.iter()
            .zip(y.iter())
            .zip(z.iter())
            .zip(w.iter_mut())
            .for_each(|(((x, y), z), w)| {
                *w = weight(bandwidth, kernels::distance_impl(cx, cy, cz, *x, *y, *z))
            });
        return Ok(());
    }
    match window {
        Window::Flat => kernels::flat::builder()?
            .build(w.device())?
            .dispatch(cx, cy, cz, bandwidth, x, y, z, w),
        Window::Gaussian => kernels::gaussian::builder()?
            .build(w.device())?
            .dispatch(cx, cy, cz, bandwidth, x, y, z, w),
    }
}

use super::shaders::Window;
use super::shaders::weigh;
use krnl::buffer::Buffer;
use modal_core::*;
use modal_geometry::*;
use modal_kernel::*;
use modal_meanshift::*;

/// krnl-backed [`Accelerator`] for points with three `f32` coordinates.
///
/// Holds a krnl device handle. [`Device::detect`] takes the first compute
/// device and falls back to the host, where the same kernel functions run
/// directly over the uploaded slices.
///
/// Distances, bandwidth, and weights are `f32` on both paths, so the host
/// fallback reproduces the device bit for bit. Against the `f64` host
/// strategies, a [`Flat`] window can disagree on a point lying within `f32`
/// rounding of its edge; Gaussian weights differ only by that rounding.
#[derive(Debug, Clone)]
pub struct Device {
    device: krnl::device::Device,
}

impl Device {
    pub fn host() -> Self {
        Self {
            device: krnl::device::Device::host(),
        }
    }
    pub fn detect() -> Self {
        match krnl::device::Device::builder().build() {
            Ok(device) => {
                log::info!("{:<32}{:<32}", "accelerator", "device");
                Self { device }
            }
            Err(e) => {
                log::info!("{:<32}{:<32}", "accelerator", "host");
                log::debug!("no compute device: {}", e);
                Self::host()
            }
        }
    }

    fn upload<P>(&self, points: &[P]) -> Result<Resident>
    where
        P: Copy + Into<[f32; 3]>,
    {
        let (xs, ys, zs) = points
            .iter()
            .map(|p| Into::<[f32; 3]>::into(*p))
            .fold(
                (Vec::new(), Vec::new(), Vec::new()),
                |(mut xs, mut ys, mut zs), [x, y, z]| {
                    xs.push(x);
                    ys.push(y);
                    zs.push(z);
                    (xs, ys, zs)
                },
            );
        Ok(Resident {
            len: points.len(),
            xs: self.resident(xs)?,
            ys: self.resident(ys)?,
            zs: self.resident(zs)?,
        })
    }

    fn resident(&self, values: Vec<f32>) -> Result<Buffer<f32>> {
        Buffer::from(values)
            .into_device(self.device.clone())
            .map_err(|e| Error::Accelerator(e.to_string()))
    }

    fn dispatch<P>(&self, window: Window, batch: &Resident, candidate: &P, bandwidth: Energy) -> Result<Vec<Weight>>
    where
        P: Copy + Into<[f32; 3]>,
    {
        let mut weights = self.resident(vec![0.; batch.len()])?;
        weigh(
            window,
            (*candidate).into(),
            bandwidth as f32,
            batch.xs.as_slice(),
            batch.ys.as_slice(),
            batch.zs.as_slice(),
            weights.as_slice_mut(),
        )
        .and_then(|()| weights.into_vec())
        .map(|w| w.into_iter().map(Weight::from).collect())
        .map_err(|e| Error::Accelerator(e.to_string()))
    }
}

impl Default for Device {
    fn default() -> Self {
        Self::detect()
    }
}

/// Point buffer uploaded as three coordinate columns.
pub struct Resident {
    len: usize,
    xs: Buffer<f32>,
    ys: Buffer<f32>,
    zs: Buffer<f32>,
}

impl Resident {
    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Accelerator<Space, Gaussian> for Device {
    type Batch = Resident;
    fn load(&self, points: &[[f32; 3]]) -> Result<Resident> {
        self.upload(points)
    }
    fn weights(&self, batch: &Resident, candidate: &[f32; 3], kernel: &Gaussian) -> Result<Vec<Weight>> {
        self.dispatch(Window::Gaussian, batch, candidate, kernel.bandwidth())
    }
}

impl Accelerator<Space, Flat> for Device {
    type Batch = Resident;
    fn load(&self, points: &[[f32; 3]]) -> Result<Resident> {
        self.upload(points)
    }
    fn weights(&self, batch: &Resident, candidate: &[f32; 3], kernel: &Flat) -> Result<Vec<Weight>> {
        self.dispatch(Window::Flat, batch, candidate, kernel.bandwidth())
    }
}

impl Accelerator<Chroma, Gaussian> for Device {
    type Batch = Resident;
    fn load(&self, points: &[Rgb]) -> Result<Resident> {
        self.upload(points)
    }
    fn weights(&self, batch: &Resident, candidate: &Rgb, kernel: &Gaussian) -> Result<Vec<Weight>> {
        self.dispatch(Window::Gaussian, batch, candidate, kernel.bandwidth())
    }
}

impl Accelerator<Chroma, Flat> for Device {
    type Batch = Resident;
    fn load(&self, points: &[Rgb]) -> Result<Resident> {
        self.upload(points)
    }
    fn weights(&self, batch: &Resident, candidate: &Rgb, kernel: &Flat) -> Result<Vec<Weight>> {
        self.dispatch(Window::Flat, batch, candidate, kernel.bandwidth())
    }
}

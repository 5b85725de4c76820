use anyhow::Context;
use modal::geometry::*;

/// A geometry whose points can be read from and written to a text line.
pub trait Line: Geometry {
    fn parse(&self, line: &str) -> anyhow::Result<Self::P>;
    fn show(&self, p: &Self::P) -> String;
}

impl Line for Scalar {
    fn parse(&self, line: &str) -> anyhow::Result<f64> {
        line.trim()
            .parse::<f64>()
            .with_context(|| format!("not a number: {:?}", line))
    }
    fn show(&self, p: &f64) -> String {
        p.to_string()
    }
}

impl<const D: usize> Line for Euclidean<D> {
    fn parse(&self, line: &str) -> anyhow::Result<[f32; D]> {
        let coordinates = line
            .split_whitespace()
            .map(|s| s.parse::<f32>())
            .collect::<Result<Vec<f32>, _>>()
            .with_context(|| format!("not a point: {:?}", line))?;
        <[f32; D]>::try_from(coordinates)
            .map_err(|v| anyhow::anyhow!("expected {} coordinates, found {}", D, v.len()))
    }
    fn show(&self, p: &[f32; D]) -> String {
        p.iter()
            .map(|x| x.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Line for Chroma {
    fn parse(&self, line: &str) -> anyhow::Result<Rgb> {
        Ok(Rgb::try_from(line.trim())?)
    }
    fn show(&self, p: &Rgb) -> String {
        p.to_string()
    }
}

/// Reads one point per non-blank line.
pub fn read<G, R>(geometry: &G, input: R) -> anyhow::Result<Vec<G::P>>
where
    G: Line,
    R: std::io::BufRead,
{
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| line.as_ref().map_or(true, |l| !l.trim().is_empty()))
        .map(|(i, line)| {
            line.context("reading stdin")
                .and_then(|l| geometry.parse(&l))
                .with_context(|| format!("line {}", i + 1))
        })
        .collect()
}

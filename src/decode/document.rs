use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};

use crate::decode::nan::NanTokens;
use crate::foundation::core::{Dimensions, FrameIndex};
use crate::foundation::error::{ReelError, ReelResult};

/// Decoded contents of one input document.
///
/// Samples are hue values in `[0, 255]` for diverged cells and `NaN` for bounded cells. The
/// series is immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSeries {
    dims: Dimensions,
    frames: Vec<Vec<f32>>,
}

impl FrameSeries {
    /// Build a series, checking that there is at least one frame and every frame holds exactly
    /// `width * height` samples.
    pub fn new(dims: Dimensions, frames: Vec<Vec<f32>>) -> ReelResult<Self> {
        if frames.is_empty() {
            return Err(ReelError::decode("a frame series needs at least one frame"));
        }
        let cells = dims.cells();
        if let Some((idx, frame)) = frames.iter().enumerate().find(|(_, f)| f.len() != cells) {
            return Err(ReelError::decode(format!(
                "frame {idx} has {} samples, expected {cells} ({dims})",
                frame.len()
            )));
        }
        Ok(Self { dims, frames })
    }

    /// Decode a document held in memory.
    pub fn from_slice(bytes: &[u8]) -> ReelResult<Self> {
        Self::from_reader(bytes)
    }

    /// Decode a document from a buffered reader.
    ///
    /// The text is streamed through the NaN rewriter into the JSON parser, so only the decoded
    /// samples are held in memory, never the document text.
    pub fn from_reader<R: BufRead>(reader: R) -> ReelResult<Self> {
        let def: DocumentDef = serde_json::from_reader(BufReader::new(NanTokens::new(reader)))
            .map_err(|e| ReelError::decode(format!("parse mandelbrot document JSON: {e}")))?;
        def.into_series()
    }

    /// Decode the document at `path`.
    ///
    /// Every failure is reported as [`ReelError::Decode`] naming the file.
    #[tracing::instrument(level = "debug", skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| ReelError::decode(format!("read '{}': {e}", path.display())))?;
        let series = Self::from_reader(BufReader::new(file)).map_err(|e| match e {
            ReelError::Decode(msg) => ReelError::decode(format!("'{}': {msg}", path.display())),
            other => other,
        })?;
        tracing::debug!(
            dims = %series.dims,
            iterations = series.iterations(),
            "decoded document"
        );
        Ok(series)
    }

    /// Grid geometry.
    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    /// Grid width in pixels.
    pub fn width(&self) -> u32 {
        self.dims.width
    }

    /// Grid height in pixels.
    pub fn height(&self) -> u32 {
        self.dims.height
    }

    /// Number of frames.
    pub fn iterations(&self) -> usize {
        self.frames.len()
    }

    /// Samples of frame `idx`, in producer (linear cell) order.
    pub fn frame(&self, idx: FrameIndex) -> Option<&[f32]> {
        usize::try_from(idx.0)
            .ok()
            .and_then(|i| self.frames.get(i))
            .map(Vec::as_slice)
    }

    /// One sample, addressed by frame and linear cell index.
    pub fn sample(&self, idx: FrameIndex, cell: usize) -> Option<f32> {
        self.frame(idx).and_then(|f| f.get(cell).copied())
    }

    /// Split into the first `at` frames and the rest.
    pub fn split_at(mut self, at: usize) -> ReelResult<(Self, Self)> {
        if at == 0 || at >= self.frames.len() {
            return Err(ReelError::decode(format!(
                "cannot split a series of {} frames at {at}",
                self.frames.len()
            )));
        }
        let tail = self.frames.split_off(at);
        let dims = self.dims;
        Ok((self, Self { dims, frames: tail }))
    }

    /// Serialize in the input document format. Bounded cells are written as `null`.
    pub fn write_json<W: Write>(&self, w: W) -> ReelResult<()> {
        let out = DocumentOut {
            width: self.dims.width,
            height: self.dims.height,
            iterations: self.frames.len(),
            nums: &self.frames,
        };
        serde_json::to_writer(w, &out)
            .map_err(|e| ReelError::Other(anyhow::Error::new(e).context("write document JSON")))
    }
}

#[derive(Deserialize)]
struct DocumentDef {
    #[serde(deserialize_with = "de_count")]
    width: u32,
    #[serde(deserialize_with = "de_count")]
    height: u32,
    #[serde(deserialize_with = "de_count")]
    iterations: u32,
    #[serde(deserialize_with = "de_frames")]
    nums: Vec<Vec<f32>>,
}

impl DocumentDef {
    fn into_series(self) -> ReelResult<FrameSeries> {
        let dims = Dimensions::new(self.width, self.height)?;
        if self.iterations == 0 {
            return Err(ReelError::decode("iterations must be > 0"));
        }
        if self.nums.len() != self.iterations as usize {
            return Err(ReelError::decode(format!(
                "iterations is {} but nums holds {} frames",
                self.iterations,
                self.nums.len()
            )));
        }
        FrameSeries::new(dims, self.nums)
    }
}

#[derive(Serialize)]
struct DocumentOut<'a> {
    width: u32,
    height: u32,
    iterations: usize,
    nums: &'a [Vec<f32>],
}

// The producer prints counts with `%f`, so `100.000000` has to be accepted as 100.
fn de_count<'de, D>(d: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    struct CountVisitor;

    impl Visitor<'_> for CountVisitor {
        type Value = u32;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a non-negative integer")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u32, E> {
            u32::try_from(v).map_err(|_| E::custom(format!("count {v} is too large")))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u32, E> {
            u32::try_from(v).map_err(|_| E::custom(format!("count {v} is out of range")))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<u32, E> {
            if v.fract() != 0.0 || v < 0.0 || v > f64::from(u32::MAX) {
                return Err(E::custom(format!("count {v} is not a whole number")));
            }
            Ok(v as u32)
        }
    }

    d.deserialize_any(CountVisitor)
}

fn de_frames<'de, D>(d: D) -> Result<Vec<Vec<f32>>, D::Error>
where
    D: Deserializer<'de>,
{
    struct FramesVisitor;

    impl<'de> Visitor<'de> for FramesVisitor {
        type Value = Vec<Vec<f32>>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an array of sample arrays")
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut frames = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(1024));
            while let Some(FrameSamples(samples)) = seq.next_element()? {
                frames.push(samples);
            }
            Ok(frames)
        }
    }

    d.deserialize_seq(FramesVisitor)
}

struct FrameSamples(Vec<f32>);

impl<'de> Deserialize<'de> for FrameSamples {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SamplesVisitor;

        impl<'de> Visitor<'de> for SamplesVisitor {
            type Value = FrameSamples;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an array of samples")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<FrameSamples, A::Error> {
                let mut out = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(Sample(v)) = seq.next_element()? {
                    out.push(v);
                }
                Ok(FrameSamples(out))
            }
        }

        d.deserialize_seq(SamplesVisitor)
    }
}

/// One cell value; `null` and the string `"NaN"` both mean a bounded cell.
struct Sample(f32);

impl<'de> Deserialize<'de> for Sample {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SampleVisitor;

        impl Visitor<'_> for SampleVisitor {
            type Value = Sample;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a finite number or NaN")
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Sample, E> {
                let s = v as f32;
                if !s.is_finite() {
                    return Err(E::invalid_value(de::Unexpected::Float(v), &self));
                }
                Ok(Sample(s))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Sample, E> {
                Ok(Sample(v as f32))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Sample, E> {
                Ok(Sample(v as f32))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Sample, E> {
                Ok(Sample(f32::NAN))
            }

            fn visit_none<E: de::Error>(self) -> Result<Sample, E> {
                Ok(Sample(f32::NAN))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Sample, E> {
                if v.eq_ignore_ascii_case("nan") {
                    Ok(Sample(f32::NAN))
                } else {
                    Err(E::invalid_value(de::Unexpected::Str(v), &self))
                }
            }
        }

        d.deserialize_any(SampleVisitor)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/decode/document.rs"]
mod tests;

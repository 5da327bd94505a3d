//! Sprite-sheet animations driven by the `anIm` chunk.

use crate::assets::png::{self, DecodedPng, Hotspot};
use crate::foundation::error::{PulpError, PulpResult};
use crate::surface::pixel_buffer::PixelBuffer;

/// Frame layout and playback sequence for a sprite sheet.
///
/// The sheet is split into `frames_across x frames_down` equal cells, numbered row-major.
/// Playback shows `frames[i]` for `durations_ms[i]` milliseconds.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AnimationInfo {
    pub frames_across: u16,
    pub frames_down: u16,
    pub looping: bool,
    pub frames: Vec<u16>,
    pub durations_ms: Vec<u16>,
}

impl AnimationInfo {
    pub fn cell_count(&self) -> usize {
        usize::from(self.frames_across) * usize::from(self.frames_down)
    }

    /// Check the layout against a sheet of the given size.
    pub fn validate(&self, sheet_width: u32, sheet_height: u32) -> PulpResult<()> {
        if self.frames_across == 0 || self.frames_down == 0 {
            return Err(PulpError::validation(format!(
                "animation grid {}x{} is empty",
                self.frames_across, self.frames_down
            )));
        }
        if sheet_width % u32::from(self.frames_across) != 0
            || sheet_height % u32::from(self.frames_down) != 0
        {
            return Err(PulpError::validation(format!(
                "{sheet_width}x{sheet_height} sheet does not split into a {}x{} grid",
                self.frames_across, self.frames_down
            )));
        }
        if self.frames.is_empty() {
            return Err(PulpError::validation("animation has no frames"));
        }
        if self.frames.len() != self.durations_ms.len() {
            return Err(PulpError::validation(format!(
                "animation has {} frames but {} durations",
                self.frames.len(),
                self.durations_ms.len()
            )));
        }
        let cells = self.cell_count();
        if let Some(bad) = self.frames.iter().find(|&&f| usize::from(f) >= cells) {
            return Err(PulpError::validation(format!(
                "animation frame {bad} out of range ({cells} cells)"
            )));
        }
        Ok(())
    }
}

/// A multi-frame image with per-frame timing.
#[derive(Clone, Debug)]
pub struct AnimatedImage {
    cells: Vec<PixelBuffer>,
    sequence: Vec<u16>,
    durations_ms: Vec<u16>,
    total_ms: u64,
    looping: bool,
    hotspot: Option<Hotspot>,
}

impl AnimatedImage {
    /// A single frame shown forever.
    pub fn still(image: PixelBuffer) -> Self {
        Self {
            cells: vec![image],
            sequence: vec![0],
            durations_ms: vec![0],
            total_ms: 0,
            looping: false,
            hotspot: None,
        }
    }

    /// Cut `sheet` into cells per `info`.
    pub fn from_sheet(sheet: &PixelBuffer, info: &AnimationInfo) -> PulpResult<Self> {
        info.validate(sheet.width(), sheet.height())?;
        let cell_w = sheet.width() / u32::from(info.frames_across);
        let cell_h = sheet.height() / u32::from(info.frames_down);
        let mut cells = Vec::with_capacity(info.cell_count());
        for row in 0..u32::from(info.frames_down) {
            for col in 0..u32::from(info.frames_across) {
                cells.push(sheet.crop(col * cell_w, row * cell_h, cell_w, cell_h)?);
            }
        }
        Ok(Self {
            cells,
            sequence: info.frames.clone(),
            durations_ms: info.durations_ms.clone(),
            total_ms: info.durations_ms.iter().map(|&d| u64::from(d)).sum(),
            looping: info.looping,
            hotspot: None,
        })
    }

    /// Upgrade a decoded PNG: with an `anIm` chunk it becomes a sheet animation, without one a
    /// still image.
    pub fn from_decoded(decoded: DecodedPng) -> PulpResult<Self> {
        let hotspot = decoded.metadata.hotspot;
        let mut out = match &decoded.metadata.animation {
            Some(info) => Self::from_sheet(&decoded.image, info)?,
            None => Self::still(decoded.image),
        };
        out.hotspot = hotspot;
        Ok(out)
    }

    pub fn from_png(bytes: &[u8]) -> PulpResult<Self> {
        Self::from_decoded(png::decode(bytes)?)
    }

    /// Number of steps in the playback sequence.
    pub fn frame_count(&self) -> usize {
        self.sequence.len()
    }

    /// Number of distinct cells cut from the sheet.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn hotspot(&self) -> Option<Hotspot> {
        self.hotspot
    }

    /// Length of one pass through the sequence.
    pub fn duration_ms(&self) -> u64 {
        self.total_ms
    }

    pub fn frame_duration_ms(&self, step: usize) -> Option<u16> {
        self.durations_ms.get(step).copied()
    }

    /// Sequence step shown after `elapsed_ms`. Non-looping animations hold the last step.
    pub fn frame_index_at(&self, elapsed_ms: u64) -> usize {
        let last = self.sequence.len().saturating_sub(1);
        if self.total_ms == 0 {
            return if self.looping { 0 } else { last };
        }
        let mut t = if self.looping {
            elapsed_ms % self.total_ms
        } else if elapsed_ms >= self.total_ms {
            return last;
        } else {
            elapsed_ms
        };
        for (step, &d) in self.durations_ms.iter().enumerate() {
            let d = u64::from(d);
            if t < d {
                return step;
            }
            t -= d;
        }
        last
    }

    /// Image for sequence step `step`.
    pub fn frame(&self, step: usize) -> Option<&PixelBuffer> {
        let cell = *self.sequence.get(step)?;
        self.cells.get(usize::from(cell))
    }

    /// Image shown after `elapsed_ms`.
    pub fn frame_at(&self, elapsed_ms: u64) -> &PixelBuffer {
        let cell = self.sequence[self.frame_index_at(elapsed_ms)];
        &self.cells[usize::from(cell)]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/animated.rs"]
mod tests;

//! Flat byte buffer holding one strip's channel data in wire order

use heapless::Vec;

use crate::color::Rgb;
use crate::error::ArgumentError;
use crate::profile::ChannelOrder;

/// How a pixel is laid out in the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelLayout {
    pub order: ChannelOrder,
    /// Whether a dedicated white byte follows the color bytes
    pub white: bool,
}

impl PixelLayout {
    pub const fn new(order: ChannelOrder, white: bool) -> Self {
        Self { order, white }
    }

    /// Bytes per pixel (3 or 4)
    pub const fn channel_size(self) -> usize {
        if self.white { 4 } else { 3 }
    }
}

/// Buffer could not be sized for the requested frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityError {
    pub requested: usize,
    pub capacity: usize,
}

/// Pixel bytes of one strip, backed by fixed storage of `CAPACITY` bytes
#[derive(Debug, Clone)]
pub struct PixelBuffer<const CAPACITY: usize> {
    bytes: Vec<u8, CAPACITY>,
    layout: PixelLayout,
    pixel_count: usize,
}

impl<const CAPACITY: usize> PixelBuffer<CAPACITY> {
    /// Allocate a zeroed buffer for `pixel_count` pixels
    pub fn new(layout: PixelLayout, pixel_count: usize) -> Result<Self, CapacityError> {
        let too_large = CapacityError {
            requested: pixel_count.saturating_mul(layout.channel_size()),
            capacity: CAPACITY,
        };
        let len = pixel_count
            .checked_mul(layout.channel_size())
            .ok_or(too_large)?;

        let mut bytes = Vec::new();
        bytes.resize(len, 0).map_err(|()| too_large)?;

        Ok(Self {
            bytes,
            layout,
            pixel_count,
        })
    }

    pub const fn layout(&self) -> PixelLayout {
        self.layout
    }

    pub const fn pixel_count(&self) -> usize {
        self.pixel_count
    }

    /// Write one pixel in the layout's channel order
    ///
    /// `w` is dropped unless the layout has a white channel. Nothing is
    /// written when the index is out of range.
    pub fn set(&mut self, index: usize, r: u8, g: u8, b: u8, w: u8) -> Result<(), ArgumentError> {
        let color = self.layout.order.arrange(r, g, b);
        let slot = self.slot_mut(index)?;
        slot[..3].copy_from_slice(&color);
        if let Some(white) = slot.get_mut(3) {
            *white = w;
        }
        Ok(())
    }

    /// Write an RGB color, leaving white at zero
    pub fn set_rgb(&mut self, index: usize, color: Rgb) -> Result<(), ArgumentError> {
        self.set(index, color.r, color.g, color.b, 0)
    }

    /// Raw bytes of one pixel in wire order
    pub fn pixel(&self, index: usize) -> Option<&[u8]> {
        if index >= self.pixel_count {
            return None;
        }
        let size = self.layout.channel_size();
        let start = index * size;
        Some(&self.bytes[start..start + size])
    }

    /// Zero every pixel
    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }

    /// Whole frame in wire order
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut [u8], ArgumentError> {
        if index >= self.pixel_count {
            return Err(ArgumentError::IndexOutOfRange {
                index,
                len: self.pixel_count,
            });
        }
        let size = self.layout.channel_size();
        let start = index * size;
        Ok(&mut self.bytes[start..start + size])
    }
}

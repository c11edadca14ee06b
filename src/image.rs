//! Interface for fitting pasted or dropped images to configured limits.
//!
//! The scaling itself belongs to the host, which owns the image decoder and
//! canvas; this module only fixes the contract and the "does it fit" rule.

/// Maximum image dimensions. An unset limit disables fitting altogether.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FitLimits {
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
}

impl FitLimits {
    pub const fn new(max_width: u32, max_height: u32) -> Self {
        Self {
            max_width: Some(max_width),
            max_height: Some(max_height),
        }
    }

    /// Whether an image of this size can be inserted unchanged.
    ///
    /// # Example
    /// ```
    /// use ferrolink::image::FitLimits;
    ///
    /// let limits = FitLimits::new(800, 600);
    /// assert!(limits.admits(800, 600));
    /// assert!(!limits.admits(801, 10));
    /// assert!(FitLimits::default().admits(10_000, 10_000));
    /// ```
    pub fn admits(&self, width: u32, height: u32) -> bool {
        match (self.max_width, self.max_height) {
            (Some(max_w), Some(max_h)) => width <= max_w && height <= max_h,
            _ => true,
        }
    }
}

/// Host-provided image fitting.
///
/// Implementations return `data_url` unchanged when `limits` admit the
/// image, and otherwise a proportionally scaled re-encoding in `mime_type`.
pub trait ImageFit {
    fn fit(&self, data_url: &str, mime_type: &str, limits: &FitLimits) -> String;
}

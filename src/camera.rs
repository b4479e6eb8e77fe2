// Opens the default camera and converts frames into RGBA buffers for the driver.
// Visual expectation: each `next_frame()` is the live image, one frame newer.

use mood_booth::{Error, FrameSource, PixelBuffer, Result};

// Bring in nokhwa types for camera control.
use nokhwa::{
    Camera,
    pixel_format::RgbAFormat,
    utils::{
        CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
    },
};

// A small wrapper around nokhwa::Camera so the driver only sees a FrameSource.
pub struct CameraCapture {
    cam: Camera,
    width: u32,
    height: u32,
}

impl CameraCapture {
    /// Open camera `index` near the requested resolution (falls back if not exact).
    pub fn new(index: u32, width: u32, height: u32, fps: u32) -> Result<Self> {
        let idx = CameraIndex::Index(index);

        let fmt = CameraFormat::new(
            Resolution::new(width, height),
            FrameFormat::YUYV, // uncompressed; cheap to convert
            fps,
        );

        let req = RequestedFormat::new::<RgbAFormat>(RequestedFormatType::Closest(fmt));

        let mut cam = Camera::new(idx, req)
            .map_err(|e| Error::CameraInit(format!("create camera: {e}")))?;

        cam.open_stream()
            .map_err(|e| Error::CameraInit(format!("open stream: {e}")))?;

        // The stream might choose a slightly different resolution.
        let actual = cam.resolution();
        tracing::info!(
            index,
            width = actual.width(),
            height = actual.height(),
            "camera stream open"
        );

        Ok(Self {
            cam,
            width: actual.width(),
            height: actual.height(),
        })
    }

    /// Resolution the camera is actually delivering.
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl FrameSource for CameraCapture {
    /// Blocks until the camera has a frame; the host paces ticks so this stays short.
    fn next_frame(&mut self) -> Result<PixelBuffer> {
        let frame = self
            .cam
            .frame()
            .map_err(|e| Error::CameraFrame(format!("fetch frame: {e}")))?;

        let rgba = frame
            .decode_image::<RgbAFormat>()
            .map_err(|e| Error::CameraFrame(format!("decode RGBA: {e}")))?;

        let (w, h) = rgba.dimensions();
        if (w, h) != (self.width, self.height) {
            // device switched mode; the driver reallocates on the next tick
            tracing::info!(width = w, height = h, "camera resolution changed");
            self.width = w;
            self.height = h;
        }
        PixelBuffer::from_raw(w, h, rgba.into_raw())
    }
}

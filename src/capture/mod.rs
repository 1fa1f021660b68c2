pub mod camera;
pub mod probe;
pub mod snapshot;

pub use camera::OpenCvCamera;
pub use snapshot::{JpegWriter, SnapshotNamer, SnapshotSink};

use crate::shared::error::CollectorResult;

/// Something frames can be pulled from, one at a time.
pub trait FrameSource {
    type Frame;

    /// A failed read is fatal for the session; it is never retried.
    fn read_frame(&mut self) -> CollectorResult<Self::Frame>;

    fn release(&mut self) -> CollectorResult<()>;
}

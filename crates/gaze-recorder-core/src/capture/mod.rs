mod session;
mod source;
mod status;
pub mod synthetic;

pub use {
    session::CaptureSession,
    source::{FrameSource, StreamKind, StreamSpec},
    status::SdkStatus,
    synthetic::SyntheticCamera,
};

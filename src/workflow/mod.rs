pub mod dispatch_flow;
pub mod upload_ctx;

pub use dispatch_flow::{DispatchFlow, DispatchResult};
pub use upload_ctx::UploadCtx;

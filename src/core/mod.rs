pub mod frame;
pub mod mapper;
pub mod types;
pub mod viewport;

pub use frame::{BinRange, Frame};
pub use mapper::{
    domain_to_pixel, pixel_to_domain, pixel_to_index, visible_index_range,
};
pub use types::{Axis, SurfaceSize};
pub use viewport::{AxisViewport, DEFAULT_ZOOM_STEP, ViewportSnapshot, ZoomDirection};

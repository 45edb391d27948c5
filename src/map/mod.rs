pub mod marker;
pub mod view;

pub use marker::{CustomMarkers, MarkerData, MarkerKind, project_markers};
pub use view::{MapView, Viewport};

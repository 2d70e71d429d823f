pub mod popup;
pub mod scene;

#[cfg(feature = "egui")]
pub mod widget;

pub use popup::InfoWindow;
pub use scene::{InfoWindowView, MapScene, MarkerView};

#[cfg(feature = "egui")]
pub use widget::{EguiMapSurface, FinderPanel};

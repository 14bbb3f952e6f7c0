pub mod clip;
pub mod colors;
pub mod config;
pub mod geo;
pub mod globe;
pub mod graticule;
pub mod info;
pub mod interaction;
pub mod layout;
pub mod path;
pub mod projection;

pub use colors::{Palette, ShapeStyle};
pub use config::GlobeConfig;
pub use geo::*;
pub use globe::*;
pub use info::CountryInfo;
pub use interaction::{DragPhase, DragSession, Rotation};
pub use layout::GlobeLayout;
pub use projection::Orthographic;

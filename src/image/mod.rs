pub mod io;
pub mod rgba;
pub mod sampling;
pub mod traits;
pub mod view;

pub use self::rgba::{Rgba8, Rgba8Image, TRANSPARENT};
pub use self::traits::{ImageView, Rows};
pub use self::view::Rgba8View;

pub mod draw;
pub mod graphics;
pub mod layout;
pub mod scene;
pub mod surface;

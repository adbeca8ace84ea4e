/// CPU caption compositor.
pub mod compositor;
/// PNG serialization and export naming.
pub mod encode;

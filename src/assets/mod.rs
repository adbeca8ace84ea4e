/// Upload validation and raster decoding.
pub mod decode;
/// Caption font discovery.
pub mod fonts;

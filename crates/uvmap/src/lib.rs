#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use uvmap_image as image;

#[doc(inline)]
pub use uvmap_io as io;

#[doc(inline)]
pub use uvmap_warp as warp;

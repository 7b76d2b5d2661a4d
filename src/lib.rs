//! ExMatch is an exhaustive, pixel-exact template matching library.
//!
//! The matcher slides a template over a search region of a packed pixel
//! buffer, scores every placement with an integer sum of absolute channel
//! differences, suppresses non-maxima in a 5x5 window and returns matches
//! ranked by similarity. Optional parallelism is available via the `rayon`
//! feature; decoding through the `image` crate sits behind `image-io`.

pub mod buffer;
#[cfg(feature = "image-io")]
pub mod compare;
pub mod geom;
pub mod matcher;
mod trace;
pub mod util;

pub use buffer::{PixelBuffer, PixelFormat, PixelView, Rgba};
pub use geom::Rect;
pub use matcher::{find_matches, similarity_at, MatchRecord, Matcher};
pub use util::{ExMatchError, ExMatchResult};

#[cfg(feature = "image-io")]
pub use compare::{compare_images, similarity};

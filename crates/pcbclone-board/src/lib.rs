//! Board data model and the document interface the cloner works against.

mod board;
mod document;
mod error;
mod model;

pub use board::Board;
pub use document::BoardDocument;
pub use error::BoardError;
pub use model::{
    Drawing, DrawingShape, Footprint, LayerId, Net, NetCode, Pad, Side, TextLabel, TextStyle,
    Track, TrackShape, Zone,
};

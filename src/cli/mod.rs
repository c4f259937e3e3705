mod album;
mod pick;
mod picked;
mod status;

pub use album::{run_album_add, run_album_list, run_album_remove, AlbumInfo};
pub use pick::{run_pick, PickAction};
pub use picked::{run_picked, PickedOptions};
pub use status::{run_status, StatusReport};

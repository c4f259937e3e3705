mod album_list;
mod filmstrip;
mod input_dialog;
mod status_bar;

pub use album_list::render_album_list;
pub use filmstrip::render_filmstrip;
pub use input_dialog::render_input_dialog;
pub use status_bar::render_status_bar;

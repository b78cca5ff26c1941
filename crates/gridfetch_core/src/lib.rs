//! Gridfetch core: pure presentation state machine and view-model helpers.
mod effect;
mod layout;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use layout::{compute_cell_size, CellLayout};
pub use msg::Msg;
pub use state::{parse_url_list, AppState, Phase};
pub use update::update;
pub use view_model::{CellView, GridViewModel, TITLE};

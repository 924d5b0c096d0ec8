pub mod utils {
    pub mod config;
    pub mod constants;
    pub mod debug_functions;
    pub mod game_functions;
    pub mod macros;
    pub mod objects;
    pub mod roll_animator;
    pub mod setup;
}

pub mod plugins {
    pub mod dice_plugin;
}

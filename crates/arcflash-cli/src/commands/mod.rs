pub mod calc;
pub mod multistep;
pub mod presets;
pub mod sweep;
pub mod util;

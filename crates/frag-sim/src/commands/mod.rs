pub mod inspect;
pub mod presets;
pub mod run;
pub mod version;
